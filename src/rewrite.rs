//! Internal-to-public URL rewriting.
//!
//! A [`RewriteRules`] value maps repository paths (`/content/dam/...`) to the
//! paths exposed to visitors (`/static/assets/...`). It is built once from two
//! string lists and never mutated afterwards:
//!
//! - `urls_to_be_re_written`: one JSON object per entry,
//!   `{"internalUrl": "/content/dam/", "externalUrl": "/static/assets"}`
//! - `urls_to_be_skipped`: plain path prefixes that must never be rewritten
//!
//! ## Resolution
//!
//! ```text
//! rewriting disabled          → path unchanged
//! path starts with a skip     → path unchanged
//! first mapping (insertion    → external + path[len(internal)..]
//!   order) whose internal
//!   prefix starts the path
//! otherwise                   → path unchanged
//! ```
//!
//! Matching is first-match in insertion order. It is neither alphabetical nor
//! longest-prefix: list the more specific prefix first.
//! An empty skip prefix covers every non-empty path.
//!
//! ## Reconfiguration
//!
//! [`UrlRewriter`] owns the active rules behind an [`ArcSwap`]. A
//! reconfiguration builds a complete new table and swaps it in, so readers
//! see either the old table or the new one, never a mix.

use crate::config::UrlRewriterSettings;
use arc_swap::ArcSwap;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Why a single rewrite entry was rejected. Rejections are logged and the
/// entry is skipped; they never abort loading.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("invalid rewrite entry: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rewrite entry has an empty internalUrl")]
    EmptyInternalUrl,
}

/// One `internal prefix → external prefix` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteMapping {
    pub internal_prefix: String,
    pub external_prefix: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMapping {
    internal_url: String,
    external_url: String,
}

impl RewriteMapping {
    /// Parse one JSON-encoded entry.
    pub fn parse(entry: &str) -> Result<Self, RuleError> {
        let raw: RawMapping = serde_json::from_str(entry)?;
        if raw.internal_url.is_empty() {
            return Err(RuleError::EmptyInternalUrl);
        }
        Ok(Self {
            internal_prefix: raw.internal_url,
            external_prefix: raw.external_url,
        })
    }

    /// Swap the internal prefix for the external one. A `/` that ends the
    /// internal prefix is kept when the external prefix lacks one, so
    /// `/content/dam/` → `/static/assets` still yields `/static/assets/a.png`.
    fn apply(&self, internal_path: &str) -> Option<String> {
        let rest = internal_path.strip_prefix(self.internal_prefix.as_str())?;
        let separator = if self.internal_prefix.ends_with('/') && !self.external_prefix.ends_with('/') {
            "/"
        } else {
            ""
        };
        Some(format!("{}{separator}{rest}", self.external_prefix))
    }
}

/// Immutable rewrite table: ordered prefix mappings plus a skip list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteRules {
    mappings: Vec<RewriteMapping>,
    skipped: Vec<String>,
}

impl RewriteRules {
    /// Build a table from raw configuration strings.
    ///
    /// Empty rewrite entries are ignored. Malformed entries, whitespace-only
    /// ones included, are logged and skipped; the rest still load. A later entry for an internal prefix
    /// that is already present replaces its external prefix in place, so
    /// the prefix keeps the position of its first occurrence.
    pub fn load<R, S>(urls_to_be_re_written: &[R], urls_to_be_skipped: &[S]) -> Self
    where
        R: AsRef<str>,
        S: AsRef<str>,
    {
        let mut mappings: Vec<RewriteMapping> = Vec::new();
        for entry in urls_to_be_re_written {
            let entry: &str = entry.as_ref();
            if entry.is_empty() {
                tracing::debug!("skipping empty rewrite entry");
                continue;
            }
            match RewriteMapping::parse(entry) {
                Ok(mapping) => {
                    match mappings
                        .iter_mut()
                        .find(|m| m.internal_prefix == mapping.internal_prefix)
                    {
                        Some(existing) => existing.external_prefix = mapping.external_prefix,
                        None => mappings.push(mapping),
                    }
                }
                Err(error) => {
                    tracing::error!(entry, %error, "rejected rewrite entry");
                }
            }
        }

        let skipped: Vec<String> = urls_to_be_skipped
            .iter()
            .map(|prefix| prefix.as_ref().to_string())
            .collect();
        if skipped.iter().any(String::is_empty) {
            tracing::warn!("empty skip prefix matches every path, rewriting is effectively off");
        }

        tracing::info!(
            mappings = mappings.len(),
            skipped = skipped.len(),
            "rewrite rules loaded"
        );
        Self { mappings, skipped }
    }

    pub fn from_settings(settings: &UrlRewriterSettings) -> Self {
        Self::load(
            settings.urls_to_be_re_written.as_slice(),
            settings.urls_to_be_skipped.as_slice(),
        )
    }

    pub fn mappings(&self) -> &[RewriteMapping] {
        &self.mappings
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Look up the external prefix for an exact internal prefix.
    pub fn external_for(&self, internal_prefix: &str) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.internal_prefix == internal_prefix)
            .map(|m| m.external_prefix.as_str())
    }

    /// First skip prefix covering `internal_path`. Empty paths are never
    /// skipped.
    pub fn skip_prefix_for(&self, internal_path: &str) -> Option<&str> {
        if internal_path.is_empty() {
            return None;
        }
        self.skipped
            .iter()
            .find(|prefix| internal_path.starts_with(prefix.as_str()))
            .map(String::as_str)
    }

    pub fn is_skipped(&self, internal_path: &str) -> bool {
        self.skip_prefix_for(internal_path).is_some()
    }

    /// First mapping, in insertion order, whose internal prefix starts
    /// `internal_path`. Skips are not consulted.
    pub fn mapping_for(&self, internal_path: &str) -> Option<&RewriteMapping> {
        self.mappings
            .iter()
            .find(|m| internal_path.starts_with(m.internal_prefix.as_str()))
    }

    /// Map an internal path to the path exposed publicly.
    pub fn resolve(&self, internal_path: &str, rewriting_enabled: bool) -> String {
        let resolved = if !rewriting_enabled || self.is_skipped(internal_path) {
            internal_path.to_string()
        } else {
            self.mapping_for(internal_path)
                .and_then(|m| m.apply(internal_path))
                .unwrap_or_else(|| internal_path.to_string())
        };
        tracing::debug!(internal_path, rewriting_enabled, %resolved, "resolved publish url");
        resolved
    }
}

/// Hosting service for the active [`RewriteRules`].
#[derive(Debug)]
pub struct UrlRewriter {
    rules: ArcSwap<RewriteRules>,
}

impl UrlRewriter {
    pub fn new(rules: RewriteRules) -> Self {
        Self {
            rules: ArcSwap::from_pointee(rules),
        }
    }

    /// Build the service from configuration.
    pub fn activate(settings: &UrlRewriterSettings) -> Self {
        Self::new(RewriteRules::from_settings(settings))
    }

    /// Replace the whole table. In-flight readers keep the snapshot they
    /// already loaded.
    pub fn reconfigure(&self, settings: &UrlRewriterSettings) {
        self.rules.store(Arc::new(RewriteRules::from_settings(settings)));
    }

    /// Snapshot of the current table.
    pub fn rules(&self) -> Arc<RewriteRules> {
        self.rules.load_full()
    }

    pub fn publish_url(&self, internal_path: &str, rewriting_enabled: bool) -> String {
        self.rules.load().resolve(internal_path, rewriting_enabled)
    }
}

impl Default for UrlRewriter {
    fn default() -> Self {
        Self::new(RewriteRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const DAM: &str = r#"{"internalUrl":"/content/dam/","externalUrl":"/static/assets"}"#;
    const NONE: &[&str] = &[];

    fn rules(rewrites: &[&str], skipped: &[&str]) -> RewriteRules {
        RewriteRules::load(rewrites, skipped)
    }

    #[test]
    fn rewrites_matching_prefix() {
        let r = rules(&[DAM], NONE);
        assert_eq!(
            r.resolve("/content/dam/images/a.png", true),
            "/static/assets/images/a.png"
        );
    }

    #[test]
    fn skip_prefix_wins_over_mapping() {
        let r = rules(&[DAM], &["/content/dam"]);
        assert_eq!(
            r.resolve("/content/dam/images/a.png", true),
            "/content/dam/images/a.png"
        );
    }

    #[test]
    fn disabled_mode_is_identity() {
        let r = rules(&[DAM], NONE);
        for path in ["/content/dam/x.png", "/content/site/en", "", "relative"] {
            assert_eq!(r.resolve(path, false), path);
        }
    }

    #[test]
    fn unmatched_path_passes_through() {
        let r = rules(&[DAM], NONE);
        assert_eq!(r.resolve("/content/site/en.html", true), "/content/site/en.html");
    }

    #[test]
    fn empty_path_is_not_skipped_and_passes_through() {
        let r = rules(&[DAM], &["/content"]);
        assert!(!r.is_skipped(""));
        assert_eq!(r.resolve("", true), "");
    }

    #[test]
    fn first_inserted_match_wins() {
        let r = rules(
            &[
                r#"{"internalUrl":"/content/","externalUrl":"/c"}"#,
                r#"{"internalUrl":"/content/dam/","externalUrl":"/assets"}"#,
            ],
            NONE,
        );
        assert_eq!(r.resolve("/content/dam/a.png", true), "/c/dam/a.png");
    }

    #[test]
    fn internal_trailing_slash_is_kept_when_external_lacks_one() {
        let r = rules(
            &[
                DAM,
                r#"{"internalUrl":"/content/site/","externalUrl":"/"}"#,
                r#"{"internalUrl":"/content/old","externalUrl":"/new"}"#,
                r#"{"internalUrl":"/content/home/","externalUrl":""}"#,
            ],
            NONE,
        );
        assert_eq!(r.resolve("/content/dam/a.png", true), "/static/assets/a.png");
        assert_eq!(r.resolve("/content/dam/", true), "/static/assets/");
        assert_eq!(r.resolve("/content/site/en", true), "/en");
        assert_eq!(r.resolve("/content/old/x", true), "/new/x");
        assert_eq!(r.resolve("/content/oldest", true), "/newest");
        assert_eq!(r.resolve("/content/home/en", true), "/en");
    }

    #[test]
    fn more_specific_prefix_listed_first_wins() {
        let r = rules(
            &[
                r#"{"internalUrl":"/content/dam/","externalUrl":"/assets/"}"#,
                r#"{"internalUrl":"/content/","externalUrl":"/"}"#,
            ],
            NONE,
        );
        assert_eq!(r.resolve("/content/dam/a.png", true), "/assets/a.png");
        assert_eq!(r.resolve("/content/site/en", true), "/site/en");
    }

    #[test]
    fn duplicate_prefix_last_value_wins_in_place() {
        let r = rules(
            &[
                r#"{"internalUrl":"/a","externalUrl":"/first"}"#,
                r#"{"internalUrl":"/b","externalUrl":"/bee"}"#,
                r#"{"internalUrl":"/a","externalUrl":"/second"}"#,
            ],
            NONE,
        );
        assert_eq!(r.mappings().len(), 2);
        assert_eq!(r.mappings()[0].internal_prefix, "/a");
        assert_eq!(r.external_for("/a"), Some("/second"));
        assert_eq!(r.resolve("/a/x", true), "/second/x");
    }

    #[traced_test]
    #[test]
    fn malformed_entry_does_not_block_the_rest() {
        let r = rules(
            &["not-json", r#"{"internalUrl":"/a","externalUrl":"/b"}"#],
            NONE,
        );
        assert_eq!(
            r.mappings(),
            &[RewriteMapping {
                internal_prefix: "/a".into(),
                external_prefix: "/b".into(),
            }]
        );
        assert!(logs_contain("rejected rewrite entry"));
    }

    #[test]
    fn entries_missing_keys_or_with_empty_internal_are_rejected() {
        let r = rules(
            &[
                r#"{"internalUrl":"/only-internal"}"#,
                r#"{"internalUrl":"","externalUrl":"/x"}"#,
                r#"{"internalUrl":"/n","externalUrl":5}"#,
                "",
            ],
            NONE,
        );
        assert!(r.mappings().is_empty());
    }

    #[traced_test]
    #[test]
    fn whitespace_only_entry_is_logged_as_malformed() {
        let r = rules(&["   ", DAM], NONE);
        assert_eq!(r.mappings().len(), 1);
        assert!(logs_contain("rejected rewrite entry"));
    }

    #[traced_test]
    #[test]
    fn empty_entry_is_skipped_without_error() {
        let r = rules(&["", DAM], NONE);
        assert_eq!(r.mappings().len(), 1);
        assert!(!logs_contain("rejected rewrite entry"));
    }

    #[test]
    fn parse_reports_empty_internal() {
        let err = RewriteMapping::parse(r#"{"internalUrl":"","externalUrl":"/x"}"#).unwrap_err();
        assert!(matches!(err, RuleError::EmptyInternalUrl));
        assert!(matches!(
            RewriteMapping::parse("[]").unwrap_err(),
            RuleError::Json(_)
        ));
    }

    #[test]
    fn extra_json_keys_are_ignored() {
        let m = RewriteMapping::parse(
            r#"{"internalUrl":"/a","externalUrl":"/b","comment":"legacy"}"#,
        )
        .unwrap();
        assert_eq!(m.external_prefix, "/b");
    }

    #[test]
    fn duplicate_skip_entries_are_kept() {
        let r = rules(&[DAM], &["/content/dam/private", "/content/dam/private"]);
        assert_eq!(r.skipped().len(), 2);
        assert_eq!(
            r.resolve("/content/dam/images/a.png", true),
            "/static/assets/images/a.png"
        );
        assert_eq!(
            r.resolve("/content/dam/private/a.png", true),
            "/content/dam/private/a.png"
        );
    }

    #[traced_test]
    #[test]
    fn empty_skip_entry_skips_every_path() {
        let r = rules(&[DAM], &["", "/content/dam/private", "/content/dam/private"]);
        assert_eq!(r.skipped().len(), 3);
        assert_eq!(r.skip_prefix_for("/content/dam/images/a.png"), Some(""));
        assert_eq!(
            r.resolve("/content/dam/images/a.png", true),
            "/content/dam/images/a.png"
        );
        assert!(!r.is_skipped(""));
        assert!(logs_contain("empty skip prefix"));
    }

    #[test]
    fn service_reconfigure_swaps_whole_table() {
        let service = UrlRewriter::activate(&UrlRewriterSettings {
            urls_to_be_re_written: vec![DAM.to_string()],
            urls_to_be_skipped: vec![],
        });
        let before = service.rules();
        assert_eq!(
            service.publish_url("/content/dam/a.png", true),
            "/static/assets/a.png"
        );

        service.reconfigure(&UrlRewriterSettings {
            urls_to_be_re_written: vec![
                r#"{"internalUrl":"/content/dam/","externalUrl":"/cdn"}"#.to_string(),
            ],
            urls_to_be_skipped: vec![],
        });

        assert_eq!(service.publish_url("/content/dam/a.png", true), "/cdn/a.png");
        // The old snapshot is untouched.
        assert_eq!(before.resolve("/content/dam/a.png", true), "/static/assets/a.png");
    }

    #[test]
    fn default_service_is_identity() {
        let service = UrlRewriter::default();
        assert_eq!(service.publish_url("/content/dam/a.png", true), "/content/dam/a.png");
    }
}
