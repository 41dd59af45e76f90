//! CLI output formatting for every subcommand.
//!
//! Every `format_*` function is pure: it takes results and returns display
//! lines, so tests can assert on exact output without capturing stdout. The
//! matching `print_*` function writes those lines.
//!
//! # Output Format
//!
//! ## Rewrite
//!
//! ```text
//! /content/dam/site/logo.svg → /static/assets/site/logo.svg
//!     Mode: disabled
//!     Rule: /content/dam/ → /static/assets/
//! ```
//!
//! ## Check
//!
//! ```text
//! Config
//!     adapters.toml
//! Rewrite rules
//!     001 /content/dam/ → /static/assets/
//! Skipped
//!     001 /content/dam/private
//! Content
//!     content.json (42 nodes)
//!     001 /content/site/en/jcr:content/root/header (header)
//! ```

use crate::links::WcmMode;
use crate::models::ComponentModel;
use crate::rewrite::RewriteRules;
use crate::stylesheet::CssResponse;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Short display name of a resource type: its last segment that is not a
/// version marker.
///
/// ```text
/// adobexp/components/global/header        → header
/// adobexp/components/content/text/v1/text → text
/// ```
fn short_type(resource_type: &str) -> &str {
    resource_type
        .rsplit('/')
        .find(|segment| !is_version_segment(segment))
        .unwrap_or(resource_type)
}

fn is_version_segment(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

// ============================================================================
// rules / check
// ============================================================================

fn rule_lines(rules: &RewriteRules) -> Vec<String> {
    let mut lines = vec!["Rewrite rules".to_string()];
    if rules.mappings().is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, mapping) in rules.mappings().iter().enumerate() {
        lines.push(format!(
            "{}{} {} → {}",
            indent(1),
            format_index(i + 1),
            mapping.internal_prefix,
            mapping.external_prefix
        ));
    }
    lines.push("Skipped".to_string());
    if rules.skipped().is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, prefix) in rules.skipped().iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), prefix));
    }
    lines
}

/// Content export summary for `check`.
#[derive(Debug)]
pub struct ContentSummary<'a> {
    pub path: &'a Path,
    pub node_count: usize,
    /// `(node path, component)` in tree order.
    pub components: &'a [(String, ComponentModel)],
}

/// Format the `check` report.
pub fn format_check_output(
    config_path: &Path,
    config_found: bool,
    rules: &RewriteRules,
    content: Option<&ContentSummary<'_>>,
) -> Vec<String> {
    let mut lines = vec!["Config".to_string()];
    let suffix = if config_found { "" } else { " (not found, using defaults)" };
    lines.push(format!("{}{}{}", indent(1), config_path.display(), suffix));
    lines.extend(rule_lines(rules));

    if let Some(content) = content {
        lines.push("Content".to_string());
        lines.push(format!(
            "{}{} ({} nodes)",
            indent(1),
            content.path.display(),
            content.node_count
        ));
        for (i, (path, model)) in content.components.iter().enumerate() {
            lines.push(format!(
                "{}{} {} ({})",
                indent(1),
                format_index(i + 1),
                path,
                short_type(model.resource_type())
            ));
        }
    }
    lines
}

pub fn print_check_output(
    config_path: &Path,
    config_found: bool,
    rules: &RewriteRules,
    content: Option<&ContentSummary<'_>>,
) {
    for line in format_check_output(config_path, config_found, rules, content) {
        println!("{}", line);
    }
}

// ============================================================================
// rewrite
// ============================================================================

/// Format one resolved link with the rule that decided it.
pub fn format_rewrite_output(
    rules: &RewriteRules,
    internal_path: &str,
    mode: WcmMode,
    resolved: &str,
) -> Vec<String> {
    let mut lines = vec![
        format!("{} → {}", internal_path, resolved),
        format!("{}Mode: {}", indent(1), mode),
    ];
    let reason = if !mode.rewrites_links() {
        "Rewriting off in this mode".to_string()
    } else if let Some(prefix) = rules.skip_prefix_for(internal_path) {
        format!("Skipped: {}", prefix)
    } else if let Some(mapping) = rules.mapping_for(internal_path) {
        format!("Rule: {} → {}", mapping.internal_prefix, mapping.external_prefix)
    } else {
        "No matching rule".to_string()
    };
    lines.push(format!("{}{}", indent(1), reason));
    lines
}

pub fn print_rewrite_output(rules: &RewriteRules, internal_path: &str, mode: WcmMode, resolved: &str) {
    for line in format_rewrite_output(rules, internal_path, mode, resolved) {
        println!("{}", line);
    }
}

// ============================================================================
// theme-css
// ============================================================================

/// Response headers, a blank line, then the stylesheet.
pub fn format_css_response(response: &CssResponse) -> Vec<String> {
    let mut lines = vec![
        format!("Content-Type: {}", response.content_type),
        format!("Cache-Control: {}", response.cache_control),
        String::new(),
    ];
    lines.extend(response.body.lines().map(str::to_string));
    lines
}

pub fn print_css_response(response: &CssResponse) {
    for line in format_css_response(response) {
        println!("{}", line);
    }
}

// ============================================================================
// model
// ============================================================================

/// Header line naming the component, then the model as indented JSON.
pub fn format_model_output(path: &str, model: &ComponentModel) -> Result<Vec<String>, serde_json::Error> {
    let json = serde_json::to_string_pretty(model)?;
    let mut lines = vec![format!("{} ({})", path, short_type(model.resource_type()))];
    lines.extend(json.lines().map(|l| format!("{}{}", indent(1), l)));
    Ok(lines)
}

pub fn print_model_output(path: &str, model: &ComponentModel) -> Result<(), serde_json::Error> {
    for line in format_model_output(path, model)? {
        println!("{}", line);
    }
    Ok(())
}
