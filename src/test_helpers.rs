//! Shared test utilities for the site-adapters test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tree = component(json!({"sling:resourceType": QUOTE, "quoteTitle": "Hi"}));
//! let quote = Quote::parse(&tree.root());
//!
//! let tmp = setup_fixtures();
//! let tree = fixture_content(tmp.path());
//! ```

use crate::config::UrlRewriterSettings;
use crate::node::ContentTree;
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Load `content.json` from a fixture copy.
pub fn fixture_content(root: &Path) -> ContentTree {
    ContentTree::load(&root.join("content.json")).unwrap()
}

// =========================================================================
// In-memory builders
// =========================================================================

/// A tree whose root node is the given component object.
pub fn component(props: serde_json::Value) -> ContentTree {
    ContentTree::from_json(&props.to_string()).unwrap()
}

/// Rewriter settings from literal entry lists.
pub fn settings(rewrites: &[&str], skipped: &[&str]) -> UrlRewriterSettings {
    UrlRewriterSettings {
        urls_to_be_re_written: rewrites.iter().map(|s| s.to_string()).collect(),
        urls_to_be_skipped: skipped.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{self, ComponentModel};
    use crate::node::{ContentNode, PageLookup};

    #[test]
    fn fixture_tree_has_a_page_with_components() {
        let tmp = setup_fixtures();
        let tree = fixture_content(tmp.path());
        assert!(tree.is_page("/content/adobexp/us/en"));
        let root = tree.require("/content/adobexp/us/en/jcr:content/root").unwrap();
        let found = models::adapt_all(&root);
        assert!(found.iter().any(|(_, m)| matches!(m, ComponentModel::Header(_))));
        assert_eq!(root.name(), "root");
    }

    #[test]
    fn fixture_config_loads() {
        let tmp = setup_fixtures();
        let config = crate::config::load_config(&tmp.path().join("adapters.toml")).unwrap();
        assert_eq!(config.url_rewriter.urls_to_be_re_written.len(), 2);
    }
}
