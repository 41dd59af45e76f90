//! Link rewriting at render time.
//!
//! Templates hand every link-valued property to this module before writing
//! it into the page. Whether rewriting applies depends on the authoring mode
//! of the current request: authors editing or previewing a page must see
//! repository paths, published pages get public paths.

use crate::node::{PageLookup, RESERVED_PREFIX};
use crate::rewrite::UrlRewriter;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Authoring mode of the request being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WcmMode {
    Edit,
    Preview,
    /// Published rendering.
    #[default]
    Disabled,
}

impl WcmMode {
    /// Rewriting is on unless an author is looking at the page.
    pub fn rewrites_links(self) -> bool {
        !matches!(self, WcmMode::Edit | WcmMode::Preview)
    }
}

impl FromStr for WcmMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "edit" => Ok(WcmMode::Edit),
            "preview" => Ok(WcmMode::Preview),
            "disabled" => Ok(WcmMode::Disabled),
            other => Err(format!("unknown authoring mode: {other}")),
        }
    }
}

impl fmt::Display for WcmMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WcmMode::Edit => "edit",
            WcmMode::Preview => "preview",
            WcmMode::Disabled => "disabled",
        };
        f.write_str(name)
    }
}

/// Public form of a single link. Empty input is returned untouched.
pub fn publish_url(rewriter: &UrlRewriter, internal_url: &str, mode: WcmMode) -> String {
    if internal_url.is_empty() {
        return String::new();
    }
    rewriter.publish_url(internal_url, mode.rewrites_links())
}

/// Coarse value classification exposed to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueType {
    /// Falsy scalars (`false`, `0`) and everything not listed below.
    String,
    /// `true` and non-zero numbers.
    Boolean,
    Array,
}

/// A property prepared for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformedProperty {
    /// `false` for reserved (`jcr:`) property names templates must not emit.
    pub valid_key: bool,
    pub value: Option<Value>,
    pub value_type: ValueType,
}

/// Property names containing this marker point at JSON endpoints, not pages.
const JSON_URL_MARKER: &str = "JsonUrl";
const PAGE_EXTENSION: &str = ".html";
const CONTENT_PREFIX: &str = "/content/";

/// Prepare one property for output.
///
/// String values that name an existing page gain the `.html` extension
/// (unless the property is a JSON endpoint), lose embedded line breaks, and
/// are passed through the rewriter. Other values pass through unchanged.
pub fn transform_property(
    name: &str,
    value: Option<&Value>,
    mode: WcmMode,
    rewriter: &UrlRewriter,
    pages: &dyn PageLookup,
) -> TransformedProperty {
    let valid_key = !name.starts_with(RESERVED_PREFIX);
    let (value, value_type) = match value {
        Some(Value::String(s)) if !s.is_empty() => {
            let mut link = s.clone();
            if link.starts_with(CONTENT_PREFIX) && pages.is_page(&link) && !name.contains(JSON_URL_MARKER) {
                link.push_str(PAGE_EXTENSION);
            }
            let link = strip_line_breaks(&link);
            (
                Some(Value::String(publish_url(rewriter, &link, mode))),
                ValueType::String,
            )
        }
        Some(v @ (Value::Bool(_) | Value::Number(_))) if is_truthy(v) => {
            (Some(v.clone()), ValueType::Boolean)
        }
        Some(v @ Value::Array(_)) => (Some(v.clone()), ValueType::Array),
        Some(v) => (Some(v.clone()), ValueType::String),
        None => (None, ValueType::String),
    };
    TransformedProperty {
        valid_key,
        value,
        value_type,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

fn strip_line_breaks(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::settings;
    use crate::node::ContentTree;
    use serde_json::json;

    fn rewriter() -> UrlRewriter {
        UrlRewriter::activate(&settings(
            &[
                r#"{"internalUrl":"/content/dam/","externalUrl":"/static/assets/"}"#,
                r#"{"internalUrl":"/content/adobexp/","externalUrl":"/"}"#,
            ],
            &["/content/adobexp/internal"],
        ))
    }

    fn pages() -> ContentTree {
        ContentTree::from_json(
            r#"{"content": {"adobexp": {"en": {"jcr:content": {}}, "internal": {"jcr:content": {}}}}}"#,
        )
        .unwrap()
    }

    #[test]
    fn mode_controls_rewriting() {
        assert!(WcmMode::Disabled.rewrites_links());
        assert!(!WcmMode::Edit.rewrites_links());
        assert!(!WcmMode::Preview.rewrites_links());
        assert_eq!("EDIT".parse::<WcmMode>(), Ok(WcmMode::Edit));
        assert!("publish".parse::<WcmMode>().is_err());
        assert_eq!(WcmMode::Preview.to_string(), "preview");
    }

    #[test]
    fn publish_url_respects_mode() {
        let r = rewriter();
        assert_eq!(
            publish_url(&r, "/content/dam/a.png", WcmMode::Disabled),
            "/static/assets/a.png"
        );
        assert_eq!(
            publish_url(&r, "/content/dam/a.png", WcmMode::Edit),
            "/content/dam/a.png"
        );
        assert_eq!(publish_url(&r, "", WcmMode::Disabled), "");
    }

    #[test]
    fn page_links_gain_extension_then_rewrite() {
        let r = rewriter();
        let t = transform_property(
            "ctaLink",
            Some(&json!("/content/adobexp/en")),
            WcmMode::Disabled,
            &r,
            &pages(),
        );
        assert!(t.valid_key);
        assert_eq!(t.value, Some(json!("/en.html")));
        assert_eq!(t.value_type, ValueType::String);
    }

    #[test]
    fn edit_mode_keeps_repository_path_with_extension() {
        let r = rewriter();
        let t = transform_property(
            "ctaLink",
            Some(&json!("/content/adobexp/en")),
            WcmMode::Edit,
            &r,
            &pages(),
        );
        assert_eq!(t.value, Some(json!("/content/adobexp/en.html")));
    }

    #[test]
    fn json_url_properties_get_no_extension() {
        let r = rewriter();
        let t = transform_property(
            "navJsonUrl",
            Some(&json!("/content/adobexp/en")),
            WcmMode::Disabled,
            &r,
            &pages(),
        );
        assert_eq!(t.value, Some(json!("/en")));
    }

    #[test]
    fn skipped_pages_are_not_rewritten() {
        let r = rewriter();
        let t = transform_property(
            "link",
            Some(&json!("/content/adobexp/internal")),
            WcmMode::Disabled,
            &r,
            &pages(),
        );
        assert_eq!(t.value, Some(json!("/content/adobexp/internal.html")));
    }

    #[test]
    fn assets_are_rewritten_without_extension_and_line_breaks() {
        let r = rewriter();
        let t = transform_property(
            "image",
            Some(&json!("/content/dam/hero\r\n.png")),
            WcmMode::Disabled,
            &r,
            &pages(),
        );
        assert_eq!(t.value, Some(json!("/static/assets/hero.png")));
    }

    #[test]
    fn non_string_values_are_classified() {
        let r = rewriter();
        let p = pages();
        let b = transform_property("flag", Some(&json!(true)), WcmMode::Disabled, &r, &p);
        assert_eq!(b.value_type, ValueType::Boolean);
        let n = transform_property("count", Some(&json!(3)), WcmMode::Disabled, &r, &p);
        assert_eq!(n.value_type, ValueType::Boolean);
        assert_eq!(n.value, Some(json!(3)));
        let a = transform_property("tags", Some(&json!(["a"])), WcmMode::Disabled, &r, &p);
        assert_eq!(a.value_type, ValueType::Array);
    }

    #[test]
    fn falsy_scalars_are_strings_with_value_kept() {
        let r = rewriter();
        let p = pages();
        let f = transform_property("flag", Some(&json!(false)), WcmMode::Disabled, &r, &p);
        assert_eq!(f.value_type, ValueType::String);
        assert_eq!(f.value, Some(json!(false)));
        let z = transform_property("count", Some(&json!(0)), WcmMode::Disabled, &r, &p);
        assert_eq!(z.value_type, ValueType::String);
        assert_eq!(z.value, Some(json!(0)));
        let neg = transform_property("offset", Some(&json!(-1.5)), WcmMode::Disabled, &r, &p);
        assert_eq!(neg.value_type, ValueType::Boolean);
        let empty = transform_property("tags", Some(&json!([])), WcmMode::Disabled, &r, &p);
        assert_eq!(empty.value_type, ValueType::Array);
    }

    #[test]
    fn reserved_names_are_flagged_and_absent_values_pass() {
        let r = rewriter();
        let t = transform_property("jcr:title", None, WcmMode::Disabled, &r, &pages());
        assert!(!t.valid_key);
        assert_eq!(t.value, None);
        assert_eq!(t.value_type, ValueType::String);
    }
}
