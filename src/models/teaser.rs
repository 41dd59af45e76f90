use crate::node::ContentNode;
use serde::Serialize;

/// Two-colour text block with an optional call to action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoToneTextTeaser {
    pub primary_text: Option<String>,
    pub secondary_text: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub cta_link_external: bool,
}

impl TwoToneTextTeaser {
    pub fn parse<N: ContentNode>(node: &N) -> Self {
        TwoToneTextTeaser {
            primary_text: node.text("primaryText"),
            secondary_text: node.text("secondaryText"),
            cta_text: node.text("ctaText"),
            cta_link: node.text("ctaLink"),
            cta_link_external: node.boolean("ctaLinkExternal").unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::component;
    use serde_json::json;

    #[test]
    fn external_flag_accepts_bool_or_string() {
        let native = TwoToneTextTeaser::parse(&component(json!({"ctaLinkExternal": true})).root());
        assert!(native.cta_link_external);
        let string = TwoToneTextTeaser::parse(&component(json!({"ctaLinkExternal": "true"})).root());
        assert!(string.cta_link_external);
        let unset = TwoToneTextTeaser::parse(&component(json!({"ctaText": "Go"})).root());
        assert!(!unset.cta_link_external);
        assert_eq!(unset.cta_text.as_deref(), Some("Go"));
    }
}
