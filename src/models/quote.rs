use crate::node::ContentNode;
use serde::Serialize;

/// Pull quote with author attribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub quote_title: Option<String>,
    pub quote_primary_text: Option<String>,
    pub quote_muted_text: Option<String>,
    pub quote_avatar: Option<String>,
    pub author_name: Option<String>,
    pub author_organisation: Option<String>,
}

impl Quote {
    pub fn parse<N: ContentNode>(node: &N) -> Self {
        Quote {
            quote_title: node.text("quoteTitle"),
            quote_primary_text: node.text("quotePrimaryText"),
            quote_muted_text: node.text("quoteMutedText"),
            quote_avatar: node.text("quoteAvatar"),
            author_name: node.text("authorName"),
            author_organisation: node.text("authorOrganisation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::component;
    use serde_json::json;

    #[test]
    fn reads_attribution() {
        let tree = component(json!({
            "quotePrimaryText": "Ship it.",
            "authorName": "R. Author",
            "authorOrganisation": ""
        }));
        let quote = Quote::parse(&tree.root());
        assert_eq!(quote.quote_primary_text.as_deref(), Some("Ship it."));
        assert_eq!(quote.author_name.as_deref(), Some("R. Author"));
        assert!(quote.author_organisation.is_none());
        assert!(quote.quote_avatar.is_none());
    }
}
