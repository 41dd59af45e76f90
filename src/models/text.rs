use crate::node::ContentNode;
use serde::Serialize;

/// Plain or rich text block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub text: Option<String>,
    pub is_rich_text: bool,
}

impl Text {
    pub fn parse<N: ContentNode>(node: &N) -> Self {
        Text {
            text: node.text("text"),
            is_rich_text: node.boolean("textIsRich").unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::component;
    use serde_json::json;

    #[test]
    fn rich_flag() {
        let rich = Text::parse(&component(json!({"text": "<p>hi</p>", "textIsRich": "true"})).root());
        assert!(rich.is_rich_text);
        assert_eq!(rich.text.as_deref(), Some("<p>hi</p>"));
        let plain = Text::parse(&component(json!({"text": "hi"})).root());
        assert!(!plain.is_rich_text);
    }
}
