use crate::node::{ContentNode, parse_items};
use serde::Serialize;

const SECONDARY_HEADLINE_ITEMS: &str = "secondaryHeadlineItems";

/// Hero banner with a rotating secondary headline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadBanner {
    pub primary_headline: Option<String>,
    pub secondary_text: Option<String>,
    pub secondary_headline_items: Vec<SecondaryHeadline>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryHeadline {
    pub secondary_headline_text: String,
    pub stack_image: Option<String>,
    pub stack_image_alt: Option<String>,
}

impl LeadBanner {
    pub fn parse<N: ContentNode>(node: &N) -> Self {
        LeadBanner {
            primary_headline: node.text("primaryHeadline"),
            secondary_text: node.text("secondaryText"),
            secondary_headline_items: parse_items(node, SECONDARY_HEADLINE_ITEMS, |item| {
                Some(SecondaryHeadline {
                    secondary_headline_text: item.text("secondaryHeadlineText")?,
                    stack_image: item.text("stackImage"),
                    stack_image_alt: item.text("stackImageAlt"),
                })
            }),
        }
    }

    pub fn has_secondary_headline_items(&self) -> bool {
        !self.secondary_headline_items.is_empty()
    }

    /// Headline texts as a JSON array, for the client-side rotator.
    ///
    /// The array is written into markup, so `<`, `>`, `&`, `=` and `'` are
    /// emitted as `\uXXXX` escapes.
    pub fn secondary_headlines_json(&self) -> String {
        let texts: Vec<&str> = self
            .secondary_headline_items
            .iter()
            .map(|item| item.secondary_headline_text.as_str())
            .collect();
        html_safe_json(&serde_json::Value::from(texts).to_string())
    }

    /// Text shown before the rotator starts; empty when there are no items.
    pub fn first_secondary_headline(&self) -> &str {
        self.secondary_headline_items
            .first()
            .map_or("", |item| item.secondary_headline_text.as_str())
    }
}

/// These characters only ever occur inside string literals of serialized
/// JSON, so escaping them afterwards leaves the document valid.
fn html_safe_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '=' => out.push_str("\\u003d"),
            '\'' => out.push_str("\\u0027"),
            _ => out.push(c),
        }
    }
    out
}
