use crate::node::{ContentNode, parse_items};
use serde::Serialize;

const BANNER_MESSAGES: &str = "bannerMessages";

/// Seconds each message stays on screen when unset or non-positive.
pub const DEFAULT_CYCLE_DURATION: i64 = 10;

/// Announcement strip cycling through short messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteBanner {
    pub messages: Vec<BannerMessage>,
    pub cycle_duration: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerMessage {
    pub message_text: String,
}

impl SiteBanner {
    pub fn parse<N: ContentNode>(node: &N) -> Self {
        let cycle_duration = node
            .integer("cycleDuration")
            .filter(|seconds| *seconds > 0)
            .unwrap_or(DEFAULT_CYCLE_DURATION);
        SiteBanner {
            messages: parse_items(node, BANNER_MESSAGES, |item| {
                item.text("messageText")
                    .map(|message_text| BannerMessage { message_text })
            }),
            cycle_duration,
        }
    }

    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Message texts as a JSON array for a data attribute. Markup in
    /// messages is authored and passed through unescaped.
    pub fn messages_json(&self) -> String {
        let texts: Vec<&str> = self.messages.iter().map(|m| m.message_text.as_str()).collect();
        serde_json::Value::from(texts).to_string()
    }
}
