use crate::node::ContentNode;
use serde::Serialize;

/// Background or inline video with optional controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub video_path: Option<String>,
    pub video_title: Option<String>,
    pub video_description: Option<String>,
    pub video_href: Option<String>,
    /// Only an explicit `"true"` opens a new tab.
    pub open_in_new_tab: bool,
    /// Shown unless explicitly `"false"`.
    pub show_play_toggle: bool,
    pub show_mute_toggle: bool,
}

impl Video {
    pub fn parse<N: ContentNode>(node: &N) -> Self {
        let shown = |name: &str| node.string(name).as_deref() != Some("false");
        Video {
            video_path: node.text("videoPath"),
            video_title: node.text("videoTitle"),
            video_description: node.text("videoDescription"),
            video_href: node.text("videoHref"),
            open_in_new_tab: node.is_true("openInNewTab"),
            show_play_toggle: shown("showPlayToggle"),
            show_mute_toggle: shown("showMuteToggle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::component;
    use serde_json::json;

    #[test]
    fn toggles_default_on() {
        let video = Video::parse(&component(json!({"videoPath": "/content/dam/v.mp4"})).root());
        assert!(video.show_play_toggle);
        assert!(video.show_mute_toggle);
        assert!(!video.open_in_new_tab);
    }

    #[test]
    fn only_exact_strings_flip_flags() {
        let video = Video::parse(
            &component(json!({
                "showPlayToggle": "false",
                "showMuteToggle": "FALSE",
                "openInNewTab": "True"
            }))
            .root(),
        );
        assert!(!video.show_play_toggle);
        assert!(video.show_mute_toggle);
        assert!(!video.open_in_new_tab);

        let video = Video::parse(&component(json!({"openInNewTab": "true"})).root());
        assert!(video.open_in_new_tab);
    }
}
