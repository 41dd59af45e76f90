//! Component models: typed views over authored component nodes.
//!
//! Each model is a plain struct built by a `parse` function that reads a
//! [`ContentNode`]. Models never fail to build: missing properties read as
//! `None`, multifield items missing their required field are dropped, and
//! documented defaults fill the rest.
//!
//! [`adapt`] picks the model for a node from its `sling:resourceType`, which
//! is how a renderer binds a component instance to its view data.
//!
//! | Resource type | Model |
//! |---------------|-------|
//! | `adobexp/components/global/header` | [`Header`] |
//! | `adobexp/components/global/footer` | [`Footer`] |
//! | `adobexp/components/global/sitebanner` | [`SiteBanner`] |
//! | `adobexp/components/content/services` | [`Services`] |
//! | `adobexp/components/content/comparison` | [`Comparison`] |
//! | `adobexp/components/content/leadbanner` | [`LeadBanner`] |
//! | `adobexp/components/content/quote` | [`Quote`] |
//! | `adobexp/components/content/looping-circle-gallery` | [`LoopingCircleGallery`] |
//! | `adobexp/components/content/two-tone-text-teaser` | [`TwoToneTextTeaser`] |
//! | `adobexp/components/content/video` | [`Video`] |
//! | `adobexp/components/content/text/v1/text` | [`Text`] |

mod comparison;
mod footer;
mod gallery;
mod header;
mod lead_banner;
mod quote;
mod services;
mod site_banner;
mod teaser;
mod text;
mod video;

pub use comparison::{Comparison, ComparisonColumn, ComparisonItem};
pub use footer::{Footer, FooterLink};
pub use gallery::{GalleryImage, LoopingCircleGallery};
pub use header::{ArticleTeaser, Header, Level3MenuItem, MenuItem, MenuItemType, MenuOption, SubMenuItem};
pub use lead_banner::{LeadBanner, SecondaryHeadline};
pub use quote::Quote;
pub use services::{ServiceItem, Services};
pub use site_banner::{BannerMessage, SiteBanner};
pub use teaser::TwoToneTextTeaser;
pub use text::Text;
pub use video::Video;

use crate::node::{ContentNode, RESOURCE_TYPE};
use serde::Serialize;
use tracing::debug;

pub const HEADER: &str = "adobexp/components/global/header";
pub const FOOTER: &str = "adobexp/components/global/footer";
pub const SITE_BANNER: &str = "adobexp/components/global/sitebanner";
pub const SERVICES: &str = "adobexp/components/content/services";
pub const COMPARISON: &str = "adobexp/components/content/comparison";
pub const LEAD_BANNER: &str = "adobexp/components/content/leadbanner";
pub const QUOTE: &str = "adobexp/components/content/quote";
pub const LOOPING_CIRCLE_GALLERY: &str = "adobexp/components/content/looping-circle-gallery";
pub const TWO_TONE_TEXT_TEASER: &str = "adobexp/components/content/two-tone-text-teaser";
pub const VIDEO: &str = "adobexp/components/content/video";
pub const TEXT: &str = "adobexp/components/content/text/v1/text";

/// Every resource type [`adapt`] knows.
pub const RESOURCE_TYPES: &[&str] = &[
    HEADER,
    FOOTER,
    SITE_BANNER,
    SERVICES,
    COMPARISON,
    LEAD_BANNER,
    QUOTE,
    LOOPING_CIRCLE_GALLERY,
    TWO_TONE_TEXT_TEASER,
    VIDEO,
    TEXT,
];

/// A parsed component, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "component", rename_all = "camelCase")]
pub enum ComponentModel {
    Header(Header),
    Footer(Footer),
    SiteBanner(SiteBanner),
    Services(Services),
    Comparison(Comparison),
    LeadBanner(LeadBanner),
    Quote(Quote),
    LoopingCircleGallery(LoopingCircleGallery),
    TwoToneTextTeaser(TwoToneTextTeaser),
    Video(Video),
    Text(Text),
}

impl ComponentModel {
    pub fn resource_type(&self) -> &'static str {
        match self {
            ComponentModel::Header(_) => HEADER,
            ComponentModel::Footer(_) => FOOTER,
            ComponentModel::SiteBanner(_) => SITE_BANNER,
            ComponentModel::Services(_) => SERVICES,
            ComponentModel::Comparison(_) => COMPARISON,
            ComponentModel::LeadBanner(_) => LEAD_BANNER,
            ComponentModel::Quote(_) => QUOTE,
            ComponentModel::LoopingCircleGallery(_) => LOOPING_CIRCLE_GALLERY,
            ComponentModel::TwoToneTextTeaser(_) => TWO_TONE_TEXT_TEASER,
            ComponentModel::Video(_) => VIDEO,
            ComponentModel::Text(_) => TEXT,
        }
    }
}

/// Build the model matching the node's resource type. Exact match only;
/// unknown or missing types give `None`.
pub fn adapt<N: ContentNode>(node: &N) -> Option<ComponentModel> {
    let resource_type = node.resource_type()?;
    let model = match resource_type.as_str() {
        HEADER => ComponentModel::Header(Header::parse(node)),
        FOOTER => ComponentModel::Footer(Footer::parse(node)),
        SITE_BANNER => ComponentModel::SiteBanner(SiteBanner::parse(node)),
        SERVICES => ComponentModel::Services(Services::parse(node)),
        COMPARISON => ComponentModel::Comparison(Comparison::parse(node)),
        LEAD_BANNER => ComponentModel::LeadBanner(LeadBanner::parse(node)),
        QUOTE => ComponentModel::Quote(Quote::parse(node)),
        LOOPING_CIRCLE_GALLERY => ComponentModel::LoopingCircleGallery(LoopingCircleGallery::parse(node)),
        TWO_TONE_TEXT_TEASER => ComponentModel::TwoToneTextTeaser(TwoToneTextTeaser::parse(node)),
        VIDEO => ComponentModel::Video(Video::parse(node)),
        TEXT => ComponentModel::Text(Text::parse(node)),
        other => {
            debug!(path = node.path(), resource_type = other, "no model for resource type");
            return None;
        }
    };
    Some(model)
}

/// Walk a subtree depth-first and adapt every node with a known model.
/// Reserved (`jcr:`) containers are entered, since page content lives
/// under `jcr:content`.
pub fn adapt_all<N: ContentNode>(node: &N) -> Vec<(String, ComponentModel)> {
    let mut found = Vec::new();
    collect(node, &mut found);
    found
}

fn collect<N: ContentNode>(node: &N, found: &mut Vec<(String, ComponentModel)>) {
    // Own type only; pages would otherwise report their jcr:content type twice.
    if node.text(RESOURCE_TYPE).is_some() {
        if let Some(model) = adapt(node) {
            found.push((node.path().to_string(), model));
        }
    }
    for child in node.children() {
        collect(&child, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::component;
    use serde_json::json;

    #[test]
    fn adapt_dispatches_on_resource_type() {
        let tree = component(json!({
            "sling:resourceType": QUOTE,
            "quoteTitle": "Said"
        }));
        let model = adapt(&tree.root()).unwrap();
        assert_eq!(model.resource_type(), QUOTE);
        match model {
            ComponentModel::Quote(q) => assert_eq!(q.quote_title.as_deref(), Some("Said")),
            other => panic!("unexpected model {other:?}"),
        }
    }

    #[test]
    fn unknown_or_missing_type_is_none() {
        let unknown = component(json!({"sling:resourceType": "adobexp/components/content/unknown"}));
        assert!(adapt(&unknown.root()).is_none());
        let missing = component(json!({"title": "x"}));
        assert!(adapt(&missing.root()).is_none());
    }

    #[test]
    fn match_is_exact() {
        let tree = component(json!({"sling:resourceType": "adobexp/components/content/quote/v2"}));
        assert!(adapt(&tree.root()).is_none());
    }

    #[test]
    fn every_registered_type_adapts() {
        for resource_type in RESOURCE_TYPES {
            let tree = component(json!({"sling:resourceType": resource_type}));
            let model = adapt(&tree.root()).unwrap();
            assert_eq!(model.resource_type(), *resource_type);
        }
    }

    #[test]
    fn adapt_all_finds_nested_components_in_order() {
        let tree = component(json!({
            "jcr:content": {
                "sling:resourceType": "adobexp/components/global/pages/page/v1/page",
                "root": {
                    "banner": {"sling:resourceType": SITE_BANNER},
                    "body": {"sling:resourceType": TEXT, "text": "hi"}
                }
            }
        }));
        let found = adapt_all(&tree.root());
        let paths: Vec<&str> = found.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, ["/jcr:content/root/banner", "/jcr:content/root/body"]);
    }

    #[test]
    fn serializes_with_component_tag() {
        let tree = component(json!({"sling:resourceType": TEXT, "text": "hi"}));
        let value = serde_json::to_value(adapt(&tree.root()).unwrap()).unwrap();
        assert_eq!(value["component"], "text");
        assert_eq!(value["text"], "hi");
    }
}
