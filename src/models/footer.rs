use crate::node::{ContentNode, parse_items};
use serde::Serialize;

const MAIN_MENU_ITEMS: &str = "mainMenuItems";
const USEFUL_MENU_ITEMS: &str = "usefulMenuItems";

/// Global site footer with two link lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub footer_heading: Option<String>,
    pub footer_lead: Option<String>,
    pub footer_email: Option<String>,
    pub main_menu_title: Option<String>,
    pub main_menu_items: Vec<FooterLink>,
    pub useful_menu_title: Option<String>,
    pub useful_menu_items: Vec<FooterLink>,
    pub privacy_policy_title: Option<String>,
    pub privacy_policy_link: Option<String>,
    pub copyright_text: Option<String>,
}

/// One footer link. Both lists share this shape; only the authored
/// property names differ.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterLink {
    pub title: String,
    pub link: Option<String>,
    pub external: bool,
}

/// Authored property names of one footer list.
struct LinkFields {
    title: &'static str,
    link: &'static str,
    external: &'static str,
}

const MAIN_FIELDS: LinkFields = LinkFields {
    title: "menuItemTitle",
    link: "menuItemLink",
    external: "menuItemExternal",
};

const USEFUL_FIELDS: LinkFields = LinkFields {
    title: "usefulItemTitle",
    link: "usefulItemLink",
    external: "usefulItemExternal",
};

impl FooterLink {
    fn parse<N: ContentNode>(node: &N, fields: &LinkFields) -> Option<Self> {
        Some(FooterLink {
            title: node.text(fields.title)?,
            link: node.text(fields.link),
            external: node.is_true(fields.external),
        })
    }
}

impl Footer {
    pub fn parse<N: ContentNode>(node: &N) -> Self {
        Footer {
            footer_heading: node.text("footerHeading"),
            footer_lead: node.text("footerLead"),
            footer_email: node.text("footerEmail"),
            main_menu_title: node.text("mainMenuTitle"),
            main_menu_items: parse_items(node, MAIN_MENU_ITEMS, |item| {
                FooterLink::parse(item, &MAIN_FIELDS)
            }),
            useful_menu_title: node.text("usefulMenuTitle"),
            useful_menu_items: parse_items(node, USEFUL_MENU_ITEMS, |item| {
                FooterLink::parse(item, &USEFUL_FIELDS)
            }),
            privacy_policy_title: node.text("privacyPolicyTitle"),
            privacy_policy_link: node.text("privacyPolicyLink"),
            copyright_text: node.text("copyrightText"),
        }
    }

    pub fn has_main_menu_items(&self) -> bool {
        !self.main_menu_items.is_empty()
    }

    pub fn has_useful_menu_items(&self) -> bool {
        !self.useful_menu_items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::component;
    use serde_json::json;

    #[test]
    fn lists_use_their_own_property_names() {
        let tree = component(json!({
            "footerHeading": "Let's talk",
            "mainMenuItems": {
                "item0": {"menuItemTitle": "Home", "menuItemLink": "/content/site/en", "menuItemExternal": "false"},
                "item1": {"usefulItemTitle": "Wrong list"}
            },
            "usefulMenuItems": {
                "jcr:primaryType": "nt:unstructured",
                "item0": {"usefulItemTitle": "Docs", "usefulItemLink": "https://docs", "usefulItemExternal": "true"}
            }
        }));
        let footer = Footer::parse(&tree.root());

        assert_eq!(footer.footer_heading.as_deref(), Some("Let's talk"));
        assert_eq!(footer.main_menu_items.len(), 1);
        assert_eq!(footer.main_menu_items[0].title, "Home");
        assert!(!footer.main_menu_items[0].external);
        assert_eq!(footer.useful_menu_items.len(), 1);
        assert!(footer.useful_menu_items[0].external);
        assert!(footer.has_main_menu_items());
        assert!(footer.has_useful_menu_items());
    }

    #[test]
    fn empty_footer() {
        let footer = Footer::parse(&component(json!({"copyrightText": ""})).root());
        assert!(footer.copyright_text.is_none());
        assert!(!footer.has_main_menu_items());
        assert!(!footer.has_useful_menu_items());
    }
}
