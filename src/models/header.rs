//! Global site header: logos, social links, a three-level menu, quick
//! options and article teasers.

use crate::node::{ContentNode, parse_items};
use serde::Serialize;

const MENU_ITEMS: &str = "menuItems";
const SUB_MENU_ITEMS: &str = "subMenuItems";
const LEVEL3_MENU_ITEMS: &str = "level3MenuItems";
const MENU_OPTIONS: &str = "menuOptions";
const ARTICLE_TEASERS: &str = "articleTeasers";

const DEFAULT_SOCIAL_SECTION_TITLE: &str = "Follow us";

/// Menu entry kind. Only containers carry children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuItemType {
    Leaf,
    Container,
    /// Any other authored value, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl MenuItemType {
    fn read<N: ContentNode>(node: &N, property: &str) -> Option<Self> {
        node.string(property).map(|s| match s.as_str() {
            "leaf" => MenuItemType::Leaf,
            "container" => MenuItemType::Container,
            _ => MenuItemType::Other(s),
        })
    }
}

fn is_leaf(kind: &Option<MenuItemType>) -> bool {
    matches!(kind, Some(MenuItemType::Leaf))
}

fn is_container(kind: &Option<MenuItemType>) -> bool {
    matches!(kind, Some(MenuItemType::Container))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub logo_dark_image: Option<String>,
    pub logo_dark_alt: Option<String>,
    pub logo_light_image: Option<String>,
    pub logo_light_alt: Option<String>,
    pub logo_link: Option<String>,
    pub header_title: Option<String>,
    pub header_subtitle: Option<String>,
    pub social_section_title: String,
    pub twitter_link: Option<String>,
    pub facebook_link: Option<String>,
    pub instagram_link: Option<String>,
    pub linkedin_link: Option<String>,
    pub pinterest_link: Option<String>,
    pub youtube_link: Option<String>,
    pub menu_items: Vec<MenuItem>,
    pub menu_options: Vec<MenuOption>,
    pub article_teasers: Vec<ArticleTeaser>,
}

/// Top-level navigation entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub menu_item_type: Option<MenuItemType>,
    pub menu_title: String,
    pub menu_description: Option<String>,
    pub menu_link: Option<String>,
    /// Always empty unless the item is a container.
    pub sub_menu_items: Vec<SubMenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubMenuItem {
    pub sub_menu_item_type: Option<MenuItemType>,
    pub sub_menu_title: String,
    pub sub_menu_description: Option<String>,
    pub sub_menu_link: Option<String>,
    pub level3_menu_items: Vec<Level3MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Level3MenuItem {
    pub level3_menu_title: String,
    pub level3_menu_description: Option<String>,
    pub level3_menu_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOption {
    pub option_title: String,
    pub option_description: Option<String>,
    pub option_link: Option<String>,
    pub open_in_new_tab: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleTeaser {
    pub article_title: String,
    pub article_description: Option<String>,
    pub article_link: Option<String>,
    pub article_image: Option<String>,
    pub article_image_alt: Option<String>,
}

impl Header {
    pub fn parse<N: ContentNode>(node: &N) -> Self {
        Header {
            logo_dark_image: node.text("logoDarkImage"),
            logo_dark_alt: node.text("logoDarkAlt"),
            logo_light_image: node.text("logoLightImage"),
            logo_light_alt: node.text("logoLightAlt"),
            logo_link: node.text("logoLink"),
            header_title: node.text("headerTitle"),
            header_subtitle: node.text("headerSubtitle"),
            social_section_title: node
                .text("socialSectionTitle")
                .unwrap_or_else(|| DEFAULT_SOCIAL_SECTION_TITLE.to_string()),
            twitter_link: node.text("twitterLink"),
            facebook_link: node.text("facebookLink"),
            instagram_link: node.text("instagramLink"),
            linkedin_link: node.text("linkedinLink"),
            pinterest_link: node.text("pinterestLink"),
            youtube_link: node.text("youtubeLink"),
            menu_items: parse_items(node, MENU_ITEMS, MenuItem::parse),
            menu_options: parse_items(node, MENU_OPTIONS, MenuOption::parse),
            article_teasers: parse_items(node, ARTICLE_TEASERS, ArticleTeaser::parse),
        }
    }

    pub fn has_social_links(&self) -> bool {
        [
            &self.twitter_link,
            &self.facebook_link,
            &self.instagram_link,
            &self.linkedin_link,
            &self.pinterest_link,
            &self.youtube_link,
        ]
        .iter()
        .any(|link| link.is_some())
    }

    pub fn has_article_teasers(&self) -> bool {
        !self.article_teasers.is_empty()
    }
}

impl MenuItem {
    fn parse<N: ContentNode>(node: &N) -> Option<Self> {
        let menu_title = node.text("menuTitle")?;
        let menu_item_type = MenuItemType::read(node, "menuItemType");
        let sub_menu_items = if is_container(&menu_item_type) {
            parse_items(node, SUB_MENU_ITEMS, SubMenuItem::parse)
        } else {
            Vec::new()
        };
        Some(MenuItem {
            menu_item_type,
            menu_title,
            menu_description: node.text("menuDescription"),
            menu_link: node.text("menuLink"),
            sub_menu_items,
        })
    }

    pub fn is_leaf(&self) -> bool {
        is_leaf(&self.menu_item_type)
    }

    pub fn is_container(&self) -> bool {
        is_container(&self.menu_item_type)
    }
}

impl SubMenuItem {
    fn parse<N: ContentNode>(node: &N) -> Option<Self> {
        let sub_menu_title = node.text("subMenuTitle")?;
        let sub_menu_item_type = MenuItemType::read(node, "subMenuItemType");
        let level3_menu_items = if is_container(&sub_menu_item_type) {
            parse_items(node, LEVEL3_MENU_ITEMS, Level3MenuItem::parse)
        } else {
            Vec::new()
        };
        Some(SubMenuItem {
            sub_menu_item_type,
            sub_menu_title,
            sub_menu_description: node.text("subMenuDescription"),
            sub_menu_link: node.text("subMenuLink"),
            level3_menu_items,
        })
    }

    pub fn is_leaf(&self) -> bool {
        is_leaf(&self.sub_menu_item_type)
    }

    pub fn is_container(&self) -> bool {
        is_container(&self.sub_menu_item_type)
    }
}

impl Level3MenuItem {
    fn parse<N: ContentNode>(node: &N) -> Option<Self> {
        Some(Level3MenuItem {
            level3_menu_title: node.text("level3MenuTitle")?,
            level3_menu_description: node.text("level3MenuDescription"),
            level3_menu_link: node.text("level3MenuLink"),
        })
    }
}

impl MenuOption {
    fn parse<N: ContentNode>(node: &N) -> Option<Self> {
        Some(MenuOption {
            option_title: node.text("optionTitle")?,
            option_description: node.text("optionDescription"),
            option_link: node.text("optionLink"),
            open_in_new_tab: node.is_true("optionNewTab"),
        })
    }
}

impl ArticleTeaser {
    fn parse<N: ContentNode>(node: &N) -> Option<Self> {
        Some(ArticleTeaser {
            article_title: node.text("articleTitle")?,
            article_description: node.text("articleDescription"),
            article_link: node.text("articleLink"),
            article_image: node.text("articleImage"),
            article_image_alt: node.text("articleImageAlt"),
        })
    }
}
