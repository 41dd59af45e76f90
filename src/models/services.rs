use crate::node::{ContentNode, parse_items};
use serde::Serialize;

const SERVICE_ITEMS: &str = "serviceItems";

/// Grid of offered services.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Services {
    pub services_title: Option<String>,
    pub service_items: Vec<ServiceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub service_icon: Option<String>,
    pub service_headline: String,
    pub service_description: Option<String>,
}

impl Services {
    pub fn parse<N: ContentNode>(node: &N) -> Self {
        Services {
            services_title: node.text("servicesTitle"),
            service_items: parse_items(node, SERVICE_ITEMS, |item| {
                Some(ServiceItem {
                    service_headline: item.text("serviceHeadline")?,
                    service_icon: item.text("serviceIcon"),
                    service_description: item.text("serviceDescription"),
                })
            }),
        }
    }

    pub fn has_service_items(&self) -> bool {
        !self.service_items.is_empty()
    }
}
