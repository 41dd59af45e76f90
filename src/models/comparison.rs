use crate::node::{ContentNode, parse_items};
use serde::Serialize;

const COLUMN_COUNT: usize = 3;

/// Side-by-side comparison with a fixed number of columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub title: Option<String>,
    /// Always three entries, empty columns included.
    pub columns: Vec<ComparisonColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonColumn {
    pub heading_num: Option<String>,
    pub column_title: Option<String>,
    pub description: Option<String>,
    pub items: Vec<ComparisonItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonItem {
    pub item_text: String,
}

impl Comparison {
    pub fn parse<N: ContentNode>(node: &N) -> Self {
        let columns = (1..=COLUMN_COUNT)
            .map(|n| ComparisonColumn {
                heading_num: node.text(&format!("column{n}HeadingNum")),
                column_title: node.text(&format!("column{n}Title")),
                description: node.text(&format!("column{n}Description")),
                items: parse_items(node, &format!("column{n}Items"), |item| {
                    item.text("itemText").map(|item_text| ComparisonItem { item_text })
                }),
            })
            .collect();
        Comparison {
            title: node.text("title"),
            columns,
        }
    }

    pub fn has_content(&self) -> bool {
        self.columns.iter().any(ComparisonColumn::has_content)
    }
}

impl ComparisonColumn {
    pub fn has_content(&self) -> bool {
        self.column_title.is_some() || !self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::component;
    use serde_json::json;

    #[test]
    fn always_three_columns() {
        let comparison = Comparison::parse(&component(json!({"title": "Plans"})).root());
        assert_eq!(comparison.columns.len(), 3);
        assert!(!comparison.has_content());
    }

    #[test]
    fn column_content_from_title_or_items() {
        let tree = component(json!({
            "column1Title": "Basic",
            "column1HeadingNum": "01",
            "column2Items": {
                "item0": {"itemText": "Fast"},
                "item1": {"itemText": " "},
                "item2": {"itemText": "Cheap"}
            },
            "column3Description": "description alone is not content"
        }));
        let comparison = Comparison::parse(&tree.root());
        let [first, second, third] = &comparison.columns[..] else {
            panic!("expected three columns");
        };
        assert!(first.has_content());
        assert_eq!(first.heading_num.as_deref(), Some("01"));
        assert!(second.has_content());
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.items[1].item_text, "Cheap");
        assert!(!third.has_content());
        assert!(comparison.has_content());
    }
}
