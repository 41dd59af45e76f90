//! Content-tree reader.
//!
//! Component models never touch storage directly. They read through the
//! [`ContentNode`] trait, which offers exactly two capabilities:
//!
//! - fetch a named property, with blank and absent values both reading as
//!   "not set" through [`ContentNode::text`];
//! - enumerate the ordered children of a named child node while skipping
//!   system-reserved (`jcr:`-prefixed) names, through [`ContentNode::items`].
//!
//! ## JSON Content Exports
//!
//! The bundled implementation, [`ContentTree`], reads a JSON export of the
//! repository in the usual "infinity" shape: object-valued keys are child
//! nodes, everything else is a property. The root object is the node at `/`.
//!
//! ```json
//! {
//!   "content": {
//!     "site": {
//!       "jcr:primaryType": "cq:Page",
//!       "jcr:content": {
//!         "sling:resourceType": "adobexp/components/global/pages/page/v1/page",
//!         "header": {
//!           "sling:resourceType": "adobexp/components/global/header",
//!           "headerTitle": "Hello"
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Key order in the file is the child order seen by models.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Children whose names start with this prefix are repository bookkeeping,
/// never authored multifield items.
pub const RESERVED_PREFIX: &str = "jcr:";

pub const RESOURCE_TYPE: &str = "sling:resourceType";
pub const PRIMARY_TYPE: &str = "jcr:primaryType";
pub const JCR_CONTENT: &str = "jcr:content";
const PAGE_PRIMARY_TYPE: &str = "cq:Page";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Content root must be a JSON object")]
    NotAnObject,
    #[error("No content node at {0}")]
    NotFound(String),
}

/// Read access to one node of a hierarchical content repository.
pub trait ContentNode: Sized {
    /// Last path segment (`""` for the root).
    fn name(&self) -> &str;

    /// Absolute path of this node.
    fn path(&self) -> &str;

    /// Raw property value, `None` when the property is absent or the name
    /// refers to a child node.
    fn property(&self, name: &str) -> Option<&Value>;

    /// Direct child by name.
    fn child(&self, name: &str) -> Option<Self>;

    /// All direct children in stored order, reserved names included.
    fn children(&self) -> Vec<Self>;

    /// String view of a property. Numbers and booleans are rendered, arrays
    /// yield their first element. Blank strings are returned as stored.
    fn string(&self, name: &str) -> Option<String> {
        self.property(name).and_then(coerce_string)
    }

    /// Property as authored text: `None` when absent or blank.
    fn text(&self, name: &str) -> Option<String> {
        self.string(name).filter(|s| !is_blank(s))
    }

    /// Boolean property. String values compare case-insensitively to `true`.
    fn boolean(&self, name: &str) -> Option<bool> {
        match self.property(name)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => Some(s.trim().eq_ignore_ascii_case("true")),
            Value::Array(items) => items.first().and_then(|v| match v {
                Value::Bool(b) => Some(*b),
                Value::String(s) => Some(s.trim().eq_ignore_ascii_case("true")),
                _ => None,
            }),
            _ => None,
        }
    }

    /// Integer property. Numeric strings are parsed.
    fn integer(&self, name: &str) -> Option<i64> {
        match self.property(name)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// `true` only when the property reads exactly `"true"`.
    fn is_true(&self, name: &str) -> bool {
        self.string(name).as_deref() == Some("true")
    }

    /// Ordered authored children of the child node `container`, reserved
    /// names skipped. Missing container yields an empty list.
    fn items(&self, container: &str) -> Vec<Self> {
        self.child(container)
            .map(|c| {
                c.children()
                    .into_iter()
                    .filter(|item| !item.name().starts_with(RESERVED_PREFIX))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `sling:resourceType` of this node, falling back to its `jcr:content`
    /// child for page nodes.
    fn resource_type(&self) -> Option<String> {
        self.text(RESOURCE_TYPE)
            .or_else(|| self.child(JCR_CONTENT).and_then(|c| c.text(RESOURCE_TYPE)))
    }
}

/// Parse every authored item under `container`, dropping items the parser
/// rejects. Item order is preserved.
pub fn parse_items<N, T>(node: &N, container: &str, parse: impl Fn(&N) -> Option<T>) -> Vec<T>
where
    N: ContentNode,
{
    node.items(container).iter().filter_map(parse).collect()
}

/// Blank means empty or whitespace only.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items.first().and_then(coerce_string),
        Value::Null | Value::Object(_) => None,
    }
}

/// A JSON content export loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct ContentTree {
    root: Map<String, Value>,
}

impl ContentTree {
    /// Load a JSON export from disk.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        match serde_json::from_str(json)? {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(ContentError::NotAnObject),
        }
    }

    pub fn root(&self) -> JsonNode<'_> {
        JsonNode {
            name: "",
            path: "/".to_string(),
            props: &self.root,
        }
    }

    /// Look up a node by absolute path. Trailing slashes are ignored.
    pub fn node(&self, path: &str) -> Option<JsonNode<'_>> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self.root(), |node, segment| node.child(segment))
    }

    /// Like [`ContentTree::node`] but a missing node is an error.
    pub fn require(&self, path: &str) -> Result<JsonNode<'_>, ContentError> {
        self.node(path)
            .ok_or_else(|| ContentError::NotFound(path.to_string()))
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        fn count(node: &JsonNode<'_>) -> usize {
            1 + node.children().iter().map(count).sum::<usize>()
        }
        count(&self.root())
    }
}

/// Answers whether a path names an existing page.
pub trait PageLookup {
    fn is_page(&self, path: &str) -> bool;
}

impl PageLookup for ContentTree {
    fn is_page(&self, path: &str) -> bool {
        self.node(path).is_some_and(|node| {
            node.string(PRIMARY_TYPE).as_deref() == Some(PAGE_PRIMARY_TYPE)
                || node.child(JCR_CONTENT).is_some()
        })
    }
}

/// Borrowed view of one node inside a [`ContentTree`].
#[derive(Debug, Clone)]
pub struct JsonNode<'a> {
    name: &'a str,
    path: String,
    props: &'a Map<String, Value>,
}

impl<'a> JsonNode<'a> {
    fn child_path(&self, name: &str) -> String {
        if self.path == "/" {
            format!("/{name}")
        } else {
            format!("{}/{name}", self.path)
        }
    }
}

impl ContentNode for JsonNode<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn property(&self, name: &str) -> Option<&Value> {
        self.props.get(name).filter(|v| !v.is_object())
    }

    fn child(&self, name: &str) -> Option<Self> {
        let (key, value) = self.props.get_key_value(name)?;
        let props = value.as_object()?;
        Some(JsonNode {
            name: key,
            path: self.child_path(key),
            props,
        })
    }

    fn children(&self) -> Vec<Self> {
        self.props
            .iter()
            .filter_map(|(key, value)| {
                value.as_object().map(|props| JsonNode {
                    name: key,
                    path: self.child_path(key),
                    props,
                })
            })
            .collect()
    }
}
