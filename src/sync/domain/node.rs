//! Realised destination projects and tasks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque identifier assigned by the destination system.
///
/// The engine never invents these; it only reads existing ones or receives
/// them from a create call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wraps an identifier issued by the destination system.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A project or task that exists in the destination system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationNode {
    id: NodeId,
    name: String,
    parent_id: Option<NodeId>,
}

impl DestinationNode {
    /// Creates a node description as reported by the destination.
    #[must_use]
    pub fn new(id: NodeId, name: impl Into<String>, parent_id: Option<NodeId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
        }
    }

    /// Returns the destination identifier.
    #[must_use]
    pub const fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the project name or task content.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the enclosing project or task, or `None` for projects.
    #[must_use]
    pub const fn parent_id(&self) -> Option<&NodeId> {
        self.parent_id.as_ref()
    }
}

/// Name to identifier lookup for the direct children of one parent.
///
/// Names are compared case-sensitively. When the destination already holds
/// several children with the same name, the first one listed wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    entries: HashMap<String, NodeId>,
}

impl NameIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes nodes in listing order, keeping the first id for each name.
    #[must_use]
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = &'a DestinationNode>) -> Self {
        let mut index = Self::new();
        for node in nodes {
            index.insert(node.name(), node.id().clone());
        }
        index
    }

    /// Returns the id recorded for `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&NodeId> {
        self.entries.get(name)
    }

    /// Returns the id of the first of `names` present in the index.
    #[must_use]
    pub fn lookup_any<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Option<&NodeId> {
        names.into_iter().find_map(|name| self.lookup(name))
    }

    /// Records a node, leaving any existing entry for the name untouched.
    pub fn insert(&mut self, name: &str, id: NodeId) {
        self.entries.entry(name.to_owned()).or_insert(id);
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the parent has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
