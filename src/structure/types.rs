//! Types for the input structure tree.

use serde::{Deserialize, Serialize};

/// What leaf payload a structure node references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Marked content, resolved through the content record map
    Content,
    /// An external object (annotation, XObject)
    Object,
    /// No leaf payload
    #[default]
    None,
}

/// A node of the structure tree supplied by the document parser.
///
/// Children are in declared order, which is also reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureNode {
    /// Structure role (e.g. "Sect", "Figure"); absent for grouping nodes
    pub role: Option<String>,
    /// Leaf payload kind
    pub kind: NodeKind,
    /// Marked-content identifier for content nodes, object identifier for
    /// object nodes
    pub content_id: Option<String>,
    /// Alternate description
    pub alt_text: Option<String>,
    /// Child nodes
    pub children: Vec<StructureNode>,
}

impl StructureNode {
    /// Create a node with a role and no payload.
    pub fn with_role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            ..Default::default()
        }
    }

    /// Create a role-less grouping node.
    pub fn group() -> Self {
        Self::default()
    }

    /// Create a content leaf referencing a marked-content identifier.
    pub fn content(id: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Content,
            content_id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Create an object leaf.
    pub fn object(id: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Object,
            content_id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Set the alternate description.
    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt_text = Some(alt.into());
        self
    }

    /// Append a child.
    pub fn child(mut self, child: StructureNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    pub fn children(mut self, children: impl IntoIterator<Item = StructureNode>) -> Self {
        self.children.extend(children);
        self
    }
}
