//! Semantic container nodes.

use crate::images::ImageResource;
use serde::Serialize;

/// Kind of semantic container a node represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// No container of its own (page root)
    None,
    /// Generic document division
    Division,
    /// Section
    Section,
    /// Article
    Article,
    /// Paragraph
    Paragraph,
    /// Heading of the given level (1-based)
    Heading(u8),
    /// Unordered list
    List,
    /// Ordered list (table of contents)
    OrderedList,
    /// List item
    ListItem,
    /// Table
    Table,
    /// Table header row group
    TableHead,
    /// Table body row group
    TableBody,
    /// Table footer row group
    TableFoot,
    /// Table row
    TableRow,
    /// Table header cell
    TableHeaderCell,
    /// Table data cell
    TableDataCell,
    /// Link
    Link,
    /// Note (footnote, endnote, annotation)
    Note,
    /// Form
    Form,
    /// Figure holding an image
    Figure,
    /// Caption of a figure or table
    Caption,
    /// Formula block
    FormulaBlock,
    /// Block quotation
    BlockQuote,
    /// Inline quotation
    Quote,
    /// Computer code
    Code,
    /// Generic inline span
    Span,
    /// Unmapped role, tagged by its lowercase name
    Custom(String),
}

/// A node of the compiled semantic tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemanticNode {
    /// Container kind
    pub kind: ContainerKind,
    /// Accumulated text content
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Child containers in reading order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SemanticNode>,
    /// Image bound to a figure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageResource>,
    /// Accessible description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl SemanticNode {
    /// Create an empty container.
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            text: String::new(),
            children: Vec::new(),
            image: None,
            alt_text: None,
        }
    }

    /// Create an empty root container with no markup of its own.
    pub fn root() -> Self {
        Self::new(ContainerKind::None)
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append text to the accumulated content.
    pub fn append_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append a child and return a mutable reference to it.
    pub fn push_child(&mut self, child: SemanticNode) -> &mut SemanticNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Whether this node carries no text, children or image.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.children.is_empty() && self.image.is_none()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SemanticNode::node_count).sum::<usize>()
    }

    /// Concatenated text of this subtree in pre-order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// All nodes of `kind` in this subtree, in pre-order.
    pub fn find_all(&self, kind: &ContainerKind) -> Vec<&SemanticNode> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if &node.kind == kind {
                found.push(node);
            }
        });
        found
    }

    /// Visit every node of this subtree in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SemanticNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

impl Default for SemanticNode {
    fn default() -> Self {
        Self::root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_child_returns_child() {
        let mut root = SemanticNode::root();
        let section = root.push_child(SemanticNode::new(ContainerKind::Section));
        section.append_text("Intro");
        section.push_child(SemanticNode::new(ContainerKind::Paragraph).with_text(" body"));

        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].text, "Intro");
        assert_eq!(root.node_count(), 3);
        assert_eq!(root.text_content(), "Intro body");
    }

    #[test]
    fn test_find_all_preorder() {
        let mut root = SemanticNode::root();
        root.push_child(SemanticNode::new(ContainerKind::Paragraph).with_text("a"));
        let list = root.push_child(SemanticNode::new(ContainerKind::List));
        list.push_child(SemanticNode::new(ContainerKind::Paragraph).with_text("b"));

        let paras = root.find_all(&ContainerKind::Paragraph);
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0].text, "a");
        assert_eq!(paras[1].text, "b");
    }

    #[test]
    fn test_is_empty() {
        assert!(SemanticNode::root().is_empty());
        assert!(!SemanticNode::root().with_text("x").is_empty());
    }
}
