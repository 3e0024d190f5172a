//! Tagged document logical structure.
//!
//! ## Overview
//!
//! A tagged document carries a structure tree describing its semantics
//! (sections, lists, tables, figures) independently of layout. Leaves of the
//! tree reference marked-content spans of the page's text stream by
//! identifier.
//!
//! ## Compilation
//!
//! Reading order is the pre-order traversal of the structure tree:
//! 1. Resolve the node's role to a container (or none)
//! 2. Attach the referenced content record's text
//! 3. Recursively visit children in declared order
//!
//! ## Example
//!
//! ```
//! use pdf_tagview::content::{TextFragment, assemble_marked_content};
//! use pdf_tagview::semantic::{ContainerKind, SemanticNode};
//! use pdf_tagview::structure::{PageState, RoleMapper, StructureNode, compile};
//!
//! let records = assemble_marked_content(&[
//!     TextFragment::begin("mc0", Some("P")),
//!     TextFragment::text("Hello"),
//!     TextFragment::end(),
//! ]);
//! let tree = StructureNode::with_role("Sect").child(StructureNode::content("mc0"));
//!
//! let roles = RoleMapper::new();
//! let mut state = PageState::new(0, &records, &roles);
//! let mut root = SemanticNode::root();
//! compile(&tree, &mut root, &mut state);
//!
//! assert_eq!(root.children[0].kind, ContainerKind::Section);
//! assert_eq!(root.children[0].text, "Hello");
//! ```

mod compiler;
pub mod roles;
mod types;

pub use compiler::{PageState, compile};
pub use roles::{RoleAction, RoleMapper, map_role};
pub use types::{NodeKind, StructureNode};
