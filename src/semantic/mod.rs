//! Semantic output tree.
//!
//! The compiler produces an abstract tree of [`SemanticNode`]s per page,
//! independent of any presentation format. Renderers (see
//! [`crate::converters`]) materialize it as markup.

mod node;
mod page;

pub use node::{ContainerKind, SemanticNode};
pub use page::{CompiledPage, SemanticDocument};
