// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::enum_variant_names)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, allow(unused_variables))]

//! # PDF Tagview
//!
//! Compiles the logical structure tree of tagged PDF pages into a semantic
//! document tree of headings, paragraphs, lists, tables, figures and notes.
//!
//! ## Pipeline
//!
//! For every page in the requested range:
//!
//! 1. **Pixel decoding**: raster images in gray or RGB encodings become RGBA
//!    resources with deterministic ids (`img_p<page>_<index>`).
//! 2. **Marked-content assembly**: the ordered text fragment stream is folded
//!    into one text record per marked-content id.
//! 3. **Role mapping**: structure roles (`P`, `H2`, `TOC`, `Figure`, ...)
//!    resolve to semantic containers, pass-through, or skip.
//! 4. **Tree compilation**: the structure tree is walked depth first and
//!    content, figures and captions are attached to their containers.
//!
//! The document parser itself is a collaborator behind the
//! [`document::DocumentSource`] trait. [`document::MemorySource`] serves
//! pages from a JSON dump.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_tagview::document::{MemorySource, PageDump};
//! use pdf_tagview::content::TextFragment;
//! use pdf_tagview::structure::StructureNode;
//! use pdf_tagview::converters::HtmlRenderer;
//! use pdf_tagview::{TaggedViewer, ViewerConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = MemorySource::default();
//! source.push_page(PageDump {
//!     structure_tree: Some(
//!         StructureNode::with_role("H1").child(StructureNode::content("mc0")),
//!     ),
//!     text_fragments: vec![TextFragment::tagged("mc0", "Title")],
//!     images: Vec::new(),
//! });
//!
//! let mut viewer = TaggedViewer::new(source, ViewerConfig::default());
//! let document = viewer.render()?;
//! let html = HtmlRenderer::new().render_page(&document.pages[0]);
//! assert_eq!(html, "<div data-page-number=\"1\"><h1>Title</h1></div>");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Collaborator interface
pub mod document;
pub mod metadata;

// Page inputs
pub mod content;
pub mod images;

// Structure tree and compilation
pub mod semantic;
pub mod structure;

// Orchestration
pub mod viewer;

// Output
pub mod converters;

pub use config::ViewerConfig;
pub use document::{DocumentSource, MemorySource};
pub use error::{Error, Result};
pub use semantic::{CompiledPage, ContainerKind, SemanticDocument, SemanticNode};
pub use viewer::TaggedViewer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
