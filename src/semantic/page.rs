//! Compiled pages and whole-document output.

use super::node::SemanticNode;
use crate::error::Error;
use crate::metadata::DocumentMetadata;
use serde::{Serialize, Serializer};

/// One page's compiled semantic tree.
#[derive(Debug, Serialize)]
pub struct CompiledPage {
    /// 1-based page number in the source document
    pub page_number: u32,
    /// Position of this page in the render run (image id namespace)
    pub page_counter: u32,
    /// Root container of the page
    pub root: SemanticNode,
    /// Images decoded for this page
    pub images_decoded: usize,
    /// Non-fatal problems found while compiling
    #[serde(serialize_with = "serialize_diagnostics")]
    pub diagnostics: Vec<Error>,
}

impl CompiledPage {
    /// Whether compilation reported no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

fn serialize_diagnostics<S: Serializer>(
    diagnostics: &[Error],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(diagnostics.iter().map(|e| e.to_string()))
}

/// All compiled pages of a render run plus document metadata.
#[derive(Debug, Default, Serialize)]
pub struct SemanticDocument {
    /// Document information strings
    pub metadata: DocumentMetadata,
    /// Compiled pages in increasing page order
    pub pages: Vec<CompiledPage>,
    /// Pages that failed to compile and were left out
    pub skipped_pages: Vec<u32>,
    /// First page not rendered because of cancellation
    pub cancelled_before: Option<u32>,
}

impl SemanticDocument {
    /// Join every page into one tree.
    ///
    /// Each page root becomes a markup-less child, so text attached
    /// directly to a page root keeps its place ahead of that page's
    /// containers.
    pub fn to_tree(&self) -> SemanticNode {
        let mut root = SemanticNode::root();
        for page in &self.pages {
            root.push_child(page.root.clone());
        }
        root
    }

    /// Total diagnostics across pages.
    pub fn diagnostic_count(&self) -> usize {
        self.pages.iter().map(|p| p.diagnostics.len()).sum()
    }
}
