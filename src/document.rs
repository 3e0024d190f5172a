//! Document parser collaborator interface.
//!
//! The compiler never parses the document itself. A [`DocumentSource`]
//! supplies, per page, the structure tree, the ordered text fragment stream
//! and the raster image objects in paint order. [`MemorySource`] holds all
//! of that in memory and can be loaded from a JSON page dump.

use crate::content::TextFragment;
use crate::error::{Error, Result};
use crate::images::RasterImageObject;
use crate::metadata::DocumentMetadata;
use crate::structure::StructureNode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-page data provider backed by a document parser.
///
/// Page numbers are 1-based. Calls are made strictly page by page; a call
/// may block while the parser produces the data.
pub trait DocumentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Structure tree of a page, or `None` if the page is untagged.
    fn structure_tree(&mut self, page: u32) -> Result<Option<StructureNode>>;

    /// Text fragments of a page in content stream order.
    fn text_fragments(&mut self, page: u32) -> Result<Vec<TextFragment>>;

    /// Raster image objects of a page in paint order.
    fn raster_images(&mut self, page: u32) -> Result<Vec<RasterImageObject>>;

    /// Document information strings.
    fn metadata(&mut self) -> Result<DocumentMetadata>;
}

/// One page of a [`DocumentDump`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageDump {
    /// Structure tree, absent for untagged pages
    pub structure_tree: Option<StructureNode>,
    /// Text fragments in content stream order
    pub text_fragments: Vec<TextFragment>,
    /// Raster images in paint order
    pub images: Vec<RasterImageObject>,
}

/// Serializable snapshot of everything a document parser provides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentDump {
    /// Document information strings
    pub metadata: DocumentMetadata,
    /// Pages in order
    pub pages: Vec<PageDump>,
}

/// In-memory [`DocumentSource`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    dump: DocumentDump,
}

impl MemorySource {
    /// Wrap a dump.
    pub fn new(dump: DocumentDump) -> Self {
        Self { dump }
    }

    /// Parse a JSON dump.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a JSON dump from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Append a page.
    pub fn push_page(&mut self, page: PageDump) {
        self.dump.pages.push(page);
    }

    /// Set document metadata.
    pub fn set_metadata(&mut self, metadata: DocumentMetadata) {
        self.dump.metadata = metadata;
    }

    fn page(&self, page: u32) -> Result<&PageDump> {
        let page_count = self.page_count();
        page.checked_sub(1)
            .and_then(|index| self.dump.pages.get(index as usize))
            .ok_or(Error::PageOutOfRange { page, page_count })
    }
}

impl From<DocumentDump> for MemorySource {
    fn from(dump: DocumentDump) -> Self {
        Self::new(dump)
    }
}

impl DocumentSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.dump.pages.len() as u32
    }

    fn structure_tree(&mut self, page: u32) -> Result<Option<StructureNode>> {
        Ok(self.page(page)?.structure_tree.clone())
    }

    fn text_fragments(&mut self, page: u32) -> Result<Vec<TextFragment>> {
        Ok(self.page(page)?.text_fragments.clone())
    }

    fn raster_images(&mut self, page: u32) -> Result<Vec<RasterImageObject>> {
        Ok(self.page(page)?.images.clone())
    }

    fn metadata(&mut self) -> Result<DocumentMetadata> {
        Ok(self.dump.metadata.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_lookup() {
        let mut source = MemorySource::default();
        source.push_page(PageDump {
            structure_tree: Some(StructureNode::with_role("Document")),
            ..Default::default()
        });
        source.push_page(PageDump::default());

        assert_eq!(source.page_count(), 2);
        assert!(source.structure_tree(1).unwrap().is_some());
        assert!(source.structure_tree(2).unwrap().is_none());
        assert!(matches!(
            source.structure_tree(0),
            Err(Error::PageOutOfRange { page: 0, page_count: 2 })
        ));
        assert!(matches!(source.text_fragments(3), Err(Error::PageOutOfRange { page: 3, .. })));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "metadata": {"title": "Report"},
            "pages": [{
                "structure_tree": {"role": "P", "children": [{"kind": "content", "content_id": "mc0"}]},
                "text_fragments": [{"marked_content_id": "mc0"}, {"text": "Hi"}],
                "images": [{"object_id": "img_p0_1", "width": 1, "height": 1, "kind": 1, "data": "AAE="}]
            }]
        }"#;
        let mut source = MemorySource::from_json_str(json).unwrap();
        assert_eq!(source.page_count(), 1);
        assert_eq!(source.metadata().unwrap().title.as_deref(), Some("Report"));
        assert_eq!(source.text_fragments(1).unwrap().len(), 2);
        assert_eq!(source.raster_images(1).unwrap()[0].pixel_data, vec![0, 1]);
    }
}
