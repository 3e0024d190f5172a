//! Output converters for compiled semantic documents.
//!
//! - **HTML**: semantic elements per container, one `div` per page
//! - **JSON**: the serde form of [`SemanticDocument`](crate::SemanticDocument),
//!   via `serde_json`
//!
//! # Examples
//!
//! ```
//! use pdf_tagview::converters::HtmlRenderer;
//! use pdf_tagview::SemanticDocument;
//!
//! let html = HtmlRenderer::new().render_document(&SemanticDocument::default());
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! ```

pub mod html;

pub use html::{escape_html, HtmlRenderer};

use crate::error::Result;
use crate::semantic::SemanticDocument;

/// Serialize a compiled document as pretty-printed JSON.
///
/// Figure images appear as `{id, width, height}`; pixel data is left out.
pub fn to_json(document: &SemanticDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_empty_document() {
        let json = to_json(&SemanticDocument::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["pages"].as_array().unwrap().is_empty());
        assert!(value["cancelled_before"].is_null());
    }

    #[test]
    fn test_to_json_images_without_pixels() {
        use crate::images::ImageResource;
        use crate::semantic::{CompiledPage, ContainerKind, SemanticNode};

        let mut root = SemanticNode::root();
        let figure = root.push_child(SemanticNode::new(ContainerKind::Figure));
        figure.image = Some(ImageResource::new("img_p0_1", 1, 1, vec![9, 9, 9, 255]));
        let document = SemanticDocument {
            pages: vec![CompiledPage {
                page_number: 1,
                page_counter: 0,
                root,
                images_decoded: 1,
                diagnostics: Vec::new(),
            }],
            ..Default::default()
        };

        let value: serde_json::Value = serde_json::from_str(&to_json(&document).unwrap()).unwrap();
        let image = &value["pages"][0]["root"]["children"][0]["image"];
        assert_eq!(image["id"], "img_p0_1");
        assert_eq!(image["width"], 1);
        assert!(image.get("pixels").is_none());
    }
}
