//! Configuration for tagged document rendering.

use crate::error::Result;
use crate::images::ImageEncoding;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Tagged document rendering configuration.
///
/// Every field has a default, so a JSON config file only needs the
/// fields it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// First page to render (1-based).
    pub start_page: u32,

    /// Last page to render (inclusive). `None` renders to the end.
    pub end_page: Option<u32>,

    /// Emit a caption holding the alt text of each figure.
    pub figure_captions: bool,

    /// Encoding used when images are serialized.
    pub image_format: ImageEncoding,

    /// JPEG quality (1-100).
    pub jpeg_quality: u8,

    /// Embed images as data URIs in rendered output.
    pub embed_images: bool,

    /// Document-specific role aliases (custom role -> standard role).
    pub role_map: HashMap<String, String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            start_page: 1,
            end_page: None,
            figure_captions: true,
            image_format: ImageEncoding::Jpeg,
            jpeg_quality: 92,
            embed_images: true,
            role_map: HashMap::new(),
        }
    }

    /// Set the first page to render.
    pub fn with_start_page(mut self, page: u32) -> Self {
        self.start_page = page.max(1);
        self
    }

    /// Set the last page to render.
    pub fn with_end_page(mut self, page: Option<u32>) -> Self {
        self.end_page = page;
        self
    }

    /// Enable figure captions.
    pub fn with_figure_captions(mut self, enable: bool) -> Self {
        self.figure_captions = enable;
        self
    }

    /// Set the image serialization format.
    pub fn with_image_format(mut self, format: ImageEncoding) -> Self {
        self.image_format = format;
        self
    }

    /// Set the JPEG quality, clamped to 1-100.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Enable data URI embedding.
    pub fn with_embed_images(mut self, enable: bool) -> Self {
        self.embed_images = enable;
        self
    }

    /// Alias a custom role to a standard one.
    pub fn with_role_alias(mut self, custom: impl Into<String>, standard: impl Into<String>) -> Self {
        self.role_map.insert(custom.into(), standard.into());
        self
    }

    /// Resolve the inclusive page range against a document's page count.
    ///
    /// Returns `None` when the range is empty.
    pub fn page_range(&self, page_count: u32) -> Option<(u32, u32)> {
        let start = self.start_page.max(1);
        let end = self.end_page.unwrap_or(page_count).min(page_count);
        if start > end {
            None
        } else {
            Some((start, end))
        }
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.start_page = config.start_page.max(1);
        config.jpeg_quality = config.jpeg_quality.clamp(1, 100);
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.start_page, 1);
        assert_eq!(config.end_page, None);
        assert!(config.figure_captions);
        assert_eq!(config.image_format, ImageEncoding::Jpeg);
        assert_eq!(config.jpeg_quality, 92);
    }

    #[test]
    fn test_builder() {
        let config = ViewerConfig::new()
            .with_start_page(0)
            .with_end_page(Some(3))
            .with_jpeg_quality(0)
            .with_image_format(ImageEncoding::Png);
        assert_eq!(config.start_page, 1);
        assert_eq!(config.end_page, Some(3));
        assert_eq!(config.jpeg_quality, 1);
        assert_eq!(config.image_format, ImageEncoding::Png);
    }

    #[test]
    fn test_page_range() {
        let config = ViewerConfig::new();
        assert_eq!(config.page_range(5), Some((1, 5)));
        assert_eq!(config.page_range(0), None);

        let config = ViewerConfig::new().with_start_page(2).with_end_page(Some(10));
        assert_eq!(config.page_range(4), Some((2, 4)));

        let config = ViewerConfig::new().with_start_page(6);
        assert_eq!(config.page_range(4), None);
    }

    #[test]
    fn test_partial_json() {
        let config =
            ViewerConfig::from_json_str(r#"{"end_page": 2, "image_format": "png"}"#).unwrap();
        assert_eq!(config.end_page, Some(2));
        assert_eq!(config.image_format, ImageEncoding::Png);
        assert!(config.figure_captions);
    }

    #[test]
    fn test_role_map_json() {
        let config = ViewerConfig::from_json_str(r#"{"role_map": {"Chapter": "Sect"}}"#).unwrap();
        assert_eq!(config.role_map.get("Chapter").map(String::as_str), Some("Sect"));

        let built = ViewerConfig::new().with_role_alias("Chapter", "Sect");
        assert_eq!(built.role_map, config.role_map);
    }

    #[test]
    fn test_unknown_json_is_error() {
        assert!(ViewerConfig::from_json_str("{not json").is_err());
    }
}
