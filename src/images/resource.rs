//! Decoded image resources and their serialization.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Build the resource identifier for the `index`-th image (1-based) of the
/// page compiled at position `page_counter`.
pub fn image_resource_id(page_counter: u32, index: usize) -> String {
    format!("img_p{}_{}", page_counter, index)
}

/// Output encoding for serialized images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageEncoding {
    /// JPEG (alpha is dropped)
    #[default]
    Jpeg,
    /// PNG
    Png,
}

impl ImageEncoding {
    /// Get the MIME type for this encoding.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageEncoding::Jpeg => "image/jpeg",
            ImageEncoding::Png => "image/png",
        }
    }
}

/// A decoded RGBA image, ready to be attached to a figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageResource {
    /// Resource identifier (`img_p<page>_<index>`)
    pub id: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// RGBA bytes, `width * height * 4` long (not serialized; see
    /// [`to_data_uri`](Self::to_data_uri))
    #[serde(skip)]
    pub pixels: Vec<u8>,
}

impl ImageResource {
    /// Create a new image resource from RGBA pixels.
    pub fn new(id: impl Into<String>, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            pixels,
        }
    }

    /// Wrap the pixels in an [`RgbaImage`].
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or_else(|| {
            Error::Image(format!(
                "{}: {} bytes do not match {}x{} RGBA",
                self.id,
                self.pixels.len(),
                self.width,
                self.height
            ))
        })
    }

    /// Encode the image and return it as a base64 data URI.
    pub fn to_data_uri(&self, encoding: ImageEncoding, jpeg_quality: u8) -> Result<String> {
        let rgba = DynamicImage::ImageRgba8(self.to_rgba_image()?);

        let mut buffer = Cursor::new(Vec::new());
        let written = match encoding {
            ImageEncoding::Jpeg => DynamicImage::ImageRgb8(rgba.to_rgb8())
                .write_to(&mut buffer, ImageOutputFormat::Jpeg(jpeg_quality.clamp(1, 100))),
            ImageEncoding::Png => rgba.write_to(&mut buffer, ImageOutputFormat::Png),
        };
        written.map_err(|e| Error::Image(format!("{}: {}", self.id, e)))?;

        let base64_data = BASE64.encode(buffer.into_inner());
        Ok(format!("data:{};base64,{}", encoding.mime_type(), base64_data))
    }
}
