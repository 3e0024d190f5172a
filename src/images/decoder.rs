//! Pixel decoder for packed gray and RGB raster objects.

use super::resource::ImageResource;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Source byte index read for the first gray pixel.
///
/// The upstream reader skips one leading byte of gray payloads; output
/// stays bit-exact with it until the object format is renegotiated.
const GRAY_SOURCE_OFFSET: usize = 1;

/// Fully opaque alpha.
const OPAQUE: u8 = 255;

/// Pixel encoding kind of a raster image object.
///
/// Serialized as the numeric kind code used by the document parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum EncodingKind {
    /// One byte per pixel
    Gray,
    /// Three bytes per pixel
    Rgb,
    /// Any other kind code
    Other(u8),
}

impl EncodingKind {
    /// Kind code for gray payloads.
    pub const GRAY_CODE: u8 = 1;
    /// Kind code for RGB payloads.
    pub const RGB_CODE: u8 = 2;

    /// Numeric kind code.
    pub fn code(self) -> u8 {
        match self {
            EncodingKind::Gray => Self::GRAY_CODE,
            EncodingKind::Rgb => Self::RGB_CODE,
            EncodingKind::Other(code) => code,
        }
    }

    /// Number of source bytes needed for `pixels` pixels, if supported.
    fn required_len(self, pixels: usize) -> Option<usize> {
        match self {
            EncodingKind::Gray if pixels == 0 => Some(0),
            EncodingKind::Gray => pixels.checked_add(GRAY_SOURCE_OFFSET),
            EncodingKind::Rgb => pixels.checked_mul(3),
            EncodingKind::Other(_) => None,
        }
    }
}

impl From<u8> for EncodingKind {
    fn from(code: u8) -> Self {
        match code {
            Self::GRAY_CODE => EncodingKind::Gray,
            Self::RGB_CODE => EncodingKind::Rgb,
            other => EncodingKind::Other(other),
        }
    }
}

impl From<EncodingKind> for u8 {
    fn from(kind: EncodingKind) -> Self {
        kind.code()
    }
}

/// An undecoded, page-scoped raster image as delivered by the document parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterImageObject {
    /// Parser-side object identifier
    pub object_id: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Packed pixel layout
    #[serde(rename = "kind")]
    pub encoding_kind: EncodingKind,
    /// Packed pixel bytes (base64 in JSON)
    #[serde(rename = "data", with = "base64_bytes")]
    pub pixel_data: Vec<u8>,
}

impl RasterImageObject {
    /// Create a new raster image object.
    pub fn new(
        object_id: impl Into<String>,
        width: u32,
        height: u32,
        encoding_kind: EncodingKind,
        pixel_data: Vec<u8>,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            width,
            height,
            encoding_kind,
            pixel_data,
        }
    }

    /// Decode into an RGBA image resource registered under `id`.
    pub fn decode(&self, id: impl Into<String>) -> Result<ImageResource> {
        let pixels = decode_pixels(
            &self.object_id,
            self.width,
            self.height,
            self.encoding_kind,
            &self.pixel_data,
        )?;
        Ok(ImageResource::new(id, self.width, self.height, pixels))
    }
}

/// Decode a packed pixel buffer into `width * height * 4` RGBA bytes.
///
/// `object_id` only labels errors.
///
/// # Errors
///
/// - [`Error::UnsupportedImageEncoding`] for kinds other than gray and RGB
/// - [`Error::TruncatedImageData`] when `data` is shorter than the
///   dimensions require
/// - [`Error::Image`] when the dimensions overflow
pub fn decode_pixels(
    object_id: &str,
    width: u32,
    height: u32,
    kind: EncodingKind,
    data: &[u8],
) -> Result<Vec<u8>> {
    let pixels = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::Image(format!("{}: {}x{} overflows", object_id, width, height)))?;

    let Some(expected) = kind.required_len(pixels) else {
        return Err(Error::UnsupportedImageEncoding {
            object_id: object_id.to_string(),
            kind: kind.code(),
        });
    };
    if data.len() < expected {
        return Err(Error::TruncatedImageData {
            object_id: object_id.to_string(),
            expected,
            actual: data.len(),
        });
    }

    let out_len = pixels
        .checked_mul(4)
        .ok_or_else(|| Error::Image(format!("{}: {}x{} overflows", object_id, width, height)))?;
    let mut rgba = vec![0u8; out_len];

    match kind {
        EncodingKind::Gray => {
            let source = &data[GRAY_SOURCE_OFFSET.min(expected)..expected];
            for (dst, &v) in rgba.chunks_exact_mut(4).zip(source) {
                dst.copy_from_slice(&[v, v, v, OPAQUE]);
            }
        },
        EncodingKind::Rgb => {
            for (dst, src) in rgba.chunks_exact_mut(4).zip(data[..expected].chunks_exact(3)) {
                dst[..3].copy_from_slice(src);
                dst[3] = OPAQUE;
            }
        },
        EncodingKind::Other(_) => unreachable!("rejected by required_len"),
    }

    Ok(rgba)
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
