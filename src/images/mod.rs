//! Raster image decoding.
//!
//! Raw image objects arrive with a packed pixel layout and an encoding
//! kind. The decoder unpacks them into a 4-channel RGBA buffer wrapped in an
//! [`ImageResource`], which can then be serialized as a data URI.
//!
//! ## Encodings
//!
//! | Kind | Code | Source layout |
//! |------|------|---------------|
//! | Gray | 1 | one byte per pixel, read from source index 1 onwards |
//! | Rgb  | 2 | three bytes per pixel, R G B |
//!
//! Every decoded pixel is fully opaque.

mod decoder;
mod resource;

pub use decoder::{EncodingKind, RasterImageObject, decode_pixels};
pub use resource::{ImageEncoding, ImageResource, image_resource_id};
