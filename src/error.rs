//! Error types for the tagged document compiler.
//!
//! Per-image and per-content-node failures are recorded as page diagnostics
//! and never abort a page; only an absent structure tree does.

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while compiling a tagged document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raster image uses a pixel encoding the decoder does not know
    #[error("Unsupported image encoding {kind} for object {object_id}")]
    UnsupportedImageEncoding {
        /// Object identifier of the raster image
        object_id: String,
        /// Raw encoding kind code
        kind: u8,
    },

    /// Declared image dimensions need more bytes than the object carries
    #[error("Truncated image data for object {object_id}: need {expected} bytes, found {actual}")]
    TruncatedImageData {
        /// Object identifier of the raster image
        object_id: String,
        /// Bytes required by width, height and encoding
        expected: usize,
        /// Bytes actually present
        actual: usize,
    },

    /// A content node references a marked-content id with no assembled text
    #[error("Missing content record for marked content {0}")]
    MissingContentRecord(String),

    /// The requested page has no structure tree
    #[error("Untagged document: page {page} has no structure tree")]
    UntaggedDocument {
        /// 1-based page number
        page: u32,
    },

    /// Page number outside the document
    #[error("Page {page} out of range (document has {page_count} pages)")]
    PageOutOfRange {
        /// Requested 1-based page number
        page: u32,
        /// Number of pages in the document
        page_count: u32,
    },

    /// Image encoding or dimension error
    #[error("Image error: {0}")]
    Image(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is confined to a single image or content node.
    ///
    /// Such errors are recorded as diagnostics and compilation continues.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedImageEncoding { .. }
                | Error::TruncatedImageData { .. }
                | Error::MissingContentRecord(_)
                | Error::Image(_)
        )
    }
}
