//! Error types for zone-to-OCR mapping.
//!
//! Errors are split by the boundary at which they are handled: geometry
//! errors are skipped per region, metadata and document errors skip the
//! whole page, and configuration errors are fatal before any page runs.

/// Result type alias for zonemap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during zone-to-OCR mapping.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or non-positive page width/height; the page is skipped.
    #[error("Invalid page metadata: {0}")]
    InvalidPageMetadata(String),

    /// Negative width or height on a region; the region is skipped,
    /// siblings still process.
    #[error("Invalid geometry: region at ({hpos},{vpos}) has dimensions {width}x{height}")]
    InvalidGeometry {
        /// Horizontal position of the offending region
        hpos: i64,
        /// Vertical position of the offending region
        vpos: i64,
        /// Reported width
        width: i64,
        /// Reported height
        height: i64,
    },

    /// Zero-area union during IoU; treated as a non-match by the matcher,
    /// never propagated past it.
    #[error("Degenerate geometry: union of two zero-area polygons")]
    DegenerateGeometry,

    /// Required elements or attributes absent from an input document;
    /// the page is skipped and logged with its path.
    #[error("Malformed document '{path}': {reason}")]
    MalformedDocument {
        /// Path (or identifier) of the offending document
        path: String,
        /// What was missing or unparseable
        reason: String,
    },

    /// Invalid run configuration (fatal at startup).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a `MalformedDocument` error for `path` with the given reason.
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
