//! # zonemap
//!
//! Map document layout zones to the OCR text that overlaps them.
//!
//! Two independently produced sets of rectangular page regions describe the
//! same physical page: "zone" regions from a layout-segmentation model, and
//! "OCR" regions from an OCR engine that may have operated at a different
//! resolution. This crate projects both into one coordinate space and
//! associates each zone with the OCR blocks (and their recognized text) that
//! geometrically overlap it, using intersection-over-union at block
//! granularity and boundary-inclusive intersection at line granularity.
//!
//! ## Pipeline
//!
//! 1. Parse a zone page document and an OCR page document ([`document`]).
//! 2. Derive the per-page scale factor from the two declared page widths and
//!    normalize OCR coordinates into zone space ([`scale`]).
//! 3. Extract zone and OCR text regions in input order ([`extract`]).
//! 4. Match regions under the selected usecase ([`matcher`]).
//! 5. Serialize the resulting match records to JSON ([`record`], [`pipeline`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use zonemap::{MappingConfig, Usecase};
//! use zonemap::pipeline::process_page;
//! use std::path::Path;
//!
//! # fn main() -> zonemap::Result<()> {
//! let config = MappingConfig::new()
//!     .with_threshold(0.1)
//!     .with_usecase(Usecase::ZonePlusOcr);
//!
//! let records = process_page(
//!     Path::new("pages/0001_zones.xml"),
//!     Path::new("pages/0001_ocr.xml"),
//!     &config,
//! )?;
//! println!("{}", serde_json::to_string(&records)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry primitives
pub mod geometry;

// Coordinate normalization between zone space and OCR space
pub mod scale;

// Zone and OCR page document parsing
pub mod document;

// Region extraction from parsed pages
pub mod extract;

// The region matcher
pub mod matcher;

// Match record shapes for serialization
pub mod record;

// Run configuration
pub mod config;

// Interface to the external segmentation collaborator
pub mod segmentation;

// Per-page processing driver and page-pair discovery
pub mod pipeline;

// Re-exports
pub use config::MappingConfig;
pub use error::{Error, Result};
pub use extract::TextRegion;
pub use geometry::{Point, Polygon, Rect};
pub use matcher::{match_regions, Usecase};
pub use record::MatchRecord;
pub use scale::{compute_scale_factor, ScaleFactor};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
