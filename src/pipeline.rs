//! Per-page processing driver.
//!
//! Pages are processed independently and atomically: a page that fails to
//! parse or match is logged with its paths and skipped, and no partial
//! output is written for it (fail-forward). There is no shared state across
//! pages.

use crate::config::MappingConfig;
use crate::document::{load_ocr_document, load_zone_document};
use crate::error::Result;
use crate::extract::{ocr_regions, zone_regions, TextRegion};
use crate::matcher::match_regions;
use crate::record::MatchRecord;
use crate::scale::compute_scale_factor;
use log::{debug, error, info};
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Outcome tally of a mapping run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Page pairs discovered and attempted
    pub attempted: usize,
    /// Pages whose records were written
    pub succeeded: usize,
    /// Pages skipped after an error
    pub failed: usize,
}

/// Recursively collect `*.xml` files under `dir`.
fn collect_xml(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_xml(&path, found)?;
        } else if path.extension().and_then(|s| s.to_str()) == Some("xml") {
            found.push(path);
        }
    }
    Ok(())
}

/// Discover zone/OCR page pairs under two root directories.
///
/// Each root is walked recursively for `*.xml` files; both listings are
/// sorted lexicographically and paired by index. A count mismatch leaves
/// the surplus files of the longer side unpaired (and logged).
pub fn discover_page_pairs(zone_dir: &Path, ocr_dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut zone_files = Vec::new();
    collect_xml(zone_dir, &mut zone_files)?;
    zone_files.sort();

    let mut ocr_files = Vec::new();
    collect_xml(ocr_dir, &mut ocr_files)?;
    ocr_files.sort();

    if zone_files.len() != ocr_files.len() {
        error!(
            "page count mismatch: {} zone document(s) vs {} OCR document(s); \
             pairing up to the shorter listing",
            zone_files.len(),
            ocr_files.len()
        );
    }

    Ok(zone_files.into_iter().zip(ocr_files).collect())
}

/// Process one page pair: parse both documents, normalize, match.
///
/// Any error maps to a skipped page at the caller's boundary; no partial
/// record list escapes a failed page.
pub fn process_page(
    zone_path: &Path,
    ocr_path: &Path,
    config: &MappingConfig,
) -> Result<Vec<MatchRecord>> {
    let zone_page = load_zone_document(zone_path)?;
    let ocr_page = load_ocr_document(ocr_path)?;

    let factor = compute_scale_factor(zone_page.width, ocr_page.width)?;
    debug!(
        "page {}: scale factor {} ({} zone blocks, {} OCR blocks)",
        ocr_path.display(),
        factor.value(),
        zone_page.blocks.len(),
        ocr_page.blocks.len()
    );

    let zones: Vec<TextRegion> = zone_regions(&zone_page).collect();
    let ocrs: Vec<TextRegion> = ocr_regions(&ocr_page, factor).collect();

    Ok(match_regions(&zones, &ocrs, config.iou_threshold, config.usecase))
}

/// Output path for a page: the OCR document's stem with a `.json` extension.
fn output_path(output_dir: &Path, ocr_path: &Path) -> PathBuf {
    let stem = ocr_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    output_dir.join(format!("{}.json", stem))
}

/// Run the full mapping over every discovered page pair.
///
/// Per-page errors are logged with their input paths and skipped; the run
/// itself only fails for startup-level problems (invalid configuration,
/// unreadable roots, unwritable output directory).
pub fn run(
    zone_dir: &Path,
    ocr_dir: &Path,
    output_dir: &Path,
    config: &MappingConfig,
) -> Result<RunSummary> {
    config.validate()?;
    fs::create_dir_all(output_dir)?;

    let pairs = discover_page_pairs(zone_dir, ocr_dir)?;
    info!("discovered {} page pair(s)", pairs.len());

    let mut summary = RunSummary::default();
    for (zone_path, ocr_path) in &pairs {
        summary.attempted += 1;
        match process_page(zone_path, ocr_path, config) {
            Ok(records) => {
                let out = output_path(output_dir, ocr_path);
                match write_records(&out, &records) {
                    Ok(()) => {
                        info!("{} record(s) written to {}", records.len(), out.display());
                        summary.succeeded += 1;
                    },
                    Err(err) => {
                        error!("failed to write {}: {}", out.display(), err);
                        summary.failed += 1;
                    },
                }
            },
            Err(err) => {
                error!(
                    "page skipped (zone: {}, ocr: {}): {}",
                    zone_path.display(),
                    ocr_path.display(),
                    err
                );
                summary.failed += 1;
            },
        }
    }

    Ok(summary)
}

/// Serialize a page's records to a JSON file.
///
/// The buffer is flushed explicitly: a flush left to `Drop` discards its
/// error, and a failed write must count the page as skipped, not succeeded.
fn write_records(path: &Path, records: &[MatchRecord]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}
