//! Parsing of zone and OCR page documents.
//!
//! Both input formats are ALTO-flavored XML describing one page. A zone
//! document carries `Page` dimensions and a flat, ordered list of
//! `TextBlock` elements with `HPOS`/`VPOS`/`WIDTH`/`HEIGHT` attributes. An
//! OCR document additionally nests `TextLine` and `String` elements (with
//! `CONTENT` text) under each block, and carries a `processingStepSettings`
//! element whose text declares the OCR engine's native rendering size as
//! `width:<int>` / `height:<int>` tokens.
//!
//! Element order is preserved exactly as it appears in the document; no
//! sorting is applied at any level.

use crate::error::{Error, Result};
use crate::geometry::Rect;
use lazy_static::lazy_static;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static! {
    // The original lookbehind pattern "(?<=width:)[0-9]+" is expressed as a
    // capture group; the regex crate does not support lookbehind.
    static ref NATIVE_WIDTH: Regex = Regex::new(r"width:([0-9]+)").unwrap();
    static ref NATIVE_HEIGHT: Regex = Regex::new(r"height:([0-9]+)").unwrap();
}

/// A parsed zone-space page document.
///
/// Zone output is authoritative: its coordinates define the shared space
/// into which OCR coordinates are projected.
#[derive(Debug, Clone)]
pub struct ZonePage {
    /// Declared page width
    pub width: i64,
    /// Declared page height
    pub height: i64,
    /// Block rectangles, in document order
    pub blocks: Vec<Rect>,
}

/// A text line inside an OCR block, still in OCR space.
#[derive(Debug, Clone)]
pub struct OcrLine {
    /// Line bounding rectangle
    pub rect: Rect,
    /// `CONTENT` values of the line's `String` children, in document order
    pub strings: Vec<String>,
}

/// A text block of an OCR page document, still in OCR space.
#[derive(Debug, Clone)]
pub struct OcrBlock {
    /// Block bounding rectangle
    pub rect: Rect,
    /// Child lines, in document order
    pub lines: Vec<OcrLine>,
}

/// A parsed OCR-space page document.
#[derive(Debug, Clone)]
pub struct OcrPage {
    /// Declared page width (the denominator of the scale factor)
    pub width: i64,
    /// Declared page height
    pub height: i64,
    /// Native rendering width parsed from the scale-reference string
    pub native_width: i64,
    /// Native rendering height parsed from the scale-reference string
    pub native_height: i64,
    /// Text blocks, in document order
    pub blocks: Vec<OcrBlock>,
}

/// Read the value of a named attribute, if present.
///
/// Entity references are resolved, so `CONTENT="AT&amp;amp;T"` yields
/// `AT&T` as the DOM-backed upstream parser did.
fn attr_value(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// Parse a coordinate attribute as an integer.
///
/// Attribute values may carry a fractional part; they are parsed as f64 and
/// truncated toward zero, matching the upstream `int(float(v))` contract.
fn int_attr(e: &BytesStart, name: &str, path: &str) -> Result<i64> {
    let raw = attr_value(e, name.as_bytes()).ok_or_else(|| {
        Error::malformed(
            path,
            format!(
                "element '{}' is missing attribute '{}'",
                String::from_utf8_lossy(e.name().as_ref()),
                name
            ),
        )
    })?;
    let value: f64 = raw.trim().parse().map_err(|_| {
        Error::malformed(path, format!("attribute '{}' is not numeric: '{}'", name, raw))
    })?;
    Ok(value as i64)
}

/// Extract the rectangle attributes of a block or line element.
fn element_rect(e: &BytesStart, path: &str) -> Result<Rect> {
    Ok(Rect::new(
        int_attr(e, "HPOS", path)?,
        int_attr(e, "VPOS", path)?,
        int_attr(e, "WIDTH", path)?,
        int_attr(e, "HEIGHT", path)?,
    ))
}

/// Validate a declared page dimension.
fn page_dimension(e: &BytesStart, name: &str, path: &str) -> Result<i64> {
    let value = int_attr(e, name, path)?;
    if value <= 0 {
        return Err(Error::InvalidPageMetadata(format!(
            "'{}': page {} must be positive, got {}",
            path, name, value
        )));
    }
    Ok(value)
}

/// Parse a zone page document from its XML text.
///
/// `path` is carried into errors so failures can be traced to the input
/// file.
pub fn parse_zone_document(xml: &str, path: &str) -> Result<ZonePage> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut page: Option<(i64, i64)> = None;
    let mut blocks = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                match e.local_name().as_ref() {
                    b"Page" => {
                        // Only the first Page element carries the metadata.
                        if page.is_none() {
                            page = Some((
                                page_dimension(e, "WIDTH", path)?,
                                page_dimension(e, "HEIGHT", path)?,
                            ));
                        }
                    },
                    b"TextBlock" => blocks.push(element_rect(e, path)?),
                    _ => {},
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
    }

    let (width, height) =
        page.ok_or_else(|| Error::malformed(path, "no Page element found"))?;

    Ok(ZonePage {
        width,
        height,
        blocks,
    })
}

/// Parse an OCR page document from its XML text.
///
/// Fails with [`Error::MalformedDocument`] if the `Page` element or the
/// `processingStepSettings` scale-reference string is missing, and with
/// [`Error::InvalidPageMetadata`] for non-positive page dimensions.
pub fn parse_ocr_document(xml: &str, path: &str) -> Result<OcrPage> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut page: Option<(i64, i64)> = None;
    let mut blocks: Vec<OcrBlock> = Vec::new();
    let mut current_block: Option<OcrBlock> = None;
    let mut current_line: Option<OcrLine> = None;
    let mut in_settings = false;
    let mut settings_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"Page" => {
                    if page.is_none() {
                        page = Some((
                            page_dimension(e, "WIDTH", path)?,
                            page_dimension(e, "HEIGHT", path)?,
                        ));
                    }
                },
                b"processingStepSettings" => in_settings = true,
                b"TextBlock" => {
                    current_block = Some(OcrBlock {
                        rect: element_rect(e, path)?,
                        lines: Vec::new(),
                    });
                },
                b"TextLine" => {
                    current_line = Some(OcrLine {
                        rect: element_rect(e, path)?,
                        strings: Vec::new(),
                    });
                },
                b"String" => {
                    if let Some(line) = current_line.as_mut() {
                        line.strings
                            .push(attr_value(e, b"CONTENT").unwrap_or_default());
                    }
                },
                _ => {},
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"Page" => {
                    if page.is_none() {
                        page = Some((
                            page_dimension(e, "WIDTH", path)?,
                            page_dimension(e, "HEIGHT", path)?,
                        ));
                    }
                },
                b"TextBlock" => {
                    // A block with no lines still occupies a slot in input order.
                    blocks.push(OcrBlock {
                        rect: element_rect(e, path)?,
                        lines: Vec::new(),
                    });
                },
                b"TextLine" => {
                    if let Some(block) = current_block.as_mut() {
                        block.lines.push(OcrLine {
                            rect: element_rect(e, path)?,
                            strings: Vec::new(),
                        });
                    }
                },
                b"String" => {
                    if let Some(line) = current_line.as_mut() {
                        line.strings
                            .push(attr_value(e, b"CONTENT").unwrap_or_default());
                    }
                },
                _ => {},
            },
            Ok(Event::Text(ref t)) => {
                if in_settings {
                    settings_text.push_str(&t.unescape()?);
                }
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"processingStepSettings" => in_settings = false,
                b"TextLine" => {
                    if let (Some(block), Some(line)) = (current_block.as_mut(), current_line.take())
                    {
                        block.lines.push(line);
                    }
                },
                b"TextBlock" => {
                    if let Some(block) = current_block.take() {
                        blocks.push(block);
                    }
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
    }

    let (width, height) =
        page.ok_or_else(|| Error::malformed(path, "no Page element found"))?;

    if settings_text.is_empty() {
        return Err(Error::malformed(
            path,
            "missing processingStepSettings scale reference",
        ));
    }

    let native_width = scale_reference(&NATIVE_WIDTH, &settings_text)
        .ok_or_else(|| Error::malformed(path, "scale reference has no 'width:' token"))?;
    let native_height = scale_reference(&NATIVE_HEIGHT, &settings_text)
        .ok_or_else(|| Error::malformed(path, "scale reference has no 'height:' token"))?;

    Ok(OcrPage {
        width,
        height,
        native_width,
        native_height,
        blocks,
    })
}

/// Pull the first integer captured by a scale-reference pattern.
fn scale_reference(pattern: &Regex, text: &str) -> Option<i64> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Read and parse a zone document from disk.
pub fn load_zone_document(path: &Path) -> Result<ZonePage> {
    let xml = fs::read_to_string(path)?;
    parse_zone_document(&xml, &path.display().to_string())
}

/// Read and parse an OCR document from disk.
pub fn load_ocr_document(path: &Path) -> Result<OcrPage> {
    let xml = fs::read_to_string(path)?;
    parse_ocr_document(&xml, &path.display().to_string())
}
