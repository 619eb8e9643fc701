//! Coordinate extraction from KML documents
//!
//! Documents are read strictly first. Files that are not well-formed XML (an
//! unescaped `&` in a description is the usual culprit) are then scanned
//! leniently, keeping whatever `coordinates` elements can still be found.

use std::collections::HashSet;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::{Error, Result};
use crate::types::GeoPoint;
use super::{CoordinateNamespace, NAMESPACE_CANDIDATES};

/// Which reading of the document produced the points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Strict,
    Lenient,
}

/// Points extracted from a KML document
#[derive(Debug, Clone, PartialEq)]
pub struct KmlParse {
    /// Unique in-range points, latitude first, in document order
    pub points: Vec<GeoPoint>,
    pub mode: ParseMode,
    /// Namespace candidate that yielded the points
    pub namespace: Option<CoordinateNamespace>,
    /// Out-of-range points dropped from the winning namespace, or from every
    /// candidate when none yielded points
    pub rejected: usize,
    /// Points dropped as duplicates of an earlier point
    pub duplicates: usize,
}

/// Raw text of one `coordinates` element
#[derive(Debug, Clone, PartialEq)]
struct CoordinatesElement {
    namespace: Option<String>,
    text: String,
}

const COORDINATES_TAG: &str = "coordinates";

/// Parses KML bytes into validated, de-duplicated points
///
/// # Errors
///
/// Returns an error only when the input is not UTF-8 or no element at all can
/// be recovered from it.
pub fn try_parse_kml(raw: &[u8]) -> Result<KmlParse> {
    let text = std::str::from_utf8(raw)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let (elements, mode) = match collect_strict(text) {
        Ok(elements) => (elements, ParseMode::Strict),
        Err(e) => {
            log::warn!("Strict KML parse failed ({}), retrying in lenient mode", e);
            (collect_lenient(text)?, ParseMode::Lenient)
        }
    };

    let mut parse = extract_points(&elements);
    parse.mode = mode;
    Ok(parse)
}

/// Parses KML bytes into points, returning an empty list if nothing can be read
pub fn parse_kml(raw: &[u8]) -> Vec<GeoPoint> {
    match try_parse_kml(raw) {
        Ok(parse) => parse.points,
        Err(e) => {
            log::error!("KML parsing error: {}", e);
            Vec::new()
        }
    }
}

fn collect_strict(text: &str) -> Result<Vec<CoordinatesElement>> {
    let doc = roxmltree::Document::parse(text)?;

    let elements = doc
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == COORDINATES_TAG)
        .map(|node| CoordinatesElement {
            namespace: node.tag_name().namespace().map(str::to_string),
            text: node
                .descendants()
                .filter(|child| child.is_text())
                .filter_map(|child| child.text())
                .collect(),
        })
        .collect();

    Ok(elements)
}

fn namespace_uri(resolved: &ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        ResolveResult::Unbound => None,
        // undeclared prefix: keep it distinguishable from both a URI and no namespace
        ResolveResult::Unknown(prefix) => {
            Some(format!("unknown-prefix:{}", String::from_utf8_lossy(prefix)))
        }
    }
}

fn collect_lenient(text: &str) -> Result<Vec<CoordinatesElement>> {
    let mut reader = NsReader::from_str(text);
    reader.trim_text(false);
    reader.check_end_names(false);

    let mut elements = Vec::new();
    let mut current: Option<CoordinatesElement> = None;
    let mut saw_element = false;
    let mut last_error_at: Option<usize> = None;

    loop {
        let position = reader.buffer_position();

        match reader.read_resolved_event() {
            Ok((ns, Event::Start(e))) => {
                saw_element = true;
                if e.local_name().as_ref() == COORDINATES_TAG.as_bytes() {
                    if let Some(open) = current.take() {
                        elements.push(open);
                    }
                    current = Some(CoordinatesElement {
                        namespace: namespace_uri(&ns),
                        text: String::new(),
                    });
                }
            }
            Ok((_, Event::Empty(_))) => saw_element = true,
            Ok((_, Event::Text(t))) => {
                if let Some(element) = current.as_mut() {
                    match t.unescape() {
                        Ok(s) => element.text.push_str(&s),
                        Err(_) => element.text.push_str(&String::from_utf8_lossy(&t)),
                    }
                }
            }
            Ok((_, Event::CData(c))) => {
                if let Some(element) = current.as_mut() {
                    element.text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Ok((_, Event::End(e))) => {
                if e.local_name().as_ref() == COORDINATES_TAG.as_bytes() {
                    if let Some(done) = current.take() {
                        elements.push(done);
                    }
                }
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(e) => {
                if last_error_at == Some(position) {
                    log::debug!("Lenient KML scan stuck at byte {}: {}", position, e);
                    break;
                }
                log::debug!("Skipping malformed XML near byte {}: {}", position, e);
                last_error_at = Some(position);
            }
        }
    }

    if let Some(unterminated) = current.take() {
        elements.push(unterminated);
    }

    if !saw_element {
        return Err(Error::Xml("no XML elements could be recovered".to_string()));
    }

    Ok(elements)
}

/// Parses one `lon,lat[,alt]` token
fn parse_tuple(token: &str) -> Option<GeoPoint> {
    let mut parts = token.split(',');
    let lon = parts.next()?.trim().parse::<f64>().ok()?;
    let lat = parts.next()?.trim().parse::<f64>().ok()?;
    Some(GeoPoint::from_lonlat(lon, lat))
}

/// Splits coordinate text into in-range points, counting rejects
fn parse_coordinate_text(text: &str, rejected: &mut usize) -> Vec<GeoPoint> {
    let mut points = Vec::new();

    for token in text.split_whitespace() {
        match parse_tuple(token) {
            Some(point) if point.is_valid() => points.push(point),
            Some(point) => {
                log::warn!(
                    "Skipping invalid coordinates: {}, {}",
                    point.latitude, point.longitude
                );
                *rejected += 1;
            }
            None => log::debug!("Ignoring unreadable coordinate token {:?}", token),
        }
    }

    points
}

fn dedup_key(point: &GeoPoint) -> (i64, i64) {
    (
        (point.latitude * 1e6).round() as i64,
        (point.longitude * 1e6).round() as i64,
    )
}

/// Removes points equal to an earlier one at 6 decimal places
pub(crate) fn dedup_points(points: Vec<GeoPoint>) -> Vec<GeoPoint> {
    let mut seen = HashSet::with_capacity(points.len());
    points.into_iter().filter(|p| seen.insert(dedup_key(p))).collect()
}

/// Applies the namespace candidates in order; the first one with points wins
fn extract_points(elements: &[CoordinatesElement]) -> KmlParse {
    let mut rejected_without_match = 0;

    for candidate in NAMESPACE_CANDIDATES {
        let mut rejected = 0;
        let points: Vec<GeoPoint> = elements
            .iter()
            .filter(|el| candidate.matches(el.namespace.as_deref()))
            .flat_map(|el| parse_coordinate_text(&el.text, &mut rejected))
            .collect();

        if !points.is_empty() {
            let total = points.len();
            let points = dedup_points(points);
            return KmlParse {
                duplicates: total - points.len(),
                points,
                mode: ParseMode::Strict,
                namespace: Some(candidate),
                rejected,
            };
        }

        rejected_without_match += rejected;
    }

    KmlParse {
        points: Vec::new(),
        mode: ParseMode::Strict,
        namespace: None,
        rejected: rejected_without_match,
        duplicates: 0,
    }
}
