//! KML reading and writing

pub mod parser;
pub mod writer;
pub mod builder;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Waypoint;

pub use parser::{parse_kml, try_parse_kml, KmlParse, ParseMode};
pub use writer::{build_kml, ManualKmlSerializer};
pub use builder::XmlWriterKmlSerializer;

/// OGC KML 2.2 namespace
pub const KML_22_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Google Earth KML 2.0 draft namespace
pub const GOOGLE_EARTH_20_NAMESPACE: &str = "http://earth.google.com/kml/2.0";

/// Google Earth KML 2.1 draft namespace
pub const GOOGLE_EARTH_21_NAMESPACE: &str = "http://earth.google.com/kml/2.1";

/// MIME type of generated documents
pub const KML_MIME_TYPE: &str = "application/vnd.google-earth.kml+xml";

/// Fixed flight path line color (aabbggrr, opaque green)
pub const FLIGHT_PATH_COLOR: &str = "ff00ff00";

/// Fixed flight path line width in pixels
pub const FLIGHT_PATH_WIDTH: u32 = 3;

/// Namespace a `coordinates` element may live in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateNamespace {
    /// Element bound to this namespace URI
    Uri(&'static str),
    /// Element with no namespace
    Bare,
}

impl CoordinateNamespace {
    /// Returns true if an element with the resolved namespace `ns` belongs to this candidate
    pub fn matches(&self, ns: Option<&str>) -> bool {
        match (self, ns) {
            (CoordinateNamespace::Uri(uri), Some(found)) => *uri == found,
            (CoordinateNamespace::Bare, None) => true,
            _ => false,
        }
    }
}

/// Namespaces probed for coordinates, in priority order
pub const NAMESPACE_CANDIDATES: [CoordinateNamespace; 4] = [
    CoordinateNamespace::Uri(KML_22_NAMESPACE),
    CoordinateNamespace::Uri(GOOGLE_EARTH_20_NAMESPACE),
    CoordinateNamespace::Uri(GOOGLE_EARTH_21_NAMESPACE),
    CoordinateNamespace::Bare,
];

/// Turns a flight plan into a KML document
pub trait KmlSerializer {
    /// Serializes `waypoints` into a document named after `label`
    fn serialize(&self, waypoints: &[Waypoint], label: &str) -> Result<String>;
}

/// Available KML serializers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KmlBackend {
    /// Hand-assembled template output
    #[default]
    Manual,
    /// Output produced through the quick-xml writer
    XmlWriter,
}

/// Returns the serializer for `backend`
pub fn serializer_for(backend: KmlBackend) -> Box<dyn KmlSerializer + Send + Sync> {
    match backend {
        KmlBackend::Manual => Box::new(ManualKmlSerializer),
        KmlBackend::XmlWriter => Box::new(XmlWriterKmlSerializer),
    }
}

/// Coordinates of the flight path line, closed when it has more than two points
pub(crate) fn flight_path(waypoints: &[Waypoint]) -> Vec<&Waypoint> {
    let mut path: Vec<&Waypoint> = waypoints.iter().collect();
    if waypoints.len() > 2 {
        path.push(&waypoints[0]);
    }
    path
}
