//! Template-based KML output
//!
//! This is the reference output format: no XML library is involved, every
//! line is written out exactly as it appears in the generated file.

use std::fmt::Write;

use quick_xml::escape::escape;

use crate::error::Result;
use crate::types::{waypoint_label, Waypoint};
use super::{flight_path, KmlSerializer, FLIGHT_PATH_COLOR, FLIGHT_PATH_WIDTH, KML_22_NAMESPACE};

/// Serializer that assembles the document from string templates
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualKmlSerializer;

impl KmlSerializer for ManualKmlSerializer {
    fn serialize(&self, waypoints: &[Waypoint], label: &str) -> Result<String> {
        Ok(build_kml(waypoints, label))
    }
}

/// Builds a KML 2.2 flight plan document
///
/// Each waypoint becomes a `Point` placemark named `WP<letter>`. Two or more
/// waypoints also get a `Flight Path` line string, which returns to the first
/// waypoint when there are more than two.
pub fn build_kml(waypoints: &[Waypoint], label: &str) -> String {
    let mut kml = String::with_capacity(512 + waypoints.len() * 256);

    // write! into a String cannot fail
    let _ = write!(
        kml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <kml xmlns=\"{}\">\n  \
         <Document>\n    \
         <name>Flight Plan {}</name>\n    \
         <description>Drone Survey Waypoints</description>\n    ",
        KML_22_NAMESPACE,
        escape(label)
    );

    for (i, wp) in waypoints.iter().enumerate() {
        let letter = waypoint_label(i);
        let _ = write!(
            kml,
            "\n    <Placemark>\n      \
             <name>WP{letter}</name>\n      \
             <description>Waypoint {letter}</description>\n      \
             <Point>\n        \
             <coordinates>{lon},{lat},0</coordinates>\n      \
             </Point>\n    \
             </Placemark>\n        ",
            letter = letter,
            lon = wp.longitude(),
            lat = wp.latitude(),
        );
    }

    if waypoints.len() > 1 {
        kml.push_str(
            "\n    <Placemark>\n      \
             <name>Flight Path</name>\n      \
             <LineString>\n        \
             <coordinates>\n        ",
        );

        for wp in flight_path(waypoints) {
            let _ = writeln!(kml, "          {},{},0", wp.longitude(), wp.latitude());
        }

        let _ = write!(
            kml,
            "\n        </coordinates>\n      \
             </LineString>\n      \
             <Style>\n        \
             <LineStyle>\n          \
             <color>{}</color>\n          \
             <width>{}</width>\n        \
             </LineStyle>\n      \
             </Style>\n    \
             </Placemark>\n        ",
            FLIGHT_PATH_COLOR, FLIGHT_PATH_WIDTH
        );
    }

    kml.push_str("\n  </Document>\n</kml>\n    ");
    kml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_waypoint_document() {
        let kml = build_kml(&[Waypoint::new(24.6, 72.5)], "2024-05-01");
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n",
            "  <Document>\n",
            "    <name>Flight Plan 2024-05-01</name>\n",
            "    <description>Drone Survey Waypoints</description>\n",
            "    \n",
            "    <Placemark>\n",
            "      <name>WPA</name>\n",
            "      <description>Waypoint A</description>\n",
            "      <Point>\n",
            "        <coordinates>72.5,24.6,0</coordinates>\n",
            "      </Point>\n",
            "    </Placemark>\n",
            "        \n",
            "  </Document>\n",
            "</kml>\n",
            "    ",
        );
        assert_eq!(kml, expected);
    }

    #[test]
    fn test_two_waypoints_open_line() {
        let kml = build_kml(&[Waypoint::new(24.6, 72.5), Waypoint::new(24.601, 72.501)], "x");
        assert!(kml.contains("<name>WPB</name>"));
        assert!(kml.contains(
            "<coordinates>\n                  72.5,24.6,0\n          72.501,24.601,0\n\n        </coordinates>"
        ));
        assert!(kml.contains("<color>ff00ff00</color>"));
        assert!(kml.contains("<width>3</width>"));
    }

    #[test]
    fn test_three_waypoints_closed_line() {
        let waypoints = [
            Waypoint::new(24.6000, 72.5000),
            Waypoint::new(24.6010, 72.5010),
            Waypoint::new(24.6020, 72.5000),
        ];
        let kml = build_kml(&waypoints, "x");
        assert!(kml.contains(
            "          72.5,24.6,0\n          72.501,24.601,0\n          72.5,24.602,0\n          72.5,24.6,0\n"
        ));
        assert_eq!(kml.matches("<Placemark>").count(), 4);
    }

    #[test]
    fn test_no_waypoints() {
        let kml = build_kml(&[], "empty");
        assert!(!kml.contains("<Placemark>"));
        assert!(roxmltree::Document::parse(&kml).is_ok());
    }

    #[test]
    fn test_label_is_escaped() {
        let kml = build_kml(&[Waypoint::new(1.0, 2.0)], "Farm & <Field>");
        assert!(kml.contains("<name>Flight Plan Farm &amp; &lt;Field&gt;</name>"));
        assert!(roxmltree::Document::parse(&kml).is_ok());
    }

    #[test]
    fn test_labels_past_z() {
        let waypoints: Vec<Waypoint> = (0..28).map(|i| Waypoint::new(i as f64, 0.0)).collect();
        let kml = build_kml(&waypoints, "x");
        assert!(kml.contains("<name>WPZ</name>"));
        assert!(kml.contains("<name>WPAA</name>"));
        assert!(kml.contains("<name>WPAB</name>"));
    }
}
