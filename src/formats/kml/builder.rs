//! KML output through the quick-xml writer

use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Error, Result};
use crate::types::{waypoint_label, Waypoint};
use super::{flight_path, KmlSerializer, FLIGHT_PATH_COLOR, FLIGHT_PATH_WIDTH, KML_22_NAMESPACE};

/// Serializer backed by [`quick_xml::Writer`]
///
/// Produces the same placemarks as [`super::build_kml`], indented by the
/// writer, with the point position repeated in each description.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlWriterKmlSerializer;

fn text_element<W: std::io::Write>(writer: &mut Writer<W>, name: &str, text: &str) -> quick_xml::Result<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

fn write_point<W: std::io::Write>(writer: &mut Writer<W>, index: usize, wp: &Waypoint) -> quick_xml::Result<()> {
    let letter = waypoint_label(index);
    let description = format!(
        "Waypoint {}\nLat: {:.6}\nLon: {:.6}",
        letter,
        wp.latitude(),
        wp.longitude()
    );
    let coordinates = format!("{},{},0", wp.longitude(), wp.latitude());

    writer.create_element("Placemark").write_inner_content(|w| {
        text_element(w, "name", &format!("WP{}", letter))?;
        text_element(w, "description", &description)?;
        w.create_element("Point")
            .write_inner_content(|w| text_element(w, "coordinates", &coordinates))?;
        Ok::<(), quick_xml::Error>(())
    })?;

    Ok(())
}

fn write_flight_path<W: std::io::Write>(writer: &mut Writer<W>, waypoints: &[Waypoint]) -> quick_xml::Result<()> {
    let coordinates = flight_path(waypoints)
        .iter()
        .map(|wp| format!("{},{},0", wp.longitude(), wp.latitude()))
        .collect::<Vec<_>>()
        .join(" ");

    writer.create_element("Placemark").write_inner_content(|w| {
        text_element(w, "name", "Flight Path")?;
        w.create_element("Style").write_inner_content(|w| {
            w.create_element("LineStyle").write_inner_content(|w| {
                text_element(w, "color", FLIGHT_PATH_COLOR)?;
                text_element(w, "width", &FLIGHT_PATH_WIDTH.to_string())
            })?;
            Ok::<(), quick_xml::Error>(())
        })?;
        w.create_element("LineString").write_inner_content(|w| {
            text_element(w, "tessellate", "1")?;
            text_element(w, "coordinates", &coordinates)
        })?;
        Ok::<(), quick_xml::Error>(())
    })?;

    Ok(())
}

fn write_document(waypoints: &[Waypoint], label: &str) -> quick_xml::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("kml")
        .with_attribute(("xmlns", KML_22_NAMESPACE))
        .write_inner_content(|w| {
            w.create_element("Document").write_inner_content(|w| {
                text_element(w, "name", &format!("Flight Plan {}", label))?;
                text_element(w, "description", "Drone Survey Waypoints")?;

                for (i, wp) in waypoints.iter().enumerate() {
                    write_point(w, i, wp)?;
                }

                if waypoints.len() > 1 {
                    write_flight_path(w, waypoints)?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;
            Ok::<(), quick_xml::Error>(())
        })?;

    Ok(writer.into_inner())
}

impl KmlSerializer for XmlWriterKmlSerializer {
    fn serialize(&self, waypoints: &[Waypoint], label: &str) -> Result<String> {
        let bytes = write_document(waypoints, label)
            .map_err(|e| Error::Serialization(format!("Failed to write KML: {}", e)))?;

        String::from_utf8(bytes)
            .map_err(|e| Error::Serialization(format!("Writer produced invalid UTF-8: {}", e)))
    }
}
