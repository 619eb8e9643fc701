//! Geospatial file formats

pub mod kml;
