//! Coordinate reference system transforms used for planar area computation

pub mod coordinate;
pub mod transformer;

pub use coordinate::Coordinate;
pub use transformer::{PlanarProjection, Transformer};

/// EPSG codes used by the survey tools
pub mod epsg {
    /// WGS 84 geographic (longitude/latitude degrees)
    pub const WGS84: u16 = 4326;
    /// WGS 84 / Pseudo-Mercator
    pub const WEB_MERCATOR: u16 = 3857;
    /// WGS 84 / NSIDC EASE-Grid 2.0 Global, cylindrical equal-area
    pub const EASE_GRID_2_GLOBAL: u16 = 6933;
    /// Default target CRS for polygon area
    pub const DEFAULT_AREA: u16 = EASE_GRID_2_GLOBAL;
}
