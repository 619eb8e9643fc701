use crate::error::{Error, Result};
use crate::projection::coordinate::Coordinate;
use crate::types::GeoPoint;
use proj::Proj;

/// Maps geographic points onto a plane measured in meters
pub trait PlanarProjection {
    /// Projects one WGS84 point
    fn project(&self, point: GeoPoint) -> Result<Coordinate>;

    /// Projects a ring of points, failing on the first point that cannot be projected
    fn project_all(&self, points: &[GeoPoint]) -> Result<Vec<Coordinate>> {
        points.iter().map(|&p| self.project(p)).collect()
    }
}

/// Transforms coordinates between two EPSG coordinate reference systems
pub struct Transformer {
    proj: Proj,
    from_epsg: u16,
    to_epsg: u16,
}

impl Transformer {
    /// Creates a new transformer from source to target CRS using EPSG codes
    pub fn new(from_epsg: u16, to_epsg: u16) -> Result<Self> {
        let from = format!("EPSG:{}", from_epsg);
        let to = format!("EPSG:{}", to_epsg);

        let proj = Proj::new_known_crs(&from, &to, None)
            .map_err(|e| Error::Projection(format!("Failed to create projection: {}", e)))?;

        Ok(Self {
            proj,
            from_epsg,
            to_epsg,
        })
    }

    /// Creates a transformer from WGS84 geographic coordinates into `to_epsg`
    pub fn from_wgs84(to_epsg: u16) -> Result<Self> {
        Self::new(super::epsg::WGS84, to_epsg)
    }

    /// Transforms a coordinate from source to target CRS
    pub fn transform(&self, coord: Coordinate) -> Result<Coordinate> {
        let result = self.proj.convert((coord.x, coord.y))
            .map_err(|e| Error::Projection(format!("Transformation failed: {}", e)))?;

        Ok(Coordinate::new(result.0, result.1))
    }

    /// Transforms multiple coordinates in bulk
    pub fn transform_many(&self, coords: &[Coordinate]) -> Result<Vec<Coordinate>> {
        coords.iter()
            .map(|&coord| self.transform(coord))
            .collect()
    }

    /// Returns the source EPSG code
    pub fn from_epsg(&self) -> u16 {
        self.from_epsg
    }

    /// Returns the target EPSG code
    pub fn to_epsg(&self) -> u16 {
        self.to_epsg
    }
}

impl PlanarProjection for Transformer {
    fn project(&self, point: GeoPoint) -> Result<Coordinate> {
        let projected = self.transform(Coordinate::from_geo(point))?;

        if !projected.is_finite() {
            return Err(Error::Projection(format!(
                "EPSG:{} produced a non-finite position for lat={}, lon={}",
                self.to_epsg, point.latitude, point.longitude
            )));
        }

        Ok(projected)
    }

    fn project_all(&self, points: &[GeoPoint]) -> Result<Vec<Coordinate>> {
        let coords: Vec<Coordinate> = points.iter().map(|&p| Coordinate::from_geo(p)).collect();
        let projected = self.transform_many(&coords)?;

        if let Some(bad) = projected.iter().position(|c| !c.is_finite()) {
            return Err(Error::Projection(format!(
                "EPSG:{} produced a non-finite position for point {}",
                self.to_epsg, bad
            )));
        }

        Ok(projected)
    }
}
