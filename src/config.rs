//! Runtime configuration
//!
//! Configuration is a JSON document; every field is optional and falls back to
//! the 360°SURVEY V1 defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formats::kml::KmlBackend;
use crate::projection::epsg;

/// Environment variable holding the path of a JSON configuration file
pub const CONFIG_ENV_VAR: &str = "SKYFOREST_SURVEY_CONFIG";

/// Flight performance of the survey drone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneSpecs {
    /// Maximum flight time on one battery, minutes
    #[serde(default = "default_max_flight_time")]
    pub max_flight_time_min: f64,
    /// Cruise speed during mapping, m/s
    #[serde(default = "default_cruise_speed")]
    pub cruise_speed_mps: f64,
    /// Battery share kept in reserve, percent
    #[serde(default = "default_battery_margin")]
    pub battery_safety_margin_pct: f64,
    #[serde(default = "default_max_altitude")]
    pub max_altitude_m: f64,
    /// Control range, meters
    #[serde(default = "default_range")]
    pub range_m: f64,
}

fn default_max_flight_time() -> f64 {
    30.0
}

fn default_cruise_speed() -> f64 {
    8.0
}

fn default_battery_margin() -> f64 {
    15.0
}

fn default_max_altitude() -> f64 {
    120.0
}

fn default_range() -> f64 {
    1500.0
}

impl Default for DroneSpecs {
    fn default() -> Self {
        Self {
            max_flight_time_min: default_max_flight_time(),
            cruise_speed_mps: default_cruise_speed(),
            battery_safety_margin_pct: default_battery_margin(),
            max_altitude_m: default_max_altitude(),
            range_m: default_range(),
        }
    }
}

impl DroneSpecs {
    /// Checks that the values can be used for flight-time estimates
    pub fn validate(&self) -> Result<()> {
        if !(self.cruise_speed_mps.is_finite() && self.cruise_speed_mps > 0.0) {
            return Err(Error::Config(format!(
                "cruise_speed_mps must be positive, got {}",
                self.cruise_speed_mps
            )));
        }
        if !(self.max_flight_time_min.is_finite() && self.max_flight_time_min > 0.0) {
            return Err(Error::Config(format!(
                "max_flight_time_min must be positive, got {}",
                self.max_flight_time_min
            )));
        }
        if !(0.0..=100.0).contains(&self.battery_safety_margin_pct) {
            return Err(Error::Config(format!(
                "battery_safety_margin_pct must be within 0..=100, got {}",
                self.battery_safety_margin_pct
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(default)]
    pub drone: DroneSpecs,
    /// Target CRS for projected polygon area
    #[serde(default = "default_area_epsg")]
    pub area_epsg: u16,
    #[serde(default)]
    pub kml_backend: KmlBackend,
    /// Listen address of the API server
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_area_epsg() -> u16 {
    epsg::DEFAULT_AREA
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            drone: DroneSpecs::default(),
            area_epsg: default_area_epsg(),
            kml_backend: KmlBackend::default(),
            bind_address: default_bind_address(),
        }
    }
}

impl SurveyConfig {
    /// Parses and validates a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SurveyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Loads the file named by `SKYFOREST_SURVEY_CONFIG`, or the defaults when unset
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::debug!("Loading configuration from {:?}", path);
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.drone.validate()?;
        if self.area_epsg == 0 {
            return Err(Error::Config("area_epsg must be a valid EPSG code".to_string()));
        }
        Ok(())
    }
}
