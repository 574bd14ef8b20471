use serde::{Deserialize, Serialize};
use validator::Validate;

/// A named release point with coordinates in decimal degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CoordinateRecord {
    pub name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

impl CoordinateRecord {
    pub fn new(name: String, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn is_southern(&self) -> bool {
        self.lat < 0.0
    }

    pub fn is_western(&self) -> bool {
        self.lon < 0.0
    }
}
