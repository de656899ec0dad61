use std::fmt::{self, Display};

use geo_types::Coord;
use serde::{Deserialize, Serialize};

/// Six decimal places, roughly 0.11 m at the equator.
const PRECISION: f64 = 1e6;

/// The point the user picked on the map, in WGS84 degrees.
///
/// Coordinates are rounded on construction and never touched afterwards, so
/// the displayed value and the value embedded in the weather link are always
/// identical. A new click replaces the whole value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectedLocation {
    pub lat: f64,
    pub lon: f64,
}

impl SelectedLocation {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: round_degrees(lat),
            lon: round_degrees(lon),
        }
    }
}

fn round_degrees(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}

impl From<Coord> for SelectedLocation {
    fn from(coord: Coord) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl Display for SelectedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}
