//! Sky direction value type.
//!
//! Frame conversion and any other coordinate math live outside this crate;
//! the cache only stores, copies and compares directions.

/// Reference frame a direction is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionFrame {
    /// Equatorial, mean equator and equinox of J2000.0.
    J2000,
    /// Horizontal, azimuth/elevation at the antenna.
    AzEl,
    /// Galactic.
    Galactic,
}

/// A pointing direction: two angles in radians plus their frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    /// Longitude-like angle (RA, azimuth, l) in radians.
    pub longitude_rad: f64,
    /// Latitude-like angle (Dec, elevation, b) in radians.
    pub latitude_rad: f64,
    /// Frame of both angles.
    pub frame: DirectionFrame,
}

impl Direction {
    pub fn new(longitude_rad: f64, latitude_rad: f64, frame: DirectionFrame) -> Self {
        Self {
            longitude_rad,
            latitude_rad,
            frame,
        }
    }

    /// J2000 direction, the frame pointing tables are usually written in.
    pub fn j2000(longitude_rad: f64, latitude_rad: f64) -> Self {
        Self::new(longitude_rad, latitude_rad, DirectionFrame::J2000)
    }

    /// Whether both angles are finite.
    pub fn is_finite(&self) -> bool {
        self.longitude_rad.is_finite() && self.latitude_rad.is_finite()
    }
}
