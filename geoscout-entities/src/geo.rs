use std::fmt;

const LAT_DEG_MAX: f64 = 90.0;
const LNG_DEG_MAX: f64 = 180.0;

/// A geographic position in decimal degrees (WGS 84).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Returns `None` if either value is out of range or not finite.
    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        let pos = Self { lat, lng };
        pos.is_valid().then_some(pos)
    }

    pub const fn lat(&self) -> f64 {
        self.lat
    }

    pub const fn lng(&self) -> f64 {
        self.lng
    }

    fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-LAT_DEG_MAX..=LAT_DEG_MAX).contains(&self.lat)
            && (-LNG_DEG_MAX..=LNG_DEG_MAX).contains(&self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}
