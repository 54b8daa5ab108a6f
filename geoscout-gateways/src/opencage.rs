use geocoding::{Forward, Opencage, Point};
use geoscout_core::gateways::geocode::{Error, GeoCodingGateway};
use geoscout_entities::geo::Coordinate;

/// A geocoding gateway based on opencagedata.com.
#[derive(Debug, Clone)]
pub struct OpenCage {
    api_key: String,
}

impl OpenCage {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }
}

impl GeoCodingGateway for OpenCage {
    fn resolve_address_lat_lng(&self, addr: &str) -> Result<Option<Coordinate>, Error> {
        let oc_req = Opencage::new(self.api_key.clone());
        let points: Vec<Point<f64>> = oc_req
            .forward(addr)
            .map_err(|err| Error::Other(err.into()))?;
        log::debug!("OpenCage returned {} points for '{addr}'", points.len());
        points.first().map(to_coordinate).transpose()
    }
}

fn to_coordinate(point: &Point<f64>) -> Result<Coordinate, Error> {
    // x is the longitude
    let (lng, lat) = point.x_y();
    Coordinate::try_from_lat_lng_deg(lat, lng).ok_or(Error::InvalidPosition { lat, lng })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_point_to_coordinate() {
        let pos = to_coordinate(&Point::new(139.70, 35.66)).unwrap();
        assert_eq!(35.66, pos.lat());
        assert_eq!(139.70, pos.lng());
    }

    #[test]
    fn reject_invalid_point() {
        let err = to_coordinate(&Point::new(35.66, 139.70)).unwrap_err();
        assert!(matches!(err, Error::InvalidPosition { .. }));
    }
}
