use geoscout_entities::geo::Coordinate;
use thiserror::Error;

pub trait GeoCodingGateway {
    /// Resolves a free-text address to the position of the best match.
    ///
    /// Returns `Ok(None)` if the provider found nothing.
    fn resolve_address_lat_lng(&self, addr: &str) -> Result<Option<Coordinate>, Error>;
}

impl<G> GeoCodingGateway for &G
where
    G: GeoCodingGateway + ?Sized,
{
    fn resolve_address_lat_lng(&self, addr: &str) -> Result<Option<Coordinate>, Error> {
        (**self).resolve_address_lat_lng(addr)
    }
}

impl<G> GeoCodingGateway for Box<G>
where
    G: GeoCodingGateway + ?Sized,
{
    fn resolve_address_lat_lng(&self, addr: &str) -> Result<Option<Coordinate>, Error> {
        (**self).resolve_address_lat_lng(addr)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("The provider rejected the request ({status}): {message}")]
    Rejected { status: String, message: String },
    #[error("The provider returned an invalid position ({lat}, {lng})")]
    InvalidPosition { lat: f64, lng: f64 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
