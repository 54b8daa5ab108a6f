use super::prelude::*;

/// Why an address could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveFailure {
    pub address: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(Coordinate),
    /// The provider did not find the address.
    NotFound,
    /// Nothing to resolve.
    Skipped,
    Failed(ResolveFailure),
}

impl Resolution {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::Resolved(pos) => Some(*pos),
            _ => None,
        }
    }
}

/// Resolves addresses through a geocoding gateway without ever failing.
#[derive(Debug)]
pub struct Geocoder<G> {
    gateway: G,
}

impl<G> Geocoder<G>
where
    G: GeoCodingGateway,
{
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn resolve(&self, address: &str) -> Resolution {
        if address.is_empty() {
            return Resolution::Skipped;
        }
        match self.gateway.resolve_address_lat_lng(address) {
            Ok(Some(pos)) => {
                log::debug!("Resolved address location '{address}': {pos}");
                Resolution::Resolved(pos)
            }
            Ok(None) => {
                log::debug!("No location found for address '{address}'");
                Resolution::NotFound
            }
            Err(err) => {
                let failure = ResolveFailure {
                    address: address.to_owned(),
                    reason: err.to_string(),
                };
                log::warn!(
                    "Failed to resolve address location '{}': {}",
                    failure.address,
                    failure.reason
                );
                Resolution::Failed(failure)
            }
        }
    }
}
