use anyhow::Result;
use geoscout_core::gateways::geocode::GeoCodingGateway;
use geoscout_gateways::{google_maps::GoogleMaps, opencage::OpenCage};

use crate::config::GeocodingGateway;

pub fn geocoding_gateway(cfg: &GeocodingGateway) -> Result<Box<dyn GeoCodingGateway>> {
    let gw: Box<dyn GeoCodingGateway> = match cfg.clone() {
        GeocodingGateway::GoogleMaps {
            api_key,
            api_url,
            region,
            language,
        } => {
            log::info!("Use Google Maps geocoding gateway ({api_url})");
            let gw = GoogleMaps::new(api_key)?
                .with_api_url(api_url)
                .with_region(region)
                .with_language(language);
            Box::new(gw)
        }
        GeocodingGateway::OpenCage { api_key } => {
            log::info!("Use OpenCage geocoding gateway");
            Box::new(OpenCage::new(api_key))
        }
    };
    Ok(gw)
}
