use std::fmt;

use anyhow::Result;
use geoscout_core::gateways::geocode::{Error, GeoCodingGateway};
use geoscout_entities::geo::Coordinate;
use reqwest::blocking::Client;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// A geocoding gateway based on the Google Maps Geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleMaps {
    client: Client,
    api_key: String,
    api_url: String,
    region: Option<String>,
    language: Option<String>,
}

impl GoogleMaps {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            api_key,
            api_url: DEFAULT_API_URL.to_owned(),
            region: None,
            language: None,
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Biases results towards a region (ccTLD code, e.g. `jp`).
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    fn query_params<'a>(&'a self, addr: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![("address", addr), ("key", self.api_key.as_str())];
        if let Some(region) = &self.region {
            params.push(("region", region.as_str()));
        }
        if let Some(language) = &self.language {
            params.push(("language", language.as_str()));
        }
        params
    }
}

impl GeoCodingGateway for GoogleMaps {
    fn resolve_address_lat_lng(&self, addr: &str) -> Result<Option<Coordinate>, Error> {
        log::debug!("Requesting location of '{addr}' from {}", self.api_url);
        // Strip the URL from transport errors, it contains the API key
        let response = self
            .client
            .get(&self.api_url)
            .query(&self.query_params(addr))
            .send()
            .map_err(|err| anyhow::Error::from(err.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().map_err(reqwest::Error::without_url);
            return Err(rejection(status, body));
        }
        let body: GeocodeResponse = response
            .json()
            .map_err(|err| anyhow::Error::from(err.without_url()))?;
        first_position(body)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

fn rejection<E>(status: impl ToString, body: Result<String, E>) -> Error
where
    E: fmt::Display,
{
    let message = body.unwrap_or_else(|err| {
        log::debug!("Unable to read the body of the rejected request: {err}");
        String::new()
    });
    Error::Rejected {
        status: status.to_string(),
        message,
    }
}

fn first_position(response: GeocodeResponse) -> Result<Option<Coordinate>, Error> {
    let GeocodeResponse {
        status,
        results,
        error_message,
    } = response;
    match status.as_str() {
        STATUS_OK => {}
        STATUS_ZERO_RESULTS => return Ok(None),
        _ => {
            return Err(Error::Rejected {
                status,
                message: error_message.unwrap_or_default(),
            });
        }
    }
    let Some(result) = results.into_iter().next() else {
        return Ok(None);
    };
    let Location { lat, lng } = result.geometry.location;
    Coordinate::try_from_lat_lng_deg(lat, lng)
        .map(Some)
        .ok_or(Error::InvalidPosition { lat, lng })
}
