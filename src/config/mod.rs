use std::{fmt, path::PathBuf, time::Duration};

use anyhow::{anyhow, bail, Result};

pub mod raw;

use raw::{ENV_NAME_GOOGLE_MAPS_API_KEY, ENV_NAME_OPENCAGE_API_KEY};

#[derive(Debug)]
pub struct Config {
    pub input: Input,
    pub output: Output,
    pub geocoding: Geocoding,
}

#[derive(Debug)]
pub struct Input {
    pub path: PathBuf,
    pub address_column: String,
}

#[derive(Debug)]
pub struct Output {
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct Geocoding {
    pub gateway: GeocodingGateway,
    pub delay: Duration,
    /// Only process the first records.
    pub limit: Option<usize>,
}

#[derive(Clone)]
pub enum GeocodingGateway {
    GoogleMaps {
        api_key: String,
        api_url: String,
        region: Option<String>,
        language: Option<String>,
    },
    OpenCage {
        api_key: String,
    },
}

// Keep the API keys out of the logs
impl fmt::Debug for GeocodingGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoogleMaps {
                api_url,
                region,
                language,
                ..
            } => f
                .debug_struct("GoogleMaps")
                .field("api_url", api_url)
                .field("region", region)
                .field("language", language)
                .finish_non_exhaustive(),
            Self::OpenCage { .. } => f.debug_struct("OpenCage").finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for GeocodingGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoogleMaps { .. } => f.write_str("Google Maps"),
            Self::OpenCage { .. } => f.write_str("OpenCage"),
        }
    }
}

fn required_api_key(api_key: Option<String>, env_name: &str) -> Result<String> {
    api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| anyhow!("No API key found: please set {env_name}"))
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            input,
            output,
            geocoding,
            gateway,
        } = from;

        let raw::Input {
            path,
            address_column,
        } = input;
        if address_column.trim().is_empty() {
            bail!("The name of the address column must not be empty");
        }
        let input = Input {
            path,
            address_column,
        };

        let raw::Output { path } = output;
        let output = Output { path };

        let raw::Geocoding {
            gateway: gw_name,
            delay,
            limit,
        } = geocoding;

        let gateway = match gw_name {
            raw::GeocodingGateway::GoogleMaps => {
                let raw::GoogleMaps {
                    api_key,
                    api_url,
                    region,
                    language,
                } = gateway.google_maps;
                let api_key = required_api_key(api_key, ENV_NAME_GOOGLE_MAPS_API_KEY)?;
                GeocodingGateway::GoogleMaps {
                    api_key,
                    api_url,
                    region,
                    language,
                }
            }
            raw::GeocodingGateway::Opencage => {
                let raw::OpenCage { api_key } = gateway.opencage;
                let api_key = required_api_key(api_key, ENV_NAME_OPENCAGE_API_KEY)?;
                GeocodingGateway::OpenCage { api_key }
            }
        };

        let geocoding = Geocoding {
            gateway,
            delay,
            limit,
        };

        Ok(Self {
            input,
            output,
            geocoding,
        })
    }
}
