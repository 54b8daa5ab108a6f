use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use duration_str::deserialize_duration;
use geoscout_core::usecases::{DEFAULT_ADDRESS_COLUMN, DEFAULT_DELAY};
use geoscout_gateways::google_maps::DEFAULT_API_URL;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE_NAME: &str = "geoscout.toml";

const DEFAULT_INPUT_PATH: &str = "scout_all_prefectures_web_data.csv";
const DEFAULT_OUTPUT_PATH: &str = "scout_data_geocoded.json";

pub const ENV_NAME_GOOGLE_MAPS_API_KEY: &str = "GOOGLE_MAPS_API_KEY";
pub const ENV_NAME_OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub input: Input,
    pub output: Output,
    pub geocoding: Geocoding,
    pub gateway: Gateway,
}

impl Config {
    /// Falls back to the defaults if no file is given and
    /// [`DEFAULT_CONFIG_FILE_NAME`] does not exist.
    pub fn try_load_from_file_or_default(file_path: Option<&Path>) -> Result<Self> {
        let Some(file_path) = file_path else {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            return match fs::read_to_string(DEFAULT_CONFIG_FILE_NAME) {
                Ok(cfg_string) => Self::try_parse(&cfg_string, Path::new(DEFAULT_CONFIG_FILE_NAME)),
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    log::info!("{DEFAULT_CONFIG_FILE_NAME} not found => load default configuration.");
                    Ok(Self::default())
                }
                Err(err) => Err(err)
                    .with_context(|| format!("Unable to read {DEFAULT_CONFIG_FILE_NAME}")),
            };
        };
        let cfg_string = fs::read_to_string(file_path)
            .with_context(|| format!("Unable to read {}", file_path.display()))?;
        Self::try_parse(&cfg_string, file_path)
    }

    fn try_parse(cfg_string: &str, file_path: &Path) -> Result<Self> {
        toml::from_str(cfg_string)
            .with_context(|| format!("Invalid configuration file {}", file_path.display()))
    }

    /// API keys from the environment take precedence over the file.
    pub fn override_api_keys_from_env(&mut self) {
        self.override_api_keys(|name| std::env::var(name).ok());
    }

    fn override_api_keys<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = var(ENV_NAME_GOOGLE_MAPS_API_KEY) {
            self.gateway.google_maps.api_key = Some(key);
        }
        if let Some(key) = var(ENV_NAME_OPENCAGE_API_KEY) {
            self.gateway.opencage.api_key = Some(key);
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Input {
    pub path: PathBuf,
    pub address_column: String,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            path: DEFAULT_INPUT_PATH.into(),
            address_column: DEFAULT_ADDRESS_COLUMN.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Output {
    pub path: PathBuf,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Geocoding {
    pub gateway: GeocodingGateway,
    #[serde(deserialize_with = "deserialize_duration")]
    pub delay: Duration,
    pub limit: Option<usize>,
}

impl Default for Geocoding {
    fn default() -> Self {
        Self {
            gateway: GeocodingGateway::default(),
            delay: DEFAULT_DELAY,
            limit: None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    #[default]
    GoogleMaps,
    Opencage,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Gateway {
    pub google_maps: GoogleMaps,
    pub opencage: OpenCage,
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GoogleMaps {
    pub api_key: Option<String>,
    pub api_url: String,
    pub region: Option<String>,
    pub language: Option<String>,
}

impl Default for GoogleMaps {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_owned(),
            region: None,
            language: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OpenCage {
    pub api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_CONFIG_FILE: &str = include_str!("../../geoscout.example.toml");

    #[test]
    fn parse_example_config() {
        let cfg: Config = toml::from_str(EXAMPLE_CONFIG_FILE).unwrap();
        assert_eq!(Path::new(DEFAULT_INPUT_PATH), cfg.input.path);
        assert_eq!("Address", cfg.input.address_column);
        assert_eq!(Path::new(DEFAULT_OUTPUT_PATH), cfg.output.path);
        assert_eq!(GeocodingGateway::GoogleMaps, cfg.geocoding.gateway);
        assert_eq!(Duration::from_millis(100), cfg.geocoding.delay);
        assert_eq!(None, cfg.geocoding.limit);
        assert_eq!(Some("jp"), cfg.gateway.google_maps.region.as_deref());
        assert_eq!(DEFAULT_API_URL, cfg.gateway.google_maps.api_url);
    }

    #[test]
    fn fill_missing_values_with_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [geocoding]
            gateway = "opencage"
            delay = "1s"
            "#,
        )
        .unwrap();
        assert_eq!(GeocodingGateway::Opencage, cfg.geocoding.gateway);
        assert_eq!(Duration::from_secs(1), cfg.geocoding.delay);
        assert_eq!("Address", cfg.input.address_column);
        assert_eq!(Path::new(DEFAULT_OUTPUT_PATH), cfg.output.path);
        assert_eq!(DEFAULT_API_URL, cfg.gateway.google_maps.api_url);
        assert!(cfg.gateway.opencage.api_key.is_none());
    }

    #[test]
    fn reject_unknown_gateway() {
        let res: Result<Config, _> = toml::from_str(
            r#"
            [geocoding]
            gateway = "bing"
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn api_keys_from_env_take_precedence() {
        let mut cfg: Config = toml::from_str(
            r#"
            [gateway.google-maps]
            api-key = "from-file"
            [gateway.opencage]
            api-key = "oc-from-file"
            "#,
        )
        .unwrap();
        cfg.override_api_keys(|name| {
            (name == ENV_NAME_GOOGLE_MAPS_API_KEY).then(|| "from-env".to_owned())
        });
        assert_eq!(Some("from-env"), cfg.gateway.google_maps.api_key.as_deref());
        assert_eq!(Some("oc-from-file"), cfg.gateway.opencage.api_key.as_deref());
    }

    #[test]
    fn missing_config_file() {
        let res = Config::try_load_from_file_or_default(Some(Path::new("does/not/exist.toml")));
        assert!(res.is_err());
    }
}
