use crate::listing::ListingConfig;
use std::{env, path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/store.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub listing: ListingConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. Unset or unparsable
    /// values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ListingConfig::default();

        let port = parse_var(&lookup, "PORT").unwrap_or(DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let delay = parse_var::<u64>(&lookup, "GYM_LISTING_DELAY_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.delay);
        let failure_rate = parse_var::<f64>(&lookup, "GYM_LISTING_FAILURE_RATE")
            .filter(|rate| rate.is_finite())
            .map(|rate| rate.clamp(0.0, 1.0))
            .unwrap_or(defaults.failure_rate);

        Self {
            port,
            data_path,
            listing: ListingConfig {
                delay,
                failure_rate,
            },
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    lookup(name).and_then(|value| value.trim().parse().ok())
}
