use crate::error::ConfigError;
use crate::run::{Generator, RngSource};
use crate::solver::ConflictClassification;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

/// Service settings, read from `SCHEDULER_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Extra pause after each placed lesson so observers can keep up.
    pub checkpoint_delay: Duration,
    /// Pins the shuffle order; unset draws from OS entropy.
    pub seed: Option<u64>,
    pub detailed_conflicts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            checkpoint_delay: Duration::ZERO,
            seed: None,
            detailed_conflicts: false,
        }
    }
}

impl Config {
    /// Loads `.env` into the environment when present, then reads it.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Reads settings from an env file only, leaving the process
    /// environment untouched.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let vars = dotenvy::from_path_iter(path)?.collect::<Result<HashMap<_, _>, _>>()?;
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: parse(&lookup, "SCHEDULER_HOST")?.unwrap_or(defaults.host),
            port: parse(&lookup, "SCHEDULER_PORT")?.unwrap_or(defaults.port),
            checkpoint_delay: parse(&lookup, "SCHEDULER_CHECKPOINT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.checkpoint_delay),
            seed: parse(&lookup, "SCHEDULER_SEED")?,
            detailed_conflicts: parse(&lookup, "SCHEDULER_DETAILED_CONFLICTS")?
                .unwrap_or(defaults.detailed_conflicts),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn generator(&self) -> Generator {
        let rng_source = self.seed.map_or(RngSource::Entropy, RngSource::Seeded);
        let classification = if self.detailed_conflicts {
            ConflictClassification::Detailed
        } else {
            ConflictClassification::Uniform
        };
        Generator::new()
            .with_rng_source(rng_source)
            .with_conflict_classification(classification)
            .with_checkpoint_delay(self.checkpoint_delay)
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
