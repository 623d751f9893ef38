use std::env;

use crate::cli::Cli;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://medical_journal.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub seed_sample_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        if database_url.trim().is_empty() {
            return Err("DATABASE_URL must not be empty".to_string());
        }

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|_| format!("Invalid BIND_ADDR: {}", bind_addr))?;

        let seed_sample_data = match lookup("SEED_SAMPLE_DATA") {
            None => true,
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| format!("Invalid SEED_SAMPLE_DATA: {}", raw))?,
        };

        Ok(Self {
            database_url,
            bind_addr,
            seed_sample_data,
        })
    }

    /// Command-line flags take precedence over the environment.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.database_url {
            self.database_url = url.clone();
        }
        if let Some(addr) = &cli.bind_addr {
            self.bind_addr = addr.clone();
        }
        if cli.no_seed {
            self.seed_sample_data = false;
        }
        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert!(config.seed_sample_data);
    }

    #[test]
    fn reads_all_keys() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("SEED_SAMPLE_DATA", "false"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert!(!config.seed_sample_data);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("BIND_ADDR", "localhost")])).is_err());
        assert!(Config::from_lookup(lookup(&[("SEED_SAMPLE_DATA", "maybe")])).is_err());
        assert!(Config::from_lookup(lookup(&[("DATABASE_URL", "  ")])).is_err());
    }

    #[test]
    fn cli_overrides_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        let cli = Cli {
            database_url: Some("sqlite::memory:".to_string()),
            bind_addr: None,
            no_seed: true,
        };

        let config = config.apply_cli(&cli);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert!(!config.seed_sample_data);
    }
}
