use std::net::SocketAddr;

use anyhow::Context as _;
use serde::Deserialize;

use crate::lookup::{StalePolicy, DEFAULT_BASE_URL};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "STATS_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `EnvFilter` directives, e.g. `info` or `trn_relay=debug`.
    pub level: String,
    pub api: ApiConfig,
    pub trn: TrnConfig,
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub bind: SocketAddr,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrnConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub stale_policy: StalePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            api: ApiConfig::default(),
            trn: TrnConfig::default(),
            lookup: LookupConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}

impl Default for TrnConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 10,
            user_agent: concat!("trn-relay/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Layered load: `config.yaml` (or `$STATS_CONFIG`), then `STATS_*`
    /// environment variables, e.g. `STATS_TRN__API_KEY`.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.yaml".into());

        ::config::Config::builder()
            .add_source(::config::File::with_name(&path).required(false))
            .add_source(environment())
            .build()
            .with_context(|| format!("loading config from {path}"))?
            .try_deserialize()
            .context("invalid config")
    }
}

/// `STATS_` prefix, then `__` between nested keys.
fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix("STATS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_overrides_defaults() {
        let yaml = "trn:\n  api_key: abc\nlookup:\n  stale_policy: last_response_wins\n";

        let config: Config = ::config::Config::builder()
            .add_source(::config::File::from_str(yaml, ::config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.trn.api_key, "abc");
        assert_eq!(config.trn.timeout_secs, 10);
        assert_eq!(config.trn.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.lookup.stale_policy, StalePolicy::LastResponseWins);
        assert_eq!(config.api.bind.port(), 8000);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_env_overrides_file() {
        let yaml = "trn:\n  api_key: from-file\n  timeout_secs: 5\n";
        let vars = [
            ("STATS_TRN__API_KEY", "from-env"),
            ("STATS_TRN__TIMEOUT_SECS", "33"),
            ("STATS_LOOKUP__STALE_POLICY", "last_response_wins"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config: Config = ::config::Config::builder()
            .add_source(::config::File::from_str(yaml, ::config::FileFormat::Yaml))
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.trn.api_key, "from-env");
        assert_eq!(config.trn.timeout_secs, 33);
        assert_eq!(config.lookup.stale_policy, StalePolicy::LastResponseWins);
        assert_eq!(config.trn.base_url, DEFAULT_BASE_URL);
    }
}
