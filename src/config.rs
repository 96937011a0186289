use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:80";

/// Runtime settings.
///
/// Resolved from, lowest precedence first: built-in defaults, the YAML file
/// named by `LBPROBE_CONFIG`, then the `LISTEN` and
/// `WAIT_SECONDS_BEFORE_RESPONSE` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Delay applied before every response
    pub wait_before_response: Duration,
}

/// On-disk form of [`Config`]. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub listen_addr: Option<String>,
    pub wait_seconds_before_response: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            wait_before_response: Duration::ZERO,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = Self::default();

        if let Ok(path) = std::env::var("LBPROBE_CONFIG") {
            cfg.apply_file(FileConfig::from_path(&path)?);
        }

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.listen_addr = addr;
        }

        if let Ok(raw) = std::env::var("WAIT_SECONDS_BEFORE_RESPONSE") {
            cfg.wait_before_response = parse_wait_seconds(&raw)
                .context("invalid WAIT_SECONDS_BEFORE_RESPONSE")?;
        }

        Ok(cfg)
    }

    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(addr) = file.listen_addr {
            self.listen_addr = addr;
        }
        if let Some(secs) = file.wait_seconds_before_response {
            self.wait_before_response = Duration::from_secs(secs);
        }
    }
}

impl FileConfig {
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }
}

/// Parses a whole, non-negative number of seconds.
pub fn parse_wait_seconds(raw: &str) -> anyhow::Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("expected a non-negative integer, got {raw:?}"))?;
    Ok(Duration::from_secs(secs))
}
