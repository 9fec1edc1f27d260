//! Process configuration: defaults, then an optional TOML file, then env vars.
//!
//! The resolved [`AppConfig`] is loaded once at start-up and shared read-only
//! through [`AppConfig::global`].

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.nasa.gov";
pub const DEMO_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

static GLOBAL: OnceLock<AppConfig> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("NASA_TIMEOUT_SECS / timeout_secs cannot be 0")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NasaConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            api_key: DEMO_API_KEY.into(),
            base_url: DEFAULT_API_BASE.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: String, // "stdio" or "server"
    pub port: u16,
    pub disable_rest: bool,
    pub nasa: NasaConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: "stdio".into(),
            port: 8080,
            disable_rest: false,
            nasa: NasaConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    mode: Option<String>,
    port: Option<u16>,
    disable_rest: Option<bool>,
    #[serde(default)]
    nasa: FileNasa,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileNasa {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Defaults overlaid with environment variables only.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env();
        cfg
    }

    /// Defaults, then the TOML file named by `NASA_MCP_CONFIG` (if set), then env.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = match std::env::var("NASA_MCP_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_toml_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        cfg.apply_env();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings that would make every upstream call fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nasa.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Defaults overlaid with a TOML document. Environment is not consulted.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(raw)?;
        let mut cfg = Self::default();
        if let Some(mode) = file.mode {
            cfg.mode = mode;
        }
        if let Some(port) = file.port {
            cfg.port = port;
        }
        if let Some(disable_rest) = file.disable_rest {
            cfg.disable_rest = disable_rest;
        }
        if let Some(key) = file.nasa.api_key.filter(|k| !k.trim().is_empty()) {
            cfg.nasa.api_key = key;
        }
        if let Some(base) = file.nasa.base_url.filter(|b| !b.trim().is_empty()) {
            cfg.nasa.base_url = base;
        }
        if let Some(secs) = file.nasa.timeout_secs {
            cfg.nasa.timeout_secs = secs;
        }
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(mode) = std::env::var("MODE") {
            self.mode = mode;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|s| s.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Ok(v) = std::env::var("DISABLE_REST") {
            self.disable_rest = !v.is_empty();
        }
        if let Ok(key) = std::env::var("NASA_API_KEY") {
            if !key.trim().is_empty() {
                self.nasa.api_key = key;
            }
        }
        if let Ok(base) = std::env::var("NASA_API_BASE") {
            if !base.trim().is_empty() {
                self.nasa.base_url = base;
            }
        }
        if let Some(secs) = std::env::var("NASA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.nasa.timeout_secs = secs;
        }
    }

    pub fn uses_demo_key(&self) -> bool {
        self.nasa.api_key == DEMO_API_KEY
    }

    /// Resolve the process-wide config. Call once early in `main`.
    pub fn init() -> Result<&'static AppConfig, ConfigError> {
        if let Some(cfg) = GLOBAL.get() {
            return Ok(cfg);
        }
        let cfg = Self::load()?;
        Ok(GLOBAL.get_or_init(|| cfg))
    }

    /// Like [`AppConfig::load`], but never fails: a bad file is skipped and a
    /// zero timeout falls back to the default.
    pub fn load_or_env() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "config rejected, using env with defaults");
            let mut cfg = Self::from_env();
            if cfg.nasa.timeout_secs == 0 {
                cfg.nasa.timeout_secs = DEFAULT_TIMEOUT_SECS;
            }
            cfg
        })
    }

    /// The process-wide config; falls back to [`AppConfig::load_or_env`] if `init` was never called.
    pub fn global() -> &'static AppConfig {
        GLOBAL.get_or_init(Self::load_or_env)
    }
}
