//! Configuration loaded from `~/.config/headcheck/config.toml`.
//!
//! Every option is a named field; [`HeadcheckConfig::validate`] runs once after
//! loading (and after CLI overrides) so invalid combinations fail early.

mod method;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub use method::{HttpMethod, MethodError};

/// TLS peer verification: on/off, or verify against a CA bundle file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TlsVerify {
    Enabled(bool),
    CaBundle(PathBuf),
}

impl Default for TlsVerify {
    fn default() -> Self {
        TlsVerify::Enabled(false)
    }
}

/// Client certificate: a combined PEM file, or separate cert and key files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientCert {
    Combined(PathBuf),
    Pair { cert: PathBuf, key: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// Options handed to the request layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub method: HttpMethod,
    /// Follow 3xx responses and report the final response's headers.
    pub allow_redirects: bool,
    pub verify: TlsVerify,
    /// Proxy URL passed to libcurl (e.g. `http://10.10.1.10:3128`).
    pub proxy: Option<String>,
    pub cookie: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    // Table-valued fields stay last so the TOML output stays valid.
    pub cert: Option<ClientCert>,
    pub auth: Option<BasicAuth>,
    /// Extra request headers.
    pub headers: BTreeMap<String, String>,
    /// Query parameters appended to every target.
    pub params: BTreeMap<String, String>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            method: HttpMethod::Head,
            allow_redirects: false,
            verify: TlsVerify::default(),
            proxy: None,
            cookie: None,
            timeout_secs: 30,
            connect_timeout_secs: 15,
            cert: None,
            auth: None,
            headers: BTreeMap::new(),
            params: BTreeMap::new(),
        }
    }
}

/// Console palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Dark,
    Light,
    None,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(ColorMode::Dark),
            "light" => Ok(ColorMode::Light),
            "none" => Ok(ColorMode::None),
            other => Err(format!("unknown color mode '{other}' (dark, light, none)")),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorMode::Dark => "dark",
            ColorMode::Light => "light",
            ColorMode::None => "none",
        })
    }
}

/// Batch scanning and presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Maximum concurrent requests when scanning a list of targets.
    pub max_in_flight: usize,
    pub color: ColorMode,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            max_in_flight: 8,
            color: ColorMode::Dark,
        }
    }
}

/// Global configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadcheckConfig {
    pub request: RequestConfig,
    pub scan: ScanSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("request header names must not be empty")]
    EmptyHeaderName,
    #[error("verify CA bundle path must not be empty")]
    EmptyCaBundle,
}

impl HeadcheckConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let req = &self.request;
        if req.timeout_secs == 0 {
            return Err(ConfigError::Zero("request.timeout_secs"));
        }
        if req.connect_timeout_secs == 0 {
            return Err(ConfigError::Zero("request.connect_timeout_secs"));
        }
        if self.scan.max_in_flight == 0 {
            return Err(ConfigError::Zero("scan.max_in_flight"));
        }
        if req.headers.keys().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::EmptyHeaderName);
        }
        if let TlsVerify::CaBundle(path) = &req.verify {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::EmptyCaBundle);
            }
        }
        Ok(())
    }

    /// Parse and validate a config file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg: HeadcheckConfig =
            toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("headcheck")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HeadcheckConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HeadcheckConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    HeadcheckConfig::load_from_path(&path)
}
