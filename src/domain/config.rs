// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection parameters for the configuration center.
//!
//! [`NacosConfig`] is a plain value: it is built from defaults, overlaid with the
//! `nacos.*` keys of a configuration file and then validated. Once a client has been
//! constructed from it, it is never mutated.

use crate::domain::config_value::ConfigValue;
use crate::domain::errors::{ErrorCode, NacosError, Result};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Group used when none is configured.
pub const DEFAULT_GROUP: &str = "DEFAULT_GROUP";
/// Client request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
/// URL scheme used when none is configured.
pub const DEFAULT_SCHEME: &str = "http";
/// Server context path used when none is configured.
pub const DEFAULT_CONTEXT_PATH: &str = "/nacos";
/// Directory handed to the remote SDK for its own logs.
pub const DEFAULT_LOG_DIR: &str = "/tmp/nacos/log";
/// Directory handed to the remote SDK for its snapshot cache.
pub const DEFAULT_CACHE_DIR: &str = "/tmp/nacos/cache";

/// Log level handed to the remote SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    /// Verbose diagnostics.
    Debug,
    /// Normal operation.
    #[default]
    Info,
    /// Recoverable problems.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Returns the lowercase name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = NacosError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(NacosError::new(
                ErrorCode::ConfigInvalid,
                format!(
                    "invalid log level '{}': expected one of debug, info, warn, error",
                    other
                ),
            )),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL scheme used to reach the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    /// Plain HTTP.
    #[default]
    Http,
    /// HTTP over TLS.
    Https,
}

impl Scheme {
    /// Returns the lowercase name of the scheme.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl FromStr for Scheme {
    type Err = NacosError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            other => Err(NacosError::new(
                ErrorCode::ConfigInvalid,
                format!("invalid scheme '{}': expected http or https", other),
            )),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection parameters for the configuration center.
///
/// `Default` yields the seeded defaults that a configuration file is overlaid on;
/// `addr`, `port` and `data_id` have no sensible default and are left empty, so a
/// default config does not validate on its own.
///
/// An empty `log_level` or `scheme` is accepted and means `info` / `http`.
///
/// # Examples
///
/// ```
/// use nacoscfg::domain::NacosConfig;
///
/// let config = NacosConfig {
///     addr: "localhost".to_string(),
///     port: 8848,
///     data_id: "app.yaml".to_string(),
///     ..Default::default()
/// };
///
/// assert!(config.is_valid());
/// assert_eq!(config.server_url(), "http://localhost:8848/nacos");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NacosConfig {
    /// Namespace (tenant) the entries live in; empty means the public namespace.
    pub namespace: String,
    /// Server host name or IP address.
    pub addr: String,
    /// Server port, kept wide so that out of range values reach validation.
    pub port: u64,
    /// Data id of the default configuration entry.
    pub data_id: String,
    /// Group of the default configuration entry.
    pub group: String,
    /// Request timeout handed to the remote SDK.
    pub timeout_ms: u64,
    /// Log level handed to the remote SDK.
    pub log_level: String,
    /// Log directory handed to the remote SDK.
    pub log_dir: String,
    /// Cache directory handed to the remote SDK.
    pub cache_dir: String,
    /// Whether the remote SDK skips its snapshot cache at start.
    pub not_load_cache: bool,
    /// `http` or `https`.
    pub scheme: String,
    /// Server context path, for example `/nacos`.
    pub context_path: String,
}

impl Default for NacosConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            addr: String::new(),
            port: 0,
            data_id: String::new(),
            group: DEFAULT_GROUP.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            log_level: LogLevel::Info.as_str().to_string(),
            log_dir: DEFAULT_LOG_DIR.to_string(),
            cache_dir: DEFAULT_CACHE_DIR.to_string(),
            not_load_cache: true,
            scheme: DEFAULT_SCHEME.to_string(),
            context_path: DEFAULT_CONTEXT_PATH.to_string(),
        }
    }
}

impl NacosConfig {
    /// Checks every constraint and reports the first one that is violated.
    ///
    /// Fields are checked in the order address, port, data id, group, log level,
    /// scheme. All failures carry [`ErrorCode::ConfigInvalid`].
    pub fn validate(&self) -> Result<()> {
        if self.addr.trim().is_empty() {
            return Err(invalid("nacos server address must not be empty"));
        }
        if self.port == 0 || self.port > u64::from(u16::MAX) {
            return Err(invalid(format!(
                "nacos server port {} is out of range 1..=65535",
                self.port
            )));
        }
        if self.data_id.trim().is_empty() {
            return Err(invalid("data id must not be empty"));
        }
        if self.group.trim().is_empty() {
            return Err(invalid("group must not be empty"));
        }
        self.log_level()?;
        self.scheme()?;
        Ok(())
    }

    /// Returns `true` if [`validate`](Self::validate) succeeds.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Builds `{scheme}://{addr}:{port}{context_path}`.
    ///
    /// Empty `scheme` and `context_path` fall back to `http` and `/nacos`. The
    /// result is built verbatim, even for a config that does not validate.
    ///
    /// # Examples
    ///
    /// ```
    /// use nacoscfg::domain::NacosConfig;
    ///
    /// let config = NacosConfig {
    ///     addr: "h".to_string(),
    ///     port: 1,
    ///     scheme: String::new(),
    ///     context_path: String::new(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(config.server_url(), "http://h:1/nacos");
    /// ```
    pub fn server_url(&self) -> String {
        let scheme = if self.scheme.is_empty() {
            DEFAULT_SCHEME
        } else {
            self.scheme.as_str()
        };
        let context_path = if self.context_path.is_empty() {
            DEFAULT_CONTEXT_PATH
        } else {
            self.context_path.as_str()
        };
        format!("{}://{}:{}{}", scheme, self.addr, self.port, context_path)
    }

    /// Returns the typed log level; empty means [`LogLevel::Info`].
    pub fn log_level(&self) -> Result<LogLevel> {
        if self.log_level.is_empty() {
            Ok(LogLevel::default())
        } else {
            self.log_level.parse()
        }
    }

    /// Returns the typed scheme; empty means [`Scheme::Http`].
    pub fn scheme(&self) -> Result<Scheme> {
        if self.scheme.is_empty() {
            Ok(Scheme::default())
        } else {
            self.scheme.parse()
        }
    }

    /// Returns the context path, falling back to `/nacos` when empty.
    pub fn effective_context_path(&self) -> &str {
        if self.context_path.is_empty() {
            DEFAULT_CONTEXT_PATH
        } else {
            &self.context_path
        }
    }

    /// Overlays flattened file values onto this config.
    ///
    /// Only the `nacos.*` keys are read; everything else in the file is ignored so
    /// that the connection section can live next to unrelated application settings.
    /// Conversion failures carry [`ErrorCode::ConfigLoadFailed`].
    pub fn apply_values(&mut self, values: &HashMap<String, String>) -> Result<()> {
        let get = |key: &str| values.get(key).map(|v| ConfigValue::from(v.as_str()));

        if let Some(v) = get("nacos.namespace") {
            self.namespace = v.into();
        }
        if let Some(v) = get("nacos.addr") {
            self.addr = v.into();
        }
        if let Some(v) = get("nacos.port") {
            self.port = v.as_u64("nacos.port")?;
        }
        if let Some(v) = get("nacos.dataid") {
            self.data_id = v.into();
        }
        if let Some(v) = get("nacos.group") {
            self.group = v.into();
        }
        if let Some(v) = get("nacos.timeout_ms") {
            self.timeout_ms = v.as_u64("nacos.timeout_ms")?;
        }
        if let Some(v) = get("nacos.log_level") {
            self.log_level = v.into();
        }
        if let Some(v) = get("nacos.log_dir") {
            self.log_dir = v.into();
        }
        if let Some(v) = get("nacos.cache_dir") {
            self.cache_dir = v.into();
        }
        if let Some(v) = get("nacos.not_load_cache") {
            self.not_load_cache = v.as_bool("nacos.not_load_cache")?;
        }
        if let Some(v) = get("nacos.scheme") {
            self.scheme = v.into();
        }
        if let Some(v) = get("nacos.context_path") {
            self.context_path = v.into();
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> NacosError {
    NacosError::new(ErrorCode::ConfigInvalid, message)
}
