// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote configuration-center capability.
//!
//! The wire protocol to the configuration server is not part of this crate. It is
//! reached through two traits: a [`Connector`] that constructs a capability from
//! [`ConnectParams`], and the [`ConfigCenter`] capability itself, which fetches,
//! publishes, deletes and watches entries.

use crate::domain::{EntryKey, LogLevel, NacosConfig, Result, Scheme};
use std::sync::Arc;

/// Callback invoked with the new content of a watched entry.
///
/// Whether callbacks run on one thread or many, and in which order, is decided by
/// the [`ConfigCenter`] implementation delivering them.
pub type ChangeCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Everything a [`Connector`] needs to construct a capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    /// Server host name or IP address.
    pub server_addr: String,
    /// Server port.
    pub port: u16,
    /// URL scheme.
    pub scheme: Scheme,
    /// Server context path.
    pub context_path: String,
    /// Namespace the capability is bound to.
    pub namespace: String,
    /// Per request timeout in milliseconds.
    pub timeout_ms: u64,
    /// SDK log level.
    pub log_level: LogLevel,
    /// SDK log directory.
    pub log_dir: String,
    /// SDK snapshot cache directory.
    pub cache_dir: String,
    /// Whether the SDK skips its snapshot cache at start.
    pub not_load_cache: bool,
}

impl ConnectParams {
    /// Derives connection parameters from a config.
    ///
    /// Fails with the same error as [`NacosConfig::validate`] if the config does
    /// not validate.
    pub fn from_config(config: &NacosConfig) -> Result<Self> {
        config.validate()?;
        // validate() bounds the port to 1..=65535
        let port = config.port as u16;
        Ok(Self {
            server_addr: config.addr.clone(),
            port,
            scheme: config.scheme()?,
            context_path: config.effective_context_path().to_string(),
            namespace: config.namespace.clone(),
            timeout_ms: config.timeout_ms,
            log_level: config.log_level()?,
            log_dir: config.log_dir.clone(),
            cache_dir: config.cache_dir.clone(),
            not_load_cache: config.not_load_cache,
        })
    }
}

/// The remote configuration-center capability.
///
/// Implementations are expected to be blocking-with-timeout: every call returns
/// within the `timeout_ms` the capability was constructed with.
///
/// # Examples
///
/// ```rust
/// use nacoscfg::domain::{EntryKey, ErrorCode, NacosError, Result};
/// use nacoscfg::ports::{ChangeCallback, ConfigCenter};
///
/// struct ReadOnlyCenter;
///
/// impl ConfigCenter for ReadOnlyCenter {
///     fn name(&self) -> &str {
///         "read-only"
///     }
///
///     fn fetch(&self, _entry: &EntryKey) -> Result<String> {
///         Ok("greeting: hello".to_string())
///     }
///
///     fn publish(&self, _entry: &EntryKey, _content: &str) -> Result<bool> {
///         Ok(false)
///     }
///
///     fn delete(&self, _entry: &EntryKey) -> Result<bool> {
///         Ok(false)
///     }
///
///     fn watch(&self, _entry: &EntryKey, _on_change: ChangeCallback) -> Result<()> {
///         Err(NacosError::new(ErrorCode::ListenFailed, "read-only center"))
///     }
/// }
/// ```
pub trait ConfigCenter: Send + Sync {
    /// Returns a short name for logging, such as "memory" or "nacos".
    fn name(&self) -> &str;

    /// Returns the raw content of an entry.
    fn fetch(&self, entry: &EntryKey) -> Result<String>;

    /// Creates or overwrites an entry.
    ///
    /// `Ok(false)` means the server did not apply the change.
    fn publish(&self, entry: &EntryKey, content: &str) -> Result<bool>;

    /// Removes an entry.
    ///
    /// `Ok(false)` means the server did not apply the change.
    fn delete(&self, entry: &EntryKey) -> Result<bool>;

    /// Registers `on_change` to receive the new content of `entry`.
    fn watch(&self, entry: &EntryKey, on_change: ChangeCallback) -> Result<()>;

    /// Drops every listener registered for `entry`.
    fn cancel_watch(&self, _entry: &EntryKey) -> Result<()> {
        Ok(())
    }

    /// Releases any resources held by the capability.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Constructs a [`ConfigCenter`] bound to a server.
///
/// Closures with the matching signature implement this trait, which keeps test
/// doubles short.
pub trait Connector: Send + Sync {
    /// Connects to the server described by `params`.
    fn connect(&self, params: &ConnectParams) -> Result<Arc<dyn ConfigCenter>>;
}

impl<F> Connector for F
where
    F: Fn(&ConnectParams) -> Result<Arc<dyn ConfigCenter>> + Send + Sync,
{
    fn connect(&self, params: &ConnectParams) -> Result<Arc<dyn ConfigCenter>> {
        self(params)
    }
}
