// SPDX-License-Identifier: MIT OR Apache-2.0

//! The client handle and its configuration operations.
//!
//! A [`NacosClient`] owns one bound [`ConfigCenter`] and the [`NacosConfig`] it was
//! constructed from. Operations substitute the handle's default entry for an empty
//! `data_id` or `group`, then delegate to the capability.

use crate::domain::{EntryKey, ErrorCode, NacosConfig, NacosError, OpContext, Result};
use crate::ports::{ChangeCallback, ConfigCenter, ConnectParams, Connector};
use std::fmt;
use std::sync::{Arc, RwLock};

/// A handle to a configuration center.
///
/// The handle is `Send + Sync` and meant to be shared behind an `Arc`; any number
/// of threads may call its operations concurrently.
///
/// # Locking
///
/// The default entry lives behind a `RwLock`. Operations resolve the effective
/// entry under the shared lock and release it before calling the capability, so
/// change callbacks delivered during a call may use the client again.
/// [`set_default_entry`](Self::set_default_entry) takes the exclusive lock.
///
/// # Cancellation
///
/// Every operation takes an [`OpContext`], which is checked before the call is
/// handed to the capability. A call already in flight is not interrupted; it is
/// bounded by the capability's own `timeout_ms`.
///
/// # Examples
///
/// ```rust
/// use nacoscfg::adapters::MemoryConnector;
/// use nacoscfg::domain::{NacosConfig, OpContext};
/// use nacoscfg::service::NacosClient;
///
/// # fn main() -> nacoscfg::domain::Result<()> {
/// let config = NacosConfig {
///     addr: "localhost".to_string(),
///     port: 8848,
///     data_id: "app.yaml".to_string(),
///     ..Default::default()
/// };
/// let client = NacosClient::connect(config, &MemoryConnector::new())?;
/// let ctx = OpContext::background();
///
/// // empty data id and group resolve to app.yaml / DEFAULT_GROUP
/// client.publish(&ctx, "", "", "greeting: hello")?;
/// assert_eq!(client.fetch(&ctx, "app.yaml", "DEFAULT_GROUP")?, "greeting: hello");
/// # Ok(())
/// # }
/// ```
pub struct NacosClient {
    config: NacosConfig,
    center: Option<Arc<dyn ConfigCenter>>,
    defaults: RwLock<EntryKey>,
}

impl NacosClient {
    /// Creates a handle bound to an already constructed capability.
    ///
    /// The config is taken as is; use [`connect`](Self::connect) to validate it.
    pub fn new(config: NacosConfig, center: Arc<dyn ConfigCenter>) -> Self {
        let defaults = EntryKey::new(config.data_id.clone(), config.group.clone());
        Self {
            config,
            center: Some(center),
            defaults: RwLock::new(defaults),
        }
    }

    /// Creates a handle with no capability bound.
    ///
    /// Every operation on it fails with [`ErrorCode::ClientNotInit`].
    pub fn unbound(config: NacosConfig) -> Self {
        let defaults = EntryKey::new(config.data_id.clone(), config.group.clone());
        Self {
            config,
            center: None,
            defaults: RwLock::new(defaults),
        }
    }

    /// Validates `config` and constructs a capability for it through `connector`.
    ///
    /// # Errors
    ///
    /// * [`ErrorCode::ConfigValidateFailed`] wrapping the validation error
    /// * [`ErrorCode::ClientInitFailed`] wrapping the connector's error
    pub fn connect(config: NacosConfig, connector: &dyn Connector) -> Result<Self> {
        let params = ConnectParams::from_config(&config).map_err(|e| {
            NacosError::with_cause(
                ErrorCode::ConfigValidateFailed,
                "configuration validation failed",
                e,
            )
        })?;

        let center = connector.connect(&params).map_err(|e| {
            NacosError::with_cause(
                ErrorCode::ClientInitFailed,
                format!("failed to create config client for {}", config.server_url()),
                e,
            )
        })?;

        Ok(Self::new(config, center))
    }

    /// Returns the config this handle was constructed from.
    pub fn config(&self) -> &NacosConfig {
        &self.config
    }

    /// Returns the bound capability, for calls this handle does not wrap.
    pub fn center(&self) -> Option<Arc<dyn ConfigCenter>> {
        self.center.clone()
    }

    /// Returns `true` if a capability is bound.
    pub fn is_bound(&self) -> bool {
        self.center.is_some()
    }

    /// Returns the entry used when `data_id` or `group` is empty.
    pub fn default_entry(&self) -> Result<EntryKey> {
        Ok(self.defaults.read().map_err(|_| lock_poisoned())?.clone())
    }

    /// Replaces the default entry.
    ///
    /// Fails with [`ErrorCode::ConfigInvalid`] if either part is empty.
    pub fn set_default_entry(&self, data_id: &str, group: &str) -> Result<()> {
        if data_id.is_empty() || group.is_empty() {
            return Err(NacosError::new(
                ErrorCode::ConfigInvalid,
                "default data id and group must not be empty",
            ));
        }
        let mut defaults = self.defaults.write().map_err(|_| lock_poisoned())?;
        *defaults = EntryKey::new(data_id, group);
        Ok(())
    }

    /// Returns the raw content of an entry.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::OperationFailed`] naming the effective data id and group.
    pub fn fetch(&self, ctx: &OpContext, data_id: &str, group: &str) -> Result<String> {
        let (center, entry) = self.resolve(ctx, data_id, group)?;
        tracing::debug!("Fetching config {} from {}", entry, center.name());

        center.fetch(&entry).map_err(|e| {
            tracing::warn!("Fetching config {} failed: {}", entry, e);
            NacosError::with_cause(
                ErrorCode::OperationFailed,
                format!(
                    "failed to fetch config [data_id: {}, group: {}]",
                    entry.data_id(),
                    entry.group()
                ),
                e,
            )
        })
    }

    /// Creates or overwrites an entry.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::PublishFailed`] if the capability fails or does not apply the
    /// change.
    pub fn publish(
        &self,
        ctx: &OpContext,
        data_id: &str,
        group: &str,
        content: &str,
    ) -> Result<()> {
        let (center, entry) = self.resolve(ctx, data_id, group)?;
        tracing::debug!("Publishing config {} to {}", entry, center.name());

        match center.publish(&entry, content) {
            Ok(true) => Ok(()),
            Ok(false) => Err(NacosError::new(
                ErrorCode::PublishFailed,
                format!("publishing config {} was not applied", entry),
            )),
            Err(e) => {
                tracing::warn!("Publishing config {} failed: {}", entry, e);
                Err(NacosError::with_cause(
                    ErrorCode::PublishFailed,
                    format!(
                        "failed to publish config [data_id: {}, group: {}]",
                        entry.data_id(),
                        entry.group()
                    ),
                    e,
                ))
            }
        }
    }

    /// Removes an entry.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::DeleteFailed`] if the capability fails or does not apply the
    /// change.
    pub fn delete(&self, ctx: &OpContext, data_id: &str, group: &str) -> Result<()> {
        let (center, entry) = self.resolve(ctx, data_id, group)?;
        tracing::debug!("Deleting config {} from {}", entry, center.name());

        match center.delete(&entry) {
            Ok(true) => Ok(()),
            Ok(false) => Err(NacosError::new(
                ErrorCode::DeleteFailed,
                format!("deleting config {} was not applied", entry),
            )),
            Err(e) => {
                tracing::warn!("Deleting config {} failed: {}", entry, e);
                Err(NacosError::with_cause(
                    ErrorCode::DeleteFailed,
                    format!(
                        "failed to delete config [data_id: {}, group: {}]",
                        entry.data_id(),
                        entry.group()
                    ),
                    e,
                ))
            }
        }
    }

    /// Registers `on_change` to receive the new content of an entry.
    ///
    /// With `None` the subscription is still registered but notifications are
    /// dropped. Delivery order and threading are those of the bound capability;
    /// nothing is reordered or deduplicated here.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::ListenFailed`] if registration fails.
    pub fn watch(
        &self,
        ctx: &OpContext,
        data_id: &str,
        group: &str,
        on_change: Option<ChangeCallback>,
    ) -> Result<()> {
        let (center, entry) = self.resolve(ctx, data_id, group)?;
        tracing::debug!("Watching config {} on {}", entry, center.name());

        let forward: ChangeCallback = match on_change {
            Some(callback) => callback,
            None => Arc::new(|_content: String| {}),
        };

        center.watch(&entry, forward).map_err(|e| {
            tracing::warn!("Watching config {} failed: {}", entry, e);
            NacosError::with_cause(
                ErrorCode::ListenFailed,
                format!(
                    "failed to listen for config [data_id: {}, group: {}]",
                    entry.data_id(),
                    entry.group()
                ),
                e,
            )
        })
    }

    /// Drops the listeners registered for an entry.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::ListenFailed`] if the capability fails.
    pub fn cancel_watch(&self, ctx: &OpContext, data_id: &str, group: &str) -> Result<()> {
        let (center, entry) = self.resolve(ctx, data_id, group)?;
        center.cancel_watch(&entry).map_err(|e| {
            NacosError::with_cause(
                ErrorCode::ListenFailed,
                format!("failed to cancel listening for config {}", entry),
                e,
            )
        })
    }

    /// Best-effort shutdown; always succeeds.
    ///
    /// Remote SDKs rarely expose an explicit shutdown. A failure reported by the
    /// capability is logged and otherwise ignored, and the handle stays usable.
    pub fn close(&self) -> Result<()> {
        if let Some(center) = &self.center {
            if let Err(e) = center.close() {
                tracing::warn!("Closing config center '{}' failed: {}", center.name(), e);
            }
            tracing::info!("Nacos client for {} closed", self.config.server_url());
        }
        Ok(())
    }

    /// Checks the handle and context and resolves the effective entry.
    fn resolve(
        &self,
        ctx: &OpContext,
        data_id: &str,
        group: &str,
    ) -> Result<(&Arc<dyn ConfigCenter>, EntryKey)> {
        let center = self
            .center
            .as_ref()
            .ok_or_else(|| NacosError::from_code(ErrorCode::ClientNotInit))?;
        ctx.check()?;

        let defaults = self.defaults.read().map_err(|_| lock_poisoned())?;
        Ok((center, EntryKey::or_defaults(data_id, group, &defaults)))
    }
}

impl fmt::Debug for NacosClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NacosClient")
            .field("server", &self.config.server_url())
            .field("namespace", &self.config.namespace)
            .field("center", &self.center.as_ref().map(|c| c.name().to_string()))
            .finish()
    }
}

fn lock_poisoned() -> NacosError {
    NacosError::new(ErrorCode::OperationFailed, "client defaults lock poisoned")
}
