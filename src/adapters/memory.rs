// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process configuration center.
//!
//! [`MemoryConfigCenter`] keeps entries in a map and delivers change notifications
//! synchronously on the thread that publishes or deletes. It speaks no wire
//! protocol; it stands in for a real server in tests, demos and local development.

use crate::domain::{EntryKey, ErrorCode, NacosError, Result};
use crate::ports::{ChangeCallback, ConfigCenter, ConnectParams, Connector};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A configuration center held entirely in memory.
///
/// Listeners are notified when a publish changes the stored content and when an
/// entry is deleted (with empty content). Callbacks run after the internal locks
/// are released, so they may call back into the center.
///
/// # Examples
///
/// ```rust
/// use nacoscfg::adapters::MemoryConfigCenter;
/// use nacoscfg::domain::EntryKey;
/// use nacoscfg::ports::ConfigCenter;
///
/// let center = MemoryConfigCenter::new("dev");
/// let key = EntryKey::new("app.yaml", "DEFAULT_GROUP");
///
/// assert!(center.publish(&key, "greeting: hello").unwrap());
/// assert_eq!(center.fetch(&key).unwrap(), "greeting: hello");
/// ```
pub struct MemoryConfigCenter {
    namespace: String,
    entries: RwLock<HashMap<EntryKey, String>>,
    listeners: RwLock<HashMap<EntryKey, Vec<ChangeCallback>>>,
}

impl MemoryConfigCenter {
    /// Creates an empty center for `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entries: RwLock::new(HashMap::new()),
            listeners: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the namespace this center serves.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns `true` if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of listeners registered for `entry`.
    pub fn listener_count(&self, entry: &EntryKey) -> usize {
        self.listeners
            .read()
            .map(|l| l.get(entry).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn notify(&self, entry: &EntryKey, content: &str) -> Result<()> {
        let callbacks = self
            .listeners
            .read()
            .map_err(|_| poisoned())?
            .get(entry)
            .cloned()
            .unwrap_or_default();

        if !callbacks.is_empty() {
            tracing::debug!(
                "Notifying {} listener(s) of change to {} in namespace '{}'",
                callbacks.len(),
                entry,
                self.namespace
            );
        }
        for callback in callbacks {
            callback(content.to_string());
        }
        Ok(())
    }
}

impl std::fmt::Debug for MemoryConfigCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryConfigCenter")
            .field("namespace", &self.namespace)
            .field("entries", &self.len())
            .finish()
    }
}

impl ConfigCenter for MemoryConfigCenter {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch(&self, entry: &EntryKey) -> Result<String> {
        self.entries
            .read()
            .map_err(|_| poisoned())?
            .get(entry)
            .cloned()
            .ok_or_else(|| {
                NacosError::new(
                    ErrorCode::ConfigNotFound,
                    format!("entry {} not found in namespace '{}'", entry, self.namespace),
                )
            })
    }

    fn publish(&self, entry: &EntryKey, content: &str) -> Result<bool> {
        let previous = self
            .entries
            .write()
            .map_err(|_| poisoned())?
            .insert(entry.clone(), content.to_string());

        if previous.as_deref() != Some(content) {
            self.notify(entry, content)?;
        }
        Ok(true)
    }

    fn delete(&self, entry: &EntryKey) -> Result<bool> {
        let removed = self
            .entries
            .write()
            .map_err(|_| poisoned())?
            .remove(entry)
            .is_some();

        if removed {
            self.notify(entry, "")?;
        }
        Ok(removed)
    }

    fn watch(&self, entry: &EntryKey, on_change: ChangeCallback) -> Result<()> {
        self.listeners
            .write()
            .map_err(|_| poisoned())?
            .entry(entry.clone())
            .or_default()
            .push(on_change);
        Ok(())
    }

    fn cancel_watch(&self, entry: &EntryKey) -> Result<()> {
        self.listeners
            .write()
            .map_err(|_| poisoned())?
            .remove(entry);
        Ok(())
    }
}

fn poisoned() -> NacosError {
    NacosError::new(
        ErrorCode::ServerUnavailable,
        "memory config center lock poisoned",
    )
}

/// A [`Connector`] producing [`MemoryConfigCenter`]s.
///
/// By default every connection gets a fresh, empty center bound to the namespace
/// in [`ConnectParams`]. [`MemoryConnector::shared`] hands out one existing center
/// instead, so tests can seed and inspect it.
#[derive(Debug, Default, Clone)]
pub struct MemoryConnector {
    shared: Option<Arc<MemoryConfigCenter>>,
}

impl MemoryConnector {
    /// A connector creating a new center per connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A connector that always returns `center`.
    pub fn shared(center: Arc<MemoryConfigCenter>) -> Self {
        Self {
            shared: Some(center),
        }
    }
}

impl Connector for MemoryConnector {
    fn connect(&self, params: &ConnectParams) -> Result<Arc<dyn ConfigCenter>> {
        let center: Arc<MemoryConfigCenter> = match &self.shared {
            Some(center) => Arc::clone(center),
            None => Arc::new(MemoryConfigCenter::new(params.namespace.clone())),
        };
        tracing::debug!(
            "Connected in-memory config center for {}:{} (namespace '{}')",
            params.server_addr,
            params.port,
            center.namespace()
        );
        let center: Arc<dyn ConfigCenter> = center;
        Ok(center)
    }
}
