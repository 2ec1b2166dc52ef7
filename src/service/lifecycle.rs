// SPDX-License-Identifier: MIT OR Apache-2.0

//! Once-only client construction.
//!
//! A [`ClientCell`] builds a [`NacosClient`] the first time it is asked for one and
//! memoizes the outcome. Later calls, from any thread, observe the same handle or
//! the same error, and the config path they pass is ignored.

use crate::adapters::load_config;
use crate::domain::{ErrorCode, NacosError, Result};
use crate::ports::Connector;
use crate::service::NacosClient;
use once_cell::sync::OnceCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Where a [`ClientCell`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientState {
    /// No initialization has been attempted.
    Uninitialized,
    /// The first initialization is running; other callers block on it.
    Initializing,
    /// A client was built and is handed to every caller.
    Ready,
    /// Initialization failed; the error is handed to every caller.
    Failed,
}

/// Builds one client exactly once and hands it to every caller.
///
/// The first call to [`init`](Self::init) loads the config file, validates it and
/// asks the connector for a capability. Concurrent callers block until that
/// attempt finishes. A failed attempt is not retried: the error is memoized and
/// returned to every later caller until the cell is [`reset`](Self::reset). A
/// connector that panics counts as a failed attempt.
///
/// # Examples
///
/// ```rust,no_run
/// use nacoscfg::adapters::MemoryConnector;
/// use nacoscfg::service::ClientCell;
/// use std::sync::Arc;
///
/// # fn main() -> nacoscfg::domain::Result<()> {
/// let cell = ClientCell::new(Arc::new(MemoryConnector::new()));
/// let first = cell.init("application.yaml")?;
/// let second = cell.init("ignored.yaml")?;
/// assert!(Arc::ptr_eq(&first, &second));
/// # Ok(())
/// # }
/// ```
pub struct ClientCell {
    connector: Arc<dyn Connector>,
    slot: OnceCell<Result<Arc<NacosClient>>>,
    initializing: AtomicBool,
}

impl ClientCell {
    /// Creates an uninitialized cell that will connect through `connector`.
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            slot: OnceCell::new(),
            initializing: AtomicBool::new(false),
        }
    }

    /// Returns the client, building it from `config_path` on the first call.
    ///
    /// # Errors
    ///
    /// * [`ErrorCode::ConfigLoadFailed`] if the file cannot be loaded
    /// * [`ErrorCode::ConfigValidateFailed`] if the loaded config is invalid
    /// * [`ErrorCode::ClientInitFailed`] if the connector fails
    ///
    /// Whichever of these the first call produced is returned again by every
    /// later call.
    pub fn init<P: AsRef<Path>>(&self, config_path: P) -> Result<Arc<NacosClient>> {
        self.slot
            .get_or_init(|| {
                self.initializing.store(true, Ordering::SeqCst);
                let connector = self.connector.as_ref();
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    build(config_path.as_ref(), connector)
                }))
                .unwrap_or_else(|_| {
                    tracing::warn!("Nacos client initialization panicked");
                    Err(NacosError::new(
                        ErrorCode::ClientInitFailed,
                        "client construction panicked",
                    ))
                });
                self.initializing.store(false, Ordering::SeqCst);
                result
            })
            .clone()
    }

    /// Same as [`init`](Self::init).
    pub fn get_client<P: AsRef<Path>>(&self, config_path: P) -> Result<Arc<NacosClient>> {
        self.init(config_path)
    }

    /// Returns the memoized outcome without attempting initialization.
    pub fn current(&self) -> Option<Result<Arc<NacosClient>>> {
        self.slot.get().cloned()
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> ClientState {
        match self.slot.get() {
            Some(Ok(_)) => ClientState::Ready,
            Some(Err(_)) => ClientState::Failed,
            None if self.initializing.load(Ordering::SeqCst) => ClientState::Initializing,
            None => ClientState::Uninitialized,
        }
    }

    /// Closes the client if one was built. Always succeeds.
    pub fn close(&self) -> Result<()> {
        match self.slot.get() {
            Some(Ok(client)) => client.close(),
            _ => Ok(()),
        }
    }

    /// Forgets the memoized outcome so the next [`init`](Self::init) builds again.
    ///
    /// Handles already given out stay usable. Returns the forgotten outcome.
    pub fn reset(&mut self) -> Option<Result<Arc<NacosClient>>> {
        self.initializing.store(false, Ordering::SeqCst);
        self.slot.take()
    }
}

impl fmt::Debug for ClientCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCell")
            .field("state", &self.state())
            .finish()
    }
}

fn build(config_path: &Path, connector: &dyn Connector) -> Result<Arc<NacosClient>> {
    let result = load_config(config_path)
        .map_err(|e| match e.code() {
            ErrorCode::ConfigLoadFailed => e,
            _ => NacosError::with_cause(
                ErrorCode::ConfigLoadFailed,
                "failed to load nacos configuration",
                e,
            ),
        })
        .and_then(|config| NacosClient::connect(config, connector));

    match result {
        Ok(client) => {
            tracing::info!(
                "Nacos client initialized, server: {}, namespace: '{}'",
                client.config().server_url(),
                client.config().namespace
            );
            Ok(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!("Nacos client initialization failed: {}", e);
            Err(e)
        }
    }
}
