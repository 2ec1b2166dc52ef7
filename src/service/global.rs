// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide client.
//!
//! One [`ClientCell`] per process, created by [`install_connector`]. The
//! one-shot operations below initialize it on first use and then delegate to the
//! shared [`NacosClient`]. The process-wide cell cannot be reset; code that needs
//! a fresh client should own a [`ClientCell`] instead.

use crate::domain::{ErrorCode, NacosError, OpContext, Result};
use crate::ports::{ChangeCallback, Connector};
use crate::service::{ClientCell, ClientState, NacosClient};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Arc;

static GLOBAL: OnceCell<ClientCell> = OnceCell::new();

fn cell() -> Result<&'static ClientCell> {
    GLOBAL.get().ok_or_else(|| {
        NacosError::new(
            ErrorCode::ClientNotInit,
            "no config center connector installed; call install_connector first",
        )
    })
}

/// Installs the connector used to build the process-wide client.
///
/// May be called once per process.
///
/// # Errors
///
/// [`ErrorCode::ClientInitFailed`] if a connector is already installed.
pub fn install_connector(connector: Arc<dyn Connector>) -> Result<()> {
    GLOBAL.set(ClientCell::new(connector)).map_err(|_| {
        NacosError::new(
            ErrorCode::ClientInitFailed,
            "a config center connector is already installed",
        )
    })
}

/// Initializes the process-wide client from `config_path` on the first call.
///
/// See [`ClientCell::init`]. Fails with [`ErrorCode::ClientNotInit`] if no
/// connector was installed.
pub fn init_client<P: AsRef<Path>>(config_path: P) -> Result<Arc<NacosClient>> {
    cell()?.init(config_path)
}

/// Same as [`init_client`].
pub fn get_client<P: AsRef<Path>>(config_path: P) -> Result<Arc<NacosClient>> {
    init_client(config_path)
}

/// Returns the lifecycle state of the process-wide client.
pub fn client_state() -> ClientState {
    GLOBAL
        .get()
        .map_or(ClientState::Uninitialized, ClientCell::state)
}

/// Closes the process-wide client. Always succeeds.
pub fn close() -> Result<()> {
    match GLOBAL.get() {
        Some(cell) => cell.close(),
        None => Ok(()),
    }
}

/// Fetches an entry through the process-wide client.
pub fn fetch<P: AsRef<Path>>(
    config_path: P,
    ctx: &OpContext,
    data_id: &str,
    group: &str,
) -> Result<String> {
    init_client(config_path)?.fetch(ctx, data_id, group)
}

/// Fetches the default entry named in the config file.
pub fn fetch_default<P: AsRef<Path>>(config_path: P) -> Result<String> {
    fetch(config_path, &OpContext::background(), "", "")
}

/// Publishes an entry through the process-wide client.
pub fn publish<P: AsRef<Path>>(
    config_path: P,
    ctx: &OpContext,
    data_id: &str,
    group: &str,
    content: &str,
) -> Result<()> {
    init_client(config_path)?.publish(ctx, data_id, group, content)
}

/// Deletes an entry through the process-wide client.
pub fn delete<P: AsRef<Path>>(
    config_path: P,
    ctx: &OpContext,
    data_id: &str,
    group: &str,
) -> Result<()> {
    init_client(config_path)?.delete(ctx, data_id, group)
}

/// Watches an entry through the process-wide client.
pub fn watch<P: AsRef<Path>>(
    config_path: P,
    ctx: &OpContext,
    data_id: &str,
    group: &str,
    on_change: Option<ChangeCallback>,
) -> Result<()> {
    init_client(config_path)?.watch(ctx, data_id, group, on_change)
}
