// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture client façade for a Nacos configuration center.
//!
//! This crate loads Nacos connection parameters from a local YAML or JSON file,
//! validates them, builds one shared client exactly once, and offers fetch,
//! publish, delete and watch operations on configuration entries. An empty data
//! id or group in any operation falls back to the entry named in the config file.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and logic (`NacosConfig`, `EntryKey`, `OpContext`,
//!   errors)
//! - **Ports**: Trait definitions that define interfaces (`ConfigCenter`, `Connector`,
//!   `ConfigParser`)
//! - **Adapters**: File parsers and loader, and an in-memory configuration center
//! - **Service**: The client handle, its once-only lifecycle and the process-wide client
//!
//! The wire protocol to a Nacos server is not part of this crate. A real SDK is
//! plugged in by implementing [`ports::Connector`] and [`ports::ConfigCenter`].
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML config file support (default)
//! - `json`: Enable JSON config file support (default)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nacoscfg::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let cell = ClientCell::new(Arc::new(MemoryConnector::new()));
//! let client = cell.init("application.yaml")?;
//!
//! let ctx = OpContext::background();
//! client.publish(&ctx, "", "", "greeting: hello")?;
//! println!("{}", client.fetch(&ctx, "", "")?);
//! # Ok(())
//! # }
//! ```
//!
//! A config file looks like:
//!
//! ```yaml
//! nacos:
//!   namespace: dev
//!   addr: 127.0.0.1
//!   port: 8848
//!   dataid: app.yaml
//!   group: DEFAULT_GROUP
//!   timeout_ms: 5000
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::load_config;
pub use service::global::{
    client_state, close, delete, fetch, fetch_default, get_client, init_client,
    install_connector, publish, watch,
};

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{load_config, MemoryConfigCenter, MemoryConnector};
    pub use crate::domain::{
        is_client_error, is_config_error, is_network_error, EntryKey, ErrorCode, NacosConfig,
        NacosError, OpContext, Result,
    };
    pub use crate::ports::{ChangeCallback, ConfigCenter, ConfigParser, Connector};
    pub use crate::service::{ClientCell, ClientState, NacosClient};

    // Re-export parsers based on feature flags
    #[cfg(feature = "json")]
    pub use crate::adapters::JsonParser;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
}
