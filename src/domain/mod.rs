// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and logic.
//!
//! This module holds the connection parameters, the error taxonomy and the small
//! value types shared by every other layer. It does not depend on any
//! configuration-center implementation.

pub mod config;
pub mod config_value;
pub mod context;
pub mod entry;
pub mod errors;

// Re-export commonly used types
pub use config::{LogLevel, NacosConfig, Scheme, DEFAULT_GROUP};
pub use config_value::ConfigValue;
pub use context::OpContext;
pub use entry::EntryKey;
pub use errors::{
    is_client_error, is_config_error, is_network_error, wrap_error, ErrorCode, NacosError, Result,
};
