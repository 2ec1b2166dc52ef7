// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing implementations of the ports.
//!
//! This module contains the local configuration file parsers and loader, and the
//! in-process [`MemoryConfigCenter`] implementation of the remote capability.

pub mod config_file;
#[cfg(feature = "json")]
pub mod json;
pub mod memory;
#[cfg(feature = "yaml")]
pub mod yaml;

pub use config_file::{load_config, load_default_config, parser_for};
#[cfg(feature = "json")]
pub use json::JsonParser;
pub use memory::{MemoryConfigCenter, MemoryConnector};
#[cfg(feature = "yaml")]
pub use yaml::YamlParser;
