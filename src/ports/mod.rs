// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! between the client and its collaborators: the remote configuration center and
//! the local configuration file parsers. These traits are implemented by adapters
//! in the adapters layer.

pub mod center;
pub mod parser;

// Re-export commonly used types
pub use center::{ChangeCallback, ConfigCenter, ConnectParams, Connector};
pub use parser::ConfigParser;
