// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the client handle and its lifecycle.
//!
//! [`NacosClient`] wraps a bound configuration-center capability. [`ClientCell`]
//! builds one exactly once from a config file, and the [`global`] module keeps a
//! process-wide cell behind one-shot operations.

pub mod client;
pub mod global;
pub mod lifecycle;

// Re-export commonly used types
pub use client::NacosClient;
pub use lifecycle::{ClientCell, ClientState};
