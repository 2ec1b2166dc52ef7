// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns the content of a local
//! configuration file into a flat key-value map that
//! [`NacosConfig::apply_values`](crate::domain::NacosConfig::apply_values) overlays
//! onto the defaults.

use crate::domain::Result;
use std::collections::HashMap;

/// A trait for parsing local configuration files.
///
/// # Key Format
///
/// Parsers flatten nested structures using dot notation. A document like:
///
/// ```yaml
/// nacos:
///   addr: 127.0.0.1
///   port: 8848
/// ```
///
/// is parsed into:
/// - `nacos.addr` -> `"127.0.0.1"`
/// - `nacos.port` -> `"8848"`
///
/// # Examples
///
/// ```rust
/// use nacoscfg::ports::ConfigParser;
/// use nacoscfg::domain::Result;
/// use std::collections::HashMap;
///
/// struct KeyValueParser;
///
/// impl ConfigParser for KeyValueParser {
///     fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["properties"]
///     }
/// }
///
/// let values = KeyValueParser.parse("nacos.addr = localhost").unwrap();
/// assert_eq!(values.get("nacos.addr"), Some(&"localhost".to_string()));
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses file content into a flat key-value map.
    ///
    /// Failures should carry
    /// [`ErrorCode::ConfigLoadFailed`](crate::domain::ErrorCode::ConfigLoadFailed).
    fn parse(&self, content: &str) -> Result<HashMap<String, String>>;

    /// Returns the file extensions (without the dot) this parser handles.
    fn supported_extensions(&self) -> &[&str];

    /// Returns `true` if `extension` is handled by this parser, ignoring case.
    fn supports(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

/// Appends `segment` to a dotted key path.
///
/// ```rust
/// use nacoscfg::ports::parser::join_key;
///
/// assert_eq!(join_key("", "nacos"), "nacos");
/// assert_eq!(join_key("nacos", "addr"), "nacos.addr");
/// ```
pub fn join_key(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_owned()
    } else {
        format!("{}.{}", path, segment)
    }
}
