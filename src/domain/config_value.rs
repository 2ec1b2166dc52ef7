// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw configuration file values with typed conversions.
//!
//! Config files are flattened into string values before they are overlaid onto a
//! [`NacosConfig`](crate::domain::NacosConfig). `ConfigValue` performs the typed
//! conversions and reports failures as [`ErrorCode::ConfigLoadFailed`] naming the
//! offending key.

use crate::domain::errors::{ErrorCode, NacosError, Result};
use std::fmt;
use std::str::FromStr;

/// A single flattened value read from a configuration file.
///
/// # Examples
///
/// ```
/// use nacoscfg::domain::ConfigValue;
///
/// let value = ConfigValue::from("8848");
/// assert_eq!(value.as_u64("nacos.port").unwrap(), 8848);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ConfigValue {
    raw: String,
}

impl ConfigValue {
    /// The value exactly as it appeared in the file.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Interprets the value as a flag.
    ///
    /// Accepted spellings, ignoring case and surrounding whitespace, are
    /// `true`/`yes`/`on`/`1` and `false`/`no`/`off`/`0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nacoscfg::domain::ConfigValue;
    ///
    /// assert!(ConfigValue::from("yes").as_bool("nacos.not_load_cache").unwrap());
    /// assert!(!ConfigValue::from("off").as_bool("nacos.not_load_cache").unwrap());
    /// ```
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        let flag = self.raw.trim().to_ascii_lowercase();
        if matches!(flag.as_str(), "true" | "yes" | "on" | "1") {
            Ok(true)
        } else if matches!(flag.as_str(), "false" | "no" | "off" | "0") {
            Ok(false)
        } else {
            Err(NacosError::new(
                ErrorCode::ConfigLoadFailed,
                format!("value '{}' for key '{}' is not a boolean", self.raw, key),
            ))
        }
    }

    /// Interprets the value as an unsigned integer, such as a port or timeout.
    pub fn as_u64(&self, key: &str) -> Result<u64> {
        self.parse(key)
    }

    /// Interprets the value as `T`, with `key` named in the error.
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.raw.trim().parse::<T>().map_err(|e| {
            NacosError::with_cause(
                ErrorCode::ConfigLoadFailed,
                format!(
                    "cannot convert value for key '{}' to {}",
                    key,
                    std::any::type_name::<T>()
                ),
                e,
            )
        })
    }
}

impl From<String> for ConfigValue {
    fn from(raw: String) -> Self {
        Self { raw }
    }
}

impl From<&str> for ConfigValue {
    fn from(raw: &str) -> Self {
        Self {
            raw: raw.to_owned(),
        }
    }
}

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.raw
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
