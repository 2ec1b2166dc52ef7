// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON configuration file parser.

use crate::domain::{ErrorCode, NacosError, Result};
use crate::ports::parser::join_key;
use crate::ports::ConfigParser;
use serde_json::Value;
use std::collections::HashMap;

/// JSON parser implementation.
///
/// Flattens nested objects and arrays into dot notation keys, the same way
/// [`YamlParser`](crate::adapters::YamlParser) does.
///
/// # Examples
///
/// ```rust
/// use nacoscfg::adapters::JsonParser;
/// use nacoscfg::ports::ConfigParser;
///
/// let result = JsonParser::new()
///     .parse(r#"{"nacos": {"addr": "localhost", "port": 8848}}"#)
///     .unwrap();
/// assert_eq!(result.get("nacos.port"), Some(&"8848".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Returns a parser.
    pub fn new() -> Self {
        Self
    }
}

fn flatten(value: &Value, path: &str, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(child, &join_key(path, key), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten(child, &join_key(path, &index.to_string()), out);
            }
        }
        Value::String(s) => {
            out.insert(path.to_owned(), s.clone());
        }
        Value::Null => {
            out.insert(path.to_owned(), String::new());
        }
        // numbers and booleans keep their JSON spelling
        scalar => {
            out.insert(path.to_owned(), scalar.to_string());
        }
    }
}

impl ConfigParser for JsonParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
        let document: Value = serde_json::from_str(content).map_err(|e| {
            NacosError::with_cause(
                ErrorCode::ConfigLoadFailed,
                "failed to parse JSON",
                e,
            )
        })?;

        let mut values = HashMap::new();
        flatten(&document, "", &mut values);
        Ok(values)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}
