// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML configuration file parser.

use crate::domain::{ErrorCode, NacosError, Result};
use crate::ports::parser::join_key;
use crate::ports::ConfigParser;
use serde_yaml::Value;
use std::collections::HashMap;

/// Reads `.yaml` and `.yml` files.
///
/// Mappings and sequences are flattened into dotted keys; sequence items are
/// addressed by index. Scalars are rendered as text and `~` becomes an empty
/// string. Tags are ignored.
///
/// # Examples
///
/// ```rust
/// use nacoscfg::adapters::YamlParser;
/// use nacoscfg::ports::ConfigParser;
///
/// let values = YamlParser::new()
///     .parse("nacos:\n  addr: localhost\n  port: 8848")
///     .unwrap();
/// assert_eq!(values.get("nacos.addr"), Some(&"localhost".to_string()));
/// assert_eq!(values.get("nacos.port"), Some(&"8848".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Returns a parser.
    pub fn new() -> Self {
        Self
    }
}

fn flatten(value: &Value, path: &str, out: &mut HashMap<String, String>) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                if key.is_null() {
                    continue;
                }
                // numeric and boolean keys are legal YAML
                if let Some(segment) = scalar_text(key) {
                    flatten(child, &join_key(path, &segment), out);
                }
            }
        }
        Value::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten(child, &join_key(path, &index.to_string()), out);
            }
        }
        Value::Tagged(tagged) => flatten(&tagged.value, path, out),
        scalar => {
            if let Some(text) = scalar_text(scalar) {
                out.insert(path.to_owned(), text);
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
        let document: Value = serde_yaml::from_str(content).map_err(|e| {
            NacosError::with_cause(
                ErrorCode::ConfigLoadFailed,
                "failed to parse YAML",
                e,
            )
        })?;

        let mut values = HashMap::new();
        flatten(&document, "", &mut values);
        Ok(values)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
