// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity of a configuration entry.

use std::fmt;

/// A `(data_id, group)` pair naming a configuration entry within a namespace.
///
/// # Examples
///
/// ```
/// use nacoscfg::domain::EntryKey;
///
/// let key = EntryKey::new("app.yaml", "DEFAULT_GROUP");
/// assert_eq!(key.to_string(), "DEFAULT_GROUP/app.yaml");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryKey {
    data_id: String,
    group: String,
}

impl EntryKey {
    /// Creates a key from a data id and a group.
    pub fn new(data_id: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            data_id: data_id.into(),
            group: group.into(),
        }
    }

    /// Returns the data id.
    pub fn data_id(&self) -> &str {
        &self.data_id
    }

    /// Returns the group.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Fills an empty `data_id` or `group` from `defaults`.
    pub fn or_defaults(data_id: &str, group: &str, defaults: &EntryKey) -> Self {
        let data_id = if data_id.is_empty() {
            defaults.data_id.as_str()
        } else {
            data_id
        };
        let group = if group.is_empty() {
            defaults.group.as_str()
        } else {
            group
        };
        Self::new(data_id, group)
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.data_id)
    }
}
