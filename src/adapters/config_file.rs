// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading [`NacosConfig`] from a local file.
//!
//! The file format is picked from the extension (`.yaml`/`.yml`, `.json`). The
//! parsed document is flattened and its `nacos.*` keys are overlaid onto
//! [`NacosConfig::default`].

use crate::domain::{ErrorCode, NacosConfig, NacosError, Result};
use crate::ports::ConfigParser;
use directories::ProjectDirs;
use std::fs;
use std::path::Path;

/// Maximum allowed size of a configuration file (10MB).
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// File name looked up by [`load_default_config`].
pub const DEFAULT_CONFIG_FILE: &str = "application.yaml";

/// Loads a config from `path`, seeding defaults before overlaying the file.
///
/// The result is not validated; see [`NacosConfig::validate`]. Every failure
/// (missing or unreadable file, unsupported extension, parse or conversion error)
/// carries [`ErrorCode::ConfigLoadFailed`].
///
/// # Examples
///
/// ```rust,no_run
/// use nacoscfg::adapters::load_config;
///
/// let config = load_config("application.yaml").unwrap();
/// println!("{}", config.server_url());
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<NacosConfig> {
    let path = path.as_ref();
    let parser = parser_for(path)?;
    let content = read_file(path)?;
    let values = parser.parse(&content)?;

    let mut config = NacosConfig::default();
    config.apply_values(&values)?;

    tracing::debug!(
        "Loaded nacos config from {} (server {})",
        display_name(path),
        config.server_url()
    );
    Ok(config)
}

/// Loads `application.yaml` from the OS-appropriate configuration directory.
///
/// # Arguments
///
/// * `app_name` - The application name (e.g., "myapp")
/// * `qualifier` - The organization/qualifier (e.g., "com.example")
pub fn load_default_config(app_name: &str, qualifier: &str) -> Result<NacosConfig> {
    let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
        NacosError::new(
            ErrorCode::ConfigLoadFailed,
            "failed to determine project directories",
        )
    })?;

    load_config(proj_dirs.config_dir().join(DEFAULT_CONFIG_FILE))
}

/// Returns the parser registered for the extension of `path`.
pub fn parser_for(path: &Path) -> Result<Box<dyn ConfigParser>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    for parser in available_parsers() {
        if parser.supports(extension) {
            return Ok(parser);
        }
    }

    Err(NacosError::new(
        ErrorCode::ConfigLoadFailed,
        format!(
            "unsupported configuration file type '{}': {}",
            extension,
            display_name(path)
        ),
    ))
}

fn available_parsers() -> Vec<Box<dyn ConfigParser>> {
    #[allow(unused_mut)]
    let mut parsers: Vec<Box<dyn ConfigParser>> = Vec::new();
    #[cfg(feature = "yaml")]
    parsers.push(Box::new(crate::adapters::YamlParser::new()));
    #[cfg(feature = "json")]
    parsers.push(Box::new(crate::adapters::JsonParser::new()));
    parsers
}

fn read_file(path: &Path) -> Result<String> {
    let canonical_path = path.canonicalize().map_err(|e| {
        NacosError::with_cause(
            ErrorCode::ConfigLoadFailed,
            format!("invalid or inaccessible path: {}", display_name(path)),
            e,
        )
    })?;

    let metadata = fs::metadata(&canonical_path).map_err(|e| {
        NacosError::with_cause(
            ErrorCode::ConfigLoadFailed,
            format!("failed to read file metadata: {}", display_name(path)),
            e,
        )
    })?;

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(NacosError::new(
            ErrorCode::ConfigLoadFailed,
            format!(
                "configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        ));
    }

    fs::read_to_string(&canonical_path).map_err(|e| {
        NacosError::with_cause(
            ErrorCode::ConfigLoadFailed,
            format!("failed to read configuration file: {}", display_name(path)),
            e,
        )
    })
}

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}
