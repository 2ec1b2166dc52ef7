// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests.

use nacoscfg::domain::{EntryKey, ErrorCode, NacosError, Result};
use nacoscfg::ports::{ChangeCallback, ConfigCenter, ConnectParams, Connector};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::{Builder, NamedTempFile};

/// A valid config file with a default entry of `d` / `DEFAULT_GROUP`.
#[allow(dead_code)]
pub const VALID_YAML: &str = "nacos:\n  addr: localhost\n  port: 8848\n  dataid: d\n";

/// Writes `content` to a temp file with the given suffix.
#[allow(dead_code)]
pub fn write_config(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// One recorded call against a [`ScriptedCenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Call {
    Fetch(EntryKey),
    Publish(EntryKey, String),
    Delete(EntryKey),
    Watch(EntryKey),
}

/// A configuration center whose answers are fixed up front.
#[allow(dead_code)]
pub struct ScriptedCenter {
    pub fetch_result: Result<String>,
    pub publish_result: Result<bool>,
    pub delete_result: Result<bool>,
    pub watch_result: Result<()>,
    pub calls: Mutex<Vec<Call>>,
    pub callbacks: Mutex<Vec<ChangeCallback>>,
}

#[allow(dead_code)]
impl ScriptedCenter {
    pub fn succeeding(content: &str) -> Self {
        Self {
            fetch_result: Ok(content.to_string()),
            publish_result: Ok(true),
            delete_result: Ok(true),
            watch_result: Ok(()),
            calls: Mutex::new(Vec::new()),
            callbacks: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(code: ErrorCode) -> Self {
        let err = NacosError::new(code, "scripted failure");
        Self {
            fetch_result: Err(err.clone()),
            publish_result: Err(err.clone()),
            delete_result: Err(err.clone()),
            watch_result: Err(err),
            calls: Mutex::new(Vec::new()),
            callbacks: Mutex::new(Vec::new()),
        }
    }

    pub fn not_applied() -> Self {
        Self {
            publish_result: Ok(false),
            delete_result: Ok(false),
            ..Self::succeeding("")
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Delivers `content` to every registered callback.
    pub fn emit(&self, content: &str) {
        let callbacks = self.callbacks.lock().unwrap().clone();
        for callback in callbacks {
            callback(content.to_string());
        }
    }
}

impl ConfigCenter for ScriptedCenter {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch(&self, entry: &EntryKey) -> Result<String> {
        self.calls.lock().unwrap().push(Call::Fetch(entry.clone()));
        self.fetch_result.clone()
    }

    fn publish(&self, entry: &EntryKey, content: &str) -> Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Publish(entry.clone(), content.to_string()));
        self.publish_result.clone()
    }

    fn delete(&self, entry: &EntryKey) -> Result<bool> {
        self.calls.lock().unwrap().push(Call::Delete(entry.clone()));
        self.delete_result.clone()
    }

    fn watch(&self, entry: &EntryKey, on_change: ChangeCallback) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Watch(entry.clone()));
        if self.watch_result.is_ok() {
            self.callbacks.lock().unwrap().push(on_change);
        }
        self.watch_result.clone()
    }
}

/// A connector that counts connections and hands out one shared center.
#[allow(dead_code)]
pub struct CountingConnector {
    pub center: Arc<ScriptedCenter>,
    pub connects: AtomicUsize,
    pub last_params: Mutex<Option<ConnectParams>>,
    pub fail_with: Option<NacosError>,
}

#[allow(dead_code)]
impl CountingConnector {
    pub fn new(center: Arc<ScriptedCenter>) -> Self {
        Self {
            center,
            connects: AtomicUsize::new(0),
            last_params: Mutex::new(None),
            fail_with: None,
        }
    }

    pub fn failing(err: NacosError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::new(Arc::new(ScriptedCenter::succeeding("")))
        }
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl Connector for CountingConnector {
    fn connect(&self, params: &ConnectParams) -> Result<Arc<dyn ConfigCenter>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock().unwrap() = Some(params.clone());
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let center: Arc<dyn ConfigCenter> = self.center.clone();
        Ok(center)
    }
}
