// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the process-wide client.
//!
//! The process-wide client can be initialized once per process, and each file
//! under tests/ is its own process, so everything runs in a single test.

mod common;

use common::{write_config, VALID_YAML};
use nacoscfg::adapters::{MemoryConfigCenter, MemoryConnector};
use nacoscfg::domain::{EntryKey, ErrorCode, OpContext};
use nacoscfg::ports::ConfigCenter;
use nacoscfg::service::ClientState;
use std::sync::{Arc, Mutex};

#[test]
fn test_process_wide_client() {
    let file = write_config(".yaml", VALID_YAML);
    let ctx = OpContext::background();

    // nothing installed yet
    assert_eq!(nacoscfg::client_state(), ClientState::Uninitialized);
    let err = nacoscfg::init_client(file.path()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ClientNotInit);
    assert!(nacoscfg::close().is_ok());

    let center = Arc::new(MemoryConfigCenter::new(""));
    center
        .publish(&EntryKey::new("d", "DEFAULT_GROUP"), "seeded")
        .unwrap();
    nacoscfg::install_connector(Arc::new(MemoryConnector::shared(center.clone()))).unwrap();

    let second = nacoscfg::install_connector(Arc::new(MemoryConnector::new())).unwrap_err();
    assert_eq!(second.code(), ErrorCode::ClientInitFailed);

    assert_eq!(nacoscfg::fetch_default(file.path()).unwrap(), "seeded");
    assert_eq!(nacoscfg::client_state(), ClientState::Ready);

    let a = nacoscfg::init_client(file.path()).unwrap();
    let b = nacoscfg::get_client("/ignored/after/first.yaml").unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    nacoscfg::watch(
        file.path(),
        &ctx,
        "",
        "",
        Some(Arc::new(move |content: String| {
            seen_clone.lock().unwrap().push(content);
        })),
    )
    .unwrap();

    nacoscfg::publish(file.path(), &ctx, "", "", "updated").unwrap();
    assert_eq!(nacoscfg::fetch(file.path(), &ctx, "d", "").unwrap(), "updated");

    nacoscfg::delete(file.path(), &ctx, "", "").unwrap();
    let err = nacoscfg::fetch(file.path(), &ctx, "", "").unwrap_err();
    assert_eq!(err.code(), ErrorCode::OperationFailed);

    assert_eq!(*seen.lock().unwrap(), vec!["updated", ""]);
    assert!(nacoscfg::close().is_ok());
}
