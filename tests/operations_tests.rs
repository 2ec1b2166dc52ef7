// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for client operations.
//!
//! These tests drive a client built from a config file against a scripted
//! configuration center and check default substitution and error mapping.

mod common;

use common::{write_config, Call, CountingConnector, ScriptedCenter, VALID_YAML};
use nacoscfg::adapters::{MemoryConfigCenter, MemoryConnector};
use nacoscfg::domain::{EntryKey, ErrorCode, NacosConfig, NacosError, OpContext};
use nacoscfg::ports::ChangeCallback;
use nacoscfg::service::{ClientCell, NacosClient};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn client_for(center: ScriptedCenter) -> (Arc<NacosClient>, Arc<ScriptedCenter>) {
    let file = write_config(".yaml", VALID_YAML);
    let center = Arc::new(center);
    let cell = ClientCell::new(Arc::new(CountingConnector::new(center.clone())));
    (cell.init(file.path()).unwrap(), center)
}

fn default_key() -> EntryKey {
    EntryKey::new("d", "DEFAULT_GROUP")
}

#[test]
fn test_fetch_with_empty_names_uses_defaults() {
    let (client, center) = client_for(ScriptedCenter::succeeding("X"));

    let content = client.fetch(&OpContext::background(), "", "").unwrap();

    assert_eq!(content, "X");
    assert_eq!(center.calls(), vec![Call::Fetch(default_key())]);
}

#[test]
fn test_each_name_is_substituted_independently() {
    let (client, center) = client_for(ScriptedCenter::succeeding("X"));
    let ctx = OpContext::background();

    client.fetch(&ctx, "explicit", "").unwrap();
    client.fetch(&ctx, "", "G").unwrap();
    client.fetch(&ctx, "explicit", "G").unwrap();

    assert_eq!(
        center.calls(),
        vec![
            Call::Fetch(EntryKey::new("explicit", "DEFAULT_GROUP")),
            Call::Fetch(EntryKey::new("d", "G")),
            Call::Fetch(EntryKey::new("explicit", "G")),
        ]
    );
}

#[test]
fn test_publish_and_delete_substitute_defaults() {
    let (client, center) = client_for(ScriptedCenter::succeeding(""));
    let ctx = OpContext::background();

    client.publish(&ctx, "", "", "body").unwrap();
    client.delete(&ctx, "", "").unwrap();

    assert_eq!(
        center.calls(),
        vec![
            Call::Publish(default_key(), "body".to_string()),
            Call::Delete(default_key()),
        ]
    );
}

#[test]
fn test_fetch_failure_is_operation_failed() {
    let (client, _center) = client_for(ScriptedCenter::failing(ErrorCode::NetworkTimeout));

    let err = client.fetch(&OpContext::background(), "", "").unwrap_err();

    assert_eq!(err.code(), ErrorCode::OperationFailed);
    assert!(err.to_string().contains("[OPERATION_FAILED]"));
    assert!(err.message().contains("data_id: d"));
    assert!(err.message().contains("group: DEFAULT_GROUP"));
    assert!(!err.is_network_error());

    let cause = err.cause().and_then(|c| c.downcast_ref::<NacosError>());
    assert!(cause.map_or(false, NacosError::is_network_error));
}

#[test]
fn test_publish_not_applied_is_publish_failed() {
    let (client, _center) = client_for(ScriptedCenter::not_applied());

    let err = client
        .publish(&OpContext::background(), "", "", "body")
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::PublishFailed);
    assert!(err.cause().is_none());
}

#[test]
fn test_publish_error_is_publish_failed() {
    let (client, _center) = client_for(ScriptedCenter::failing(ErrorCode::ServerUnavailable));

    let err = client
        .publish(&OpContext::background(), "", "", "body")
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::PublishFailed);
    assert!(err.cause().is_some());
}

#[test]
fn test_delete_not_applied_is_delete_failed() {
    let (client, _center) = client_for(ScriptedCenter::not_applied());
    let err = client.delete(&OpContext::background(), "", "").unwrap_err();
    assert_eq!(err.code(), ErrorCode::DeleteFailed);
}

#[test]
fn test_delete_error_is_delete_failed() {
    let (client, _center) = client_for(ScriptedCenter::failing(ErrorCode::ServerUnavailable));
    let err = client.delete(&OpContext::background(), "x", "y").unwrap_err();
    assert_eq!(err.code(), ErrorCode::DeleteFailed);
    assert!(err.message().contains("data_id: x"));
}

#[test]
fn test_watch_failure_is_listen_failed() {
    let (client, _center) = client_for(ScriptedCenter::failing(ErrorCode::ClientConnection));
    let err = client
        .watch(&OpContext::background(), "", "", None)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ListenFailed);
}

#[test]
fn test_watch_forwards_in_delivery_order() {
    let (client, center) = client_for(ScriptedCenter::succeeding(""));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let on_change: ChangeCallback = Arc::new(move |content: String| {
        seen_clone.lock().unwrap().push(content);
    });

    client
        .watch(&OpContext::background(), "", "", Some(on_change))
        .unwrap();
    center.emit("v1");
    center.emit("v1");
    center.emit("v2");

    assert_eq!(center.calls(), vec![Call::Watch(default_key())]);
    assert_eq!(*seen.lock().unwrap(), vec!["v1", "v1", "v2"]);
}

#[test]
fn test_watch_without_callback_drops_silently() {
    let (client, center) = client_for(ScriptedCenter::succeeding(""));
    client
        .watch(&OpContext::background(), "", "", None)
        .unwrap();
    center.emit("ignored");
    assert_eq!(center.callbacks.lock().unwrap().len(), 1);
}

#[test]
fn test_unbound_client_is_not_initialized() {
    let client = NacosClient::unbound(NacosConfig::default());
    let ctx = OpContext::background();

    let errors = [
        client.fetch(&ctx, "", "").unwrap_err(),
        client.publish(&ctx, "", "", "x").unwrap_err(),
        client.delete(&ctx, "", "").unwrap_err(),
        client.watch(&ctx, "", "", None).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.code(), ErrorCode::ClientNotInit);
        assert!(err.is_client_error());
    }
}

#[test]
fn test_cancelled_context_skips_remote_call() {
    let (client, center) = client_for(ScriptedCenter::succeeding("X"));
    let ctx = OpContext::background();
    ctx.cancel();

    let err = client.fetch(&ctx, "", "").unwrap_err();

    assert_eq!(err.code(), ErrorCode::OperationFailed);
    assert!(center.calls().is_empty());
}

#[test]
fn test_expired_deadline_skips_remote_call() {
    let (client, center) = client_for(ScriptedCenter::succeeding("X"));
    let past = Instant::now()
        .checked_sub(Duration::from_millis(10))
        .unwrap_or_else(Instant::now);
    let ctx = OpContext::with_deadline(past);

    assert!(client.publish(&ctx, "", "", "x").is_err());
    assert!(center.calls().is_empty());

    let generous = OpContext::with_timeout(Duration::from_secs(60));
    assert_eq!(client.fetch(&generous, "", "").unwrap(), "X");
}

#[test]
fn test_callback_may_reenter_client() {
    let file = write_config(".yaml", VALID_YAML);
    let center = Arc::new(MemoryConfigCenter::new(""));
    let cell = ClientCell::new(Arc::new(MemoryConnector::shared(center)));
    let client = cell.init(file.path()).unwrap();
    let ctx = OpContext::background();

    let observed = Arc::new(Mutex::new(None));
    let observed_clone = Arc::clone(&observed);
    let client_clone = Arc::clone(&client);
    client
        .watch(
            &ctx,
            "",
            "",
            Some(Arc::new(move |_content: String| {
                let fetched = client_clone.fetch(&OpContext::background(), "", "").ok();
                *observed_clone.lock().unwrap() = fetched;
            })),
        )
        .unwrap();

    client.publish(&ctx, "", "", "v1").unwrap();

    assert_eq!(observed.lock().unwrap().as_deref(), Some("v1"));
}

#[test]
fn test_close_always_succeeds_and_client_stays_usable() {
    let (client, _center) = client_for(ScriptedCenter::succeeding("X"));
    assert!(client.close().is_ok());
    assert!(client.close().is_ok());
    assert_eq!(client.fetch(&OpContext::background(), "", "").unwrap(), "X");
}

#[test]
fn test_reads_never_observe_half_updated_defaults() {
    let (client, center) = client_for(ScriptedCenter::succeeding("X"));
    client.set_default_entry("a", "A").unwrap();

    let writer = {
        let client = Arc::clone(&client);
        std::thread::spawn(move || {
            for i in 0..500 {
                let (data_id, group) = if i % 2 == 0 { ("b", "B") } else { ("a", "A") };
                client.set_default_entry(data_id, group).unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            std::thread::spawn(move || {
                let ctx = OpContext::background();
                for _ in 0..250 {
                    assert_eq!(client.fetch(&ctx, "", "").unwrap(), "X");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    let calls = center.calls();
    assert_eq!(calls.len(), 1000);
    for call in calls {
        match call {
            Call::Fetch(key) => assert!(
                key == EntryKey::new("a", "A") || key == EntryKey::new("b", "B"),
                "mixed default entry {}",
                key
            ),
            other => panic!("unexpected call {:?}", other),
        }
    }
}
