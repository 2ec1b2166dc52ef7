// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the nacoscfg crate.
//!
//! This example demonstrates:
//! - Loading connection parameters from a YAML file
//! - Building the client once through a `ClientCell`
//! - Publishing, fetching and deleting entries
//! - Falling back to the default entry with empty names
//!
//! It runs against the in-memory configuration center, so no server is needed:
//! ```bash
//! cargo run --example basic_usage
//! ```

use nacoscfg::prelude::*;
use std::io::Write;
use std::sync::Arc;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== nacoscfg: Basic Usage ===\n");

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
    writeln!(
        file,
        "nacos:\n  namespace: dev\n  addr: 127.0.0.1\n  port: 8848\n  dataid: app.yaml\n  \
         group: DEFAULT_GROUP"
    )?;

    let config = load_config(file.path())?;
    println!("Loaded config for {}", config.server_url());
    config.validate()?;

    let cell = ClientCell::new(Arc::new(MemoryConnector::new()));
    let client = cell.init(file.path())?;
    println!("Client state: {:?}\n", cell.state());

    let ctx = OpContext::background();

    println!("--- Publish to the default entry ---");
    client.publish(&ctx, "", "", "greeting: hello")?;
    println!("✓ published app.yaml / DEFAULT_GROUP");

    println!("\n--- Fetch with explicit and empty names ---");
    println!("explicit: {}", client.fetch(&ctx, "app.yaml", "DEFAULT_GROUP")?);
    println!("defaults: {}", client.fetch(&ctx, "", "")?);

    println!("\n--- Errors carry a code ---");
    match client.fetch(&ctx, "missing.yaml", "") {
        Ok(content) => println!("unexpected: {}", content),
        Err(e) => println!("✗ {} (code {})", e, e.code()),
    }

    println!("\n--- Delete ---");
    client.delete(&ctx, "", "")?;
    println!("✓ deleted app.yaml / DEFAULT_GROUP");

    client.close()?;
    Ok(())
}
