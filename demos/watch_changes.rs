// SPDX-License-Identifier: MIT OR Apache-2.0

//! Watching configuration changes.
//!
//! This example registers a change callback on the default entry through the
//! process-wide client and publishes a few revisions from another thread.
//!
//! ```bash
//! cargo run --example watch_changes
//! ```

use nacoscfg::prelude::*;
use std::io::Write;
use std::sync::Arc;
use std::thread;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== nacoscfg: Watching Changes ===\n");

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
    writeln!(
        file,
        "nacos:\n  addr: 127.0.0.1\n  port: 8848\n  dataid: feature-flags.yaml"
    )?;
    let path = file.path().to_path_buf();

    nacoscfg::install_connector(Arc::new(MemoryConnector::new()))?;

    let ctx = OpContext::background();
    nacoscfg::watch(
        &path,
        &ctx,
        "",
        "",
        Some(Arc::new(|content: String| {
            if content.is_empty() {
                println!("🔔 entry deleted");
            } else {
                println!("🔔 new content: {}", content);
            }
        })),
    )?;
    println!("Watching feature-flags.yaml / DEFAULT_GROUP\n");

    let publisher_path = path.clone();
    let publisher = thread::spawn(move || -> Result<()> {
        let ctx = OpContext::background();
        for revision in 1..=3 {
            nacoscfg::publish(
                &publisher_path,
                &ctx,
                "",
                "",
                &format!("dark_mode: {}", revision % 2 == 1),
            )?;
        }
        nacoscfg::delete(&publisher_path, &ctx, "", "")
    });

    publisher
        .join()
        .map_err(|_| "publisher thread panicked")??;

    nacoscfg::close()?;
    Ok(())
}
