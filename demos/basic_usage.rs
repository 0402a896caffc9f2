// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the configuration repository.
//!
//! This example demonstrates:
//! - Loading YAML files into one store, merged and replaced
//! - The difference between `has` and `get`
//! - Setting, removing and reading values with defaults
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use cfgrepo::prelude::*;
use std::fs;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== cfgrepo: Basic Usage ===\n");

    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("app.yaml"), "name: svc\nworkers: 4\n")?;
    fs::write(
        dir.path().join("database.yaml"),
        "primary:\n  host: localhost\n  port: 5432\nreplicas:\n  - host: replica-1\n",
    )?;

    let mut store = ConfigStore::builder().with_base_dir(dir.path()).build()?;

    println!("--- Loading a list of sources (replaces) ---");
    store.set("stale", true);
    store.load(["app.yaml", "database.yaml"])?;
    println!("keys: {:?}", store.keys().collect::<Vec<_>>());

    println!("\n--- has() searches every key at every depth ---");
    for fragment in ["host", "replica", "HOST", "svc"] {
        println!("has({:?}) = {}", fragment, store.has(fragment));
    }

    println!("\n--- get() is an exact top-level lookup ---");
    println!("get(\"host\") = {:?}", store.get("host"));
    println!("database = {}", store.get_or("database", ConfigValue::Null));

    println!("\n--- set / remove ---");
    store
        .set("feature_flags", vec!["beta", "metrics"])
        .remove("app");
    println!(
        "app after remove = {}",
        store.get_or("app", ConfigValue::from("none"))
    );

    println!("\n--- Loading one source (merges) ---");
    store.load("app.yaml")?;
    println!("keys: {:?}", store.keys().collect::<Vec<_>>());

    match store.load("missing.yaml") {
        Ok(()) => println!("unexpected success"),
        Err(e) => println!("\nload failed as expected: {}", e),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
