//! Example: create, update and delete an ABAP program
//!
//! Reads the connection from `.env`, the environment or an
//! `adtkit.toml`/`config.toml` file:
//!
//! ```bash
//! export SAP_URL=https://sap.example.com:44300
//! export SAP_USERNAME=DEVELOPER
//! export SAP_PASSWORD=...
//! export SAP_CLIENT=100
//! cargo run --example create_program -- Z_ADTKIT_DEMO '$TMP'
//! ```

use std::sync::Arc;

use adtkit_core::{AdtConnection, CreateOptions, UpdateOptions};
use adtkit_domain::{CheckVersion, ProgramConfig};
use adtkit_infra::{config, init_tracing, AdtProgram, HttpAdtConnection};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = config::load()?;
    init_tracing(&settings.logging)?;

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "Z_ADTKIT_DEMO".to_string());
    let package = args.next().unwrap_or_else(|| "$TMP".to_string());

    let connection: Arc<dyn AdtConnection> =
        Arc::new(HttpAdtConnection::new(settings.connection.clone())?);
    connection.connect().await?;

    let program = ProgramConfig::new(&name, &package, "Created by adtkit")
        .with_source(format!("REPORT {name}.\n\nWRITE: / 'Hello from adtkit'.\n"));
    let adapter = AdtProgram::for_connection(connection.clone());

    let options = CreateOptions::from(&settings.lifecycle)
        .on_lock(|handle| println!("locked with handle {handle}"));
    let state = adapter.create(&program, &options).await?;
    println!("created {name}: {} steps", state.completed.len());

    let program = program.with_source(format!(
        "REPORT {name}.\n\nWRITE: / 'Hello again from adtkit'.\n"
    ));
    adapter.update(&program, &UpdateOptions::from(&settings.lifecycle)).await?;
    println!("{}", adapter.read_source(&program, CheckVersion::Active).await?);

    adapter.delete(&program).await?;
    println!("deleted {name}");
    Ok(())
}
