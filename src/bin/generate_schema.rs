//! Generate JSON Schema for the browse configuration
//!
//! Usage:
//!   cargo run --features dev-bins --bin generate_schema > browse-config-schema.json

use pagedir::config::BrowseConfig;
use schemars::schema_for;

fn main() -> anyhow::Result<()> {
    let schema = schema_for!(BrowseConfig);
    let output = serde_json::to_string_pretty(&schema)?;
    println!("{}", output);
    Ok(())
}
