//! Schema Command
//!
//! Prints the result schema enforced on provider output.

use crate::ai::analysis_schema;
use crate::types::Result;

pub fn run() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(analysis_schema())?);
    Ok(())
}
