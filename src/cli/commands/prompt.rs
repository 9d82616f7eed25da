//! Prompt Command
//!
//! Prints the prompt that would be sent for a request, without calling out.

use std::path::Path;

use crate::ai::{SYSTEM_INSTRUCTION, render_analysis_prompt};
use crate::cli::ui::Output;
use crate::cli::util::load_request;
use crate::types::Result;

pub fn run(input: &Path, with_system: bool) -> Result<()> {
    let request = load_request(input)?;
    let out = Output::new();

    out.rule();
    println!("LLM에 전송할 프롬프트:");
    out.rule();
    if with_system {
        println!("[system] {}\n", SYSTEM_INSTRUCTION);
    }
    println!("{}", render_analysis_prompt(&request));
    out.rule();

    Ok(())
}
