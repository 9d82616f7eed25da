//! Serve Command
//!
//! Runs the analysis endpoint until interrupted.

use crate::cli::ui::Output;
use crate::config::Config;
use crate::server;
use crate::types::Result;

pub async fn run(config: &Config) -> Result<()> {
    let out = Output::new();
    out.info(&format!(
        "Serving analysis endpoint on http://{}:{}",
        config.server.host, config.server.port
    ));
    server::serve(config).await?;
    out.success("Server stopped");
    Ok(())
}
