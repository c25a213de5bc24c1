//! Signflow CLI: sign integers through the hashing pipeline and print the combined result.

use anyhow::Result;
use clap::Parser;
use signflow::engine::Cli;
use signflow::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
