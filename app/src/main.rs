//! Nebula render graph host.
//!
//! Builds one of the preset graphs, compiles it with the selected strategy
//! and records a number of frames on the dummy device.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p nebula-app -- --preset deferred --compiler optimized --frames 5
//! ```

mod args;
mod host;

use std::process::ExitCode;

use clap::Parser;

use args::Args;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    nebula_graph::profiling::start_profiler();

    let args = Args::parse();
    match host::run(&args) {
        Ok(summary) => {
            log::info!(
                "Recorded {} frames: {} commands ({} barriers), {} images, {} pipelines",
                summary.frames,
                summary.commands,
                summary.barriers,
                summary.images,
                summary.pipelines
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
