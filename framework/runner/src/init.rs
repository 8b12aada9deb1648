use crate::cli::ProbeCli;
use clap::Parser;

/// Initialise the CLI and logging for the probe runner.
pub fn init() -> ProbeCli {
    env_logger::init();

    ProbeCli::parse()
}
