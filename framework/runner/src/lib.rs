mod assert;
mod cli;
mod context;
mod init;
mod poller;
mod progress;
mod run;
mod types;

pub mod prelude {
    pub use crate::assert::{assert_crash_bound, CountObservation, DEFAULT_CRASH_BOUND};
    pub use crate::cli::ProbeCli;
    pub use crate::context::RunContext;
    pub use crate::init::init;
    pub use crate::poller::{CrashQuery, DiagnosticsQuery, PollOutcome, PollSettings, WindowPoller};
    pub use crate::progress::PollProgress;
    pub use crate::run::{run, run_with_clock};
    pub use crate::types::ProbeRunResult;

    pub use insights_probe_core::prelude::*;
    pub use insights_probe_summary_model::RunSummary;
}
