use anyhow::Context;
use insights_client::prelude::{build_crash_filter, InsightsClient};
use insights_probe_core::prelude::{Clock, SystemClock};
use insights_probe_summary_model::{append_run_summary, RunSummary};

use crate::context::RunContext;
use crate::poller::{DiagnosticsQuery, WindowPoller};
use crate::progress::PollProgress;
use crate::types::ProbeRunResult;

/// Log in, then poll the crash count for the configured node until the run duration has elapsed.
///
/// Returns the summary of a run in which every poll passed. Any failure ends the run and is
/// returned as the error.
pub fn run(context: &RunContext) -> ProbeRunResult<RunSummary> {
    run_with_clock(context, &SystemClock)
}

/// [run] with time read from, and sleeps delegated to, `clock`.
pub fn run_with_clock<C: Clock>(context: &RunContext, clock: &C) -> ProbeRunResult<RunSummary> {
    log::info!(
        "Running scenario: {} for node {}",
        context.scenario_name(),
        context.node_id()
    );

    let client = InsightsClient::new(context.client_options().clone());
    let session = client
        .login(
            context.base_uri(),
            context.endpoint(),
            context.credentials(),
        )
        .with_context(|| format!("Failed to log in for {}", context.node_id()))?;
    log::info!("Logged in to {}", context.base_uri());

    let filter = build_crash_filter(context.node_id());
    let mut query = DiagnosticsQuery::new(&client, &session, context.diag_uri(), &filter);

    let poll_settings = context.poll_settings();
    let progress = if context.no_progress() {
        PollProgress::hidden()
    } else {
        PollProgress::new(poll_settings.max_duration)
    };

    let outcome = WindowPoller::new(clock, poll_settings, context.node_id())
        .poll_for_crash_count(&mut query, &progress)
        .inspect_err(|e| {
            progress.finish();
            if e.is_assertion_failure() {
                log::error!("Crash check failed for {}: {e}", context.node_id());
            } else {
                log::warn!("Could not finish polling for {}: {e}", context.node_id());
            }
        })?;

    log::info!(
        "Final crash count for {} after {} polls is {}",
        context.node_id(),
        outcome.iterations,
        outcome.final_crash_count
    );

    let summary = RunSummary {
        run_id: nanoid::nanoid!(),
        scenario_name: context.scenario_name().to_string(),
        node_id: context.node_id().to_string(),
        started_at: outcome.started_at,
        from_ts: outcome.window.from_ts(),
        to_ts: outcome.window.to_ts(),
        run_duration: poll_settings.max_duration.as_secs(),
        poll_interval: poll_settings.poll_interval.as_secs(),
        crash_bound: poll_settings.crash_bound,
        iterations: outcome.iterations,
        final_crash_count: outcome.final_crash_count,
        probe_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    if let Some(path) = context.run_summary_path() {
        append_run_summary(&summary, path).with_context(|| {
            format!("Failed to write run summary to {}", path.display())
        })?;
        log::debug!("Appended run summary to {}", path.display());
    }

    Ok(summary)
}
