use std::time::Duration;

use insights_client::prelude::{EncodedFilter, InsightsClient, QueryResponse, Session};
use insights_probe_core::prelude::{Clock, ProbeError, ProbeResult, TimeWindow};

use crate::assert::{assert_crash_bound, DEFAULT_CRASH_BOUND};
use crate::progress::PollProgress;

/// Issues one crash count query for a window.
///
/// Implemented for closures so that a poll can be driven by canned responses.
pub trait CrashQuery {
    fn query(&mut self, window: &TimeWindow) -> ProbeResult<QueryResponse>;
}

impl<F> CrashQuery for F
where
    F: FnMut(&TimeWindow) -> ProbeResult<QueryResponse>,
{
    fn query(&mut self, window: &TimeWindow) -> ProbeResult<QueryResponse> {
        self(window)
    }
}

/// Queries the diagnostics backend with an authenticated session and a fixed filter.
#[derive(Debug)]
pub struct DiagnosticsQuery<'a> {
    client: &'a InsightsClient,
    session: &'a Session,
    diag_uri: &'a str,
    filter: &'a EncodedFilter,
}

impl<'a> DiagnosticsQuery<'a> {
    pub fn new(
        client: &'a InsightsClient,
        session: &'a Session,
        diag_uri: &'a str,
        filter: &'a EncodedFilter,
    ) -> Self {
        Self {
            client,
            session,
            diag_uri,
            filter,
        }
    }
}

impl CrashQuery for DiagnosticsQuery<'_> {
    fn query(&mut self, window: &TimeWindow) -> ProbeResult<QueryResponse> {
        self.client
            .query_crash_filter(self.session, self.diag_uri, window, self.filter)
    }
}

/// Timing and threshold for a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// The poll stops once the query window is this wide.
    pub max_duration: Duration,
    /// Sleep between queries.
    pub poll_interval: Duration,
    /// How far before the start of the poll the window begins.
    pub lookback: Duration,
    /// Largest crash count that passes.
    pub crash_bound: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_duration: Duration::from_secs(600),
            poll_interval: Duration::from_secs(60),
            lookback: Duration::from_secs(60),
            crash_bound: DEFAULT_CRASH_BOUND,
        }
    }
}

/// What a completed poll observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// Wall-clock time the poll started at, in Unix seconds.
    pub started_at: i64,
    /// The window used by the last query.
    pub window: TimeWindow,
    /// Number of queries issued.
    pub iterations: usize,
    /// Count from the last response that reported a crash bucket, or 0 if none did.
    pub final_crash_count: u64,
}

/// Re-issues the crash count query over a growing window until the window is as wide as
/// [PollSettings::max_duration].
pub struct WindowPoller<'a, C: Clock> {
    clock: &'a C,
    settings: PollSettings,
    node_id: &'a str,
}

impl<'a, C: Clock> WindowPoller<'a, C> {
    pub fn new(clock: &'a C, settings: PollSettings, node_id: &'a str) -> Self {
        Self {
            clock,
            settings,
            node_id,
        }
    }

    /// Poll until the deadline, checking every response against the crash bound.
    ///
    /// The first failed check or request ends the poll with that error. The time is re-read after
    /// every sleep rather than counting iterations, so slow requests do not shorten the
    /// observation period.
    pub fn poll_for_crash_count<Q: CrashQuery>(
        &self,
        query: &mut Q,
        progress: &PollProgress,
    ) -> ProbeResult<PollOutcome> {
        let started_at = self.clock.now_s();
        let mut window = TimeWindow::anchored(started_at, self.settings.lookback)
            .ok_or_else(|| self.invalid_settings("lookback reaches before the earliest timestamp"))?;
        let max_width = i64::try_from(self.settings.max_duration.as_secs())
            .map_err(|_| self.invalid_settings("max duration is too long"))?;

        log::info!(
            "Polling crash count for {} from {} until {}",
            self.node_id,
            window.from_ts(),
            window.from_ts().saturating_add(max_width)
        );

        let mut crash_count = 0;
        let mut iterations = 0;
        while window.width_s() < max_width {
            iterations += 1;

            let response = query.query(&window)?;
            if response.status != 200 {
                return Err(ProbeError::UnexpectedStatus {
                    node_id: self.node_id.to_string(),
                    status: response.status,
                });
            }

            crash_count = assert_crash_bound(
                &response.body,
                self.node_id,
                self.settings.crash_bound,
                crash_count,
            )?;
            log::debug!("Poll {iterations} over {window} observed {crash_count} crashes");
            progress.set_window_width(window.width_s());

            self.clock.sleep(self.settings.poll_interval);
            window.advance_to(self.clock.now_s());
        }
        progress.finish();

        Ok(PollOutcome {
            started_at,
            window,
            iterations,
            final_crash_count: crash_count,
        })
    }

    fn invalid_settings(&self, reason: &str) -> ProbeError {
        ProbeError::InvalidSettings {
            node_id: self.node_id.to_string(),
            reason: reason.to_string(),
        }
    }
}
