use insights_probe_core::prelude::TimeWindow;

use crate::filter::EncodedFilter;

/// Status and body of a diagnostics query.
///
/// The status is not checked here. Deciding what a non-200 response means is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub status: u16,
    pub body: String,
}

/// Build the filter suggestion URL that aggregates events matching `filter` by `Type` over
/// `window`.
pub fn crash_query_url(diag_uri: &str, window: &TimeWindow, filter: &EncodedFilter) -> String {
    format!(
        "{diag_uri}/query/filters/suggest?from_ts={from_ts}&to_ts={to_ts}&filters={filter}&fieldname=Type",
        from_ts = window.from_ts(),
        to_ts = window.to_ts(),
    )
}
