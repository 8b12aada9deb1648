use insights_probe_core::prelude::{ProbeError, ProbeResult};
use serde::Deserialize;

/// Crash count accepted when no bound is configured.
pub const DEFAULT_CRASH_BOUND: u64 = 5;

const CRASH_KEY: &str = "crash";

/// One aggregation bucket from a diagnostics response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountObservation {
    pub key: String,
    pub count: u64,
}

#[derive(Deserialize)]
struct BucketList {
    list: Vec<serde_json::Value>,
}

/// Check the first bucket of a diagnostics response against the crash bound.
///
/// Returns the bucket's count. When the response has no buckets nothing was observed, so
/// `previous` is returned and no check is made. Only the first bucket is read.
pub fn assert_crash_bound(
    body: &str,
    node_id: &str,
    bound: u64,
    previous: u64,
) -> ProbeResult<u64> {
    let parse_err = |source| ProbeError::Parse {
        node_id: node_id.to_string(),
        source,
    };

    let buckets: BucketList = serde_json::from_str(body).map_err(parse_err)?;
    let Some(first) = buckets.list.into_iter().next() else {
        return Ok(previous);
    };
    let observation: CountObservation = serde_json::from_value(first).map_err(parse_err)?;

    if observation.key != CRASH_KEY {
        return Err(ProbeError::UnexpectedKey {
            node_id: node_id.to_string(),
            key: observation.key,
        });
    }

    if observation.count > bound {
        return Err(ProbeError::ThresholdExceeded {
            node_id: node_id.to_string(),
            count: observation.count,
            bound,
        });
    }

    Ok(observation.count)
}
