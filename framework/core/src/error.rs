/// Result type for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Every way a verification run can fail.
///
/// None of these are recoverable. The first error returned ends the run and is reported to
/// the caller. Variants raised while polling carry the node id so that failures from a batch of
/// devices can be told apart.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Login did not produce a usable access token.
    #[error("Authentication failed: {reason}")]
    Auth { reason: String },

    /// The request could not be completed at the network level.
    #[error("Request to {uri} failed: {source}")]
    Transport {
        uri: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The diagnostics query returned something other than `200 OK`.
    #[error("Unexpected status code {status} for {node_id}")]
    UnexpectedStatus { node_id: String, status: u16 },

    /// The first bucket of the diagnostics response was not the crash bucket.
    #[error("Expected bucket key `crash` for {node_id} but found `{key}`")]
    UnexpectedKey { node_id: String, key: String },

    /// The backend reported more crashes than allowed.
    #[error("Crash count {count} exceeds the bound of {bound} for {node_id}")]
    ThresholdExceeded {
        node_id: String,
        count: u64,
        bound: u64,
    },

    /// The diagnostics response body could not be read as a bucket list.
    #[error("Malformed diagnostics response for {node_id}: {source}")]
    Parse {
        node_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// A duration in the poll settings cannot be represented as a window of Unix seconds.
    #[error("Invalid poll settings for {node_id}: {reason}")]
    InvalidSettings { node_id: String, reason: String },
}

impl ProbeError {
    /// Wrap a transport level failure for the request sent to `uri`.
    pub fn transport<E>(uri: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            uri: uri.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error is a failed check on the data reported by the backend, as opposed to
    /// a problem reaching or talking to the backend.
    pub fn is_assertion_failure(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedStatus { .. } | Self::UnexpectedKey { .. } | Self::ThresholdExceeded { .. }
        )
    }
}
