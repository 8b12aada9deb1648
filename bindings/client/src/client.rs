use std::time::Duration;

use insights_probe_core::prelude::{ProbeError, ProbeResult, TimeWindow};
use ureq::tls::TlsConfig;

use crate::auth::{parse_login_response, Credentials, Session};
use crate::diagnostics::{crash_query_url, QueryResponse};
use crate::filter::EncodedFilter;

/// Transport settings shared by every request the client makes.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Verify the server's TLS certificate. Test backends commonly use self-signed certificates,
    /// so this is off unless asked for.
    pub verify_tls: bool,
    /// Upper bound on a single request, from connect to the end of the body. `None` waits
    /// indefinitely.
    pub request_timeout: Option<Duration>,
}

impl ClientOptions {
    /// Builds [`ClientOptions`] with TLS verification turned on or off.
    pub fn verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    /// Builds [`ClientOptions`] with the specified per-request timeout.
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Blocking client for the Insights login and diagnostics APIs.
///
/// Cookies are never stored, so every request is authenticated only by the headers it carries.
#[derive(Clone)]
pub struct InsightsClient {
    agent: ureq::Agent,
}

impl std::fmt::Debug for InsightsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightsClient").finish()
    }
}

impl InsightsClient {
    pub fn new(options: ClientOptions) -> Self {
        if !options.verify_tls {
            log::warn!("TLS certificate verification is disabled");
        }

        let agent = ureq::config::Config::builder()
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(!options.verify_tls)
                    .build(),
            )
            // Status codes are checked by the caller
            .http_status_as_error(false)
            .timeout_global(options.request_timeout)
            .build()
            .new_agent();

        Self { agent }
    }

    /// Exchange `credentials` for a [Session] by posting them to `{base_uri}{endpoint}`.
    pub fn login(
        &self,
        base_uri: &str,
        endpoint: &str,
        credentials: &Credentials,
    ) -> ProbeResult<Session> {
        let uri = format!("{base_uri}{endpoint}");
        let body = serde_json::to_string(credentials).map_err(|e| ProbeError::Auth {
            reason: format!("could not encode credentials: {e}"),
        })?;

        log::debug!("Logging in as '{}' at {uri}", credentials.username);
        let mut response = self
            .agent
            .post(&uri)
            .header("content-type", "application/json")
            .send(body)
            .map_err(|e| ProbeError::transport(&uri, e))?;

        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ProbeError::transport(&uri, e))?;

        if !status.is_success() {
            return Err(ProbeError::Auth {
                reason: format!("login at {uri} returned status {}", status.as_u16()),
            });
        }

        parse_login_response(&body).map_err(|reason| ProbeError::Auth { reason })
    }

    /// Query the crash bucket counts for `filter` over `window`.
    pub fn query_crash_filter(
        &self,
        session: &Session,
        diag_uri: &str,
        window: &TimeWindow,
        filter: &EncodedFilter,
    ) -> ProbeResult<QueryResponse> {
        let uri = crash_query_url(diag_uri, window, filter);

        log::debug!("Querying crash count for window {window}");
        let mut response = self
            .agent
            .get(&uri)
            .header("Authorization", session.access_token())
            .call()
            .map_err(|e| ProbeError::transport(&uri, e))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ProbeError::transport(&uri, e))?;
        log::trace!("Diagnostics response [{status}]: {body}");

        Ok(QueryResponse { status, body })
    }
}
