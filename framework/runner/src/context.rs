use std::path::{Path, PathBuf};
use std::time::Duration;

use insights_client::prelude::{ClientOptions, Credentials, DEFAULT_LOGIN_ENDPOINT};

use crate::cli::ProbeCli;
use crate::poller::PollSettings;

/// Everything a run needs to know, fixed before the run starts.
#[derive(Debug, Clone)]
pub struct RunContext {
    scenario_name: String,
    credentials: Credentials,
    base_uri: String,
    endpoint: String,
    diag_uri: String,
    node_id: String,
    poll_settings: PollSettings,
    client_options: ClientOptions,
    no_progress: bool,
    run_summary_path: Option<PathBuf>,
}

impl RunContext {
    /// Create a context with default settings. The name of the scenario is recorded in the run
    /// summary; the recommended value is `env!("CARGO_PKG_NAME")`.
    pub fn new(
        scenario_name: &str,
        base_uri: impl Into<String>,
        diag_uri: impl Into<String>,
        node_id: impl Into<String>,
    ) -> Self {
        Self {
            scenario_name: scenario_name.to_string(),
            credentials: Credentials::default(),
            base_uri: base_uri.into(),
            endpoint: DEFAULT_LOGIN_ENDPOINT.to_string(),
            diag_uri: diag_uri.into(),
            node_id: node_id.into(),
            poll_settings: PollSettings::default(),
            client_options: ClientOptions::default(),
            no_progress: false,
            run_summary_path: None,
        }
    }

    pub fn from_cli(scenario_name: &str, cli: ProbeCli) -> Self {
        Self::new(scenario_name, cli.base_uri, cli.diag_uri, cli.node_id)
            .with_credentials(Credentials::new(cli.username, cli.password))
            .with_endpoint(cli.endpoint)
            .with_poll_settings(PollSettings {
                max_duration: Duration::from_secs(cli.duration),
                poll_interval: Duration::from_secs(cli.poll_interval),
                lookback: Duration::from_secs(cli.lookback),
                crash_bound: cli.crash_bound,
            })
            .with_client_options(
                ClientOptions::default()
                    .verify_tls(cli.verify_tls)
                    .request_timeout(cli.request_timeout.map(Duration::from_secs)),
            )
            .with_no_progress(cli.no_progress)
            .with_run_summary_path(cli.run_summary)
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_poll_settings(mut self, poll_settings: PollSettings) -> Self {
        self.poll_settings = poll_settings;
        self
    }

    pub fn with_client_options(mut self, client_options: ClientOptions) -> Self {
        self.client_options = client_options;
        self
    }

    pub fn with_no_progress(mut self, no_progress: bool) -> Self {
        self.no_progress = no_progress;
        self
    }

    pub fn with_run_summary_path(mut self, path: Option<PathBuf>) -> Self {
        self.run_summary_path = path;
        self
    }

    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn diag_uri(&self) -> &str {
        &self.diag_uri
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn poll_settings(&self) -> PollSettings {
        self.poll_settings
    }

    pub fn client_options(&self) -> &ClientOptions {
        &self.client_options
    }

    pub fn no_progress(&self) -> bool {
        self.no_progress
    }

    pub fn run_summary_path(&self) -> Option<&Path> {
        self.run_summary_path.as_deref()
    }
}
