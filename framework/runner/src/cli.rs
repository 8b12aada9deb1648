use std::path::PathBuf;

use clap::Parser;

/// Longest duration, in seconds, that still fits a window of Unix timestamps.
const MAX_WINDOW_S: u64 = i64::MAX as u64;

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
pub struct ProbeCli {
    /// Username to log in with
    #[arg(long, env = "INSIGHTS_USERNAME", default_value = "")]
    pub username: String,

    /// Password to log in with
    #[arg(long, env = "INSIGHTS_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Base URI of the login API, for example `https://api.example.com`
    #[arg(long, env = "INSIGHTS_BASE_URI", value_parser = parse_base_uri)]
    pub base_uri: String,

    /// Base URI of the diagnostics API that serves crash counts
    #[arg(long, env = "INSIGHTS_DIAG_URI", value_parser = parse_base_uri)]
    pub diag_uri: String,

    /// The node whose crash reports are checked
    #[arg(long, env = "INSIGHTS_NODE_ID", default_value = "")]
    pub node_id: String,

    /// Path of the login endpoint, appended to the base URI
    #[arg(long, default_value = "/v1/login")]
    pub endpoint: String,

    /// The number of seconds the crash count is observed for
    #[arg(long, default_value = "600", value_parser = clap::value_parser!(u64).range(..=MAX_WINDOW_S))]
    pub duration: u64,

    /// The number of seconds to wait between crash count queries
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval: u64,

    /// How many seconds before the start of the run the query window begins
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u64).range(..=MAX_WINDOW_S))]
    pub lookback: u64,

    /// The largest crash count that is accepted at any poll
    #[arg(long, default_value = "5")]
    pub crash_bound: u64,

    /// Give up on a single request after this many seconds. Requests wait indefinitely if unset.
    #[arg(long)]
    pub request_timeout: Option<u64>,

    /// Verify the TLS certificates of the backend.
    ///
    /// Test environments usually serve self-signed certificates, so this is off by default.
    #[arg(long, default_value = "false")]
    pub verify_tls: bool,

    /// Do not show a progress bar on the CLI.
    ///
    /// This is recommended for CI/CD environments where the progress bar isn't being looked at by anyone and is just adding noise to the logs.
    #[arg(long, default_value = "false")]
    pub no_progress: bool,

    /// Append a summary of the run to this JSON Lines file
    #[arg(long, env = "RUN_SUMMARY_PATH")]
    pub run_summary: Option<PathBuf>,
}

/// Check that `s` is an absolute http(s) URI and drop any trailing slash, so that paths can be
/// appended to it directly.
fn parse_base_uri(s: &str) -> anyhow::Result<String> {
    let url = url::Url::parse(s)?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Expected an http or https URI but got scheme `{}`", url.scheme());
    }

    Ok(s.trim_end_matches('/').to_string())
}
