use std::fmt::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressState, ProgressStyle};

/// Displays how much of the planned observation window has been covered.
///
/// The bar is advanced by the poll loop after each query, so no extra thread is involved.
pub struct PollProgress {
    bar: Option<ProgressBar>,
}

impl PollProgress {
    pub fn new(planned_runtime: Duration) -> Self {
        let bar = ProgressBar::new(planned_runtime.as_secs());
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{wide_bar:.cyan/blue}] [{pos}s / {planned_runtime}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("planned_runtime", {
            let planned_s = planned_runtime.as_secs();
            move |_state: &ProgressState, w: &mut dyn Write| {
                if let Err(e) = write_hms(w, planned_s) {
                    log::warn!("Could not write planned runtime: {e}");
                }
            }
        })
        .progress_chars("#>-");
        bar.set_style(style);

        Self { bar: Some(bar) }
    }

    /// No output at all. Recommended for CI where nobody watches the bar.
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    /// Record that the query window now spans `width_s` seconds.
    pub fn set_window_width(&self, width_s: i64) {
        if let Some(bar) = &self.bar {
            bar.set_position(width_s.max(0) as u64);
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Write `total_s` as `HH:MM:SS`.
fn write_hms(w: &mut dyn Write, total_s: u64) -> std::fmt::Result {
    write!(
        w,
        "{:02}:{:02}:{:02}",
        total_s / 3600,
        (total_s % 3600) / 60,
        total_s % 60
    )
}
