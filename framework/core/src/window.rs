use std::time::Duration;

/// The `[from_ts, to_ts]` range, in Unix seconds, that a crash count query covers.
///
/// The lower bound is fixed when the window is anchored. Only the upper bound moves, so the window
/// grows with every poll rather than sliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("[{from_ts}, {to_ts}]")]
pub struct TimeWindow {
    from_ts: i64,
    to_ts: i64,
}

impl TimeWindow {
    /// Anchor a window that starts `lookback` before `now_s` and ends at `now_s`.
    ///
    /// Returns `None` if the start of the window is not a valid Unix timestamp.
    pub fn anchored(now_s: i64, lookback: Duration) -> Option<Self> {
        let lookback = i64::try_from(lookback.as_secs()).ok()?;
        Some(Self {
            from_ts: now_s.checked_sub(lookback)?,
            to_ts: now_s,
        })
    }

    pub fn from_ts(&self) -> i64 {
        self.from_ts
    }

    pub fn to_ts(&self) -> i64 {
        self.to_ts
    }

    /// Seconds covered by the window.
    pub fn width_s(&self) -> i64 {
        self.to_ts.saturating_sub(self.from_ts)
    }

    /// Move the upper bound to `now_s`.
    ///
    /// The upper bound never moves backwards, even if the wall clock does.
    pub fn advance_to(&mut self, now_s: i64) {
        self.to_ts = self.to_ts.max(now_s);
    }
}
