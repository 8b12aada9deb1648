mod clock;
mod error;
mod window;

pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::error::{ProbeError, ProbeResult};
    pub use crate::window::TimeWindow;
}
