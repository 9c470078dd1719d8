pub mod clock;
pub mod duration;
pub mod schedule;
pub mod status;

pub use clock::{Clock, ClockReading, SystemClock};
pub use duration::format_duration;
pub use schedule::{OpenWindow, ScheduleError, ScheduleRule, WindowSpec};
pub use status::{resolve_status, NextChange, OpenStatus};
