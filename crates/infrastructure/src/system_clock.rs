use chrono::{DateTime, Utc};

use limitra_application::Clock;

/// System time implementation of the clock port.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
