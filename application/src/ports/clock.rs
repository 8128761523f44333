//! Clock port
//!
//! File names carry the local wall-clock time of the first save; the port
//! lets tests pin it.

use chrono::NaiveDateTime;

pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local timezone
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
