//! Wall-clock source for the scheduler

use chrono::{DateTime, Local};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// [`Clock`] reading the system wall clock in local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
