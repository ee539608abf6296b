use chrono::TimeDelta;

use crate::error::{Error, Result};

/// Minimal granularity of the quantization grid in minutes.
pub const DEFAULT_DURATION_IN_MINUTES: i64 = 15;

/// The configured grid step every availability window is aligned to.
///
/// A unit must be a positive multiple of the 15-minute minimal granularity.
/// It is created once per facade and shared by all operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationUnit {
    minutes: i64,
}

impl DurationUnit {
    pub fn new(minutes: i64) -> Result<Self> {
        if minutes <= 0 {
            return Err(Error::NonPositiveDurationUnit(minutes));
        }
        if minutes % DEFAULT_DURATION_IN_MINUTES != 0 {
            return Err(Error::MisalignedDurationUnit { minutes, granularity: DEFAULT_DURATION_IN_MINUTES });
        }
        Ok(DurationUnit { minutes })
    }

    /// The minimal 15-minute unit.
    pub fn default_unit() -> Self {
        DurationUnit { minutes: DEFAULT_DURATION_IN_MINUTES }
    }

    pub fn value(&self) -> TimeDelta {
        TimeDelta::minutes(self.minutes)
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }
}
