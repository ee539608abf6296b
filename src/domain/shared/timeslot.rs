use chrono::{DateTime, Months, TimeDelta, TimeZone, Utc};
use serde::Serialize;

/// A half-open time interval `[from, to)` in UTC.
///
/// This is the value type every operation of the engine speaks: callers
/// request windows as `TimeSlot`s, the quantizer aligns them, and the calendar
/// read model hands merged `TimeSlot`s back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeSlot {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        TimeSlot { from, to }
    }

    /// The whole UTC calendar day `[00:00, next day 00:00)`.
    pub fn create_daily_time_slot_at_utc(year: i32, month: u32, day: u32) -> Self {
        let from = Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single().expect("valid UTC calendar day");
        TimeSlot::new(from, from + TimeDelta::days(1))
    }

    /// The whole UTC calendar month `[1st 00:00, 1st of next month 00:00)`.
    pub fn create_monthly_time_slot_at_utc(year: i32, month: u32) -> Self {
        let from = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single().expect("valid UTC calendar month");
        let to = from.checked_add_months(Months::new(1)).expect("in-range month");
        TimeSlot::new(from, to)
    }

    pub fn duration(&self) -> TimeDelta {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// True if `self` lies entirely inside `other`.
    pub fn within(&self, other: &TimeSlot) -> bool {
        !(self.from < other.from) && !(self.to > other.to)
    }

    /// True if the slots share at least a common boundary point.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.from <= other.to && self.to >= other.from
    }

    pub fn common_part_with(&self, other: &TimeSlot) -> TimeSlot {
        if !self.overlaps(other) {
            return TimeSlot::new(self.from, self.from);
        }
        TimeSlot::new(self.from.max(other.from), self.to.min(other.to))
    }

    /// The parts of the union of both slots that are not shared by both.
    ///
    /// # Returns
    /// An empty vector for identical slots, both slots unchanged when they do
    /// not overlap, and otherwise up to two leftover sub-intervals.
    pub fn leftover_after_removing_common_with(&self, other: &TimeSlot) -> Vec<TimeSlot> {
        let mut result = Vec::new();
        if self == other {
            return result;
        }
        if !other.overlaps(self) {
            return vec![*self, *other];
        }
        if self.from < other.from {
            result.push(TimeSlot::new(self.from, other.from));
        } else if other.from < self.from {
            result.push(TimeSlot::new(other.from, self.from));
        }
        if self.to > other.to {
            result.push(TimeSlot::new(other.to, self.to));
        } else if other.to > self.to {
            result.push(TimeSlot::new(self.to, other.to));
        }
        result
    }

    pub fn stretch(&self, duration: TimeDelta) -> TimeSlot {
        TimeSlot::new(self.from - duration, self.to + duration)
    }
}
