use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::availability::time_blocks::duration_unit::DurationUnit;
use crate::domain::shared::timeslot::TimeSlot;

/// A time slot whose boundaries lie on the quantization grid.
///
/// The grid is measured in `DurationUnit` steps from the top of the hour. The
/// start is floored to the nearest boundary at or before the input start, and
/// the end is pushed to the nearest boundary at or after the input end, so the
/// normalized slot always fully contains the input. Slots that would fit in a
/// single unit collapse to exactly one unit-length segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizedSlot {
    slot: TimeSlot,
}

impl NormalizedSlot {
    pub fn from_time_slot(time_slot: &TimeSlot, unit: DurationUnit) -> Self {
        let segment_start = normalize_start(time_slot.from, unit);
        let segment_end = normalize_end(segment_start, time_slot.to, unit);
        let normalized = TimeSlot::new(segment_start, segment_end);
        let minimal_segment = TimeSlot::new(segment_start, segment_start + unit.value());
        if normalized.within(&minimal_segment) {
            return NormalizedSlot { slot: minimal_segment };
        }
        NormalizedSlot { slot: normalized }
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.slot.from
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.slot.to
    }
}

impl From<NormalizedSlot> for TimeSlot {
    fn from(normalized: NormalizedSlot) -> Self {
        normalized.slot
    }
}

/// Largest grid boundary at or before `initial_start`.
fn normalize_start(initial_start: DateTime<Utc>, unit: DurationUnit) -> DateTime<Utc> {
    let hour_start = hour_floor(initial_start);
    let unit_ms = unit.value().num_milliseconds();
    let offset_ms = (initial_start - hour_start).num_milliseconds();
    hour_start + TimeDelta::milliseconds(offset_ms / unit_ms * unit_ms)
}

/// Smallest grid boundary at or after `initial_end`.
///
/// The end grid is anchored at the already-normalized start, so
/// re-normalizing an aligned slot is a no-op for every unit, including units
/// that do not divide a whole hour.
fn normalize_end(segment_start: DateTime<Utc>, initial_end: DateTime<Utc>, unit: DurationUnit) -> DateTime<Utc> {
    let unit_ms = unit.value().num_milliseconds();
    let offset_ms = (initial_end - segment_start).num_milliseconds().max(0);
    segment_start + TimeDelta::milliseconds(offset_ms.div_ceil(unit_ms) * unit_ms)
}

fn hour_floor(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let into_hour = TimeDelta::seconds(timestamp.timestamp().rem_euclid(3600)) + TimeDelta::nanoseconds(timestamp.timestamp_subsec_nanos() as i64);
    timestamp - into_hour
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 9, 9, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_has_no_effect_when_slot_already_normalized() {
        let time_slot = TimeSlot::new(at(0, 0), at(1, 0));
        let one_hour = DurationUnit::new(60).unwrap();

        let normalized = NormalizedSlot::from_time_slot(&time_slot, one_hour);

        assert_eq!(*normalized.slot(), time_slot);
    }

    #[test]
    fn test_normalization_to_1_hour() {
        let time_slot = TimeSlot::new(at(0, 10), at(0, 59));
        let one_hour = DurationUnit::new(60).unwrap();

        let normalized = NormalizedSlot::from_time_slot(&time_slot, one_hour);

        assert_eq!(*normalized.slot(), TimeSlot::new(at(0, 0), at(1, 0)));
    }

    #[test]
    fn test_normalized_short_slot_overlapping_two_segments() {
        let time_slot = TimeSlot::new(at(0, 29), at(0, 31));
        let one_hour = DurationUnit::new(60).unwrap();

        let normalized = NormalizedSlot::from_time_slot(&time_slot, one_hour);

        assert_eq!(*normalized.slot(), TimeSlot::new(at(0, 0), at(1, 0)));
    }

    #[test]
    fn test_no_normalization_when_slot_starts_at_segment_start() {
        let fifteen_minutes = DurationUnit::new(15).unwrap();
        for (start, end) in [(at(0, 15), at(0, 30)), (at(0, 30), at(0, 45))] {
            let time_slot = TimeSlot::new(start, end);

            let normalized = NormalizedSlot::from_time_slot(&time_slot, fifteen_minutes);

            assert_eq!(*normalized.slot(), time_slot);
        }
    }

    #[test]
    fn test_misaligned_start_is_pulled_back_to_the_grid() {
        let fifteen_minutes = DurationUnit::new(15).unwrap();
        let time_slot = TimeSlot::new(at(0, 20), at(0, 50));

        let normalized = NormalizedSlot::from_time_slot(&time_slot, fifteen_minutes);

        assert_eq!(*normalized.slot(), TimeSlot::new(at(0, 15), at(1, 0)));
        assert!(time_slot.within(normalized.slot()));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let ninety_minutes = DurationUnit::new(90).unwrap();
        let time_slot = TimeSlot::new(at(0, 10), at(1, 0));

        let once = NormalizedSlot::from_time_slot(&time_slot, ninety_minutes);
        let twice = NormalizedSlot::from_time_slot(once.slot(), ninety_minutes);

        assert_eq!(once, twice);
        assert_eq!(*once.slot(), TimeSlot::new(at(0, 0), at(1, 30)));
    }
}
