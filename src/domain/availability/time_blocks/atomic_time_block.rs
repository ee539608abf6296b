use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::availability::time_blocks::duration_unit::DurationUnit;
use crate::domain::availability::time_blocks::normalized_slot::NormalizedSlot;
use crate::domain::shared::timeslot::TimeSlot;

/// The smallest indivisible reservation interval.
///
/// A block is grid-aligned and exactly one `DurationUnit` long, except
/// possibly the last block of a split, whose end is clamped to the source
/// slot's end. Equality and ordering are by the block's boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AtomicTimeBlock {
    slot: TimeSlot,
}

impl AtomicTimeBlock {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        AtomicTimeBlock { slot: TimeSlot::new(from, to) }
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

    /// Normalizes `time_slot` to the grid and divides it into atomic blocks.
    ///
    /// # Returns
    /// Blocks that tile the normalized slot exactly, with no gaps or overlaps.
    pub fn split(time_slot: &TimeSlot, unit: DurationUnit) -> Vec<AtomicTimeBlock> {
        let normalized = NormalizedSlot::from_time_slot(time_slot, unit);
        AtomicTimeBlock::from_normalized(&normalized, unit)
    }

    /// Divides an already-normalized slot without re-normalizing it.
    pub fn from_normalized(time_slot: &NormalizedSlot, unit: DurationUnit) -> Vec<AtomicTimeBlock> {
        let minimal_segment = AtomicTimeBlock::new(time_slot.start(), time_slot.start() + unit.value());
        if time_slot.slot().within(minimal_segment.slot()) {
            return vec![minimal_segment];
        }

        let unit_ms = unit.value().num_milliseconds();
        let number_of_segments = time_slot.slot().duration().num_milliseconds().div_ceil(unit_ms);

        let mut result = Vec::with_capacity(number_of_segments as usize);
        let mut current_start = time_slot.start();
        for _ in 0..number_of_segments {
            let current_end = (current_start + unit.value()).min(time_slot.end());
            result.push(AtomicTimeBlock::new(current_start, current_end));
            current_start += unit.value();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 9, 9, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_splitting_to_segments_when_there_is_no_leftover() {
        let time_slot = TimeSlot::new(at(0, 0), at(1, 0));

        let blocks = AtomicTimeBlock::split(&time_slot, DurationUnit::new(15).unwrap());

        assert_eq!(
            blocks,
            vec![
                AtomicTimeBlock::new(at(0, 0), at(0, 15)),
                AtomicTimeBlock::new(at(0, 15), at(0, 30)),
                AtomicTimeBlock::new(at(0, 30), at(0, 45)),
                AtomicTimeBlock::new(at(0, 45), at(1, 0)),
            ]
        );
    }

    #[test]
    fn test_splitting_normalizes_if_chosen_segment_larger_than_passed_slot() {
        let time_slot = TimeSlot::new(at(0, 10), at(1, 0));

        let blocks = AtomicTimeBlock::split(&time_slot, DurationUnit::new(90).unwrap());

        assert_eq!(blocks, vec![AtomicTimeBlock::new(at(0, 0), at(1, 30))]);
    }

    #[test]
    fn test_slots_are_normalized_before_splitting() {
        let time_slot = TimeSlot::new(at(0, 10), at(0, 59));

        let blocks = AtomicTimeBlock::split(&time_slot, DurationUnit::new(60).unwrap());

        assert_eq!(blocks, vec![AtomicTimeBlock::new(at(0, 0), at(1, 0))]);
    }

    #[test]
    fn test_splitting_into_segments_without_normalization() {
        let normalized = NormalizedSlot::from_time_slot(&TimeSlot::new(at(0, 0), at(1, 0)), DurationUnit::new(30).unwrap());

        let blocks = AtomicTimeBlock::from_normalized(&normalized, DurationUnit::new(30).unwrap());

        assert_eq!(blocks, vec![AtomicTimeBlock::new(at(0, 0), at(0, 30)), AtomicTimeBlock::new(at(0, 30), at(1, 0))]);
    }

    #[test]
    fn test_split_after_normalize_tiles_the_normalized_slot() {
        let unit = DurationUnit::new(15).unwrap();
        let time_slot = TimeSlot::new(at(0, 20), at(2, 50));
        let normalized = NormalizedSlot::from_time_slot(&time_slot, unit);

        let blocks = AtomicTimeBlock::from_normalized(&normalized, unit);

        assert_eq!(blocks.first().unwrap().start(), normalized.start());
        assert_eq!(blocks.last().unwrap().end(), normalized.end());
        for pair in blocks.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        for block in &blocks {
            assert!(block.slot().duration() <= unit.value());
        }
    }
}
