pub mod atomic_time_block;
pub mod duration_unit;
pub mod normalized_slot;
