pub mod availability;
pub mod shared;
