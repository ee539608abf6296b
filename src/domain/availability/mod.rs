pub mod blockade;
pub mod calendar;
pub mod events;
pub mod facade;
pub mod grouped_resource_availability;
pub mod owner;
pub mod repository;
pub mod resource_availability;
pub mod time_blocks;
