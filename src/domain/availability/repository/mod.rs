pub mod availability_repository;
pub mod in_memory;
pub mod read_model;
