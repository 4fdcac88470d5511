pub mod benchmark;
pub mod stats;
