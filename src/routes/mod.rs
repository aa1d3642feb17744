pub mod distribution;
pub mod performance;
pub mod summary;
pub mod trends;
