pub mod listing;
pub mod pool;
