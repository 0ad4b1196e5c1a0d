pub mod search;
pub mod trend;
