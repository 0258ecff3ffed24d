pub mod period;
pub mod planner;

pub use period::Period;
pub use planner::{plan, InvalidRange, TimeRange, TimeWindow};
