//! Streaming aggregation of trip records into the busiest pickup zones and
//! the busiest (zone, hour-of-day) slots.

pub mod report;
pub mod source;
pub mod trips;
