// Job application tracking: submit, group by day, chart the trend.
// All file access goes through `store::RecordStore`.

pub mod form;
pub mod grouping;
pub mod handlers;
pub mod submission;
pub mod trend;
