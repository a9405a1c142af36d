pub mod charts;
pub mod dashboard;
