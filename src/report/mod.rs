pub mod generator;
pub mod stats;

pub use generator::{generate_report, ReportInput};
pub use stats::{calculate_duration_histogram, format_minutes, PerformanceLevel};
