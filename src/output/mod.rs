//! Report building and rendering

pub mod descriptions;
pub mod formatter;
pub mod report;

pub use descriptions::JobCatalog;
pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::RecommendationReport;
