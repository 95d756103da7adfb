// Resume analysis: upload validation, pluggable scoring backends and the
// printable report export.

pub mod analyzer;
pub mod handlers;
pub mod report;

pub use analyzer::{AnalyzeError, RandomizedAnalyzer, ResumeAnalyzer, UploadedResume};
pub use report::{report_filename, report_to_resume, AnalysisReport, REPORT_TEMPLATE_ID};
