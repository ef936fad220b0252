//! Validation and aggregation engine.
//! Depends on the domain models only; file access stays in the report manager.

pub mod category_index;
pub mod report_manager;
pub mod services;

pub use category_index::CategoryIndex;
pub use report_manager::{ConvertRequest, ReportManager, RunOutcome};
