//! Pure domain models (Category, LedgerTransaction, Dataset, Report).
//! No I/O, no CLI. Only data types and core enums.

pub mod category;
pub mod common;
pub mod dataset;
pub mod report;
pub mod transaction;

pub use category::Category;
pub use common::{Amounted, Direction, Identifiable, NamedEntity};
pub use dataset::Dataset;
pub use report::{Flow, Report, ReportTransaction, Summary};
pub use transaction::LedgerTransaction;
