pub mod conversion_service;
pub mod flow_service;
pub mod merge_service;
pub mod repair_service;
pub mod summary_service;
pub mod transaction_service;
pub mod validation_service;

pub use conversion_service::{convert, ConversionService};
pub use flow_service::FlowService;
pub use merge_service::MergeService;
pub use repair_service::RepairService;
pub use summary_service::{LedgerSides, SummaryService};
pub use transaction_service::TransactionService;
pub use validation_service::{validate, ValidationService, ValidationWarning};
