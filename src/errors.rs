use std::path::PathBuf;

use thiserror::Error;

/// Input defects that make a dataset impossible to validate further.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StructuralError {
    #[error("year must be a number")]
    YearNotNumeric,
    #[error("year must be an integer: {0}")]
    YearNotInteger(String),
    #[error("categories and transactions are required")]
    MissingCollections,
    #[error("{0} must be an array")]
    NotAnArray(&'static str),
    #[error("category must have a name and a direction: {0}")]
    IncompleteCategory(String),
    #[error("category direction must be income or expense: {0}")]
    InvalidDirection(String),
    #[error("category `{0}` must exist")]
    MissingSeedCategory(String),
    #[error("category id and parent are identical. category.id: {0}")]
    SelfParent(String),
    #[error("input page {0} must be a JSON object")]
    PageNotAnObject(usize),
}

/// Failures raised while rolling up a dataset whose warnings were waived.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AggregationError {
    #[error("parent `{parent}` of category `{category_id}` does not resolve to a category")]
    UnresolvedParent { category_id: String, parent: String },
    #[error("parent chain of category `{category_id}` never reaches the root")]
    ParentCycle { category_id: String },
    #[error("category `{0}` is required to compute the balance")]
    MissingCarryOutCategory(String),
    #[error("category `{0}` has no transaction to carry forward")]
    MissingCarryOutTransaction(String),
}

/// Failures loading the converter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Error type covering a full read, validate, convert, write run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("validation failed with {0} error(s)")]
    ValidationFailed(usize),
    #[error("at least one input file is required")]
    NoInput,
}

pub type Result<T> = std::result::Result<T, ReportError>;
