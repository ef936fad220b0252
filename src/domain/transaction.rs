//! Domain model for a single ledger entry booked against a leaf category.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Input transaction as extracted from a funding report.
///
/// Every field decodes leniently so that a dataset whose validation warnings
/// were waived can still be aggregated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerTransaction {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub value: f64,
}

impl LedgerTransaction {
    pub fn new(
        id: impl Into<String>,
        category_id: impl Into<String>,
        name: impl Into<String>,
        date: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            id: id.into(),
            category_id: category_id.into(),
            name: name.into(),
            date: date.into(),
            value,
        }
    }
}

impl Identifiable for LedgerTransaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for LedgerTransaction {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for LedgerTransaction {
    fn amount(&self) -> f64 {
        self.value
    }
}
