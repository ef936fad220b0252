use std::collections::HashMap;

use crate::domain::{Category, LedgerTransaction, ReportTransaction};

pub struct TransactionService;

impl TransactionService {
    /// Category id to display name. Later duplicates win.
    pub fn category_names(categories: &[Category]) -> HashMap<&str, &str> {
        categories
            .iter()
            .map(|category| (category.id.as_str(), category.name.as_str()))
            .collect()
    }

    /// Share of `value` in `total`, in percent. An empty side yields zero.
    pub fn percentage(value: f64, total: f64) -> f64 {
        if total == 0.0 {
            0.0
        } else {
            value * 100.0 / total
        }
    }

    /// Annotates one side's transactions with category names and shares of `total`.
    pub fn annotate(
        transactions: &[&LedgerTransaction],
        total: f64,
        names: &HashMap<&str, &str>,
    ) -> Vec<ReportTransaction> {
        transactions
            .iter()
            .map(|txn| ReportTransaction {
                id: txn.id.clone(),
                name: txn.name.clone(),
                date: txn.date.clone(),
                value: txn.value,
                category: names
                    .get(txn.category_id.as_str())
                    .map(|name| name.to_string())
                    .unwrap_or_default(),
                percentage: Self::percentage(txn.value, total),
            })
            .collect()
    }
}
