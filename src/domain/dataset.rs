//! The raw funding ledger for one fiscal year.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    category::Category,
    common::{year_from_number, Direction},
    transaction::LedgerTransaction,
};

/// Category taxonomy plus the leaf transactions booked against it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(deserialize_with = "year_from_number")]
    pub year: i64,
    pub categories: Vec<Category>,
    pub transactions: Vec<LedgerTransaction>,
}

impl Dataset {
    pub fn new(year: i64) -> Self {
        Self {
            year,
            categories: Vec::new(),
            transactions: Vec::new(),
        }
    }

    /// Decodes a dataset that already passed structural validation.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn add_category(&mut self, category: Category) -> &mut Self {
        self.categories.push(category);
        self
    }

    pub fn add_transaction(&mut self, transaction: LedgerTransaction) -> &mut Self {
        self.transactions.push(transaction);
        self
    }

    /// Ids of every category on the given side of the ledger.
    pub fn category_ids(&self, direction: Direction) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .filter(move |category| category.direction == direction)
            .map(|category| category.id.as_str())
    }

    /// First category carrying `name`.
    pub fn category_named(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_rejects_fractional_year() {
        let err = Dataset::from_value(json!({
            "year": 2024.5,
            "categories": [],
            "transactions": []
        }))
        .expect_err("fractional year must not decode");
        assert!(err.is_data());
    }

    #[test]
    fn from_value_accepts_integral_float_year() {
        let raw: Value = serde_json::from_str(
            r#"{ "year": 2024.0, "categories": [], "transactions": [] }"#,
        )
        .unwrap();
        let dataset = Dataset::from_value(raw).unwrap();
        assert_eq!(dataset.year, 2024);
    }

    #[test]
    fn category_ids_filter_by_direction() {
        let mut dataset = Dataset::new(2024);
        dataset
            .add_category(Category::new("a", "A", Direction::Income))
            .add_category(Category::new("b", "B", Direction::Expense))
            .add_category(Category::new("c", "C", Direction::Income));
        let income: Vec<&str> = dataset.category_ids(Direction::Income).collect();
        assert_eq!(income, vec!["a", "c"]);
    }
}
