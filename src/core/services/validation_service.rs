use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::{
    config::ConverterConfig,
    core::category_index::{CategoryIndex, ChainBreak, ParentLink},
    domain::{common::integral_year, Category, Direction},
    errors::StructuralError,
};

/// Income and expense totals closer than this are considered balanced.
const BALANCE_TOLERANCE: f64 = 1e-6;

const TRANSACTION_FIELDS: [&str; 5] = ["id", "category_id", "name", "date", "value"];

/// A rule violation that does not prevent aggregation on its own.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationWarning {
    #[error("category `{category}` must own exactly one transaction, found {count}")]
    CarryTransactionCount { category: String, count: usize },
    #[error("income and expense totals do not match: {income} != {expense}")]
    Imbalance { income: f64, expense: f64 },
    #[error("exactly one root category is required, found {0}")]
    RootCount(usize),
    #[error("category name `{name}` is shared by {count} categories")]
    DuplicateCategoryName { name: String, count: usize },
    #[error(
        "category parent must reference an existing category. category.id: {category_id}, category.parent: {parent}"
    )]
    UnresolvedParent { category_id: String, parent: String },
    #[error("category parent chain never reaches the root. category.id: {category_id}")]
    ParentCycle { category_id: String },
    #[error(
        "transaction must have id, category_id, name, date, value. transaction.id: {transaction_id}, missing: {}",
        .missing.join(", ")
    )]
    MissingTransactionFields {
        transaction_id: String,
        missing: Vec<&'static str>,
    },
    #[error(
        "transaction category_id must exist in categories. transaction.id: {transaction_id}, transaction.category_id: {category_id}"
    )]
    UnknownCategory {
        transaction_id: String,
        category_id: String,
    },
    #[error(
        "transaction category_id must be a leaf category. transaction.id: {transaction_id}, transaction.category_id: {category_id}"
    )]
    NonLeafCategory {
        transaction_id: String,
        category_id: String,
    },
    #[error("transaction date must be a string. transaction.id: {transaction_id}, transaction.date: {date}")]
    NonStringDate { transaction_id: String, date: String },
    #[error(
        "transaction value must be a positive number. transaction.id: {transaction_id}, transaction.value: {value}"
    )]
    NonPositiveValue { transaction_id: String, value: String },
}

pub struct ValidationService;

impl ValidationService {
    /// Checks a raw dataset. Structural defects abort with `Err`; everything
    /// else is collected, in a stable order, for the caller to judge.
    pub fn validate(
        raw: &Value,
        config: &ConverterConfig,
    ) -> Result<Vec<ValidationWarning>, StructuralError> {
        Self::check_year(raw)?;
        let (raw_categories, transactions) = Self::collections(raw)?;
        let categories = Self::decode_categories(raw_categories)?;

        let carry_in = Self::seed_category(&categories, &config.carry_in_name)?;
        let carry_out = Self::seed_category(&categories, &config.carry_out_name)?;
        if let Some(category) = categories
            .iter()
            .find(|category| category.parent_ref() == Some(category.id.as_str()))
        {
            return Err(StructuralError::SelfParent(category.id.clone()));
        }

        let index = CategoryIndex::new(&categories);
        let mut warnings = Vec::new();
        for seed in [carry_in, carry_out] {
            let count = transactions
                .iter()
                .filter(|txn| text(txn.get("category_id")).as_deref() == Some(seed.id.as_str()))
                .count();
            if count != 1 {
                warnings.push(ValidationWarning::CarryTransactionCount {
                    category: seed.name.clone(),
                    count,
                });
            }
        }
        Self::check_balance(&categories, transactions, &mut warnings);
        Self::check_tree(&index, &mut warnings);
        for txn in transactions {
            Self::check_transaction(txn, &index, &mut warnings);
        }

        tracing::debug!(
            categories = categories.len(),
            transactions = transactions.len(),
            warnings = warnings.len(),
            "validation finished"
        );
        Ok(warnings)
    }

    fn check_year(raw: &Value) -> Result<(), StructuralError> {
        match raw.get("year") {
            Some(Value::Number(year)) if integral_year(year).is_some() => Ok(()),
            Some(Value::Number(year)) => Err(StructuralError::YearNotInteger(year.to_string())),
            _ => Err(StructuralError::YearNotNumeric),
        }
    }

    fn collections(raw: &Value) -> Result<(&[Value], &[Value]), StructuralError> {
        let (Some(categories), Some(transactions)) =
            (present(raw, "categories"), present(raw, "transactions"))
        else {
            return Err(StructuralError::MissingCollections);
        };
        let categories = categories
            .as_array()
            .ok_or(StructuralError::NotAnArray("categories"))?;
        let transactions = transactions
            .as_array()
            .ok_or(StructuralError::NotAnArray("transactions"))?;
        Ok((categories.as_slice(), transactions.as_slice()))
    }

    fn decode_categories(raw: &[Value]) -> Result<Vec<Category>, StructuralError> {
        raw.iter()
            .map(|entry| {
                let has_name = entry
                    .get("name")
                    .and_then(Value::as_str)
                    .is_some_and(|name| !name.is_empty());
                let direction = entry
                    .get("direction")
                    .and_then(Value::as_str)
                    .filter(|direction| !direction.is_empty());
                let Some(direction) = direction.filter(|_| has_name) else {
                    return Err(StructuralError::IncompleteCategory(entry.to_string()));
                };
                if Direction::parse(direction).is_none() {
                    return Err(StructuralError::InvalidDirection(direction.to_string()));
                }
                serde_json::from_value(entry.clone())
                    .map_err(|_| StructuralError::IncompleteCategory(entry.to_string()))
            })
            .collect()
    }

    fn seed_category<'c>(
        categories: &'c [Category],
        name: &str,
    ) -> Result<&'c Category, StructuralError> {
        categories
            .iter()
            .find(|category| category.name == name)
            .ok_or_else(|| StructuralError::MissingSeedCategory(name.to_string()))
    }

    fn check_balance(
        categories: &[Category],
        transactions: &[Value],
        warnings: &mut Vec<ValidationWarning>,
    ) {
        let side_total = |direction: Direction| {
            let ids: HashSet<&str> = categories
                .iter()
                .filter(|category| category.direction == direction)
                .map(|category| category.id.as_str())
                .collect();
            transactions
                .iter()
                .filter(|txn| {
                    text(txn.get("category_id")).is_some_and(|id| ids.contains(id.as_str()))
                })
                .filter_map(|txn| txn.get("value").and_then(Value::as_f64))
                .fold(0.0, |acc, value| acc + value)
        };
        let income = side_total(Direction::Income);
        let expense = side_total(Direction::Expense);
        if (income - expense).abs() > BALANCE_TOLERANCE {
            warnings.push(ValidationWarning::Imbalance { income, expense });
        }
    }

    fn check_tree(index: &CategoryIndex<'_>, warnings: &mut Vec<ValidationWarning>) {
        let roots = index.root_count();
        if roots != 1 {
            warnings.push(ValidationWarning::RootCount(roots));
        }
        for (name, count) in index.duplicate_names() {
            warnings.push(ValidationWarning::DuplicateCategoryName {
                name: name.to_string(),
                count,
            });
        }
        for position in 0..index.len() {
            let category = index.get(position);
            if index.parent_of(position) == ParentLink::Unresolved {
                warnings.push(ValidationWarning::UnresolvedParent {
                    category_id: category.id.clone(),
                    parent: category.parent_ref().unwrap_or_default().to_string(),
                });
                continue;
            }
            let looped = index
                .ancestors(position)
                .any(|step| matches!(step, Err(ChainBreak::Cycle(_))));
            if looped {
                warnings.push(ValidationWarning::ParentCycle {
                    category_id: category.id.clone(),
                });
            }
        }
    }

    fn check_transaction(
        txn: &Value,
        index: &CategoryIndex<'_>,
        warnings: &mut Vec<ValidationWarning>,
    ) {
        let transaction_id = describe(txn.get("id"));
        let missing: Vec<&'static str> = TRANSACTION_FIELDS
            .into_iter()
            .filter(|field| is_blank(txn.get(*field)))
            .collect();
        if !missing.is_empty() {
            warnings.push(ValidationWarning::MissingTransactionFields {
                transaction_id: transaction_id.clone(),
                missing,
            });
        }

        let raw_category = txn.get("category_id");
        if !is_blank(raw_category) && text(raw_category).is_none() {
            warnings.push(ValidationWarning::UnknownCategory {
                transaction_id: transaction_id.clone(),
                category_id: describe(raw_category),
            });
        } else if let Some(category_id) = text(raw_category).filter(|id| !id.is_empty()) {
            match index.position(&category_id) {
                None => warnings.push(ValidationWarning::UnknownCategory {
                    transaction_id: transaction_id.clone(),
                    category_id,
                }),
                Some(position) if !index.is_leaf(position) => {
                    warnings.push(ValidationWarning::NonLeafCategory {
                        transaction_id: transaction_id.clone(),
                        category_id,
                    })
                }
                Some(_) => {}
            }
        }

        let date = txn.get("date");
        if !is_blank(date) && !date.is_some_and(Value::is_string) {
            warnings.push(ValidationWarning::NonStringDate {
                transaction_id: transaction_id.clone(),
                date: describe(date),
            });
        }

        let value = txn.get("value");
        if !is_blank(value) && !value.and_then(Value::as_f64).is_some_and(|amount| amount > 0.0) {
            warnings.push(ValidationWarning::NonPositiveValue {
                transaction_id,
                value: describe(value),
            });
        }
    }
}

/// Validates `raw` with [`ValidationService`].
pub fn validate(
    raw: &Value,
    config: &ConverterConfig,
) -> Result<Vec<ValidationWarning>, StructuralError> {
    ValidationService::validate(raw, config)
}

fn present<'v>(raw: &'v Value, key: &str) -> Option<&'v Value> {
    raw.get(key).filter(|value| !value.is_null())
}

/// Absent, `null`, and empty-string fields all count as missing.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}

/// Reads an identifier that may have been emitted as a number.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "(none)".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
