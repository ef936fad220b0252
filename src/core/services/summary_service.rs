use std::collections::HashSet;

use crate::{
    config::ConverterConfig,
    domain::{common::total, Dataset, Direction, LedgerTransaction, Summary},
    errors::AggregationError,
};

/// Transactions split by the direction of the category they are booked on.
#[derive(Debug, Clone)]
pub struct LedgerSides<'d> {
    pub income: Vec<&'d LedgerTransaction>,
    pub expense: Vec<&'d LedgerTransaction>,
    pub total_income: f64,
    /// Includes the carry-out transaction.
    pub total_expense: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Partitions transactions by direction, keeping input order on each side.
    /// Transactions whose category is unknown belong to neither side.
    pub fn partition(dataset: &Dataset) -> LedgerSides<'_> {
        let income_ids: HashSet<&str> = dataset.category_ids(Direction::Income).collect();
        let expense_ids: HashSet<&str> = dataset.category_ids(Direction::Expense).collect();

        let income: Vec<&LedgerTransaction> = dataset
            .transactions
            .iter()
            .filter(|txn| income_ids.contains(txn.category_id.as_str()))
            .collect();
        let expense: Vec<&LedgerTransaction> = dataset
            .transactions
            .iter()
            .filter(|txn| expense_ids.contains(txn.category_id.as_str()))
            .collect();

        LedgerSides {
            total_income: total(income.iter().copied()),
            total_expense: total(expense.iter().copied()),
            income,
            expense,
        }
    }

    /// Value of the single transaction booked on the carry-out category.
    pub fn carry_out(dataset: &Dataset, config: &ConverterConfig) -> Result<f64, AggregationError> {
        let category = dataset
            .category_named(&config.carry_out_name)
            .ok_or_else(|| {
                AggregationError::MissingCarryOutCategory(config.carry_out_name.clone())
            })?;
        dataset
            .transactions
            .iter()
            .find(|txn| txn.category_id == category.id)
            .map(|txn| txn.value)
            .ok_or_else(|| AggregationError::MissingCarryOutTransaction(category.name.clone()))
    }

    /// The carry-out bucket is balance, not spend, so it is removed from expense.
    pub fn summarize(
        dataset: &Dataset,
        sides: &LedgerSides<'_>,
        config: &ConverterConfig,
    ) -> Result<Summary, AggregationError> {
        let carry_out = Self::carry_out(dataset, config)?;
        Ok(Summary {
            income: sides.total_income,
            expense: sides.total_expense - carry_out,
            balance: carry_out,
            year: dataset.year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn dataset() -> Dataset {
        let mut dataset = Dataset::new(2022);
        dataset
            .add_category(Category::new("root", "総収入", Direction::Income))
            .add_category(
                Category::new("in", "前年からの繰越額", Direction::Income).with_parent("root"),
            )
            .add_category(Category::new("don", "寄附", Direction::Income).with_parent("root"))
            .add_category(
                Category::new("out", "翌年への繰越額", Direction::Expense).with_parent("root"),
            )
            .add_category(Category::new("ops", "経常経費", Direction::Expense).with_parent("root"))
            .add_transaction(LedgerTransaction::new("t1", "in", "繰越", "2022/1/1", 300.0))
            .add_transaction(LedgerTransaction::new("t2", "don", "寄附", "2022/5/1", 700.0))
            .add_transaction(LedgerTransaction::new("t3", "ops", "家賃", "2022/6/1", 400.0))
            .add_transaction(LedgerTransaction::new("t4", "out", "繰越", "2022/12/31", 600.0))
            .add_transaction(LedgerTransaction::new("t5", "ghost", "不明", "2022/7/1", 50.0));
        dataset
    }

    #[test]
    fn partition_splits_by_category_direction() {
        let dataset = dataset();
        let sides = SummaryService::partition(&dataset);
        let income: Vec<&str> = sides.income.iter().map(|txn| txn.id.as_str()).collect();
        let expense: Vec<&str> = sides.expense.iter().map(|txn| txn.id.as_str()).collect();
        assert_eq!(income, vec!["t1", "t2"]);
        assert_eq!(expense, vec!["t3", "t4"]);
        assert_eq!(sides.total_income, 1000.0);
        assert_eq!(sides.total_expense, 1000.0);
    }

    #[test]
    fn summary_moves_carry_out_into_balance() {
        let dataset = dataset();
        let sides = SummaryService::partition(&dataset);
        let summary = SummaryService::summarize(&dataset, &sides, &ConverterConfig::default())
            .expect("summary");
        assert_eq!(
            summary,
            Summary {
                income: 1000.0,
                expense: 400.0,
                balance: 600.0,
                year: 2022
            }
        );
    }

    #[test]
    fn missing_carry_out_transaction_is_fatal() {
        let mut dataset = dataset();
        dataset.transactions.retain(|txn| txn.id != "t4");
        let err = SummaryService::carry_out(&dataset, &ConverterConfig::default())
            .expect_err("carry-out must be required");
        assert_eq!(
            err,
            AggregationError::MissingCarryOutTransaction("翌年への繰越額".into())
        );
    }
}
