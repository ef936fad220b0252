use crate::{
    config::ConverterConfig,
    core::category_index::CategoryIndex,
    domain::{Dataset, Report},
    errors::AggregationError,
};

use super::{FlowService, SummaryService, TransactionService};

pub struct ConversionService;

impl ConversionService {
    /// Aggregates a validated dataset into the report artifact.
    ///
    /// Validation is not repeated here: a broken parent chain or a missing
    /// carry-out entry fails the conversion instead of producing wrong totals.
    pub fn convert(
        dataset: &Dataset,
        config: &ConverterConfig,
    ) -> Result<Report, AggregationError> {
        let sides = SummaryService::partition(dataset);
        let summary = SummaryService::summarize(dataset, &sides, config)?;

        let names = TransactionService::category_names(&dataset.categories);
        let income_transactions =
            TransactionService::annotate(&sides.income, sides.total_income, &names);
        // Expense shares are taken against the raw total, carry-out included.
        let expense_transactions =
            TransactionService::annotate(&sides.expense, sides.total_expense, &names);

        let index = CategoryIndex::new(&dataset.categories);
        let flows = FlowService::rollup(
            &index,
            sides.income.iter().chain(sides.expense.iter()).copied(),
        )?;

        tracing::debug!(
            year = dataset.year,
            flows = flows.len(),
            income_transactions = income_transactions.len(),
            expense_transactions = expense_transactions.len(),
            "dataset converted"
        );
        Ok(Report {
            summary,
            flows,
            income_transactions,
            expense_transactions,
        })
    }
}

/// Converts `dataset` with [`ConversionService`].
pub fn convert(dataset: &Dataset, config: &ConverterConfig) -> Result<Report, AggregationError> {
    ConversionService::convert(dataset, config)
}
