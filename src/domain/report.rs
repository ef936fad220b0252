//! Output artifact consumed by the report pages and charts.

use serde::{Deserialize, Serialize};

use crate::domain::{category::Category, common::Direction};

/// Headline totals for the fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub year: i64,
}

/// Rolled-up value of one category, used as a node of the flow chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flow {
    pub id: String,
    pub name: String,
    pub direction: Direction,
    pub value: f64,
    pub parent: Option<String>,
}

impl Flow {
    /// Starts an empty flow mirroring the category.
    pub fn from_category(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            direction: category.direction,
            value: 0.0,
            parent: category.parent.clone(),
        }
    }
}

/// A transaction annotated with its category name and share of its side's total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportTransaction {
    pub id: String,
    pub name: String,
    pub date: String,
    pub value: f64,
    pub category: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub summary: Summary,
    pub flows: Vec<Flow>,
    pub income_transactions: Vec<ReportTransaction>,
    pub expense_transactions: Vec<ReportTransaction>,
}

impl Report {
    pub fn flow(&self, id: &str) -> Option<&Flow> {
        self.flows.iter().find(|flow| flow.id == id)
    }

    /// The first flow without a parent.
    pub fn root_flow(&self) -> Option<&Flow> {
        self.flows
            .iter()
            .find(|flow| flow.parent.as_deref().map_or(true, str::is_empty))
    }

    /// Renders the report the way it is written to disk.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
