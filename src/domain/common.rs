//! Shared traits, enums, and lenient field decoders for ledger primitives.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Exposes the identifier an entity carries in the source ledger.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Side of the ledger a category belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    /// Parses the wire label, returning `None` for anything but the two known sides.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "income" => Some(Direction::Income),
            "expense" => Some(Direction::Expense),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Income => "income",
            Direction::Expense => "expense",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sums the amounts of the provided entries.
pub fn total<'a, T, I>(entries: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    // An empty side totals +0.0, never -0.0.
    entries
        .into_iter()
        .map(Amounted::amount)
        .fold(0.0, |acc, amount| acc + amount)
}

/// Decodes a text field that extracted ledgers sometimes emit as a number.
/// `null` and absent fields become an empty string.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

/// Like [`lenient_text`], but keeps `null` distinguishable from an empty reference.
pub(crate) fn lenient_reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Reads a year given as an integer or as an integral float such as `2024.0`.
pub fn integral_year(number: &serde_json::Number) -> Option<i64> {
    if let Some(year) = number.as_i64() {
        return Some(year);
    }
    number
        .as_f64()
        .filter(|year| year.fract() == 0.0 && year.abs() <= i64::MAX as f64)
        .map(|year| year as i64)
}

pub(crate) fn year_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    integral_year(&number)
        .ok_or_else(|| serde::de::Error::custom(format!("year must be an integer: {number}")))
}

/// Decodes an amount; anything that is not a JSON number counts as zero.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64).unwrap_or(0.0))
}
