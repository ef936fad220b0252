use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::{config::ConverterConfig, errors::StructuralError};

/// `(1) 田中太郎` or `1 田中太郎`: a leading ordinal left over from page extraction.
const ORDINAL_PATTERN: &str = r"^(?:\(\d+\)\s*|\d+\s+)";

fn ordinal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(ORDINAL_PATTERN).expect("ordinal pattern compiles"))
}

pub struct MergeService;

impl MergeService {
    /// Folds page-level datasets into one, in input order.
    ///
    /// The year comes from the first page. Pages keep their raw shape so that
    /// validation still sees malformed entries: a collection that is not an
    /// array replaces the merged one, and a page that is not an object is an
    /// error. A single page passes through untouched.
    pub fn merge(pages: Vec<Value>, config: &ConverterConfig) -> Result<Value, StructuralError> {
        if pages.len() == 1 {
            return Ok(pages.into_iter().next().unwrap_or(Value::Null));
        }

        let year = pages
            .first()
            .and_then(|page| page.get("year"))
            .cloned()
            .unwrap_or(Value::Null);
        let mut categories = Vec::new();
        let mut transactions = Vec::new();
        let mut malformed = Map::new();
        for (position, page) in pages.into_iter().enumerate() {
            let Value::Object(mut page) = page else {
                return Err(StructuralError::PageNotAnObject(position + 1));
            };
            for (key, sink) in [
                ("categories", &mut categories),
                ("transactions", &mut transactions),
            ] {
                match page.remove(key) {
                    None | Some(Value::Null) => {}
                    Some(Value::Array(entries)) => {
                        sink.extend(entries.into_iter().map(|entry| {
                            if config.normalize_names {
                                Self::normalize_entry(entry)
                            } else {
                                entry
                            }
                        }));
                    }
                    Some(other) => {
                        malformed.entry(key).or_insert(other);
                    }
                }
            }
        }
        tracing::debug!(
            categories = categories.len(),
            transactions = transactions.len(),
            malformed = malformed.len(),
            "merged page datasets"
        );

        let mut merged = Map::new();
        merged.insert("year".into(), year);
        merged.insert(
            "categories".into(),
            malformed
                .remove("categories")
                .unwrap_or(Value::Array(categories)),
        );
        merged.insert(
            "transactions".into(),
            malformed
                .remove("transactions")
                .unwrap_or(Value::Array(transactions)),
        );
        Ok(Value::Object(merged))
    }

    /// Strips a leading ordinal from a name.
    pub fn normalize_name(name: &str) -> String {
        ordinal_pattern().replace(name, "").into_owned()
    }

    fn normalize_entry(mut entry: Value) -> Value {
        if let Some(Value::String(name)) = entry.get_mut("name") {
            *name = Self::normalize_name(name);
        }
        entry
    }
}
