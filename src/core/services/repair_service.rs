//! Clean-ups for datasets extracted page by page.
//!
//! Repairs work on raw JSON, before validation, and only when both
//! collections are arrays. Anything malformed is left for the validator.

use std::collections::{HashMap, HashSet};

use serde_json::{json, Value};

use crate::config::ConverterConfig;

/// Date written into transactions that were extracted without one.
pub const UNKNOWN_DATE: &str = "unknown";

pub struct RepairService;

impl RepairService {
    /// Applies every repair in order: duplicate names, root attachment,
    /// zero values, missing dates, mixed categories, empty categories.
    pub fn repair(mut raw: Value, config: &ConverterConfig) -> Value {
        let well_formed = matches!(
            (raw.get("categories"), raw.get("transactions")),
            (Some(Value::Array(_)), Some(Value::Array(_)))
        );
        if !well_formed {
            return raw;
        }

        let mut categories = take_array(&mut raw["categories"]);
        let mut transactions = take_array(&mut raw["transactions"]);
        let (category_count, transaction_count) = (categories.len(), transactions.len());

        Self::merge_duplicate_names(&mut categories, &mut transactions, &config.root_id);
        Self::attach_to_root(&mut categories, config);
        Self::drop_zero_values(&mut transactions);
        Self::fill_missing_dates(&mut transactions);
        Self::flatten_mixed_categories(&mut categories, &mut transactions);
        Self::drop_empty_categories(&mut categories, &transactions, &config.root_id);

        tracing::debug!(
            removed_categories = category_count.saturating_sub(categories.len()),
            removed_transactions = transaction_count - transactions.len(),
            "dataset repaired"
        );
        raw["categories"] = Value::Array(categories);
        raw["transactions"] = Value::Array(transactions);
        raw
    }

    /// Keeps the first category of every name and points references to the
    /// others at it. The root always keeps its name.
    pub fn merge_duplicate_names(
        categories: &mut Vec<Value>,
        transactions: &mut [Value],
        root_id: &str,
    ) {
        let mut keepers: HashMap<String, String> = HashMap::new();
        if let Some(name) = categories
            .iter()
            .find(|category| field(category, "id") == Some(root_id))
            .and_then(|root| field(root, "name"))
        {
            keepers.insert(name.to_string(), root_id.to_string());
        }

        let mut replaced: HashMap<String, String> = HashMap::new();
        categories.retain(|category| {
            let (Some(id), Some(name)) = (field(category, "id"), field(category, "name")) else {
                return true;
            };
            match keepers.get(name) {
                Some(kept) if kept != id => {
                    replaced.insert(id.to_string(), kept.clone());
                    false
                }
                Some(_) => true,
                None => {
                    keepers.insert(name.to_string(), id.to_string());
                    true
                }
            }
        });
        if replaced.is_empty() {
            return;
        }

        for category in categories.iter_mut() {
            rewrite(category, "parent", &replaced);
        }
        for txn in transactions.iter_mut() {
            rewrite(txn, "category_id", &replaced);
        }
    }

    /// Hangs parentless and self-parented categories under the root,
    /// creating the root when the dataset lacks one.
    pub fn attach_to_root(categories: &mut Vec<Value>, config: &ConverterConfig) {
        let root_id = config.root_id.as_str();
        if !categories
            .iter()
            .any(|category| field(category, "id") == Some(root_id))
        {
            categories.insert(
                0,
                json!({
                    "id": root_id,
                    "name": config.root_name,
                    "parent": null,
                    "direction": "income",
                }),
            );
        }

        for category in categories.iter_mut() {
            let id = field(category, "id");
            let parent = field(category, "parent");
            if id == Some(root_id) {
                if parent == Some(root_id) {
                    category["parent"] = Value::Null;
                }
                continue;
            }
            if parent.is_none() || parent == id {
                category["parent"] = Value::String(root_id.to_string());
            }
        }
    }

    /// Removes transactions whose value is zero or absent.
    pub fn drop_zero_values(transactions: &mut Vec<Value>) {
        transactions.retain(|txn| match txn.get("value") {
            None | Some(Value::Null) => false,
            Some(value) => value.as_f64() != Some(0.0),
        });
    }

    pub fn fill_missing_dates(transactions: &mut [Value]) {
        for txn in transactions.iter_mut() {
            if let Some(entry) = txn.as_object_mut() {
                if entry.get("date").map_or(true, Value::is_null) {
                    entry.insert("date".into(), UNKNOWN_DATE.into());
                }
            }
        }
    }

    /// A category that owns transactions and also has child categories
    /// absorbs its whole subtree. The outermost such category wins.
    pub fn flatten_mixed_categories(categories: &mut Vec<Value>, transactions: &mut [Value]) {
        let parents = parent_positions(categories);
        let owners = owned_categories(transactions);
        let mut has_children = vec![false; categories.len()];
        for parent in parents.iter().flatten() {
            has_children[*parent] = true;
        }
        let mixed: Vec<bool> = categories
            .iter()
            .enumerate()
            .map(|(position, category)| {
                has_children[position]
                    && field(category, "id").is_some_and(|id| owners.contains(id))
            })
            .collect();

        let mut absorbed: HashMap<String, String> = HashMap::new();
        for (position, category) in categories.iter().enumerate() {
            let mut target = None;
            let mut current = position;
            let mut steps = 0;
            while let Some(parent) = parents[current] {
                steps += 1;
                if steps > categories.len() {
                    break;
                }
                if mixed[parent] {
                    target = Some(parent);
                }
                current = parent;
            }
            let (Some(target), Some(id)) = (target, field(category, "id")) else {
                continue;
            };
            if let Some(target_id) = field(&categories[target], "id") {
                absorbed.insert(id.to_string(), target_id.to_string());
            }
        }
        if absorbed.is_empty() {
            return;
        }

        categories.retain(|category| {
            field(category, "id").map_or(true, |id| !absorbed.contains_key(id))
        });
        for txn in transactions.iter_mut() {
            rewrite(txn, "category_id", &absorbed);
        }
    }

    /// Repeatedly removes categories with neither transactions nor children.
    /// The root is kept.
    pub fn drop_empty_categories(
        categories: &mut Vec<Value>,
        transactions: &[Value],
        root_id: &str,
    ) {
        let owners = owned_categories(transactions);
        loop {
            let parents = parent_positions(categories);
            let mut has_children = vec![false; categories.len()];
            for parent in parents.iter().flatten() {
                has_children[*parent] = true;
            }
            let before = categories.len();
            let mut position = 0;
            categories.retain(|category| {
                let keep = has_children[position]
                    || field(category, "id")
                        .map_or(true, |id| id == root_id || owners.contains(id));
                position += 1;
                keep
            });
            if categories.len() == before {
                break;
            }
        }
    }
}

fn take_array(value: &mut Value) -> Vec<Value> {
    match value.take() {
        Value::Array(entries) => entries,
        _ => Vec::new(),
    }
}

/// A non-empty string field.
fn field<'v>(entry: &'v Value, key: &str) -> Option<&'v str> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

fn rewrite(entry: &mut Value, key: &str, replacements: &HashMap<String, String>) {
    let Some(replacement) = field(entry, key).and_then(|current| replacements.get(current)) else {
        return;
    };
    entry[key] = Value::String(replacement.clone());
}

/// Category ids that own at least one transaction.
fn owned_categories(transactions: &[Value]) -> HashSet<String> {
    transactions
        .iter()
        .filter_map(|txn| field(txn, "category_id"))
        .map(str::to_string)
        .collect()
}

/// Resolved parent position of each category: by id, then by a unique name.
fn parent_positions(categories: &[Value]) -> Vec<Option<usize>> {
    let mut by_id = HashMap::new();
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    for (position, category) in categories.iter().enumerate() {
        if let Some(id) = field(category, "id") {
            by_id.insert(id, position);
        }
        if let Some(name) = field(category, "name") {
            by_name.entry(name).or_default().push(position);
        }
    }
    categories
        .iter()
        .enumerate()
        .map(|(position, category)| {
            let parent = field(category, "parent")?;
            let resolved = by_id.get(parent).copied().or_else(|| {
                match by_name.get(parent).map(Vec::as_slice) {
                    Some([only]) => Some(*only),
                    _ => None,
                }
            });
            resolved.filter(|parent| *parent != position)
        })
        .collect()
}
