#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{json, Value};

pub const SAMPLE_TOTAL: f64 = 8_660_000.0;
pub const SAMPLE_CARRY_OUT: f64 = 7_793_861.0;

/// Carry-in and carry-out booked directly under the root.
pub fn minimal_dataset() -> Value {
    json!({
        "year": 2024,
        "categories": [
            { "id": "c1", "name": "前年からの繰越額", "parent": "root", "direction": "income" },
            { "id": "c2", "name": "翌年への繰越額", "parent": "root", "direction": "expense" },
            { "id": "root", "name": "総収入", "parent": null, "direction": "income" }
        ],
        "transactions": [
            { "id": "t1", "category_id": "c1", "value": 100, "name": "x", "date": "d" },
            { "id": "t2", "category_id": "c2", "value": 100, "name": "y", "date": "d" }
        ]
    })
}

/// A balanced year with nested income and expense categories. One parent is
/// referenced by name and one leaf owns no transactions.
pub fn sample_dataset() -> Value {
    json!({
        "year": 2023,
        "categories": [
            { "id": "root", "name": "総収入", "parent": null, "direction": "income" },
            { "id": "c_carry_in", "name": "前年からの繰越額", "parent": "root", "direction": "income" },
            { "id": "c_donation", "name": "寄附", "parent": "root", "direction": "income" },
            { "id": "c_individual", "name": "個人からの寄附", "parent": "c_donation", "direction": "income" },
            { "id": "c_group", "name": "政治団体からの寄附", "parent": "寄附", "direction": "income" },
            { "id": "c_business", "name": "機関紙誌の発行その他の事業による収入", "parent": "root", "direction": "income" },
            { "id": "c_ops", "name": "経常経費", "parent": "root", "direction": "expense" },
            { "id": "c_staff", "name": "人件費", "parent": "c_ops", "direction": "expense" },
            { "id": "c_office", "name": "事務所費", "parent": "c_ops", "direction": "expense" },
            { "id": "c_activity", "name": "政治活動費", "parent": "root", "direction": "expense" },
            { "id": "c_org", "name": "組織活動費", "parent": "c_activity", "direction": "expense" },
            { "id": "c_research", "name": "調査研究費", "parent": "c_activity", "direction": "expense" },
            { "id": "c_grants", "name": "寄附・交付金", "parent": "c_activity", "direction": "expense" },
            { "id": "c_carry_out", "name": "翌年への繰越額", "parent": "root", "direction": "expense" }
        ],
        "transactions": [
            { "id": "t01", "category_id": "c_carry_in", "name": "前年からの繰越額", "date": "2023/1/1", "value": 5_000_000 },
            { "id": "t02", "category_id": "c_individual", "name": "山田太郎", "date": "2023/3/15", "value": 1_000_000 },
            { "id": "t03", "category_id": "c_individual", "name": "佐藤花子", "date": "2023/6/1", "value": 560_000 },
            { "id": "t04", "category_id": "c_group", "name": "政治資金団体A", "date": "2023/7/20", "value": 100_000 },
            { "id": "t05", "category_id": "c_business", "name": "政治資金パーティー", "date": "2023/9/10", "value": 2_000_000 },
            { "id": "t06", "category_id": "c_staff", "name": "給与", "date": "2023/4/25", "value": 57_800 },
            { "id": "t07", "category_id": "c_office", "name": "家賃", "date": "2023/4/30", "value": 106_560 },
            { "id": "t08", "category_id": "c_office", "name": "光熱費", "date": "2023/5/31", "value": 200_000 },
            { "id": "t09", "category_id": "c_org", "name": "会合費", "date": "2023/8/8", "value": 473_026 },
            { "id": "t10", "category_id": "c_research", "name": "書籍代", "date": "2023/10/1", "value": 28_753 },
            { "id": "t11", "category_id": "c_carry_out", "name": "翌年への繰越額", "date": "2023/12/31", "value": 7_793_861 }
        ]
    })
}

/// `minimal_dataset` with the carry-in raised so income exceeds expense.
pub fn unbalanced_dataset() -> Value {
    let mut raw = minimal_dataset();
    raw["transactions"][0]["value"] = json!(150);
    raw
}

pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).expect("serialize fixture"))
        .expect("write fixture");
    path
}
