use std::{fs, path::Path};

use serde_json::Value;

use crate::{domain::Report, errors::ReportError};

/// Reads a JSON document without imposing any schema on it.
pub fn load_json_from_file(path: &Path) -> Result<Value, ReportError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Writes the report to disk atomically by staging to a temporary file.
pub fn save_report_to_file(report: &Report, path: &Path) -> Result<(), ReportError> {
    let tmp = path.with_extension("tmp");
    let json = report.to_json_pretty()?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Summary;
    use tempfile::TempDir;

    #[test]
    fn save_then_read_back_report() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.json");
        let report = Report {
            summary: Summary {
                income: 10.0,
                expense: 4.0,
                balance: 6.0,
                year: 2023,
            },
            flows: Vec::new(),
            income_transactions: Vec::new(),
            expense_transactions: Vec::new(),
        };
        save_report_to_file(&report, &path).unwrap();
        assert!(!temp.path().join("report.tmp").exists());

        let loaded: Report = serde_json::from_value(load_json_from_file(&path).unwrap()).unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ \"year\": ").unwrap();
        assert!(matches!(
            load_json_from_file(&path),
            Err(ReportError::Serde(_))
        ));
    }
}
