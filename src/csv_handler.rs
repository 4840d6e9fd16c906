use crate::error::{CrateError, Result};
use log::warn;
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_NAME_COLUMN: &str = "Botanical";

// Loads the distinct, non-blank botanical names from one column of a CSV export.
// First-seen order is kept.
pub fn load_botanical_names(file_path: &Path, column: &str) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(file_path)?;
    let headers = reader.headers()?.clone();

    let Some(index) = headers.iter().position(|h| h == column) else {
        return Err(CrateError::MissingHeader(column.to_string()));
    };

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    let mut blank_rows = 0usize;
    for result in reader.records() {
        let record = result?;
        let value = record.get(index).unwrap_or_default();

        if value.trim().is_empty() {
            blank_rows += 1;
            continue;
        }
        if seen.insert(value.to_string()) {
            names.push(value.to_string());
        }
    }

    if blank_rows > 0 {
        warn!("Skipped {} rows with a blank '{}' value", blank_rows, column);
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_distinct_names() {
        let content = "id,Botanical,Common\n1,Abelia x,Glossy Abelia\n2,Hosta 'June',Hosta\n3,Abelia x,Pink Abelia";
        let file = create_test_csv(content);
        let names = load_botanical_names(file.path(), DEFAULT_NAME_COLUMN).unwrap();
        assert_eq!(names, vec!["Abelia x", "Hosta 'June'"]);
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let content = "Botanical,Common\n,Mystery\n  ,Blank\nAcorus,Sweet Flag";
        let file = create_test_csv(content);
        let names = load_botanical_names(file.path(), DEFAULT_NAME_COLUMN).unwrap();
        assert_eq!(names, vec!["Acorus"]);
    }

    #[test]
    fn test_custom_column() {
        let content = "botanical,common\nAcorus,Sweet Flag";
        let file = create_test_csv(content);
        let names = load_botanical_names(file.path(), "botanical").unwrap();
        assert_eq!(names, vec!["Acorus"]);
    }

    #[test]
    fn test_missing_header() {
        let content = "id,Common\n1,Yarrow";
        let file = create_test_csv(content);
        let result = load_botanical_names(file.path(), DEFAULT_NAME_COLUMN);
        assert!(matches!(result, Err(CrateError::MissingHeader(h)) if h == "Botanical"));
    }

    #[test]
    fn test_empty_csv() {
        let file = create_test_csv("Botanical,Common");
        let names = load_botanical_names(file.path(), DEFAULT_NAME_COLUMN).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_malformed_csv() {
        let content = "Botanical,Common\nAcorus,Sweet Flag,extra";
        let file = create_test_csv(content);
        let result = load_botanical_names(file.path(), DEFAULT_NAME_COLUMN);
        assert!(matches!(result, Err(CrateError::CsvError(_))));
    }
}
