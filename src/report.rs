use crate::error::Result;
use crate::taxon::BotanicalNameParts;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes `value` as pretty JSON to `path`, or to stdout when no path is given.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writeln!(writer)?;
            writer.flush()?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

/// Tab-separated report with one row per raw name and its parsed components.
pub fn write_parse_report(rows: &[(String, BotanicalNameParts)], path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_path(path)?;
    writer.write_record([
        "raw",
        "genus",
        "species",
        "subspecies",
        "variety",
        "forma",
        "cultivar",
        "hybrid",
        "authority",
        "normalized",
        "group_key",
        "corrections",
    ])?;

    for (raw, parts) in rows {
        let normalized = parts.normalize();
        let group_key = parts.group_key();
        let corrections = parts.correction_notes.join("; ");
        writer.write_record([
            raw.as_str(),
            parts.genus.as_str(),
            parts.species.as_deref().unwrap_or(""),
            parts.subspecies.as_deref().unwrap_or(""),
            parts.variety.as_deref().unwrap_or(""),
            parts.forma.as_deref().unwrap_or(""),
            parts.cultivar.as_deref().unwrap_or(""),
            bool_to_label(parts.hybrid),
            parts.authority.as_deref().unwrap_or(""),
            normalized.as_str(),
            group_key.as_str(),
            corrections.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn bool_to_label(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxon::{group_botanical_names, parse_botanical_name};
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_report_rows() {
        let rows: Vec<(String, BotanicalNameParts)> = ["Salvia guarantica Benth.", "Rosa × alba"]
            .iter()
            .map(|raw| (raw.to_string(), parse_botanical_name(raw)))
            .collect();
        let file = NamedTempFile::new().unwrap();
        write_parse_report(&rows, file.path()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("raw\tgenus\tspecies"));
        assert!(lines[1].starts_with(
            "Salvia guarantica Benth.\tSalvia\tguaranitica\t\t\t\t\tno\tBenth.\tSalvia guaranitica\tSalvia guaranitica\t"
        ));
        assert!(lines[1].contains("corrected to"));
        assert!(lines[2].contains("\tyes\t"));
        assert!(lines[2].ends_with("Rosa × alba\tRosa ×\t"));
    }

    #[test]
    fn test_json_to_file() {
        let groups = group_botanical_names(["Hosta 'June'", "Hosta"]);
        let file = NamedTempFile::new().unwrap();
        write_json(&groups, Some(file.path())).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value[0]["groupKey"], "Hosta");
        assert_eq!(value[0]["variants"][1], "Hosta 'June'");
    }
}
