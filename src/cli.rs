use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the CSV file holding the catalog's botanical names.
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,

    /// Column holding the botanical names.
    #[arg(short, long, value_name = "NAME", default_value = crate::csv_handler::DEFAULT_NAME_COLUMN)]
    pub column: String,

    /// Output mode: grouped names, alphabetical index, or a per-name parse report.
    #[arg(short, long, value_enum, default_value = "groups")]
    pub mode: OutputMode,

    /// Path to the output file (required if mode is "parsed"; stdout otherwise).
    #[arg(short, long, value_name = "FILE", required_if_eq("mode", "parsed"))]
    pub output_file: Option<PathBuf>,

    /// Only keep groups whose key or variants contain this text (case-insensitive).
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Only keep names that normalize to the same botanical name as this one.
    #[arg(short, long, value_name = "NAME")]
    pub filter: Option<String>,
}

#[derive(clap::ValueEnum, Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// JSON list of groups with their variants.
    #[value(name = "groups")]
    Groups,
    /// JSON list of groups bucketed by first letter.
    #[value(name = "index")]
    Index,
    /// Tab-separated report of every parsed name.
    #[value(name = "parsed")]
    Parsed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = vec!["botanica", "-i", "benchtags.csv"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.input_file, PathBuf::from("benchtags.csv"));
        assert_eq!(cli.column, "Botanical");
        assert_eq!(cli.mode, OutputMode::Groups);
        assert!(cli.output_file.is_none());
        assert!(cli.search.is_none());
        assert!(cli.filter.is_none());
    }

    #[test]
    fn test_cli_index_mode_with_search() {
        let args = vec![
            "botanica", "-i", "plants.csv", "-c", "botanical", "-m", "index", "-s", "hosta",
        ];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.column, "botanical");
        assert_eq!(cli.mode, OutputMode::Index);
        assert_eq!(cli.search.as_deref(), Some("hosta"));
    }

    #[test]
    fn test_cli_parsed_mode() {
        let args = vec![
            "botanica",
            "-i",
            "plants.csv",
            "-m",
            "parsed",
            "-o",
            "report.tsv",
            "-f",
            "Hosta 'June'",
        ];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.mode, OutputMode::Parsed);
        assert_eq!(cli.output_file, Some(PathBuf::from("report.tsv")));
        assert_eq!(cli.filter.as_deref(), Some("Hosta 'June'"));
    }

    #[test]
    fn test_cli_parsed_mode_missing_output() {
        let args = vec!["botanica", "-i", "plants.csv", "-m", "parsed"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
