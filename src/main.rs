pub mod cli;
pub mod csv_handler;
pub mod error;
pub mod report;
pub mod taxon;

use clap::Parser;
use cli::{Cli, OutputMode};
use csv_handler::load_botanical_names;
use error::Result;
use log::{error, info};
use std::time::Instant;
use taxon::{
    BotanicalNameParts, alphabetical_index, filter_groups, filter_matching,
    group_botanical_names, parse_botanical_name,
};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_target(false)
        .format_timestamp_secs()
        .filter_level(log::LevelFilter::Info)
        .try_init()
        .expect("Failed to initialize logger");

    let cli = Cli::parse();
    info!("Starting botanical name processing...");
    info!("Input file: {:?} (column '{}')", cli.input_file, cli.column);
    info!("Output mode: {:?}", cli.mode);

    let start_time = Instant::now();

    let names = match load_botanical_names(&cli.input_file, &cli.column) {
        Ok(names) => {
            info!("Loaded {} distinct botanical names.", names.len());
            names
        }
        Err(e) => {
            error!("Failed to load botanical names: {}", e);
            return Err(e);
        }
    };

    let names: Vec<String> = match &cli.filter {
        Some(filter_name) => {
            let kept: Vec<String> = filter_matching(&names, filter_name)
                .into_iter()
                .map(str::to_string)
                .collect();
            info!("{} of {} names match '{}'.", kept.len(), names.len(), filter_name);
            kept
        }
        None => names,
    };

    let output_path = cli.output_file.as_deref();
    let search = cli.search.as_deref().unwrap_or("");

    match cli.mode {
        OutputMode::Groups => {
            let groups = filter_groups(group_botanical_names(&names), search);
            let hybrid_groups = groups.iter().filter(|g| g.is_hybrid).count();
            info!("Writing {} groups ({} hybrid).", groups.len(), hybrid_groups);
            report::write_json(&groups, output_path)?;
        }
        OutputMode::Index => {
            let groups = filter_groups(group_botanical_names(&names), search);
            let index = alphabetical_index(&groups);
            info!("Writing {} groups under {} letters.", groups.len(), index.len());
            report::write_json(&index, output_path)?;
        }
        OutputMode::Parsed => {
            let output_path = output_path.expect("Output file path is required for parsed mode");
            let rows: Vec<(String, BotanicalNameParts)> = names
                .iter()
                .map(|name| (name.clone(), parse_botanical_name(name)))
                .collect();
            let corrected = rows
                .iter()
                .filter(|(_, parts)| !parts.correction_notes.is_empty())
                .count();
            if let Err(e) = report::write_parse_report(&rows, output_path) {
                error!("Failed to write parse report: {}", e);
                return Err(e);
            }
            info!(
                "Wrote {} parsed names to {:?} ({} with species corrections).",
                rows.len(),
                output_path,
                corrected
            );
        }
    }

    info!("Total execution time: {:.2?}", start_time.elapsed());
    Ok(())
}
