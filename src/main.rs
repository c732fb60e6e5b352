mod catalog;
mod crawler;
mod db;
mod fetch;
mod parser;
mod record;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fetch::{HttpFetcher, DEFAULT_BASE_URL};

#[derive(Parser)]
#[command(name = "tskill_scraper", about = "Dump per-vehicle battle statistics into SQLite")]
struct Cli {
    /// Destination store (default: ~/thunderskill.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Site root that listing and vehicle references resolve against
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recreate the store and dump every vehicle in the catalog (default)
    Run,
    /// Show row counts of an existing store
    Stats,
    /// Parse a single vehicle page and print its statistics as JSON
    Inspect {
        /// Vehicle page reference, e.g. /en/vehicle/us_m103
        reference: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let path = store_path(cli.db)?;
            let conn = db::recreate(&path)?;
            let mut store = db::Store::new(conn);
            let fetcher = HttpFetcher::new(&cli.base_url)?;
            let stored = crawler::crawl(&fetcher, &mut store).await?;
            let s = db::get_stats(store.connection())?;
            println!(
                "Saved {} vehicles to {} ({} arcade, {} realistic, {} simulation).",
                stored,
                path.display(),
                s.arcade,
                s.realistic,
                s.simulation
            );
            Ok(())
        }
        Commands::Stats => {
            let path = store_path(cli.db)?;
            let conn = db::connect(&path)?;
            let s = db::get_stats(&conn)?;
            println!("Vehicles:   {}", s.total);
            println!("Arcade:     {}", s.arcade);
            println!("Realistic:  {}", s.realistic);
            println!("Simulation: {}", s.simulation);
            Ok(())
        }
        Commands::Inspect { reference } => {
            let fetcher = HttpFetcher::new(&cli.base_url)?;
            let parser = parser::DetailParser::new()?;
            let stats = crawler::vehicle_stats(&fetcher, &parser, &reference).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn store_path(db: Option<PathBuf>) -> Result<PathBuf> {
    match db {
        Some(path) => Ok(path),
        None => db::default_path(),
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn bare_invocation_runs_with_defaults() {
        let cli = Cli::try_parse_from(["tskill_scraper"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.db.is_none());
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn inspect_takes_reference() {
        let cli = Cli::try_parse_from([
            "tskill_scraper",
            "inspect",
            "/en/vehicle/us_m103",
            "--base-url",
            "http://localhost:8080",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Inspect { reference }) => assert_eq!(reference, "/en/vehicle/us_m103"),
            _ => panic!("expected inspect"),
        }
        assert_eq!(cli.base_url, "http://localhost:8080");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
