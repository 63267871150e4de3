#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for business opportunity ranking.
//!
//! Every command analyzes regions on the fly: region data comes from a JSON
//! dataset file (`--data`) or, by default, from the synthetic provider.
//! Reports are built over a fresh in-memory store seeded by those analyses.
//! All documents are printed as pretty JSON on stdout; logs go to stderr
//! (`RUST_LOG=info` to see them).

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Parser, Subcommand};
use opportunity_map_analysis::{RegionRanker, ScoringConfig, ranker::DEFAULT_TOP_N};
use opportunity_map_analysis_models::RankingOutcome;
use opportunity_map_category_models::BusinessCategory;
use opportunity_map_report::ReportGenerator;
use opportunity_map_source::{
    InputProvider, static_data::StaticProvider, synthetic::SyntheticProvider,
};
use opportunity_map_store::{MemoryStore, OpportunityStore, StoreError};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "opportunity_map",
    about = "Rank business opportunities for urban regions"
)]
struct Cli {
    /// Scoring configuration TOML file (defaults to the built-in configuration)
    #[arg(long, global = true, env = "OPPORTUNITY_MAP_CONFIG")]
    config: Option<PathBuf>,
    /// JSON file mapping region names to their datasets (defaults to
    /// synthetic data)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every catalog category for one or more regions
    Analyze {
        /// Region names (e.g., "Pinheiros")
        #[arg(required = true)]
        regions: Vec<String>,
        /// Number of top opportunities to report per region
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
    },
    /// Analyze regions and build a report over the results
    Report {
        #[command(subcommand)]
        report: ReportCommand,
    },
    /// List the category catalog with population thresholds
    Categories,
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Region-wide executive summary
    Executive {
        /// Region name
        region: String,
        /// Restrict the report to one category (e.g., "`pet_shop`")
        #[arg(long)]
        category: Option<BusinessCategory>,
    },
    /// Deep dive on one category in one region
    Detailed {
        /// Region name
        region: String,
        /// Category (e.g., "Pharmacy" or "`pet_shop`")
        category: BusinessCategory,
    },
    /// Compare two or more regions side by side
    Compare {
        /// Region names
        #[arg(required = true, num_args = 2..)]
        regions: Vec<String>,
        /// Compare only this category in every region
        #[arg(long)]
        category: Option<BusinessCategory>,
    },
}

fn load_config(path: Option<&Path>) -> Result<ScoringConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => ScoringConfig::from_path(path)?,
        None => ScoringConfig::default(),
    })
}

fn load_provider(
    data: Option<&Path>,
    config: &ScoringConfig,
) -> Result<Arc<dyn InputProvider>, Box<dyn std::error::Error>> {
    let provider: Arc<dyn InputProvider> = match data {
        Some(path) => Arc::new(StaticProvider::from_path(path)?),
        None => {
            log::info!("No dataset file given, using synthetic region data");
            Arc::new(SyntheticProvider::new(config.catalog().collect()))
        }
    };
    Ok(provider)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Analyzes `regions` and upserts the results into a fresh store.
async fn seed_store(
    ranker: &RegionRanker,
    regions: &[String],
) -> Result<Arc<MemoryStore>, StoreError> {
    let store = Arc::new(MemoryStore::new());

    for result in ranker.analyze_regions(regions) {
        match &result.outcome {
            RankingOutcome::Success(_) => {}
            RankingOutcome::NoData { message } => log::warn!("{message}"),
            RankingOutcome::Error { error } => {
                log::error!("Analysis of '{}' failed: {error}", result.region);
            }
        }
        store.upsert_region(&result).await?;
    }

    Ok(store)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let config = Arc::new(load_config(cli.config.as_deref())?);

    match cli.command {
        Commands::Categories => {
            println!("{:<20} POPULATION THRESHOLD", "CATEGORY");
            println!("{}", "-".repeat(41));
            for category in config.catalog() {
                println!(
                    "{:<20} {}",
                    category.label(),
                    config.population_threshold(category)
                );
            }
        }
        Commands::Analyze { regions, top } => {
            let provider = load_provider(cli.data.as_deref(), &config)?;
            let ranker = RegionRanker::new(config, provider).with_top_n(top);
            print_json(&ranker.analyze_regions(&regions))?;
        }
        Commands::Report { report } => {
            let provider = load_provider(cli.data.as_deref(), &config)?;
            let ranker = RegionRanker::new(config.clone(), provider);

            match report {
                ReportCommand::Executive { region, category } => {
                    let store = seed_store(&ranker, std::slice::from_ref(&region)).await?;
                    let generator = ReportGenerator::new(store, config);
                    print_json(&generator.executive(&region, category).await?)?;
                }
                ReportCommand::Detailed { region, category } => {
                    let store = seed_store(&ranker, std::slice::from_ref(&region)).await?;
                    let generator = ReportGenerator::new(store, config);
                    print_json(&generator.detailed(&region, category).await?)?;
                }
                ReportCommand::Compare { regions, category } => {
                    let store = seed_store(&ranker, &regions).await?;
                    let generator = ReportGenerator::new(store, config);
                    print_json(&generator.comparison(&regions, category).await?)?;
                }
            }
        }
    }

    Ok(())
}
