mod catalog;
mod db;
mod export;
mod fetch;
mod parser;
mod toc;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::warn;

use parser::{FeatureValue, PageOutput};

#[derive(Parser)]
#[command(name = "smb_scraper", about = "Cisco SMB product-support content scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the source queue: datasheet pages plus guide-book chapters
    Init,
    /// Fetch unvisited source pages
    Fetch {
        /// Max pages to fetch (default: all unvisited)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Parse fetched pages into structured records
    Process {
        /// Max pages to process (default: all unprocessed)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Fetch + process in one pipeline
    Run {
        /// Max pages to fetch+process
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Write JSON exports of the extracted tables
    Export {
        /// Output directory
        #[arg(short, long, default_value = "data/export")]
        out: PathBuf,
    },
    /// Extracted-family overview table
    Overview {
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Show pipeline statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;

            let mut sources: Vec<(String, String, catalog::SourceKind)> = catalog::DATASHEET_SOURCES
                .iter()
                .map(|s| {
                    (
                        s.url.to_string(),
                        s.concept.to_string(),
                        catalog::SourceKind::Datasheet,
                    )
                })
                .collect();

            let client = fetch::build_client()?;
            for book in catalog::GUIDE_BOOKS {
                match toc::expand_guide_book(&client, book).await {
                    Ok(chapters) => sources.extend(chapters),
                    Err(e) => warn!("Skipping guide book {}: {}", book.url, e),
                }
            }

            let inserted = db::insert_sources(&conn, &sources)?;
            println!("Inserted {} new source URLs ({} total found)", inserted, sources.len());
            Ok(())
        }
        Commands::Fetch { limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let sources = db::fetch_unvisited(&conn, limit)?;
            if sources.is_empty() {
                println!("No unvisited sources. Run 'init' first or all pages are fetched.");
                return Ok(());
            }
            println!("Fetching {} pages (streaming to DB)...", sources.len());
            let stats = fetch::fetch_pages_streaming(&conn, sources).await?;
            println!(
                "Done: {} fetched ({} ok, {} errors).",
                stats.total, stats.ok, stats.errors
            );
            Ok(())
        }
        Commands::Process { limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let pages = db::fetch_unprocessed(&conn, limit)?;
            if pages.is_empty() {
                println!("No unprocessed pages. Run 'fetch' first.");
                return Ok(());
            }
            println!("Processing {} pages...", pages.len());
            let counts = process_pages(&conn, &pages)?;
            counts.print();
            Ok(())
        }
        Commands::Run { limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let sources = db::fetch_unvisited(&conn, limit)?;
            if sources.is_empty() {
                println!("No unvisited sources. Run 'init' first.");
                return Ok(());
            }

            // Phase 1: Fetch (streaming to DB)
            let t_fetch = Instant::now();
            println!("Pipeline: fetching {} pages (streaming to DB)...", sources.len());
            let stats = fetch::fetch_pages_streaming(&conn, sources).await?;
            println!(
                "Fetched {} pages ({} ok, {} errors) in {:.1}s",
                stats.total, stats.ok, stats.errors, t_fetch.elapsed().as_secs_f64()
            );

            // Phase 2: Process
            let t_process = Instant::now();
            let unprocessed = db::fetch_unprocessed(&conn, None)?;
            if unprocessed.is_empty() {
                println!("Nothing to process (all fetched pages had errors).");
                return Ok(());
            }
            println!("Processing {} pages...", unprocessed.len());
            let counts = process_pages(&conn, &unprocessed)?;
            println!("Processed in {:.1}s", t_process.elapsed().as_secs_f64());
            counts.print();
            Ok(())
        }
        Commands::Export { out } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            export::export_all(&conn, &out)?;
            println!("Exports written to {}", out.display());
            Ok(())
        }
        Commands::Overview { limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let rows = overview_rows(&conn, limit)?;
            if rows.is_empty() {
                println!("No extracted families found.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<44} | {:>6} | {:>8} | {}",
                "#", "Family", "Models", "Features", "Source"
            );
            println!("{}", "-".repeat(110));
            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<44} | {:>6} | {:>8} | {}",
                    i + 1,
                    truncate(&r.family, 44),
                    r.model_count,
                    r.feature_count,
                    truncate(&r.url, 40)
                );
            }
            println!("\n{} families", rows.len());
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Total:        {}", s.total);
            println!("Visited:      {}", s.visited);
            println!("Unvisited:    {}", s.unvisited);
            println!("Fetched:      {}", s.fetched);
            println!("Errors:       {}", s.errors);
            println!("Datasheets:   {}", s.datasheets);
            println!("CLI commands: {}", s.cli_commands);
            println!("Articles:     {}", s.articles);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

struct ProcessCounts {
    datasheets: usize,
    models: usize,
    cli_commands: usize,
    articles: usize,
}

impl ProcessCounts {
    fn print(&self) {
        println!(
            "Saved {} datasheet families ({} models), {} CLI commands, {} articles.",
            self.datasheets, self.models, self.cli_commands, self.articles,
        );
    }
}

fn process_pages(
    conn: &rusqlite::Connection,
    pages: &[db::FetchedPage],
) -> anyhow::Result<ProcessCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut counts = ProcessCounts {
        datasheets: 0,
        models: 0,
        cli_commands: 0,
        articles: 0,
    };

    for chunk in pages.chunks(50) {
        let results: Vec<PageOutput> = chunk.par_iter().map(parser::process_page).collect();

        let mut families = Vec::new();
        let mut cli_commands = Vec::new();
        let mut articles = Vec::new();
        let mut done_ids = Vec::new();

        for (page, output) in chunk.iter().zip(results) {
            done_ids.push(page.page_data_id);
            match output {
                PageOutput::Datasheet(record) => {
                    counts.models += record
                        .features
                        .values()
                        .filter(|v| matches!(v, FeatureValue::Map(_)))
                        .count();
                    families.push(db::FamilyFeatureRow {
                        page_data_id: page.page_data_id,
                        family: record.family.clone(),
                        url: page.url.clone(),
                        features: serde_json::to_string(&record.features)?,
                    });
                }
                PageOutput::CliGuide(records) => {
                    cli_commands.extend(parser::cli_record_rows(page.page_data_id, &records)?);
                }
                PageOutput::AdminGuide(records) => {
                    for r in &records {
                        articles.push(db::GuideRecordRow {
                            page_data_id: page.page_data_id,
                            doc_id: r.meta.doc_id.clone(),
                            topic: r.topic.clone(),
                            command_name: None,
                            record: serde_json::to_string(r)?,
                        });
                    }
                }
            }
        }

        counts.datasheets += families.len();
        counts.cli_commands += cli_commands.len();
        counts.articles += articles.len();
        db::save_family_features(conn, &families)?;
        db::save_cli_commands(conn, &cli_commands)?;
        db::save_guide_articles(conn, &articles)?;
        db::mark_processed(conn, &done_ids)?;
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

fn overview_rows(
    conn: &rusqlite::Connection,
    limit: usize,
) -> anyhow::Result<Vec<db::OverviewRow>> {
    let rows = db::fetch_family_features(conn)?;
    let mut out = Vec::new();
    for (family, url, features) in rows.into_iter().take(limit) {
        let features: parser::Features = serde_json::from_str(&features)?;
        let model_count = features
            .values()
            .filter(|v| matches!(v, FeatureValue::Map(_)))
            .count();
        out.push(db::OverviewRow {
            family,
            url,
            model_count,
            feature_count: features.len(),
        });
    }
    Ok(out)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
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
