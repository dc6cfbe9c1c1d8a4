//! HCMUS news crawler CLI
//!
//! Crawls one program's sources and writes the Markdown report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hcmus_news::{
    error::Result,
    models::{Config, CrawlerReport, Program},
    pipeline::{NewsCrawler, SystemClock, render_markdown},
    storage::{LocalStorage, ReportStorage},
    utils::http::HttpFetcher,
};

/// HCMUS News Crawler - collect university announcements into Markdown
#[derive(Parser, Debug)]
#[command(name = "hcmus-news", version, about = "HCMUS news crawler")]
struct Cli {
    /// Program whose news to crawl
    #[arg(short, long, value_enum, default_value_t = Program::Apcs)]
    program: Program,

    /// Enable verbose logging and a run summary
    #[arg(short, long)]
    verbose: bool,

    /// Path to the configuration file (defaults are used if it is missing)
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Directory for the report (overrides `report.output_dir`)
    #[arg(short, long)]
    output_dir: Option<String>,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load the config file if present. A broken file falls back to defaults and
/// the reason is returned so it can be shown in the report.
fn load_config(cli: &Cli) -> (Config, Option<String>) {
    if !cli.config.exists() {
        log::info!("No config at {}, using defaults", cli.config.display());
        return (Config::default(), None);
    }
    match Config::load(&cli.config) {
        Ok(config) => {
            log::info!("Loaded configuration from {}", cli.config.display());
            (config, None)
        }
        Err(e) => {
            log::warn!("Config load failed from {}: {}", cli.config.display(), e);
            let message = format!(
                "Configuration: could not load {} ({}), using defaults",
                cli.config.display(),
                e
            );
            (Config::default(), Some(message))
        }
    }
}

fn print_summary(report: &CrawlerReport) {
    println!("Found {} news items across all sources", report.total_items());
    let failed = report.sections_with_errors();
    if !failed.is_empty() {
        println!("{} source(s) had errors:", failed.len());
        for section in failed {
            println!(
                "  - {}: {}",
                section.title(),
                section.error_message().unwrap_or_default()
            );
        }
    }
}

async fn run(cli: &Cli) -> Result<Option<PathBuf>> {
    let (mut config, config_error) = load_config(cli);
    if let Some(dir) = &cli.output_dir {
        config.report.output_dir = dir.clone();
    }
    config.validate()?;

    let fetcher = HttpFetcher::new(&config.http)?;
    let clock = SystemClock::from_config(&config.report)?;
    let mut crawler = NewsCrawler::new(&config, &fetcher, &clock);
    if let Some(message) = config_error {
        crawler.report_error(message);
    }

    println!(
        "Crawling {} news from HCMUS...",
        cli.program.as_str().to_uppercase()
    );

    let report = tokio::select! {
        report = crawler.generate_report(cli.program) => report,
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted, report not written");
            return Ok(None);
        }
    };

    if cli.verbose {
        print_summary(&report);
    }

    let markdown = render_markdown(&report, &config.report.title);
    let storage = LocalStorage::new(&config.report.output_dir);
    let path = storage
        .write_report(cli.program.output_filename(), &markdown)
        .await?;
    Ok(Some(path))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(Some(path)) => {
            println!("Success! Results saved to: {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("Crawling interrupted by user");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
