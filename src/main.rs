//! Philo-Walk main entry point
//!
//! This is the command-line interface for the Philo-Walk link explorer.

use anyhow::Context;
use clap::Parser;
use philo_walk::config::{load_config, validate, Config};
use philo_walk::title::display_title;
use philo_walk::{normalize_title, ArticleSite, CrawlOutcome, Crawler, HttpPageSource, Step, TitleCache};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Philo-Walk: follow first links until you get to Philosophy
///
/// Starting from the given article, Philo-Walk follows the first link in the
/// article body that is not italicized, parenthesized or part of a side box,
/// and reports whether the walk reached the target, hit a dead end or looped.
#[derive(Parser, Debug)]
#[command(name = "philo-walk")]
#[command(version = "1.0.0")]
#[command(about = "Follow first links until you get to Philosophy", long_about = None)]
struct Cli {
    /// Article to start from; several words are joined with underscores
    #[arg(value_name = "START", required = true)]
    start: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Article to stop at
    #[arg(short, long)]
    target: Option<String>,

    /// Cache file location
    #[arg(long, value_name = "PATH")]
    cache: Option<PathBuf>,

    /// Lifetime of cached links in seconds
    #[arg(long, value_name = "SECONDS")]
    ttl: Option<u64>,

    /// Scheme and host of the encyclopedia
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Give up after this many steps
    #[arg(long, value_name = "N")]
    max_steps: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;
    let start = cli.start.join("_");

    run(config, &start).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so they never interleave with the walk on stdout.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("philo_walk=warn,warn"),
            1 => EnvFilter::new("philo_walk=info,warn"),
            2 => EnvFilter::new("philo_walk=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if one was given and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(target) = &cli.target {
        config.crawl.target = target.clone();
    }
    if let Some(max_steps) = cli.max_steps {
        config.crawl.max_steps = Some(max_steps);
    }
    if let Some(path) = &cli.cache {
        config.cache.path = Some(path.clone());
    }
    if let Some(ttl) = cli.ttl {
        config.cache.ttl_seconds = ttl;
    }
    if let Some(base_url) = &cli.base_url {
        config.site.base_url = base_url.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Runs one walk, printing every visited title, and saves the cache
async fn run(config: Config, start: &str) -> anyhow::Result<ExitCode> {
    let site = ArticleSite::from_config(&config.site)?;
    let source = HttpPageSource::from_config(&config)?;
    let target = normalize_title(&config.crawl.target)?;

    let cache_path = config.cache.resolved_path();
    let ttl = chrono::Duration::seconds(i64::try_from(config.cache.ttl_seconds)?);
    let mut cache = TitleCache::load(&cache_path, ttl);
    tracing::info!(
        "Loaded {} cached titles from {}",
        cache.len(),
        cache_path.display()
    );

    if let Ok(title) = normalize_title(start) {
        println!("-> {}", display_title(&title));
    }

    let outcome = {
        let mut crawler = Crawler::new(source, site, &mut cache);
        let walk = crawler.crawl_with_progress(start, &target, config.crawl.max_steps, print_step);

        tokio::select! {
            outcome = walk => Some(outcome),
            _ = tokio::signal::ctrl_c() => None,
        }
    };

    cache.save(&cache_path);

    let Some(outcome) = outcome else {
        println!("Interrupted");
        return Ok(ExitCode::from(130));
    };

    report(&outcome, &target);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_step(step: &Step) {
    println!("-> {}", display_title(&step.to));
}

/// Prints the one-line summary of a finished walk
fn report(outcome: &CrawlOutcome, target: &str) {
    tracing::info!("Walk finished: {}", outcome);

    match outcome {
        CrawlOutcome::Reached { steps } => {
            println!("Found {} in {} steps!", display_title(target), steps);
        }
        CrawlOutcome::InvalidStart { error } => {
            tracing::debug!("Start title rejected: {}", error);
            println!("Invalid start title");
        }
        CrawlOutcome::DeadEnd { title, cause } => {
            tracing::debug!("Dead end cause: {}", cause);
            println!("Found dead end at {} :(", display_title(title));
        }
        CrawlOutcome::Cycle { title, history } => {
            let path: Vec<String> = history
                .iter()
                .chain(std::iter::once(title))
                .map(|t| display_title(t))
                .collect();
            println!(
                "Found infinite loop at {}: {}",
                display_title(title),
                path.join(" -> ")
            );
        }
        CrawlOutcome::StepLimit { steps, .. } => {
            println!("Gave up after {} steps", steps);
        }
    }
}
