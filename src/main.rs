//! Bookmark-Sweep main entry point
//!
//! Command-line interface for sweeping a bookmark export: health-checks
//! every link, optionally re-categorizes live ones, and writes a cleaned
//! bookmark file plus a resumable JSON progress report.

use anyhow::Context;
use bookmark_sweep::bookmarks::parse_bookmarks;
use bookmark_sweep::config::{load_config, resolve_api_key, Config};
use bookmark_sweep::pipeline::{
    pending_links, Classifier, Coordinator, EscalationGate, HealthChecker, RunOutcome, SharedRun,
};
use bookmark_sweep::progress::ProgressStore;
use bookmark_sweep::prompt::{ConsolePrompt, OperatorPrompt};
use bookmark_sweep::SweepError;
use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Bookmark-Sweep: clean and re-organize a bookmark export
///
/// Checks every link for liveness, optionally re-categorizes live links
/// through an external classification service, and renders a cleaned
/// bookmark file. Progress is checkpointed and resumable; ctrl-c saves
/// everything completed so far.
#[derive(Parser, Debug)]
#[command(name = "bookmark-sweep")]
#[command(version = "1.0.0")]
#[command(about = "A bookmark liveness sweeper and re-organizer", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Resume from an existing report without prompting
    #[arg(long, conflicts_with = "fresh")]
    resume: bool,

    /// Ignore any existing report and start over
    #[arg(long, conflicts_with = "resume")]
    fresh: bool,

    /// Enable classification without prompting
    #[arg(long, conflicts_with = "no_classify")]
    classify: bool,

    /// Disable classification without prompting
    #[arg(long = "no-classify", conflicts_with = "classify")]
    no_classify: bool,

    /// Validate config, parse the input, and show what would run
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config).context("failed to load configuration")?;

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    handle_sweep(config, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookmark_sweep=info,warn"),
            1 => EnvFilter::new("bookmark_sweep=debug,info"),
            2 => EnvFilter::new("bookmark_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Bookmark-Sweep Dry Run ===\n");

    println!("Files:");
    println!("  Input: {}", config.files.input_path);
    println!("  Report: {}", config.files.report_path);
    println!("  Output: {}", config.files.output_path);

    println!("\nPipeline:");
    println!("  Concurrency: {}", config.pipeline.concurrent_limit);
    println!("  Max retries: {}", config.pipeline.max_retries);
    println!("  Retry delay: {}ms", config.pipeline.retry_delay_ms);

    println!("\nHealth checks:");
    println!("  Timeout: {}ms", config.health.timeout_ms);
    println!("  Spam keywords: {}", config.health.spam_keywords.len());

    println!("\nClassifier:");
    println!("  Endpoint: {}", config.classifier.endpoint);
    println!("  Model: {}", config.classifier.model);
    println!("  Credential env: {}", config.classifier.api_key_env);
    println!("  Categories: {}", config.classifier.categories.len());

    let html = std::fs::read_to_string(&config.files.input_path)
        .map_err(|_| SweepError::MissingInput {
            path: config.files.input_path.clone(),
        })?;
    let links = parse_bookmarks(&html);

    println!("\n✓ Configuration is valid");
    println!("✓ Would process {} links", links.len());

    Ok(())
}

/// Handles the main sweep operation
async fn handle_sweep(config: Config, cli: &Cli) -> anyhow::Result<()> {
    let prompt: Arc<dyn OperatorPrompt> = Arc::new(ConsolePrompt);

    // Parse the input export
    let html = std::fs::read_to_string(&config.files.input_path)
        .map_err(|_| SweepError::MissingInput {
            path: config.files.input_path.clone(),
        })?;
    let all_links = parse_bookmarks(&html);
    let total = all_links.len();
    tracing::info!("Found {} links in {}", total, config.files.input_path);

    let store = Arc::new(ProgressStore::new(
        &config.files.report_path,
        &config.files.output_path,
    ));

    // Resume decision, gated on a non-empty existing report
    let existing = if cli.fresh { Vec::new() } else { store.load() };
    let resume = !existing.is_empty()
        && (cli.resume || prompt.confirm_resume(existing.len()).map_err(prompt_err)?);

    let (shared, links) = if resume {
        tracing::info!("Resuming: {} links already completed", existing.len());
        let links = pending_links(all_links, &existing);
        (Arc::new(SharedRun::seeded(existing)), links)
    } else {
        (Arc::new(SharedRun::new()), all_links)
    };

    if links.is_empty() {
        println!("{}", style("Nothing left to process.").green());
        return Ok(());
    }

    // Classification decision
    let enable_classification = if cli.classify {
        true
    } else if cli.no_classify {
        false
    } else {
        prompt.confirm_classification().map_err(prompt_err)?
    };

    let health = Arc::new(HealthChecker::new(&config.health)?);

    let classifier = if enable_classification {
        let api_key = resolve_api_key(&config)?;
        let gate = Arc::new(EscalationGate::new(Arc::clone(&prompt)));
        Some(Arc::new(Classifier::new(
            &config.classifier,
            api_key,
            config.pipeline.max_retries,
            Duration::from_millis(config.pipeline.retry_delay_ms),
            gate,
        )?))
    } else {
        None
    };

    println!("{}", style("Tip: ctrl-c interrupts and saves progress.").dim());

    let coordinator = Coordinator::new(
        config.pipeline.concurrent_limit,
        config.pipeline.checkpoint_every,
        health,
        classifier,
        Arc::clone(&store),
        shared,
    );

    match coordinator.run(links, total).await? {
        RunOutcome::Completed => {
            println!("\n{}", style("✓ Sweep complete.").green());
        }
        RunOutcome::Stopped => {
            println!("\n{}", style("Stopped at operator request; progress saved.").yellow());
        }
        RunOutcome::Interrupted => {
            println!("\n{}", style("Interrupted; progress saved.").yellow());
            // In-flight prompts may hold a blocking thread; exit directly.
            std::process::exit(0);
        }
    }

    Ok(())
}

fn prompt_err(e: std::io::Error) -> SweepError {
    SweepError::Prompt(e.to_string())
}
