use anyhow::Context;
use bingo_core::{BingoEngine, BingoRun, RngState};
use bingo_data::{load_playlist_export, load_settings, PoolCache, RunSettings};
use bingo_report::{heatmap_lines, write_json, write_text, AnalysisReport, Document};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_OUTPUT: &str = "bingo_cards.txt";

#[derive(Debug, Parser)]
#[command(name = "bingo", version, about = "Generate playlist bingo cards and check how fair they are")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a deck and write the printable cards
    Generate(GenerateArgs),
    /// Build one or more decks and print only the fairness analysis
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Clone, Args)]
struct DeckArgs {
    /// Playlist export (JSON page, list of pages, or list of entries)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Settings file; flags below override it
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Comma-separated title delimiters, e.g. "-, (, ["
    #[arg(long)]
    delimiters: Option<String>,

    /// Turn off the trim-at-first-delimiter switch
    #[arg(long)]
    no_trim_first: bool,

    /// Number of cards in the deck
    #[arg(short = 'n', long)]
    cards: Option<usize>,

    /// Seed for a reproducible deck
    #[arg(long, env = "BINGO_SEED")]
    seed: Option<u64>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    deck: DeckArgs,

    /// Title printed on every card page
    #[arg(long)]
    title: Option<String>,

    /// Leave artist names off the cards
    #[arg(long)]
    hide_artists: bool,

    /// Where to write the rendered cards
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Also write the analysis as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    deck: DeckArgs,

    /// Number of decks to build, each with the next seed
    #[arg(long, default_value_t = 1)]
    runs: u32,
}

fn init_logger(verbose: bool) {
    let default = if verbose { "bingo=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn resolve_settings(args: &DeckArgs) -> anyhow::Result<RunSettings> {
    let mut settings = match args.settings.as_deref() {
        Some(path) => load_settings(path)?,
        None => RunSettings::default(),
    };
    if let Some(delimiters) = args.delimiters.as_ref() {
        settings.delimiters = delimiters.clone();
    }
    if args.no_trim_first {
        settings.trim_first = false;
    }
    if let Some(cards) = args.cards {
        settings.num_cards = cards;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    settings.validate()?;
    Ok(settings)
}

/// Loads the pool for `input` through the cache, shuffles it with `rng`, then
/// generates and analyzes. The reported seed replays the same deck.
fn build_run(
    cache: &mut PoolCache,
    input: &Path,
    settings: &RunSettings,
    rng: &mut RngState,
) -> anyhow::Result<BingoRun> {
    let rules = settings.title_rules();
    let source = input.display().to_string();
    let cached = cache
        .pool_for_run(&source, &rules, rng, || load_playlist_export(input))
        .with_context(|| format!("build pool from {}", input.display()))?;
    for warning in &cached.report.warnings {
        tracing::warn!("{warning}");
    }
    let engine = BingoEngine::new(rules, settings.num_cards);
    Ok(engine.run_with_pool(cached.pool, cached.report, rng)?)
}

fn print_summary(run: &BingoRun) {
    let report = &run.pool_report;
    println!("seed: {}", run.seed);
    println!(
        "pool: {} unique of {} records (removed {}, malformed {}, replaced {})",
        report.unique,
        report.total_records,
        report.removed,
        report.malformed,
        report.duplicates_replaced
    );
    println!(
        "deck: {} cards, {} repeat placements, intra-card duplicates: {}",
        run.deck.len(),
        run.analysis.total_repeats,
        if run.analysis.dup_free() { "none" } else { "FOUND" }
    );
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut settings = resolve_settings(&args.deck)?;
    if let Some(title) = args.title {
        settings.page_title = title;
    }
    if args.hide_artists {
        settings.show_artists = false;
    }
    let mut rng = settings.rng();
    let mut cache = PoolCache::new();
    let run = build_run(&mut cache, &args.deck.input, &settings, &mut rng)?;

    let document = Document::new(
        &run.deck,
        &run.analysis,
        &settings.page_title,
        settings.show_artists,
    );
    let out = args.out.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    write_text(&out, &document.render()).with_context(|| format!("write {}", out.display()))?;
    tracing::info!(path = %out.display(), "cards written");

    if let Some(path) = args.json.as_ref() {
        let report = AnalysisReport::new(run.seed, run.pool.len(), &run.analysis);
        write_json(path, &report).with_context(|| format!("write {}", path.display()))?;
    }

    print_summary(&run);
    println!("cards: {}", out.display());
    Ok(())
}

fn run_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let settings = resolve_settings(&args.deck)?;
    let base_seed = settings.rng().seed();
    let mut cache = PoolCache::new();
    let mut repeat_totals = Vec::new();
    for offset in 0..args.runs.max(1) {
        let mut rng = RngState::from_seed(base_seed.wrapping_add(u64::from(offset)));
        let run = build_run(&mut cache, &args.deck.input, &settings, &mut rng)?;
        print_summary(&run);
        for line in heatmap_lines(&run.analysis.heatmap) {
            println!("{line}");
        }
        if args.runs <= 1 {
            let document = Document::new(&run.deck, &run.analysis, "", false);
            if let Some(table) = document.pages().get(1) {
                println!();
                println!("{table}");
            }
        }
        println!();
        repeat_totals.push(run.analysis.total_repeats);
    }
    if repeat_totals.len() > 1 {
        let sum: u64 = repeat_totals.iter().map(|total| u64::from(*total)).sum();
        let min = repeat_totals.iter().min().copied().unwrap_or(0);
        let max = repeat_totals.iter().max().copied().unwrap_or(0);
        println!(
            "runs: {} repeat placements min {} max {} mean {:.2}",
            repeat_totals.len(),
            min,
            max,
            sum as f64 / repeat_totals.len() as f64
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Analyze(args) => run_analyze(args),
    }
}
