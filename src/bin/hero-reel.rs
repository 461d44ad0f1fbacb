use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hero-reel", version)]
struct Cli {
    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an input script and print one JSON view per step.
    Simulate(SimulateArgs),
    /// Print the clip an arbitrary index resolves to.
    Resolve(ResolveArgs),
    /// Validate a page config.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Page config JSON; defaults to the built-in page.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Engine step (milliseconds).
    #[arg(long, default_value_t = 10)]
    step_ms: u64,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Any integer index; normalized onto the clip cycle.
    #[arg(long, allow_negative_numbers = true)]
    index: i64,

    /// Page config JSON; defaults to the built-in page.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Page config JSON.
    #[arg(long)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "hero_reel=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<hero_reel::PageConfig> {
    let config = match path {
        Some(p) => hero_reel::PageConfig::from_path(p)
            .with_context(|| format!("load page config '{}'", p.display()))?,
        None => hero_reel::PageConfig::default(),
    };
    config.validate().with_context(|| "invalid page config")?;
    Ok(config)
}

#[derive(serde::Serialize)]
struct StepReport<'a> {
    step: usize,
    input: &'a hero_reel::PageInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<hero_reel::TriggerOutcome>,
    view: hero_reel::PageView,
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let script = hero_reel::Script::from_path(&args.script)
        .with_context(|| format!("load script '{}'", args.script.display()))?;
    let mut session = hero_reel::PageSession::new(config)?
        .with_step(Duration::from_millis(args.step_ms))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut result: anyhow::Result<()> = Ok(());
    let mut index = 0;
    session.replay(&script, |step, outcome, session| {
        if result.is_err() {
            return;
        }
        let report = StepReport {
            step: index,
            input: &step.input,
            outcome,
            view: hero_reel::PageView::capture(session),
        };
        index += 1;
        result = write_line(&mut out, &report);
    });
    result?;

    // Let the last transition run out before the closing view.
    let tail = session.config().hero.stuck_timeout();
    session.advance(tail);
    write_line(&mut out, &hero_reel::PageView::capture(&session))?;
    Ok(())
}

fn write_line(out: &mut impl std::io::Write, value: &impl serde::Serialize) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, value).with_context(|| "serialize view")?;
    writeln!(out).with_context(|| "write stdout")?;
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let catalog = config.hero.catalog()?;
    let index = catalog.normalize(args.index);
    println!("{index} {}", catalog.source_of(index));
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let config = load_config(Some(&args.config))?;
    eprintln!(
        "ok: {} clips, {} reveals",
        config.hero.clip_count,
        config.reveals.len()
    );
    Ok(())
}
