use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

const MAX_STEPS: i64 = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "scrollstage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a stage config.
    Validate(ValidateArgs),
    /// Replay a progress sequence and print one render state per line.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Stage config JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Stage config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Comma-separated raw progress values.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, conflicts_with = "steps")]
    progress: Vec<f64>,

    /// Sweep `[0, 1]` in this many evenly spaced ticks instead.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_STEPS))]
    steps: Option<u32>,

    /// Wall-clock time fed to periodic curves.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Disable cross-fade phases.
    #[arg(long)]
    no_crossfade: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn read_config(path: &Path) -> anyhow::Result<scrollstage::StageConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let config = scrollstage::StageConfig::from_json_reader(BufReader::new(f))
        .with_context(|| format!("parse config '{}'", path.display()))?;
    Ok(config)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let config = read_config(&args.config)?;
    config.validate()?;
    println!(
        "ok: {} stages, hysteresis {}",
        config.len(),
        config.hysteresis
    );
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let config = read_config(&args.config)?;
    let opts = scrollstage::OrchestratorOpts {
        crossfade: !args.no_crossfade,
        initial_time_secs: args.time,
    };
    let mut orchestrator = scrollstage::Orchestrator::with_opts(config, opts)?;

    let progress: Box<dyn Iterator<Item = f64>> = match args.steps {
        Some(1) => Box::new(std::iter::once(0.0)),
        Some(n) => Box::new((0..n).map(move |i| f64::from(i) / f64::from(n - 1))),
        None if args.progress.is_empty() => {
            anyhow::bail!("pass either --progress or --steps")
        }
        None => Box::new(args.progress.into_iter()),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut states = Vec::new();
    for p in progress {
        let state = orchestrator.tick(p);
        serde_json::to_writer(&mut out, &*state).context("serialize render state")?;
        writeln!(out)?;
        states.push(state);
    }
    out.flush()?;

    let fp = scrollstage::fingerprint_states(states.iter().map(|s| &**s));
    eprintln!("fingerprint {fp}");
    Ok(())
}
