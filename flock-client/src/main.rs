use anyhow::{bail, Context, Result};
use clap::Parser;
use flock_client::attractor::ScriptedAttractor;
use flock_client::{
    settings, AttractorMode, AttractorSource, DiscardSink, FrameSink, JsonLinesSink, Pacer,
    SimulationLoop,
};
use flock_core::Flock;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flocking simulation", long_about = None)]
struct Args {
    /// Number of agents
    #[arg(short = 'n', long, default_value_t = 10)]
    agents: usize,

    /// Arena width (overrides the config file)
    #[arg(long)]
    width: Option<f32>,

    /// Arena height (overrides the config file)
    #[arg(long)]
    height: Option<f32>,

    /// Number of ticks to run; 0 runs until interrupted or the script ends
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Ticks per second; 0 runs as fast as possible
    #[arg(short = 'r', long, default_value_t = 60)]
    tick_rate: u32,

    /// Seed for the initial agent placement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Attractor: 'none', 'center', 'orbit' or a fixed point 'x,y'
    #[arg(short, long, default_value = "orbit")]
    attractor: AttractorMode,

    /// Replay attractor positions from a file, one 'x,y' per tick
    #[arg(long, conflicts_with = "attractor")]
    script: Option<PathBuf>,

    /// JSON simulation config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log flock statistics every N ticks (debug level); 0 disables
    #[arg(long, default_value_t = 60)]
    stats_every: u64,

    /// Write frames to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Don't emit frames at all
    #[arg(short, long, conflicts_with = "output")]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let config = settings::resolve_config(args.config.as_deref(), args.width, args.height)?;

    if args.ticks == 0 && args.script.is_none() && args.tick_rate == 0 {
        bail!("An unbounded run needs a tick rate; pass --ticks or --tick-rate");
    }

    log::info!("Flock client starting...");
    log::info!("Agents: {}", args.agents);
    log::info!("Arena: {}x{}", config.arena.width, config.arena.height);

    let flock = match args.seed {
        Some(seed) => Flock::seeded(args.agents, config, seed),
        None => Flock::random(args.agents, config),
    }
    .context("Failed to create flock")?;

    let attractor: Box<dyn AttractorSource> = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open attractor script {}", path.display()))?;
            log::info!("Attractor: script {}", path.display());
            Box::new(ScriptedAttractor::new(BufReader::new(file)))
        }
        None => {
            log::info!("Attractor: {:?}", args.attractor);
            args.attractor.into_source(&config.arena)
        }
    };

    let sink: Box<dyn FrameSink> = if args.quiet {
        Box::new(DiscardSink)
    } else if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        Box::new(JsonLinesSink::new(BufWriter::new(file)))
    } else {
        Box::new(JsonLinesSink::new(io::stdout().lock()))
    };

    let mut simulation = SimulationLoop::new(flock, attractor, sink)
        .with_pacer(Pacer::new(args.tick_rate))
        .with_max_ticks(args.ticks)
        .with_stats_every(args.stats_every);

    simulation.run().context("Simulation error")?;

    Ok(())
}
