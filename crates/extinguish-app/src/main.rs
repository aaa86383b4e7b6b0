use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use extinguish_app::game_loop::{spawn_game_loop, tick_duration};
use extinguish_app::script::{run_pass_drill, CommandSource, PassDrill, Stage};
use extinguish_app::state::AppState;
use extinguish_core::commands::InputCommand;
use extinguish_core::config::DrillConfig;
use extinguish_core::enums::DrillPhase;
use extinguish_sim::engine::SimConfig;

#[derive(Parser)]
#[command(name = "extinguish", about = "Fire extinguisher training drill runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scripted PASS drill as fast as possible and print the report as JSON.
    Drill {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Drill config JSON. Defaults are used for missing fields.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Simulated time budget in seconds.
        #[arg(long, default_value_t = 120.0)]
        max_secs: f64,
        #[arg(long)]
        pretty: bool,
    },
    /// Run the real-time game loop with the scripted trainee.
    Run {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Wall-clock seconds before giving up.
        #[arg(long, default_value_t = 60.0)]
        secs: f64,
    },
}

fn load_config(path: Option<&Path>) -> Result<DrillConfig> {
    let Some(path) = path else {
        return Ok(DrillConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    DrillConfig::from_json(&json).map_err(|err| anyhow!("invalid config {}: {err}", path.display()))
}

fn drill(seed: u64, config: Option<&Path>, max_secs: f64, pretty: bool) -> Result<()> {
    let drill = load_config(config)?;
    let report = run_pass_drill(SimConfig { seed, drill }, max_secs);
    if report.stage != Stage::Done {
        warn!(stage = ?report.stage, ticks = report.ticks, "drill ran out of time");
    }
    let json = if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("serializing drill report")?;
    println!("{json}");
    Ok(())
}

fn run(seed: u64, config: Option<&Path>, secs: f64) -> Result<()> {
    let drill = load_config(config)?;
    let mut script = PassDrill::new(&drill);
    let sim_config = SimConfig { seed, drill };
    let poll = tick_duration(&sim_config);

    let state = AppState::new();
    let (tx, handle) = spawn_game_loop(sim_config, state.latest_snapshot.clone())
        .context("spawning game loop thread")?;
    *state
        .command_tx
        .lock()
        .map_err(|_| anyhow!("command channel lock poisoned"))? = Some(tx);
    *state
        .running
        .lock()
        .map_err(|_| anyhow!("running flag lock poisoned"))? = true;

    state.send(InputCommand::StartDrill).map_err(|e| anyhow!(e))?;

    let deadline = Instant::now() + Duration::from_secs_f64(secs.max(0.0));
    let mut last_tick = None;
    while Instant::now() < deadline && script.stage() != Stage::Done {
        std::thread::sleep(poll);
        let Some(snapshot) = state.latest() else {
            continue;
        };
        // One decision per simulated tick
        if last_tick == Some(snapshot.time.tick) && snapshot.phase == DrillPhase::Active {
            continue;
        }
        last_tick = Some(snapshot.time.tick);
        for command in script.next_commands(&snapshot) {
            state.send(command).map_err(|e| anyhow!(e))?;
        }
    }

    let final_snapshot = state.latest();
    state.shutdown();
    handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;

    match final_snapshot {
        Some(snapshot) => info!(
            phase = ?snapshot.phase,
            fires_out = snapshot.score.fires_out,
            fires_total = snapshot.score.fires_total,
            completion_secs = ?snapshot.score.completion_secs,
            "run finished"
        ),
        None => warn!("run finished before the first tick"),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Drill {
            seed,
            config,
            max_secs,
            pretty,
        } => drill(seed, config.as_deref(), max_secs, pretty)?,
        Commands::Run { seed, config, secs } => run(seed, config.as_deref(), secs)?,
    }
    Ok(())
}
