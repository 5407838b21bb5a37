use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;

use panda_app::config::AppConfig;
use panda_app::game_loop::{self, LoopOptions, LoopReport};
use panda_app::state::{AppState, GameLoopCommand};
use panda_core::commands::SessionCommand;
use panda_core::enums::GamePhase;

#[derive(Parser, Debug)]
#[command(name = "panda-warfare")]
#[command(about = "Run the Panda Warfare simulation under an autopilot and report the outcome")]
struct Cli {
    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// Frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Frame rate; the fixed delta is 1000 / fps ms
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// JSON config with seed, field and tuning overrides
    #[arg(long)]
    config: Option<PathBuf>,
    /// Drive the engine from a wall-clock thread instead of a fixed delta
    #[arg(long, default_value_t = false)]
    realtime: bool,
    /// Leave the player idle instead of running the autopilot
    #[arg(long, default_value_t = false)]
    idle: bool,
    /// Write the final snapshot as JSON
    #[arg(long)]
    snapshot_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.fps == 0 {
        bail!("--fps must be at least 1");
    }

    let mut app_config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(seed) = cli.seed {
        app_config.seed = seed;
    }
    let sim_config = app_config.into_sim_config()?;
    let options = LoopOptions {
        fps: cli.fps,
        autopilot: !cli.idle,
    };

    log::info!(
        "seed {} | {} frames at {} fps | {}",
        sim_config.seed,
        cli.frames,
        cli.fps,
        if cli.realtime { "realtime" } else { "fixed delta" }
    );

    let report = if cli.realtime {
        run_realtime(sim_config, options, cli.frames)?
    } else {
        game_loop::run_headless(sim_config, options, cli.frames)
    };

    let Some(snapshot) = report.last_snapshot.as_ref() else {
        bail!("simulation produced no snapshot");
    };

    if let Some(path) = &cli.snapshot_out {
        let json = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("final snapshot written to {}", path.display());
    }

    println!(
        "score {} | wave {} | health {} | frames {}{}",
        snapshot.session.score,
        snapshot.session.wave,
        snapshot.session.health,
        report.frames,
        if snapshot.phase == GamePhase::Ended {
            " | game over"
        } else {
            ""
        }
    );
    Ok(())
}

/// Run the threaded loop for roughly `frames / fps` seconds of wall time, or
/// until the session ends.
fn run_realtime(
    config: panda_sim::SimConfig,
    options: LoopOptions,
    frames: u64,
) -> Result<LoopReport> {
    let state = AppState::new();
    state.start(config, options)?;
    state.send(GameLoopCommand::Session(SessionCommand::StartSession))?;

    let budget = options.frame_duration() * u32::try_from(frames).unwrap_or(u32::MAX);
    let started = Instant::now();
    while started.elapsed() < budget {
        std::thread::sleep(Duration::from_millis(50));
        let ended = state
            .snapshot()
            .is_some_and(|snapshot| snapshot.phase == GamePhase::Ended);
        if ended {
            break;
        }
    }

    state.stop()
}
