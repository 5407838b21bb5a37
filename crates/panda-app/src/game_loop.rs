//! Game loop: drives the simulation engine once per frame.
//!
//! The realtime loop runs on its own thread, measures each frame delta with
//! `Instant`, and stores the latest snapshot in shared state. The headless
//! driver runs inline with a fixed synthetic delta.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use panda_core::commands::SessionCommand;
use panda_core::enums::GamePhase;
use panda_core::input::InputSnapshot;
use panda_core::state::SceneSnapshot;
use panda_sim::{SimConfig, SimulationEngine};

use crate::autopilot;
use crate::state::GameLoopCommand;

/// How the loop paces itself and where its input comes from.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    pub fps: u32,
    /// Steer the player from the previous snapshot.
    pub autopilot: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            autopilot: true,
        }
    }
}

impl LoopOptions {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.fps.max(1)))
    }
}

/// What a finished loop leaves behind.
#[derive(Debug, Clone)]
pub struct LoopReport {
    pub frames: u64,
    pub last_snapshot: Option<SceneSnapshot>,
}

/// Spawns the realtime game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    options: LoopOptions,
    latest_snapshot: Arc<Mutex<Option<SceneSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopReport>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("panda-game-loop".into())
        .spawn(move || run_game_loop(config, options, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The realtime loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    options: LoopOptions,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SceneSnapshot>>,
) -> LoopReport {
    let mut engine = SimulationEngine::new(config);
    let frame_duration = options.frame_duration();
    let mut held = InputSnapshot::default();
    let mut report = LoopReport {
        frames: 0,
        last_snapshot: None,
    };
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Session(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Input(input)) => held = input,
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    log::debug!("game loop stopping after {} frames", report.frames);
                    return report;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Measure the real delta and advance one frame
        let now = Instant::now();
        let elapsed_ms = now.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = now;

        let input = frame_input(&options, held, report.last_snapshot.as_ref());
        let snapshot = engine.tick(elapsed_ms, &input);
        report.frames += 1;

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        report.last_snapshot = Some(snapshot);

        // 4. Sleep until next frame
        next_frame_time += frame_duration;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame_duration * 2 {
            // Too far behind; the engine clamps the delta, so just resync.
            next_frame_time = now;
        }
    }
}

/// Drive a fresh session for `frames` frames at a fixed `1000 / fps` ms delta.
/// Stops early when the session ends.
pub fn run_headless(config: SimConfig, options: LoopOptions, frames: u64) -> LoopReport {
    let mut engine = SimulationEngine::new(config);
    let delta_ms = 1000.0 / f64::from(options.fps.max(1));
    let mut report = LoopReport {
        frames: 0,
        last_snapshot: None,
    };

    engine.queue_command(SessionCommand::StartSession);
    report.last_snapshot = Some(engine.tick(0.0, &InputSnapshot::default()));

    while report.frames < frames {
        let input = frame_input(&options, InputSnapshot::default(), report.last_snapshot.as_ref());
        let snapshot = engine.tick(delta_ms, &input);
        report.frames += 1;
        let ended = snapshot.phase == GamePhase::Ended;
        report.last_snapshot = Some(snapshot);
        if ended {
            break;
        }
    }
    report
}

fn frame_input(
    options: &LoopOptions,
    held: InputSnapshot,
    previous: Option<&SceneSnapshot>,
) -> InputSnapshot {
    match (options.autopilot, previous) {
        (true, Some(snapshot)) => autopilot::steer(snapshot).merge(&held),
        _ => held,
    }
}
