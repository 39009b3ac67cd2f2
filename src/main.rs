//! Bunny Jump headless runner
//!
//! Drives sessions on the reference arcade host with a scripted input and
//! logs how each one went. Set `RUST_LOG=debug` to see every recycle and
//! collection.

use std::process::ExitCode;

use bunny_jump::Tuning;
use bunny_jump::arcade::{ArcadeConfig, ArcadeHost};
use bunny_jump::consts::*;
use bunny_jump::sim::{Direction, GameEvent, GameState, tick};

/// Scripted stand-in for keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Idle,
    Left,
    Right,
    /// Alternate direction every 90 frames
    Zigzag,
    /// Steer toward the nearest live collectible above the player
    Chase,
}

impl Script {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "idle" => Some(Script::Idle),
            "left" => Some(Script::Left),
            "right" => Some(Script::Right),
            "zigzag" => Some(Script::Zigzag),
            "chase" => Some(Script::Chase),
            _ => None,
        }
    }

    fn direction(self, frame: u64, state: &GameState) -> Direction {
        match self {
            Script::Idle => Direction::None,
            Script::Left => Direction::Left,
            Script::Right => Direction::Right,
            Script::Zigzag => {
                if (frame / 90) % 2 == 0 {
                    Direction::Left
                } else {
                    Direction::Right
                }
            }
            Script::Chase => {
                let player = state.player.pos;
                let target = state
                    .collectibles
                    .iter_active()
                    .map(|(_, c)| c.body.pos)
                    .filter(|pos| pos.y < player.y)
                    .min_by(|a, b| {
                        a.distance_squared(player)
                            .partial_cmp(&b.distance_squared(player))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    });
                match target {
                    Some(pos) if pos.x < player.x - 10.0 => Direction::Left,
                    Some(pos) if pos.x > player.x + 10.0 => Direction::Right,
                    _ => Direction::None,
                }
            }
        }
    }
}

/// Command line options
#[derive(Debug, Clone)]
struct Options {
    seed: u64,
    frames: u64,
    sessions: u32,
    fps: u32,
    script: Script,
    tuning: Option<String>,
    dump: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 1,
            frames: 60 * 60 * 5,
            sessions: 1,
            fps: 60,
            script: Script::Chase,
            tuning: None,
            dump: false,
        }
    }
}

impl Options {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self, String> {
        let mut options = Self::default();
        while let Some(arg) = args.next() {
            let mut value = |name: &str| args.next().ok_or_else(|| format!("{} needs a value", name));
            match arg.as_str() {
                "--seed" => options.seed = parse_number(&value("--seed")?)?,
                "--frames" => options.frames = parse_number(&value("--frames")?)?,
                "--sessions" => options.sessions = parse_number(&value("--sessions")?)?,
                "--fps" => options.fps = parse_number::<u32>(&value("--fps")?)?.max(1),
                "--script" => {
                    let name = value("--script")?;
                    options.script = Script::from_str(&name).ok_or_else(|| format!("unknown script: {}", name))?;
                }
                "--tuning" => options.tuning = Some(value("--tuning")?),
                "--dump" => options.dump = true,
                other => return Err(format!("unknown argument: {}", other)),
            }
        }
        Ok(options)
    }
}

fn parse_number<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.parse().map_err(|_| format!("not a number: {}", s))
}

/// One session: core state, host and fixed-step accumulator
struct Runner {
    state: GameState,
    host: ArcadeHost,
    script: Script,
    accumulator: f32,
}

impl Runner {
    fn new(seed: u64, tuning: Tuning, script: Script) -> Self {
        let mut state = GameState::new(seed, tuning);
        let mut host = ArcadeHost::for_tuning(ArcadeConfig::default(), &state.tuning);
        host.apply(state.outbox.drain_requests());
        state.outbox.clear();
        Self {
            state,
            host,
            script,
            accumulator: 0.0,
        }
    }

    /// Run simulation steps for `dt` seconds of host time
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS && !self.state.is_over() {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    fn step(&mut self) {
        self.host.step(SIM_DT);
        let direction = self.script.direction(self.state.frame, &self.state);
        let input = self.host.frame_input(direction);
        tick(&mut self.state, &input);
        self.host.apply(self.state.outbox.drain_requests());

        for event in self.state.outbox.drain_events() {
            match event {
                GameEvent::ScoreChanged { total } => log::info!("Carrots: {}", total),
                GameEvent::SessionEnded { score } => log::info!("Game over with {} carrots", score),
                other => log::trace!("{:?}", other),
            }
        }
    }
}

fn run(options: &Options) -> Result<(), bunny_jump::TuningError> {
    let tuning = match &options.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let frame_dt = 1.0 / options.fps as f32;

    for session in 0..options.sessions {
        let seed = options.seed.wrapping_add(session as u64);
        let mut runner = Runner::new(seed, tuning.clone(), options.script);

        let mut host_frames = 0;
        while host_frames < options.frames && !runner.state.is_over() {
            runner.update(frame_dt);
            host_frames += 1;
        }

        let state = &runner.state;
        log::info!(
            "Session {} (seed {}): {} after {} frames, score {}, height {:.0}, pools {}/{}",
            session + 1,
            seed,
            if state.is_over() { "ended" } else { "still playing" },
            state.frame,
            state.score,
            -state.player.pos.y,
            state.platforms.len(),
            state.collectibles.len()
        );

        if options.dump {
            match serde_json::to_string_pretty(state) {
                Ok(json) => println!("{}", json),
                Err(e) => log::warn!("Failed to serialize session: {}", e),
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bunny Jump (headless) starting...");

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{}", e);
            eprintln!(
                "usage: bunny-jump [--seed N] [--frames N] [--sessions N] [--fps N] \
                 [--script idle|left|right|zigzag|chase] [--tuning FILE] [--dump]"
            );
            return ExitCode::FAILURE;
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
