//! Pixel Racer entry point
//!
//! Runs a demo round driven by the autopilot and prints the final snapshot as
//! JSON. Headless by default; `--realtime` uses the threaded tick timer.
//!
//! Usage: `pixel-racer [--seed N] [--config FILE] [--realtime] [--max-ticks N]`

use std::thread;

use pixel_racer::autopilot;
use pixel_racer::consts::DEFAULT_SEED;
use pixel_racer::{Arcade, GameConfig, Session, Snapshot};

/// Parsed command line
struct Options {
    seed: u64,
    config: Option<String>,
    realtime: bool,
    max_ticks: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            config: None,
            realtime: false,
            max_ticks: 10_000,
        }
    }
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or(format!("{} needs a value", name));
        match arg.as_str() {
            "--seed" => {
                options.seed = value("--seed")?
                    .parse()
                    .map_err(|e| format!("bad --seed: {}", e))?;
            }
            "--config" => options.config = Some(value("--config")?),
            "--max-ticks" => {
                options.max_ticks = value("--max-ticks")?
                    .parse()
                    .map_err(|e| format!("bad --max-ticks: {}", e))?;
            }
            "--realtime" => options.realtime = true,
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(options)
}

/// Step as fast as possible until the car crashes or the tick budget runs out
fn run_headless(config: GameConfig, options: &Options) -> Snapshot {
    let mut session = Session::new(config, options.seed);
    while session.state().time_ticks < options.max_ticks {
        if let Some(dir) = autopilot::suggest(session.state()) {
            session.press(dir);
        }
        match session.step() {
            Some(outcome) if !outcome.ends_round() => {}
            _ => break,
        }
    }
    let snapshot = session.snapshot();
    session.teardown();
    snapshot
}

/// Let the tick timer drive the round while this thread plays the autopilot
fn run_realtime(config: GameConfig, options: &Options) -> Option<Snapshot> {
    let interval = config.tick_interval();
    let mut arcade = Arcade::new(config, options.seed);
    arcade.start();

    while arcade.is_ticking() {
        if arcade.inspect(|state| state.time_ticks)? >= options.max_ticks {
            break;
        }
        if let Some(dir) = arcade.inspect(autopilot::suggest).flatten() {
            arcade.press(dir);
        }
        thread::sleep(interval);
    }

    arcade.shutdown();
    arcade.snapshot()
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args())?;

    let config = match &options.config {
        Some(path) => GameConfig::load(path).map_err(|e| e.to_string())?,
        None => GameConfig::default(),
    };

    log::info!(
        "Pixel Racer starting (seed {}, {} mode)",
        options.seed,
        if options.realtime { "realtime" } else { "headless" }
    );

    let snapshot = if options.realtime {
        run_realtime(config, &options).ok_or("session lock poisoned")?
    } else {
        run_headless(config, &options)
    };

    log::info!(
        "Finished: score {} after {} ticks ({:?})",
        snapshot.score,
        snapshot.time_ticks,
        snapshot.phase
    );
    let json = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("pixel-racer: {}", e);
        std::process::exit(1);
    }
}
