//! Repeat: terminal front end
//!
//! Runs the game against a simulated board:
//! - Number keys act as momentary buttons
//! - A status line shows the lights and the current phase
//! - Sounds play through the audio device when built with `--features audio`

mod args;

use anyhow::Context;
use args::CliArgs;
use parking_lot::Mutex;
use repeat::board::{DigitalInput, DigitalOutput, OutputGuard, PositionTable, SimulatedBoard};
use repeat::events::EventQueue;
use repeat::game::{Game, GamePhase};
use repeat::input::DebounceFilter;
use repeat::sound::{SilentSound, SoundPlayer};
use repeat::BoardConfig;
use std::io::{self, Read, Write};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Status line refresh interval in milliseconds
const RENDER_INTERVAL_MS: u64 = 50;

/// How long a key press holds the simulated button down
const KEY_HOLD_MS: u64 = 150;

#[cfg(unix)]
fn set_raw_mode(enabled: bool) {
    let args: &[&str] = if enabled { &["-echo", "raw"] } else { &["echo", "-raw"] };
    let _ = std::process::Command::new("stty").args(args).status();
}

#[cfg(not(unix))]
fn set_raw_mode(_enabled: bool) {}

#[cfg(feature = "audio")]
fn open_sound(config: &BoardConfig) -> Box<dyn SoundPlayer> {
    if let Some(dir) = &config.sound_dir {
        match repeat::SoundBank::load(dir, config.sound_ids()) {
            Ok(bank) => return Box::new(bank),
            Err(e) => log::warn!("Sound disabled: {}", e),
        }
    }
    Box::new(SilentSound)
}

#[cfg(not(feature = "audio"))]
fn open_sound(config: &BoardConfig) -> Box<dyn SoundPlayer> {
    if config.sound_dir.is_some() {
        log::warn!("Built without the \"audio\" feature; sounds are disabled");
    }
    Box::new(SilentSound)
}

fn status_line(board: &SimulatedBoard, positions: &PositionTable, phase: GamePhase) -> String {
    let lights: Vec<String> = positions
        .iter()
        .enumerate()
        .map(|(slot, position)| {
            let light = if board.is_lit(position.output_pin) { "#" } else { "." };
            format!("{}[{}]", slot + 1, light)
        })
        .collect();
    format!("{} | {}", lights.join(" "), phase)
}

/// Hold the button on `pin` down briefly, from its own thread like a
/// hardware edge interrupt
fn tap(board: &Arc<SimulatedBoard>, pin: repeat::Pin) {
    let board = Arc::clone(board);
    thread::spawn(move || {
        board.press(pin);
        thread::sleep(Duration::from_millis(KEY_HOLD_MS));
        board.release(pin);
    });
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    if args.show_help {
        CliArgs::print_help();
        return Ok(());
    }

    let mut config = match &args.config_path {
        Some(path) => BoardConfig::from_json_file(path)
            .with_context(|| format!("Failed to load board config {}", path.display()))?,
        None => BoardConfig::default(),
    };
    if let Some(dir) = args.sound_dir {
        config.sound_dir = Some(dir);
    }

    let positions = Arc::new(config.position_table()?);
    let board = Arc::new(SimulatedBoard::new(positions.input_pins()));
    let queue = Arc::new(EventQueue::new());

    let filter = Arc::new(DebounceFilter::new(
        Arc::clone(&positions),
        Arc::clone(&board) as Arc<dyn DigitalInput>,
        Arc::clone(&queue),
    ));
    filter.install(&*board)?;
    let outputs = OutputGuard::new(Arc::clone(&board) as Arc<dyn DigitalOutput>, &positions);

    let phase = Arc::new(Mutex::new(GamePhase::Idle));
    let game_thread = {
        let positions = Arc::clone(&positions);
        let board = Arc::clone(&board);
        let phase = Arc::clone(&phase);
        let seed = args.seed;
        thread::Builder::new()
            .name("game".into())
            .spawn(move || -> repeat::Result<()> {
                // Audio output streams are tied to the thread that opened them
                let sound = open_sound(&config);
                let mut game = Game::new(
                    positions,
                    config.failure_sound.clone(),
                    config.timings,
                    queue,
                    board,
                    sound,
                )
                .with_observer(phase);
                if let Some(seed) = seed {
                    game = game.with_seed(seed);
                }
                match game.run() {
                    Ok(never) => match never {},
                    Err(e) => Err(e),
                }
            })
            .context("Failed to start game thread")?
    };

    let (tx, rx) = mpsc::channel::<u8>();
    set_raw_mode(true);
    thread::spawn(move || {
        let mut stdin = io::stdin();
        let mut buf = [0u8; 1];
        while stdin.read_exact(&mut buf).is_ok() {
            if tx.send(buf[0]).is_err() {
                break;
            }
        }
    });

    print!("\x1B[?25l");
    let mut running = true;
    while running {
        thread::sleep(Duration::from_millis(RENDER_INTERVAL_MS));

        while let Ok(key) = rx.try_recv() {
            match key {
                b'1'..=b'9' => {
                    let slot = (key - b'1') as usize;
                    if slot < positions.len() {
                        tap(&board, positions.get(slot).input_pin);
                    }
                }
                b'q' | b'Q' | b'\x03' => running = false,
                _ => {}
            }
        }

        if game_thread.is_finished() {
            break;
        }

        print!("\r\x1B[2K{}", status_line(&board, &positions, *phase.lock()));
        io::stdout().flush().ok();
    }

    set_raw_mode(false);
    println!("\x1B[?25h");
    drop(outputs);

    if game_thread.is_finished() {
        match game_thread.join() {
            Ok(result) => result.context("Game stopped")?,
            Err(_) => anyhow::bail!("Game thread panicked"),
        }
    }
    Ok(())
}
