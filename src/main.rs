mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use log::info;

use display::TerminalScene;
use spacewars::config::GameConfig;
use spacewars::entities::Bounds;
use spacewars::game::{Game, InputEvent};

/// Longest the loop waits for input before polling the game clock again.
/// Well below the frame period so frames are never late by more than this.
const INPUT_WAIT: Duration = Duration::from_millis(5);

#[derive(Parser)]
#[command(name = "spacewars")]
#[command(about = "Intercept the descending enemies; move with the mouse, click to fire")]
struct Args {
    /// JSON file with tuning overrides
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the first session (later sessions derive theirs from it)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of stars in the background
    #[arg(long)]
    stars: Option<usize>,
    /// Write log records here (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The screen belongs to the game, so records only go to stderr when
/// RUST_LOG asks for them explicitly.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if std::env::var_os("RUST_LOG").is_none() => {
            builder.filter_level(log::LevelFilter::Off);
        }
        None => {}
    }
    builder.init();
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(stars) = args.stars {
        config.star_count = stars;
    }
    config.validate()?;
    Ok(config)
}

// ── Input translation ─────────────────────────────────────────────────────────

enum Action {
    Input(InputEvent),
    Resize(u16, u16),
    Quit,
    Ignore,
}

fn translate<W: Write>(event: Event, scene: &TerminalScene<W>, now: Duration) -> Action {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            _ => Action::Ignore,
        },
        Event::Mouse(MouseEvent { kind, column, .. }) => match kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                Action::Input(InputEvent::PointerMove {
                    x: scene.scene_x(column),
                })
            }
            MouseEventKind::Down(MouseButton::Left) => {
                Action::Input(InputEvent::PointerDown { at: now })
            }
            _ => Action::Ignore,
        },
        Event::Resize(cols, rows) => Action::Resize(cols, rows),
        _ => Action::Ignore,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits; returns the best score of the run.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: GameConfig) -> Result<u32> {
    let (cols, rows) = terminal::size()?;
    let bounds = Bounds {
        width: config.width,
        height: config.height,
    };
    let mut scene = TerminalScene::new(out, cols, rows, bounds);

    let clock = Instant::now();
    let mut game = Game::new(config, clock.elapsed())?;

    loop {
        let first = match rx.recv_timeout(INPUT_WAIT) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        // Drain everything that is already queued before advancing.
        for event in first.into_iter().chain(rx.try_iter()) {
            let now = clock.elapsed();
            match translate(event, &scene, now) {
                Action::Input(input) => game.handle(input, now),
                Action::Resize(cols, rows) => scene.resize(cols, rows),
                Action::Quit => return Ok(game.best_score()),
                Action::Ignore => {}
            }
        }
        game.advance(clock.elapsed(), &mut scene)?;
    }
    Ok(game.best_score())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let config = load_config(&args)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread to blocking event reads so the game loop only ever
    // waits with a timeout.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, config);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let best = result?;
    info!("exiting with best score {}", best);
    println!("Best score: {best}");
    Ok(())
}
