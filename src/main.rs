use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use space_invaders::compute::{init_state, tick};
use space_invaders::display;
use space_invaders::entities::{GameState, Phase};
use space_invaders::input::KeyTracker;
use space_invaders::{Assets, Settings};

#[derive(Parser)]
#[command(name = "space_invaders")]
#[command(about = "Defend against descending waves of enemy ships", long_about = None)]
struct Cli {
    /// Directory holding the sprite files
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// JSON settings file; unspecified fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for wave generation and enemy fire
    #[arg(long)]
    seed: Option<u64>,

    /// Override the target frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Override the starting lives
    #[arg(long)]
    lives: Option<u32>,

    /// Write logs here instead of stderr (stderr is shared with the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_json_file(path)?,
            None => Settings::default(),
        };
        if let Some(fps) = self.fps {
            settings.fps = fps;
        }
        if let Some(lives) = self.lives {
            settings.lives = lives;
        }
        settings.validate()?;
        Ok(settings)
    }
}

/// `RUST_LOG` decides the filter.  Without a log file only warnings reach
/// stderr, so the game screen isn't scribbled over.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run frames until the game terminates.
///
/// Each frame: drain input events, render, then advance the simulation,
/// sleeping off whatever is left of the frame budget.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut impl Rng,
) -> std::io::Result<()> {
    let frame_budget = state.settings.frame_duration();
    let mut keys = KeyTracker::new();

    while state.phase != Phase::Terminated {
        let frame_start = Instant::now();
        let frame = state.frame;

        // Drain all pending input events (non-blocking)
        while let Ok(ev) = rx.try_recv() {
            keys.handle(&ev, frame);
        }
        let input = keys.snapshot(frame);

        let (cols, rows) = terminal::size()?;
        display::render(out, state, cols, rows)?;

        tick(state, &input, rng);

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let settings = cli.settings().context("invalid settings")?;
    info!("settings: {}", serde_json::to_string(&settings)?);
    let assets = Assets::load(&cli.assets, &settings)
        .with_context(|| format!("cannot load assets from {}", cli.assets.display()))?;

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("starting with seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = init_state(settings, assets);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut state, &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(
        "game over: level {}, {} enemies destroyed, {} lives left",
        state.level, state.score, state.lives
    );
    result.context("terminal I/O failed")
}
