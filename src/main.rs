//! Neon Tetris runner (default binary).
//!
//! Interactive play uses crossterm for input and the framebuffer renderer.
//! `neon-tetris replay` runs a scripted session headlessly and prints one JSON
//! observation per line.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use neon_tetris::cli::{Cli, Commands};
use neon_tetris::core::{GameClock, GameSnapshot, GameState};
use neon_tetris::input::{should_quit, InputHandler};
use neon_tetris::replay::run_script;
use neon_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use neon_tetris::types::{Command, TICK_MS};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Replay {
            seed,
            script,
            every_step,
        }) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(io::stderr)
                .init();
            replay(seed, &script, every_step)
        }
        None => {
            init_file_logging(&cli.log_file)?;
            let seed = cli.seed.unwrap_or_else(clock_seed);
            tracing::info!(seed, "starting interactive session");
            play(seed, cli.cell_width)
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_file_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn replay(seed: u32, script: &str, every_step: bool) -> Result<()> {
    let observations = run_script(seed, script, every_step).context("invalid replay script")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for obs in &observations {
        serde_json::to_writer(&mut out, obs)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Restore terminal state on panic.
fn restore_terminal() {
    let mut term = TerminalRenderer::new();
    let _ = term.exit();
}

fn play(seed: u32, cell_width: u16) -> Result<()> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed, cell_width);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, seed: u32, cell_width: u16) -> Result<()> {
    let mut state = GameState::new(seed);
    let mut clock = GameClock::new();
    let mut input = InputHandler::new();

    let view = GameView::new(cell_width, 1);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        state.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let command = match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            tracing::info!(score = state.score(), level = state.level(), "quit");
                            return Ok(());
                        }
                        input.handle_key_press(key, state.status())
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(_, _) => {
                    term.invalidate();
                    None
                }
                _ => None,
            };
            if let Some(command) = command {
                state = apply(&state, &mut clock, command);
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            let elapsed_ms = u32::try_from(last_tick.elapsed().as_millis()).unwrap_or(u32::MAX);
            last_tick = Instant::now();

            if let Some(command) = input.update(elapsed_ms) {
                state = apply(&state, &mut clock, command);
            }
            state = clock.advance(&state, elapsed_ms);
        }
    }
}

fn apply(state: &GameState, clock: &mut GameClock, command: Command) -> GameState {
    let next = state.apply(command);
    clock.sync(&next);
    next
}
