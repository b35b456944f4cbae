//! Terminal Tetris runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from the `term`
//! crate. Logs go to a file because the terminal is in raw mode.

use std::fs;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use classic_tetris::config::Config;
use classic_tetris::core::{GameSnapshot, GameState};
use classic_tetris::input::{handle_key_event, is_repeatable, should_quit, InputHandler};
use classic_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use classic_tetris::types::{GameAction, TICK_MS};

const LOG_FILE: &str = "classic-tetris.log";

fn init_logging(config: &Config) -> Result<WorkerGuard> {
    fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("creating log directory {}", config.log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("classic_tetris=info,classic_tetris_core=info"));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let config = Config::from_env();
    let _guard = init_logging(&config)?;

    for note in &config.warnings {
        warn!("{note}");
    }
    info!(
        log = %config.log_dir.join(LOG_FILE).display(),
        rule = config.piece_rule.as_str(),
        das_ms = config.das_ms,
        arr_ms = config.arr_ms,
        "classic tetris starting"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        warn!(error = %e, "failed to restore terminal");
    }
    if let Err(ref e) = result {
        warn!(error = %e, "exiting with error");
    }
    result
}

fn apply(game: &mut GameState, input: &mut InputHandler, action: GameAction) {
    game.apply_action(action);
    if action == GameAction::Restart {
        input.reset();
        info!(seed = game.seed(), "new game");
    }
    log_lock(game);
}

fn log_lock(game: &mut GameState) {
    if let Some(event) = game.take_last_event() {
        if event.lines_cleared > 0 {
            debug!(
                lines = event.lines_cleared,
                points = event.line_clear_score,
                level = event.level,
                "lines cleared"
            );
        }
    }
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let mut game = GameState::with_rule(config.resolve_seed(), config.piece_rule);
    info!(seed = game.seed(), "new game");

    let view = GameView::default();
    let mut input = InputHandler::with_config(config.das_ms, config.arr_ms);

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            info!(score = game.score(), "quit");
                            return Ok(());
                        }
                        if let Some(action) = input.handle_key_press(key) {
                            apply(&mut game, &mut input, action);
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Only keeps held movement keys alive; DAS/ARR makes the repeats.
                        if handle_key_event(key).is_some_and(is_repeatable) {
                            if let Some(action) = input.handle_key_press(key) {
                                apply(&mut game, &mut input, action);
                            }
                        }
                    }
                    KeyEventKind::Release => input.handle_key_release(key),
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);

            for action in input.update(elapsed_ms) {
                apply(&mut game, &mut input, action);
            }
            game.tick(elapsed_ms);
            log_lock(&mut game);
        }
    }
}
