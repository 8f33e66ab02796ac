//! Neural Juggler terminal runner.
//!
//! crossterm input, a fixed 16ms update step and the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use neural_juggler::config::{RunConfig, USAGE};
use neural_juggler::core::{GameSnapshot, GameState};
use neural_juggler::input::{handle_key_event, should_quit, InputHandler};
use neural_juggler::logging;
use neural_juggler::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use neural_juggler::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = RunConfig::load(&args)?;
    if config.show_help {
        println!("{}", USAGE);
        return Ok(());
    }
    logging::init(config.log_path.as_deref())?;

    let seed = config.resolve_seed();
    log::info!("starting neural-juggler, seed {}", seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("runner failed: {:#}", e);
    }
    result
}

fn run(term: &mut TerminalRenderer, seed: u32) -> Result<()> {
    let mut game_state = GameState::new(seed);
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let view = GameView::default();
    let mut input_handler = InputHandler::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game_state.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            log::info!(
                                "quit: score {} best {}",
                                game_state.score(),
                                game_state.best_score()
                            );
                            return Ok(());
                        }

                        if let Some(action) = input_handler.handle_key_press(key.code) {
                            game_state.apply_action(action);
                        }

                        match handle_key_event(key) {
                            // Movement is driven by the repeat handler above.
                            Some(GameAction::MoveLeft | GameAction::MoveRight) | None => {}
                            Some(action) => {
                                if matches!(action, GameAction::Pause | GameAction::Restart) {
                                    input_handler.reset();
                                }
                                game_state.apply_action(action);
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Keeps a held arrow alive; the handler paces the moves.
                        if let Some(action) = input_handler.handle_key_press(key.code) {
                            game_state.apply_action(action);
                        }
                    }
                    KeyEventKind::Release => {
                        input_handler.handle_key_release(key.code);
                    }
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for action in input_handler.update(TICK_MS) {
                game_state.apply_action(action);
            }

            game_state.tick(TICK_MS);
            for event in game_state.drain_events() {
                logging::log_event(&event);
            }
        }
    }
}
