use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, board_for_terminal};
use crate::schedule::TickScheduler;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Tick period the scheduler has to switch to
    pending_period: Option<Duration>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_period: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        if let Err(err) = execute!(stderr, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err).context("Failed to enter alternate screen");
        }
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(std::io::stderr(), LeaveAlternateScreen);
                return Err(err).context("Failed to create terminal");
            }
        };

        // Run game loop with cleanup
        let result = self.play(&mut terminal).await;

        // Cleanup terminal
        let cleanup = self.cleanup_terminal(&mut terminal);
        info!("Session over, {}", self.metrics.summary());

        result.and(cleanup)
    }

    async fn play(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        if self.engine.config().fit_to_terminal {
            let size = terminal.size().context("Failed to read terminal size")?;
            self.handle_resize(size.width, size.height);
            // Spawn the first food items on the fitted board
            self.reset_game();
        }

        self.run_game_loop(terminal).await
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks follow the snake's speed
        let mut scheduler = TickScheduler::new(self.state.speed());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = scheduler.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            if let Some(period) = self.pending_period.take() {
                if scheduler.set_period(period) {
                    debug!("Tick period now {:?}", scheduler.period());
                }
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Turn(direction) => self.state.set_direction(direction),
                    KeyAction::Restart => self.reset_game(),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Resize(cols, rows) => self.handle_resize(cols, rows),
            _ => {}
        }
    }

    fn handle_resize(&mut self, cols: u16, rows: u16) {
        if !self.engine.config().fit_to_terminal {
            return;
        }

        let board = board_for_terminal(cols, rows);
        match self.engine.resize_board(&mut self.state, board) {
            Ok(()) => info!(
                "Terminal resized to {}x{}, board is {}x{}",
                cols, rows, board.width, board.height
            ),
            Err(err) => warn!("Ignoring terminal resize: {err:#}"),
        }
    }

    fn update_game(&mut self) {
        if !self.state.is_running() {
            return;
        }

        let result = self.engine.tick(&mut self.state);

        if result.speed_changed {
            self.pending_period = Some(self.state.speed());
        }

        // Track game over
        if let Some(cell) = result.info.collision {
            info!(
                "Game over at ({}, {}) with score {}",
                cell.x, cell.y, self.state.score
            );
            if self.metrics.on_game_over(self.state.score) {
                info!("New high score: {}", self.state.score);
            }
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.pending_period = Some(self.state.speed());
        self.metrics.on_game_start();
        info!(
            "New game on a {}x{} board",
            self.state.board.width, self.state.board.height
        );
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
