use anyhow::{Context, Result, anyhow};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stdout, stdout};
use std::time::Duration;
use tokio::time::interval;

use crate::config::Settings;
use crate::game::GameEngine;
use crate::game_loop::{GameLoop, IntervalSchedule, LoopStatus, TickSchedule};
use crate::input::{InputHandler, KeyAction};
use crate::render::{PixelCanvas, Renderer, Screen};

/// Interactive play in the terminal.
///
/// Draws on stdout so that log output on stderr can be redirected.
pub struct HumanMode {
    settings: Settings,
    game_loop: GameLoop<PixelCanvas>,
    schedule: Option<IntervalSchedule>,
    screen: Screen,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    /// Fails if `settings` do not validate
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let input_handler = InputHandler::new();
        let game_loop = new_session(&settings, input_handler.clone())?;

        Ok(Self {
            settings,
            game_loop,
            schedule: None,
            screen: Screen::new(),
            input_handler,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        self.schedule = Some(IntervalSchedule::new(self.settings.game.tick_interval()));

        // Present the surface at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            let ticking = self.schedule.as_ref().is_some_and(|s| s.is_active());

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game tick
                Some(true) = next_tick(&mut self.schedule), if ticking => {
                    self.update_game();
                }

                // Present frame
                _ = render_timer.tick() => {
                    let canvas = self.game_loop.graphics();
                    let status = self.game_loop.status();
                    terminal.draw(|frame| {
                        self.screen.render(frame, canvas, status);
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
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            // Steering is recorded in the shared slot by the handler itself
            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(_) | KeyAction::None => {}
                KeyAction::Restart => self.reset_game()?,
                KeyAction::Quit => self.should_quit = true,
            }
        }
        Ok(())
    }

    fn update_game(&mut self) {
        if self.game_loop.tick() == LoopStatus::Ended {
            if let Some(schedule) = self.schedule.as_mut() {
                schedule.cancel();
            }
        }
    }

    /// Full reinitialisation: new snake, food, state and schedule
    fn reset_game(&mut self) -> Result<()> {
        info!("restarting game");
        self.input_handler.clear();
        self.game_loop = new_session(&self.settings, self.input_handler.clone())?;
        self.schedule = Some(IntervalSchedule::new(self.settings.game.tick_interval()));
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn new_session(settings: &Settings, input: InputHandler) -> Result<GameLoop<PixelCanvas>> {
    let engine = GameEngine::new(settings.game.clone())
        .map_err(|e| anyhow!("invalid game settings: {}", e))?;
    Ok(GameLoop::new(
        engine,
        Renderer::new(settings.render.clone()),
        PixelCanvas::new(),
        input,
    ))
}

async fn next_tick(schedule: &mut Option<IntervalSchedule>) -> Option<bool> {
    match schedule {
        Some(schedule) => Some(schedule.next_tick().await),
        None => None,
    }
}
