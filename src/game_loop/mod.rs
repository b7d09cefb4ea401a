//! Fixed-cadence update/render loop.
//!
//! Each tick runs the game rules once and repaints the surface. The loop
//! owns every piece of session state; restarting a game means building a new
//! `GameLoop`.

pub mod schedule;

pub use schedule::{IntervalSchedule, ManualSchedule, TickSchedule};

use log::{info, trace};
use rand::Rng;
use rand::rngs::ThreadRng;

use crate::game::{GameEngine, GameState, StepResult};
use crate::input::InputHandler;
use crate::render::{GraphicsEngine, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    /// Terminal: the snake ran into itself
    Ended,
}

pub struct GameLoop<G: GraphicsEngine, R: Rng = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    renderer: Renderer,
    graphics: G,
    input: InputHandler,
    status: LoopStatus,
    ticks: u64,
}

impl<G: GraphicsEngine, R: Rng> GameLoop<G, R> {
    /// Start a fresh session: new game state, surface sized from the grid and
    /// render scale, first frame painted.
    pub fn new(
        mut engine: GameEngine<R>,
        renderer: Renderer,
        mut graphics: G,
        input: InputHandler,
    ) -> Self {
        let state = engine.reset();
        let config = engine.config();
        let (width, height) = renderer
            .style()
            .surface_size(config.grid_width, config.grid_height);
        graphics.init_surface(width, height, renderer.style().background_color);

        let mut game_loop = Self {
            engine,
            state,
            renderer,
            graphics,
            input,
            status: LoopStatus::Running,
            ticks: 0,
        };
        game_loop.render();
        game_loop
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn graphics(&self) -> &G {
        &self.graphics
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    pub fn status(&self) -> LoopStatus {
        self.status
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Apply the game rules once, consuming the pending direction.
    pub fn update(&mut self) -> StepResult {
        let pending = self.input.consume_pending_direction();
        let result = self.engine.step(&mut self.state, pending);
        self.ticks += 1;

        if result.terminated && self.status == LoopStatus::Running {
            self.status = LoopStatus::Ended;
            info!(
                "game over after {} ticks, snake length {}",
                self.ticks,
                self.state.snake.len()
            );
        }

        result
    }

    /// Clear the surface and paint the current frame
    pub fn render(&mut self) {
        self.graphics.clear();
        for command in self.renderer.compose_frame(&self.state) {
            self.graphics.draw_rectangle(&command);
        }
    }

    /// One full update + render. A no-op once the loop has ended; the final
    /// frame (showing the collision) is still painted on the ending tick.
    pub fn tick(&mut self) -> LoopStatus {
        if self.status == LoopStatus::Ended {
            return self.status;
        }

        let result = self.update();
        trace!("tick {}: {:?}", self.ticks, result);
        self.render();
        self.status
    }

    /// Tick on every beat of `schedule` until it runs out or the game ends,
    /// then cancel it.
    ///
    /// `before_tick` sees the state and the input slot ahead of each tick, for
    /// scripted or automated steering.
    pub async fn run<S, F>(&mut self, schedule: &mut S, mut before_tick: F) -> LoopStatus
    where
        S: TickSchedule,
        F: FnMut(&GameState, &InputHandler),
    {
        while self.status == LoopStatus::Running && schedule.next_tick().await {
            before_tick(&self.state, &self.input);
            self.tick();
        }
        schedule.cancel();
        self.status
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
