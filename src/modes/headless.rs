//! Headless soak run: the full update/render loop without a terminal,
//! steered by a seeded random walker.

use anyhow::{Result, anyhow};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Settings;
use crate::game::{Direction, GameEngine};
use crate::game_loop::{GameLoop, LoopStatus, ManualSchedule};
use crate::input::InputHandler;
use crate::render::{PixelCanvas, Renderer};

/// Chance per tick that the walker asks for a turn
const TURN_PROBABILITY: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessSummary {
    pub status: LoopStatus,
    pub ticks: u64,
    pub snake_length: usize,
}

pub struct HeadlessMode {
    game_loop: GameLoop<PixelCanvas, StdRng>,
    walker: StdRng,
    ticks: u64,
}

impl HeadlessMode {
    /// Fails if `settings` do not validate
    pub fn new(settings: Settings, ticks: u64, seed: u64) -> Result<Self> {
        settings.validate()?;
        let engine = GameEngine::with_rng(settings.game, StdRng::seed_from_u64(seed))
            .map_err(|e| anyhow!("invalid game settings: {}", e))?;
        let game_loop = GameLoop::new(
            engine,
            Renderer::new(settings.render),
            PixelCanvas::new(),
            InputHandler::new(),
        );

        Ok(Self {
            game_loop,
            // Separate stream so steering does not shift food placement
            walker: StdRng::seed_from_u64(seed.wrapping_add(1)),
            ticks,
        })
    }

    pub async fn run(&mut self) -> HeadlessSummary {
        info!("headless run for up to {} ticks", self.ticks);
        let mut schedule = ManualSchedule::new(self.ticks);
        let walker = &mut self.walker;

        let status = self
            .game_loop
            .run(&mut schedule, |_, input| {
                if walker.gen_bool(TURN_PROBABILITY) {
                    input.record_direction(Direction::ALL[walker.gen_range(0..4)]);
                }
            })
            .await;

        let summary = HeadlessSummary {
            status,
            ticks: self.game_loop.ticks(),
            snake_length: self.game_loop.state().snake.len(),
        };
        info!("headless run finished: {:?}", summary);
        summary
    }
}
