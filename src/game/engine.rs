use log::{debug, info, trace};
use rand::Rng;
use rand::rngs::ThreadRng;

use super::{
    config::GameConfig,
    direction::Direction,
    state::{Food, GameState, Snake, find_free_cell},
};

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the head ran into the body
    pub self_collision: bool,
    /// Whether the session is over
    pub terminated: bool,
}

/// The game engine that handles all game rules
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine {
    /// Create a new game engine backed by the thread-local RNG
    pub fn new(config: GameConfig) -> Result<Self, String> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine with an explicit random source (seeded in tests).
    ///
    /// Fails with the validation message if `config` is invalid.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game: random snake, food placed clear of it
    pub fn reset(&mut self) -> GameState {
        let grid = self.config.grid();
        let snake = Snake::random(
            &mut self.rng,
            grid,
            self.config.initial_snake_length,
            self.config.snake_cell_size as i32,
            self.config.step_size as i32,
        );

        let food_size = self.config.food_cell_size as i32;
        // A fresh snake never fills the board; origin is only a fallback
        let food_position = find_free_cell(&mut self.rng, grid, &snake, food_size)
            .unwrap_or_else(|| grid.random_origin(&mut self.rng, food_size));

        info!(
            "new game on {}x{} grid, snake at ({}, {})",
            grid.width,
            grid.height,
            snake.head().x,
            snake.head().y
        );

        GameState::new(snake, Food::new(food_position, food_size), grid)
    }

    /// Execute one tick of the game.
    ///
    /// Order matters: eating is judged on the pre-move head, the move applies
    /// the growth, the pending turn is applied after the move, and the
    /// self-collision check sees the new head. Food is only respawned if the
    /// tick did not end the game.
    pub fn step(&mut self, state: &mut GameState, pending: Option<Direction>) -> StepResult {
        if !state.is_alive {
            return StepResult {
                ate_food: false,
                self_collision: false,
                terminated: true,
            };
        }

        let ate_food = state.did_eat();
        state.snake.advance(ate_food);

        if let Some(direction) = pending {
            state.snake.change_direction(direction);
        }

        let head = state.snake.head();
        trace!(
            "head at ({}, {}) heading {:?}, length {}",
            head.x,
            head.y,
            state.snake.direction(),
            state.snake.len()
        );

        if state.did_self_collide() {
            state.is_alive = false;
            info!(
                "self-collision at ({}, {}), length {}",
                head.x,
                head.y,
                state.snake.len()
            );

            return StepResult {
                ate_food,
                self_collision: true,
                terminated: true,
            };
        }

        if ate_food {
            debug!("food eaten, snake length now {}", state.snake.len());
            state.respawn_food(&mut self.rng);
        }

        StepResult {
            ate_food,
            self_collision: false,
            terminated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, Position};
    use rand::{SeedableRng, rngs::StdRng};

    fn seeded(config: GameConfig) -> GameEngine<StdRng> {
        GameEngine::with_rng(config, StdRng::seed_from_u64(2024)).unwrap()
    }

    fn state_with(
        grid: Grid,
        cells: &[(i32, i32)],
        direction: Direction,
        food: (i32, i32),
    ) -> GameState {
        let snake = Snake::from_cells(
            grid,
            cells.iter().map(|&(x, y)| Position::new(x, y)),
            direction,
            1,
            1,
        );
        GameState::new(snake, Food::new(Position::new(food.0, food.1), 1), grid)
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::new(GameConfig::default()).unwrap();
        let state = engine.reset();

        assert!(state.is_alive);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.direction(), Direction::Right);
        assert!(!state.snake.overlaps(state.food.position, state.food.cell_size));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = GameEngine::new(GameConfig::new(0, 10));
        assert!(result.is_err());

        let config = GameConfig {
            snake_cell_size: 0,
            ..GameConfig::small()
        };
        assert!(GameEngine::with_rng(config, StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn test_reset_with_longer_snake() {
        let config = GameConfig {
            initial_snake_length: 4,
            ..GameConfig::small()
        };
        let state = seeded(config).reset();
        assert_eq!(state.snake.len(), 4);
        assert!(!state.did_self_collide());
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = seeded(GameConfig::small());
        let grid = Grid::new(10, 10);
        let mut state = state_with(grid, &[(2, 2)], Direction::Right, (7, 7));

        let result = engine.step(&mut state, None);

        assert!(!result.terminated);
        assert!(!result.ate_food);
        assert_eq!(state.snake.head(), Position::new(3, 2));
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = seeded(GameConfig::small());
        let grid = Grid::new(10, 10);
        let mut state = state_with(grid, &[(2, 2)], Direction::Right, (2, 2));

        let result = engine.step(&mut state, None);

        assert!(result.ate_food);
        assert_eq!(state.snake.len(), 2);
        assert!(!state.snake.overlaps(state.food.position, 1));
    }

    #[test]
    fn test_turn_applies_after_move() {
        let mut engine = seeded(GameConfig::small());
        let grid = Grid::new(10, 10);
        let mut state = state_with(grid, &[(2, 2)], Direction::Right, (7, 7));

        engine.step(&mut state, Some(Direction::Down));
        assert_eq!(state.snake.head(), Position::new(3, 2));
        assert_eq!(state.snake.direction(), Direction::Down);

        engine.step(&mut state, None);
        assert_eq!(state.snake.head(), Position::new(3, 3));
    }

    #[test]
    fn test_reversal_ignored_at_length_one() {
        let mut engine = seeded(GameConfig::small());
        let grid = Grid::new(10, 10);
        let mut state = state_with(grid, &[(2, 2)], Direction::Right, (7, 7));

        engine.step(&mut state, Some(Direction::Left));

        assert_eq!(state.snake.direction(), Direction::Right);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = seeded(GameConfig::small());
        let grid = Grid::new(10, 10);
        // Moving up from (5, 6) lands on (5, 5), which the body still covers
        let mut state = state_with(
            grid,
            &[(5, 6), (6, 6), (6, 5), (5, 5), (4, 5)],
            Direction::Up,
            (0, 0),
        );

        let result = engine.step(&mut state, None);

        assert!(result.terminated);
        assert!(result.self_collision);
        assert!(!state.is_alive);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = seeded(GameConfig::small());
        let mut state = engine.reset();
        state.is_alive = false;
        let before = state.clone();

        let result = engine.step(&mut state, Some(Direction::Up));

        assert!(result.terminated);
        assert_eq!(state, before);
    }

    #[test]
    fn test_end_to_end_eat_and_grow() {
        let config = GameConfig {
            grid_width: 100,
            grid_height: 50,
            snake_cell_size: 3,
            food_cell_size: 3,
            step_size: 3,
            ..GameConfig::default()
        };
        let mut engine = seeded(config);
        let mut state = engine.reset();
        let start = state.snake.head();

        // Park the food far from the path of the first tick
        state.food.position = Position::new((start.x + 50) % 97, (start.y + 25) % 47);

        let result = engine.step(&mut state, None);
        assert!(!result.ate_food);
        let head = state.snake.head();
        assert_eq!(head, Position::new((start.x + 3) % 100, start.y));
        assert_eq!(state.snake.len(), 1);

        state.food.position = head;
        let result = engine.step(&mut state, None);
        assert!(result.ate_food);
        assert_eq!(state.snake.len(), 2);
        for cell in state.snake.occupied_cells() {
            assert!(!crate::game::grid::squares_overlap(cell, 3, state.food.position, 3));
        }
    }
}
