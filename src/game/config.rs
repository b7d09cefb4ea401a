use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::grid::Grid;

/// Configuration for the game simulation
///
/// All sizes are logical grid units; pixel scaling lives in the render style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Side length of the square each snake segment occupies
    pub snake_cell_size: usize,
    /// Side length of the square the food occupies
    pub food_cell_size: usize,
    /// Distance the head travels per tick
    pub step_size: usize,
    /// Number of segments the snake starts with
    pub initial_snake_length: usize,
    /// Delay between ticks in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 20,
            snake_cell_size: 1,
            food_cell_size: 1,
            step_size: 1,
            initial_snake_length: 1,
            tick_interval_ms: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate configuration parameters
    ///
    /// Returns `Err` with a message naming the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            return Err("grid dimensions must fit in i32".to_string());
        }

        for (name, size) in [
            ("snake_cell_size", self.snake_cell_size),
            ("food_cell_size", self.food_cell_size),
        ] {
            if size == 0 {
                return Err(format!("{} must be at least 1", name));
            }
            if size >= self.grid_width || size >= self.grid_height {
                return Err(format!(
                    "{} ({}) must be smaller than the grid ({}x{})",
                    name, size, self.grid_width, self.grid_height
                ));
            }
        }

        if self.step_size == 0 {
            return Err("step_size must be at least 1".to_string());
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        // The starting body is laid out along a row
        let body_span = self.initial_snake_length.checked_mul(self.step_size);
        if body_span.is_none_or(|span| span > self.grid_width) {
            return Err(format!(
                "initial_snake_length ({}) x step_size ({}) cannot exceed grid_width ({})",
                self.initial_snake_length, self.step_size, self.grid_width
            ));
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 1);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.grid(), Grid::new(15, 12));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = GameConfig::new(0, 10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_cell_size_not_smaller_than_grid() {
        let config = GameConfig {
            food_cell_size: 10,
            ..GameConfig::small()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("food_cell_size"));
    }

    #[test]
    fn test_rejects_zero_step_and_tick() {
        let config = GameConfig {
            step_size: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            tick_interval_ms: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_initial_length_wider_than_grid() {
        let config = GameConfig {
            initial_snake_length: 4,
            step_size: 3,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_initial_length_that_overflows() {
        let config = GameConfig {
            initial_snake_length: usize::MAX,
            step_size: 2,
            ..GameConfig::small()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("initial_snake_length"));
    }
}
