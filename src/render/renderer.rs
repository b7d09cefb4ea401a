use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::game::{GameState, Position};

/// A coloured rectangle to paint, in pixel units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub color: Color,
}

impl DrawCommand {
    pub fn new(x: i32, y: i32, width: i32, height: i32, color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color,
        }
    }
}

/// How entities look: pixel scale and palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Pixels per logical grid cell
    pub cell_scale: u16,
    pub head_color: Color,
    pub body_color: Color,
    pub food_color: Color,
    pub background_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            cell_scale: 1,
            head_color: Color::Cyan,
            body_color: Color::Green,
            food_color: Color::Red,
            background_color: Color::Black,
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> Result<(), String> {
        if self.cell_scale == 0 {
            return Err("cell_scale must be at least 1".to_string());
        }
        if self.head_color == self.body_color {
            return Err(format!(
                "head_color and body_color must differ, both are {}",
                self.head_color
            ));
        }
        Ok(())
    }

    /// Surface size in pixels for a grid of `width` x `height` cells
    pub fn surface_size(&self, width: usize, height: usize) -> (u16, u16) {
        let scale = usize::from(self.cell_scale);
        (
            (width * scale).min(u16::MAX as usize) as u16,
            (height * scale).min(u16::MAX as usize) as u16,
        )
    }
}

/// Turns a game state into draw commands. Holds no frame state.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    style: RenderStyle,
}

impl Renderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Snake segments head first, then the food.
    pub fn compose_frame(&self, state: &GameState) -> Vec<DrawCommand> {
        let snake_size = state.snake.cell_size();
        let mut commands = Vec::with_capacity(state.snake.len() + 1);

        for (i, cell) in state.snake.occupied_cells().enumerate() {
            let color = if i == 0 {
                self.style.head_color
            } else {
                self.style.body_color
            };
            commands.push(self.square(cell, snake_size, color));
        }

        commands.push(self.square(
            state.food.position,
            state.food.cell_size,
            self.style.food_color,
        ));

        commands
    }

    fn square(&self, origin: Position, size: i32, color: Color) -> DrawCommand {
        let scale = i32::from(self.style.cell_scale);
        DrawCommand::new(
            origin.x * scale,
            origin.y * scale,
            size * scale,
            size * scale,
            color,
        )
    }
}
