use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use super::renderer::DrawCommand;

/// Executes draw commands against a display surface.
///
/// Knows how to paint rectangles; knows nothing about snakes or food.
pub trait GraphicsEngine {
    /// (Re)size the surface and set the colour `clear` paints
    fn init_surface(&mut self, width: u16, height: u16, background: Color);

    /// Paint one rectangle, clipped to the surface
    fn draw_rectangle(&mut self, command: &DrawCommand);

    /// Repaint the whole surface with the background colour
    fn clear(&mut self);
}

/// In-memory pixel surface.
///
/// Painted by the game loop each tick and shown by the terminal UI, two
/// columns per pixel so cells look roughly square.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCanvas {
    width: u16,
    height: u16,
    background: Color,
    pixels: Vec<Color>,
}

impl PixelCanvas {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            background: Color::Reset,
            pixels: Vec::new(),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Colour at a pixel, `None` outside the surface
    pub fn pixel(&self, x: u16, y: u16) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Number of pixels currently painted `color`
    #[cfg(test)]
    pub(crate) fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    /// Terminal cells needed to show the whole surface
    pub fn terminal_size(&self) -> (u16, u16) {
        (self.width.saturating_mul(2), self.height)
    }

    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsEngine for PixelCanvas {
    fn init_surface(&mut self, width: u16, height: u16, background: Color) {
        self.width = width;
        self.height = height;
        self.background = background;
        self.pixels = vec![background; usize::from(width) * usize::from(height)];
    }

    fn draw_rectangle(&mut self, command: &DrawCommand) {
        let x0 = command.x.clamp(0, i32::from(self.width));
        let y0 = command.y.clamp(0, i32::from(self.height));
        let x1 = (command.x + command.width).clamp(0, i32::from(self.width));
        let y1 = (command.y + command.height).clamp(0, i32::from(self.height));

        for y in y0..y1 {
            for x in x0..x1 {
                let i = self.index(x as u16, y as u16);
                self.pixels[i] = command.color;
            }
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(self.background);
    }
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in 0..self.height.min(area.height) {
            for x in 0..self.width {
                let color = self.pixels[self.index(x, y)];
                for half in 0..2 {
                    let column = x * 2 + half;
                    if column >= area.width {
                        break;
                    }
                    if let Some(cell) = buf.cell_mut((area.x + column, area.y + y)) {
                        cell.set_symbol(" ").set_bg(color);
                    }
                }
            }
        }
    }
}
