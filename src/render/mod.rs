//! Rendering: a pure state-to-draw-commands transform, the surface that
//! executes those commands, and the terminal layout that shows the surface.

pub mod graphics;
pub mod renderer;
pub mod screen;

pub use graphics::{GraphicsEngine, PixelCanvas};
pub use renderer::{DrawCommand, RenderStyle, Renderer};
pub use screen::Screen;
