use rand::Rng;
use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid, in logical units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta (no wrapping)
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position `distance` units in a direction (no wrapping)
    pub fn moved_in_direction(&self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * distance, dy * distance)
    }
}

/// Closed-interval overlap test: `[a1, a2]` and `[b1, b2]` share a point.
pub fn overlap(a1: i32, a2: i32, b1: i32, b2: i32) -> bool {
    !(b1 > a2 || b2 < a1)
}

/// Whether two squares, given by origin and side length, overlap on both axes.
pub fn squares_overlap(a: Position, a_size: i32, b: Position, b_size: i32) -> bool {
    overlap(a.x, a.x + a_size, b.x, b.x + b_size) && overlap(a.y, a.y + a_size, b.y, b.y + b_size)
}

/// Toroidal grid of `width` x `height` cells.
///
/// Positions leaving one edge re-enter from the opposite edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
        }
    }

    /// Wrap a position into `[0, width) x [0, height)`
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Uniformly random origin for an entity whose footprint is `size` cells,
    /// drawn from `[0, width - size) x [0, height - size)`.
    pub fn random_origin<R: Rng + ?Sized>(&self, rng: &mut R, size: i32) -> Position {
        let x = rng.gen_range(0..self.origin_span(self.width, size));
        let y = rng.gen_range(0..self.origin_span(self.height, size));
        Position::new(x, y)
    }

    /// Every origin `random_origin` can produce, row by row
    pub fn origins(&self, size: i32) -> impl Iterator<Item = Position> {
        let width = self.origin_span(self.width, size);
        let height = self.origin_span(self.height, size);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    // Config validation keeps sizes below the grid dimensions; clamp anyway so
    // sampling never sees an empty range.
    fn origin_span(&self, extent: i32, size: i32) -> i32 {
        (extent - size).max(1)
    }
}
