use log::{debug, warn};
use rand::Rng;
use rand::seq::IteratorRandom;
use std::collections::VecDeque;

use super::direction::Direction;
use super::grid::{Grid, Position, squares_overlap};

/// Sampling attempts before `respawn_food` falls back to scanning free cells
pub const MAX_RESPAWN_ATTEMPTS: usize = 1024;

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    body: VecDeque<Position>,
    /// Current direction of movement
    direction: Direction,
    /// Footprint of every segment, in cells
    cell_size: i32,
    /// Distance moved per tick, in cells
    step_size: i32,
    grid: Grid,
}

impl Snake {
    /// Create a snake of `length` segments with its head at `head`.
    ///
    /// Extra segments trail behind the head, one step apart, wrapped onto the grid.
    pub fn new(
        grid: Grid,
        head: Position,
        direction: Direction,
        length: usize,
        cell_size: i32,
        step_size: i32,
    ) -> Self {
        let head = grid.wrap(head);
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        body.push_back(head);

        for i in 1..length {
            let prev = body[i - 1];
            body.push_back(grid.wrap(prev.moved_in_direction(back, step_size)));
        }

        Self {
            body,
            direction,
            cell_size,
            step_size,
            grid,
        }
    }

    /// Create a snake heading right, its head at a random cell that leaves
    /// room for its footprint before the right and bottom edges.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        grid: Grid,
        length: usize,
        cell_size: i32,
        step_size: i32,
    ) -> Self {
        let head = grid.random_origin(rng, cell_size);
        Self::new(grid, head, Direction::Right, length, cell_size, step_size)
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    #[cfg(test)]
    pub(crate) fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake has at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Move one step in the current direction, wrapping at the edges.
    ///
    /// The tail is dropped unless `should_grow` is set, so length grows by one
    /// on a growth tick and is unchanged otherwise.
    pub fn advance(&mut self, should_grow: bool) {
        let new_head = self
            .grid
            .wrap(self.head().moved_in_direction(self.direction, self.step_size));
        self.body.push_front(new_head);

        if !should_grow {
            self.body.pop_back();
        }
    }

    /// Turn, unless the request is a 180-degree reversal.
    ///
    /// The guard applies at every length, including a lone head.
    pub fn change_direction(&mut self, new_direction: Direction) {
        if self.direction.is_opposite(new_direction) {
            debug!(
                "ignoring reversal from {:?} to {:?}",
                self.direction, new_direction
            );
            return;
        }
        self.direction = new_direction;
    }

    /// Occupied cells, head first
    pub fn occupied_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Whether any segment sits exactly on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.occupied_cells().any(|cell| cell == pos)
    }

    /// Whether a square at `pos` with side `size` touches any segment's footprint
    pub fn overlaps(&self, pos: Position, size: i32) -> bool {
        self.occupied_cells()
            .any(|cell| squares_overlap(cell, self.cell_size, pos, size))
    }

    #[cfg(test)]
    pub(crate) fn from_cells(
        grid: Grid,
        cells: impl IntoIterator<Item = Position>,
        direction: Direction,
        cell_size: i32,
        step_size: i32,
    ) -> Self {
        Self {
            body: cells.into_iter().collect(),
            direction,
            cell_size,
            step_size,
            grid,
        }
    }
}

/// A single piece of food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub cell_size: i32,
}

impl Food {
    pub fn new(position: Position, cell_size: i32) -> Self {
        Self {
            position,
            cell_size,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub grid: Grid,
    pub is_alive: bool,
}

impl GameState {
    pub fn new(snake: Snake, food: Food, grid: Grid) -> Self {
        Self {
            snake,
            food,
            grid,
            is_alive: true,
        }
    }

    /// Whether the head's square overlaps the food's square.
    ///
    /// Checked against the pre-move head; the result feeds `Snake::advance`.
    pub fn did_eat(&self) -> bool {
        squares_overlap(
            self.snake.head(),
            self.snake.cell_size(),
            self.food.position,
            self.food.cell_size,
        )
    }

    /// Whether any segment after the head sits on the head's cell
    pub fn did_self_collide(&self) -> bool {
        let head = self.snake.head();
        self.snake.occupied_cells().skip(1).any(|cell| cell == head)
    }

    /// Move the food to a random cell off the snake, preferring cells whose
    /// footprint is clear of it.
    ///
    /// Returns the new position, or `None` if every candidate cell is
    /// occupied, in which case the food stays where it is.
    pub fn respawn_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Position> {
        let position = find_free_cell(rng, self.grid, &self.snake, self.food.cell_size)?;
        debug!("food respawned at ({}, {})", position.x, position.y);
        self.food.position = position;
        Some(position)
    }
}

/// Pick a food origin for the snake to chase.
///
/// Origins whose footprint is clear of every segment are preferred: random
/// sampling first, then, past `MAX_RESPAWN_ATTEMPTS`, a scan with a uniform
/// pick. When no such origin is left, any origin not occupied by a segment is
/// accepted. `None` only when every candidate origin is occupied.
pub fn find_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    snake: &Snake,
    size: i32,
) -> Option<Position> {
    for _ in 0..MAX_RESPAWN_ATTEMPTS {
        let candidate = grid.random_origin(rng, size);
        if !snake.overlaps(candidate, size) {
            return Some(candidate);
        }
    }

    warn!(
        "no clear cell after {} samples, scanning grid (snake length {})",
        MAX_RESPAWN_ATTEMPTS,
        snake.len()
    );
    let clear = grid
        .origins(size)
        .filter(|&cell| !snake.overlaps(cell, size))
        .choose(rng);
    if clear.is_some() {
        return clear;
    }

    let unoccupied = grid
        .origins(size)
        .filter(|&cell| !snake.occupies(cell))
        .choose(rng);
    match unoccupied {
        Some(cell) => debug!("food placed next to the snake at ({}, {})", cell.x, cell.y),
        None => warn!("board is full, food left in place"),
    }
    unoccupied
}
