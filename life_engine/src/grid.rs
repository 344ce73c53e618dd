// grid.rs - Toroidal grid for Conway's Game of Life

use rand::Rng;

use crate::error::LifeError;
use crate::patterns::{PATTERN_SIZE, Pattern};

/// Offsets of the eight cells surrounding a cell.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// B3/S23: survival on 2 or 3 neighbours, birth on exactly 3.
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    match (alive, live_neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Double-buffered boolean grid whose edges wrap around.
///
/// Both buffers are contiguous and indexed `y * width + x`. `advance` fills
/// `next_cells` from `cells` only, then swaps them, so the scratch buffer is
/// reused every generation.
#[derive(Debug, Clone)]
pub struct GridState {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    next_cells: Vec<bool>,
    generation: u64,
}

impl GridState {
    /// Allocates a `width` x `height` grid and randomises it.
    pub fn new<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self, LifeError> {
        let mut grid = Self::empty(width, height)?;
        grid.randomize(rng);
        Ok(grid)
    }

    /// Allocates a grid with every cell dead.
    pub fn empty(width: usize, height: usize) -> Result<Self, LifeError> {
        if width < PATTERN_SIZE || height < PATTERN_SIZE {
            return Err(LifeError::GridTooSmall { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
            next_cells: vec![false; width * height],
            generation: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of generations computed since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    /// Coordinates wrap, so any `x`/`y` is accepted.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x % self.width, y % self.height)]
    }

    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) {
        let idx = self.index(x % self.width, y % self.height);
        self.cells[idx] = alive;
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Live cell coordinates in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| (idx % self.width, idx / self.width))
    }

    /// Each cell becomes alive with probability 0.5.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in self.cells.iter_mut() {
            *cell = rng.random_bool(0.5);
        }
    }

    /// Forces the pattern's live cells alive at `origin`, wrapping at the
    /// edges. Cells the pattern leaves dead are not touched.
    pub fn inject_pattern(&mut self, pattern: &Pattern, origin_x: usize, origin_y: usize) {
        for (dx, column) in pattern.cells.iter().enumerate() {
            for (dy, &alive) in column.iter().enumerate() {
                if alive {
                    let x = (origin_x + dx) % self.width;
                    let y = (origin_y + dy) % self.height;
                    let idx = self.index(x, y);
                    self.cells[idx] = true;
                }
            }
        }
    }

    /// Live cells among the eight wrapped neighbours of `(x, y)`.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        let (w, h) = (self.width as isize, self.height as isize);
        let mut count = 0;
        for &(dx, dy) in &NEIGHBOR_OFFSETS {
            let nx = (x as isize + dx).rem_euclid(w) as usize;
            let ny = (y as isize + dy).rem_euclid(h) as usize;
            if self.cells[self.index(nx, ny)] { count += 1; }
        }
        count
    }

    /// Computes the next generation into the scratch buffer, then swaps.
    pub fn advance(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.index(x, y);
                let next = next_state(self.cells[idx], self.count_live_neighbors(x, y));
                self.next_cells[idx] = next;
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next_cells);
        self.generation += 1;
    }
}

// Two grids are equal when their live cells match; the scratch buffer is ignored.
impl PartialEq for GridState {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for GridState {}
