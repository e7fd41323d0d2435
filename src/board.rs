use crate::{Cell, GameError, Position};
use itertools::iproduct;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The mine field: a fixed-size grid of cells indexed by (column, row),
/// columns left-to-right and rows top-to-bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    columns: u32,
    rows: u32,
    bomb_count: u32,
}

impl Board {
    pub fn new(columns: u32, rows: u32, bombs: u32) -> Result<Self, GameError> {
        Self::with_rng(columns, rows, bombs, &mut rand::thread_rng())
    }

    /// Deterministic construction for reproducible fixtures.
    pub fn from_seed(columns: u32, rows: u32, bombs: u32, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(columns, rows, bombs, &mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng>(
        columns: u32,
        rows: u32,
        bombs: u32,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if bombs == 0 || bombs >= columns * rows {
            return Err(GameError::InvalidBombCount {
                columns,
                rows,
                bombs,
            });
        }

        let mut board = Self::empty(columns, rows, bombs);
        board.place_mines(rng);
        Ok(board)
    }

    /// A board with mines at exactly the given positions, for tests that
    /// need a known layout. Duplicate positions are ignored.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn with_mines(columns: u32, rows: u32, mines: &[Position]) -> Self {
        let mut board = Self::empty(columns, rows, 0);
        for &pos in mines {
            if !board.cells[board.index(pos).unwrap()].is_mine() {
                board.plant_mine(pos);
                board.bomb_count += 1;
            }
        }
        board
    }

    fn empty(columns: u32, rows: u32, bomb_count: u32) -> Self {
        Self {
            cells: Array2::from_elem((rows as usize, columns as usize), Cell::default()),
            columns,
            rows,
            bomb_count,
        }
    }

    /// Scans the grid once in row-major order, placing mines with a
    /// position-dependent probability that rises as the remaining cells
    /// approach the remaining quota. The last cells of an unfilled quota
    /// become certain placements, so exactly `bomb_count` mines land; the
    /// `placed` gate keeps the count from ever overshooting. One draw is
    /// taken per cell to keep the curve independent of earlier outcomes.
    fn place_mines<R: Rng>(&mut self, rng: &mut R) {
        let total = (self.columns * self.rows) as f64;
        let base_chance = self.bomb_count as f64 / (10.0 * total);
        let mut placed = 0;

        for (row, col) in iproduct!(0..self.rows, 0..self.columns) {
            let scanned = (row * self.columns + col) as f64;
            let add_chance =
                (1.0 - base_chance) * (self.bomb_count - placed) as f64 / (total - scanned);
            let threshold = (100.0 * (base_chance + add_chance)) as u32;

            if rng.gen_range(0..100u32) < threshold && placed < self.bomb_count {
                self.plant_mine(Position::new(col as i32, row as i32));
                placed += 1;
            }
        }
    }

    /// Marks the cell as a mine and bumps the hint of every non-mine
    /// neighbor. A hint cell that later becomes a mine itself drops its
    /// accumulated count for the sentinel.
    fn plant_mine(&mut self, pos: Position) {
        let Some(center) = self.index(pos) else {
            return;
        };
        self.cells[center].set_mine();

        for neighbor in pos.neighbors() {
            if let Some(idx) = self.index(neighbor) {
                let cell = &mut self.cells[idx];
                if !cell.is_mine() {
                    cell.increment();
                }
            }
        }
    }

    fn index(&self, pos: Position) -> Option<(usize, usize)> {
        if self.is_within_bounds(pos) {
            Some((pos.y as usize, pos.x as usize))
        } else {
            None
        }
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.columns as i32 && pos.y >= 0 && pos.y < self.rows as i32
    }

    pub fn cell(&self, pos: Position) -> Result<&Cell, GameError> {
        self.index(pos)
            .map(|idx| &self.cells[idx])
            .ok_or(GameError::OutOfBounds(pos))
    }

    pub(crate) fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).map(|idx| &mut self.cells[idx])
    }

    /// Every grid position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        iproduct!(0..self.rows as i32, 0..self.columns as i32).map(|(y, x)| Position::new(x, y))
    }

    /// Hidden-cell count; the win check compares this against the bomb
    /// count after every reveal.
    pub fn count_hidden(&self) -> u32 {
        self.cells.iter().filter(|cell| cell.is_hidden()).count() as u32
    }

    /// Uncovers everything, mines included, for post-game display.
    pub(crate) fn expose_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.expose();
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    pub fn bomb_count(&self) -> u32 {
        self.bomb_count
    }
}
