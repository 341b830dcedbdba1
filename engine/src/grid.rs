use std::hash::{Hash, Hasher};

use super::error::SimulationError;
use super::types::{AxisOrientation, Direction};

pub const MIN_GRID_SIZE: usize = 3;

/// A grid position together with the screen rectangle it is drawn at.
///
/// Two cells are equal when they have the same `(col, row)`; the screen
/// geometry is derived from the grid and carried only for renderers.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.col == other.col && self.row == other.row
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.col.hash(state);
        self.row.hash(state);
    }
}

impl Cell {
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row) == 1
    }

    pub fn manhattan_distance(&self, other: &Cell) -> usize {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cell_size: u32,
    origin_x: i32,
    origin_y: i32,
    orientation: AxisOrientation,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(
        rows: usize,
        cols: usize,
        cell_size: u32,
        origin_x: i32,
        origin_y: i32,
        orientation: AxisOrientation,
    ) -> Result<Self, SimulationError> {
        if rows < MIN_GRID_SIZE || cols < MIN_GRID_SIZE {
            return Err(SimulationError::invalid(format!(
                "grid must be at least {0}x{0}, got {1}x{2}",
                MIN_GRID_SIZE, cols, rows
            )));
        }
        if cell_size == 0 {
            return Err(SimulationError::invalid("cell size must be greater than 0"));
        }

        let size = i32::try_from(cell_size)
            .map_err(|_| SimulationError::invalid(format!("cell size {} is too large", cell_size)))?;
        let sign = orientation.sign();
        // Far edges bound every coordinate in between, so the loop below cannot overflow.
        let edges = [
            pixel_edge(origin_x, cols, size, 1),
            pixel_edge(origin_y, rows, size, sign),
            origin_y.checked_add(size),
        ];
        if edges.iter().any(Option::is_none) {
            return Err(SimulationError::invalid(format!(
                "a {}x{} grid of {} px cells at ({}, {}) does not fit in pixel coordinates",
                cols, rows, cell_size, origin_x, origin_y
            )));
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell {
                    col,
                    row,
                    x: origin_x + col as i32 * size,
                    y: origin_y + sign * row as i32 * size,
                    size: cell_size,
                });
            }
        }

        Ok(Self {
            rows,
            cols,
            cell_size,
            origin_x,
            origin_y,
            orientation,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    /// Panics when `(col, row)` lies outside the grid.
    pub fn cell_at(&self, col: usize, row: usize) -> Cell {
        assert!(
            col < self.cols && row < self.rows,
            "cell ({}, {}) is outside of {}x{} grid",
            col,
            row,
            self.cols,
            self.rows
        );
        self.cells[row * self.cols + col]
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Cell `steps` moves away from `(col, row)` in `direction`, if it is on the grid.
    pub fn offset(&self, col: usize, row: usize, direction: Direction, steps: i64) -> Option<Cell> {
        let (dx, dy) = direction.offset();
        let col = col as i64 + dx * steps;
        let row = row as i64 + dy * steps;
        if col < 0 || row < 0 {
            return None;
        }
        self.get(col as usize, row as usize)
    }

    pub fn neighbor(&self, cell: &Cell, direction: Direction) -> Option<Cell> {
        self.offset(cell.col, cell.row, direction, 1)
    }

    pub fn is_border(&self, col: usize, row: usize) -> bool {
        col == 0 || row == 0 || col == self.cols - 1 || row == self.rows - 1
    }

    pub fn is_interior(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows && !self.is_border(col, row)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn border_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| self.is_border(c.col, c.row))
    }

    pub fn interior_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| !self.is_border(c.col, c.row))
    }

    pub fn interior_len(&self) -> usize {
        (self.rows - 2) * (self.cols - 2)
    }

    /// Screen rectangle covered by the whole grid.
    pub fn pixel_bounds(&self) -> PixelBounds {
        let size = self.cell_size as i32;
        let first_row_y = self.origin_y;
        let last_row_y = self.origin_y + self.orientation.sign() * (self.rows as i32 - 1) * size;
        PixelBounds {
            left: self.origin_x,
            top: first_row_y.min(last_row_y),
            right: self.origin_x + self.cols as i32 * size,
            bottom: first_row_y.max(last_row_y) + size,
        }
    }

    /// Inverse of the cell geometry: the cell whose square starts at `(x, y)`.
    pub fn cell_at_pixel(&self, x: i32, y: i32) -> Option<Cell> {
        let size = self.cell_size as i32;
        let dx = x.checked_sub(self.origin_x)?;
        let dy = y
            .checked_sub(self.origin_y)?
            .checked_mul(self.orientation.sign())?;
        if dx < 0 || dy < 0 || dx % size != 0 || dy % size != 0 {
            return None;
        }
        self.get((dx / size) as usize, (dy / size) as usize)
    }
}

/// `origin + sign * count * size`, or `None` when it leaves `i32`.
fn pixel_edge(origin: i32, count: usize, size: i32, sign: i32) -> Option<i32> {
    i32::try_from(count)
        .ok()?
        .checked_mul(size)?
        .checked_mul(sign)?
        .checked_add(origin)
}
