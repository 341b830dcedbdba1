use serde::{Deserialize, Serialize};

use super::Validate;
use crate::grid::MIN_GRID_SIZE;
use crate::types::{AxisOrientation, Direction};

pub const MAX_GRID_SIZE: usize = 500;
pub const MAX_CELL_SIZE: u32 = 1000;
/// Keeps every pixel coordinate, text line included, well inside `i32`.
pub const MAX_ORIGIN_OFFSET: i32 = 1_000_000;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct SpawnConfig {
    pub col: usize,
    pub row: usize,
    pub direction: Direction,
    pub length: usize,
}

/// Everything a simulation is built from. `restart` reuses the same values.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: u32,
    pub origin_x: i32,
    pub origin_y: i32,
    pub axis_orientation: AxisOrientation,
    pub spawn: SpawnConfig,
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.rows < MIN_GRID_SIZE || self.cols < MIN_GRID_SIZE {
            return Err(format!(
                "grid dimensions must be at least {0}x{0}",
                MIN_GRID_SIZE
            ));
        }
        if self.rows > MAX_GRID_SIZE || self.cols > MAX_GRID_SIZE {
            return Err(format!(
                "grid dimensions must not exceed {0}x{0}",
                MAX_GRID_SIZE
            ));
        }
        if self.cell_size == 0 {
            return Err("cell_size must be greater than 0".to_string());
        }
        if self.cell_size > MAX_CELL_SIZE {
            return Err(format!("cell_size must not exceed {}", MAX_CELL_SIZE));
        }
        let origin_range = -MAX_ORIGIN_OFFSET..=MAX_ORIGIN_OFFSET;
        if !origin_range.contains(&self.origin_x) || !origin_range.contains(&self.origin_y) {
            return Err(format!(
                "origin ({}, {}) must lie within {} px of zero on both axes",
                self.origin_x, self.origin_y, MAX_ORIGIN_OFFSET
            ));
        }
        if self.spawn.length == 0 {
            return Err("spawn length must be at least 1".to_string());
        }
        let interior_cols = 1..self.cols - 1;
        let interior_rows = 1..self.rows - 1;
        if !interior_cols.contains(&self.spawn.col) || !interior_rows.contains(&self.spawn.row) {
            return Err(format!(
                "spawn ({}, {}) must be inside the walls",
                self.spawn.col, self.spawn.row
            ));
        }
        let room = self.spawn_room();
        if self.spawn.length > room {
            return Err(format!(
                "spawn length {} does not fit: only {} interior cells behind the head",
                self.spawn.length, room
            ));
        }
        Ok(())
    }
}

impl SimulationConfig {
    /// Interior cells from the spawn head back to the wall, head included.
    /// Assumes the head itself is inside the walls.
    fn spawn_room(&self) -> usize {
        let SpawnConfig { col, row, .. } = self.spawn;
        match self.spawn.direction.opposite() {
            Direction::Left => col,
            Direction::Right => self.cols - 1 - col,
            Direction::Down => row,
            Direction::Up => self.rows - 1 - row,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 40,
            cols: 40,
            cell_size: 15,
            origin_x: 60,
            origin_y: 645,
            axis_orientation: AxisOrientation::Up,
            spawn: SpawnConfig {
                col: 10,
                row: 5,
                direction: Direction::Right,
                length: 3,
            },
        }
    }
}
