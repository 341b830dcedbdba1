use std::collections::{HashSet, VecDeque};

use super::error::SimulationError;
use super::grid::{Cell, Grid};
use super::types::Direction;

/// Segment chain ordered tail first, head last.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    body_set: HashSet<Cell>,
    direction: Direction,
}

impl Snake {
    /// Lays `length` cells behind the head at `(col, row)`, against `direction`.
    /// Every cell must be inside the walls.
    pub fn spawn(
        grid: &Grid,
        col: usize,
        row: usize,
        direction: Direction,
        length: usize,
    ) -> Result<Self, SimulationError> {
        if length == 0 {
            return Err(SimulationError::invalid("initial snake length must be at least 1"));
        }

        if length > grid.interior_len() {
            return Err(SimulationError::invalid(format!(
                "snake of length {} cannot fit in {} interior cells",
                length,
                grid.interior_len()
            )));
        }

        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(length);
        for distance in (0..length).rev() {
            let cell = grid
                .offset(col, row, behind, distance as i64)
                .filter(|c| grid.is_interior(c.col, c.row))
                .ok_or_else(|| {
                    SimulationError::invalid(format!(
                        "snake of length {} with head at ({}, {}) facing {:?} does not fit inside the walls",
                        length, col, row, direction
                    ))
                })?;
            body.push_back(cell);
        }

        let body_set = body.iter().copied().collect();
        Ok(Self {
            body,
            body_set,
            direction,
        })
    }

    pub fn head(&self) -> Cell {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Cell {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Cell> + ExactSizeIterator {
        self.body.iter()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.body_set.contains(cell)
    }

    /// The tail is about to be vacated, so only the rest of the body blocks the head.
    pub fn blocks(&self, cell: &Cell) -> bool {
        self.contains(cell) && *cell != self.tail()
    }

    /// Pushes `next_head`; keeps the tail when `grow` is set, otherwise drops it.
    pub(crate) fn advance(&mut self, next_head: Cell, grow: bool) {
        if !grow {
            let tail = self
                .body
                .pop_front()
                .expect("Snake body should never be empty");
            self.body_set.remove(&tail);
        }
        self.body.push_back(next_head);
        self.body_set.insert(next_head);
    }

    pub fn is_contiguous(&self) -> bool {
        self.body
            .iter()
            .zip(self.body.iter().skip(1))
            .all(|(a, b)| a.is_adjacent(b))
    }
}
