use crate::grid::Cell;
use crate::simulation::Simulation;
use crate::types::Direction;

/// Greedy driver: heads for the food along the shortest Manhattan distance
/// while avoiding walls and its own body.
pub struct Autopilot;

impl Autopilot {
    pub fn next_direction(sim: &Simulation) -> Option<Direction> {
        if sim.is_dead() || sim.is_paused() {
            return None;
        }

        let head = sim.head();
        let food = sim.food();
        let current_direction = sim.direction();

        let safe_directions: Vec<(Direction, Cell)> = Self::get_valid_directions(current_direction)
            .into_iter()
            .filter_map(|dir| {
                let next = sim.grid().neighbor(&head, dir)?;
                Self::is_safe_position(&next, sim).then_some((dir, next))
            })
            .collect();

        let best = safe_directions
            .iter()
            .min_by_key(|(dir, next)| (next.manhattan_distance(&food), *dir != current_direction))
            .map(|(dir, _)| *dir);

        Some(best.unwrap_or(current_direction))
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    fn is_safe_position(pos: &Cell, sim: &Simulation) -> bool {
        !sim.grid().is_border(pos.col, pos.row) && !sim.snake().blocks(pos)
    }
}
