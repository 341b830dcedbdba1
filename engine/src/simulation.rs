use crate::config::{SimulationConfig, Validate};
use crate::log;

use super::error::SimulationError;
use super::grid::{Cell, Grid};
use super::session_rng::SessionRng;
use super::snake::Snake;
use super::types::{DeathReason, Direction, StepOutcome};

/// Random rolls tried before falling back to scanning the free interior cells.
pub const FOOD_PLACEMENT_ATTEMPTS: usize = 100;

/// One game session: a fixed grid, one snake, one piece of food.
///
/// The simulation never looks at a clock. Callers advance it with [`step`]
/// at whatever cadence they like and issue commands between steps.
///
/// [`step`]: Simulation::step
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimulationConfig,
    grid: Grid,
    spawn: Snake,
    snake: Snake,
    food: Cell,
    score: u32,
    paused: bool,
    dead: bool,
    death_reason: Option<DeathReason>,
    can_turn: bool,
    steps: u64,
    last_outcome: Option<StepOutcome>,
    rng: SessionRng,
}

impl Simulation {
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, SimulationError> {
        Self::with_rng(config, SessionRng::new(seed))
    }

    pub fn with_random_seed(config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::with_rng(config, SessionRng::from_random())
    }

    fn with_rng(config: SimulationConfig, mut rng: SessionRng) -> Result<Self, SimulationError> {
        config
            .validate()
            .map_err(SimulationError::InvalidConfiguration)?;

        let grid = Grid::new(
            config.rows,
            config.cols,
            config.cell_size,
            config.origin_x,
            config.origin_y,
            config.axis_orientation,
        )?;
        let spawn = Snake::spawn(
            &grid,
            config.spawn.col,
            config.spawn.row,
            config.spawn.direction,
            config.spawn.length,
        )?;
        let food = place_food(&grid, &spawn, None, &mut rng).ok_or_else(|| {
            SimulationError::invalid("the initial snake leaves no free interior cell for food")
        })?;

        log!(
            "Simulation created: {}x{} grid, seed {}, food at ({}, {})",
            grid.cols(),
            grid.rows(),
            rng.seed(),
            food.col,
            food.row
        );

        Ok(Self {
            config,
            grid,
            snake: spawn.clone(),
            spawn,
            food,
            score: 0,
            paused: false,
            dead: false,
            death_reason: None,
            can_turn: true,
            steps: 0,
            last_outcome: None,
            rng,
        })
    }

    /// Advances one tick. Returns `None` without touching anything while
    /// paused or dead. Either way the per-tick turn latch is re-armed.
    pub fn step(&mut self) -> Option<StepOutcome> {
        self.can_turn = true;
        if self.paused || self.dead {
            return None;
        }

        let head = self.snake.head();
        let Some(candidate) = self.grid.neighbor(&head, self.snake.direction()) else {
            // Heads never leave the interior alive, so this only guards the grid edge.
            self.kill(DeathReason::WallCollision);
            let outcome = StepOutcome {
                fed: false,
                collision: Some(DeathReason::WallCollision),
            };
            self.last_outcome = Some(outcome);
            return Some(outcome);
        };

        let fed = candidate == self.food;
        let mut grid_filled = false;
        if fed {
            // Excludes the snake as it is before this move, plus the eaten cell.
            match place_food(&self.grid, &self.snake, Some(self.food), &mut self.rng) {
                Some(food) => self.food = food,
                None => {
                    // The food stays under the head; the game ends below, so it is never eaten again.
                    log!(
                        "No free cell left for food, keeping it at ({}, {})",
                        self.food.col,
                        self.food.row
                    );
                    grid_filled = true;
                }
            }
        }

        let collision = if self.grid.is_border(candidate.col, candidate.row) {
            Some(DeathReason::WallCollision)
        } else if self.snake.blocks(&candidate) {
            Some(DeathReason::SelfCollision)
        } else {
            None
        };

        self.snake.advance(candidate, fed);
        self.steps += 1;

        if fed {
            self.score += 1;
            log!(
                "Ate food at ({}, {}). Score: {}. Next food at ({}, {})",
                candidate.col,
                candidate.row,
                self.score,
                self.food.col,
                self.food.row
            );
        }

        if let Some(reason) = collision {
            self.kill(reason);
        } else if grid_filled {
            self.kill(DeathReason::GridFilled);
        }

        let outcome = StepOutcome { fed, collision };
        self.last_outcome = Some(outcome);
        Some(outcome)
    }

    /// Accepts at most one turn per tick, never while paused or dead and
    /// never straight back into the neck.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.paused
            || self.dead
            || !self.can_turn
            || direction.is_opposite(&self.snake.direction())
        {
            return false;
        }

        self.snake.set_direction(direction);
        self.can_turn = false;
        true
    }

    /// Returns the paused flag after the call; dead games stay unpaused.
    pub fn toggle_pause(&mut self) -> bool {
        if self.dead {
            return self.paused;
        }
        self.paused = !self.paused;
        log!("Game {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    pub fn restart(&mut self) {
        self.snake = self.spawn.clone();
        // Construction proved the spawn snake leaves at least one free cell.
        if let Some(food) = place_food(&self.grid, &self.snake, None, &mut self.rng) {
            self.food = food;
        }
        self.score = 0;
        self.paused = false;
        self.dead = false;
        self.death_reason = None;
        self.can_turn = true;
        self.steps = 0;
        self.last_outcome = None;
        log!("Game restarted, food at ({}, {})", self.food.col, self.food.row);
    }

    fn kill(&mut self, reason: DeathReason) {
        let head = self.snake.head();
        self.dead = true;
        self.death_reason = Some(reason);
        log!(
            "Game over at ({}, {}): {:?}. Final score: {}",
            head.col,
            head.row,
            reason,
            self.score
        );
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Cell> + ExactSizeIterator {
        self.snake.segments()
    }

    pub fn head(&self) -> Cell {
        self.snake.head()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    pub fn can_turn(&self) -> bool {
        self.can_turn && !self.paused && !self.dead
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn last_outcome(&self) -> Option<StepOutcome> {
        self.last_outcome
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[cfg(test)]
    fn place_food_at(&mut self, col: usize, row: usize) {
        self.food = self.grid.cell_at(col, row);
    }
}

/// Uniform over interior cells not covered by `snake` and not equal to `exclude`.
fn place_food(
    grid: &Grid,
    snake: &Snake,
    exclude: Option<Cell>,
    rng: &mut SessionRng,
) -> Option<Cell> {
    let is_free = |cell: &Cell| !snake.contains(cell) && Some(*cell) != exclude;

    for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
        let col = rng.random_range(1..grid.cols() - 1);
        let row = rng.random_range(1..grid.rows() - 1);
        let cell = grid.cell_at(col, row);
        if is_free(&cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = grid.interior_cells().filter(|c| is_free(*c)).copied().collect();
    rng.choose(&free).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpawnConfig;
    use crate::types::AxisOrientation;

    fn config(
        cols: usize,
        rows: usize,
        col: usize,
        row: usize,
        direction: Direction,
        length: usize,
    ) -> SimulationConfig {
        SimulationConfig {
            rows,
            cols,
            cell_size: 10,
            origin_x: 0,
            origin_y: 0,
            axis_orientation: AxisOrientation::Down,
            spawn: SpawnConfig {
                col,
                row,
                direction,
                length,
            },
        }
    }

    fn create_simulation(col: usize, row: usize, direction: Direction, length: usize) -> Simulation {
        Simulation::new(config(10, 10, col, row, direction, length), 42).unwrap()
    }

    fn positions(sim: &Simulation) -> Vec<(usize, usize)> {
        sim.segments().map(|c| (c.col, c.row)).collect()
    }

    fn assert_invariants(sim: &Simulation) {
        assert!(sim.snake().is_contiguous() || sim.is_dead());
        let food = sim.food();
        assert!(sim.grid().is_interior(food.col, food.row));
        if !sim.is_dead() {
            assert!(!sim.snake().contains(&food));
        }
    }

    #[test]
    fn test_new_initial_state() {
        let sim = create_simulation(5, 5, Direction::Right, 3);
        assert_eq!(positions(&sim), vec![(3, 5), (4, 5), (5, 5)]);
        assert_eq!(sim.score(), 0);
        assert!(!sim.is_paused());
        assert!(!sim.is_dead());
        assert_eq!(sim.direction(), Direction::Right);
        assert_invariants(&sim);
    }

    #[test]
    fn test_default_config_builds() {
        let sim = Simulation::new(SimulationConfig::default(), 1).unwrap();
        assert_eq!(positions(&sim), vec![(8, 5), (9, 5), (10, 5)]);
        assert_invariants(&sim);
    }

    #[test]
    fn test_invalid_configurations_fail_fast() {
        let result = Simulation::new(config(2, 10, 1, 1, Direction::Right, 1), 1);
        assert!(matches!(result, Err(SimulationError::InvalidConfiguration(_))));

        let result = Simulation::new(config(10, 10, 2, 5, Direction::Right, 5), 1);
        assert!(matches!(result, Err(SimulationError::InvalidConfiguration(_))));

        // A 3x3 grid has a single interior cell, and the snake takes it.
        let result = Simulation::new(config(3, 3, 1, 1, Direction::Up, 1), 1);
        assert!(matches!(result, Err(SimulationError::InvalidConfiguration(_))));

        let result = Simulation::new(config(500, 500, 5, 5, Direction::Right, usize::MAX), 1);
        assert!(matches!(result, Err(SimulationError::InvalidConfiguration(_))));

        let oversized = SimulationConfig {
            cell_size: 10_000_000,
            ..config(500, 500, 5, 5, Direction::Right, 3)
        };
        let result = Simulation::new(oversized, 1);
        assert!(matches!(result, Err(SimulationError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_step_moves_one_cell() {
        let mut sim = create_simulation(5, 5, Direction::Right, 3);
        sim.place_food_at(1, 1);
        let outcome = sim.step().unwrap();
        assert_eq!(outcome, StepOutcome { fed: false, collision: None });
        assert_eq!(positions(&sim), vec![(4, 5), (5, 5), (6, 5)]);
        assert_eq!(sim.steps(), 1);
        assert_eq!(sim.last_outcome(), Some(outcome));
    }

    #[test]
    fn test_wall_collision() {
        let mut sim = create_simulation(8, 5, Direction::Right, 3);
        sim.place_food_at(1, 1);
        let outcome = sim.step().unwrap();
        assert!(outcome.collided());
        assert_eq!(outcome.collision, Some(DeathReason::WallCollision));
        assert!(sim.is_dead());
        assert_eq!(sim.head(), sim.grid().cell_at(9, 5));
        assert_eq!(sim.death_reason(), Some(DeathReason::WallCollision));
    }

    #[test]
    fn test_self_collision() {
        let mut sim = create_simulation(5, 5, Direction::Right, 5);
        sim.place_food_at(1, 1);

        assert!(sim.set_direction(Direction::Up));
        sim.step();
        assert!(sim.set_direction(Direction::Left));
        sim.step();
        assert!(!sim.is_dead());
        assert!(sim.set_direction(Direction::Down));
        let outcome = sim.step().unwrap();

        assert_eq!(outcome.collision, Some(DeathReason::SelfCollision));
        assert!(sim.is_dead());
        assert_eq!(sim.head(), sim.grid().cell_at(4, 5));
    }

    #[test]
    fn test_moving_into_vacated_tail_is_safe() {
        let mut sim = create_simulation(5, 5, Direction::Right, 4);
        sim.place_food_at(1, 1);

        sim.set_direction(Direction::Up);
        sim.step();
        sim.set_direction(Direction::Left);
        sim.step();
        sim.set_direction(Direction::Down);
        let outcome = sim.step().unwrap();

        assert!(!outcome.collided());
        assert!(!sim.is_dead());
        assert_eq!(positions(&sim), vec![(5, 5), (5, 6), (4, 6), (4, 5)]);
    }

    #[test]
    fn test_feed_then_continue() {
        let mut sim = create_simulation(5, 5, Direction::Right, 3);
        sim.place_food_at(6, 5);

        let outcome = sim.step().unwrap();
        assert!(outcome.fed);
        assert!(!outcome.collided());
        assert_eq!(sim.snake().len(), 4);
        assert_eq!(sim.score(), 1);
        assert_ne!(sim.food(), sim.grid().cell_at(6, 5));
        assert_invariants(&sim);

        sim.place_food_at(1, 1);
        sim.step();
        assert_eq!(sim.snake().len(), 4);
        assert_eq!(sim.score(), 1);
    }

    #[test]
    fn test_step_is_noop_while_paused() {
        let mut sim = create_simulation(5, 5, Direction::Right, 3);
        let before = positions(&sim);
        let food = sim.food();

        assert!(sim.toggle_pause());
        assert!(sim.step().is_none());
        assert!(sim.step().is_none());
        assert_eq!(positions(&sim), before);
        assert_eq!(sim.food(), food);
        assert_eq!(sim.score(), 0);

        assert!(!sim.toggle_pause());
        assert!(sim.step().is_some());
    }

    #[test]
    fn test_step_is_noop_while_dead() {
        let mut sim = create_simulation(8, 5, Direction::Right, 3);
        sim.place_food_at(1, 1);
        sim.step();
        assert!(sim.is_dead());

        let before = positions(&sim);
        assert!(sim.step().is_none());
        assert_eq!(positions(&sim), before);
        assert_eq!(sim.food(), sim.grid().cell_at(1, 1));
    }

    #[test]
    fn test_pause_ignored_when_dead() {
        let mut sim = create_simulation(8, 5, Direction::Right, 3);
        sim.place_food_at(1, 1);
        sim.step();
        assert!(!sim.toggle_pause());
        assert!(!sim.is_paused());
    }

    #[test]
    fn test_reverse_direction_rejected() {
        let mut sim = create_simulation(5, 5, Direction::Right, 3);
        assert!(!sim.set_direction(Direction::Left));
        assert_eq!(sim.direction(), Direction::Right);
        assert!(sim.can_turn());
    }

    #[test]
    fn test_direction_rejected_while_dead() {
        let mut sim = create_simulation(8, 5, Direction::Right, 3);
        sim.place_food_at(1, 1);
        sim.step();
        assert!(sim.is_dead());
        assert!(!sim.can_turn());
        assert!(!sim.set_direction(Direction::Up));
        assert_eq!(sim.direction(), Direction::Right);
    }

    #[test]
    fn test_direction_rejected_while_paused() {
        let mut sim = create_simulation(5, 5, Direction::Right, 3);
        sim.toggle_pause();
        assert!(!sim.set_direction(Direction::Up));
        assert_eq!(sim.direction(), Direction::Right);
    }

    #[test]
    fn test_single_turn_per_tick() {
        let mut sim = create_simulation(5, 5, Direction::Right, 3);
        sim.place_food_at(1, 1);

        assert!(sim.set_direction(Direction::Up));
        assert!(!sim.set_direction(Direction::Left));
        assert!(!sim.can_turn());
        assert_eq!(sim.direction(), Direction::Up);

        sim.step();
        assert_eq!(sim.head(), sim.grid().cell_at(5, 6));
        assert!(sim.can_turn());
        assert!(sim.set_direction(Direction::Left));
    }

    #[test]
    fn test_restart_after_death() {
        let mut sim = create_simulation(7, 5, Direction::Right, 3);
        let initial = positions(&sim);
        sim.place_food_at(8, 5);
        sim.step();
        assert_eq!(sim.score(), 1);
        sim.place_food_at(1, 1);
        sim.step();
        assert!(sim.is_dead());

        sim.restart();
        assert!(!sim.is_dead());
        assert!(!sim.is_paused());
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.steps(), 0);
        assert_eq!(sim.direction(), Direction::Right);
        assert_eq!(positions(&sim), initial);
        assert!(sim.death_reason().is_none());
        assert!(sim.last_outcome().is_none());
        assert_invariants(&sim);
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = create_simulation(5, 5, Direction::Right, 3);
        let b = create_simulation(5, 5, Direction::Right, 3);
        assert_eq!(a.food(), b.food());
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_food_falls_back_to_last_free_cell() {
        // 5x3 grid: interior is the row (1..=3, 1); a length 2 snake leaves one cell.
        let sim = Simulation::new(config(5, 3, 3, 1, Direction::Right, 2), 9).unwrap();
        assert_eq!(sim.food(), sim.grid().cell_at(1, 1));
    }

    #[test]
    fn test_eating_last_free_cell_ends_game() {
        // 5x3 grid: the snake (3,1)-(2,1) heads Left into the only free cell.
        let mut sim = Simulation::new(config(5, 3, 2, 1, Direction::Left, 2), 3).unwrap();
        sim.place_food_at(1, 1);

        let outcome = sim.step().unwrap();
        assert!(outcome.fed);
        assert!(!outcome.collided());
        assert_eq!(sim.score(), 1);
        assert_eq!(sim.snake().len(), 3);
        assert_eq!(sim.snake().len(), sim.grid().interior_len());

        // With no cell left the food stays under the head; the game is over, so
        // food-off-snake no longer holds and nothing can eat it again.
        assert_eq!(sim.food(), sim.head());
        assert!(sim.is_dead());
        assert_eq!(sim.death_reason(), Some(DeathReason::GridFilled));
        assert!(sim.step().is_none());

        sim.restart();
        assert!(!sim.is_dead());
        assert!(!sim.snake().contains(&sim.food()));
    }

    #[test]
    fn test_random_walk_keeps_invariants() {
        let mut sim = Simulation::new(config(12, 9, 5, 4, Direction::Right, 3), 7).unwrap();
        let mut rng = SessionRng::new(11);

        for _ in 0..2000 {
            if sim.is_dead() {
                sim.restart();
            }
            let direction = *rng.choose(&Direction::ALL).unwrap();
            sim.set_direction(direction);

            let before_len = sim.snake().len();
            let before_score = sim.score();
            let expected_fed = sim.grid().neighbor(&sim.head(), sim.direction()) == Some(sim.food());

            let outcome = sim.step().unwrap();
            assert_eq!(outcome.fed, expected_fed);

            if outcome.fed {
                assert_eq!(sim.snake().len(), before_len + 1);
                assert_eq!(sim.score(), before_score + 1);
            } else {
                assert_eq!(sim.snake().len(), before_len);
                assert_eq!(sim.score(), before_score);
            }
            assert_invariants(&sim);
        }
    }
}
