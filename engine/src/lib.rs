pub mod autopilot;
pub mod config;
pub mod logger;
pub mod render;

mod error;
mod grid;
mod session_rng;
mod simulation;
mod snake;
mod types;

pub use autopilot::Autopilot;
pub use error::SimulationError;
pub use grid::{Cell, Grid, PixelBounds, MIN_GRID_SIZE};
pub use session_rng::SessionRng;
pub use simulation::{Simulation, FOOD_PLACEMENT_ATTEMPTS};
pub use snake::Snake;
pub use types::{AxisOrientation, DeathReason, Direction, StepOutcome};
