use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use snake_engine::{log, Autopilot, Simulation};

use crate::frame::render_frame;
use crate::input::{parse_line, RunnerCommand};

pub struct RunOptions {
    pub tick_interval: Duration,
    pub autopilot: bool,
    pub max_ticks: Option<u64>,
    pub render: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub final_score: u32,
    pub best_score: u32,
    pub games_played: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Restarted,
    Quit,
}

/// SPACE pauses a running game and restarts a finished one.
pub fn apply_command(sim: &mut Simulation, command: RunnerCommand) -> LoopControl {
    match command {
        RunnerCommand::Turn(direction) => {
            if !sim.set_direction(direction) {
                log!("Turn {:?} ignored", direction);
            }
        }
        RunnerCommand::Space if sim.is_dead() => {
            sim.restart();
            return LoopControl::Restarted;
        }
        RunnerCommand::Space => {
            sim.toggle_pause();
        }
        RunnerCommand::Restart => {
            sim.restart();
            return LoopControl::Restarted;
        }
        RunnerCommand::Quit => return LoopControl::Quit,
    }
    LoopControl::Continue
}

/// Drives `sim` until quit, the tick limit, or until input is gone and the
/// game can no longer change on its own. Frames go to `output` after every tick.
pub async fn run<W: Write>(
    mut sim: Simulation,
    options: RunOptions,
    mut input: mpsc::UnboundedReceiver<String>,
    mut output: W,
) -> std::io::Result<RunSummary> {
    let mut ticker = interval(options.tick_interval);
    let mut input_open = true;
    let mut summary = RunSummary {
        games_played: 1,
        ..RunSummary::default()
    };

    'game: loop {
        tokio::select! {
            _ = ticker.tick() => {
                if options.autopilot
                    && let Some(direction) = Autopilot::next_direction(&sim)
                {
                    sim.set_direction(direction);
                }
                sim.step();
                summary.ticks += 1;
                summary.best_score = summary.best_score.max(sim.score());

                if options.render {
                    write!(output, "{}", render_frame(&sim))?;
                    output.flush()?;
                }

                if options.autopilot && sim.is_dead() {
                    break 'game;
                }
                if !input_open && (sim.is_dead() || sim.is_paused()) {
                    break 'game;
                }
                if let Some(max_ticks) = options.max_ticks
                    && summary.ticks >= max_ticks
                {
                    break 'game;
                }
            }
            line = input.recv(), if input_open => {
                match line {
                    Some(line) => {
                        for command in parse_line(&line) {
                            match apply_command(&mut sim, command) {
                                LoopControl::Continue => {}
                                LoopControl::Restarted => summary.games_played += 1,
                                LoopControl::Quit => break 'game,
                            }
                        }
                    }
                    None => {
                        log!("Input closed");
                        input_open = false;
                    }
                }
            }
        }
    }

    summary.final_score = sim.score();
    Ok(summary)
}
