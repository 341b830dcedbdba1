mod config;
mod frame;
mod game_loop;
mod input;

use clap::Parser;
use std::path::PathBuf;

use snake_engine::config::Validate;
use snake_engine::logger::{self, LogTarget};
use snake_engine::{log, Simulation};

use config::{get_config_manager, RunnerConfig};
use game_loop::RunOptions;

#[derive(Parser)]
#[command(name = "snake_runner", about = "Plays grid snake in the terminal")]
struct Args {
    /// Config file; defaults to snake_runner_config.yaml next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Writes the default config to the config path and exits.
    #[arg(long)]
    write_default_config: bool,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    tick_interval_ms: Option<u64>,

    /// Let the built-in autopilot steer.
    #[arg(long)]
    autopilot: bool,

    #[arg(long)]
    max_ticks: Option<u64>,

    /// Skip printing frames; only the log is written.
    #[arg(long)]
    no_render: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, LogTarget::Stderr);

    let config_manager = get_config_manager(args.config);

    if args.write_default_config {
        config_manager.set_config(&RunnerConfig::default())?;
        log!("Default config written");
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(tick_interval_ms) = args.tick_interval_ms {
        config.tick_interval_ms = tick_interval_ms;
    }
    config.autopilot |= args.autopilot;
    config.validate()?;

    let sim = match config.seed {
        Some(seed) => Simulation::new(config.simulation.clone(), seed)?,
        None => Simulation::with_random_seed(config.simulation.clone())?,
    };
    log!(
        "Starting: tick {} ms, seed {}, autopilot {}",
        config.tick_interval_ms,
        sim.seed(),
        config.autopilot
    );

    let options = RunOptions {
        tick_interval: config.tick_interval(),
        autopilot: config.autopilot,
        max_ticks: args.max_ticks,
        render: !args.no_render,
    };
    let summary = game_loop::run(sim, options, input::spawn_stdin_reader(), std::io::stdout()).await?;

    log!(
        "Finished after {} ticks: final score {}, best score {}, games played {}",
        summary.ticks,
        summary.final_score,
        summary.best_score,
        summary.games_played
    );

    Ok(())
}
