use snake_engine::{log, Direction};
use std::io::BufRead;
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerCommand {
    Turn(Direction),
    /// Pause or resume a running game, restart a finished one.
    Space,
    Restart,
    Quit,
}

/// Reads stdin lines on a plain thread. A blocking read cannot be cancelled,
/// so it must not live on the runtime that has to shut down when the game ends.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// One line of stdin may carry several commands, e.g. `wd` or `up left`.
pub fn parse_line(line: &str) -> Vec<RunnerCommand> {
    let mut commands = Vec::new();
    for word in line.split_whitespace() {
        let word = word.to_ascii_lowercase();
        match parse_word(&word) {
            Some(command) => commands.push(command),
            None => commands.extend(word.chars().filter_map(parse_key)),
        }
    }
    commands
}

fn parse_word(word: &str) -> Option<RunnerCommand> {
    let command = match word {
        "up" => RunnerCommand::Turn(Direction::Up),
        "down" => RunnerCommand::Turn(Direction::Down),
        "left" => RunnerCommand::Turn(Direction::Left),
        "right" => RunnerCommand::Turn(Direction::Right),
        "space" | "pause" => RunnerCommand::Space,
        "restart" => RunnerCommand::Restart,
        "quit" | "exit" => RunnerCommand::Quit,
        _ => return None,
    };
    Some(command)
}

fn parse_key(key: char) -> Option<RunnerCommand> {
    match key {
        'w' => Some(RunnerCommand::Turn(Direction::Up)),
        's' => Some(RunnerCommand::Turn(Direction::Down)),
        'a' => Some(RunnerCommand::Turn(Direction::Left)),
        'd' => Some(RunnerCommand::Turn(Direction::Right)),
        'p' => Some(RunnerCommand::Space),
        'r' => Some(RunnerCommand::Restart),
        'q' => Some(RunnerCommand::Quit),
        _ => None,
    }
}
