//! TimeTap headless host
//!
//! Drives the game loop from line-oriented stdin so any front end (or a
//! person at a terminal) can play: `login <name>`, `hold`, `release`,
//! `slow`, `shield`, `restart`, `status`, `quit`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use timetap::{Command, Game, GameHandle, GameLoop, LoopClosed, Screen, Settings};

/// Hold-to-move-time reflex game, driven from stdin
#[derive(Parser, Debug)]
#[command(name = "timetap")]
struct Args {
    /// JSON settings file (defaults used when absent)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,
}

/// One parsed line of stdin
#[derive(Debug, PartialEq)]
enum Input {
    Login(String),
    Hold(bool),
    SlowTime,
    Shield,
    Restart,
    Status,
    Help,
    Quit,
}

fn parse_line(line: &str) -> Option<Input> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let input = match word.to_lowercase().as_str() {
        "login" => Input::Login(rest.trim().to_string()),
        "hold" | "h" => Input::Hold(true),
        "release" | "r" => Input::Hold(false),
        "slow" => Input::SlowTime,
        "shield" => Input::Shield,
        "restart" => Input::Restart,
        "status" | "s" => Input::Status,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => return None,
    };
    Some(input)
}

const HELP: &str = "commands: login <name> | hold | release | slow | shield | restart | status | quit";

async fn print_status(handle: &GameHandle) -> Result<(), LoopClosed> {
    let snapshot = handle.snapshot().await?;
    match serde_json::to_string(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode snapshot: {}", e),
    }
    Ok(())
}

/// Log screen transitions as they happen
async fn watch_screens(handle: GameHandle) {
    let mut feed = handle.subscribe();
    let mut screen = feed.borrow().screen;
    while feed.changed().await.is_ok() {
        let snapshot = feed.borrow_and_update().clone();
        if snapshot.screen != screen {
            screen = snapshot.screen;
            match screen {
                Screen::GameOver => println!("GAME OVER - score {} coins {}", snapshot.score, snapshot.coins),
                Screen::Playing => println!("PLAYING as {}", snapshot.username.unwrap_or_default()),
                Screen::Login => {}
            }
        }
    }
}

async fn run_stdin(handle: &GameHandle) -> Result<(), LoopClosed> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return Ok(()),
            Err(e) => {
                log::error!("stdin read failed: {}", e);
                return Ok(());
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(input) = parse_line(&line) else {
            println!("unknown command: {}", line.trim());
            println!("{HELP}");
            continue;
        };

        let command = match input {
            Input::Login(name) => Command::Login(name),
            Input::Hold(active) => Command::Hold(active),
            Input::SlowTime => Command::SlowTime,
            Input::Shield => Command::Shield,
            Input::Restart => Command::Restart,
            Input::Status => {
                print_status(handle).await?;
                continue;
            }
            Input::Help => {
                println!("{HELP}");
                continue;
            }
            Input::Quit => return Ok(()),
        };
        handle.send(command).await?;
    }
}

fn load_settings(args: &Args) -> Result<Settings, timetap::ConfigError> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    settings.validate()?;
    Ok(settings)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("TimeTap starting...");
    let game = match Game::new(settings) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let (game_loop, handle) = GameLoop::new(game);
    let game_task = tokio::spawn(game_loop.run());
    tokio::spawn(watch_screens(handle.clone()));
    println!("{HELP}");

    if let Err(e) = run_stdin(&handle).await {
        log::warn!("{}", e);
    }
    // Loop may already be gone; either way it is stopped after this
    let _ = handle.shutdown().await;

    match game_task.await {
        Ok(game) => {
            let snapshot = game.snapshot();
            log::info!("Final score {} ({} coins)", snapshot.score, snapshot.coins);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Game loop task failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
