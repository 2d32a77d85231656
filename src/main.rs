use anyhow::Result;

use tennis_league::cli::Command;
use tennis_league::{
    handle_close, handle_completions, handle_double_forfeit, handle_matches, handle_open,
    handle_players, handle_record, handle_standings, handle_status, handle_undo, handle_walkover,
    interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Status => handle_status(),
        Command::Players { action } => handle_players(action),
        Command::Open { start, end } => handle_open(*start, *end),
        Command::Matches { pending } => handle_matches(*pending),
        Command::Record {
            id,
            scores,
            stb,
            date,
        } => handle_record(*id, scores, *stb, *date),
        Command::Walkover { id, winner } => handle_walkover(*id, *winner),
        Command::DoubleForfeit { id } => handle_double_forfeit(*id),
        Command::Undo { id } => handle_undo(*id),
        Command::Standings { json } => handle_standings(*json),
        Command::Close => handle_close(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
