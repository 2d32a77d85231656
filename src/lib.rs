pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod league;
pub mod report;
pub mod services;

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::{Command, PlayersAction, SideArg};
use crate::config::settings::AppConfig;
use crate::database::SqliteStorage;
use crate::domain::{MatchId, Player, Side};
use crate::league::{CloseReadiness, CyclePhase};
use crate::services::LeagueService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn open_service() -> Result<LeagueService<SqliteStorage>> {
    let config = AppConfig::from_env();
    let storage = SqliteStorage::open(&config.storage.database_path)?;
    Ok(LeagueService::new(storage, config.league)?)
}

pub fn handle_status() -> Result<()> {
    let service = open_service()?;
    print!(
        "{}",
        report::render_dashboard(service.state().cycle(), &service.progress(), service.phase())
    );
    Ok(())
}

pub fn handle_players(action: &PlayersAction) -> Result<()> {
    let mut service = open_service()?;
    match action {
        PlayersAction::List => {}
        PlayersAction::Add { name, class } => service.add_player(Player::new(name, class))?,
        PlayersAction::Remove { name } => service.remove_player(name)?,
        PlayersAction::SetClass { name, class } => service.set_class(name, class)?,
    }

    let order = &service.controller().settings().class_order;
    print!("{}", report::render_roster(service.state().players(), order));
    Ok(())
}

pub fn handle_open(start: Option<chrono::NaiveDate>, end: Option<chrono::NaiveDate>) -> Result<()> {
    let mut service = open_service()?;
    service.open_cycle(start, end)?;

    let order = &service.controller().settings().class_order;
    print!("{}", report::render_matches(service.state().matches(), order));
    Ok(())
}

pub fn handle_matches(pending_only: bool) -> Result<()> {
    let service = open_service()?;
    let matches: Vec<_> = service
        .state()
        .matches()
        .iter()
        .filter(|m| !pending_only || m.is_pending())
        .cloned()
        .collect();

    let order = &service.controller().settings().class_order;
    print!("{}", report::render_matches(&matches, order));
    Ok(())
}

pub fn handle_record(
    id: MatchId,
    scores: &[String],
    super_tiebreak: bool,
    date: Option<chrono::NaiveDate>,
) -> Result<()> {
    let mut service = open_service()?;
    service.record_scores(id, scores, super_tiebreak, date)?;
    print_match(&service, id);
    Ok(())
}

pub fn handle_walkover(id: MatchId, winner: SideArg) -> Result<()> {
    let mut service = open_service()?;
    let side: Side = winner.into();
    service.record_walkover(id, side, None)?;
    print_match(&service, id);

    if let Some(game) = service.state().find_match(id) {
        println!("{} wins by walkover", game.player(side));
    }
    Ok(())
}

pub fn handle_double_forfeit(id: MatchId) -> Result<()> {
    let mut service = open_service()?;
    service.record_double_forfeit(id, None)?;
    print_match(&service, id);
    Ok(())
}

pub fn handle_undo(id: MatchId) -> Result<()> {
    let mut service = open_service()?;
    service.undo_result(id)?;
    print_match(&service, id);
    Ok(())
}

pub fn handle_standings(json: bool) -> Result<()> {
    let mut service = open_service()?;
    let rows = service.standings();
    let order = &service.controller().settings().class_order;

    if json {
        println!("{}", report::standings_json(&rows, order)?);
    } else {
        if service.phase() != CyclePhase::Inactive {
            let dashboard = report::render_dashboard(
                service.state().cycle(),
                &service.progress(),
                service.phase(),
            );
            print!("{}", dashboard);
            println!();
        }
        print!("{}", report::render_standings(&rows, order));
    }
    Ok(())
}

/// Close in one go when nothing is pending; otherwise list what must be resolved
pub fn handle_close() -> Result<()> {
    let mut service = open_service()?;

    if let CloseReadiness::Pending(ids) = service.request_close()? {
        let pending: Vec<_> = service
            .state()
            .matches()
            .iter()
            .filter(|m| ids.contains(&m.id))
            .cloned()
            .collect();
        let order = &service.controller().settings().class_order;
        print!("{}", report::render_matches(&pending, order));
        println!("Resolve each with `walkover <id> a|b` or `double-forfeit <id>`.");
        println!("Then run `close` again.");
        bail!("{} match(es) still pending", ids.len());
    }

    let closure = service.confirm_close()?;
    print!("{}", report::render_closure(&closure));
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn print_match(service: &LeagueService<SqliteStorage>, id: MatchId) {
    if let Some(game) = service.state().find_match(id) {
        println!(
            "#{} {} {} {} {}",
            game.id,
            game.label(),
            game.result(),
            game.status().as_str(),
            game.details()
        );
    }
}
