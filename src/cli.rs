use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::domain::{MatchId, Side};

#[derive(Parser, Debug)]
#[command(author, version, about = "tennis league cycle manager")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Show the cycle state and its progress
    Status,
    /// Manage the player roster
    Players {
        #[clap(subcommand)]
        action: PlayersAction,
    },
    /// Open a new cycle and generate every class's matches
    Open {
        /// First day of the cycle (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Planned last day of the cycle (YYYY-MM-DD), informational only
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// List the matches of the current cycle
    Matches {
        /// Only show matches without a result
        #[arg(long)]
        pending: bool,
    },
    /// Record (or overwrite) a played result
    Record {
        /// Match id as shown by `matches`
        id: MatchId,
        /// Games per set, side A then side B: 4 values, or 6 with --stb
        #[arg(num_args = 4..=6, required = true)]
        scores: Vec<String>,
        /// The third pair is a super tie-break
        #[arg(long)]
        stb: bool,
        /// Day the match was played (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Award a match by walkover
    Walkover {
        id: MatchId,
        /// Side that wins the walkover
        #[arg(value_enum)]
        winner: SideArg,
    },
    /// Settle a match as lost by both players
    DoubleForfeit { id: MatchId },
    /// Reset a match to pending
    Undo { id: MatchId },
    /// Show the standings per class
    Standings {
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Close the cycle: promote, relegate and clear the matches
    Close,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum PlayersAction {
    /// List players per class
    List,
    /// Register a player
    Add { name: String, class: String },
    /// Remove a player
    Remove { name: String },
    /// Move a player to another class
    SetClass { name: String, class: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideArg {
    A,
    B,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::A => Side::A,
            SideArg::B => Side::B,
        }
    }
}
