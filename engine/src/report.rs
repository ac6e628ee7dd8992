//! Play-by-play text for a match log.

use crate::model::Character;

const DASHES: &str = "--------------------";

pub fn round_header(round: u32) -> String {
    format!("\n{DASHES} Round {round}. {DASHES}")
}

pub fn turn_line(description: &str) -> String {
    format!("\t{description}")
}

fn outcome_word(your_win: bool) -> &'static str {
    if your_win { "WIN" } else { "LOSS" }
}

pub fn round_outcome_line(your_win: bool, your_wins: u32, opponent_wins: u32) -> String {
    format!(
        "\nOutcome: {}. Series Score: {}-{}.",
        outcome_word(your_win),
        your_wins,
        opponent_wins
    )
}

/// Closing line once a side has taken the series; `your_win` is the deciding round.
pub fn match_banner(your_win: bool, your_wins: u32, opponent_wins: u32) -> String {
    format!(
        "\n{DASHES} {} {}-{}. {DASHES}",
        outcome_word(your_win),
        your_wins,
        opponent_wins
    )
}

/// Standing characters facing each other; yours are listed back to front.
pub fn format_teams(your_team: &[Character], opponent_team: &[Character]) -> String {
    let yours: Vec<&str> = your_team
        .iter()
        .rev()
        .filter(|c| !c.is_defeated())
        .map(|c| c.name.as_str())
        .collect();
    let theirs: Vec<&str> = opponent_team
        .iter()
        .filter(|c| !c.is_defeated())
        .map(|c| c.name.as_str())
        .collect();
    format!("\n\t{yours:?} -----VS----- {theirs:?}")
}
