use tracing::info;

use crate::error::{CombatError, CombatResult};
use crate::model::{all_defeated, Team};
use crate::turn::play_turn;
use crate::RngEngine;

/// Result of one elimination battle, with both teams as they ended it.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub your_win: bool,
    pub log: Vec<String>,
    pub your_team: Team,
    pub opponent_team: Team,
}

impl RoundOutcome {
    /// Both teams ran out of standing characters on the same turn.
    pub fn is_double_knockout(&self) -> bool {
        all_defeated(&self.your_team) && all_defeated(&self.opponent_team)
    }
}

/// Fight the two teams front to back until one of them has nobody left.
///
/// Each side's front character keeps fighting until it faints; then the next
/// one steps up. Turns alternate starting with `is_your_turn_first`. A round
/// that ends with both teams down is a loss for your side.
pub fn play_round(
    mut your_team: Team,
    mut opponent_team: Team,
    is_your_turn_first: bool,
    rng: &mut impl RngEngine,
    max_turns: u32,
) -> CombatResult<RoundOutcome> {
    validate_team(&your_team, "your")?;
    validate_team(&opponent_team, "opponent")?;

    let mut your_index = 0;
    let mut opponent_index = 0;
    let mut is_your_turn = is_your_turn_first;
    let mut turns = 0u32;
    let mut log = Vec::new();

    while your_index < your_team.len() && opponent_index < opponent_team.len() {
        if turns >= max_turns {
            return Err(CombatError::TurnLimitExceeded { limit: max_turns });
        }
        turns += 1;

        let yours = &mut your_team[your_index];
        let theirs = &mut opponent_team[opponent_index];
        log.push(play_turn(yours, theirs, is_your_turn, rng)?);

        if theirs.is_defeated() {
            opponent_index += 1;
        }
        if yours.is_defeated() {
            your_index += 1;
        }
        is_your_turn = !is_your_turn;
    }

    let your_win = your_index < your_team.len();
    info!(your_win, turns, "round finished");

    Ok(RoundOutcome { your_win, log, your_team, opponent_team })
}

fn validate_team(team: &Team, side: &'static str) -> CombatResult<()> {
    if team.is_empty() {
        return Err(CombatError::EmptyTeam { side });
    }
    team.iter().try_for_each(|c| c.validate())
}
