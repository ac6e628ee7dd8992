use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CombatError, CombatResult};
use crate::loader::TeamSource;
use crate::model::{all_defeated, Character};
use crate::report::{format_teams, match_banner, round_header, round_outcome_line, turn_line};
use crate::round::play_round;
use crate::RngEngine;

pub const N_ROUNDS: u32 = 5;
pub const N_WINS: u32 = 3;
const MAX_TURNS_PER_ROUND: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct MatchConfig {
    pub rounds: u32,
    pub wins_needed: u32,
    pub max_turns_per_round: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds: N_ROUNDS,
            wins_needed: N_WINS,
            max_turns_per_round: MAX_TURNS_PER_ROUND,
        }
    }
}

impl MatchConfig {
    /// A series must be winnable: `1 <= wins_needed <= rounds`.
    pub fn validate(&self) -> CombatResult<()> {
        if self.wins_needed == 0 || self.wins_needed > self.rounds {
            return Err(CombatError::InvalidConfig {
                reason: format!(
                    "wins needed ({}) must be between 1 and the number of rounds ({})",
                    self.wins_needed, self.rounds
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchOutcome {
    pub your_win: bool,
    pub your_wins: u32,
    pub opponent_wins: u32,
    pub rounds_played: u32,
    pub log: Vec<String>,
}

/// What a strategy gets to look at once a round is over.
#[derive(Debug, Clone, Copy)]
pub struct RoundReport<'a> {
    pub round: u32,
    pub your_win: bool,
    pub your_team: &'a [Character],
    pub opponent_team: &'a [Character],
}

/// Hook for the bot side: called after every round with the final team state.
pub trait RoundObserver {
    fn round_finished(&mut self, report: &RoundReport<'_>);
}

impl RoundReport<'_> {
    /// Both teams ended the round with nobody standing.
    pub fn is_double_knockout(&self) -> bool {
        all_defeated(self.your_team) && all_defeated(self.opponent_team)
    }
}

impl RoundObserver for () {
    fn round_finished(&mut self, _report: &RoundReport<'_>) {}
}

/// Total damage dealt per character id, summed over every finished round.
#[derive(Debug, Clone, Default)]
pub struct DamageLeaderboard {
    pub yours: BTreeMap<u32, f64>,
    pub opponent: BTreeMap<u32, f64>,
}

impl DamageLeaderboard {
    /// Your character ids, biggest damage dealer first.
    pub fn your_ranking(&self) -> Vec<(u32, f64)> {
        rank(&self.yours)
    }

    pub fn opponent_ranking(&self) -> Vec<(u32, f64)> {
        rank(&self.opponent)
    }
}

fn rank(totals: &BTreeMap<u32, f64>) -> Vec<(u32, f64)> {
    let mut ranked: Vec<_> = totals.iter().map(|(&id, &dmg)| (id, dmg)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

impl RoundObserver for DamageLeaderboard {
    fn round_finished(&mut self, report: &RoundReport<'_>) {
        for c in report.your_team {
            *self.yours.entry(c.id).or_default() += c.damage_stats.damage_dealt;
        }
        for c in report.opponent_team {
            *self.opponent.entry(c.id).or_default() += c.damage_stats.damage_dealt;
        }
    }
}

/// Play a best-of series, loading both teams fresh for every round.
///
/// Who moves first in round one is a coin flip; after that it alternates
/// regardless of who won. The series stops as soon as either side reaches
/// `wins_needed`.
pub fn play_match(
    config: &MatchConfig,
    yours: &impl TeamSource,
    opponent: &impl TeamSource,
    rng: &mut impl RngEngine,
    observer: &mut impl RoundObserver,
) -> Result<MatchOutcome> {
    config.validate()?;
    let mut is_your_turn_first = rng.roll(50.0);
    let mut your_wins = 0;
    let mut opponent_wins = 0;
    let mut rounds_played = 0;
    let mut log = Vec::new();

    for round in 1..=config.rounds {
        log.push(round_header(round));

        let your_team = yours
            .load_round(round)
            .with_context(|| format!("failed to load round {} for your team", round))?;
        let opponent_team = opponent
            .load_round(round)
            .with_context(|| format!("failed to load round {} for the opponent", round))?;
        debug!(round, lineup = %format_teams(&your_team, &opponent_team), "teams loaded");

        let outcome = play_round(
            your_team,
            opponent_team,
            is_your_turn_first,
            rng,
            config.max_turns_per_round,
        )
        .with_context(|| format!("round {} could not be resolved", round))?;
        rounds_played = round;

        log.extend(outcome.log.iter().map(|line| turn_line(line)));

        if outcome.your_win {
            your_wins += 1;
        } else {
            opponent_wins += 1;
        }
        log.push(round_outcome_line(outcome.your_win, your_wins, opponent_wins));
        info!(round, your_win = outcome.your_win, your_wins, opponent_wins, "round scored");

        observer.round_finished(&RoundReport {
            round,
            your_win: outcome.your_win,
            your_team: &outcome.your_team,
            opponent_team: &outcome.opponent_team,
        });

        is_your_turn_first = !is_your_turn_first;

        if your_wins == config.wins_needed || opponent_wins == config.wins_needed {
            log.push(match_banner(outcome.your_win, your_wins, opponent_wins));
            break;
        }
    }

    let your_win = your_wins > opponent_wins;
    info!(your_win, your_wins, opponent_wins, rounds_played, "match finished");

    Ok(MatchOutcome { your_win, your_wins, opponent_wins, rounds_played, log })
}
