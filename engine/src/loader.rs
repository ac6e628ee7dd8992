use anyhow::{Context, Result};

use crate::model::{Character, DamageStats, Team};

/// Anything that can hand over a freshly built team for a given round (1-based).
pub trait TeamSource {
    fn load_round(&self, round: u32) -> Result<Team>;
}

/// Parse a JSON array of characters. Counters always start from zero.
pub fn parse_team(text: &str) -> Result<Team> {
    let mut team: Vec<Character> =
        serde_json::from_str(text).context("failed to parse team JSON")?;
    for c in &mut team {
        c.damage_stats = DamageStats::default();
    }
    Ok(team)
}

/// Teams kept in memory, one per round. Every load is a fresh clone.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rounds: Vec<Team>,
}

impl InMemorySource {
    pub fn new(rounds: Vec<Team>) -> Self {
        Self { rounds }
    }

    /// The same team for every round.
    pub fn repeating(team: Team, rounds: u32) -> Self {
        Self::new(vec![team; rounds as usize])
    }
}

impl TeamSource for InMemorySource {
    fn load_round(&self, round: u32) -> Result<Team> {
        let index = (round as usize)
            .checked_sub(1)
            .ok_or_else(|| anyhow::anyhow!("rounds are numbered from 1"))?;
        self.rounds
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no team for round {}", round))
    }
}
