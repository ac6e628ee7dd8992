use std::collections::HashMap;

use anyhow::{anyhow, Result};

use crate::loader::{parse_team, TeamSource};
use crate::model::Team;

pub fn builtin_teams() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("vanguard", include_str!("../content/teams/vanguard.json")),
        ("arcanists", include_str!("../content/teams/arcanists.json")),
    ])
}

/// A built-in team fielded unchanged every round.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTeam {
    json: &'static str,
}

impl BuiltinTeam {
    pub fn named(name: &str) -> Result<Self> {
        builtin_teams()
            .get(name)
            .map(|&json| Self { json })
            .ok_or_else(|| anyhow!("unknown built-in team '{}'", name))
    }
}

impl TeamSource for BuiltinTeam {
    fn load_round(&self, _round: u32) -> Result<Team> {
        parse_team(self.json)
    }
}
