use serde::{Deserialize, Serialize};

use crate::error::{CombatError, CombatResult};

/// Numeric attributes of a character. Also used as a delta bundle, where a
/// zero field means "no change".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub current_hp: f64,
    pub max_hp: f64,
    /// Physical mitigation, in percent.
    pub armor: f64,
    /// Magic mitigation, in percent.
    pub magic_resistance: f64,
    /// Chance (0–100) that the special attack is used instead of the basic one.
    pub special_trigger_chance: f64,
    pub speed: f64,
}

impl Stats {
    /// Field-wise sum of `self` and `delta`.
    #[must_use]
    pub fn combine(&self, delta: &Stats) -> Stats {
        Stats {
            current_hp: self.current_hp + delta.current_hp,
            max_hp: self.max_hp + delta.max_hp,
            armor: self.armor + delta.armor,
            magic_resistance: self.magic_resistance + delta.magic_resistance,
            special_trigger_chance: self.special_trigger_chance + delta.special_trigger_chance,
            speed: self.speed + delta.speed,
        }
    }

    /// A delta that only moves current health.
    pub fn hp_delta(amount: f64) -> Stats {
        Stats { current_hp: amount, ..Stats::default() }
    }

    /// First field holding NaN or an infinity, by name.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("current_hp", self.current_hp),
            ("max_hp", self.max_hp),
            ("armor", self.armor),
            ("magic_resistance", self.magic_resistance),
            ("special_trigger_chance", self.special_trigger_chance),
            ("speed", self.speed),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(label, _)| label)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Damage {
    #[serde(default)]
    pub physical: f64,
    #[serde(default)]
    pub magic: f64,
    /// Applied to the attacker before the hit is resolved.
    #[serde(default)]
    pub stat_updates_to_self: Option<Stats>,
}

impl Damage {
    pub fn new(physical: f64, magic: f64) -> Self {
        Self { physical, magic, stat_updates_to_self: None }
    }

    pub fn with_self_update(mut self, delta: Stats) -> Self {
        self.stat_updates_to_self = Some(delta);
        self
    }

    /// Raw damage before mitigation.
    pub fn total(&self) -> f64 {
        self.physical + self.magic
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Basic,
    Special,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    pub kind: AttackKind,
    pub damage: Damage,
}

impl Attack {
    pub fn basic(damage: Damage) -> Self {
        Self { kind: AttackKind::Basic, damage }
    }

    pub fn special(damage: Damage) -> Self {
        Self { kind: AttackKind::Special, damage }
    }
}

/// Running counters for one character over one round.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageStats {
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub damage_mitigated: f64,
    pub kills: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub basic_attack: Attack,
    pub special_attack: Attack,
    pub effective_stats: Stats,
    #[serde(default)]
    pub damage_stats: DamageStats,
}

/// Ordered front to back; the front character fights until it faints.
pub type Team = Vec<Character>;

/// True when nobody in `team` is left standing.
pub fn all_defeated(team: &[Character]) -> bool {
    team.iter().all(Character::is_defeated)
}

impl Character {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        basic: Damage,
        special: Damage,
        stats: Stats,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            basic_attack: Attack::basic(basic),
            special_attack: Attack::special(special),
            effective_stats: stats,
            damage_stats: DamageStats::default(),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.effective_stats.current_hp <= 0.0
    }

    pub fn attack(&self, kind: AttackKind) -> &Attack {
        match kind {
            AttackKind::Basic => &self.basic_attack,
            AttackKind::Special => &self.special_attack,
        }
    }

    /// Rejects characters the combat math cannot handle sensibly.
    pub fn validate(&self) -> CombatResult<()> {
        let stats = &self.effective_stats;
        if !stats.current_hp.is_finite() || stats.current_hp <= 0.0 {
            return Err(self.invalid(format!(
                "must start alive, current_hp={}",
                stats.current_hp
            )));
        }
        for (label, value) in [
            ("armor", stats.armor),
            ("magic_resistance", stats.magic_resistance),
            ("special_trigger_chance", stats.special_trigger_chance),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(self.invalid(format!("{label} must be within 0-100, got {value}")));
            }
        }
        for attack in [&self.basic_attack, &self.special_attack] {
            let dmg = &attack.damage;
            for (label, value) in [("physical", dmg.physical), ("magic", dmg.magic)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(self.invalid(format!(
                        "{:?} attack has {label} damage {value}",
                        attack.kind
                    )));
                }
            }
            if let Some(label) = dmg.stat_updates_to_self.as_ref().and_then(Stats::non_finite_field) {
                return Err(self.invalid(format!(
                    "{:?} attack changes its own {label} by a non-finite amount",
                    attack.kind
                )));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> CombatError {
        CombatError::InvalidInput { character: self.name.clone(), reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knight() -> Character {
        Character::new(
            1,
            "Knight",
            Damage::new(12.0, 0.0),
            Damage::new(20.0, 5.0),
            Stats { current_hp: 100.0, max_hp: 100.0, armor: 30.0, ..Stats::default() },
        )
    }

    #[test]
    fn zero_delta_leaves_stats_alone() {
        let base = knight().effective_stats;
        assert_eq!(base.combine(&Stats::default()), base);
    }

    #[test]
    fn hp_delta_only_touches_health() {
        let base = knight().effective_stats;
        let hurt = base.combine(&Stats::hp_delta(-40.0));
        assert_eq!(hurt.current_hp, 60.0);
        assert_eq!(hurt.armor, 30.0);
        assert_eq!(hurt.max_hp, 100.0);
    }

    #[test]
    fn validate_accepts_sane_character() {
        assert!(knight().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_ranges() {
        let mut c = knight();
        c.effective_stats.armor = 120.0;
        assert!(matches!(c.validate(), Err(CombatError::InvalidInput { .. })));

        let mut c = knight();
        c.special_attack.damage.magic = -1.0;
        assert!(matches!(c.validate(), Err(CombatError::InvalidInput { .. })));

        let mut c = knight();
        c.effective_stats.current_hp = 0.0;
        assert!(matches!(c.validate(), Err(CombatError::InvalidInput { .. })));
    }

    #[test]
    fn validate_rejects_non_finite_self_update() {
        let mut c = knight();
        c.special_attack.damage.stat_updates_to_self = Some(Stats::hp_delta(f64::NAN));
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("current_hp"), "{err}");

        let mut c = knight();
        c.basic_attack.damage.stat_updates_to_self =
            Some(Stats { armor: f64::INFINITY, ..Stats::default() });
        assert!(matches!(c.validate(), Err(CombatError::InvalidInput { .. })));

        let mut c = knight();
        c.basic_attack.damage.stat_updates_to_self = Some(Stats::hp_delta(-4.0));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn all_defeated_needs_every_member_down() {
        let mut team = vec![knight(), knight()];
        assert!(!all_defeated(&team));
        team[0].effective_stats.current_hp = -1.0;
        assert!(!all_defeated(&team));
        team[1].effective_stats.current_hp = 0.0;
        assert!(all_defeated(&team));
    }

    #[test]
    fn character_json_defaults_missing_fields() {
        let json = r#"{
            "id": 3,
            "name": "Rogue",
            "basic_attack": { "kind": "basic", "damage": { "physical": 8 } },
            "special_attack": {
                "kind": "special",
                "damage": { "physical": 14, "stat_updates_to_self": { "speed": 2 } }
            },
            "effective_stats": { "current_hp": 60, "armor": 10 }
        }"#;
        let c: Character = serde_json::from_str(json).expect("parses");
        assert_eq!(c.damage_stats, DamageStats::default());
        assert_eq!(c.effective_stats.magic_resistance, 0.0);
        assert_eq!(c.basic_attack.damage.magic, 0.0);
        let delta = c.special_attack.damage.stat_updates_to_self.expect("delta");
        assert_eq!(delta.speed, 2.0);
    }
}
