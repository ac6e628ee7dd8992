use tracing::debug;

use crate::damage::{miss_chance, mitigation_and_loss};
use crate::error::{CombatError, CombatResult};
use crate::model::{AttackKind, Character, Stats};
use crate::RngEngine;

/// Resolve one attack between the two front characters and narrate it.
///
/// `is_your_turn` picks who attacks. Both characters are updated in place:
/// the attacker may receive its own stat changes and gets credit for damage
/// and kills, the defender loses health and records what it took.
pub fn play_turn(
    yours: &mut Character,
    theirs: &mut Character,
    is_your_turn: bool,
    rng: &mut impl RngEngine,
) -> CombatResult<String> {
    for c in [&*yours, &*theirs] {
        if c.is_defeated() {
            return Err(CombatError::DefeatedCombatant { name: c.name.clone() });
        }
    }

    let (attacker, defender) = if is_your_turn { (yours, theirs) } else { (theirs, yours) };

    let kind = if rng.roll(attacker.effective_stats.special_trigger_chance) {
        AttackKind::Special
    } else {
        AttackKind::Basic
    };
    let damage = attacker.attack(kind).damage.clone();

    if let Some(delta) = &damage.stat_updates_to_self {
        attacker.effective_stats = attacker.effective_stats.combine(delta);
    }

    let missed = rng.roll(miss_chance(&damage, &defender.effective_stats));
    if missed {
        debug!(attacker = %attacker.name, defender = %defender.name, ?kind, "attack missed");
        return Ok(format!(
            "{} missed the attack on {}.",
            attacker.name, defender.name
        ));
    }

    let (hp_delta, mitigated) = mitigation_and_loss(&damage, Some(&defender.effective_stats))?;
    defender.effective_stats = defender.effective_stats.combine(&Stats::hp_delta(hp_delta));
    defender.damage_stats.damage_mitigated += mitigated;

    let total = damage.total();
    attacker.damage_stats.damage_dealt += total;
    defender.damage_stats.damage_taken += total;

    let mut description = format!(
        "{} hit {} for {:.2} damage.",
        attacker.name, defender.name, total
    );
    if defender.is_defeated() {
        description.push_str(&format!(" {} has fainted.", defender.name));
        attacker.damage_stats.kills += 1;
    }

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        ?kind,
        total,
        mitigated,
        defender_hp = defender.effective_stats.current_hp,
        "attack landed"
    );
    Ok(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Damage;
    use crate::ScriptedDice;

    fn fighter(name: &str, hp: f64, basic: Damage, special: Damage) -> Character {
        Character::new(
            0,
            name,
            basic,
            special,
            Stats { current_hp: hp, max_hp: hp, ..Stats::default() },
        )
    }

    #[test]
    fn refuses_defeated_combatants() {
        let mut a = fighter("A", 10.0, Damage::new(1.0, 0.0), Damage::new(1.0, 0.0));
        let mut b = fighter("B", 0.0, Damage::new(1.0, 0.0), Damage::new(1.0, 0.0));
        let mut rng = ScriptedDice::always(false);
        let err = play_turn(&mut a, &mut b, true, &mut rng).unwrap_err();
        assert_eq!(err, CombatError::DefeatedCombatant { name: "B".into() });
        assert!(rng.requested().is_empty());
    }

    #[test]
    fn opponent_attacks_when_not_your_turn() {
        let mut a = fighter("A", 30.0, Damage::new(1.0, 0.0), Damage::new(1.0, 0.0));
        let mut b = fighter("B", 30.0, Damage::new(7.0, 0.0), Damage::new(1.0, 0.0));
        let mut rng = ScriptedDice::always(false);
        let line = play_turn(&mut a, &mut b, false, &mut rng).unwrap();
        assert_eq!(line, "B hit A for 7.00 damage.");
        assert_eq!(a.effective_stats.current_hp, 23.0);
        assert_eq!(b.damage_stats.damage_dealt, 7.0);
        assert_eq!(a.damage_stats.damage_taken, 7.0);
    }

    #[test]
    fn special_applies_self_update_before_the_hit() {
        let special = Damage::new(0.0, 10.0).with_self_update(Stats {
            armor: 5.0,
            current_hp: 3.0,
            ..Stats::default()
        });
        let mut a = fighter("Mage", 20.0, Damage::new(1.0, 0.0), special);
        a.effective_stats.special_trigger_chance = 40.0;
        let mut b = fighter("Brute", 50.0, Damage::new(1.0, 0.0), Damage::new(1.0, 0.0));
        b.effective_stats.magic_resistance = 30.0;

        // special triggers, then the hit lands
        let mut rng = ScriptedDice::new(vec![true, false]);
        let line = play_turn(&mut a, &mut b, true, &mut rng).unwrap();

        assert_eq!(line, "Mage hit Brute for 10.00 damage.");
        assert_eq!(a.effective_stats.armor, 5.0);
        assert_eq!(a.effective_stats.current_hp, 23.0);
        assert_eq!(b.effective_stats.current_hp, 43.0);
        assert_eq!(b.damage_stats.damage_mitigated, 3.0);
        // magic-heavy: miss chance comes from magic resistance
        assert_eq!(rng.requested(), &[40.0, 3.0]);
    }

    #[test]
    fn miss_leaves_defender_untouched() {
        let mut a = fighter("A", 30.0, Damage::new(9.0, 0.0), Damage::new(1.0, 0.0));
        let mut b = fighter("B", 30.0, Damage::new(1.0, 0.0), Damage::new(1.0, 0.0));
        let before = b.clone();
        let mut rng = ScriptedDice::new(vec![false, true]);
        let line = play_turn(&mut a, &mut b, true, &mut rng).unwrap();
        assert_eq!(line, "A missed the attack on B.");
        assert_eq!(b, before);
        assert_eq!(a.damage_stats.damage_dealt, 0.0);
    }
}
