use crate::error::{CombatError, CombatResult};
use crate::model::{Damage, Stats};

/// Returns `(health_delta, mitigated)` for `damage` landing on a defender.
///
/// Armor mitigates the physical part and magic resistance the magic part,
/// both as percentages. `health_delta` is the signed change to apply to the
/// defender's current health, so it is never positive for sane input.
pub fn mitigation_and_loss(damage: &Damage, defender: Option<&Stats>) -> CombatResult<(f64, f64)> {
    let stats = defender.ok_or(CombatError::MissingStats)?;

    let mitigated_physical = damage.physical * stats.armor / 100.0;
    let mitigated_magic = damage.magic * stats.magic_resistance / 100.0;

    let hp_lost = (damage.physical - mitigated_physical) + (damage.magic - mitigated_magic);
    Ok((-hp_lost, mitigated_physical + mitigated_magic))
}

/// Percent chance that `damage` misses the defender.
///
/// Magic-heavy hits are dodged through magic resistance, everything else
/// (ties included) through armor.
pub fn miss_chance(damage: &Damage, defender: &Stats) -> f64 {
    if damage.magic > damage.physical {
        defender.magic_resistance / 10.0
    } else {
        defender.armor / 10.0
    }
}
