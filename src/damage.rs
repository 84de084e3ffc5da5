use crate::catalog::Catalog;
use crate::model::{DamageClass, MoveProfile, Stats};
use crate::types::type_effectiveness;
use rand::Rng;
use serde::Serialize;

/// Both combatants fight at this level.
pub const LEVEL: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hit {
    pub damage: u32,
    pub effectiveness: f64,
    /// Set only when the accuracy roll failed; immune targets are not misses.
    pub missed: bool,
}

pub fn roll_accuracy<R: Rng + ?Sized>(move_def: &MoveProfile, rng: &mut R) -> bool {
    let chance = f64::from(move_def.effective_accuracy()) / 100.0;
    rng.gen::<f64>() < chance
}

/// Damage of a landed hit before truncation to an integer.
pub fn base_damage(power: u32, atk: u32, def: u32, effectiveness: f64) -> f64 {
    let def = def.max(1);
    ((2.0 * LEVEL / 5.0 + 2.0) * f64::from(power) * (f64::from(atk) / f64::from(def)) / 50.0
        + 2.0)
        * effectiveness
}

/// Resolves one attack: stat pair by damage class, type multiplier, accuracy roll.
pub fn calculate_damage<C, R>(
    catalog: &C,
    attacker: &Stats,
    defender: &Stats,
    defender_types: &[String],
    move_def: &MoveProfile,
    rng: &mut R,
) -> Hit
where
    C: Catalog + ?Sized,
    R: Rng + ?Sized,
{
    let (atk, def) = match move_def.damage_class {
        DamageClass::Physical => (attacker.attack, defender.defense),
        DamageClass::Special => (attacker.special_attack, defender.special_defense),
    };
    let effectiveness = type_effectiveness(catalog, &move_def.move_type, defender_types);
    let power = move_def.power.unwrap_or(0);
    let damage = if roll_accuracy(move_def, rng) {
        base_damage(power, atk, def, effectiveness).floor() as u32
    } else {
        0
    };
    Hit {
        damage,
        effectiveness,
        missed: damage == 0 && effectiveness != 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use rand::rngs::mock::StepRng;

    fn tackle(power: u32, accuracy: Option<u32>, class: DamageClass) -> MoveProfile {
        MoveProfile {
            name: "tackle".to_string(),
            power: Some(power),
            accuracy,
            move_type: "normal".to_string(),
            damage_class: class,
        }
    }

    fn always_hit() -> StepRng {
        StepRng::new(0, 0)
    }

    fn always_miss() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn reference_physical_hit_deals_37() {
        let catalog = StaticCatalog::new();
        let attacker = Stats {
            attack: 100,
            ..Stats::default()
        };
        let defender = Stats {
            defense: 50,
            ..Stats::default()
        };
        let hit = calculate_damage(
            &catalog,
            &attacker,
            &defender,
            &["fire".to_string()],
            &tackle(40, Some(100), DamageClass::Physical),
            &mut always_hit(),
        );
        assert_eq!(hit.damage, 37);
        assert_eq!(hit.effectiveness, 1.0);
        assert!(!hit.missed);
    }

    #[test]
    fn special_moves_use_special_stats() {
        let catalog = StaticCatalog::new();
        let attacker = Stats {
            attack: 10,
            special_attack: 100,
            ..Stats::default()
        };
        let defender = Stats {
            defense: 10,
            special_defense: 50,
            ..Stats::default()
        };
        let hit = calculate_damage(
            &catalog,
            &attacker,
            &defender,
            &["fire".to_string()],
            &tackle(40, Some(100), DamageClass::Special),
            &mut always_hit(),
        );
        assert_eq!(hit.damage, 37);
    }

    #[test]
    fn immune_target_takes_nothing_and_is_not_a_miss() {
        let catalog = StaticCatalog::new();
        let stats = Stats {
            attack: 100,
            defense: 50,
            ..Stats::default()
        };
        let ghost = ["ghost".to_string()];
        let mv = tackle(40, Some(100), DamageClass::Physical);
        for mut rng in [always_hit(), always_miss()] {
            let hit = calculate_damage(&catalog, &stats, &stats, &ghost, &mv, &mut rng);
            assert_eq!(hit.damage, 0);
            assert_eq!(hit.effectiveness, 0.0);
            assert!(!hit.missed);
        }
    }

    #[test]
    fn failed_accuracy_roll_is_a_miss() {
        let catalog = StaticCatalog::new();
        let stats = Stats {
            attack: 100,
            defense: 50,
            ..Stats::default()
        };
        let hit = calculate_damage(
            &catalog,
            &stats,
            &stats,
            &["normal".to_string()],
            &tackle(40, Some(95), DamageClass::Physical),
            &mut always_miss(),
        );
        assert_eq!(hit.damage, 0);
        assert!(hit.missed);
    }

    #[test]
    fn missing_accuracy_never_misses() {
        let mv = tackle(40, None, DamageClass::Physical);
        assert!(roll_accuracy(&mv, &mut always_miss()));
    }

    #[test]
    fn zero_defense_stays_finite() {
        assert!(base_damage(40, 100, 0, 1.0).is_finite());
    }
}
