use crate::catalog::Catalog;
use crate::model::TypeRelations;
use tracing::warn;

pub const ALL_TYPES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// Multiplier of `move_type` against a 1-2 type defender. A failed type lookup
/// resolves to neutral (1.0) so damage stays computable with partial data.
pub fn type_effectiveness<C: Catalog + ?Sized>(
    catalog: &C,
    move_type: &str,
    defender_types: &[String],
) -> f64 {
    let relations = match catalog.lookup_type(move_type) {
        Ok(relations) => relations,
        Err(err) => {
            warn!(move_type, %err, "type lookup failed, treating as neutral");
            return 1.0;
        }
    };
    defender_types
        .iter()
        .fold(1.0, |acc, t| acc * relations.factor_against(t))
}

/// Battle-log message for a multiplier; empty for neutral hits.
pub fn effectiveness_label(eff: f64) -> &'static str {
    if eff == 0.0 {
        "No effect!"
    } else if eff >= 4.0 {
        "It's ultra effective!"
    } else if eff >= 2.0 {
        "It's super effective!"
    } else if eff <= 0.25 {
        "It's barely effective…"
    } else if eff < 1.0 {
        "It's not very effective…"
    } else {
        ""
    }
}

/// Relations of `attacking` from the built-in chart, for offline catalogs.
pub fn builtin_type_relations(attacking: &str) -> Option<TypeRelations> {
    let atk = attacking.to_ascii_lowercase();
    if !ALL_TYPES.contains(&atk.as_str()) {
        return None;
    }
    let mut relations = TypeRelations::default();
    for def in ALL_TYPES {
        let bucket = match single_type_effectiveness(&atk, def) {
            f if f == 2.0 => &mut relations.double_damage_to,
            f if f == 0.5 => &mut relations.half_damage_to,
            f if f == 0.0 => &mut relations.no_damage_to,
            _ => continue,
        };
        bucket.push(def.to_string());
    }
    Some(relations)
}

// Ref: pokemon-showdown/sim/dex-data.ts: type chart multipliers (trimmed to multipliers only).
fn single_type_effectiveness(atk: &str, def: &str) -> f64 {
    match atk {
        "normal" => match def {
            "rock" | "steel" => 0.5,
            "ghost" => 0.0,
            _ => 1.0,
        },
        "fire" => match def {
            "fire" | "water" | "rock" | "dragon" => 0.5,
            "grass" | "ice" | "bug" | "steel" => 2.0,
            _ => 1.0,
        },
        "water" => match def {
            "water" | "grass" | "dragon" => 0.5,
            "fire" | "ground" | "rock" => 2.0,
            _ => 1.0,
        },
        "electric" => match def {
            "electric" | "grass" | "dragon" => 0.5,
            "water" | "flying" => 2.0,
            "ground" => 0.0,
            _ => 1.0,
        },
        "grass" => match def {
            "fire" | "grass" | "poison" | "flying" | "bug" | "dragon" | "steel" => 0.5,
            "water" | "ground" | "rock" => 2.0,
            _ => 1.0,
        },
        "ice" => match def {
            "fire" | "water" | "ice" | "steel" => 0.5,
            "grass" | "ground" | "flying" | "dragon" => 2.0,
            _ => 1.0,
        },
        "fighting" => match def {
            "normal" | "ice" | "rock" | "dark" | "steel" => 2.0,
            "poison" | "flying" | "psychic" | "bug" | "fairy" => 0.5,
            "ghost" => 0.0,
            _ => 1.0,
        },
        "poison" => match def {
            "grass" | "fairy" => 2.0,
            "poison" | "ground" | "rock" | "ghost" => 0.5,
            "steel" => 0.0,
            _ => 1.0,
        },
        "ground" => match def {
            "fire" | "electric" | "poison" | "rock" | "steel" => 2.0,
            "grass" | "bug" => 0.5,
            "flying" => 0.0,
            _ => 1.0,
        },
        "flying" => match def {
            "grass" | "fighting" | "bug" => 2.0,
            "electric" | "rock" | "steel" => 0.5,
            _ => 1.0,
        },
        "psychic" => match def {
            "fighting" | "poison" => 2.0,
            "psychic" | "steel" => 0.5,
            "dark" => 0.0,
            _ => 1.0,
        },
        "bug" => match def {
            "grass" | "psychic" | "dark" => 2.0,
            "fire" | "fighting" | "poison" | "flying" | "ghost" | "steel" | "fairy" => 0.5,
            _ => 1.0,
        },
        "rock" => match def {
            "fire" | "ice" | "flying" | "bug" => 2.0,
            "fighting" | "ground" | "steel" => 0.5,
            _ => 1.0,
        },
        "ghost" => match def {
            "ghost" | "psychic" => 2.0,
            "dark" => 0.5,
            "normal" => 0.0,
            _ => 1.0,
        },
        "dragon" => match def {
            "dragon" => 2.0,
            "steel" => 0.5,
            "fairy" => 0.0,
            _ => 1.0,
        },
        "dark" => match def {
            "psychic" | "ghost" => 2.0,
            "fighting" | "dark" | "fairy" => 0.5,
            _ => 1.0,
        },
        "steel" => match def {
            "rock" | "ice" | "fairy" => 2.0,
            "fire" | "water" | "electric" | "steel" => 0.5,
            _ => 1.0,
        },
        "fairy" => match def {
            "fighting" | "dragon" | "dark" => 2.0,
            "fire" | "poison" | "steel" => 0.5,
            _ => 1.0,
        },
        _ => 1.0,
    }
}
