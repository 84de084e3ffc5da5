use serde::{Deserialize, Serialize};

/// Attack category selecting which stat pair governs damage.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageClass {
    Physical,
    Special,
}

impl DamageClass {
    /// Anything other than "physical" is treated as special.
    pub fn from_catalog(name: &str) -> Self {
        if name.eq_ignore_ascii_case("physical") {
            DamageClass::Physical
        } else {
            DamageClass::Special
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl Stats {
    /// Catalog keys in display order.
    pub const KEYS: [&'static str; 6] = [
        "hp",
        "attack",
        "defense",
        "special-attack",
        "special-defense",
        "speed",
    ];

    pub fn get(&self, key: &str) -> Option<u32> {
        match key {
            "hp" => Some(self.hp),
            "attack" => Some(self.attack),
            "defense" => Some(self.defense),
            "special-attack" => Some(self.special_attack),
            "special-defense" => Some(self.special_defense),
            "speed" => Some(self.speed),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: u32) {
        match key {
            "hp" => self.hp = value,
            "attack" => self.attack = value,
            "defense" => self.defense = value,
            "special-attack" => self.special_attack = value,
            "special-defense" => self.special_defense = value,
            "speed" => self.speed = value,
            _ => {}
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        Self::KEYS
            .into_iter()
            .map(move |key| (key, self.get(key).unwrap_or_default()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatureProfile {
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
    pub stats: Stats,
    pub moves: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveProfile {
    pub name: String,
    pub power: Option<u32>,
    pub accuracy: Option<u32>,
    #[serde(rename = "type")]
    pub move_type: String,
    pub damage_class: DamageClass,
}

impl MoveProfile {
    pub fn is_damaging(&self) -> bool {
        matches!(self.power, Some(p) if p > 0)
    }

    /// Hit chance in percent; a missing accuracy never misses.
    pub fn effective_accuracy(&self) -> u32 {
        self.accuracy.unwrap_or(100)
    }
}

/// Damage relations of one attacking type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeRelations {
    pub double_damage_to: Vec<String>,
    pub half_damage_to: Vec<String>,
    pub no_damage_to: Vec<String>,
}

// Raw catalog shapes (PokeAPI v2). Only the fields the engine reads are modelled.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteSet {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub name: String,
    #[serde(default)]
    pub sprites: SpriteSet,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub moves: Vec<MoveSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub name: String,
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default)]
    pub accuracy: Option<u32>,
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
    pub damage_class: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageRelationsRecord {
    #[serde(default)]
    pub double_damage_to: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_to: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_to: Vec<NamedResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRecord {
    pub name: String,
    pub damage_relations: DamageRelationsRecord,
}

fn names(resources: &[NamedResource]) -> Vec<String> {
    resources.iter().map(|r| r.name.clone()).collect()
}

impl CreatureProfile {
    pub fn from_record(record: &CreatureRecord) -> Self {
        let mut stats = Stats::default();
        for entry in &record.stats {
            stats.set(&entry.stat.name, entry.base_stat);
        }
        CreatureProfile {
            name: record.name.clone(),
            sprite: record.sprites.front_default.clone(),
            types: record.types.iter().map(|t| t.type_ref.name.clone()).collect(),
            stats,
            moves: record.moves.iter().map(|m| m.move_ref.name.clone()).collect(),
        }
    }

    /// Title case that keeps hyphens: "ho-oh" -> "Ho-Oh".
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }
}

impl MoveProfile {
    pub fn from_record(record: &MoveRecord) -> Self {
        MoveProfile {
            name: record.name.clone(),
            power: record.power,
            accuracy: record.accuracy,
            move_type: record.type_ref.name.clone(),
            damage_class: DamageClass::from_catalog(&record.damage_class.name),
        }
    }

    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

impl TypeRelations {
    pub fn from_record(record: &TypeRecord) -> Self {
        let dr = &record.damage_relations;
        TypeRelations {
            double_damage_to: names(&dr.double_damage_to),
            half_damage_to: names(&dr.half_damage_to),
            no_damage_to: names(&dr.no_damage_to),
        }
    }

    /// Per-type factor; categories are checked double, half, none in that order.
    pub fn factor_against(&self, defending: &str) -> f64 {
        if self.double_damage_to.iter().any(|t| t == defending) {
            2.0
        } else if self.half_damage_to.iter().any(|t| t == defending) {
            0.5
        } else if self.no_damage_to.iter().any(|t| t == defending) {
            0.0
        } else {
            1.0
        }
    }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for c in raw.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !c.is_alphabetic();
    }
    out
}

/// "thunder-punch" -> "Thunder Punch".
pub fn display_name(raw: &str) -> String {
    raw.split(['-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
