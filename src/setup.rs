use crate::battle::Combatant;
use crate::catalog::{Catalog, LookupError};
use crate::model::{CreatureProfile, MoveProfile};
use crate::moves::require_damaging_moves;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Suggested creatures offered when no name is given.
pub const POPULAR_CREATURES: [&str; 30] = [
    "pikachu", "charizard", "blastoise", "venusaur", "mewtwo", "gengar", "dragonite", "snorlax",
    "gyarados", "alakazam", "machamp", "arcanine", "lapras", "jolteon", "starmie", "golem",
    "exeggutor", "rhydon", "tauros", "aerodactyl", "articuno", "zapdos", "moltres", "lucario",
    "garchomp", "eevee", "vaporeon", "flareon", "espeon", "umbreon",
];

/// Failures that stop a battle from being set up.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("could not find creature '{name}': {source}")]
    CreatureNotFound {
        name: String,
        #[source]
        source: LookupError,
    },
    #[error("no damaging moves found for '{0}'")]
    NoDamagingMoves(String),
    #[error("'{creature}' has no damaging move named '{requested}'")]
    MoveNotAvailable { creature: String, requested: String },
    #[error("could not load move '{name}': {source}")]
    MoveLookup {
        name: String,
        #[source]
        source: LookupError,
    },
}

/// One fully prepared side of a matchup.
#[derive(Debug, Clone, Serialize)]
pub struct Contender {
    pub profile: CreatureProfile,
    pub damaging_moves: Vec<String>,
    pub chosen_move: MoveProfile,
}

impl Contender {
    pub fn as_combatant(&self) -> Combatant<'_> {
        Combatant::new(&self.profile, &self.chosen_move)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Matchup {
    pub a: Contender,
    pub b: Contender,
}

impl Matchup {
    pub fn is_mirror(&self) -> bool {
        self.a.profile.name == self.b.profile.name
    }
}

/// Fetches and normalizes a creature.
pub fn load_creature<C: Catalog + ?Sized>(
    catalog: &C,
    name: &str,
) -> Result<CreatureProfile, SetupError> {
    let record = catalog
        .lookup_creature(name)
        .map_err(|source| SetupError::CreatureNotFound {
            name: name.to_string(),
            source,
        })?;
    Ok(CreatureProfile::from_record(&record))
}

/// Filters a creature's moves and resolves the requested one, defaulting to
/// the first damaging move.
pub fn prepare_contender<C: Catalog + ?Sized>(
    catalog: &C,
    profile: CreatureProfile,
    requested_move: Option<&str>,
) -> Result<Contender, SetupError> {
    let damaging_moves = require_damaging_moves(catalog, &profile.name, &profile.moves)?;
    let move_name = match requested_move {
        Some(requested) => damaging_moves
            .iter()
            .find(|m| m.as_str() == requested)
            .ok_or_else(|| SetupError::MoveNotAvailable {
                creature: profile.name.clone(),
                requested: requested.to_string(),
            })?,
        None => &damaging_moves[0],
    };
    let record = catalog
        .lookup_move(move_name)
        .map_err(|source| SetupError::MoveLookup {
            name: move_name.clone(),
            source,
        })?;
    let chosen_move = MoveProfile::from_record(&record);
    info!(
        creature = profile.name.as_str(),
        chosen = chosen_move.name.as_str(),
        options = damaging_moves.len(),
        "contender ready"
    );
    Ok(Contender {
        profile,
        damaging_moves,
        chosen_move,
    })
}

/// Loads both sides of a battle. Selection failures stop here, before any battle starts.
pub fn prepare_matchup<C: Catalog + ?Sized>(
    catalog: &C,
    a: (&str, Option<&str>),
    b: (&str, Option<&str>),
) -> Result<Matchup, SetupError> {
    let profile_a = load_creature(catalog, a.0)?;
    let profile_b = load_creature(catalog, b.0)?;
    if profile_a.name == profile_b.name {
        warn!(creature = profile_a.name.as_str(), "mirror match");
    }
    Ok(Matchup {
        a: prepare_contender(catalog, profile_a, a.1)?,
        b: prepare_contender(catalog, profile_b, b.1)?,
    })
}
