use crate::catalog::Catalog;
use crate::model::MoveProfile;
use crate::setup::SetupError;
use tracing::{debug, info};

/// Maximum number of catalog move lookups per creature.
pub const MOVE_SCAN_LIMIT: usize = 50;

/// Names of damaging moves among the first `MOVE_SCAN_LIMIT` entries of `move_names`,
/// in catalog order. Failed lookups count toward the limit and are skipped.
pub fn damaging_moves<C: Catalog + ?Sized>(catalog: &C, move_names: &[String]) -> Vec<String> {
    let mut damaging = Vec::new();
    for name in move_names.iter().take(MOVE_SCAN_LIMIT) {
        match catalog.lookup_move(name) {
            Ok(record) => {
                if MoveProfile::from_record(&record).is_damaging() {
                    damaging.push(name.clone());
                }
            }
            Err(err) => debug!(name = name.as_str(), %err, "skipping move"),
        }
    }
    info!(
        scanned = move_names.len().min(MOVE_SCAN_LIMIT),
        known = move_names.len(),
        damaging = damaging.len(),
        "filtered moveset"
    );
    damaging
}

/// Like [`damaging_moves`] but an empty result is an error for `creature`.
pub fn require_damaging_moves<C: Catalog + ?Sized>(
    catalog: &C,
    creature: &str,
    move_names: &[String],
) -> Result<Vec<String>, SetupError> {
    let damaging = damaging_moves(catalog, move_names);
    if damaging.is_empty() {
        return Err(SetupError::NoDamagingMoves(creature.to_string()));
    }
    Ok(damaging)
}
