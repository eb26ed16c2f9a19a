// src/scrape/extract.rs

use crate::config::options::PageKind;
use crate::data::CharacterRecord;
use super::{first_hit, name, player_id, power};

/// Run the three locator chains over one document snapshot. Pure: same tree
/// in, same record out. Emptiness is the validator's problem, not ours; a
/// record comes back even when every chain missed.
pub fn extract(doc: &str, page: PageKind) -> CharacterRecord {
    CharacterRecord {
        player_id: first_hit(doc, player_id::chain(page)),
        name: first_hit(doc, name::CHAIN).unwrap_or_default(),
        pp: first_hit(doc, power::CHAIN),
    }
}
