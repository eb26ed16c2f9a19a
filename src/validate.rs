// src/validate.rs
//
// Gatekeeper in front of the dispatcher. An invalid record is never sent
// and never overwrites the snapshot, no matter how different it looks.

use std::fmt;

use crate::config::consts::BANNED_NAMES;
use crate::data::CharacterRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    MissingIdentifier,
    EmptyOrBlacklistedName,
    /// Covers both "no power found" and "found but not a parseable integer";
    /// the backend requires pp, and absent must never become 0.
    PowerNotNumeric,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::MissingIdentifier => "no playerId found",
            Rejection::EmptyOrBlacklistedName => "empty or blacklisted name",
            Rejection::PowerNotNumeric => "pp absent or not numeric",
        };
        f.write_str(s)
    }
}

pub fn validate(record: &CharacterRecord) -> Result<(), Rejection> {
    match &record.player_id {
        Some(id) if !id.trim().is_empty() => {}
        _ => return Err(Rejection::MissingIdentifier),
    }

    let name = record.name.trim();
    if name.is_empty() || BANNED_NAMES.contains(&name) {
        return Err(Rejection::EmptyOrBlacklistedName);
    }

    if record.pp.is_none() {
        return Err(Rejection::PowerNotNumeric);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CharacterRecord {
        CharacterRecord {
            player_id: Some(s!("482931221")),
            name: s!("Jean Dupont"),
            pp: Some(57),
        }
    }

    #[test]
    fn valid_record_passes() {
        assert_eq!(validate(&valid()), Ok(()));
    }

    #[test]
    fn zero_power_is_a_real_value() {
        let mut r = valid();
        r.pp = Some(0);
        assert_eq!(validate(&r), Ok(()));
    }

    #[test]
    fn missing_identifier_rejects() {
        let mut r = valid();
        r.player_id = None;
        assert_eq!(validate(&r), Err(Rejection::MissingIdentifier));
        r.player_id = Some(s!("  "));
        assert_eq!(validate(&r), Err(Rejection::MissingIdentifier));
    }

    #[test]
    fn empty_name_rejects() {
        let mut r = valid();
        r.name = s!("   ");
        assert_eq!(validate(&r), Err(Rejection::EmptyOrBlacklistedName));
    }

    #[test]
    fn panel_heading_is_never_a_name() {
        let mut r = valid();
        r.name = s!("Krabot - Caractéristiques");
        assert_eq!(validate(&r), Err(Rejection::EmptyOrBlacklistedName));
        r.name = s!("(no name)");
        assert_eq!(validate(&r), Err(Rejection::EmptyOrBlacklistedName));
    }

    #[test]
    fn absent_power_rejects() {
        let mut r = valid();
        r.pp = None;
        assert_eq!(validate(&r), Err(Rejection::PowerNotNumeric));
    }
}
