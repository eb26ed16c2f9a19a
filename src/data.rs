// src/data.rs
use serde::{Deserialize, Serialize};

/// One observation of the character sheet. `pp` absent means "unknown",
/// which is not the same as 0; the distinction survives the whole pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    #[serde(rename = "playerId")]
    pub player_id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub pp: Option<i64>,
}

impl CharacterRecord {
    pub fn empty() -> Self {
        Self { player_id: None, name: s!(), pp: None }
    }
}

/// On-disk snapshot payload: `{"data": {...}, "savedAt": epoch-ms}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub data: CharacterRecord,
    #[serde(rename = "savedAt")]
    pub saved_at: u64,
}

/// Body of `POST uploadCharacteristics`. Only built from a validated record,
/// so all three fields are owned and present.
#[derive(Debug, Serialize)]
pub struct UploadBody<'a> {
    #[serde(rename = "playerId")]
    pub player_id: &'a str,
    pub name: &'a str,
    pub pp: i64,
}

/// One entry of `GET getUsers`. Newer backends also return a playerId;
/// tolerate both shapes.
#[derive(Clone, Debug, Deserialize)]
pub struct UserEntry {
    #[serde(rename = "playerId", default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pp: Option<i64>,
}
