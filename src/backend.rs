// src/backend.rs
//
// Client for the krabot aggregation backend. Uploads are fire-and-forget:
// the caller never waits on the response, the spawned thread only logs the
// outcome (and, in confirm-delivery mode, writes the snapshot on a 2xx).

use std::fmt;
use std::thread;

use crate::config::consts::{BACKEND_HOST, BACKEND_PORT, BACKEND_PREFIX, ERROR_BODY_MAX};
use crate::core::net::{self, percent_encode};
use crate::core::sanitize::escape_and_truncate;
use crate::data::{CharacterRecord, UploadBody, UserEntry};
use crate::store::SnapshotStore;

/// Structured failure for the directory fetch; status 0 means the transport
/// itself failed. The body is already display-safe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchError {
    pub status: u16,
    pub body: String,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status: {} - {}", self.status, self.body)
    }
}

fn op_path(op: &str, api_key: Option<&str>) -> String {
    let mut path = join!(BACKEND_PREFIX, "/", op);
    if let Some(k) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
        path.push_str("?apiKey=");
        path.push_str(&percent_encode(k));
    }
    path
}

/// Snapshot write deferred until the backend confirms delivery.
pub struct ConfirmWrite {
    pub store: SnapshotStore,
    pub scope: String,
}

/// Issue the upload on a background thread and return immediately.
/// `confirm` is None in the default optimistic mode (the caller has already
/// written the snapshot).
pub fn dispatch(record: &CharacterRecord, api_key: Option<&str>, confirm: Option<ConfirmWrite>) {
    let (Some(player_id), Some(pp)) = (record.player_id.clone(), record.pp) else {
        // validate() runs before us; this is a programming error, not a cycle error
        loge!("Dispatch: refusing unvalidated record {record:?}");
        return;
    };

    let body = UploadBody { player_id: &player_id, name: &record.name, pp };
    let json = match serde_json::to_string(&body) {
        Ok(json) => json,
        Err(e) => {
            loge!("Dispatch: failed to encode upload body: {e}");
            return;
        }
    };

    let path = op_path("uploadCharacteristics", api_key);
    let record = record.clone();

    thread::spawn(move || {
        match net::http_post_json(BACKEND_HOST, BACKEND_PORT, &path, &json) {
            Ok(resp) if resp.is_success() => {
                logf!("Dispatch: characteristics sent ({})", resp.status);
                if let Some(c) = confirm {
                    c.store.save(&c.scope, &record);
                    logf!("Dispatch: snapshot confirmed for scope {}", c.scope);
                }
            }
            Ok(resp) => {
                loge!(
                    "Dispatch: backend refused upload ({}) {}",
                    resp.status,
                    escape_and_truncate(&resp.body, ERROR_BODY_MAX)
                );
            }
            Err(e) => loge!("Dispatch: failed to send characteristics: {e}"),
        }
    });
}

/// Read-only directory listing for the display surface.
pub fn fetch_users(api_key: Option<&str>) -> Result<Vec<UserEntry>, FetchError> {
    let path = op_path("getUsers", api_key);
    let resp = net::http_get(BACKEND_HOST, BACKEND_PORT, &path).map_err(|e| FetchError {
        status: 0,
        body: escape_and_truncate(&e.to_string(), ERROR_BODY_MAX),
    })?;

    if !resp.is_success() {
        return Err(FetchError {
            status: resp.status,
            body: escape_and_truncate(&resp.body, ERROR_BODY_MAX),
        });
    }

    serde_json::from_str(&resp.body).map_err(|_| FetchError {
        status: resp.status,
        body: s!("invalid-json"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_without_key_has_no_query() {
        assert_eq!(
            op_path("uploadCharacteristics", None),
            "/krabot/characteristics/uploadCharacteristics"
        );
        assert_eq!(op_path("getUsers", Some("  ")), "/krabot/characteristics/getUsers");
    }

    #[test]
    fn path_with_key_is_encoded() {
        assert_eq!(
            op_path("getUsers", Some("a b")),
            "/krabot/characteristics/getUsers?apiKey=a%20b"
        );
    }

    #[test]
    fn directory_entries_tolerate_both_shapes() {
        let old = r#"[{"name":"Jean Dupont","pp":57}]"#;
        let new = r#"[{"playerId":"482931221","name":"Jean Dupont","pp":57}]"#;
        let a: Vec<UserEntry> = serde_json::from_str(old).unwrap();
        let b: Vec<UserEntry> = serde_json::from_str(new).unwrap();
        assert_eq!(a[0].name, "Jean Dupont");
        assert_eq!(a[0].player_id, None);
        assert_eq!(b[0].player_id.as_deref(), Some("482931221"));
        assert_eq!(b[0].pp, Some(57));
    }

    #[test]
    fn upload_body_field_names_match_backend() {
        let body = UploadBody { player_id: "482931221", name: "Jean Dupont", pp: 57 };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"playerId":"482931221","name":"Jean Dupont","pp":57}"#);
    }
}
