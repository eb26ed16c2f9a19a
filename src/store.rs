// src/store.rs
//
// Local persisted state: one snapshot file per credential scope, plus the
// apiKey itself. Everything lives under .store/ as JSON; a file that fails
// to parse or outlives its TTL is deleted on sight so the cache heals
// itself instead of wedging the pipeline.

use std::{fs, io, path::{Path, PathBuf}, time::{SystemTime, UNIX_EPOCH}};

use crate::config::consts::{API_KEY_FILE, DEFAULT_SCOPE, SNAPSHOT_PREFIX, SNAPSHOT_TTL_MS, STORE_DIR};
use crate::core::sanitize::sanitize_scope;
use crate::data::{CharacterRecord, Snapshot};

#[derive(Clone)]
pub struct SnapshotStore {
    root: PathBuf,
    ttl_ms: u64,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(PathBuf::from(STORE_DIR), SNAPSHOT_TTL_MS)
    }
}

/// Cache partition key. Two credentials never share a snapshot.
pub fn scope_for(api_key: Option<&str>) -> String {
    match api_key {
        Some(k) if !k.trim().is_empty() => sanitize_scope(k.trim()),
        _ => s!(DEFAULT_SCOPE),
    }
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl SnapshotStore {
    pub fn new(root: PathBuf, ttl_ms: u64) -> Self {
        Self { root, ttl_ms }
    }

    fn path_for(&self, scope: &str) -> PathBuf {
        self.root.join(join!(SNAPSHOT_PREFIX, &sanitize_scope(scope), ".json"))
    }

    /// Last dispatched record for `scope`, or None. Missing file, bad JSON,
    /// wrong shape, zero timestamp and expired entries all read as None;
    /// every case but "missing" also deletes the offending file.
    pub fn load(&self, scope: &str) -> Option<CharacterRecord> {
        self.load_at(scope, now_ms())
    }

    fn load_at(&self, scope: &str, now: u64) -> Option<CharacterRecord> {
        let path = self.path_for(scope);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return None,
        };
        let snap: Snapshot = match serde_json::from_str(&raw) {
            Ok(snap) => snap,
            Err(e) => {
                logd!("Store: invalid snapshot for scope {scope} ({e}), purging");
                remove_quietly(&path);
                return None;
            }
        };
        let fresh = snap.saved_at > 0 && now.saturating_sub(snap.saved_at) <= self.ttl_ms;
        if !fresh {
            logd!("Store: snapshot for scope {scope} expired, purging");
            remove_quietly(&path);
            return None;
        }
        Some(snap.data)
    }

    /// Overwrite the scope's snapshot with `{record, now}`. A write failure
    /// is logged and swallowed; it must never abort an in-flight dispatch.
    pub fn save(&self, scope: &str, record: &CharacterRecord) {
        if let Err(e) = self.try_save(scope, record, now_ms()) {
            loge!("Store: failed to save snapshot for scope {scope}: {e}");
        }
    }

    fn try_save(&self, scope: &str, record: &CharacterRecord, now: u64) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        let snap = Snapshot { data: record.clone(), saved_at: now };
        let json = serde_json::to_string(&snap)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.path_for(scope), json)
    }
}

fn remove_quietly(path: &Path) {
    let _ = fs::remove_file(path);
}

/* ---------------- apiKey ---------------- */

pub fn load_api_key() -> Option<String> {
    let raw = fs::read_to_string(Path::new(STORE_DIR).join(API_KEY_FILE)).ok()?;
    let k = raw.trim().to_string();
    if k.is_empty() { None } else { Some(k) }
}

pub fn save_api_key(key: &str) -> io::Result<()> {
    fs::create_dir_all(STORE_DIR)?;
    fs::write(Path::new(STORE_DIR).join(API_KEY_FILE), key.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static SEQ: AtomicU32 = AtomicU32::new(0);

    fn temp_store(ttl_ms: u64) -> SnapshotStore {
        let n = SEQ.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "kra_watch_store_{}_{n}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        SnapshotStore::new(dir, ttl_ms)
    }

    fn record() -> CharacterRecord {
        CharacterRecord {
            player_id: Some(s!("482931221")),
            name: s!("Jean Dupont"),
            pp: Some(57),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store(SNAPSHOT_TTL_MS);
        store.save("default", &record());
        assert_eq!(store.load("default"), Some(record()));
    }

    #[test]
    fn scopes_are_isolated() {
        let store = temp_store(SNAPSHOT_TTL_MS);
        store.save("key-a", &record());
        assert_eq!(store.load("key-b"), None);
        assert!(store.load("key-a").is_some());
    }

    #[test]
    fn expired_snapshot_reads_absent_and_is_purged() {
        let store = temp_store(SNAPSHOT_TTL_MS);
        let past = now_ms() - SNAPSHOT_TTL_MS - 1;
        store.try_save("default", &record(), past).unwrap();
        assert_eq!(store.load("default"), None);
        // purged: a raw read finds nothing
        assert!(!store.path_for("default").exists());
    }

    #[test]
    fn at_ttl_boundary_snapshot_still_loads() {
        let store = temp_store(SNAPSHOT_TTL_MS);
        let now = now_ms();
        store.try_save("default", &record(), now - SNAPSHOT_TTL_MS).unwrap();
        assert_eq!(store.load_at("default", now), Some(record()));
    }

    #[test]
    fn malformed_json_is_purged_then_save_recovers() {
        let store = temp_store(SNAPSHOT_TTL_MS);
        fs::create_dir_all(&store.root).unwrap();
        fs::write(store.path_for("default"), "{not json").unwrap();
        assert_eq!(store.load("default"), None);
        assert!(!store.path_for("default").exists());

        store.save("default", &record());
        assert_eq!(store.load("default"), Some(record()));
    }

    #[test]
    fn wrong_shape_is_purged() {
        let store = temp_store(SNAPSHOT_TTL_MS);
        fs::create_dir_all(&store.root).unwrap();
        // no savedAt field
        fs::write(store.path_for("default"), r#"{"data":{"playerId":"1","name":"x","pp":2}}"#).unwrap();
        assert_eq!(store.load("default"), None);
        assert!(!store.path_for("default").exists());
    }

    #[test]
    fn zero_saved_at_is_invalid() {
        let store = temp_store(SNAPSHOT_TTL_MS);
        fs::create_dir_all(&store.root).unwrap();
        fs::write(
            store.path_for("default"),
            r#"{"data":{"playerId":"1","name":"x","pp":2},"savedAt":0}"#,
        )
        .unwrap();
        assert_eq!(store.load("default"), None);
    }

    #[test]
    fn scope_derivation() {
        assert_eq!(scope_for(None), "default");
        assert_eq!(scope_for(Some("  ")), "default");
        assert_eq!(scope_for(Some("3f2a-uuid")), "3f2a-uuid");
    }
}
