// tests/pipeline.rs
//
// End-to-end pipeline scenarios, minus the network: extract over a canned
// page, validate/compare, and the snapshot store on a throwaway directory.

use std::fs;
use std::path::PathBuf;

use kra_watch::config::options::{ClientContext, PageKind};
use kra_watch::data::CharacterRecord;
use kra_watch::gate;
use kra_watch::runner::{decide, has_changed, Decision};
use kra_watch::scrape::extract;
use kra_watch::store::{scope_for, SnapshotStore};
use kra_watch::validate::Rejection;

const TTL_MS: u64 = 60 * 60 * 1000;

const PLATEAU_PAGE: &str = r#"
<html><body>
  <div class="col-md-3 sidebar">
    <div class="list-group">
      <span class="list-group-item active">&nbsp;Jean Dupont</span>
      <span class="list-group-item">Autre Perso</span>
    </div>
    <a href="/communaute/membres/jean-dupont-482931221">fiche</a>
    <a title="Puissance Politique (cumul)">PP : 57</a>
  </div>
</body></html>"#;

// same page with the power widget missing entirely
const PLATEAU_NO_PP: &str = r#"
<html><body>
  <div class="list-group">
    <span class="list-group-item active">Jean Dupont</span>
  </div>
  <a href="/communaute/membres/jean-dupont-482931221">fiche</a>
</body></html>"#;

fn temp_store(name: &str) -> (SnapshotStore, PathBuf) {
    let dir = std::env::temp_dir().join(format!("kra_watch_it_{}_{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    (SnapshotStore::new(dir.clone(), TTL_MS), dir)
}

#[test]
fn scenario_a_first_observation_dispatches_and_caches() {
    let (store, dir) = temp_store("a");
    let scope = scope_for(None);

    let record = extract(PLATEAU_PAGE, PageKind::Plateau);
    assert_eq!(record.player_id.as_deref(), Some("482931221"));
    assert_eq!(record.name, "Jean Dupont");
    assert_eq!(record.pp, Some(57));

    assert_eq!(decide(&record, store.load(&scope).as_ref()), Decision::Send);

    // what the dispatcher does in optimistic mode
    store.save(&scope, &record);
    assert_eq!(store.load(&scope), Some(record));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn scenario_b_same_tree_within_ttl_is_unchanged() {
    let (store, dir) = temp_store("b");
    let scope = scope_for(Some("3f2a-uuid"));

    let first = extract(PLATEAU_PAGE, PageKind::Plateau);
    store.save(&scope, &first);

    let second = extract(PLATEAU_PAGE, PageKind::Plateau);
    assert_eq!(first, second);
    assert_eq!(decide(&second, store.load(&scope).as_ref()), Decision::Unchanged);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn scenario_c_absent_power_is_rejected_and_cache_untouched() {
    let (store, dir) = temp_store("c");
    let scope = scope_for(None);

    let record = extract(PLATEAU_NO_PP, PageKind::Plateau);
    assert_eq!(record.pp, None);
    assert_eq!(
        decide(&record, store.load(&scope).as_ref()),
        Decision::Reject(Rejection::PowerNotNumeric)
    );
    // rejected records never overwrite the snapshot
    assert_eq!(store.load(&scope), None);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn scenario_d_mobile_context_is_gated_before_any_extraction() {
    let ctx = ClientContext {
        user_agent: Some("Mozilla/5.0 (iPhone)".into()),
        viewport_width: Some(390),
    };
    assert!(!gate::is_eligible(&ctx));
}

#[test]
fn scenario_e_corrupted_snapshot_heals() {
    let (store, dir) = temp_store("e");
    let scope = scope_for(None);

    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("snapshot_default.json"), "{{{garbage").unwrap();

    assert_eq!(store.load(&scope), None);
    assert!(!dir.join("snapshot_default.json").exists());

    let record = extract(PLATEAU_PAGE, PageKind::Plateau);
    store.save(&scope, &record);
    assert_eq!(store.load(&scope), Some(record));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn power_change_between_two_numbers_counts() {
    let a = CharacterRecord {
        player_id: Some("482931221".into()),
        name: "Jean Dupont".into(),
        pp: Some(57),
    };
    let mut b = a.clone();
    b.pp = Some(58);
    assert!(has_changed(&b, Some(&a)));
    assert_eq!(decide(&b, Some(&a)), Decision::Send);
}

#[test]
fn credential_scopes_never_share_snapshots() {
    let (store, dir) = temp_store("scopes");
    let record = extract(PLATEAU_PAGE, PageKind::Plateau);

    store.save(&scope_for(Some("key-one")), &record);
    assert_eq!(store.load(&scope_for(Some("key-two"))), None);
    assert!(store.load(&scope_for(Some("key-one"))).is_some());

    let _ = fs::remove_dir_all(dir);
}
