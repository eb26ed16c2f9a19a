// src/runner.rs
//
// The watch loop: gate, fetch, extract, validate, compare, dispatch. Runs
// once on start and then on every wall-clock tick. Ticks are scheduled
// against the loop's start, not chained off cycle completion, so a slow
// dispatch may overlap the next cycle; dispatch is fire-and-forget and the
// store is last-write-wins, which keeps overlap benign.

use std::error::Error;
use std::thread;
use std::time::{Duration, Instant};

use crate::backend::{self, ConfirmWrite};
use crate::config::options::WatchOptions;
use crate::data::CharacterRecord;
use crate::gate;
use crate::progress::Progress;
use crate::scrape;
use crate::store::{self, SnapshotStore};
use crate::validate::{validate, Rejection};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Capability gate excluded this context; nothing was attempted.
    Skipped,
    /// The page fetch failed; next tick is the only retry.
    FetchFailed(String),
    Rejected(Rejection),
    Unchanged,
    Dispatched,
}

/// Flat field-by-field comparison. No prior snapshot always counts as a
/// change, power moving between any two values (including to/from unknown)
/// counts as a change.
pub fn has_changed(candidate: &CharacterRecord, snapshot: Option<&CharacterRecord>) -> bool {
    match snapshot {
        None => true,
        Some(prior) => {
            candidate.player_id != prior.player_id
                || candidate.name != prior.name
                || candidate.pp != prior.pp
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Reject(Rejection),
    Unchanged,
    Send,
}

/// The pure core of one cycle: what should happen to this record, given the
/// prior snapshot. Validation runs first; an invalid record is never sent
/// and never compared into the cache, however different it is.
pub fn decide(record: &CharacterRecord, prior: Option<&CharacterRecord>) -> Decision {
    if let Err(reason) = validate(record) {
        return Decision::Reject(reason);
    }
    if has_changed(record, prior) {
        Decision::Send
    } else {
        Decision::Unchanged
    }
}

/// One full cycle against the live page.
pub fn run_cycle(
    options: &WatchOptions,
    snapshots: &SnapshotStore,
    api_key: Option<&str>,
) -> Outcome {
    if !gate::is_eligible(&options.context) {
        logf!("Cycle: mobile context detected, skipping extraction");
        return Outcome::Skipped;
    }

    let doc = match scrape::fetch_document(options.page) {
        Ok(doc) => doc,
        Err(e) => {
            loge!("Cycle: page fetch failed: {e}");
            return Outcome::FetchFailed(e.to_string());
        }
    };

    let record = scrape::extract(&doc, options.page);
    let scope = store::scope_for(api_key);

    match decide(&record, snapshots.load(&scope).as_ref()) {
        Decision::Reject(reason) => {
            logw!("Cycle: refusing to send record ({reason}): {record:?}");
            Outcome::Rejected(reason)
        }
        Decision::Unchanged => {
            logf!("Cycle: no change detected, send ignored");
            Outcome::Unchanged
        }
        Decision::Send => {
            if options.confirm_delivery {
                backend::dispatch(
                    &record,
                    api_key,
                    Some(ConfirmWrite { store: snapshots.clone(), scope }),
                );
            } else {
                // snapshot reflects "sent" as soon as the send is issued;
                // a network failure will NOT be retried by the next cycle
                backend::dispatch(&record, api_key, None);
                snapshots.save(&scope, &record);
                logf!("Cycle: snapshot updated for scope {scope}");
            }
            Outcome::Dispatched
        }
    }
}

/// One immediate cycle, then fixed-period ticks for the life of the process
/// (resolves the apiKey once per tick so a GUI-side save takes effect).
pub fn run(
    options: &WatchOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<(), Box<dyn Error>> {
    let snapshots = SnapshotStore::default();

    let cycle = |progress: &mut Option<&mut dyn Progress>| {
        let key = options.api_key.clone().or_else(store::load_api_key);
        let outcome = run_cycle(options, &snapshots, key.as_deref());
        if let Some(p) = progress.as_deref_mut() {
            p.cycle_done(&outcome);
        }
        outcome
    };

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!(
            "Watching {:?} every {}s",
            options.page, options.interval_secs
        ));
    }

    cycle(&mut progress);
    if options.once {
        return Ok(());
    }

    let period = Duration::from_secs(options.interval_secs.max(1));
    let start = Instant::now();
    let mut tick: u32 = 1;
    loop {
        let due = start + period * tick;
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }
        cycle(&mut progress);
        tick = tick.saturating_add(1);
    }
}
