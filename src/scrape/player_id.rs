// src/scrape/player_id.rs
//
// The playerId only ever appears inside link targets. Community member
// links ("communaute/membres/…") are the best source; generic profile
// links are the fallback. Edit links point at our own account forms and
// never carry the id we want.

use crate::config::options::PageKind;
use crate::core::html::{attr_value, next_anchor_ci, open_tag};
use crate::core::sanitize::last_digit_run;
use super::Locator;

const PLATEAU_CHAIN: &[Locator<String>] = &[member_anchor, profile_anchor];
const INTERFACE_CHAIN: &[Locator<String>] = &[profile_anchor];

pub fn chain(page: PageKind) -> &'static [Locator<String>] {
    match page {
        PageKind::Plateau => PLATEAU_CHAIN,
        PageKind::Interface => INTERFACE_CHAIN,
    }
}

fn member_anchor(doc: &str) -> Option<String> {
    anchor_id(doc, "communaute/membres/", true)
}

fn profile_anchor(doc: &str) -> Option<String> {
    anchor_id(doc, "/profil/", false)
}

fn anchor_id(doc: &str, href_mark: &str, skip_edit: bool) -> Option<String> {
    let mut pos = 0usize;
    while let Some((a_s, a_e)) = next_anchor_ci(doc, pos) {
        pos = a_e;
        let tag = open_tag(&doc[a_s..a_e]);
        let Some(href) = attr_value(tag, "href") else { continue };
        if !href.contains(href_mark) { continue; }
        if skip_edit && href.contains("/edit") { continue; }
        if let Some(id) = id_from_href(&href) {
            return Some(id);
        }
    }
    None
}

/// Prefer the last dash-delimited all-digit segment of at least three
/// digits; short numeric fragments elsewhere in the path are usually page
/// numbers, not ids. Otherwise take the last digit run anywhere.
fn id_from_href(href: &str) -> Option<String> {
    let trimmed = href.trim_end_matches('/');
    for seg in trimmed.rsplit('-') {
        if seg.len() >= 3 && seg.bytes().all(|b| b.is_ascii_digit()) {
            return Some(seg.to_string());
        }
    }
    last_digit_run(trimmed).map(|d| d.to_string())
}
