// src/scrape/mod.rs
//
// Attribute locators. Each attribute is resolved by an ordered chain of
// independent strategies; the first hit wins and later entries are never
// consulted. A strategy that finds nothing returns None. A miss is normal,
// not an error, and a new site-markup variant becomes a new chain entry.

mod extract;
mod name;
mod player_id;
mod power;

pub use extract::extract;

use crate::config::options::PageKind;
use crate::core::net;

/// One fallback strategy: whole document in, maybe a value out.
pub type Locator<T> = fn(&str) -> Option<T>;

/// Strict top-to-bottom fallback, not a merge.
pub fn first_hit<T>(doc: &str, chain: &[Locator<T>]) -> Option<T> {
    chain.iter().find_map(|locate| locate(doc))
}

/// Fetch the page the locators run against.
pub fn fetch_document(page: PageKind) -> Result<String, Box<dyn std::error::Error>> {
    net::fetch_page(page.path())
}
