// src/scrape/name.rs
//
// Display name. The list-group navigation region is the reliable source:
// its active entry is the character currently played, the first entry is
// the next best guess. When the region is missing entirely (older markup),
// scan the sidebar text for the first thing shaped like a name, after
// erasing the companion panel so we never read its heading back as a name.

use crate::config::consts::OWN_PANEL_CLASS;
use crate::core::html::{
    attr_value, class_contains, erase_blocks_with_class, next_block_with_class_ci,
    next_tag_block_ci, open_tag, visible_text,
};
use crate::core::sanitize::{normalize_entities, normalize_ws, strip_id_suffix, strip_leading_marker};
use super::Locator;

pub const CHAIN: &[Locator<String>] = &[active_list_entry, first_list_entry, sidebar_scan];

const MAX_NAME_LEN: usize = 100;

fn list_group(doc: &str) -> Option<&str> {
    let (s, e) = next_block_with_class_ci(doc, "div", "list-group", 0)?;
    Some(&doc[s..e])
}

fn active_list_entry(doc: &str) -> Option<String> {
    let region = list_group(doc)?;
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(region, "<span", "</span>", pos) {
        let block = &region[s..e];
        let tag = open_tag(block);
        if class_contains(tag, "list-group-item") && class_contains(tag, "active") {
            return cleaned(&visible_text(block));
        }
        pos = e;
    }
    None
}

fn first_list_entry(doc: &str) -> Option<String> {
    let region = list_group(doc)?;
    // first list-group-item span, else the first span at all
    let mut pos = 0usize;
    let mut first_any: Option<String> = None;
    while let Some((s, e)) = next_tag_block_ci(region, "<span", "</span>", pos) {
        let block = &region[s..e];
        if class_contains(open_tag(block), "list-group-item") {
            return cleaned(&visible_text(block));
        }
        if first_any.is_none() {
            first_any = Some(visible_text(block));
        }
        pos = e;
    }
    first_any.as_deref().and_then(cleaned)
}

fn sidebar_scan(doc: &str) -> Option<String> {
    let doc = erase_blocks_with_class(doc, "div", OWN_PANEL_CLASS);
    let region = sidebar_region(&doc)?.to_string();

    // every tag-free text run is a candidate line
    let mut line = String::new();
    let mut in_tag = false;
    for ch in region.chars() {
        match ch {
            '<' => {
                in_tag = true;
                if let Some(name) = name_shaped(&line) {
                    return Some(name);
                }
                line.clear();
            }
            '>' => in_tag = false,
            _ if !in_tag => line.push(ch),
            _ => {}
        }
    }
    name_shaped(&line)
}

fn sidebar_region(doc: &str) -> Option<&str> {
    if let Some((s, e)) = next_block_with_class_ci(doc, "div", "sidebar", 0) {
        return Some(&doc[s..e]);
    }
    if let Some((s, e)) = block_with_id(doc, "content") {
        return Some(&doc[s..e]);
    }
    next_block_with_class_ci(doc, "div", "container", 0).map(|(s, e)| &doc[s..e])
}

fn block_with_id(doc: &str, id: &str) -> Option<(usize, usize)> {
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(doc, "<div", "</div>", pos) {
        if attr_value(open_tag(&doc[s..e]), "id").as_deref() == Some(id) {
            return Some((s, e));
        }
        pos = s + 1;
    }
    None
}

/// Two tokens, starts with a letter, bounded length.
fn name_shaped(line: &str) -> Option<String> {
    let t = normalize_ws(&normalize_entities(line));
    if t.is_empty() || t.len() >= MAX_NAME_LEN {
        return None;
    }
    if !t.chars().next().is_some_and(|c| c.is_alphabetic()) {
        return None;
    }
    if !t.contains(' ') {
        return None;
    }
    cleaned(&t)
}

/// Shared normalization for every strategy in the chain.
fn cleaned(raw: &str) -> Option<String> {
    let t = normalize_ws(&normalize_entities(raw));
    let t = strip_leading_marker(&t);
    let t = strip_id_suffix(&normalize_ws(&t));
    if t.is_empty() { None } else { Some(t) }
}
