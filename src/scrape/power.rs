// src/scrape/power.rs
//
// Political power. The tooltip anchor ("Puissance Politique …") is the
// stable source; the compact gauge row ("PP | icon | value") is the
// fallback. No hit leaves the power unknown, and unknown is never zero.

use crate::core::html::{attr_value, next_anchor_ci, next_tag_block_ci, open_tag, visible_text};
use crate::core::sanitize::{last_digit_run, normalize_entities, normalize_ws};
use super::Locator;

pub const CHAIN: &[Locator<i64>] = &[title_anchor, gauge_row];

const TITLE_LABEL: &str = "puissance politique";
const GAUGE_LABEL: &str = "PP";

fn title_anchor(doc: &str) -> Option<i64> {
    let mut pos = 0usize;
    while let Some((a_s, a_e)) = next_anchor_ci(doc, pos) {
        pos = a_e;
        let block = &doc[a_s..a_e];
        let Some(title) = attr_value(open_tag(block), "title") else { continue };
        if !label_starts(&title, TITLE_LABEL) { continue; }
        return parse_last_number(&visible_text(block));
    }
    None
}

/// `title` begins with the label phrase followed by a word boundary.
fn label_starts(title: &str, label: &str) -> bool {
    let t = normalize_ws(&normalize_entities(title)).to_lowercase();
    if !t.starts_with(label) {
        return false;
    }
    match t[label.len()..].chars().next() {
        Some(ch) => !ch.is_alphanumeric(),
        None => true,
    }
}

/// Gauge widget: a row of cells where one cell is the bare "PP" label and
/// the value sits two cells over.
fn gauge_row(doc: &str) -> Option<i64> {
    let mut row_pos = 0usize;
    while let Some((tr_s, tr_e)) = next_tag_block_ci(doc, "<tr", "</tr>", row_pos) {
        let tr = &doc[tr_s..tr_e];
        row_pos = tr_e;

        let mut cells = Vec::new();
        let mut td_pos = 0usize;
        while let Some((td_s, td_e)) = next_tag_block_ci(tr, "<td", "</td>", td_pos) {
            cells.push(visible_text(&tr[td_s..td_e]));
            td_pos = td_e;
        }

        for (i, cell) in cells.iter().enumerate() {
            let is_label = cell == GAUGE_LABEL
                || cell.starts_with(&join!(GAUGE_LABEL, " "));
            if !is_label { continue; }
            if let Some(value) = cells.get(i + 2).and_then(|c| parse_last_number(c)) {
                return Some(value);
            }
        }
    }
    None
}

fn parse_last_number(text: &str) -> Option<i64> {
    last_digit_run(text)?.parse().ok()
}
