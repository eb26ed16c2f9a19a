// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Drop a leading run of non-letter decoration (bullet glyphs, markers,
/// digits) in front of a display name. Accented letters count as letters.
pub fn strip_leading_marker(s: &str) -> String {
    match s.find(|ch: char| ch.is_alphabetic()) {
        Some(i) => s[i..].to_string(),
        None => s!(),
    }
}

/// Drop a trailing id artifact: an optional run of whitespace, dashes or `#`
/// followed by at least two digits at the very end. A single trailing digit
/// survives, so names like "Henri 4" keep their numeral.
pub fn strip_id_suffix(s: &str) -> String {
    let s = s.trim_end();
    let chars: Vec<char> = s.chars().collect();
    let mut i = chars.len();

    let mut digits = 0usize;
    while i > 0 && chars[i - 1].is_ascii_digit() {
        i -= 1;
        digits += 1;
    }
    if digits < 2 {
        return s.trim().to_string();
    }

    let mut j = i;
    while j > 0 {
        let ch = chars[j - 1];
        if !(ch.is_whitespace() || ch == '#' || is_dash(ch)) {
            break;
        }
        j -= 1;
    }
    chars[..j].iter().collect::<String>().trim().to_string()
}

fn is_dash(ch: char) -> bool {
    matches!(ch, '-' | '\u{2010}'..='\u{2015}' | '\u{2212}')
}

/// Last run of consecutive ASCII digits in `s`.
pub fn last_digit_run(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = bytes.len();
    while end > 0 {
        if bytes[end - 1].is_ascii_digit() {
            let mut start = end;
            while start > 0 && bytes[start - 1].is_ascii_digit() {
                start -= 1;
            }
            return Some(&s[start..end]);
        }
        end -= 1;
    }
    None
}

/// Scope string to safe file-name fragment. Anything outside alnum/dash
/// collapses to '_'.
pub fn sanitize_scope(scope: &str) -> String {
    let mut out = String::with_capacity(scope.len());
    let mut last_us = false;
    for ch in scope.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
            last_us = false;
        } else if !last_us {
            out.push('_');
            last_us = true;
        }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!("default") } else { out }
}

/// Make a fetched error body safe for inline display: escape '<' and cap the
/// length (on a char boundary).
pub fn escape_and_truncate(body: &str, max: usize) -> String {
    let escaped = body.replace('<', "&lt;");
    match escaped.char_indices().nth(max) {
        Some((i, _)) => escaped[..i].to_string(),
        None => escaped,
    }
}
