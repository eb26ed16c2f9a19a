// src/core/html.rs
//
// Positional scanning over raw HTML text. No DOM is built: the site's markup
// is too irregular for that to pay off, and callers only ever need "the next
// <tag …>…</tag> block after position N".

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

/// The `<tag …>` opening part of a block, without its content.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..=i],
        None => block,
    }
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Next `<a …>…</a>` block. Needs its own boundary check because "<a" also
/// prefixes <abbr>, <article> and friends.
pub fn next_anchor_ci(s: &str, from: usize) -> Option<(usize, usize)> {
    let mut pos = from;
    while let Some((a_s, a_e)) = next_tag_block_ci(s, "<a", "</a>", pos) {
        match s.as_bytes().get(a_s + 2) {
            Some(b' ' | b'>' | b'\t' | b'\n' | b'\r') => return Some((a_s, a_e)),
            _ => pos = a_s + 2,
        }
    }
    None
}

/// Value of an attribute inside an opening tag. Attribute name is matched
/// case-insensitively; the value may be single- or double-quoted.
pub fn attr_value(tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(tag);
    let needle = join!(to_lower(name), "=");
    let mut from = 0usize;
    loop {
        let i = lc[from..].find(&needle)? + from;
        // reject substrings like data-href= when looking for href=
        let boundary = i == 0
            || lc.as_bytes()[i - 1].is_ascii_whitespace();
        let vstart = i + needle.len();
        if !boundary {
            from = vstart;
            continue;
        }
        let rest = &tag[vstart..];
        let mut chars = rest.chars();
        return match chars.next() {
            Some(q @ ('"' | '\'')) => {
                let body = &rest[1..];
                body.find(q).map(|e| body[..e].to_string())
            }
            // unquoted value, runs to whitespace or '>'
            Some(_) => {
                let end = rest
                    .find(|ch: char| ch.is_whitespace() || ch == '>')
                    .unwrap_or(rest.len());
                Some(rest[..end].to_string())
            }
            None => None,
        };
    }
}

/// True when the tag's class attribute contains `token` as a whole
/// whitespace-separated class name.
pub fn class_contains(tag: &str, token: &str) -> bool {
    match attr_value(tag, "class") {
        Some(classes) => classes.split_whitespace().any(|c| c == token),
        None => false,
    }
}

/// Next `<tag …>…</tag>` block whose class list contains `token`.
pub fn next_block_with_class_ci(
    s: &str,
    tag: &str,
    token: &str,
    from: usize,
) -> Option<(usize, usize)> {
    let open = join!("<", tag);
    let close = join!("</", tag, ">");
    let mut pos = from;
    while let Some((bs, be)) = next_tag_block_ci(s, &open, &close, pos) {
        if class_contains(open_tag(&s[bs..be]), token) {
            return Some((bs, be));
        }
        // advance past the open tag only; blocks may nest
        pos = bs + 1;
    }
    None
}

/// Blank out every `<tag …>…</tag>` block whose class list contains `token`.
/// Used to hide our own injected panel before free-text scans.
pub fn erase_blocks_with_class(s: &str, tag: &str, token: &str) -> String {
    let mut out = s.to_string();
    let mut pos = 0usize;
    while let Some((bs, be)) = next_block_with_class_ci(&out, tag, token, pos) {
        out.replace_range(bs..be, "");
        pos = bs;
    }
    out
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Visible text of a block: entities resolved, tags stripped, ws collapsed.
pub fn visible_text(block: &str) -> String {
    strip_tags(super::sanitize::normalize_entities(&inner_after_open_tag(
        block,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_value_quoted_and_unquoted() {
        assert_eq!(
            attr_value(r#"<a href="/profil/123" title='PP'>"#, "href").as_deref(),
            Some("/profil/123")
        );
        assert_eq!(
            attr_value(r#"<a href="/profil/123" title='PP'>"#, "title").as_deref(),
            Some("PP")
        );
        assert_eq!(attr_value("<table class=teamroster>", "class").as_deref(), Some("teamroster"));
        assert_eq!(attr_value("<a>", "href"), None);
    }

    #[test]
    fn attr_value_ignores_prefixed_names() {
        let tag = r#"<a data-href="/nope" href="/yes">"#;
        assert_eq!(attr_value(tag, "href").as_deref(), Some("/yes"));
    }

    #[test]
    fn class_contains_is_token_wise() {
        let tag = r#"<div class="list-group small">"#;
        assert!(class_contains(tag, "list-group"));
        assert!(class_contains(tag, "small"));
        assert!(!class_contains(tag, "list"));
    }

    #[test]
    fn next_block_with_class_skips_others() {
        let doc = r#"<span class="a">x</span><span class="b c">y</span>"#;
        let (s, e) = next_block_with_class_ci(doc, "span", "c", 0).unwrap();
        assert!(doc[s..e].contains('y'));
    }

    #[test]
    fn erase_blocks_removes_all_matches() {
        let doc = r#"<div class="keep">a</div><div class="krabot-panel">b</div><div class="krabot-panel">c</div>"#;
        let out = erase_blocks_with_class(doc, "div", "krabot-panel");
        assert!(out.contains('a'));
        assert!(!out.contains('b'));
        assert!(!out.contains('c'));
    }

    #[test]
    fn visible_text_strips_nested_markup() {
        let block = "<td> <strong>PP</strong>&nbsp;: <b>57</b> </td>";
        assert_eq!(visible_text(block), "PP : 57");
    }
}
