//! Chat transcript render model.
//!
//! The transcript shows every chat line from step 0 up to the current
//! step. Messages carry markdown-lite markup (`**bold**`, `*italic*`,
//! newlines) and glossary terms are detected whole-word and
//! case-insensitively so the front end can make them interactive.

use playbill_protocol::Glossary;

use crate::state::Player;

/// A styled piece of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Bold(String),
    Italic(String),
    /// A glossary term occurrence. `text` is the verbatim match,
    /// `term` the glossary key it resolved to.
    Term { text: String, term: String },
    LineBreak,
}

/// One rendered chat bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLine {
    /// Index into the timeline.
    pub step_index: usize,
    /// 1-based display number of the step.
    pub step_number: u32,
    pub actor_id: String,
    pub actor_name: String,
    pub initials: String,
    pub color: String,
    /// True for the line at the forward high-water mark, so the front
    /// end can style lines the viewer has not scrolled past before.
    pub fresh: bool,
    pub fragments: Vec<Fragment>,
}

impl Player {
    /// Chat lines of all steps up to and including the current one.
    pub fn transcript(&self) -> Vec<TranscriptLine> {
        let Some(scenario) = self.scenario() else {
            return Vec::new();
        };
        let current = self.current_step();
        let high_water = self.rendered_until();
        scenario
            .timeline
            .iter()
            .take(current + 1)
            .enumerate()
            .filter_map(|(index, step)| {
                let chat = step.chat.as_ref()?;
                let (name, color) = scenario
                    .actor(&chat.actor)
                    .map(|a| (a.name.clone(), a.color.clone()))
                    .unwrap_or_else(|| (chat.actor.clone(), String::new()));
                Some(TranscriptLine {
                    step_index: index,
                    step_number: step.step,
                    actor_id: chat.actor.clone(),
                    initials: actor_initials(&name),
                    actor_name: name,
                    color,
                    fresh: index == current && index == high_water,
                    fragments: format_message(&chat.message, &scenario.glossary),
                })
            })
            .collect()
    }
}

/// Avatar initials for an actor display name.
///
/// `system` gets a gear glyph; everyone else the first letters of their
/// first two words, uppercased.
pub fn actor_initials(name: &str) -> String {
    if name == "system" {
        return "⚙".to_string();
    }
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Parse a message into styled fragments, then mark glossary terms
/// inside the plain-text runs.
pub fn format_message(message: &str, glossary: &Glossary) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for fragment in parse_markup(message) {
        match fragment {
            Fragment::Text(text) => fragments.extend(mark_terms(&text, glossary)),
            other => fragments.push(other),
        }
    }
    fragments
}

/// Split markdown-lite markup into bold/italic/text/line-break runs.
///
/// Unbalanced markers are kept as literal text, matching how a browser
/// regex replacement would leave them alone.
fn parse_markup(message: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut buf = String::new();
    let bytes = message.as_bytes();
    let mut i = 0;

    let flush = |buf: &mut String, out: &mut Vec<Fragment>| {
        if !buf.is_empty() {
            out.push(Fragment::Text(std::mem::take(buf)));
        }
    };

    while i < bytes.len() {
        if bytes[i] == b'\n' {
            flush(&mut buf, &mut fragments);
            fragments.push(Fragment::LineBreak);
            i += 1;
        } else if message[i..].starts_with("**") {
            if let Some(end) = message[i + 2..].find("**") {
                flush(&mut buf, &mut fragments);
                fragments.push(Fragment::Bold(message[i + 2..i + 2 + end].to_string()));
                i += end + 4;
            } else {
                buf.push_str("**");
                i += 2;
            }
        } else if bytes[i] == b'*' {
            if let Some(end) = message[i + 1..].find('*') {
                flush(&mut buf, &mut fragments);
                fragments.push(Fragment::Italic(message[i + 1..i + 1 + end].to_string()));
                i += end + 2;
            } else {
                buf.push('*');
                i += 1;
            }
        } else {
            // Advance one whole char, not one byte.
            let ch_len = message[i..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            buf.push_str(&message[i..i + ch_len]);
            i += ch_len;
        }
    }
    flush(&mut buf, &mut fragments);
    fragments
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Mark whole-word, case-insensitive glossary term occurrences in a
/// plain-text run. Terms earlier in the glossary claim their ranges
/// first; later terms cannot overlap them.
fn mark_terms(text: &str, glossary: &Glossary) -> Vec<Fragment> {
    if glossary.is_empty() || text.is_empty() {
        return vec![Fragment::Text(text.to_string())];
    }

    let haystack = text.to_ascii_lowercase();
    let bytes = haystack.as_bytes();
    // (start, end, canonical term), non-overlapping.
    let mut matches: Vec<(usize, usize, String)> = Vec::new();

    for term in glossary.terms() {
        let needle = term.to_ascii_lowercase();
        if needle.is_empty() {
            continue;
        }
        let mut from = 0;
        while let Some(pos) = haystack[from..].find(&needle) {
            let start = from + pos;
            let end = start + needle.len();
            // Resume on the next char boundary, not the next byte.
            from = start
                + haystack[start..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);

            let boundary_before = start == 0 || !is_word_byte(bytes[start - 1]);
            let boundary_after = end == bytes.len() || !is_word_byte(bytes[end]);
            if !boundary_before || !boundary_after {
                continue;
            }
            if matches.iter().any(|(s, e, _)| start < *e && *s < end) {
                continue;
            }
            matches.push((start, end, term.to_string()));
        }
    }
    matches.sort_by_key(|(start, _, _)| *start);

    let mut fragments = Vec::new();
    let mut cursor = 0;
    for (start, end, term) in matches {
        if start > cursor {
            fragments.push(Fragment::Text(text[cursor..start].to_string()));
        }
        fragments.push(Fragment::Term {
            text: text[start..end].to_string(),
            term,
        });
        cursor = end;
    }
    if cursor < text.len() {
        fragments.push(Fragment::Text(text[cursor..].to_string()));
    }
    fragments
}
