//! Text cleanup and repair of decoder corruption.
//!
//! Scanned and re-rendered documents often yield runs like
//! `"RFP: R RFP: R eeeequest"`: stuttered characters, echoed fragments and
//! stray single letters. [`normalize_text`] cleans a run and repairs it
//! until it stops changing.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Minimum length of a character run treated as a stutter.
const STUTTER_RUN: usize = 4;

/// Longest token considered by the period-2 echo check.
const ECHO_TOKEN_MAX: usize = 4;

const LIGATURES: &[(&str, &str)] = &[
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

fn numbered_section() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\d+").unwrap())
}

/// Clean a run of text.
///
/// Applies NFC, expands ligatures, drops U+FFFD, collapses whitespace and
/// strips leading non-alphanumeric characters. Text starting with a
/// numbered section (`2.1 ...`) keeps its prefix.
pub fn clean_text(text: &str) -> String {
    let mut normalized: String = text.nfc().filter(|c| *c != '\u{FFFD}').collect();
    for (ligature, replacement) in LIGATURES {
        if normalized.contains(ligature) {
            normalized = normalized.replace(ligature, replacement);
        }
    }

    let collapsed = normalized.split_whitespace().collect::<Vec<_>>().join(" ");
    if numbered_section().is_match(&collapsed) {
        return collapsed;
    }
    collapsed
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

/// Single characters that are words in their own right.
fn is_meaningful_single(c: char) -> bool {
    matches!(c, 'I' | 'A' | 'a') || c.is_ascii_digit()
}

/// A one-letter token that is not a word.
fn is_stray_single(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_alphabetic() && !is_meaningful_single(c),
        _ => false,
    }
}

fn is_single_char(token: &str) -> bool {
    token.chars().count() == 1
}

fn stutters(c: char) -> bool {
    !c.is_whitespace() && !c.is_ascii_digit()
}

fn has_stutter(text: &str) -> bool {
    let mut run = 0;
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if Some(c) == prev && stutters(c) {
            run += 1;
            if run >= STUTTER_RUN {
                return true;
            }
        } else {
            run = 1;
        }
        prev = Some(c);
    }
    false
}

fn has_fragmentation(tokens: &[&str]) -> bool {
    tokens.windows(3).any(|w| {
        is_stray_single(w[1]) && w[0].chars().count() > 1 && w[2].chars().count() > 1
    })
}

fn has_echo(tokens: &[&str]) -> bool {
    tokens
        .windows(3)
        .any(|w| w[0] == w[2] && w[0].chars().count() <= ECHO_TOKEN_MAX)
}

/// Whether text shows decoder corruption: a stuttered character, stray
/// single letters between words, or a short token echoing at period 2.
pub fn is_corrupted(text: &str) -> bool {
    if has_stutter(text) {
        return true;
    }
    let tokens: Vec<&str> = text.split_whitespace().collect();
    has_fragmentation(&tokens) || has_echo(&tokens)
}

/// Collapse each run of 4+ identical characters to one instance.
fn collapse_stutters(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let mut j = i + 1;
        while j < chars.len() && chars[j] == c {
            j += 1;
        }
        let run = j - i;
        if run >= STUTTER_RUN && stutters(c) {
            out.push(c);
        } else {
            out.extend(&chars[i..j]);
        }
        i = j;
    }
    out
}

/// Collapse `WORD x WORD x` to `WORD`.
fn collapse_echoes(tokens: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let echoed = i + 3 < tokens.len()
            && tokens[i] == tokens[i + 2]
            && tokens[i + 1] == tokens[i + 3]
            && is_single_char(&tokens[i + 1]);
        out.push(tokens[i].clone());
        i += if echoed { 4 } else { 1 };
    }
    out
}

/// Repair corrupted text.
///
/// Stutters collapse first; echoed fragments and stray single letters are
/// then removed until none remain, so the result is a fixed point:
/// `repair(&repair(x)) == repair(x)`.
pub fn repair(text: &str) -> String {
    let collapsed = collapse_stutters(text);
    let mut tokens: Vec<String> = collapsed.split_whitespace().map(String::from).collect();
    loop {
        let before = tokens.len();
        tokens = collapse_echoes(tokens);
        tokens.retain(|t| !is_stray_single(t));
        if tokens.len() == before {
            break;
        }
    }
    tokens.join(" ")
}

/// Clean text, then repair it while it still looks corrupted.
///
/// Every repair step only removes characters, so the loop ends; the result
/// is stable under a second application.
pub fn normalize_text(text: &str) -> String {
    let mut current = clean_text(text);
    while is_corrupted(&current) {
        let next = clean_text(&repair(&current));
        if next == current {
            break;
        }
        current = next;
    }
    current
}
