//! Name normalization
//!
//! Canonicalizes user input into the form the registry hashes: emoji
//! presentation selectors are dropped, compatibility forms (fullwidth,
//! ligatures) are folded by NFKC, case is folded, and control, invisible
//! and confusable characters are rejected. Labels are validated
//! individually, including a single-script check. Everything downstream
//! trusts the output of [`normalize`] unconditionally.

use crate::{Error, Result};
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_script::{Script, UnicodeScript};

/// Maximum encoded length of a single label in bytes
pub const MAX_LABEL_BYTES: usize = 255;

const ZERO_WIDTH_JOINER: char = '\u{200D}';
const EMOJI_PRESENTATION: char = '\u{FE0F}';

/// Script combinations that legitimately share a label
const SCRIPT_GROUPS: &[&[Script]] = &[
    &[Script::Han, Script::Hiragana, Script::Katakana],
    &[Script::Han, Script::Hangul],
    &[Script::Han, Script::Bopomofo],
];

/// Invisible, bidi-control and dot-lookalike characters that render
/// identically to something else.
const CONFUSABLES: &[char] = &[
    '\u{00AD}', // soft hyphen
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200E}', // left-to-right mark
    '\u{200F}', // right-to-left mark
    '\u{2024}', // one dot leader
    '\u{2060}', // word joiner
    '\u{3002}', // ideographic full stop
    '\u{FEFF}', // zero width no-break space
    '\u{FF0E}', // fullwidth full stop
    '\u{FF61}', // halfwidth ideographic full stop
    '\u{FFFD}', // replacement character
];

/// A name that passed normalization
///
/// Only constructible through [`normalize`], so holding one is proof of
/// validity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName(String);

impl NormalizedName {
    /// Normalize and wrap
    pub fn new(input: &str) -> Result<Self> {
        normalize(input)
    }

    /// Normalized string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Labels from leaf to root
    pub fn labels(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0.split('.')
    }

    /// Top-level label
    pub fn tld(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a raw name
pub fn normalize(input: &str) -> Result<NormalizedName> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidName("name is empty".to_string()));
    }

    // Dot lookalikes fold to '.' under NFKC, so they are caught on the raw input.
    if let Some(c) = trimmed
        .chars()
        .find(|&c| CONFUSABLES.contains(&c) || is_bidi_control(c))
    {
        return Err(confusable(c));
    }

    // Lowercasing can produce decomposed sequences (e.g. U+0130), so
    // normalize again afterwards.
    let folded: String = trimmed
        .chars()
        .filter(|&c| c != EMOJI_PRESENTATION)
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .nfkc()
        .collect();

    let chars: Vec<char> = folded.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        check_char(c, chars.get(i.wrapping_sub(1)).copied(), chars.get(i + 1).copied())?;
    }

    for label in folded.split('.') {
        check_label(label, &folded)?;
    }

    Ok(NormalizedName(folded))
}

fn check_char(c: char, prev: Option<char>, next: Option<char>) -> Result<()> {
    if c.is_control() {
        return Err(Error::InvalidName(format!(
            "control character U+{:04X}",
            c as u32
        )));
    }
    if c.is_whitespace() {
        return Err(Error::InvalidName(format!(
            "whitespace U+{:04X} inside name",
            c as u32
        )));
    }
    if c == ZERO_WIDTH_JOINER {
        // only valid inside emoji sequences
        let joins_emoji = prev.is_some_and(is_emoji) && next.is_some_and(is_emoji);
        if !joins_emoji {
            return Err(Error::InvalidName(
                "zero width joiner outside emoji sequence".to_string(),
            ));
        }
        return Ok(());
    }
    if CONFUSABLES.contains(&c) || is_bidi_control(c) {
        return Err(confusable(c));
    }
    if c == '.' || c == '-' || c == '_' || c == '$' {
        return Ok(());
    }
    if c.is_alphanumeric() || is_combining_mark(c) || is_emoji(c) {
        return Ok(());
    }
    Err(Error::InvalidName(format!(
        "disallowed character '{}' (U+{:04X})",
        c, c as u32
    )))
}

fn confusable(c: char) -> Error {
    Error::InvalidName(format!(
        "confusable or invisible character U+{:04X}",
        c as u32
    ))
}

fn check_label(label: &str, name: &str) -> Result<()> {
    if label.is_empty() {
        return Err(Error::InvalidName(format!("empty label in '{}'", name)));
    }
    if label.len() > MAX_LABEL_BYTES {
        return Err(Error::InvalidName(format!(
            "label exceeds {} bytes",
            MAX_LABEL_BYTES
        )));
    }

    let mut chars = label.chars();
    if chars.next().is_some_and(is_combining_mark) {
        return Err(Error::InvalidName(format!(
            "label '{}' starts with a combining mark",
            label
        )));
    }

    // Underscores are only allowed as a leading run.
    let body = label.trim_start_matches('_');
    if body.contains('_') {
        return Err(Error::InvalidName(format!(
            "underscore allowed only at start of label '{}'",
            label
        )));
    }

    // Reserved for label extensions such as punycode ("xn--").
    let bytes = label.as_bytes();
    if label.is_ascii() && bytes.len() >= 4 && bytes[2] == b'-' && bytes[3] == b'-' {
        return Err(Error::InvalidName(format!(
            "label '{}' has hyphens in third and fourth position",
            label
        )));
    }

    check_scripts(label)
}

/// Reject labels mixing scripts, e.g. Latin with a Cyrillic lookalike
fn check_scripts(label: &str) -> Result<()> {
    let mut scripts: Vec<Script> = Vec::new();
    for c in label.chars() {
        let script = c.script();
        if matches!(script, Script::Common | Script::Inherited | Script::Unknown) {
            continue;
        }
        if !scripts.contains(&script) {
            scripts.push(script);
        }
    }

    if scripts.len() <= 1
        || SCRIPT_GROUPS
            .iter()
            .any(|group| scripts.iter().all(|script| group.contains(script)))
    {
        return Ok(());
    }

    let names: Vec<&str> = scripts.iter().map(|script| script.full_name()).collect();
    Err(Error::InvalidName(format!(
        "label '{}' mixes scripts: {}",
        label,
        names.join(", ")
    )))
}

fn is_bidi_control(c: char) -> bool {
    matches!(c, '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' | '\u{061C}')
}

fn is_emoji(c: char) -> bool {
    matches!(
        c,
        '\u{00A9}'
            | '\u{00AE}'
            | '\u{203C}'
            | '\u{2049}'
            | '\u{2122}'
            | '\u{2139}'
            | '\u{2194}'..='\u{21AA}'
            | '\u{231A}'..='\u{23FF}'
            | '\u{24C2}'
            | '\u{25AA}'..='\u{25FE}'
            | '\u{2600}'..='\u{27BF}'
            | '\u{2934}'..='\u{2935}'
            | '\u{2B05}'..='\u{2B55}'
            | '\u{3030}'
            | '\u{303D}'
            | '\u{3297}'
            | '\u{3299}'
            | '\u{1F000}'..='\u{1FAFF}'
    )
}
