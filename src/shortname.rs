//! 8.3 short name generation.
//!
//! Mirrors how NTFS derives a short name from a long one: split at the last dot,
//! map every character into the short name character set, truncate, and append
//! `~N`. Checksum names replace all but the first two base characters with the
//! four hex digits of a [`checksum`](crate::checksum).

use crate::checksum::format_checksum;

/// Longest base kept from a long name.
pub const MAX_BASE_LEN: usize = 6;
/// Longest extension in a short name.
pub const MAX_EXT_LEN: usize = 3;
/// Longest name part (base, `~` and index) in a short name.
pub const MAX_NAME_LEN: usize = 8;
/// Base characters kept in front of the checksum in a checksum name.
pub const CHECKSUM_PREFIX_LEN: usize = 2;

/// Punctuation allowed unchanged in short names.
const KEPT_SPECIALS: &[char] = &[
    '!', '#', '$', '%', '&', '\'', '(', ')', '-', '@', '^', '_', '`', '{', '}', '~',
];

/// The 8.3 components derived from a long filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortParts {
    /// Uppercase base, at most [`MAX_BASE_LEN`] characters.
    pub base: String,
    /// Uppercase extension, at most [`MAX_EXT_LEN`] characters.
    pub extension: String,
}

impl ShortParts {
    /// Derive the short name components of `filename`.
    #[must_use]
    pub fn from_name(filename: &str) -> Self {
        let (stem, extension) = split_name(filename);
        Self {
            base: map_chars(stem).take(MAX_BASE_LEN).collect(),
            extension: map_chars(extension).take(MAX_EXT_LEN).collect(),
        }
    }
}

/// Split a long filename into stem and extension at its last dot.
///
/// Leading dots never start an extension, so `.htaccess` has no extension.
#[must_use]
pub fn split_name(filename: &str) -> (&str, &str) {
    let leading = filename.len() - filename.trim_start_matches('.').len();
    match filename[leading..].rfind('.') {
        Some(pos) => {
            let dot = leading + pos;
            (&filename[..dot], &filename[dot + 1..])
        }
        None => (filename, ""),
    }
}

/// Whether NTFS would create a short name for `filename`.
///
/// Names that already satisfy 8.3 rules (case aside) keep their long name only.
#[must_use]
pub fn needs_short_name(filename: &str) -> bool {
    if filename.starts_with('.') {
        return true;
    }

    let (stem, extension) = split_name(filename);
    if stem.is_empty()
        || stem.contains('.')
        || stem.chars().count() > MAX_NAME_LEN
        || extension.chars().count() > MAX_EXT_LEN
    {
        return true;
    }

    !stem.chars().chain(extension.chars()).all(is_legal_char)
}

/// `BASE~N[.EXT]`, e.g. `INDEX~1.HTM`.
#[must_use]
pub fn tilde_name(parts: &ShortParts, index: u32) -> String {
    compose(&parts.base, index, &parts.extension)
}

/// `XXnnnn~N[.EXT]`, e.g. `IN2EF5~1.HTM`.
#[must_use]
pub fn checksum_name(parts: &ShortParts, checksum: u16, index: u32) -> String {
    let stem = checksum_stem(&parts.base, &format_checksum(checksum), index);
    compose(&stem, index, &parts.extension)
}

/// The part of a checksum name before `~N`: up to two base characters followed
/// by the hex checksum, cut to fit next to `~N`.
#[must_use]
pub fn checksum_stem(base: &str, checksum_hex: &str, index: u32) -> String {
    base.chars()
        .take(CHECKSUM_PREFIX_LEN)
        .chain(checksum_hex.chars())
        .take(stem_budget(index))
        .collect()
}

/// Characters of the name part left for the stem once `~N` is appended.
#[must_use]
pub fn stem_budget(index: u32) -> usize {
    let suffix_len = 1 + index.to_string().len();
    MAX_NAME_LEN.saturating_sub(suffix_len).min(MAX_BASE_LEN)
}

fn compose(stem: &str, index: u32, extension: &str) -> String {
    let mut name: String = stem.chars().take(stem_budget(index)).collect();
    name.push('~');
    name.push_str(&index.to_string());
    if !extension.is_empty() {
        name.push('.');
        name.push_str(extension);
    }
    name
}

fn map_chars(part: &str) -> impl Iterator<Item = char> + '_ {
    part.chars().filter_map(map_char)
}

/// Map one long name character into the short name set; `None` drops it.
fn map_char(c: char) -> Option<char> {
    match c {
        ' ' | '.' => None,
        c if c.is_ascii_alphanumeric() => Some(c.to_ascii_uppercase()),
        c if KEPT_SPECIALS.contains(&c) => Some(c),
        _ => Some('_'),
    }
}

fn is_legal_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || KEPT_SPECIALS.contains(&c)
}
