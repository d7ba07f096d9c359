//! Plain wordlists and rainbow wordlists.
//!
//! A rainbow wordlist precomputes everything a short name scanner needs to match
//! a discovered short name against a word: the checksums of the long name and its
//! 8.3 components. The format is line based:
//!
//! ```text
//! #SHORTSCAN#
//! 2EF5 D2D5	index	html	INDEX	HTM
//! ```
//!
//! Each row holds the checksums (space separated, modern first), the long
//! filename and extension, then the 8.3 base and extension, separated by tabs.

use crate::checksum::{checksums, format_checksum};
use crate::error::{Error, Result};
use crate::shortname::{ShortParts, split_name};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// First line of every rainbow wordlist.
pub const RAINBOW_HEADER: &str = "#SHORTSCAN#";

const FIELD_COUNT: usize = 5;

/// One rainbow wordlist row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RainbowRecord {
    /// Four digit uppercase hex checksums of the long name.
    pub checksums: Vec<String>,
    /// Long filename without its extension.
    pub filename: String,
    /// Long extension, empty when there is none.
    pub extension: String,
    /// 8.3 base, at most six characters.
    pub filename83: String,
    /// 8.3 extension, at most three characters.
    pub extension83: String,
}

impl RainbowRecord {
    /// Compute the record for one word.
    ///
    /// Returns `None` for words that cannot be written as a row (embedded tabs)
    /// or that leave nothing for a short name base, such as `...`.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        if word.contains('\t') {
            return None;
        }

        let parts = ShortParts::from_name(word);
        if parts.base.is_empty() {
            return None;
        }

        let (filename, extension) = split_name(word);
        Some(Self {
            checksums: checksums(word).into_iter().map(format_checksum).collect(),
            filename: filename.to_string(),
            extension: extension.to_string(),
            filename83: parts.base,
            extension83: parts.extension,
        })
    }

    /// Parse a rainbow row. `line` is the 1-indexed line number used in errors.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the row does not have exactly five tab separated fields
    /// or a checksum is not four hex digits.
    pub fn parse_line(row: &str, line: usize) -> Result<Self> {
        let fields: Vec<&str> = row.split('\t').collect();
        let [checksums, filename, extension, filename83, extension83] = fields.as_slice() else {
            return Err(Error::RainbowFormat {
                line,
                reason: format!(
                    "expected {FIELD_COUNT} tab-separated fields, found {}",
                    fields.len()
                ),
            });
        };

        let checksums: Vec<String> = checksums
            .split(' ')
            .map(str::to_ascii_uppercase)
            .collect();
        if let Some(bad) = checksums
            .iter()
            .find(|c| c.len() != 4 || !c.chars().all(|ch| ch.is_ascii_hexdigit()))
        {
            return Err(Error::RainbowFormat {
                line,
                reason: format!("invalid checksum `{bad}`"),
            });
        }

        Ok(Self {
            checksums,
            filename: (*filename).to_string(),
            extension: (*extension).to_string(),
            filename83: (*filename83).to_string(),
            extension83: (*extension83).to_string(),
        })
    }

    /// Render the record as a rainbow row (without newline).
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.checksums.join(" "),
            self.filename,
            self.extension,
            self.filename83,
            self.extension83
        )
    }

    /// The long filename with its extension.
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.extension.is_empty() {
            self.filename.clone()
        } else {
            format!("{}.{}", self.filename, self.extension)
        }
    }
}

/// Open a wordlist for reading; `-` reads stdin.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Lines of `reader`, decoded lossily with any trailing `\r` stripped.
///
/// Lines are read one at a time; a read failure ends the stream with an
/// error naming `source`.
pub fn lines<'a>(
    reader: impl BufRead + 'a,
    source: &'a Path,
) -> impl Iterator<Item = Result<String>> + 'a {
    reader.split(b'\n').map(move |line| {
        line.map(|bytes| {
            String::from_utf8_lossy(&bytes)
                .trim_end_matches('\r')
                .to_string()
        })
        .map_err(|e| Error::Read {
            path: source.to_path_buf(),
            source: e,
        })
    })
}

/// Accumulates rainbow records from plain wordlist lines.
#[derive(Debug, Default)]
struct WordlistBuilder {
    seen: HashSet<String>,
    records: Vec<RainbowRecord>,
    skipped: usize,
    duplicates: usize,
}

impl WordlistBuilder {
    fn push(&mut self, line: &str) {
        let word = line.trim();
        if word.is_empty() || word.starts_with('#') {
            return;
        }
        if !self.seen.insert(word.to_string()) {
            self.duplicates += 1;
            return;
        }
        match RainbowRecord::from_word(word) {
            Some(record) => self.records.push(record),
            None => {
                tracing::debug!(word, "skipping word without a usable short name");
                self.skipped += 1;
            }
        }
    }

    fn finish(self) -> Vec<RainbowRecord> {
        tracing::info!(
            words = self.records.len(),
            skipped = self.skipped,
            duplicates = self.duplicates,
            "wordlist ingested"
        );
        self.records
    }
}

/// Turn plain wordlist lines into rainbow records.
///
/// Blank lines, `#` comments, duplicates and words without a usable short name
/// are skipped. Order of first appearance is kept.
pub fn records_from_words<I, S>(lines: I) -> Vec<RainbowRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = WordlistBuilder::default();
    for line in lines {
        builder.push(line.as_ref());
    }
    builder.finish()
}

/// Stream a plain wordlist from `reader` into rainbow records.
///
/// # Errors
///
/// Returns `Err` if reading fails.
pub fn read_words(reader: impl BufRead, source: &Path) -> Result<Vec<RainbowRecord>> {
    let mut builder = WordlistBuilder::default();
    for line in lines(reader, source) {
        builder.push(&line?);
    }
    Ok(builder.finish())
}

/// Parse rainbow rows that follow the header. Blank lines are ignored.
///
/// # Errors
///
/// Returns `Err` on the first unreadable or malformed row.
pub fn parse_rainbow<I, S>(rows: I) -> Result<Vec<RainbowRecord>>
where
    I: IntoIterator<Item = Result<S>>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    for (i, row) in rows.into_iter().enumerate() {
        let row = row?;
        if row.as_ref().trim().is_empty() {
            continue;
        }
        // Header is line 1, so rows start at line 2.
        records.push(RainbowRecord::parse_line(row.as_ref(), i + 2)?);
    }
    Ok(records)
}

/// Load records from either a rainbow wordlist or a plain one.
///
/// Files starting with [`RAINBOW_HEADER`] are parsed as rainbow rows; anything
/// else is treated as a plain wordlist and its records are computed.
///
/// # Errors
///
/// Returns `Err` if the input cannot be read or a rainbow row is malformed.
pub fn load_records(reader: impl BufRead, source: &Path) -> Result<Vec<RainbowRecord>> {
    let mut rows = lines(reader, source);
    let Some(first) = rows.next().transpose()? else {
        return Ok(records_from_words(std::iter::empty::<&str>()));
    };

    if first.trim() == RAINBOW_HEADER {
        let records = parse_rainbow(rows)?;
        tracing::info!(
            records = records.len(),
            source = %source.display(),
            "loaded rainbow wordlist"
        );
        return Ok(records);
    }

    tracing::debug!(source = %source.display(), "no rainbow header, computing records");
    let mut builder = WordlistBuilder::default();
    builder.push(&first);
    for line in rows {
        builder.push(&line?);
    }
    Ok(builder.finish())
}

/// Write records as a rainbow wordlist, header first.
///
/// # Errors
///
/// Returns `Err` if writing fails.
pub fn write_rainbow(records: &[RainbowRecord], mut out: impl Write) -> Result<()> {
    writeln!(out, "{RAINBOW_HEADER}")?;
    for record in records {
        writeln!(out, "{}", record.to_line())?;
    }
    out.flush()?;
    Ok(())
}
