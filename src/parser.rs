//! Short name parser using pest
//!
//! Turns a short name reported by a scanner (`INDEX~1.HTM`, `in2ef5~1.htm`) into a
//! [`ShortName`], with readable errors for anything that is not a legal 8.3 name.

use crate::shortname::MAX_NAME_LEN;
use pest::Parser;
use pest_derive::Parser;
use std::fmt;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct ShortNameParser;

/// A parsed 8.3 short name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortName {
    /// Uppercase part before the last `~`. May itself contain `~`.
    pub base: String,
    /// Number after the `~`, starting at 1.
    pub index: u32,
    /// Uppercase extension, empty when the name has none.
    pub extension: String,
}

impl fmt::Display for ShortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.base, self.index)?;
        if !self.extension.is_empty() {
            write!(f, ".{}", self.extension)?;
        }
        Ok(())
    }
}

/// A short name that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message (no raw rule names).
    pub message: String,
    /// The normalised input that was parsed.
    pub input: String,
    /// Column number (1-indexed) where the error begins.
    pub col: usize,
}

impl ParseError {
    fn from_pest(error: &pest::error::Error<Rule>, input: &str) -> Self {
        let col = match error.line_col {
            pest::error::LineColLocation::Pos((_, c))
            | pest::error::LineColLocation::Span((_, c), _) => c,
        };

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => {
                friendly_message(positives)
            }
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
        };

        ParseError {
            message,
            input: input.to_string(),
            col,
        }
    }
}

/// Return a short, user-facing label for a grammar rule, or `None` to omit it.
fn rule_label(rule: Rule) -> Option<&'static str> {
    match rule {
        Rule::base => Some("base name (1 to 6 characters)"),
        Rule::index => Some("index after `~` (1 to 999999)"),
        Rule::extension => Some("extension (1 to 3 characters)"),
        Rule::EOI => Some("end of name"),
        _ => None,
    }
}

fn friendly_message(positives: &[Rule]) -> String {
    let named: Vec<&str> = positives.iter().copied().filter_map(rule_label).collect();

    match named.as_slice() {
        [] => "invalid short name".to_string(),
        [single] => format!("expected {single}"),
        [a, b] => format!("expected {a} or {b}"),
        many => match many.split_last() {
            Some((last, rest)) => format!("expected {} or {}", rest.join(", "), last),
            None => "invalid short name".to_string(),
        },
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;
        writeln!(f, "  --> {}", self.input)?;
        writeln!(f, "      {}^", " ".repeat(self.col.saturating_sub(1)))?;
        write!(f, "   = hint: short names look like `BASE~N.EXT`, e.g. `INDEX~1.HTM`")
    }
}

impl std::error::Error for ParseError {}

/// Parse a short name such as `INDEX~1.HTM`.
///
/// Input is trimmed and uppercased first.
///
/// # Errors
///
/// Returns `Err` if the input is not a legal short name:
/// - missing `~` or index, or an index starting with `0`
/// - characters outside the short name character set
/// - an extension longer than three characters
/// - a base, `~` and index together longer than eight characters
pub fn parse_short_name(input: &str) -> Result<ShortName, ParseError> {
    let normalized = input.trim().to_ascii_uppercase();
    let pairs = ShortNameParser::parse(Rule::short_name, &normalized)
        .map_err(|e| ParseError::from_pest(&e, &normalized))?;

    let mut base = "";
    let mut index = "";
    let mut extension = "";
    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::base => base = pair.as_str(),
            Rule::index => index = pair.as_str(),
            Rule::extension => extension = pair.as_str(),
            _ => {}
        }
    }

    let name_len = base.len() + 1 + index.len();
    if name_len > MAX_NAME_LEN {
        return Err(ParseError {
            message: format!(
                "`{base}~{index}` is {name_len} characters, short names allow {MAX_NAME_LEN} before the extension"
            ),
            input: normalized.clone(),
            col: 1,
        });
    }

    let index = index.parse::<u32>().map_err(|e| ParseError {
        message: format!("invalid index `{index}`: {e}"),
        input: normalized.clone(),
        col: base.len() + 2,
    })?;

    Ok(ShortName {
        base: base.to_string(),
        index,
        extension: extension.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::checksum::checksums;
    use crate::shortname::{ShortParts, checksum_name, tilde_name};

    #[test]
    fn test_parse_with_extension() {
        let name = parse_short_name("INDEX~1.HTM").unwrap();
        assert_eq!(name.base, "INDEX");
        assert_eq!(name.index, 1);
        assert_eq!(name.extension, "HTM");
    }

    #[test]
    fn test_parse_normalises_case_and_whitespace() {
        let name = parse_short_name("  index~2.asp\n").unwrap();
        assert_eq!(name.to_string(), "INDEX~2.ASP");
    }

    #[test]
    fn test_parse_without_extension() {
        let name = parse_short_name("HTACCE~1").unwrap();
        assert_eq!(name.base, "HTACCE");
        assert_eq!(name.extension, "");
        assert_eq!(name.to_string(), "HTACCE~1");
    }

    #[test]
    fn test_parse_multi_digit_index() {
        let name = parse_short_name("LONGF~10.TXT").unwrap();
        assert_eq!(name.base, "LONGF");
        assert_eq!(name.index, 10);
    }

    #[test]
    fn test_parse_special_characters() {
        let name = parse_short_name("A_B$(1~1.T-T").unwrap();
        assert_eq!(name.base, "A_B$(1");
        assert_eq!(name.extension, "T-T");
    }

    #[test]
    fn test_reject_malformed_names() {
        for input in [
            "",
            "INDEX.HTM",
            "INDEX~",
            "INDEX~0",
            "INDEX~1.HTML",
            "INDEX~1.",
            "TOOLONGNAME~1",
            "IN DEX~1",
            "INDEX~1~2",
            "ÉTÉ~1.TXT",
        ] {
            let err = parse_short_name(input).expect_err(input);
            assert!(err.col > 0, "col should be positive for `{input}`");
            assert!(
                !err.message.contains("Rule::"),
                "raw rule name in message for `{input}`: {}",
                err.message
            );
        }
    }

    #[test]
    fn test_reject_name_part_over_eight_characters() {
        let err = parse_short_name("ABCDEF~12").expect_err("nine characters");
        assert!(err.message.contains("9 characters"), "{}", err.message);

        assert!(parse_short_name("ABCDEFG~1").is_err());

        assert!(parse_short_name("ABCDE~12").is_ok());
        assert!(parse_short_name("ABCDEF~1").is_ok());
    }

    #[test]
    fn test_parse_base_containing_tilde() {
        let name = parse_short_name("AB~CDE~1.TXT").unwrap();
        assert_eq!(name.base, "AB~CDE");
        assert_eq!(name.index, 1);
        assert_eq!(name.extension, "TXT");

        let name = parse_short_name("A~12~3").unwrap();
        assert_eq!(name.base, "A~12");
        assert_eq!(name.index, 3);
        assert_eq!(name.extension, "");
    }

    #[test]
    fn test_parse_generated_names() {
        for word in ["ab~cdefgh.txt", "{x}~y.z", "a~b.txt", "ab~12.txt", "a.longext"] {
            let parts = ShortParts::from_name(word);
            for index in [1, 4, 12] {
                let mut generated = vec![tilde_name(&parts, index)];
                generated.extend(
                    checksums(word)
                        .into_iter()
                        .map(|checksum| checksum_name(&parts, checksum, index)),
                );
                for short in generated {
                    let parsed = parse_short_name(&short)
                        .unwrap_or_else(|e| panic!("`{short}` from `{word}` failed:\n{e}"));
                    assert_eq!(parsed.to_string(), short);
                    assert_eq!(parsed.index, index);
                }
            }
        }
    }

    #[test]
    fn test_display_points_at_error() {
        let err = parse_short_name("INDEX~X").expect_err("index must be numeric");
        let rendered = err.to_string();
        assert!(rendered.starts_with("error:"), "{rendered}");
        assert!(rendered.contains("--> INDEX~X"), "{rendered}");
        assert!(rendered.contains("            ^"), "{rendered}");
        assert!(rendered.contains("hint:"), "{rendered}");
    }
}
