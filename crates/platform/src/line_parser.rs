//! Line-oriented key/value parsing.
//!
//! Release descriptors such as `/etc/lsb-release` and the output of
//! `sw_vers` or `lsb_release -a` are lists of `key<delim>value` lines:
//!
//! ```text
//! DISTRIB_ID=Ubuntu
//! DISTRIB_DESCRIPTION="Ubuntu 22.04.4 LTS"
//! ```

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Characters with the Unicode `Quotation_Mark` property.
const QUOTATION_MARKS: &[char] = &[
    '"', '\'', '\u{ab}', '\u{bb}', '\u{2018}', '\u{2019}', '\u{201a}', '\u{201b}', '\u{201c}',
    '\u{201d}', '\u{201e}', '\u{201f}', '\u{2039}', '\u{203a}', '\u{2e42}', '\u{300c}',
    '\u{300d}', '\u{300e}', '\u{300f}', '\u{301d}', '\u{301e}', '\u{301f}', '\u{fe41}',
    '\u{fe42}', '\u{fe43}', '\u{fe44}', '\u{ff02}', '\u{ff07}', '\u{ff62}', '\u{ff63}',
];

/// Parser for `key<delim>value` lines.
#[derive(Debug, Clone, Copy)]
pub struct LineParser {
    /// Separator between key and value; the first occurrence on a line wins
    pub delimiter: char,
    /// Trim surrounding whitespace from values
    pub trim_spaces: bool,
    /// Trim surrounding quotation marks from values (after whitespace)
    pub trim_quotes: bool,
}

impl LineParser {
    /// Parser with both trims enabled.
    #[must_use]
    pub const fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            trim_spaces: true,
            trim_quotes: true,
        }
    }

    /// Parse `input` into a key/value map.
    ///
    /// Keys are taken verbatim. Every line, blank ones included, must
    /// contain the delimiter and be newline-terminated.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` when a line lacks the delimiter or the input
    /// ends without a final newline.
    pub fn parse(&self, input: &str) -> Result<HashMap<String, String>> {
        let mut map = HashMap::new();
        let mut rest = input;

        while !rest.is_empty() {
            let Some(eol) = rest.find('\n') else {
                if !rest.contains(self.delimiter) {
                    return Err(Error::Parse("the delimiter is not found".into()));
                }
                return Err(Error::Parse("the end of line is not found".into()));
            };
            let line = &rest[..eol];
            rest = &rest[eol + 1..];

            let Some((key, value)) = line.split_once(self.delimiter) else {
                return Err(Error::Parse("the delimiter is not found".into()));
            };

            map.insert(key.to_string(), self.clean(value).to_string());
        }

        Ok(map)
    }

    fn clean<'a>(&self, mut value: &'a str) -> &'a str {
        if self.trim_spaces {
            value = value.trim();
        }
        if self.trim_quotes {
            value = value.trim_matches(QUOTATION_MARKS);
        }
        value
    }
}
