//! chmod-style permission modes.
//!
//! A mode is either absolute octal (`"644"`) or a comma-separated list of
//! symbolic clauses resolved against a base mode:
//!
//! ```text
//! mode   ::= clause [, clause ...]
//! clause ::= [who ...] [action ...] action
//! action ::= op [perm ...]
//! who    ::= a | u | g | o
//! op     ::= + | - | =
//! perm   ::= r | s | t | w | x | X | u | g | o
//! ```

use crate::error::{Error, Result};
use std::fmt;

const S_IFMT: u32 = 0o170_000;
const S_IFDIR: u32 = 0o040_000;
const S_ISUID: u32 = 0o4000;
const S_ISGID: u32 = 0o2000;
const S_ISVTX: u32 = 0o1000;

const PERM_BITS: u32 = 0o777;
const SPECIAL_BITS: u32 = S_ISUID | S_ISGID | S_ISVTX;

const WHO_USER: u32 = 0o700;
const WHO_GROUP: u32 = 0o070;
const WHO_OTHER: u32 = 0o007;
const WHO_ALL: u32 = 0o777;

/// A raw `st_mode` value: file type bits plus permission and special bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PermissionMode(pub u32);

impl PermissionMode {
    /// Mode of a directory with the given permission bits.
    #[must_use]
    pub const fn directory(bits: u32) -> Self {
        Self(S_IFDIR | bits)
    }

    /// Whether the file type bits describe a directory.
    #[must_use]
    pub const fn is_dir(self) -> bool {
        self.0 & S_IFMT == S_IFDIR
    }

    /// Permission plus setuid/setgid/sticky bits, without the file type.
    #[must_use]
    pub const fn permissions(self) -> u32 {
        self.0 & (PERM_BITS | SPECIAL_BITS)
    }

    #[must_use]
    pub const fn is_setuid(self) -> bool {
        self.0 & S_ISUID != 0
    }

    #[must_use]
    pub const fn is_setgid(self) -> bool {
        self.0 & S_ISGID != 0
    }

    #[must_use]
    pub const fn is_sticky(self) -> bool {
        self.0 & S_ISVTX != 0
    }
}

impl From<u32> for PermissionMode {
    fn from(mode: u32) -> Self {
        Self(mode)
    }
}

impl fmt::Display for PermissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.permissions())
    }
}

/// Resolve `spec` against `base`.
///
/// An absolute octal spec yields exactly the parsed value. A symbolic spec
/// replaces the low 12 bits of `base` and keeps everything above them.
///
/// # Errors
///
/// Returns `Error::Parse` for an empty spec, an invalid octal number, a
/// clause without an operator, or an unexpected character where an
/// operator, comma, or end of input is required.
pub fn parse_mode(spec: &str, base: PermissionMode) -> Result<PermissionMode> {
    match spec.as_bytes().first() {
        None => Err(Error::Parse("the mode, the mode is empty".into())),
        Some(c) if c.is_ascii_digit() => u32::from_str_radix(spec, 8)
            .map(PermissionMode)
            .map_err(|e| Error::Parse(format!("the mode {spec:?}, {e}"))),
        Some(_) => parse_symbolic(spec.as_bytes(), base),
    }
}

fn parse_symbolic(s: &[u8], base: PermissionMode) -> Result<PermissionMode> {
    let mut perm = base.0 & PERM_BITS;
    let mut sbits = base.0 & SPECIAL_BITS;
    let mut i = 0;

    while i < s.len() {
        let start = i;
        let mut who = 0;
        while let Some(c) = s.get(i) {
            who |= match c {
                b'u' => WHO_USER,
                b'g' => WHO_GROUP,
                b'o' => WHO_OTHER,
                b'a' => WHO_ALL,
                _ => break,
            };
            i += 1;
        }
        if i == start {
            who = WHO_ALL;
        }
        if i >= s.len() {
            return Err(Error::Parse("the mode, operator is not found".into()));
        }

        while i < s.len() {
            let op = s[i];
            if !matches!(op, b'-' | b'+' | b'=') {
                return Err(Error::Parse("the mode, invalid operator".into()));
            }
            i += 1;

            let mut bits = 0;
            let mut special = 0;
            match s.get(i) {
                Some(b'u') => {
                    bits = (perm & WHO_USER) >> 6;
                    i += 1;
                }
                Some(b'g') => {
                    bits = (perm & WHO_GROUP) >> 3;
                    i += 1;
                }
                Some(b'o') => {
                    bits = perm & WHO_OTHER;
                    i += 1;
                }
                _ => {
                    while let Some(c) = s.get(i) {
                        match c {
                            b'r' => bits |= 4,
                            b'w' => bits |= 2,
                            b'x' => bits |= 1,
                            b'X' if base.is_dir() => bits |= 1,
                            b'X' => {}
                            b's' => {
                                if who & WHO_USER != 0 {
                                    special |= S_ISUID;
                                }
                                if who & WHO_GROUP != 0 {
                                    special |= S_ISGID;
                                }
                            }
                            b't' => special |= S_ISVTX,
                            _ => break,
                        }
                        i += 1;
                    }
                }
            }
            let bits = bits << 6 | bits << 3 | bits;

            match op {
                b'-' => {
                    perm &= !(who & bits);
                    sbits &= !special;
                }
                b'+' => {
                    perm |= who & bits;
                    sbits |= special;
                }
                _ => {
                    perm = (perm & !who) | (who & bits);
                    sbits = special;
                }
            }

            if s.get(i) == Some(&b',') {
                i += 1;
                break;
            }
        }
    }

    Ok(PermissionMode(
        base.0 & !(PERM_BITS | SPECIAL_BITS) | sbits | perm,
    ))
}
