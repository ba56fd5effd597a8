//! Shell argument escaping.

/// Whether `c` must be preceded by a backslash on a shell command line.
///
/// Characters from `,` to `z` are safe apart from `< = > ? [ \ ] ^` and the
/// backtick. Everything outside that range is escaped.
fn needs_escape(c: char) -> bool {
    match c {
        '<' | '=' | '>' | '?' | '[' | '\\' | ']' | '^' | '`' => true,
        ','..='z' => false,
        _ => true,
    }
}

/// Escape `s` for use as a single `/bin/sh` word.
pub fn shell_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if needs_escape(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
