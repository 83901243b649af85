//! Identifier quoting and mangling between dialects.
//!
//! A quoted identifier is recognised by its delimiter pair alone, whatever
//! dialect it came from: `` `name` ``, `[name]` and `"name"` all carry the
//! inner text `name`. Mangling strips the source delimiters and applies the
//! target dialect's pair, so re-mangling an already mangled identifier never
//! nests quotes.

use alloc::borrow::Cow;
use alloc::string::String;

use crate::dialect::Dialect;

/// The closing delimiter if `s` is wrapped in a recognised delimiter pair.
fn closing_delimiter(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    match (first, last) {
        ('`', '`') | ('"', '"') | ('[', ']') => Some(last),
        _ => None,
    }
}

/// Whether the identifier is wrapped in backticks, brackets or double quotes.
#[must_use]
pub fn is_quoted(s: &str) -> bool {
    closing_delimiter(s).is_some()
}

/// The inner text of an identifier.
///
/// Quoted identifiers lose their delimiters and have doubled closing
/// delimiters collapsed; unquoted identifiers are returned unchanged.
#[must_use]
pub fn unquote(s: &str) -> Cow<'_, str> {
    let Some(close) = closing_delimiter(s) else {
        return Cow::Borrowed(s);
    };
    // All delimiters are single ASCII bytes.
    let inner = &s[1..s.len() - 1];
    let doubled: String = [close, close].iter().collect();
    if inner.contains(doubled.as_str()) {
        Cow::Owned(inner.replace(doubled.as_str(), &doubled[..1]))
    } else {
        Cow::Borrowed(inner)
    }
}

/// Wrap inner text in the dialect's delimiters, doubling any closing delimiter.
#[must_use]
pub fn quote(inner: &str, dialect: Dialect) -> String {
    let (open, close) = dialect.quote_pair();
    let mut quoted = String::with_capacity(inner.len() + 2);
    quoted.push(open);
    for c in inner.chars() {
        if c == close {
            quoted.push(close);
        }
        quoted.push(c);
    }
    quoted.push(close);
    quoted
}

/// Re-quote an identifier for the target dialect.
///
/// Quoted identifiers get the target's delimiters around their inner text;
/// unquoted identifiers pass through unchanged.
#[must_use]
pub fn mangle(s: &str, dialect: Dialect) -> Cow<'_, str> {
    if is_quoted(s) {
        Cow::Owned(quote(&unquote(s), dialect))
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "plain",
        "`Foo`",
        "[Bar]",
        "\"Baz\"",
        "\"a\"\"b\"",
        "`a``b`",
        "[a]]b]",
        "[odd`name]",
        "\"with space\"",
        "`",
        "\"\"",
        "[]",
    ];

    #[test]
    fn test_is_quoted() {
        assert!(is_quoted("`a`"));
        assert!(is_quoted("[a]"));
        assert!(is_quoted("\"a\""));
        assert!(!is_quoted("a"));
        assert!(!is_quoted("`a\""));
        assert!(!is_quoted("]a["));
        assert!(!is_quoted("`"));
        assert!(!is_quoted(""));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("`Foo`"), "Foo");
        assert_eq!(unquote("\"a\"\"b\""), "a\"b");
        assert_eq!(unquote("[a]]b]"), "a]b");
        assert_eq!(unquote("[]"), "");
    }

    #[test]
    fn test_mangle_per_dialect() {
        assert_eq!(mangle("`Foo`", Dialect::MySql), "`Foo`");
        assert_eq!(mangle("`Foo`", Dialect::PostgreSql), "\"Foo\"");
        assert_eq!(mangle("`Foo`", Dialect::Sqlite), "[Foo]");
        assert_eq!(mangle("[Bar]", Dialect::PostgreSql), "\"Bar\"");
        assert_eq!(mangle("\"Baz\"", Dialect::MySql), "`Baz`");
        assert_eq!(mangle("plain", Dialect::PostgreSql), "plain");
    }

    #[test]
    fn test_mangle_escapes_target_delimiter() {
        assert_eq!(mangle("[a\"b]", Dialect::PostgreSql), "\"a\"\"b\"");
        assert_eq!(mangle("\"a]b\"", Dialect::Sqlite), "[a]]b]");
        assert_eq!(mangle("\"a\"\"b\"", Dialect::MySql), "`a\"b`");
    }

    #[test]
    fn test_mangle_composes_through_remangling() {
        for sample in SAMPLES {
            for first in Dialect::ALL {
                for second in Dialect::ALL {
                    let once = mangle(sample, first);
                    assert_eq!(
                        mangle(&once, second),
                        mangle(sample, second),
                        "{sample} via {first} to {second}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_quote_unquote_are_inverse() {
        for inner in ["", "x", "a`b", "a\"\"b", "]]", "[x]"] {
            for dialect in Dialect::ALL {
                assert_eq!(unquote(&quote(inner, dialect)), inner);
            }
        }
    }
}
