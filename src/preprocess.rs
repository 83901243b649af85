//! Line-oriented normalization of SQL Server scripts.
//!
//! `sqlcmd`-style scripts separate batches with `GO` lines and often leave
//! `INSERT` statements unterminated. The statement splitter only knows `;`,
//! so both are rewritten before tokenizing.

use alloc::string::String;

/// Turn `GO` batch separators into `;` and terminate every line that starts
/// an `INSERT`.
#[must_use]
pub fn preprocess_mssql(src: &str) -> String {
    let mut out = String::with_capacity(src.len() + src.len() / 8);
    for line in src.lines() {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("GO") {
            out.push_str(";\n");
            continue;
        }
        out.push_str(line);
        out.push('\n');
        if trimmed
            .get(..6)
            .is_some_and(|head| head.eq_ignore_ascii_case("INSERT"))
        {
            out.push_str(";\n");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_becomes_terminator() {
        assert_eq!(
            preprocess_mssql("CREATE TABLE t (a INT)\nGO\n  go  \nSELECT 1"),
            "CREATE TABLE t (a INT)\n;\n;\nSELECT 1\n"
        );
    }

    #[test]
    fn test_insert_lines_are_terminated() {
        assert_eq!(
            preprocess_mssql("INSERT [dbo].[t] ([a]) VALUES (1)\r\ninsert into t values (2)\n"),
            "INSERT [dbo].[t] ([a]) VALUES (1)\n;\ninsert into t values (2)\n;\n"
        );
    }

    #[test]
    fn test_other_lines_pass_through() {
        assert_eq!(preprocess_mssql("GOTO x\nINS"), "GOTO x\nINS\n");
        assert_eq!(preprocess_mssql(""), "");
    }

    #[test]
    fn test_multibyte_prefix_does_not_split_chars() {
        assert_eq!(preprocess_mssql("\u{e9}\u{e9}\u{e9}x"), "\u{e9}\u{e9}\u{e9}x\n");
    }
}
