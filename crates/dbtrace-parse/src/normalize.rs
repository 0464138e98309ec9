//! Statement normalization for duplicate detection.

use regex::Regex;
use std::sync::LazyLock;

/// Single-quoted string literal, e.g. `'SENT'`.
static QUOTED_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'[^']*'").unwrap());

/// Standalone numeric literal, integer or decimal. Digits inside identifiers
/// (`tbl_2`, `id1_34_`) have no word boundary around them and are untouched.
static NUMERIC_LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").unwrap());

static WHITESPACE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Fold a statement into its duplicate-detection key: literals become `?`,
/// whitespace runs collapse to one space, the result is trimmed and
/// lowercased.
///
/// `?` is also the JDBC bind marker, so a logged prepared statement and the
/// same statement with inlined literals produce the same key. Applying the
/// fold to an already-folded key changes nothing.
pub fn normalize_statement(statement: &str) -> String {
    let folded = QUOTED_LITERAL_REGEX.replace_all(statement, "?");
    let folded = NUMERIC_LITERAL_REGEX.replace_all(&folded, "?");
    let folded = WHITESPACE_RUN_REGEX.replace_all(&folded, " ");
    folded.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_literals_fold_to_placeholder() {
        assert_eq!(
            normalize_statement("SELECT * FROM orders WHERE id = 42"),
            "select * from orders where id = ?"
        );
        assert_eq!(
            normalize_statement("select * from orders where id = 7"),
            "select * from orders where id = ?"
        );
    }

    #[test]
    fn test_decimals_fold_as_one_literal() {
        assert_eq!(
            normalize_statement("select * from rates where fee > 0.25"),
            "select * from rates where fee > ?"
        );
    }

    #[test]
    fn test_quoted_literals_fold_to_placeholder() {
        let a = normalize_statement("update orders set status = 'SENT' where id = 1");
        let b = normalize_statement("update orders set status = 'OPEN' where id = 2");
        assert_eq!(a, b);
        assert_eq!(a, "update orders set status = ? where id = ?");
    }

    #[test]
    fn test_bind_markers_and_inlined_literals_collide() {
        assert_eq!(
            normalize_statement("select * from users where id = ?"),
            normalize_statement("select * from users where id = 42")
        );
    }

    #[test]
    fn test_whitespace_and_case_fold() {
        assert_eq!(
            normalize_statement("  SELECT *\n    FROM   orders  "),
            "select * from orders"
        );
    }

    #[test]
    fn test_identifier_digits_survive() {
        assert_eq!(
            normalize_statement("select t1.col_2 from audit_2024 t1"),
            "select t1.col_2 from audit_2024 t1"
        );
    }

    #[test]
    fn test_structurally_different_statements_stay_apart() {
        assert_ne!(
            normalize_statement("select id from orders"),
            normalize_statement("select id from users")
        );
    }

    #[test]
    fn test_fold_is_idempotent() {
        let once = normalize_statement("SELECT * FROM orders WHERE id = 42 AND tag = 'x'");
        assert_eq!(normalize_statement(&once), once);
    }
}
