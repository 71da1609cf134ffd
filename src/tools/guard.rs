//! SQL statement guard for read-only enforcement.
//!
//! A prefix allow-list, not a SQL parser: the statement is trimmed,
//! lower-cased, and checked against four leading keywords. That makes it a
//! best-effort guard rather than a security boundary - it does not see
//! through comment-wrapped keywords (`/*x*/ DROP ...` is rejected only
//! because its prefix is not on the list) and it does not split
//! multi-statement payloads. Run the server against a database account
//! without write grants for real enforcement.
//!
//! Rejected statements never reach the connection pool.

use crate::error::{GatewayError, GatewayResult};

/// Leading keywords that mark a statement as read-only.
pub const ALLOWED_PREFIXES: [&str; 4] = ["select", "show", "explain", "describe"];

/// Classification result for an inbound statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Rejected,
}

/// Classify a statement. Pure: no I/O, no state.
pub fn classify(sql: &str) -> Verdict {
    let normalized = sql.trim().to_lowercase();
    if ALLOWED_PREFIXES
        .iter()
        .any(|prefix| normalized.starts_with(prefix))
    {
        Verdict::Allowed
    } else {
        Verdict::Rejected
    }
}

/// Classify and convert a rejection into the policy error.
pub fn ensure_readonly(sql: &str) -> GatewayResult<()> {
    match classify(sql) {
        Verdict::Allowed => Ok(()),
        Verdict::Rejected => Err(GatewayError::Policy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_each_keyword() {
        assert_eq!(classify("SELECT * FROM users"), Verdict::Allowed);
        assert_eq!(classify("SHOW TABLES"), Verdict::Allowed);
        assert_eq!(classify("EXPLAIN SELECT 1"), Verdict::Allowed);
        assert_eq!(classify("DESCRIBE users"), Verdict::Allowed);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("select 1"), Verdict::Allowed);
        assert_eq!(classify("SeLeCt 1"), Verdict::Allowed);
        assert_eq!(classify("SHOW databases"), Verdict::Allowed);
    }

    #[test]
    fn test_leading_whitespace_ignored() {
        assert_eq!(classify("   \n\t SELECT 1"), Verdict::Allowed);
        assert_eq!(classify("\r\nDESCRIBE t"), Verdict::Allowed);
    }

    #[test]
    fn test_rejects_writes() {
        assert_eq!(classify("INSERT INTO t VALUES (1)"), Verdict::Rejected);
        assert_eq!(classify("UPDATE t SET a = 1"), Verdict::Rejected);
        assert_eq!(classify("DELETE FROM t"), Verdict::Rejected);
        assert_eq!(classify("DROP TABLE t"), Verdict::Rejected);
        assert_eq!(classify("TRUNCATE t"), Verdict::Rejected);
        assert_eq!(classify("CREATE TABLE t (id INT)"), Verdict::Rejected);
        assert_eq!(classify("GRANT ALL ON *.* TO 'x'"), Verdict::Rejected);
    }

    #[test]
    fn test_rejects_empty_and_garbage() {
        assert_eq!(classify(""), Verdict::Rejected);
        assert_eq!(classify("   "), Verdict::Rejected);
        assert_eq!(classify("-- comment"), Verdict::Rejected);
    }

    #[test]
    fn test_comment_prefixed_statement_is_rejected_by_prefix() {
        // Rejected because the prefix is "/*", not because the guard sees
        // the DROP inside. Prefix matching is the whole check.
        assert_eq!(classify("/*x*/ DROP TABLE t"), Verdict::Rejected);
    }

    #[test]
    fn test_multi_statement_payload_passes_prefix_check() {
        // Known limitation: the guard only inspects the leading keyword.
        assert_eq!(classify("SELECT 1; DROP TABLE t"), Verdict::Allowed);
    }

    #[test]
    fn test_ensure_readonly_maps_to_policy_error() {
        assert!(ensure_readonly("SELECT 1").is_ok());
        let err = ensure_readonly("DELETE FROM t").unwrap_err();
        assert!(matches!(err, GatewayError::Policy));
    }
}
