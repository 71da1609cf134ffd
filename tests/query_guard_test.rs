//! Integration tests for the read-only statement guard.
//!
//! These tests verify that the query tool's allow-list accepts every
//! read-only prefix regardless of case and leading whitespace, and rejects
//! everything else.

use mysql_mcp_server::error::GatewayError;
use mysql_mcp_server::tools::{Verdict, classify, ensure_readonly};

/// Every allowed keyword passes in upper, lower, and mixed case.
#[test]
fn test_allowed_keywords_all_casings() {
    let statements = [
        "SELECT 1",
        "select id FROM users",
        "SeLeCt now()",
        "SHOW TABLES",
        "show columns from t",
        "EXPLAIN SELECT * FROM t",
        "explain format=json select 1",
        "DESCRIBE users",
        "describe `weird table`",
    ];
    for sql in statements {
        assert_eq!(classify(sql), Verdict::Allowed, "should allow: {}", sql);
    }
}

/// Arbitrary leading whitespace does not affect classification.
#[test]
fn test_leading_whitespace_forms() {
    for sql in ["  SELECT 1", "\tSHOW TABLES", "\n\n  explain select 1", "\r\nDESCRIBE t"] {
        assert_eq!(classify(sql), Verdict::Allowed, "should allow: {:?}", sql);
    }
}

/// Statements whose trimmed, lower-cased form does not start with an allowed
/// keyword are rejected.
#[test]
fn test_rejected_statements() {
    let statements = [
        "INSERT INTO t VALUES (1)",
        "UPDATE t SET a = 1",
        "DELETE FROM t",
        "REPLACE INTO t VALUES (1)",
        "DROP TABLE t",
        "CREATE TABLE t (id INT)",
        "ALTER TABLE t ADD COLUMN x INT",
        "TRUNCATE TABLE t",
        "GRANT SELECT ON *.* TO 'x'",
        "SET @a = 1",
        "CALL cleanup()",
        "BEGIN",
        "",
        "   ",
    ];
    for sql in statements {
        assert_eq!(classify(sql), Verdict::Rejected, "should reject: {}", sql);
    }
}

/// A write wrapped in a leading comment is rejected, but only because the
/// prefix is the comment opener - the guard does not parse comments.
#[test]
fn test_comment_wrapped_write_rejected_by_prefix() {
    assert_eq!(classify("/*x*/ DROP TABLE t"), Verdict::Rejected);
    assert_eq!(classify("-- note\nDELETE FROM t"), Verdict::Rejected);
}

/// The guard converts rejections into the fixed policy refusal.
#[test]
fn test_refusal_message_is_stable() {
    let err = ensure_readonly("DROP TABLE t").unwrap_err();
    assert!(matches!(err, GatewayError::Policy));
    assert_eq!(
        err.to_string(),
        "Only SELECT, SHOW, EXPLAIN and DESCRIBE queries are allowed"
    );
}
