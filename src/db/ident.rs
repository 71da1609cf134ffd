//! Identifier quoting for statement construction.
//!
//! Table names arrive in positions where the wire protocol has no binding
//! channel (`SHOW COLUMNS FROM ?` is not valid SQL), so they must be
//! interpolated as quoted identifiers. This is the one place raw statement
//! text is assembled from caller input; everything else goes through
//! parameter binding.

/// Quote a name as a MySQL identifier: wrap in backticks, doubling any
/// embedded backtick. This is identifier quoting, not value escaping - the
/// result is only valid in identifier position.
pub fn quote_identifier(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('`');
    for ch in name.chars() {
        if ch == '`' {
            quoted.push('`');
        }
        quoted.push(ch);
    }
    quoted.push('`');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        assert_eq!(quote_identifier("orders"), "`orders`");
    }

    #[test]
    fn test_embedded_backtick_is_doubled() {
        assert_eq!(quote_identifier("or`ders"), "`or``ders`");
    }

    #[test]
    fn test_only_backticks() {
        assert_eq!(quote_identifier("``"), "``````");
    }

    #[test]
    fn test_injection_attempt_stays_inside_quotes() {
        let quoted = quote_identifier("x`; DROP TABLE y; --");
        assert_eq!(quoted, "`x``; DROP TABLE y; --`");
        // The payload's backtick is doubled, so the identifier never closes
        // early and the statement tail remains part of the name.
    }

    #[test]
    fn test_unicode_name() {
        assert_eq!(quote_identifier("注文"), "`注文`");
    }
}
