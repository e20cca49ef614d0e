use log::trace;

/// Permissive integer parse for user-typed token values.
///
/// Leading/trailing whitespace is ignored, an optional sign is honoured and
/// the leading run of ASCII digits is taken (`"12abc"` -> 12, `"3.9"` -> 3).
/// Anything without digits, or that does not fit an `i64`, falls back to 0.
/// Never fails.
pub fn parse_value(raw: &str) -> i64 {
    let s = raw.trim();

    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];

    if digits.is_empty() {
        trace!("parse_value: no digits in {:?}, using 0", raw);
        return 0;
    }

    // sign is re-attached before parsing so i64::MIN stays representable
    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };

    match signed.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            trace!("parse_value: {:?} out of range, using 0", raw);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_basic() {
        assert_eq!(parse_value("5"), 5);
        assert_eq!(parse_value("-3"), -3);
        assert_eq!(parse_value("+4"), 4);
        assert_eq!(parse_value("0"), 0);
    }

    #[test]
    fn test_parse_value_fallback() {
        assert_eq!(parse_value("abc"), 0);
        assert_eq!(parse_value(""), 0);
        assert_eq!(parse_value("   "), 0);
        assert_eq!(parse_value("-"), 0);
        assert_eq!(parse_value("--1"), 0);
    }

    #[test]
    fn test_parse_value_prefix() {
        assert_eq!(parse_value("12abc"), 12);
        assert_eq!(parse_value("3.9"), 3);
        assert_eq!(parse_value("-7.2"), -7);
        assert_eq!(parse_value("  42  "), 42);
    }

    #[test]
    fn test_parse_value_range() {
        assert_eq!(parse_value("9223372036854775807"), i64::MAX);
        assert_eq!(parse_value("-9223372036854775808"), i64::MIN);
        assert_eq!(parse_value("9223372036854775808"), 0);
    }
}
