//! Scalar coercion of raw attribute and element text.

use crate::error::ParseError;

/// Coerce element text to a boolean.
///
/// An empty element (`<prefill/>`) means `true`; otherwise `true`/`false`
/// in any letter case.
pub fn parse_bool(name: &str, raw: &str) -> Result<bool, ParseError> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParseError::invalid_value(name, raw, "true or false"))
    }
}

/// Coerce a present attribute value to a boolean.
///
/// Unlike element text, a blank attribute (`enabled=""`) means `false`.
pub fn parse_bool_attr(name: &str, raw: &str) -> Result<bool, ParseError> {
    if raw.trim().is_empty() {
        return Ok(false);
    }
    parse_bool(name, raw)
}

pub fn parse_i32(name: &str, raw: &str) -> Result<i32, ParseError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ParseError::invalid_value(name, raw, "a valid number"))
}

pub fn parse_i64(name: &str, raw: &str) -> Result<i64, ParseError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ParseError::invalid_value(name, raw, "a valid number"))
}

/// `None` for blank text, otherwise the trimmed text.
pub fn non_blank(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_accept_empty_and_any_case() {
        assert!(parse_bool("prefill", "").expect("empty"));
        assert!(parse_bool("prefill", " TRUE ").expect("upper"));
        assert!(!parse_bool("prefill", "False").expect("mixed"));
        let err = parse_bool("prefill", "yes").expect_err("yes is not a boolean");
        assert!(matches!(err, ParseError::InvalidValue { ref name, .. } if name == "prefill"));
    }

    #[test]
    fn blank_attribute_is_false() {
        assert!(!parse_bool_attr("enabled", "").expect("blank"));
        assert!(!parse_bool_attr("enabled", "  ").expect("whitespace"));
        assert!(parse_bool_attr("spy", "TRUE").expect("explicit"));
        assert!(parse_bool_attr("spy", "on").is_err());
    }

    #[test]
    fn numbers_name_the_element() {
        assert_eq!(parse_i32("max-pool-size", " 20 ").expect("number"), 20);
        assert_eq!(parse_i64("idle-timeout-minutes", "-3").expect("negative"), -3);
        let err = parse_i32("max-pool-size", "twenty").expect_err("word");
        assert_eq!(err.offending_name(), Some("max-pool-size"));
    }
}
