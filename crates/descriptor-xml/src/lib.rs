#![cfg_attr(docsrs, feature(doc_cfg))]
//! Streaming XML plumbing shared by the JCA descriptor dialects.
//!
//! Element builders in the dialect crates pull structural events from an
//! [`EventReader`], resolve names through a [`TagSet`], coerce scalar text and
//! hand the collected values to validating constructors. [`XmlWriter`] renders
//! the resulting trees back to canonical XML.

mod coerce;
pub mod common;
mod error;
mod expr;
mod reader;
mod tags;
mod writer;

pub use coerce::{non_blank, parse_bool, parse_bool_attr, parse_i32, parse_i64};
pub use common::{
    parse_capacity, parse_credential, parse_extension, parse_named_property, parse_recovery,
    write_properties, Capacity, Credential, Extension, FlushStrategy, Properties, Recovery,
};
pub use error::{ParseError, ValidateError};
pub use expr::{substitute, substitute_with, ParserOptions};
pub use reader::{EventReader, StartTag, XmlEvent};
pub use tags::{names_are_unique, TagSet};
pub use writer::{Attrs, ToXml, XmlWriter};

/// Require `value` to be zero or positive when present.
pub fn check_non_negative<T>(element: &str, value: Option<T>) -> Result<(), ValidateError>
where
    T: PartialOrd + Default,
{
    match value {
        Some(value) if value < T::default() => Err(ValidateError::negative(element)),
        _ => Ok(()),
    }
}

/// Require `value` to be present and non-blank.
pub fn require_element<'a>(
    value: Option<&'a str>,
    element: &str,
    owner: &str,
) -> Result<&'a str, ValidateError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ValidateError::missing_element(element, owner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_accepts_zero_and_absent() {
        assert!(check_non_negative("query-timeout", Some(0i64)).is_ok());
        assert!(check_non_negative::<i64>("query-timeout", None).is_ok());
        let err = check_non_negative("query-timeout", Some(-1i64)).expect_err("negative");
        assert_eq!(err, ValidateError::negative("query-timeout"));
    }

    #[test]
    fn blank_required_element_is_missing() {
        let err = require_element(Some("  "), "connection-url", "datasource").expect_err("blank");
        assert!(matches!(err, ValidateError::MissingRequiredElement { ref element, .. } if element == "connection-url"));
        assert_eq!(require_element(Some("x"), "a", "b").expect("present"), "x");
    }
}
