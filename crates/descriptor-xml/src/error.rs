use thiserror::Error;

/// Rule violations raised while constructing a value object.
///
/// A value object that fails one of these checks is never returned, so a tree
/// that exists is a tree that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// A required attribute was absent or blank.
    #[error("missing required attribute '{attribute}' on <{element}>")]
    MissingRequiredAttribute { attribute: String, element: String },
    /// A required child element was absent or blank.
    #[error("missing required element <{element}> in <{owner}>")]
    MissingRequiredElement { element: String, owner: String },
    /// A numeric field that must be zero or positive was negative.
    #[error("<{element}> must not be negative")]
    InvalidNegativeValue { element: String },
    /// Two related numeric fields disagree.
    #[error("invalid range for <{element}>: {reason}")]
    InvalidRange { element: String, reason: String },
    /// A name that must be unique within its parent appeared twice.
    #[error("duplicate <{element}> named '{name}'")]
    DuplicateName { element: String, name: String },
    /// An extension point failed its own checks.
    #[error("invalid <{tag}>: {source}")]
    InvalidTag {
        tag: String,
        source: Box<ValidateError>,
    },
}

impl ValidateError {
    pub fn missing_attribute(attribute: &str, element: &str) -> Self {
        ValidateError::MissingRequiredAttribute {
            attribute: attribute.to_string(),
            element: element.to_string(),
        }
    }

    pub fn missing_element(element: &str, owner: &str) -> Self {
        ValidateError::MissingRequiredElement {
            element: element.to_string(),
            owner: owner.to_string(),
        }
    }

    pub fn negative(element: &str) -> Self {
        ValidateError::InvalidNegativeValue {
            element: element.to_string(),
        }
    }

    /// Wrap the error with the tag of the extension point that owns it.
    pub fn within(self, tag: &str) -> Self {
        ValidateError::InvalidTag {
            tag: tag.to_string(),
            source: Box::new(self),
        }
    }

    /// Name of the attribute or element that triggered the error.
    pub fn offending_name(&self) -> &str {
        match self {
            ValidateError::MissingRequiredAttribute { attribute, .. } => attribute,
            ValidateError::MissingRequiredElement { element, .. }
            | ValidateError::InvalidNegativeValue { element }
            | ValidateError::InvalidRange { element, .. }
            | ValidateError::DuplicateName { element, .. } => element,
            ValidateError::InvalidTag { source, .. } => source.offending_name(),
        }
    }
}

/// Error type produced while reading a descriptor document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input is not well-formed XML.
    #[error("malformed document: {0}")]
    Malformed(String),
    /// An element appeared where its parent does not allow it.
    #[error("unexpected element <{0}>")]
    UnexpectedElement(String),
    /// An end tag did not belong to the element being read.
    #[error("unexpected end tag </{0}>")]
    UnexpectedEndTag(String),
    /// The stream ended while an element was still open.
    #[error("unexpected end of document")]
    UnexpectedEndOfDocument,
    /// An attribute the element does not declare.
    #[error("unexpected attribute '{attribute}' on <{element}>")]
    UnexpectedAttribute { attribute: String, element: String },
    /// Text that could not be coerced to the declared type.
    #[error("invalid value {value:?} for {name}: expected {expected}")]
    InvalidValue {
        name: String,
        value: String,
        expected: &'static str,
    },
    /// The root element does not belong to any supported dialect.
    #[error("unsupported descriptor root <{0}>")]
    UnsupportedDialect(String),
    #[error(transparent)]
    Validate(#[from] ValidateError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub fn invalid_value(name: &str, value: &str, expected: &'static str) -> Self {
        ParseError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            expected,
        }
    }

    /// Tag or attribute name locating the defect, when one is known.
    pub fn offending_name(&self) -> Option<&str> {
        match self {
            ParseError::UnexpectedElement(name)
            | ParseError::UnexpectedEndTag(name)
            | ParseError::UnsupportedDialect(name) => Some(name),
            ParseError::UnexpectedAttribute { attribute, .. } => Some(attribute),
            ParseError::InvalidValue { name, .. } => Some(name),
            ParseError::Validate(err) => Some(err.offending_name()),
            ParseError::Malformed(_) | ParseError::UnexpectedEndOfDocument | ParseError::Io(_) => {
                None
            }
        }
    }
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(io) => ParseError::Io(std::io::Error::new(io.kind(), io.to_string())),
            other => ParseError::Malformed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_error_reports_inner_name() {
        let err = ValidateError::missing_attribute("class-name", "exception-sorter")
            .within("exception-sorter");
        assert_eq!(err.offending_name(), "class-name");
        assert!(err.to_string().contains("<exception-sorter>"));
    }

    #[test]
    fn parse_error_exposes_validation_name() {
        let err = ParseError::from(ValidateError::negative("query-timeout"));
        assert_eq!(err.offending_name(), Some("query-timeout"));
        assert!(ParseError::UnexpectedEndOfDocument.offending_name().is_none());
    }
}
