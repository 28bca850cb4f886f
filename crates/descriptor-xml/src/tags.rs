//! Closed element and attribute vocabularies.

/// A closed set of local names with an `Unknown` fallback.
///
/// `resolve` never fails: callers decide whether an unknown name is fatal.
pub trait TagSet: Sized {
    /// Map a local name to its tag.
    fn resolve(local_name: &str) -> Self;
    /// Local name as written in the document.
    fn local_name(&self) -> &str;
    /// Every declared local name, in declaration order.
    fn names() -> &'static [&'static str];
    /// `true` for the fallback variant.
    fn is_unknown(&self) -> bool;
}

/// Declare a tag vocabulary as an enum implementing [`TagSet`].
///
/// ```
/// descriptor_xml::tag_set! {
///     /// Children of `<security>`.
///     pub enum SecurityTag {
///         UserName => "user-name",
///         Password => "password",
///     }
/// }
///
/// use descriptor_xml::TagSet;
/// assert_eq!(SecurityTag::resolve("password"), SecurityTag::Password);
/// assert!(SecurityTag::resolve("pasword").is_unknown());
/// ```
#[macro_export]
macro_rules! tag_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)+
            /// Name outside the vocabulary, kept for error messages.
            Unknown(String),
        }

        impl $crate::TagSet for $name {
            fn resolve(local_name: &str) -> Self {
                match local_name {
                    $($text => $name::$variant,)+
                    other => $name::Unknown(other.to_string()),
                }
            }

            fn local_name(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Unknown(raw) => raw.as_str(),
                }
            }

            fn names() -> &'static [&'static str] {
                &[$($text),+]
            }

            fn is_unknown(&self) -> bool {
                matches!(self, $name::Unknown(_))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::TagSet::local_name(self))
            }
        }
    };
}

/// `true` when no two tags of `T` share a local name.
pub fn names_are_unique<T: TagSet>() -> bool {
    let names = T::names();
    names
        .iter()
        .enumerate()
        .all(|(idx, name)| !names[idx + 1..].contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::tag_set! {
        enum Sample {
            First => "first",
            Second => "second-name",
        }
    }

    #[test]
    fn resolves_known_and_unknown() {
        assert_eq!(Sample::resolve("first"), Sample::First);
        assert_eq!(Sample::Second.local_name(), "second-name");
        let unknown = Sample::resolve("third");
        assert!(unknown.is_unknown());
        assert_eq!(unknown.to_string(), "third");
    }

    #[test]
    fn names_follow_declaration_order() {
        assert_eq!(Sample::names(), &["first", "second-name"]);
        assert!(names_are_unique::<Sample>());
    }
}
