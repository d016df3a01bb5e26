//! Scanner configuration.

use std::fmt::Display;

/// Case transformation applied to element or attribute names before
/// they are delivered to the handler.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NameCase {
    /// Uppercase all names.
    Upper,
    /// Lowercase all names.
    Lower,
    /// Deliver names exactly as written in the source.
    #[default]
    Default,
}

impl NameCase {
    /// Parses a property value into a case mode.
    ///
    /// Any value is accepted: it is stringified and compared
    /// case-insensitively against `upper` and `lower`; everything else
    /// selects [`NameCase::Default`].
    pub fn from_property<T: Display>(value: T) -> Self {
        let value = value.to_string();
        if value.eq_ignore_ascii_case("upper") {
            NameCase::Upper
        } else if value.eq_ignore_ascii_case("lower") {
            NameCase::Lower
        } else {
            NameCase::Default
        }
    }

    /// Applies the transformation to a name.
    pub fn apply(self, name: &str) -> String {
        match self {
            NameCase::Upper => name.to_ascii_uppercase(),
            NameCase::Lower => name.to_ascii_lowercase(),
            NameCase::Default => name.to_string(),
        }
    }
}

/// User-defined settings that affect scanning. Immutable per parse.
#[derive(Clone, Debug)]
pub struct Config {
    /// Attach a source [`Location`] to every delivered event.
    ///
    /// Off by default.
    ///
    /// [`Location`]: crate::events::Location
    pub augmentations: bool,

    /// Deliver recoverable markup diagnostics to the configured
    /// [`ErrorReporter`].
    ///
    /// Off by default; without a reporter the flag has no effect.
    ///
    /// [`ErrorReporter`]: crate::ErrorReporter
    pub report_errors: bool,

    /// Wrap every resolved numeric character reference in a
    /// `start_general_entity` / `end_general_entity` pair.
    ///
    /// Off by default.
    pub notify_char_refs: bool,

    /// Wrap the five XML built-in references (`amp`, `lt`, `gt`,
    /// `quot`, `apos`) in general-entity boundary events.
    ///
    /// Off by default.
    pub notify_xml_builtin_refs: bool,

    /// Wrap every resolved named HTML reference in general-entity
    /// boundary events.
    ///
    /// Off by default.
    pub notify_html_builtin_refs: bool,

    /// Case transformation for element names.
    pub elem_names: NameCase,

    /// Case transformation for attribute names.
    pub attr_names: NameCase,

    /// Encoding label used when the document declares none and carries
    /// no byte order mark.
    ///
    /// Default: `windows-1252`.
    pub default_encoding: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            augmentations: false,
            report_errors: false,
            notify_char_refs: false,
            notify_xml_builtin_refs: false,
            notify_html_builtin_refs: false,
            elem_names: NameCase::Default,
            attr_names: NameCase::Default,
            default_encoding: "windows-1252".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn property_coercion() {
        assert_eq!(NameCase::from_property("upper"), NameCase::Upper);
        assert_eq!(NameCase::from_property("LOWER"), NameCase::Lower);
        assert_eq!(NameCase::from_property("default"), NameCase::Default);
        assert_eq!(NameCase::from_property(42), NameCase::Default);
        assert_eq!(NameCase::from_property(true), NameCase::Default);
    }

    #[test]
    fn apply() {
        assert_eq!(NameCase::Upper.apply("Script"), "SCRIPT");
        assert_eq!(NameCase::Lower.apply("Script"), "script");
        assert_eq!(NameCase::Default.apply("Script"), "Script");
    }
}
