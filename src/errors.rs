//! Error management module.

use std::fmt;
use std::io;

use crate::events::Locator;

/// An error produced by an operation on an HTML stream.
///
/// Syntactic anomalies in the markup are *not* errors: the tokenizer
/// recovers from all of them and reports them through an
/// [`ErrorReporter`] instead. This type covers the failures that cannot
/// be recovered from inside the scanner.
#[derive(Debug)]
pub enum Error {
    /// An error originating from reading the underlying byte or
    /// character stream.
    Io(io::Error),
    /// Byte-order-mark detection was attempted twice on the same stream.
    EncodingDetectedTwice,
    /// A pushed input source carried no character stream.
    NoCharacterStream,
    /// An input source carried neither a byte nor a character stream.
    NoStream,
}

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => write!(f, "I/O error: {}", err),
            Error::EncodingDetectedTwice => {
                write!(f, "encoding detection performed twice on one stream")
            }
            Error::NoCharacterStream => {
                write!(f, "pushed input source has no character stream")
            }
            Error::NoStream => write!(f, "input source has neither bytes nor characters"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    #[inline]
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

/// A recoverable markup anomaly, identified by a stable diagnostic code.
///
/// Every variant maps to exactly one `HTML1000`..`HTML1012` code via
/// [`HtmlCode::code`]. The scanner keeps going after reporting any of
/// these.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HtmlCode {
    /// No encoding was declared; the configured default is in effect.
    DefaultEncodingUsed,
    /// An encoding name has no known decoder.
    UnknownEncoding,
    /// `<!` was not followed by `--`.
    InvalidBangMarkup,
    /// End of input immediately after `<`.
    EofAfterOpenBracket,
    /// An entity reference was interrupted before its closing `;`.
    MalformedEntityRef,
    /// A numeric character reference did not parse.
    MalformedCharRef,
    /// A named entity reference is not in the entity table.
    UnknownEntity,
    /// End of input inside markup, an attribute or a comment.
    UnexpectedEof,
    /// A processing instruction was skipped, not expanded.
    PiNotSupported,
    /// No element name after `<`.
    MissingElementName,
    /// The encoding declared in a `<meta>` tag is not supported.
    UnsupportedEncoding,
    /// No attribute name where one was expected.
    MissingAttributeName,
    /// No element name after `</`.
    MissingEndElementName,
}

impl HtmlCode {
    /// The stable diagnostic identifier, e.g. `"HTML1002"`.
    pub const fn code(self) -> &'static str {
        match self {
            HtmlCode::DefaultEncodingUsed => "HTML1000",
            HtmlCode::UnknownEncoding => "HTML1001",
            HtmlCode::InvalidBangMarkup => "HTML1002",
            HtmlCode::EofAfterOpenBracket => "HTML1003",
            HtmlCode::MalformedEntityRef => "HTML1004",
            HtmlCode::MalformedCharRef => "HTML1005",
            HtmlCode::UnknownEntity => "HTML1006",
            HtmlCode::UnexpectedEof => "HTML1007",
            HtmlCode::PiNotSupported => "HTML1008",
            HtmlCode::MissingElementName => "HTML1009",
            HtmlCode::UnsupportedEncoding => "HTML1010",
            HtmlCode::MissingAttributeName => "HTML1011",
            HtmlCode::MissingEndElementName => "HTML1012",
        }
    }
}

impl fmt::Display for HtmlCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match *self {
            HtmlCode::DefaultEncodingUsed => "no encoding declared, using default",
            HtmlCode::UnknownEncoding => "unknown encoding name",
            HtmlCode::InvalidBangMarkup => "'<!' is not followed by '--'",
            HtmlCode::EofAfterOpenBracket => "end of input after '<'",
            HtmlCode::MalformedEntityRef => "entity reference is missing its ';'",
            HtmlCode::MalformedCharRef => "malformed numeric character reference",
            HtmlCode::UnknownEntity => "unknown named entity",
            HtmlCode::UnexpectedEof => "end of input inside markup",
            HtmlCode::PiNotSupported => "processing instructions are not supported",
            HtmlCode::MissingElementName => "missing element name after '<'",
            HtmlCode::UnsupportedEncoding => "declared encoding is not supported",
            HtmlCode::MissingAttributeName => "missing attribute name",
            HtmlCode::MissingEndElementName => "missing element name after '</'",
        };
        write!(f, "[{}] {}", self.code(), message)
    }
}

/// Receiver for recoverable markup diagnostics.
///
/// The scanner invokes a reporter only when [`Config::report_errors`]
/// is set. `args` carries code-specific detail such as the offending
/// encoding or entity name; `locator` points at the current scan
/// position.
///
/// [`Config::report_errors`]: crate::Config::report_errors
pub trait ErrorReporter {
    /// A recoverable error; scanning continues after the report.
    fn report_error(&mut self, code: HtmlCode, args: &[&str], locator: &Locator);

    /// An advisory condition that does not affect the event stream.
    fn report_warning(&mut self, code: HtmlCode, args: &[&str], locator: &Locator);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn codes_are_stable() {
        assert_eq!(HtmlCode::DefaultEncodingUsed.code(), "HTML1000");
        assert_eq!(HtmlCode::InvalidBangMarkup.code(), "HTML1002");
        assert_eq!(HtmlCode::UnknownEntity.code(), "HTML1006");
        assert_eq!(HtmlCode::MissingEndElementName.code(), "HTML1012");
    }

    #[test]
    fn display_carries_the_code() {
        let rendered = HtmlCode::PiNotSupported.to_string();
        assert!(rendered.starts_with("[HTML1008]"));
    }
}
