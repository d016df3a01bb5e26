//! Event payload types and the document handler interface.

use crate::input::InputSource;

/// A qualified name as delivered with element events.
///
/// This tokenizer performs no namespace processing: `uri` is always
/// absent and `local` equals `raw` (both carry the case-transformed
/// name).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QName {
    /// Namespace URI; always `None` here.
    pub uri: Option<String>,
    /// Local part of the name.
    pub local: String,
    /// The name as delivered, transformation applied.
    pub raw: String,
}

impl QName {
    pub(crate) fn set(&mut self, name: &str) {
        self.uri = None;
        self.local.clear();
        self.local.push_str(name);
        self.raw.clear();
        self.raw.push_str(name);
    }
}

/// Source span of one event: begin and end line/column, 1-based.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Location {
    /// Line of the first character of the construct.
    pub begin_line: u32,
    /// Column of the first character of the construct.
    pub begin_column: u32,
    /// Line just past the construct.
    pub end_line: u32,
    /// Column just past the construct.
    pub end_column: u32,
}

/// One attribute of a start tag.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Attribute {
    /// Attribute name, case transformation applied.
    pub name: QName,
    /// Attribute type; always `"CDATA"` in tag soup.
    pub kind: &'static str,
    /// Attribute value with entity references resolved where possible.
    pub value: String,
    /// Source span of the attribute, when augmentations are enabled.
    /// Unlike event locations this is a fresh allocation per attribute
    /// and safe to retain.
    pub location: Option<Location>,
}

/// The attributes of one start tag, in source order.
///
/// Duplicate names are preserved; both occurrences are delivered. The
/// collection is scanner scratch: copy anything you keep past the
/// callback.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    items: Vec<Attribute>,
}

impl Attributes {
    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the tag carried no attributes.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The attribute at `index`, in source order.
    pub fn get(&self, index: usize) -> Option<&Attribute> {
        self.items.get(index)
    }

    /// Iterates the attributes in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.items.iter()
    }

    /// The value of the first attribute whose name matches ASCII
    /// case-insensitively.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|a| a.name.raw.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    pub(crate) fn push(&mut self, attr: Attribute) {
        self.items.push(attr);
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A snapshot of the scanner's position and input identity.
///
/// Passed to [`DocumentHandler::start_document`] and available from the
/// scanner at any time; diagnostics also carry one.
#[derive(Clone, Debug, Default)]
pub struct Locator {
    /// Public identifier of the active input, if any.
    pub public_id: Option<String>,
    /// Base system identifier of the active input, if any.
    pub base_system_id: Option<String>,
    /// The system identifier as given.
    pub literal_system_id: Option<String>,
    /// The system identifier expanded to an absolute URI.
    pub expanded_system_id: Option<String>,
    /// Current line, 1-based.
    pub line: u32,
    /// Current column, 1-based.
    pub column: u32,
    /// IANA name of the encoding in effect, when bytes are being
    /// decoded.
    pub encoding: Option<String>,
}

/// Receiver of document events.
///
/// All methods default to doing nothing, so a handler implements only
/// what it cares about. Events arrive in strict source order. Payload
/// references (`&str`, [`QName`], [`Attributes`]) point into scanner
/// scratch buffers that are reused for the next event; copy whatever
/// must outlive the callback.
pub trait DocumentHandler {
    /// The scan of a new document began.
    fn start_document(
        &mut self,
        locator: &Locator,
        encoding: Option<&str>,
        location: Option<&Location>,
    ) {
        let _ = (locator, encoding, location);
    }

    /// The document ended; always the final event, delivered exactly
    /// once.
    fn end_document(&mut self, location: Option<&Location>) {
        let _ = location;
    }

    /// A start tag, with its attributes.
    fn start_element(&mut self, name: &QName, attributes: &Attributes, location: Option<&Location>) {
        let _ = (name, attributes, location);
    }

    /// An end tag.
    fn end_element(&mut self, name: &QName, location: Option<&Location>) {
        let _ = (name, location);
    }

    /// A run of character content. `\r` never appears: every source
    /// line ending arrives as a single `\n`. Adjacent runs may be
    /// split at arbitrary points.
    fn characters(&mut self, text: &str, location: Option<&Location>) {
        let _ = (text, location);
    }

    /// A comment body, without the `<!--` and `-->` delimiters.
    fn comment(&mut self, text: &str, location: Option<&Location>) {
        let _ = (text, location);
    }

    /// Start of a notified entity reference. `name` is the reference
    /// name without `&` and `;` (numeric references keep their `#`).
    fn start_general_entity(&mut self, name: &str, location: Option<&Location>) {
        let _ = (name, location);
    }

    /// End of a notified entity reference.
    fn end_general_entity(&mut self, name: &str, location: Option<&Location>) {
        let _ = (name, location);
    }

    /// Polled after every delivered event: a handler that wants the
    /// scanner to descend into a nested character stream returns it
    /// here. The nested stream's events are delivered before the next
    /// event of the current stream, which resumes at its suspension
    /// point afterwards.
    fn pending_input(&mut self) -> Option<InputSource> {
        None
    }
}
