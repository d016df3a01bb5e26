//! The streaming scanner.
//!
//! [`Scanner`] pulls characters through a sliding window
//! ([`CurrentEntity`]), refilled either from a pushed character stream
//! or from the document byte stream via an incremental decoder, and
//! drives one of two scanner variants: the content scanner (markup and
//! text) or the special-text scanner (raw text inside SCRIPT-like
//! elements). It never rejects input; anomalies are reported and
//! recovered from.

mod content;
mod refs;
mod special;

use std::mem;

use encoding_rs::{Decoder, Encoding, WINDOWS_1252};

use crate::config::Config;
use crate::errors::{Error, ErrorReporter, HtmlCode, Result};
use crate::events::{Attributes, DocumentHandler, Location, Locator, QName};
use crate::input::{expand_system_id, CharRead, InputSource};
use crate::playback::PlaybackStream;

/// Default character window capacity.
const CAPACITY: usize = 2048;

/// What the state machine does with the next character.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// `start_document` not yet delivered.
    StartDocument,
    /// Between constructs; text, `<` and `&` dispatch from here.
    Content,
    /// A `<` was consumed; deciding what markup follows.
    MarkupBracket,
    /// The outermost entity ended; `end_document` is next.
    EndDocument,
}

/// Which scanner variant is driving.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Active {
    Content,
    /// Raw-text scanning until the named element's own end tag.
    Special(String),
}

/// Non-local exits of the scanning functions. `Eoe` unwinds to the
/// scan loop when the active entity ends; the loop pops a suspended
/// entity or moves to `EndDocument`.
pub(crate) enum Control {
    Eoe,
    Fatal(Error),
}

impl From<Error> for Control {
    fn from(err: Error) -> Self {
        Control::Fatal(err)
    }
}

pub(crate) type ScanResult<T> = std::result::Result<T, Control>;

/// Outcome of one content-scanner iteration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    /// An immediate follow-up transition was requested.
    Continue,
    /// One chunk of work was produced; chunked callers may return.
    Chunk,
    /// The active scanner variant changed; re-dispatch.
    Switch,
    /// `end_document` was delivered; scanning is over.
    Done,
}

/// Where a [`CurrentEntity`] gets its characters from.
enum Source {
    /// Nothing left; reads see end of input.
    Exhausted,
    /// Decode from the scanner-owned document byte input.
    Document,
    /// A pushed, pre-decoded character stream.
    Reader(Box<dyn CharRead>),
}

#[derive(Clone, Copy, Eq, PartialEq)]
enum SourceKind {
    Exhausted,
    Document,
    Reader,
}

/// A decoded character stream with its sliding window and location
/// counters.
///
/// The window holds `length` valid characters of which `offset` are
/// consumed; a read past `length` triggers a refill from the source.
/// `column` advances by one per consumed character except across
/// newline runs, which reset it to 1.
struct CurrentEntity {
    buffer: Vec<char>,
    offset: usize,
    length: usize,
    line: u32,
    column: u32,
    public_id: Option<String>,
    base_system_id: Option<String>,
    literal_system_id: Option<String>,
    expanded_system_id: Option<String>,
    source: Source,
}

impl CurrentEntity {
    fn new(
        public_id: Option<String>,
        base_system_id: Option<String>,
        literal_system_id: Option<String>,
        expanded_system_id: Option<String>,
    ) -> Self {
        Self {
            buffer: vec!['\0'; CAPACITY],
            offset: 0,
            length: 0,
            line: 1,
            column: 1,
            public_id,
            base_system_id,
            literal_system_id,
            expanded_system_id,
            source: Source::Exhausted,
        }
    }

    fn kind(&self) -> SourceKind {
        match self.source {
            Source::Exhausted => SourceKind::Exhausted,
            Source::Document => SourceKind::Document,
            Source::Reader(_) => SourceKind::Reader,
        }
    }
}

/// The document byte stream with its incremental decoder.
struct ByteInput {
    stream: PlaybackStream,
    decoder: Decoder,
    /// Underlying bytes are exhausted and the decoder was flushed.
    eof: bool,
}

/// A permissive, streaming HTML tokenizer.
///
/// Feed it an [`InputSource`] and drive it with
/// [`scan_document`](Self::scan_document); events arrive at the
/// [`DocumentHandler`]. The scanner balances nothing and validates
/// nothing: every input produces an event stream that starts with one
/// `start_document` and ends with one `end_document`.
///
/// ```
/// use tagsoup::{DocumentHandler, InputSource, Scanner};
///
/// #[derive(Default)]
/// struct Names(Vec<String>);
///
/// impl DocumentHandler for Names {
///     fn start_element(
///         &mut self,
///         name: &tagsoup::QName,
///         _attributes: &tagsoup::Attributes,
///         _location: Option<&tagsoup::Location>,
///     ) {
///         self.0.push(name.raw.clone());
///     }
/// }
///
/// let mut scanner = Scanner::new(Names::default());
/// scanner.set_input_source(InputSource::from_text("<p>hi<br></p>")).unwrap();
/// scanner.scan_document(true).unwrap();
/// assert_eq!(scanner.handler().0, ["p", "br"]);
/// ```
pub struct Scanner<H: DocumentHandler> {
    handler: H,
    config: Config,
    reporter: Option<Box<dyn ErrorReporter>>,
    bytes: Option<ByteInput>,
    entity: CurrentEntity,
    stack: Vec<CurrentEntity>,
    state: State,
    active: Active,
    started: bool,
    /// Start elements seen so far; compared against `element_depth` to
    /// suppress events already delivered before an encoding replay.
    element_count: i32,
    element_depth: i32,
    /// IANA name of the encoding in effect, if bytes are decoded.
    encoding: Option<String>,
    begin_line: u32,
    begin_column: u32,
    end_line: u32,
    end_column: u32,
    qname: QName,
    attributes: Attributes,
    scratch: String,
    ref_scratch: String,
    byte_chunk: Vec<u8>,
    char_scratch: String,
}

impl<H: DocumentHandler> Scanner<H> {
    /// Creates a scanner with the default configuration.
    pub fn new(handler: H) -> Self {
        Self::with_config(Config::default(), handler)
    }

    /// Creates a scanner with an explicit configuration.
    pub fn with_config(config: Config, handler: H) -> Self {
        Self {
            handler,
            config,
            reporter: None,
            bytes: None,
            entity: CurrentEntity::new(None, None, None, None),
            stack: Vec::new(),
            state: State::StartDocument,
            active: Active::Content,
            started: false,
            element_count: 0,
            element_depth: -1,
            encoding: None,
            begin_line: 1,
            begin_column: 1,
            end_line: 1,
            end_column: 1,
            qname: QName::default(),
            attributes: Attributes::default(),
            scratch: String::new(),
            ref_scratch: String::new(),
            byte_chunk: Vec::new(),
            char_scratch: String::new(),
        }
    }

    /// Installs a diagnostics receiver. Diagnostics are delivered only
    /// while [`Config::report_errors`] is set.
    pub fn set_reporter(&mut self, reporter: Box<dyn ErrorReporter>) {
        self.reporter = Some(reporter);
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the configuration. Changing it between
    /// documents is fine; changing it mid-scan is not supported.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// The handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutable access to the handler.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consumes the scanner and returns the handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// IANA name of the encoding currently in effect, when the document
    /// is being decoded from bytes.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// A snapshot of the current scan position and input identity.
    pub fn locator(&self) -> Locator {
        Locator {
            public_id: self.entity.public_id.clone(),
            base_system_id: self.entity.base_system_id.clone(),
            literal_system_id: self.entity.literal_system_id.clone(),
            expanded_system_id: self.entity.expanded_system_id.clone(),
            line: self.entity.line,
            column: self.entity.column,
            encoding: self.encoding.clone(),
        }
    }

    /// Installs the document to scan, resetting all scanner state.
    ///
    /// Exactly one of the source's streams must be present. For a byte
    /// stream the encoding is resolved here: byte order mark first,
    /// then the source's declared encoding, then the configured
    /// default (reported as HTML1000 when used).
    pub fn set_input_source(&mut self, source: InputSource) -> Result<()> {
        self.stack.clear();
        self.bytes = None;
        self.encoding = None;
        self.element_count = 0;
        self.element_depth = -1;
        self.state = State::StartDocument;
        self.active = Active::Content;
        self.begin_line = 1;
        self.begin_column = 1;
        self.end_line = 1;
        self.end_column = 1;
        self.started = false;

        let InputSource {
            public_id,
            system_id,
            base_system_id,
            encoding,
            byte_stream,
            char_stream,
        } = source;
        let expanded = system_id
            .as_deref()
            .map(|id| expand_system_id(id, base_system_id.as_deref()));
        self.entity = CurrentEntity::new(public_id, base_system_id, system_id, expanded);

        if let Some(chars) = char_stream {
            self.entity.source = Source::Reader(chars);
            self.encoding = encoding;
        } else if let Some(raw) = byte_stream {
            let mut stream = PlaybackStream::new(raw);
            let (name, native) = match stream.detect_encoding()? {
                (Some(iana), Some(native)) => (iana.to_string(), native),
                _ => match encoding {
                    Some(label) => match Encoding::for_label(label.as_bytes()) {
                        Some(native) => (label, native),
                        None => {
                            self.report_warning(HtmlCode::UnknownEncoding, &[&label]);
                            self.default_encoding()
                        }
                    },
                    None => {
                        let (name, native) = self.default_encoding();
                        self.report_warning(HtmlCode::DefaultEncodingUsed, &[&name]);
                        (name, native)
                    }
                },
            };
            self.encoding = Some(name);
            self.entity.source = Source::Document;
            self.bytes = Some(ByteInput {
                stream,
                decoder: native.new_decoder_without_bom_handling(),
                eof: false,
            });
        } else {
            return Err(Error::NoStream);
        }
        self.started = true;
        Ok(())
    }

    /// Suspends the active input and scans the pushed one until its end
    /// of input, then resumes the suspended stream where it left off.
    ///
    /// The source must carry a character stream.
    pub fn push_input_source(&mut self, source: InputSource) -> Result<()> {
        let InputSource {
            public_id,
            system_id,
            base_system_id,
            char_stream,
            ..
        } = source;
        let chars = char_stream.ok_or(Error::NoCharacterStream)?;
        let expanded = system_id
            .as_deref()
            .map(|id| expand_system_id(id, base_system_id.as_deref()));
        let mut entity = CurrentEntity::new(public_id, base_system_id, system_id, expanded);
        entity.source = Source::Reader(chars);
        let suspended = mem::replace(&mut self.entity, entity);
        self.stack.push(suspended);
        Ok(())
    }

    /// Advances the scan.
    ///
    /// With `complete` set, runs the whole document and returns
    /// `Ok(false)` after the terminal `end_document`. With `complete`
    /// unset, produces one chunk of events and returns `Ok(true)`
    /// while more work may remain; repeated calls deliver the same
    /// total event sequence as a single complete call.
    pub fn scan_document(&mut self, complete: bool) -> Result<bool> {
        if !self.started {
            return Ok(false);
        }
        loop {
            let keep_going = match self.active {
                Active::Content => self.scan_content(complete)?,
                Active::Special(_) => self.scan_special(complete)?,
            };
            if !keep_going {
                self.started = false;
                return Ok(false);
            }
            if !complete {
                return Ok(true);
            }
        }
    }

    // ---- lexical primitives -------------------------------------------

    /// Next character, refilling the window when drained. `None` is end
    /// of the active entity.
    pub(crate) fn read(&mut self) -> Result<Option<char>> {
        if self.entity.offset == self.entity.length && self.load(0)?.is_none() {
            return Ok(None);
        }
        let c = self.entity.buffer[self.entity.offset];
        self.entity.offset += 1;
        self.entity.column += 1;
        Ok(Some(c))
    }

    /// Returns the last read character to the window.
    pub(crate) fn push_back(&mut self) {
        self.entity.offset -= 1;
        if self.entity.column > 1 {
            self.entity.column -= 1;
        }
    }

    /// Compacts the last `keep` characters to the front of the window
    /// and refills behind them. Returns the newly read count, or `None`
    /// at end of input.
    pub(crate) fn load(&mut self, keep: usize) -> Result<Option<usize>> {
        if self.entity.kind() == SourceKind::Exhausted {
            return Ok(None);
        }
        {
            let entity = &mut self.entity;
            if keep == entity.buffer.len() {
                let grown = entity.buffer.len() * 2;
                entity.buffer.resize(grown.max(CAPACITY), '\0');
            }
            let from = entity.length - keep;
            entity.buffer.copy_within(from..entity.length, 0);
            entity.offset = keep;
            entity.length = keep;
        }
        let count = match self.entity.kind() {
            SourceKind::Exhausted => 0,
            SourceKind::Document => self.fill_from_document(keep)?,
            SourceKind::Reader => {
                let entity = &mut self.entity;
                match entity.source {
                    Source::Reader(ref mut reader) => {
                        reader.read_chars(&mut entity.buffer[keep..])?
                    }
                    _ => 0,
                }
            }
        };
        if count == 0 {
            return Ok(None);
        }
        self.entity.length = keep + count;
        Ok(Some(count))
    }

    /// Decodes the next chunk of document bytes into the window. At
    /// most one character per byte is ever produced, so reading `space`
    /// bytes cannot overflow `space` window slots.
    fn fill_from_document(&mut self, keep: usize) -> Result<usize> {
        let space = self.entity.buffer.len() - keep;
        let input = match self.bytes.as_mut() {
            Some(input) => input,
            None => return Ok(0),
        };
        if input.eof {
            return Ok(0);
        }
        if self.byte_chunk.len() < space {
            self.byte_chunk.resize(space, 0);
        }
        self.char_scratch.clear();
        loop {
            let n = input.stream.read(&mut self.byte_chunk[..space])?;
            if n == 0 {
                self.char_scratch.reserve(16);
                let _ = input.decoder.decode_to_string(&[], &mut self.char_scratch, true);
                input.eof = true;
                break;
            }
            let needed = input
                .decoder
                .max_utf8_buffer_length(n)
                .unwrap_or(n * 3 + 16);
            self.char_scratch.reserve(needed);
            let (_, consumed, _) =
                input
                    .decoder
                    .decode_to_string(&self.byte_chunk[..n], &mut self.char_scratch, false);
            debug_assert_eq!(consumed, n);
            // a partial multibyte sequence can swallow a whole chunk
            // without yielding a character yet
            if !self.char_scratch.is_empty() {
                break;
            }
        }
        let mut count = 0;
        for c in self.char_scratch.chars() {
            self.entity.buffer[keep + count] = c;
            count += 1;
        }
        Ok(count)
    }

    /// Collects a run of name characters (letters, digits, `-`, `.`,
    /// `:`), spanning refills. `None` when no character matched.
    pub(crate) fn scan_name(&mut self) -> Result<Option<String>> {
        if self.entity.offset == self.entity.length && self.load(0)?.is_none() {
            return Ok(None);
        }
        let mut start = self.entity.offset;
        loop {
            while self.entity.offset < self.entity.length {
                let c = self.entity.buffer[self.entity.offset];
                if c.is_alphanumeric() || c == '-' || c == '.' || c == ':' {
                    self.entity.offset += 1;
                } else {
                    break;
                }
            }
            if self.entity.offset == self.entity.length {
                let taken = self.entity.offset - start;
                let more = self.load(taken)?;
                start = 0;
                if more.is_none() {
                    break;
                }
            } else {
                break;
            }
        }
        let len = self.entity.offset - start;
        if len == 0 {
            return Ok(None);
        }
        let name: String = self.entity.buffer[start..self.entity.offset].iter().collect();
        self.entity.column += len as u32;
        Ok(Some(name))
    }

    /// Consumes whitespace, delegating newline runs to
    /// [`skip_newlines`](Self::skip_newlines).
    pub(crate) fn skip_spaces(&mut self) -> Result<()> {
        loop {
            if self.entity.offset == self.entity.length && self.load(0)?.is_none() {
                return Ok(());
            }
            let c = self.entity.buffer[self.entity.offset];
            if c == '\r' || c == '\n' {
                self.skip_newlines()?;
            } else if c.is_whitespace() {
                self.entity.offset += 1;
                self.entity.column += 1;
            } else {
                return Ok(());
            }
        }
    }

    /// Consumes a run of line endings. Each `\r`, `\n` or `\r\n`
    /// counts one line; afterwards the column is 1 and the line counter
    /// advanced by the run length, which is returned.
    pub(crate) fn skip_newlines(&mut self) -> Result<usize> {
        if self.entity.offset == self.entity.length && self.load(0)?.is_none() {
            return Ok(0);
        }
        let mut newlines = 0;
        loop {
            if self.entity.offset == self.entity.length && self.load(newlines)?.is_none() {
                break;
            }
            let c = self.entity.buffer[self.entity.offset];
            if c == '\r' {
                newlines += 1;
                self.entity.offset += 1;
                if self.entity.offset == self.entity.length && self.load(newlines)?.is_none() {
                    break;
                }
                if self.entity.offset < self.entity.length
                    && self.entity.buffer[self.entity.offset] == '\n'
                {
                    self.entity.offset += 1;
                }
            } else if c == '\n' {
                newlines += 1;
                self.entity.offset += 1;
            } else {
                break;
            }
        }
        if newlines > 0 {
            self.entity.line += newlines as u32;
            self.entity.column = 1;
        }
        Ok(newlines)
    }

    /// Consumes markup up to the `>` that balances the already-consumed
    /// `<`, tracking nested brackets. Stops at end of input.
    pub(crate) fn skip_markup(&mut self) -> Result<()> {
        let mut depth = 1;
        loop {
            if self.entity.offset == self.entity.length && self.load(0)?.is_none() {
                return Ok(());
            }
            let c = self.entity.buffer[self.entity.offset];
            if c == '\r' || c == '\n' {
                self.skip_newlines()?;
                continue;
            }
            self.entity.offset += 1;
            self.entity.column += 1;
            if c == '<' {
                depth += 1;
            } else if c == '>' {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
    }

    // ---- event plumbing -----------------------------------------------

    pub(crate) fn mark_begin(&mut self) {
        self.begin_line = self.entity.line;
        self.begin_column = self.entity.column;
    }

    pub(crate) fn mark_end(&mut self) {
        self.end_line = self.entity.line;
        self.end_column = self.entity.column;
    }

    /// The location payload for the event being emitted, when
    /// augmentations are enabled.
    pub(crate) fn location_augs(&self) -> Option<Location> {
        if self.config.augmentations {
            Some(Location {
                begin_line: self.begin_line,
                begin_column: self.begin_column,
                end_line: self.end_line,
                end_column: self.end_column,
            })
        } else {
            None
        }
    }

    /// Whether events are currently delivered. False only while an
    /// encoding replay re-produces events the handler has already seen.
    pub(crate) fn emitting(&self) -> bool {
        self.element_count >= self.element_depth
    }

    /// Lets the handler hand over a nested input source; called after
    /// every delivered event.
    pub(crate) fn drain_pending(&mut self) -> Result<()> {
        while let Some(source) = self.handler.pending_input() {
            self.push_input_source(source)?;
        }
        Ok(())
    }

    pub(crate) fn report_error(&mut self, code: HtmlCode, args: &[&str]) {
        if !self.config.report_errors {
            return;
        }
        let locator = self.locator();
        if let Some(reporter) = self.reporter.as_mut() {
            reporter.report_error(code, args, &locator);
        }
    }

    pub(crate) fn report_warning(&mut self, code: HtmlCode, args: &[&str]) {
        if !self.config.report_errors {
            return;
        }
        let locator = self.locator();
        if let Some(reporter) = self.reporter.as_mut() {
            reporter.report_warning(code, args, &locator);
        }
    }

    fn default_encoding(&self) -> (String, &'static Encoding) {
        let native =
            Encoding::for_label(self.config.default_encoding.as_bytes()).unwrap_or(WINDOWS_1252);
        (self.config.default_encoding.clone(), native)
    }
}
