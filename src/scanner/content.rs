//! The content scanner: text, entity references, comments, start and
//! end tags, attributes, and the mid-document encoding switch.

use std::mem;

use encoding_rs::Encoding;

use crate::elements;
use crate::errors::{HtmlCode, Result};
use crate::events::{Attribute, DocumentHandler, Location};
use super::{Active, Control, Scanner, ScanResult, State, Step};

impl<H: DocumentHandler> Scanner<H> {
    /// Runs the content state machine. Returns `Ok(false)` only after
    /// `end_document`; `Ok(true)` means call again (chunked mode, or
    /// the special scanner took over).
    pub(crate) fn scan_content(&mut self, complete: bool) -> Result<bool> {
        loop {
            let next = match self.content_step() {
                Ok(Step::Continue) => true,
                Ok(Step::Chunk) => false,
                Ok(Step::Switch) => return Ok(true),
                Ok(Step::Done) => return Ok(false),
                Err(Control::Eoe) => {
                    if let Some(previous) = self.stack.pop() {
                        self.entity = previous;
                    } else {
                        self.state = State::EndDocument;
                    }
                    true
                }
                Err(Control::Fatal(err)) => return Err(err),
            };
            if !next && !complete {
                return Ok(true);
            }
        }
    }

    fn content_step(&mut self) -> ScanResult<Step> {
        match self.state {
            State::StartDocument => {
                self.mark_begin();
                self.mark_end();
                let locator = self.locator();
                let encoding = self.encoding.clone();
                let augs = self.location_augs();
                self.handler
                    .start_document(&locator, encoding.as_deref(), augs.as_ref());
                self.drain_pending()?;
                self.state = State::Content;
                Ok(Step::Continue)
            }
            State::Content => {
                self.mark_begin();
                match self.read()? {
                    Some('<') => {
                        self.state = State::MarkupBracket;
                        Ok(Step::Continue)
                    }
                    Some('&') => {
                        let mut reference = mem::take(&mut self.ref_scratch);
                        let outcome = self.scan_entity_ref(true, &mut reference);
                        self.ref_scratch = reference;
                        outcome?;
                        Ok(Step::Chunk)
                    }
                    Some(_) => {
                        self.push_back();
                        self.scan_characters()?;
                        Ok(Step::Chunk)
                    }
                    None => Err(Control::Eoe),
                }
            }
            State::MarkupBracket => {
                let step = self.markup_step()?;
                self.state = State::Content;
                Ok(step)
            }
            State::EndDocument => {
                self.mark_begin();
                self.mark_end();
                let augs = self.location_augs();
                self.handler.end_document(augs.as_ref());
                Ok(Step::Done)
            }
        }
    }

    fn markup_step(&mut self) -> ScanResult<Step> {
        match self.read()? {
            Some('!') => {
                let second = self.read()?;
                if second == Some('-') {
                    let third = self.read()?;
                    if third == Some('-') {
                        self.scan_comment()?;
                        return Ok(Step::Chunk);
                    }
                    self.report_error(HtmlCode::InvalidBangMarkup, &[]);
                    self.recover_markup(third)?;
                } else {
                    self.report_error(HtmlCode::InvalidBangMarkup, &[]);
                    self.recover_markup(second)?;
                }
                Ok(Step::Chunk)
            }
            Some('?') => {
                self.report_warning(HtmlCode::PiNotSupported, &[]);
                self.skip_markup()?;
                Ok(Step::Chunk)
            }
            Some('/') => {
                self.scan_end_element()?;
                Ok(Step::Chunk)
            }
            Some(_) => {
                self.push_back();
                if self.scan_start_element()? {
                    Ok(Step::Switch)
                } else {
                    Ok(Step::Chunk)
                }
            }
            None => {
                self.report_error(HtmlCode::EofAfterOpenBracket, &[]);
                Err(Control::Eoe)
            }
        }
    }

    /// Discards a bracketed construct after a malformed `<!`.
    fn recover_markup(&mut self, offending: Option<char>) -> ScanResult<()> {
        match offending {
            None => Err(Control::Eoe),
            Some('>') => Ok(()),
            Some(_) => {
                self.push_back();
                self.skip_markup()?;
                Ok(())
            }
        }
    }

    // ---- character content --------------------------------------------

    /// Emits one run of character content, ending at `<`, `&`, a line
    /// ending or the window edge. A leading newline run is rewritten in
    /// place so the delivered text carries exactly one `\n` per source
    /// line ending.
    fn scan_characters(&mut self) -> ScanResult<()> {
        let newlines = self.skip_newlines()?;
        if newlines == 0 && self.entity.offset == self.entity.length {
            return Ok(());
        }
        let start = self.entity.offset - newlines;
        for i in start..self.entity.offset {
            self.entity.buffer[i] = '\n';
        }
        while self.entity.offset < self.entity.length {
            let c = self.entity.buffer[self.entity.offset];
            if c == '<' || c == '&' || c == '\r' || c == '\n' {
                break;
            }
            self.entity.offset += 1;
            self.entity.column += 1;
        }
        if self.entity.offset > start {
            self.mark_end();
            if self.emitting() {
                let mut text = mem::take(&mut self.scratch);
                text.clear();
                text.extend(&self.entity.buffer[start..self.entity.offset]);
                let augs = self.location_augs();
                self.handler.characters(&text, augs.as_ref());
                self.scratch = text;
                self.drain_pending()?;
            }
        }
        Ok(())
    }

    // ---- comments -----------------------------------------------------

    /// Scans a comment body after `<!--`. The text gathered before a
    /// premature end of input is still delivered.
    fn scan_comment(&mut self) -> ScanResult<()> {
        let mut text = mem::take(&mut self.scratch);
        text.clear();
        match self.scan_dashed_content(&mut text) {
            Ok(eof) => {
                self.mark_end();
                if self.emitting() {
                    let augs = self.location_augs();
                    self.handler.comment(&text, augs.as_ref());
                }
                self.scratch = text;
                self.drain_pending()?;
                if eof {
                    Err(Control::Eoe)
                } else {
                    Ok(())
                }
            }
            Err(err) => {
                self.scratch = text;
                Err(err)
            }
        }
    }

    /// Accumulates comment text up to the dash-run terminator.
    ///
    /// A run of n >= 2 dashes followed by `>` ends the comment and
    /// contributes n-2 dashes. A run not followed by `>` contributes
    /// one dash for n == 1, both for n == 2, and n-2 for longer runs.
    /// Returns `Ok(true)` when the input ended inside the comment.
    fn scan_dashed_content(&mut self, text: &mut String) -> ScanResult<bool> {
        loop {
            let c = match self.read()? {
                Some(c) => c,
                None => {
                    self.report_error(HtmlCode::UnexpectedEof, &[]);
                    return Ok(true);
                }
            };
            if c == '-' {
                let mut count = 1;
                let after = loop {
                    match self.read()? {
                        Some('-') => count += 1,
                        other => break other,
                    }
                };
                let c2 = match after {
                    Some(c2) => c2,
                    None => {
                        self.report_error(HtmlCode::UnexpectedEof, &[]);
                        return Ok(true);
                    }
                };
                if count >= 2 && c2 == '>' {
                    for _ in 0..count - 2 {
                        text.push('-');
                    }
                    return Ok(false);
                }
                let kept = if count <= 2 { count } else { count - 2 };
                for _ in 0..kept {
                    text.push('-');
                }
                self.push_back();
            } else if c == '\r' || c == '\n' {
                self.push_back();
                let run = self.skip_newlines()?;
                for _ in 0..run {
                    text.push('\n');
                }
            } else {
                text.push(c);
            }
        }
    }

    // ---- elements -----------------------------------------------------

    /// Scans a start tag after `<`. Returns whether the special-text
    /// scanner takes over for the element's content.
    fn scan_start_element(&mut self) -> ScanResult<bool> {
        let raw = match self.scan_name()? {
            Some(raw) => raw,
            None => {
                self.report_error(HtmlCode::MissingElementName, &[]);
                self.skip_markup()?;
                return Ok(false);
            }
        };
        // attribute scanning moves the begin mark; the element event
        // begins at its '<'
        let begin = (self.begin_line, self.begin_column);
        self.attributes.clear();
        while self.scan_attribute()? {}
        self.begin_line = begin.0;
        self.begin_column = begin.1;

        self.element_count += 1;
        if self.element_depth == -1 && self.replay_window_open() {
            self.maybe_release_bytes(&raw);
        }

        self.mark_end();
        let special = elements::get(&raw).map_or(false, |e| e.special);
        let display = self.config.elem_names.apply(&raw);
        if self.emitting() {
            self.qname.set(&display);
            let augs = self.location_augs();
            self.handler
                .start_element(&self.qname, &self.attributes, augs.as_ref());
            self.drain_pending()?;
        }
        if special {
            self.active = Active::Special(raw);
            return Ok(true);
        }
        Ok(false)
    }

    /// Scans an end tag after `</`.
    fn scan_end_element(&mut self) -> ScanResult<()> {
        let name = self.scan_name()?;
        self.skip_markup()?;
        match name {
            Some(raw) => {
                let display = self.config.elem_names.apply(&raw);
                self.mark_end();
                if self.emitting() {
                    self.qname.set(&display);
                    let augs = self.location_augs();
                    self.handler.end_element(&self.qname, augs.as_ref());
                    self.drain_pending()?;
                }
            }
            None => {
                self.report_error(HtmlCode::MissingEndElementName, &[]);
            }
        }
        Ok(())
    }

    // ---- attributes ---------------------------------------------------

    /// Scans one attribute. `Ok(true)` means more may follow; `Ok(false)`
    /// means the tag is closed.
    fn scan_attribute(&mut self) -> ScanResult<bool> {
        self.skip_spaces()?;
        self.mark_begin();
        let c = match self.read()? {
            Some(c) => c,
            None => {
                self.report_error(HtmlCode::UnexpectedEof, &[]);
                return Err(Control::Eoe);
            }
        };
        if c == '>' {
            return Ok(false);
        }
        self.push_back();
        let name = match self.scan_name()? {
            Some(name) => name,
            None => {
                self.report_error(HtmlCode::MissingAttributeName, &[]);
                self.skip_markup()?;
                return Ok(false);
            }
        };
        self.skip_spaces()?;
        let c = match self.read()? {
            Some(c) => c,
            None => {
                self.report_error(HtmlCode::UnexpectedEof, &[]);
                return Err(Control::Eoe);
            }
        };
        match c {
            '/' | '>' => {
                self.push_attribute(name, String::new());
                if c == '/' {
                    self.skip_markup()?;
                }
                Ok(false)
            }
            '=' => self.scan_attribute_value(name),
            _ => {
                self.push_attribute(name, String::new());
                self.push_back();
                Ok(true)
            }
        }
    }

    /// Scans the value after `name=`.
    fn scan_attribute_value(&mut self, name: String) -> ScanResult<bool> {
        self.skip_spaces()?;
        let c = match self.read()? {
            Some(c) => c,
            None => {
                self.report_error(HtmlCode::UnexpectedEof, &[]);
                return Err(Control::Eoe);
            }
        };
        if c == '>' {
            self.push_attribute(name, String::new());
            return Ok(false);
        }
        let mut value = String::new();
        let mut reference = String::new();
        if c != '"' && c != '\'' {
            // unquoted: up to whitespace or '>'
            self.push_back();
            loop {
                let c = match self.read()? {
                    Some(c) => c,
                    None => {
                        self.report_error(HtmlCode::UnexpectedEof, &[]);
                        return Err(Control::Eoe);
                    }
                };
                if c == '>' || c.is_whitespace() {
                    self.push_back();
                    break;
                }
                if c == '&' {
                    match self.scan_entity_ref(false, &mut reference)? {
                        Some(resolved) => value.push(resolved),
                        None => value.push_str(&reference),
                    }
                } else {
                    value.push(c);
                }
            }
            self.push_attribute(name, value);
            return Ok(true);
        }
        let quote = c;
        loop {
            let c = match self.read()? {
                Some(c) => c,
                None => {
                    self.report_error(HtmlCode::UnexpectedEof, &[]);
                    return Err(Control::Eoe);
                }
            };
            if c == quote {
                break;
            }
            match c {
                '&' => match self.scan_entity_ref(false, &mut reference)? {
                    Some(resolved) => value.push(resolved),
                    None => value.push_str(&reference),
                },
                '\r' | '\n' => {
                    self.push_back();
                    let run = self.skip_newlines()?;
                    for _ in 0..run {
                        value.push('\n');
                    }
                }
                _ => value.push(c),
            }
        }
        self.push_attribute(name, value);
        Ok(true)
    }

    fn push_attribute(&mut self, name: String, value: String) {
        self.mark_end();
        let display = self.config.attr_names.apply(&name);
        let mut qname = crate::events::QName::default();
        qname.set(&display);
        let location = if self.config.augmentations {
            Some(Location {
                begin_line: self.begin_line,
                begin_column: self.begin_column,
                end_line: self.end_line,
                end_column: self.end_column,
            })
        } else {
            None
        };
        self.attributes.push(Attribute {
            name: qname,
            kind: "CDATA",
            value,
            location,
        });
    }

    // ---- encoding switch ----------------------------------------------

    /// Whether the byte replay buffer is still being filled.
    fn replay_window_open(&self) -> bool {
        self.bytes.as_ref().map_or(false, |b| !b.stream.is_cleared())
    }

    /// Depth-1 bookkeeping for the byte replay buffer: a charset-bearing
    /// `<meta>` triggers a re-decode, reaching body content releases
    /// the buffer.
    fn maybe_release_bytes(&mut self, raw: &str) {
        if raw.eq_ignore_ascii_case("META") {
            let content_type = self
                .attributes
                .value("http-equiv")
                .map_or(false, |v| v.trim().eq_ignore_ascii_case("content-type"));
            if !content_type {
                return;
            }
            let charset = self
                .attributes
                .value("content")
                .and_then(extract_charset)
                .map(str::to_string);
            if let Some(label) = charset {
                self.switch_encoding(&label);
            }
        } else if raw.eq_ignore_ascii_case("BODY") {
            if let Some(input) = self.bytes.as_mut() {
                input.stream.clear();
            }
        } else if let Some(element) = elements::get(raw) {
            if element.parent == Some("BODY") {
                if let Some(input) = self.bytes.as_mut() {
                    input.stream.clear();
                }
            }
        }
    }

    /// Re-decodes the document from byte zero under `label`. Events the
    /// handler already received are suppressed during the replay via
    /// the element count/depth gate.
    fn switch_encoding(&mut self, label: &str) {
        match Encoding::for_label(label.as_bytes()) {
            Some(encoding) => {
                if let Some(input) = self.bytes.as_mut() {
                    input.decoder = encoding.new_decoder_without_bom_handling();
                    input.stream.playback();
                    input.eof = false;
                }
                self.encoding = Some(label.to_string());
                self.element_depth = self.element_count;
                self.element_count = 0;
                self.entity.offset = 0;
                self.entity.length = 0;
                self.entity.line = 1;
                self.entity.column = 1;
            }
            None => {
                self.report_warning(HtmlCode::UnknownEncoding, &[label]);
                self.report_error(HtmlCode::UnsupportedEncoding, &[label]);
                if let Some(input) = self.bytes.as_mut() {
                    input.stream.clear();
                }
            }
        }
    }
}

/// Extracts the charset token from a `content` attribute value: the
/// text after a case-insensitive `charset=`, up to `;` or the end.
fn extract_charset(content: &str) -> Option<&str> {
    let lower = content.to_ascii_lowercase();
    let start = memchr::memmem::find(lower.as_bytes(), b"charset=")? + "charset=".len();
    let rest = &content[start..];
    let end = rest.find(';').unwrap_or(rest.len());
    Some(rest[..end].trim())
}
