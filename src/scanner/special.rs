//! The special-text scanner.
//!
//! Content of a raw-text element (SCRIPT, STYLE and friends) is opaque:
//! nothing in it opens markup except the element's own end tag. The
//! scanner still normalizes line endings and still tracks location.

use std::mem;

use crate::errors::{HtmlCode, Result};
use crate::events::DocumentHandler;
use super::{Active, Control, Scanner, ScanResult, State};

impl<H: DocumentHandler> Scanner<H> {
    /// Runs the special-text scanner. `Ok(true)` means call
    /// [`scan_document`](Self::scan_document) again: either a chunk was
    /// produced, or the matching end tag handed control back to the
    /// content scanner.
    pub(crate) fn scan_special(&mut self, complete: bool) -> Result<bool> {
        loop {
            match self.special_step() {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(Control::Eoe) => {
                    if let Some(previous) = self.stack.pop() {
                        self.entity = previous;
                        continue;
                    }
                    // raw text was cut off; the document still ends
                    // with its end_document event
                    self.active = Active::Content;
                    self.state = State::EndDocument;
                    return Ok(true);
                }
                Err(Control::Fatal(err)) => return Err(err),
            }
            if !complete {
                return Ok(true);
            }
        }
    }

    /// One special-scanner iteration. `Ok(true)` when the element was
    /// closed and the content scanner resumes.
    fn special_step(&mut self) -> ScanResult<bool> {
        self.mark_begin();
        let mut text = mem::take(&mut self.scratch);
        text.clear();
        let outcome = self.special_step_inner(&mut text);
        self.scratch = text;
        outcome
    }

    fn special_step_inner(&mut self, text: &mut String) -> ScanResult<bool> {
        let c = match self.read()? {
            Some(c) => c,
            None => {
                self.report_error(HtmlCode::UnexpectedEof, &[]);
                return Err(Control::Eoe);
            }
        };
        if c == '<' {
            match self.read()? {
                Some('/') => {
                    let name = self.scan_name()?;
                    let closes = match (&name, &self.active) {
                        (Some(n), Active::Special(element)) => n.eq_ignore_ascii_case(element),
                        _ => false,
                    };
                    match name {
                        Some(raw) if closes => {
                            self.skip_markup()?;
                            let display = self.config.elem_names.apply(&raw);
                            self.mark_end();
                            if self.emitting() {
                                self.qname.set(&display);
                                let augs = self.location_augs();
                                self.handler.end_element(&self.qname, augs.as_ref());
                                self.drain_pending()?;
                            }
                            self.active = Active::Content;
                            self.state = State::Content;
                            return Ok(true);
                        }
                        // an end tag for some other element is just text
                        Some(raw) => {
                            text.push_str("</");
                            text.push_str(&raw);
                        }
                        None => text.push_str("</"),
                    }
                }
                Some(_) => {
                    text.push('<');
                    self.push_back();
                }
                None => text.push('<'),
            }
        } else {
            self.push_back();
        }
        self.scan_raw_text(text)?;
        Ok(false)
    }

    /// Accumulates raw text up to the next `<` or the end of input and
    /// delivers it as a single characters event.
    fn scan_raw_text(&mut self, text: &mut String) -> ScanResult<()> {
        loop {
            if self.entity.offset == self.entity.length && self.load(0)?.is_none() {
                break;
            }
            let c = self.entity.buffer[self.entity.offset];
            match c {
                '<' => break,
                '\r' | '\n' => {
                    let run = self.skip_newlines()?;
                    for _ in 0..run {
                        text.push('\n');
                    }
                }
                _ => {
                    text.push(c);
                    self.entity.offset += 1;
                    self.entity.column += 1;
                }
            }
        }
        self.mark_end();
        if !text.is_empty() && self.emitting() {
            let augs = self.location_augs();
            self.handler.characters(text, augs.as_ref());
            self.drain_pending()?;
        }
        Ok(())
    }
}
