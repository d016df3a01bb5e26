//! Entity-reference resolution.

use crate::entities;
use crate::errors::HtmlCode;
use crate::events::DocumentHandler;
use super::{Scanner, ScanResult};

impl<H: DocumentHandler> Scanner<H> {
    /// Resolves a reference after its `&` was consumed.
    ///
    /// `text` receives the raw reference text including `&` and `;`.
    /// Returns the resolved character, or `None` for anything that did
    /// not resolve; in content mode the unresolved text is delivered
    /// as literal characters and resolved references are delivered
    /// (with general-entity boundaries when the matching notify option
    /// is on). In attribute mode nothing is delivered and the caller
    /// decides what to do with `text`.
    pub(crate) fn scan_entity_ref(
        &mut self,
        content: bool,
        text: &mut String,
    ) -> ScanResult<Option<char>> {
        text.clear();
        text.push('&');
        loop {
            match self.read()? {
                Some(';') => {
                    text.push(';');
                    break;
                }
                Some(c) if c.is_alphanumeric() || c == '#' => text.push(c),
                other => {
                    self.report_error(HtmlCode::MalformedEntityRef, &[]);
                    if other.is_some() {
                        self.push_back();
                    }
                    return self.reject_reference(content, text);
                }
            }
        }
        if text.len() <= 2 {
            // a bare "&;"
            return self.reject_reference(content, text);
        }
        let name = text[1..text.len() - 1].to_string();
        if let Some(digits) = name.strip_prefix('#') {
            let parsed = if let Some(hex) = digits.strip_prefix(&['x', 'X'][..]) {
                u32::from_str_radix(hex, 16)
            } else {
                digits.parse::<u32>()
            };
            let resolved = match parsed.ok().and_then(char::from_u32) {
                Some(c) => c,
                None => {
                    self.report_error(HtmlCode::MalformedCharRef, &[&name]);
                    return self.reject_reference(content, text);
                }
            };
            if content {
                let notify = self.config.notify_char_refs;
                self.deliver_reference(&name, resolved, notify)?;
            }
            return Ok(Some(resolved));
        }
        match entities::get(&name) {
            Some(resolved) => {
                if content {
                    let notify = self.config.notify_html_builtin_refs
                        || (self.config.notify_xml_builtin_refs
                            && matches!(name.as_str(), "amp" | "lt" | "gt" | "quot" | "apos"));
                    self.deliver_reference(&name, resolved, notify)?;
                }
                Ok(Some(resolved))
            }
            None => {
                self.report_warning(HtmlCode::UnknownEntity, &[&name]);
                self.reject_reference(content, text)
            }
        }
    }

    /// Delivers an unresolvable reference as literal text (content mode
    /// only) and yields `None`.
    fn reject_reference(&mut self, content: bool, text: &str) -> ScanResult<Option<char>> {
        if content {
            self.mark_end();
            if self.emitting() {
                let augs = self.location_augs();
                self.handler.characters(text, augs.as_ref());
                self.drain_pending()?;
            }
        }
        Ok(None)
    }

    /// Delivers a resolved reference, optionally wrapped in
    /// general-entity boundary events.
    fn deliver_reference(&mut self, name: &str, c: char, notify: bool) -> ScanResult<()> {
        self.mark_end();
        if self.emitting() {
            let augs = self.location_augs();
            if notify {
                self.handler.start_general_entity(name, augs.as_ref());
            }
            let mut utf8 = [0u8; 4];
            self.handler.characters(c.encode_utf8(&mut utf8), augs.as_ref());
            if notify {
                self.handler.end_general_entity(name, augs.as_ref());
            }
            self.drain_pending()?;
        }
        Ok(())
    }
}
