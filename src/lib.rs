//! Permissive streaming HTML tokenizer.
//!
//! ## Description
//!
//! `tagsoup` turns a byte or character stream of HTML into a sequence
//! of document events: start-document, start-element with attributes,
//! characters, comments, end-element, end-document. It is the front of
//! a tag-soup pipeline: it never balances tags, never validates, and
//! never rejects input. Something is emitted for every byte, with
//! precise line/column tracking.
//!
//! What it does handle, because real-world HTML demands it:
//!
//! - encoding auto-detection: byte order marks, a declared encoding, a
//!   configurable fallback, and the `<meta http-equiv=content-type>`
//!   charset discovered mid-document, after which the buffered bytes
//!   are replayed through the new decoder;
//! - raw-text elements (`<script>`, `<style>`, ...) whose content is
//!   opaque until their own end tag;
//! - entity references, numeric and named, inside text and attribute
//!   values, with unknown references passed through literally;
//! - newline normalization: every `\r`, `\n` or `\r\n` reaches the
//!   handler as a single `\n`;
//! - nested input sources: a handler may push a character stream and
//!   the suspended stream resumes at the exact character where it was
//!   interrupted.
//!
//! ## Example
//!
//! ```
//! use tagsoup::{Attributes, DocumentHandler, InputSource, Location, QName, Scanner};
//!
//! #[derive(Default)]
//! struct Outline {
//!     events: Vec<String>,
//! }
//!
//! impl DocumentHandler for Outline {
//!     fn start_element(&mut self, name: &QName, attributes: &Attributes, _: Option<&Location>) {
//!         self.events.push(format!("<{} ({})>", name.raw, attributes.len()));
//!     }
//!
//!     fn end_element(&mut self, name: &QName, _: Option<&Location>) {
//!         self.events.push(format!("</{}>", name.raw));
//!     }
//!
//!     fn characters(&mut self, text: &str, _: Option<&Location>) {
//!         self.events.push(format!("{:?}", text));
//!     }
//! }
//!
//! let mut scanner = Scanner::new(Outline::default());
//! scanner
//!     .set_input_source(InputSource::from_text("<p class=x>hi</p>"))
//!     .unwrap();
//! scanner.scan_document(true).unwrap();
//! assert_eq!(
//!     scanner.handler().events,
//!     ["<p (1)>", "\"hi\"", "</p>"]
//! );
//! ```
//!
//! Scanning can also be driven in chunks: `scan_document(false)`
//! returns after a unit of progress, and repeated calls produce the
//! same total event sequence as a single complete call.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod elements;
pub mod entities;
pub mod errors;
pub mod events;
pub mod input;
pub mod playback;
pub mod scanner;

pub use crate::config::{Config, NameCase};
pub use crate::errors::{Error, ErrorReporter, HtmlCode, Result};
pub use crate::events::{
    Attribute, Attributes, DocumentHandler, Location, Locator, QName,
};
pub use crate::input::{expand_system_id, CharRead, InputSource, StringReader};
pub use crate::playback::PlaybackStream;
pub use crate::scanner::Scanner;
