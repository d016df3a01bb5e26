//! Shared test harness: a handler that records events as readable
//! lines and a reporter that collects diagnostic codes.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use tagsoup::{
    Attributes, Config, DocumentHandler, ErrorReporter, HtmlCode, InputSource, Location, Locator,
    QName, Scanner,
};

/// Records delivered events. Adjacent character runs are merged, since
/// the scanner may legally split text at window and `<` boundaries.
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<String>,
}

impl Recorder {
    fn merge_characters(&mut self, text: &str) {
        if let Some(last) = self.events.last_mut() {
            if let Some(body) = last
                .strip_prefix("Characters(")
                .and_then(|s| s.strip_suffix(')'))
            {
                *last = format!("Characters({}{})", body, text);
                return;
            }
        }
        self.events.push(format!("Characters({})", text));
    }
}

impl DocumentHandler for Recorder {
    fn start_document(&mut self, _: &Locator, encoding: Option<&str>, _: Option<&Location>) {
        match encoding {
            Some(encoding) => self.events.push(format!("StartDocument({})", encoding)),
            None => self.events.push("StartDocument".to_string()),
        }
    }

    fn end_document(&mut self, _: Option<&Location>) {
        self.events.push("EndDocument".to_string());
    }

    fn start_element(&mut self, name: &QName, attributes: &Attributes, _: Option<&Location>) {
        if attributes.is_empty() {
            self.events.push(format!("StartElement({})", name.raw));
        } else {
            let rendered: Vec<String> = attributes
                .iter()
                .map(|a| format!("{}={:?}", a.name.raw, a.value))
                .collect();
            self.events.push(format!(
                "StartElement({} [{}])",
                name.raw,
                rendered.join(", ")
            ));
        }
    }

    fn end_element(&mut self, name: &QName, _: Option<&Location>) {
        self.events.push(format!("EndElement({})", name.raw));
    }

    fn characters(&mut self, text: &str, _: Option<&Location>) {
        self.merge_characters(text);
    }

    fn comment(&mut self, text: &str, _: Option<&Location>) {
        self.events.push(format!("Comment({})", text));
    }

    fn start_general_entity(&mut self, name: &str, _: Option<&Location>) {
        self.events.push(format!("StartEntity({})", name));
    }

    fn end_general_entity(&mut self, name: &str, _: Option<&Location>) {
        self.events.push(format!("EndEntity({})", name));
    }
}

/// Collects diagnostics as `"E HTML1234 args"` / `"W HTML1234 args"`
/// lines behind a shared handle.
#[derive(Clone, Default)]
pub struct Reports(pub Rc<RefCell<Vec<String>>>);

impl Reports {
    fn record(&mut self, severity: char, code: HtmlCode, args: &[&str]) {
        let mut line = format!("{} {}", severity, code.code());
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.0.borrow_mut().push(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl ErrorReporter for Reports {
    fn report_error(&mut self, code: HtmlCode, args: &[&str], _: &Locator) {
        self.record('E', code, args);
    }

    fn report_warning(&mut self, code: HtmlCode, args: &[&str], _: &Locator) {
        self.record('W', code, args);
    }
}

/// Scans a source to completion and returns the recorded events and
/// diagnostics. Error reporting is always enabled here.
pub fn scan_source(mut config: Config, source: InputSource) -> (Vec<String>, Vec<String>) {
    config.report_errors = true;
    let reports = Reports::default();
    let handle = reports.clone();
    let mut scanner = Scanner::with_config(config, Recorder::default());
    scanner.set_reporter(Box::new(reports));
    scanner.set_input_source(source).unwrap();
    scanner.scan_document(true).unwrap();
    (scanner.into_handler().events, handle.lines())
}

/// Scans in-memory text with a default configuration.
pub fn scan_text(html: &str) -> Vec<String> {
    scan_source(Config::default(), InputSource::from_text(html)).0
}

/// Scans raw bytes with a default configuration.
pub fn scan_bytes(bytes: &[u8]) -> (Vec<String>, Vec<String>) {
    scan_source(Config::default(), InputSource::from_bytes(bytes.to_vec()))
}
