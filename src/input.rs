//! Input sources and system-identifier resolution.

use std::env;
use std::io::{self, Read};

/// A source of decoded characters.
///
/// Implement this to push pre-decoded text (for example the output of
/// an embedded script) into the scanner; byte inputs go through the
/// scanner's own decoder instead.
pub trait CharRead {
    /// Reads characters into `out`, returning how many were written.
    /// Zero means end of input.
    fn read_chars(&mut self, out: &mut [char]) -> io::Result<usize>;
}

/// A [`CharRead`] over an owned string.
#[derive(Debug)]
pub struct StringReader {
    chars: Vec<char>,
    pos: usize,
}

impl StringReader {
    /// Creates a reader over the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            chars: text.into().chars().collect(),
            pos: 0,
        }
    }
}

impl CharRead for StringReader {
    fn read_chars(&mut self, out: &mut [char]) -> io::Result<usize> {
        let avail = self.chars.len() - self.pos;
        let n = avail.min(out.len());
        out[..n].copy_from_slice(&self.chars[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// A single input to scan: identifiers plus exactly one of a byte
/// stream (decoded by the scanner) or a character stream.
pub struct InputSource {
    /// Public identifier, if any.
    pub public_id: Option<String>,
    /// The system identifier as written.
    pub system_id: Option<String>,
    /// Base URI the system identifier resolves against.
    pub base_system_id: Option<String>,
    /// Encoding label for the byte stream, when known up front.
    pub encoding: Option<String>,
    /// Raw bytes; decoded by the scanner with BOM and `<meta>` charset
    /// handling.
    pub byte_stream: Option<Box<dyn Read>>,
    /// Pre-decoded characters; takes precedence over `byte_stream`.
    pub char_stream: Option<Box<dyn CharRead>>,
}

impl InputSource {
    /// An empty source; populate the fields you need.
    pub fn new() -> Self {
        Self {
            public_id: None,
            system_id: None,
            base_system_id: None,
            encoding: None,
            byte_stream: None,
            char_stream: None,
        }
    }

    /// A source over an in-memory byte buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mut source = Self::new();
        source.byte_stream = Some(Box::new(io::Cursor::new(bytes)));
        source
    }

    /// A source over an arbitrary byte reader.
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        let mut source = Self::new();
        source.byte_stream = Some(Box::new(reader));
        source
    }

    /// A source over already-decoded text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut source = Self::new();
        source.char_stream = Some(Box::new(StringReader::new(text)));
        source
    }

    /// Sets the declared encoding label.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Sets the system identifier.
    pub fn with_system_id(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = Some(system_id.into());
        self
    }

    /// Sets the base system identifier.
    pub fn with_base_system_id(mut self, base: impl Into<String>) -> Self {
        self.base_system_id = Some(base.into());
        self
    }

    /// Sets the public identifier.
    pub fn with_public_id(mut self, public_id: impl Into<String>) -> Self {
        self.public_id = Some(public_id.into());
        self
    }
}

impl Default for InputSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Expands a system identifier to an absolute URI.
///
/// A string that already looks like a URI is returned unchanged.
/// Otherwise platform paths are normalized (backslashes become `/`, a
/// drive letter gets a leading `/`, a `//` share gets a `file:`
/// prefix) and the result is resolved against `base`, or against
/// `file://<cwd>/` when no usable base is given. On any failure the
/// original identifier comes back untouched.
pub fn expand_system_id(system_id: &str, base: Option<&str>) -> String {
    if system_id.is_empty() || (has_scheme(system_id) && !system_id.contains('\\')) {
        return system_id.to_string();
    }
    let id = fix_uri(system_id);
    let base = match base {
        Some(b) if !b.is_empty() && b != system_id => {
            let fixed = fix_uri(b);
            if has_scheme(&fixed) {
                fixed
            } else if b.contains(':') {
                format!("file:{}", fixed)
            } else {
                format!("file://{}/", cwd_for_uri())
            }
        }
        _ => format!("file://{}/", cwd_for_uri()),
    };
    combine(&base, &id)
}

/// `scheme:` per RFC 3986: an ASCII letter followed by letters, digits,
/// `+`, `-` or `.`, then a colon. A single-letter prefix is taken for a
/// Windows drive letter, not a scheme.
fn has_scheme(uri: &str) -> bool {
    let bytes = uri.as_bytes();
    if bytes.first().map_or(true, |b| !b.is_ascii_alphabetic()) {
        return false;
    }
    for (i, &b) in bytes[1..].iter().enumerate() {
        match b {
            b':' => return i > 0,
            b if b.is_ascii_alphanumeric() => {}
            b'+' | b'-' | b'.' => {}
            _ => return false,
        }
    }
    false
}

fn fix_uri(path: &str) -> String {
    let mut fixed = path.replace('\\', "/");
    let bytes = fixed.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        fixed.insert(0, '/');
    } else if fixed.starts_with("//") {
        fixed.insert_str(0, "file:");
    }
    fixed
}

/// The process working directory with `/` separators, or an empty
/// string when it cannot be read.
fn cwd_for_uri() -> String {
    match env::current_dir() {
        Ok(dir) => fix_uri(&dir.to_string_lossy()),
        Err(_) => String::new(),
    }
}

/// Resolves `id` against `base`, both already fixed. Best effort: on a
/// base without a recognizable structure the identifier itself wins.
fn combine(base: &str, id: &str) -> String {
    if id.starts_with('/') {
        // absolute path: keep the base's scheme and authority
        match base.find("://") {
            Some(scheme_end) => {
                let authority_end = base[scheme_end + 3..]
                    .find('/')
                    .map(|i| scheme_end + 3 + i)
                    .unwrap_or(base.len());
                format!("{}{}", &base[..authority_end], id)
            }
            None => match base.find(':') {
                Some(colon) => format!("{}:{}", &base[..colon], id),
                None => id.to_string(),
            },
        }
    } else {
        match base.rfind('/') {
            Some(slash) => format!("{}{}", &base[..slash + 1], id),
            None => id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn string_reader_drains() {
        let mut r = StringReader::new("héllo");
        let mut buf = ['\0'; 3];
        assert_eq!(r.read_chars(&mut buf).unwrap(), 3);
        assert_eq!(&buf, &['h', 'é', 'l']);
        assert_eq!(r.read_chars(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &['l', 'o']);
        assert_eq!(r.read_chars(&mut buf).unwrap(), 0);
    }

    #[test]
    fn uris_pass_through() {
        assert_eq!(
            expand_system_id("http://example.com/a", None),
            "http://example.com/a"
        );
        assert_eq!(
            expand_system_id("file:///tmp/x.html", Some("http://example.com/")),
            "file:///tmp/x.html"
        );
    }

    #[test]
    fn relative_against_base() {
        assert_eq!(
            expand_system_id("page.html", Some("http://example.com/dir/index.html")),
            "http://example.com/dir/page.html"
        );
        assert_eq!(
            expand_system_id("/root.html", Some("http://example.com/dir/index.html")),
            "http://example.com/root.html"
        );
    }

    #[test]
    fn windows_paths_are_fixed() {
        assert_eq!(
            expand_system_id("c:\\docs\\x.html", Some("file:///base/")),
            "file:///c:/docs/x.html"
        );
    }

    #[test]
    fn no_base_falls_back_to_cwd() {
        let expanded = expand_system_id("x.html", None);
        assert!(expanded.starts_with("file://"));
        assert!(expanded.ends_with("/x.html"));
    }

    #[test]
    fn scheme_detection() {
        assert!(has_scheme("http://x"));
        assert!(has_scheme("file:/x"));
        assert!(!has_scheme("c:/drive/letter.html"));
        assert!(!has_scheme("c\\x"));
        assert!(!has_scheme("/absolute/path"));
        assert!(!has_scheme("plain.html"));
    }
}
