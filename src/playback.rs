//! Byte stream buffering with replay support.
//!
//! An HTML document may declare its own encoding in a `<meta>` tag that
//! is only discovered after part of the document has already been
//! decoded under a provisional encoding. [`PlaybackStream`] records
//! every byte handed out so that the scanner can rewind to byte zero
//! and decode the prefix again, then releases the recording as soon as
//! it can no longer be needed.

use std::io::Read;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

use crate::errors::{Error, Result};

/// Unicode "byte order mark" encoded as UTF-8.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// Unicode "byte order mark" encoded as UTF-16 with little-endian byte order.
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// Unicode "byte order mark" encoded as UTF-16 with big-endian byte order.
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// A byte source that records what it hands out until told to stop.
///
/// Three phases:
///
/// 1. **Recording** (initial): every byte returned by a read is
///    appended to an internal buffer.
/// 2. **Playback** (after [`playback()`]): reads are served from the
///    buffer, from byte zero; when the buffer is exhausted the stream
///    clears itself and reads pass through to the source again.
/// 3. **Cleared** (after [`clear()`] or playback exhaustion): the
///    buffer is released and reads pass straight through.
///
/// [`playback()`]: Self::playback
/// [`clear()`]: Self::clear
pub struct PlaybackStream {
    source: Box<dyn Read>,
    buffer: Vec<u8>,
    byte_offset: usize,
    /// Bytes probed for a BOM that turned out not to be one; they are
    /// re-served ahead of the source.
    pushback: [u8; 3],
    pushback_offset: usize,
    pushback_length: usize,
    detected: bool,
    playback: bool,
    cleared: bool,
}

impl PlaybackStream {
    /// Wraps a raw byte source.
    pub fn new(source: Box<dyn Read>) -> Self {
        Self {
            source,
            buffer: Vec::new(),
            byte_offset: 0,
            pushback: [0; 3],
            pushback_offset: 0,
            pushback_length: 0,
            detected: false,
            playback: false,
            cleared: false,
        }
    }

    /// Probes up to three bytes for a byte order mark.
    ///
    /// Returns `(iana_name, encoding)` for a recognized mark, with the
    /// mark consumed:
    ///
    /// - `EF BB BF` is `("UTF-8", UTF_8)`;
    /// - `FF FE` is `("UTF-16", UTF_16LE)`;
    /// - `FE FF` is `("UTF-16", UTF_16BE)`.
    ///
    /// Anything else returns `(None, None)` and the probed bytes are
    /// pushed back to be re-read as document content. A second call
    /// fails with [`Error::EncodingDetectedTwice`].
    pub fn detect_encoding(
        &mut self,
    ) -> Result<(Option<&'static str>, Option<&'static Encoding>)> {
        if self.detected {
            return Err(Error::EncodingDetectedTwice);
        }
        self.detected = true;

        let mut probe = [0u8; 3];
        let count = self.probe(&mut probe[..2])?;
        if count < 2 {
            self.push_back(&probe[..count]);
            return Ok((None, None));
        }
        if probe[..2] == UTF16_LE_BOM {
            return Ok((Some("UTF-16"), Some(UTF_16LE)));
        }
        if probe[..2] == UTF16_BE_BOM {
            return Ok((Some("UTF-16"), Some(UTF_16BE)));
        }
        if probe[..2] == UTF8_BOM[..2] {
            let third = self.probe(&mut probe[2..3])?;
            if third == 1 && probe == UTF8_BOM {
                return Ok((Some("UTF-8"), Some(UTF_8)));
            }
            self.push_back(&probe[..2 + third]);
            return Ok((None, None));
        }
        self.push_back(&probe[..2]);
        Ok((None, None))
    }

    /// Reads bytes into `buf`, serving pushback and replayed bytes
    /// ahead of the underlying source. Returns the number of bytes
    /// read; zero means end of input.
    pub fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.pushback_offset < self.pushback_length {
            let avail = self.pushback_length - self.pushback_offset;
            let n = avail.min(buf.len());
            let start = self.pushback_offset;
            buf[..n].copy_from_slice(&self.pushback[start..start + n]);
            self.pushback_offset += n;
            if !self.cleared && !self.playback {
                self.append(&buf[..n]);
            }
            return Ok(n);
        }
        if self.playback {
            let avail = self.buffer.len() - self.byte_offset;
            let n = avail.min(buf.len());
            buf[..n].copy_from_slice(&self.buffer[self.byte_offset..self.byte_offset + n]);
            self.byte_offset += n;
            if self.byte_offset == self.buffer.len() {
                self.playback = false;
                self.cleared = true;
                self.buffer = Vec::new();
            }
            return Ok(n);
        }
        let n = self.source.read(buf)?;
        if n > 0 && !self.cleared {
            self.append(&buf[..n]);
        }
        Ok(n)
    }

    /// Reads a single byte. `None` means end of input.
    pub fn read_byte(&mut self) -> std::io::Result<Option<u8>> {
        if self.pushback_offset < self.pushback_length {
            let b = self.pushback[self.pushback_offset];
            self.pushback_offset += 1;
            if !self.cleared && !self.playback {
                if self.buffer.len() == self.buffer.capacity() {
                    self.buffer.reserve_exact(1024);
                }
                self.buffer.push(b);
            }
            return Ok(Some(b));
        }
        if self.playback {
            let b = self.buffer[self.byte_offset];
            self.byte_offset += 1;
            if self.byte_offset == self.buffer.len() {
                self.playback = false;
                self.cleared = true;
                self.buffer = Vec::new();
            }
            return Ok(Some(b));
        }
        let mut one = [0u8; 1];
        loop {
            match self.source.read(&mut one) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        if !self.cleared {
            if self.buffer.len() == self.buffer.capacity() {
                self.buffer.reserve_exact(1024);
            }
            self.buffer.push(one[0]);
        }
        Ok(Some(one[0]))
    }

    /// Rewinds to byte zero; subsequent reads replay every recorded
    /// byte before touching the source again.
    pub fn playback(&mut self) {
        if !self.cleared {
            if self.buffer.is_empty() {
                // nothing recorded, nothing to replay
                self.cleared = true;
                return;
            }
            self.playback = true;
            self.byte_offset = 0;
        }
    }

    /// Stops recording and releases the buffer. Ignored while a replay
    /// is in progress.
    pub fn clear(&mut self) {
        if !self.playback {
            self.cleared = true;
            self.buffer = Vec::new();
        }
    }

    /// Whether the recording buffer has been released.
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Whether a replay is in progress.
    pub fn is_playback(&self) -> bool {
        self.playback
    }

    /// Reads raw bytes from the source without recording them; used
    /// only for the BOM probe.
    fn probe(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
        Ok(filled)
    }

    fn push_back(&mut self, bytes: &[u8]) {
        self.pushback[..bytes.len()].copy_from_slice(bytes);
        self.pushback_offset = 0;
        self.pushback_length = bytes.len();
    }

    fn append(&mut self, bytes: &[u8]) {
        if self.buffer.len() + bytes.len() > self.buffer.capacity() {
            self.buffer.reserve_exact(512 + bytes.len());
        }
        self.buffer.extend_from_slice(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn stream(bytes: &[u8]) -> PlaybackStream {
        PlaybackStream::new(Box::new(Cursor::new(bytes.to_vec())))
    }

    fn drain(s: &mut PlaybackStream) -> Vec<u8> {
        let mut out = Vec::new();
        let mut buf = [0u8; 7];
        loop {
            let n = s.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        out
    }

    #[test]
    fn utf8_bom_is_consumed() {
        let mut s = stream(b"\xEF\xBB\xBF<p>");
        let (iana, enc) = s.detect_encoding().unwrap();
        assert_eq!(iana, Some("UTF-8"));
        assert_eq!(enc, Some(UTF_8));
        assert_eq!(drain(&mut s), b"<p>");
    }

    #[test]
    fn utf16_boms() {
        let mut s = stream(b"\xFF\xFEx");
        assert_eq!(s.detect_encoding().unwrap().0, Some("UTF-16"));

        let mut s = stream(b"\xFE\xFFx");
        let (iana, enc) = s.detect_encoding().unwrap();
        assert_eq!(iana, Some("UTF-16"));
        assert_eq!(enc, Some(UTF_16BE));
    }

    #[test]
    fn non_bom_bytes_come_back() {
        let mut s = stream(b"<p>x</p>");
        let (iana, enc) = s.detect_encoding().unwrap();
        assert_eq!(iana, None);
        assert_eq!(enc, None);
        assert_eq!(drain(&mut s), b"<p>x</p>");
    }

    #[test]
    fn partial_utf8_bom_comes_back() {
        let mut s = stream(b"\xEF\xBBx");
        assert_eq!(s.detect_encoding().unwrap().0, None);
        assert_eq!(drain(&mut s), b"\xEF\xBBx");
    }

    #[test]
    fn detection_twice_fails() {
        let mut s = stream(b"<p>");
        s.detect_encoding().unwrap();
        assert!(matches!(
            s.detect_encoding(),
            Err(Error::EncodingDetectedTwice)
        ));
    }

    #[test]
    fn playback_replays_from_byte_zero() {
        let mut s = stream(b"abcdef");
        let mut buf = [0u8; 3];
        assert_eq!(s.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf, b"abc");

        s.playback();
        assert!(s.is_playback());
        assert_eq!(drain(&mut s), b"abcdef");
        assert!(s.is_cleared());
    }

    #[test]
    fn clear_is_ignored_during_playback() {
        let mut s = stream(b"abcdef");
        let mut buf = [0u8; 4];
        s.read(&mut buf).unwrap();
        s.playback();
        s.clear();
        assert!(!s.is_cleared());
        assert_eq!(drain(&mut s), b"abcdef");
    }

    #[test]
    fn cleared_stream_stops_recording() {
        let mut s = stream(b"abcdef");
        let mut buf = [0u8; 2];
        s.read(&mut buf).unwrap();
        s.clear();
        assert!(s.is_cleared());
        assert_eq!(drain(&mut s), b"cdef");
    }

    #[test]
    fn single_byte_reads_record_too() {
        let mut s = stream(b"xyz");
        assert_eq!(s.read_byte().unwrap(), Some(b'x'));
        assert_eq!(s.read_byte().unwrap(), Some(b'y'));
        s.playback();
        assert_eq!(drain(&mut s), b"xyz");
        assert_eq!(s.read_byte().unwrap(), None);
    }
}
