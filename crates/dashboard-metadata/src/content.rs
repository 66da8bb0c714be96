//! The dashboard content slot and its physical representations.
//!
//! Producers hand over the dashboard payload in whatever form they already
//! hold: raw bytes from a database column, a decoded string from a
//! deserializer, or an open stream. Nothing is normalized on write; the
//! record converts on read (see [`crate::metadata::Metadata::content`] and
//! [`crate::metadata::Metadata::content_stream`]).

use std::{
  fmt,
  io::{self, BufRead, Cursor, Read},
};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

// ─── Stream sources ──────────────────────────────────────────────────────────

/// A readable byte source with an explicit, fallible release step.
///
/// Implement this directly for sources whose close can fail (sockets, files
/// with pending writes, test stubs). Plain readers go through
/// [`ContentStream::from_reader`].
pub trait ContentSource: Read + Send {
  /// Release the underlying resource. Called at most once per source.
  fn close(&mut self) -> io::Result<()>;
}

/// Adapter for readers that have nothing to do on close beyond being dropped.
struct ReaderSource<R>(R);

impl<R: Read + Send> Read for ReaderSource<R> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> { self.0.read(buf) }
}

impl<R: Read + Send> ContentSource for ReaderSource<R> {
  fn close(&mut self) -> io::Result<()> { Ok(()) }
}

/// An open, single-consumer byte stream held in the content slot.
///
/// Reads advance a shared position; once closed, every further read fails.
pub struct ContentStream {
  source: Option<Box<dyn ContentSource>>,
}

impl ContentStream {
  pub fn new(source: impl ContentSource + 'static) -> Self {
    Self {
      source: Some(Box::new(source)),
    }
  }

  /// Wrap any reader; closing it simply drops it.
  pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
    Self::new(ReaderSource(reader))
  }

  pub fn is_closed(&self) -> bool { self.source.is_none() }

  /// Close and drop the underlying source. Closing twice is a no-op.
  pub fn close(&mut self) -> io::Result<()> {
    match self.source.take() {
      Some(mut source) => source.close(),
      None => Ok(()),
    }
  }
}

impl Read for ContentStream {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    match self.source.as_mut() {
      Some(source) => source.read(buf),
      None => Err(io::Error::other("content stream is closed")),
    }
  }
}

impl fmt::Debug for ContentStream {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ContentStream")
      .field("closed", &self.is_closed())
      .finish()
  }
}

// ─── Content ─────────────────────────────────────────────────────────────────

/// Which physical representation the content slot currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
  Bytes,
  Text,
  Stream,
}

impl ContentKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Bytes => "bytes",
      Self::Text => "text",
      Self::Stream => "stream",
    }
  }
}

impl fmt::Display for ContentKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The dashboard payload in one of its admissible representations.
#[derive(Debug)]
pub enum Content {
  Bytes(Bytes),
  Text(String),
  Stream(ContentStream),
}

impl Content {
  pub fn kind(&self) -> ContentKind {
    match self {
      Self::Bytes(_) => ContentKind::Bytes,
      Self::Text(_) => ContentKind::Text,
      Self::Stream(_) => ContentKind::Stream,
    }
  }

  /// A reader over the payload. Buffered variants get a fresh, independent
  /// cursor; a stream is lent out as-is.
  pub(crate) fn reader(&mut self) -> ContentReader<'_> {
    match self {
      Self::Bytes(bytes) => ContentReader::Buffer(Cursor::new(bytes.clone())),
      Self::Text(text) => ContentReader::Buffer(Cursor::new(
        Bytes::copy_from_slice(text.as_bytes()),
      )),
      Self::Stream(stream) => ContentReader::Stream(stream),
    }
  }
}

impl From<Bytes> for Content {
  fn from(bytes: Bytes) -> Self { Self::Bytes(bytes) }
}

impl From<Vec<u8>> for Content {
  fn from(bytes: Vec<u8>) -> Self { Self::Bytes(Bytes::from(bytes)) }
}

impl From<&[u8]> for Content {
  fn from(bytes: &[u8]) -> Self { Self::Bytes(Bytes::copy_from_slice(bytes)) }
}

impl From<String> for Content {
  fn from(text: String) -> Self { Self::Text(text) }
}

impl From<&str> for Content {
  fn from(text: &str) -> Self { Self::Text(text.to_string()) }
}

impl From<ContentStream> for Content {
  fn from(stream: ContentStream) -> Self { Self::Stream(stream) }
}

// ─── Readers ─────────────────────────────────────────────────────────────────

/// A readable view over the content slot, returned by
/// [`crate::metadata::Metadata::content_stream`].
///
/// `Buffer` is owned by the caller and independent of the record. `Stream`
/// borrows the record's only stream, so reading it consumes the payload.
#[derive(Debug)]
pub enum ContentReader<'a> {
  Buffer(Cursor<Bytes>),
  Stream(&'a mut ContentStream),
}

impl ContentReader<'_> {
  /// `true` when reading this does not consume the record's payload.
  pub fn is_repeatable(&self) -> bool { matches!(self, Self::Buffer(_)) }
}

impl Read for ContentReader<'_> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    match self {
      Self::Buffer(cursor) => cursor.read(buf),
      Self::Stream(stream) => stream.read(buf),
    }
  }
}

// ─── Decoding ────────────────────────────────────────────────────────────────

/// Read `reader` line by line and join the lines with no separator.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Each line is decoded on its
/// own, so a malformed sequence never spans a line break; invalid UTF-8 is
/// replaced with U+FFFD.
pub(crate) fn read_joined_lines<R: BufRead>(
  reader: &mut R,
) -> io::Result<String> {
  let mut joined = String::new();
  let mut chunk = Vec::new();
  loop {
    chunk.clear();
    if reader.read_until(b'\n', &mut chunk)? == 0 {
      break;
    }
    let body = chunk.strip_suffix(b"\n").unwrap_or(&chunk[..]);
    // A lone `\r` inside the chunk also ends a line.
    for line in body.split(|b| *b == b'\r') {
      joined.push_str(&String::from_utf8_lossy(line));
    }
  }
  Ok(joined)
}
