//! Error types for `dashboard-metadata`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Reading the content stream failed while decoding it to text.
  #[error("error in retrieving dashboard content: {0}")]
  ContentRetrieval(#[source] std::io::Error),

  #[error("resource content is empty")]
  EmptyContent,

  #[error("timestamp out of range: {0} ms")]
  InvalidTimestamp(i64),
}

/// The category of an [`Error`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  ContentRetrieval,
  EmptyContent,
  InvalidTimestamp,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::ContentRetrieval(_) => ErrorKind::ContentRetrieval,
      Self::EmptyContent => ErrorKind::EmptyContent,
      Self::InvalidTimestamp(_) => ErrorKind::InvalidTimestamp,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
