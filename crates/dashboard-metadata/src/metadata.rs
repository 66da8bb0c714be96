//! The dashboard metadata record.
//!
//! A `Metadata` is a plain value object: a handful of identity and ownership
//! attributes plus the content slot. It enforces no invariants across fields;
//! uniqueness, hierarchy and timestamp ordering belong to whichever store
//! produced it.

use std::io::BufReader;

use chrono::{DateTime, Utc};

use crate::{
  content::{
    Content, ContentKind, ContentReader, ContentStream, read_joined_lines,
  },
  error::{Error, Result},
};

/// A single dashboard record.
#[derive(Debug, Default)]
pub struct Metadata {
  id:                Option<String>,
  url:               Option<String>,
  name:              Option<String>,
  version:           Option<String>,
  description:       Option<String>,
  owner:             Option<String>,
  last_updated_by:   Option<String>,
  created_time:      DateTime<Utc>,
  last_updated_time: DateTime<Utc>,
  shared:            bool,
  /// Unchecked reference to the parent dashboard, if any.
  parent_id:         Option<String>,
  content:           Option<Content>,
}

// ─── Attributes ──────────────────────────────────────────────────────────────

impl Metadata {
  pub fn new() -> Self { Self::default() }

  /// The DB-level identifier.
  pub fn id(&self) -> Option<&str> { self.id.as_deref() }

  pub fn set_id(&mut self, id: impl Into<String>) { self.id = Some(id.into()); }

  pub fn url(&self) -> Option<&str> { self.url.as_deref() }

  pub fn set_url(&mut self, url: impl Into<String>) {
    self.url = Some(url.into());
  }

  pub fn name(&self) -> Option<&str> { self.name.as_deref() }

  pub fn set_name(&mut self, name: impl Into<String>) {
    self.name = Some(name.into());
  }

  pub fn version(&self) -> Option<&str> { self.version.as_deref() }

  pub fn set_version(&mut self, version: impl Into<String>) {
    self.version = Some(version.into());
  }

  pub fn description(&self) -> Option<&str> { self.description.as_deref() }

  pub fn set_description(&mut self, description: impl Into<String>) {
    self.description = Some(description.into());
  }

  pub fn owner(&self) -> Option<&str> { self.owner.as_deref() }

  pub fn set_owner(&mut self, owner: impl Into<String>) {
    self.owner = Some(owner.into());
  }

  /// The user who last modified the dashboard.
  pub fn last_updated_by(&self) -> Option<&str> {
    self.last_updated_by.as_deref()
  }

  pub fn set_last_updated_by(&mut self, user: impl Into<String>) {
    self.last_updated_by = Some(user.into());
  }

  pub fn created_time(&self) -> DateTime<Utc> { self.created_time }

  pub fn set_created_time(&mut self, at: DateTime<Utc>) {
    self.created_time = at;
  }

  pub fn created_time_millis(&self) -> i64 {
    self.created_time.timestamp_millis()
  }

  /// Set the creation time from Unix epoch milliseconds.
  pub fn set_created_time_millis(&mut self, millis: i64) -> Result<()> {
    self.created_time = from_millis(millis)?;
    Ok(())
  }

  pub fn last_updated_time(&self) -> DateTime<Utc> { self.last_updated_time }

  pub fn set_last_updated_time(&mut self, at: DateTime<Utc>) {
    self.last_updated_time = at;
  }

  pub fn last_updated_time_millis(&self) -> i64 {
    self.last_updated_time.timestamp_millis()
  }

  /// Set the last-updated time from Unix epoch milliseconds.
  pub fn set_last_updated_time_millis(&mut self, millis: i64) -> Result<()> {
    self.last_updated_time = from_millis(millis)?;
    Ok(())
  }

  pub fn is_shared(&self) -> bool { self.shared }

  pub fn set_shared(&mut self, shared: bool) { self.shared = shared; }

  pub fn parent_id(&self) -> Option<&str> { self.parent_id.as_deref() }

  pub fn set_parent_id(&mut self, parent_id: impl Into<String>) {
    self.parent_id = Some(parent_id.into());
  }
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_millis(millis).ok_or(Error::InvalidTimestamp(millis))
}

// ─── Content ─────────────────────────────────────────────────────────────────

impl Metadata {
  /// Store the payload as given, replacing whatever was there before.
  pub fn set_content(&mut self, content: impl Into<Content>) {
    self.content = Some(content.into());
  }

  /// Reset the content slot to unset.
  pub fn clear_content(&mut self) { self.content = None; }

  /// Move the payload out, leaving the slot unset.
  pub fn take_content(&mut self) -> Option<Content> { self.content.take() }

  /// The representation currently held, or `None` when unset.
  pub fn content_kind(&self) -> Option<ContentKind> {
    self.content.as_ref().map(Content::kind)
  }

  /// A readable stream over the payload.
  ///
  /// Bytes and text yield a fresh, independent reader on every call. A
  /// stored stream is lent out as-is: reading it consumes the record's only
  /// copy, and a later call returns the same stream at its current position.
  pub fn content_stream(&mut self) -> Result<ContentReader<'_>> {
    self
      .content
      .as_mut()
      .map(Content::reader)
      .ok_or(Error::EmptyContent)
  }

  /// The payload decoded as UTF-8 text, with every line joined to the next
  /// without a separator (`"a\nb"` becomes `"ab"`).
  ///
  /// A stored stream is read to exhaustion and closed, whatever the outcome.
  /// The closed stream stays in the slot, so calling this again fails with
  /// [`Error::ContentRetrieval`].
  pub fn content(&mut self) -> Result<String> {
    if let Some(kind) = self.content_kind() {
      tracing::debug!(id = ?self.id, %kind, "decoding dashboard content");
    }
    let reader = self.content_stream()?;

    let decoded = match reader {
      ContentReader::Buffer(mut cursor) => read_joined_lines(&mut cursor),
      ContentReader::Stream(stream) => {
        let mut guard = CloseOnExit(stream);
        let decoded = read_joined_lines(&mut BufReader::new(&mut *guard.0));
        drop(guard);
        decoded
      }
    };
    decoded.map_err(Error::ContentRetrieval)
  }
}

/// Closes the borrowed stream when dropped. A close failure is logged and
/// goes no further, so it never replaces a decoded value or a read error.
struct CloseOnExit<'a>(&'a mut ContentStream);

impl Drop for CloseOnExit<'_> {
  fn drop(&mut self) {
    if let Err(e) = self.0.close() {
      tracing::error!(error = %e, "error in closing dashboard content stream");
    }
  }
}
