//! Dashboard metadata record with a normalizing content slot.
//!
//! A [`Metadata`] carries the identity and ownership attributes of a stored
//! dashboard plus its payload, which producers may supply as bytes, text or
//! an open stream. This crate has no storage, transport or identifier
//! generation of its own; repositories and deserializers populate records
//! and hand them on.

pub mod content;
pub mod error;
pub mod metadata;

pub use content::{
  Content, ContentKind, ContentReader, ContentSource, ContentStream,
};
pub use error::{Error, ErrorKind, Result};
pub use metadata::Metadata;
