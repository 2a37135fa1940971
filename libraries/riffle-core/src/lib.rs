//! Riffle - Core Types
//!
//! Domain value types shared by the playback core and the server client:
//! typed identifiers, the [`Track`] value object, queue provenance
//! ([`QueueOrigin`]) and playlist ordering entries.
//!
//! This crate has no I/O and no async code.

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::*;
