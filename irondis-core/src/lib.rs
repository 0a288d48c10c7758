//! # IronDIS Core
//!
//! Core types and traits for marshalling fixed-layout DIS records.
//!
//! This crate provides:
//! - Big-endian cursor traits and implementations ([`WireWriter`], [`WireReader`])
//! - The [`WireRecord`] codec contract with its field table
//! - Value semantics helpers: field-order hashing and textual dumps
//! - A [`FailureChannel`] for best-effort processing of record streams
//! - Stream framing over `tokio_util` codecs (feature `framing`)

// Lets `#[derive(WireRecord)]` refer to `::irondis_core` inside this crate.
extern crate self as irondis_core;

pub mod cursor;
pub mod dump;
pub mod error;
pub mod failure;
#[cfg(feature = "framing")]
pub mod framing;
pub mod hash;
pub mod record;
pub mod types;

pub use cursor::{SliceReader, SliceWriter, StreamReader, StreamWriter, WireReader, WireWriter};
pub use error::{CodecError, Result};
pub use failure::{FailureChannel, Observed, ObserverId};
#[cfg(feature = "framing")]
pub use framing::RecordCodec;
pub use hash::WireHasher;
pub use irondis_derive::WireRecord;
pub use record::{AnyRecord, WireRecord};
pub use types::{FieldDescriptor, FieldValue, WireScalar, WireType};
