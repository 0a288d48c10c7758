//! # IronDIS
//!
//! Byte-exact marshalling of fixed-layout DIS PDU records.
//!
//! Each record type is a plain struct of scalar fields. Its big-endian wire
//! format, equality, hash and textual dump all follow the declared field
//! order, generated by `#[derive(WireRecord)]`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use irondis::prelude::*;
//!
//! let reload = StorageFuelReload {
//!     standard_quantity: 1000,
//!     maximum_quantity: 5000,
//!     ..Default::default()
//! };
//!
//! let mut buf = Vec::new();
//! reload.encode(Some(&mut buf))?;
//!
//! let mut reader = SliceReader::new(&buf);
//! let decoded = StorageFuelReload::decode(Some(&mut reader))?;
//! assert_eq!(decoded, reload);
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Cursors, the record codec trait, failure channel, framing
//! - [`records`] - DIS record definitions

pub mod prelude;

/// Cursors, codec traits and value semantics.
pub mod core {
    pub use irondis_core::*;
}

/// DIS record definitions.
pub mod records {
    pub use irondis_records::*;
}

// Re-export commonly used items at the crate root
pub use irondis_core::{
    AnyRecord, CodecError, FailureChannel, Observed, WireReader, WireRecord, WireWriter,
};
pub use irondis_records::StorageFuelReload;
