//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use irondis::prelude::*;
//! ```

// Cursors
pub use irondis_core::cursor::{
    SliceReader, SliceWriter, StreamReader, StreamWriter, WireReader, WireWriter,
};

// Codec and value semantics
pub use irondis_core::error::{CodecError, Result as CodecResult};
pub use irondis_core::record::AnyRecord;
pub use irondis_core::types::{FieldDescriptor, FieldValue, WireType};
pub use irondis_core::WireRecord;

// Failure handling
pub use irondis_core::failure::{FailureChannel, Observed, ObserverId};

#[cfg(feature = "framing")]
pub use irondis_core::framing::RecordCodec;

// Records
pub use irondis_records::{
    ClockTime, EntityId, EulerAngles, StorageFuel, StorageFuelReload, Vector3Double,
};
