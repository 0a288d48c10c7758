//! Record codec and value-semantics traits.
//!
//! This module provides the [`WireRecord`] trait implemented by every
//! fixed-layout record, and the object-safe [`AnyRecord`] view used when
//! records of different types travel together.
//!
//! Record types normally get their implementation from
//! `#[derive(WireRecord)]`, which generates the field table, the codec and
//! the `PartialEq`/`Eq`/`Hash` impls from the struct's declared field order.

use crate::cursor::{SliceReader, WireReader, WireWriter};
use crate::dump;
use crate::error::Result;
use crate::hash::WireHasher;
use crate::types::{FieldDescriptor, FieldValue, table_size};
use std::any::Any;
use std::fmt;
use std::hash::Hash;

/// Trait for fixed-layout records with a byte-exact wire format.
///
/// The field table ([`WireRecord::FIELDS`]) is the single source of truth
/// for field order: the codec, equality, hashing and dumps all follow it.
///
/// # Example
/// ```ignore
/// let reload = StorageFuelReload {
///     standard_quantity: 1000,
///     ..Default::default()
/// };
/// let mut buf = Vec::new();
/// let written = reload.encode(Some(&mut buf))?;
/// assert_eq!(written, reload.wire_size());
/// ```
pub trait WireRecord: Default + Clone + PartialEq + Eq + Hash + fmt::Debug + 'static {
    /// Record name used in dumps.
    const NAME: &'static str;

    /// Field table in declaration (and wire) order.
    const FIELDS: &'static [FieldDescriptor];

    /// Encoded size in bytes, the sum of the field widths.
    const WIRE_SIZE: usize = table_size(Self::FIELDS);

    /// Whether padding fields take part in equality and hashing.
    const COMPARES_PADDING: bool = true;

    /// Writes every field in declared order.
    ///
    /// # Errors
    /// Propagates the first cursor failure.
    fn write_fields<W: WireWriter + ?Sized>(&self, writer: &mut W) -> Result<()>;

    /// Reads every field in declared order into `self`.
    ///
    /// Fields read before a failure keep their new values.
    ///
    /// # Errors
    /// Propagates the first cursor failure.
    fn read_fields<R: WireReader + ?Sized>(&mut self, reader: &mut R) -> Result<()>;

    /// Returns the current field values in declared order.
    fn field_values(&self) -> Vec<FieldValue>;

    /// Returns the exact number of bytes [`WireRecord::encode`] produces.
    #[inline]
    fn wire_size(&self) -> usize {
        Self::WIRE_SIZE
    }

    /// Marshals the record.
    ///
    /// With no writer this is a silent no-op that returns `Ok(0)`.
    ///
    /// # Returns
    /// The number of bytes written.
    ///
    /// # Errors
    /// Returns the cursor failure; some fields may already have been written.
    fn encode(&self, writer: Option<&mut dyn WireWriter>) -> Result<usize> {
        let Some(writer) = writer else {
            return Ok(0);
        };
        self.write_fields(writer)?;
        Ok(Self::WIRE_SIZE)
    }

    /// Unmarshals into this record.
    ///
    /// With no reader this is a silent no-op. On failure the record is left
    /// partially populated and should be discarded.
    ///
    /// # Errors
    /// Returns the cursor failure.
    fn decode_into(&mut self, reader: Option<&mut dyn WireReader>) -> Result<()> {
        match reader {
            Some(reader) => self.read_fields(reader),
            None => Ok(()),
        }
    }

    /// Unmarshals a new record.
    ///
    /// With no reader this returns a default (all-zero) record.
    ///
    /// # Errors
    /// Returns the cursor failure.
    fn decode(reader: Option<&mut dyn WireReader>) -> Result<Self> {
        let mut record = Self::default();
        record.decode_into(reader)?;
        Ok(record)
    }

    /// Encodes the record into a new vector of exactly `WIRE_SIZE` bytes.
    #[must_use]
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::WIRE_SIZE);
        // Writes into a Vec cannot fail.
        let _ = self.write_fields(&mut buf);
        buf
    }

    /// Decodes a record from the front of `bytes`.
    ///
    /// Trailing bytes beyond `WIRE_SIZE` are ignored.
    ///
    /// # Errors
    /// Returns [`crate::CodecError::InsufficientData`] if `bytes` is shorter
    /// than `WIRE_SIZE`.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = SliceReader::new(bytes);
        let mut record = Self::default();
        record.read_fields(&mut reader)?;
        Ok(record)
    }

    /// Looks up a field value by its wire name.
    #[must_use]
    fn field(&self, name: &str) -> Option<FieldValue> {
        let index = Self::FIELDS.iter().position(|f| f.name == name)?;
        self.field_values().get(index).copied()
    }

    /// Returns the field-order hash of the record.
    ///
    /// Folds every compared field with [`WireHasher`]. Equal records always
    /// produce equal hashes.
    #[must_use]
    fn wire_hash(&self) -> u32 {
        let mut hasher = WireHasher::new();
        for (field, value) in Self::FIELDS.iter().zip(self.field_values()) {
            if field.padding && !Self::COMPARES_PADDING {
                continue;
            }
            hasher.write(value);
        }
        hasher.finish()
    }

    /// Renders a tagged, human-readable dump of the record.
    #[must_use]
    fn dump(&self) -> String {
        dump::render(Self::NAME, Self::FIELDS, &self.field_values())
    }
}

/// Object-safe view over any [`WireRecord`].
///
/// Comparing two `dyn AnyRecord` values is only ever true when both wrap the
/// same concrete type with equal fields.
pub trait AnyRecord: fmt::Debug {
    /// Returns the record name.
    fn record_name(&self) -> &'static str;

    /// Returns the record as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Compares with another record of any type.
    fn dyn_eq(&self, other: &dyn AnyRecord) -> bool;

    /// Returns the encoded size in bytes.
    fn dyn_wire_size(&self) -> usize;

    /// Returns the field-order hash.
    fn dyn_wire_hash(&self) -> u32;

    /// Renders the textual dump.
    fn dyn_dump(&self) -> String;

    /// Marshals the record; see [`WireRecord::encode`].
    ///
    /// # Errors
    /// Returns the cursor failure.
    fn dyn_encode(&self, writer: Option<&mut dyn WireWriter>) -> Result<usize>;
}

impl<R: WireRecord> AnyRecord for R {
    fn record_name(&self) -> &'static str {
        R::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn AnyRecord) -> bool {
        other
            .as_any()
            .downcast_ref::<R>()
            .is_some_and(|other| self == other)
    }

    fn dyn_wire_size(&self) -> usize {
        self.wire_size()
    }

    fn dyn_wire_hash(&self) -> u32 {
        self.wire_hash()
    }

    fn dyn_dump(&self) -> String {
        self.dump()
    }

    fn dyn_encode(&self, writer: Option<&mut dyn WireWriter>) -> Result<usize> {
        self.encode(writer)
    }
}

impl PartialEq for dyn AnyRecord {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{SliceWriter, StreamReader};
    use crate::error::CodecError;
    use crate::types::WireType;
    use irondis_derive::WireRecord;
    use std::hash::DefaultHasher;
    use std::hash::Hasher;

    #[derive(Debug, Clone, Copy, Default, WireRecord)]
    struct Mixed {
        count: u32,
        code: u8,
        delta: i16,
        scale: f32,
        #[wire(padding)]
        padding: u8,
    }

    #[derive(Debug, Clone, Copy, Default, WireRecord)]
    #[wire(name = "Sparse", ignore_padding)]
    struct SparseRecord {
        value: u16,
        #[wire(padding)]
        reserved: u16,
    }

    #[derive(Debug, Clone, Copy, Default, WireRecord)]
    struct Pair {
        left: u8,
        right: u8,
    }

    #[derive(Debug, Clone, Copy, Default, WireRecord)]
    struct SwappedPair {
        right: u8,
        left: u8,
    }

    fn sample() -> Mixed {
        Mixed {
            count: 7,
            code: 2,
            delta: -5,
            scale: 0.5,
            padding: 0,
        }
    }

    fn std_hash<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_field_table() {
        assert_eq!(Mixed::NAME, "Mixed");
        assert_eq!(Mixed::WIRE_SIZE, 12);
        let names: Vec<_> = Mixed::FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names, ["count", "code", "delta", "scale", "padding"]);
        let offsets: Vec<_> = Mixed::FIELDS.iter().map(|f| f.offset).collect();
        assert_eq!(offsets, [0, 4, 5, 7, 11]);
        assert_eq!(Mixed::FIELDS[2].wire_type, WireType::Int16);
        assert!(Mixed::FIELDS[4].padding);
        assert!(!Mixed::FIELDS[0].padding);
    }

    #[test]
    fn test_encode_decode() {
        let record = sample();
        let mut buf = Vec::new();
        let written = record.encode(Some(&mut buf)).unwrap();

        assert_eq!(written, record.wire_size());
        assert_eq!(buf.len(), Mixed::WIRE_SIZE);
        assert_eq!(&buf[..7], &[0, 0, 0, 7, 2, 0xFF, 0xFB]);

        let mut reader = SliceReader::new(&buf);
        let decoded = Mixed::decode(Some(&mut reader)).unwrap();
        assert_eq!(decoded, record);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_absent_cursor_is_noop() {
        let record = sample();
        assert_eq!(record.encode(None).unwrap(), 0);

        let mut target = sample();
        target.decode_into(None).unwrap();
        assert_eq!(target, record);

        assert_eq!(Mixed::decode(None).unwrap(), Mixed::default());
    }

    #[test]
    fn test_partial_decode_keeps_read_fields() {
        let bytes = sample().to_bytes();
        let mut reader = SliceReader::new(&bytes[..6]);
        let mut target = Mixed::default();

        let err = target.decode_into(Some(&mut reader)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InsufficientData {
                required: 2,
                available: 1
            }
        ));
        assert_eq!(target.count, 7);
        assert_eq!(target.code, 2);
        assert_eq!(target.delta, 0);
    }

    #[test]
    fn test_encode_into_full_slice_fails() {
        let mut buf = [0u8; 8];
        let mut writer = SliceWriter::new(&mut buf);
        let err = sample().encode(Some(&mut writer)).unwrap_err();
        assert!(matches!(err, CodecError::CapacityExceeded { .. }));
    }

    #[test]
    fn test_decode_from_stream() {
        let bytes = sample().to_bytes();
        let mut reader = StreamReader::new(&bytes[..]);
        let decoded = Mixed::decode(Some(&mut reader)).unwrap();
        assert_eq!(decoded, sample());
        assert_eq!(reader.bytes_read(), Mixed::WIRE_SIZE);
    }

    #[test]
    fn test_from_bytes_short() {
        let err = Mixed::from_bytes(&[0u8; 3]).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_equality_includes_padding() {
        let a = sample();
        let mut b = sample();
        assert_eq!(a, b);
        b.padding = 1;
        assert_ne!(a, b);
        assert_ne!(a.wire_hash(), b.wire_hash());
    }

    #[test]
    fn test_ignore_padding() {
        let a = SparseRecord {
            value: 9,
            reserved: 0,
        };
        let b = SparseRecord {
            value: 9,
            reserved: 0xFFFF,
        };
        assert_eq!(SparseRecord::NAME, "Sparse");
        assert_eq!(a, b);
        assert_eq!(a.wire_hash(), b.wire_hash());
        assert_eq!(std_hash(&a), std_hash(&b));
        // Padding is still on the wire.
        assert_eq!(b.to_bytes(), [0, 9, 0xFF, 0xFF]);
    }

    #[test]
    fn test_float_equality_is_bitwise() {
        let mut a = sample();
        a.scale = f32::NAN;
        let b = a;
        assert_eq!(a, b);
        assert_eq!(std_hash(&a), std_hash(&b));

        let mut c = sample();
        c.scale = -0.0;
        let mut d = sample();
        d.scale = 0.0;
        assert_ne!(c, d);
    }

    #[test]
    fn test_equal_records_hash_equal() {
        let a = sample();
        let b = Mixed::from_bytes(&a.to_bytes()).unwrap();
        assert_eq!(a.wire_hash(), b.wire_hash());
        assert_eq!(std_hash(&a), std_hash(&b));
    }

    #[test]
    fn test_wire_hash_follows_field_order() {
        let record = Pair { left: 1, right: 2 };
        assert_eq!(record.wire_hash(), (1 << 5) ^ 2);

        let swapped = SwappedPair { right: 2, left: 1 };
        assert_ne!(record.wire_hash(), swapped.wire_hash());
    }

    #[test]
    fn test_field_lookup() {
        let record = sample();
        assert_eq!(record.field("count"), Some(FieldValue::U32(7)));
        assert_eq!(record.field("delta"), Some(FieldValue::I16(-5)));
        assert_eq!(record.field("missing"), None);
    }

    #[test]
    fn test_dump() {
        let text = Pair { left: 1, right: 2 }.dump();
        assert_eq!(
            text,
            "<Pair>\n<left type=\"uint8\">1</left>\n<right type=\"uint8\">2</right>\n</Pair>\n"
        );
    }

    #[test]
    fn test_any_record_cross_type() {
        let pair = Pair { left: 1, right: 2 };
        let swapped = SwappedPair { right: 1, left: 2 };
        let same: Box<dyn AnyRecord> = Box::new(pair);
        let also_same: Box<dyn AnyRecord> = Box::new(Pair { left: 1, right: 2 });
        let other: Box<dyn AnyRecord> = Box::new(swapped);

        assert!(*same == *also_same);
        assert!(*same != *other);
        assert_eq!(pair.to_bytes(), swapped.to_bytes());
        assert_eq!(other.record_name(), "SwappedPair");
        assert_eq!(same.dyn_wire_size(), 2);
        assert_eq!(same.dyn_wire_hash(), pair.wire_hash());
        assert!(same.dyn_dump().starts_with("<Pair>"));

        let mut buf = Vec::new();
        assert_eq!(other.dyn_encode(Some(&mut buf)).unwrap(), 2);
        assert_eq!(buf, [1, 2]);
    }
}
