//! Wire types, field descriptors and scalar field values.
//!
//! Every record is described by a static field table: an ordered slice of
//! [`FieldDescriptor`]s. The codec, equality, hashing and the textual dump all
//! walk fields in that order.

use crate::cursor::{WireReader, WireWriter};
use crate::error::Result;
use std::fmt;

/// Scalar wire type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// 32-bit IEEE 754 float.
    Float32,
    /// 64-bit IEEE 754 float.
    Float64,
}

impl WireType {
    /// Returns the encoded width of the type in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Uint8 | Self::Int8 => 1,
            Self::Uint16 | Self::Int16 => 2,
            Self::Uint32 | Self::Int32 | Self::Float32 => 4,
            Self::Uint64 | Self::Int64 | Self::Float64 => 8,
        }
    }

    /// Returns the type name used in textual dumps.
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }

    /// Returns true if this is a signed integer type.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Returns true if this is a floating point type.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// One entry of a record's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Field name as it appears on the wire documentation and in dumps.
    pub name: &'static str,
    /// Scalar wire type.
    pub wire_type: WireType,
    /// Byte offset from the start of the record.
    pub offset: usize,
    /// True for reserved bytes that only round-trip.
    pub padding: bool,
}

impl FieldDescriptor {
    /// Creates a field descriptor.
    ///
    /// # Arguments
    /// * `name` - Field name
    /// * `wire_type` - Scalar wire type
    /// * `offset` - Byte offset from the start of the record
    /// * `padding` - Whether the field is reserved padding
    #[must_use]
    pub const fn new(
        name: &'static str,
        wire_type: WireType,
        offset: usize,
        padding: bool,
    ) -> Self {
        Self {
            name,
            wire_type,
            offset,
            padding,
        }
    }

    /// Returns the encoded width of the field in bytes.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.wire_type.size()
    }

    /// Returns the offset one past the last byte of the field.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.width()
    }
}

/// Sums the widths of a field table.
///
/// Usable in const context so record types can derive their wire size from
/// the table instead of maintaining a separate constant.
#[must_use]
pub const fn table_size(fields: &[FieldDescriptor]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fields.len() {
        total += fields[i].width();
        i += 1;
    }
    total
}

/// Current value of a single record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// Unsigned 8-bit value.
    U8(u8),
    /// Unsigned 16-bit value.
    U16(u16),
    /// Unsigned 32-bit value.
    U32(u32),
    /// Unsigned 64-bit value.
    U64(u64),
    /// Signed 8-bit value.
    I8(i8),
    /// Signed 16-bit value.
    I16(i16),
    /// Signed 32-bit value.
    I32(i32),
    /// Signed 64-bit value.
    I64(i64),
    /// 32-bit float value.
    F32(f32),
    /// 64-bit float value.
    F64(f64),
}

impl FieldValue {
    /// Returns the wire type of the value.
    #[must_use]
    pub const fn wire_type(&self) -> WireType {
        match self {
            Self::U8(_) => WireType::Uint8,
            Self::U16(_) => WireType::Uint16,
            Self::U32(_) => WireType::Uint32,
            Self::U64(_) => WireType::Uint64,
            Self::I8(_) => WireType::Int8,
            Self::I16(_) => WireType::Int16,
            Self::I32(_) => WireType::Int32,
            Self::I64(_) => WireType::Int64,
            Self::F32(_) => WireType::Float32,
            Self::F64(_) => WireType::Float64,
        }
    }

    /// Returns the 32-bit hash code folded into a record's wire hash.
    ///
    /// Narrow integers widen to 32 bits (signed ones sign-extend), 64-bit
    /// values fold their high half into the low half, floats hash their bit
    /// pattern.
    #[must_use]
    pub const fn hash_code(&self) -> u32 {
        match *self {
            Self::U8(v) => v as u32,
            Self::U16(v) => v as u32,
            Self::U32(v) => v,
            Self::U64(v) => fold64(v),
            Self::I8(v) => v as i32 as u32,
            Self::I16(v) => v as i32 as u32,
            Self::I32(v) => v as u32,
            Self::I64(v) => fold64(v as u64),
            Self::F32(v) => v.to_bits(),
            Self::F64(v) => fold64(v.to_bits()),
        }
    }
}

const fn fold64(v: u64) -> u32 {
    (v ^ (v >> 32)) as u32
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

/// A scalar Rust type that can appear as a record field.
///
/// The derive macro routes every field through this trait, so adding a field
/// type means implementing it here once.
pub trait WireScalar: Copy + Default + 'static {
    /// Wire type of the scalar.
    const WIRE_TYPE: WireType;

    /// Writes the value in wire byte order.
    fn write_to<W: WireWriter + ?Sized>(self, writer: &mut W) -> Result<()>;

    /// Reads a value in wire byte order.
    fn read_from<R: WireReader + ?Sized>(reader: &mut R) -> Result<Self>;

    /// Wraps the value for introspection.
    fn to_value(self) -> FieldValue;

    /// Returns the raw bit pattern, used for equality and hashing.
    ///
    /// Floats compare by bits so equality stays reflexive and agrees with
    /// the hash.
    fn wire_bits(self) -> u64;
}

macro_rules! impl_wire_scalar {
    ($ty:ty, $wire:ident, $variant:ident, $write:ident, $read:ident, $bits:expr) => {
        impl WireScalar for $ty {
            const WIRE_TYPE: WireType = WireType::$wire;

            #[inline(always)]
            fn write_to<W: WireWriter + ?Sized>(self, writer: &mut W) -> Result<()> {
                writer.$write(self)
            }

            #[inline(always)]
            fn read_from<R: WireReader + ?Sized>(reader: &mut R) -> Result<Self> {
                reader.$read()
            }

            #[inline(always)]
            fn to_value(self) -> FieldValue {
                FieldValue::$variant(self)
            }

            #[inline(always)]
            fn wire_bits(self) -> u64 {
                let bits: fn($ty) -> u64 = $bits;
                bits(self)
            }
        }
    };
}

impl_wire_scalar!(u8, Uint8, U8, write_u8, read_u8, |v| v as u64);
impl_wire_scalar!(u16, Uint16, U16, write_u16, read_u16, |v| v as u64);
impl_wire_scalar!(u32, Uint32, U32, write_u32, read_u32, |v| v as u64);
impl_wire_scalar!(u64, Uint64, U64, write_u64, read_u64, |v| v);
impl_wire_scalar!(i8, Int8, I8, write_i8, read_i8, |v| v as u8 as u64);
impl_wire_scalar!(i16, Int16, I16, write_i16, read_i16, |v| v as u16 as u64);
impl_wire_scalar!(i32, Int32, I32, write_i32, read_i32, |v| v as u32 as u64);
impl_wire_scalar!(i64, Int64, I64, write_i64, read_i64, |v| v as u64);
impl_wire_scalar!(f32, Float32, F32, write_f32, read_f32, |v| v.to_bits() as u64);
impl_wire_scalar!(f64, Float64, F64, write_f64, read_f64, |v| v.to_bits());
