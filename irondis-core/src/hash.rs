//! Deterministic field-order hash for records.

use crate::types::FieldValue;

/// Rotation applied to the accumulator before each field is mixed in.
pub const ROTATION: u32 = 5;

/// Running accumulator that folds field hash codes in declaration order.
///
/// Each step computes `acc = acc.rotate_left(5) ^ field_hash`. The result
/// depends on field order, so two records with the same values in a
/// different order hash differently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WireHasher {
    acc: u32,
}

impl WireHasher {
    /// Creates a hasher with a zero accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self { acc: 0 }
    }

    /// Mixes one field value into the accumulator.
    #[inline]
    pub fn write(&mut self, value: FieldValue) {
        self.write_code(value.hash_code());
    }

    /// Mixes a raw 32-bit hash code into the accumulator.
    #[inline]
    pub fn write_code(&mut self, code: u32) {
        self.acc = self.acc.rotate_left(ROTATION) ^ code;
    }

    /// Returns the accumulated hash.
    #[must_use]
    pub const fn finish(&self) -> u32 {
        self.acc
    }
}

/// Hashes a sequence of field values in order.
#[must_use]
pub fn hash_values<I>(values: I) -> u32
where
    I: IntoIterator<Item = FieldValue>,
{
    let mut hasher = WireHasher::new();
    for value in values {
        hasher.write(value);
    }
    hasher.finish()
}
