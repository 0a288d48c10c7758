//! Human-readable record dumps for diagnostics.
//!
//! The layout is one tagged line per field, in declaration order:
//!
//! ```text
//! <StorageFuelReload>
//! <standardQuantity type="uint32">1000</standardQuantity>
//! ...
//! </StorageFuelReload>
//! ```
//!
//! Dumps are not a wire format and are never parsed back.

use crate::types::{FieldDescriptor, FieldValue};
use std::fmt::{self, Write};

/// Writes a tagged dump of a record into `out`.
///
/// # Arguments
/// * `out` - Destination for the text
/// * `name` - Record name used for the enclosing tag
/// * `fields` - Field table of the record
/// * `values` - Current field values, in the same order as `fields`
///
/// # Errors
/// Propagates formatting errors from `out`.
pub fn write_dump<W: Write + ?Sized>(
    out: &mut W,
    name: &str,
    fields: &[FieldDescriptor],
    values: &[FieldValue],
) -> fmt::Result {
    writeln!(out, "<{name}>")?;
    for (field, value) in fields.iter().zip(values) {
        writeln!(
            out,
            "<{0} type=\"{1}\">{2}</{0}>",
            field.name,
            field.wire_type.wire_name(),
            value
        )?;
    }
    writeln!(out, "</{name}>")
}

/// Renders a tagged dump of a record into a new string.
#[must_use]
pub fn render(name: &str, fields: &[FieldDescriptor], values: &[FieldValue]) -> String {
    let mut out = String::with_capacity(32 + fields.len() * 48);
    // Writing into a String cannot fail.
    let _ = write_dump(&mut out, name, fields, values);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WireType;

    #[test]
    fn test_render_layout() {
        let fields = [
            FieldDescriptor::new("quantity", WireType::Uint32, 0, false),
            FieldDescriptor::new("padding", WireType::Uint8, 4, true),
        ];
        let values = [FieldValue::U32(42), FieldValue::U8(0)];

        let text = render("Sample", &fields, &values);
        assert_eq!(
            text,
            "<Sample>\n\
             <quantity type=\"uint32\">42</quantity>\n\
             <padding type=\"uint8\">0</padding>\n\
             </Sample>\n"
        );
    }

    #[test]
    fn test_render_empty_record() {
        assert_eq!(render("Empty", &[], &[]), "<Empty>\n</Empty>\n");
    }
}
