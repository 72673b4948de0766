//! Compiled struct templates.

use crate::err::CompileResult;
use crate::format::{Endian, FieldKind, parse_format};
use crate::names::expand_names;

/// How a decoded record is shaped, decided once at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// Exactly one non-padding field and no names supplied: the codec hands
    /// back the bare value.
    Scalar,
    /// No names supplied: an ordered array of values in token order.
    Tuple,
    /// At least one name entry supplied: a mapping from field name to value.
    Mapping,
}

/// A compiled, immutable description of a fixed binary record layout plus
/// field naming.
///
/// Templates are read-only after construction and can be shared freely across
/// threads; every decode or encode call works on its own byte range.
#[derive(Debug, Clone)]
pub struct StructTemplate {
    endian: Endian,
    tokens: Vec<FieldKind>,
    /// One entry per non-padding token; empty unless the shape is `Mapping`.
    names: Vec<String>,
    shape: RecordShape,
    is_list: bool,
    record_length: usize,
}

impl StructTemplate {
    /// Compile a descriptor string and a field name list into a template.
    ///
    /// An empty `field_names` slice selects the scalar or tuple shape; any
    /// supplied entry (even an empty one, which falls back to `.fieldN`)
    /// selects the mapping shape.
    pub fn compile(descriptor: &str, field_names: &[String]) -> CompileResult<StructTemplate> {
        let parsed = parse_format(descriptor)?;
        let record_length = parsed.tokens.iter().map(|t| t.width()).sum();
        let value_count = parsed.tokens.iter().filter(|t| !t.is_pad()).count();

        let (shape, names) = if field_names.is_empty() {
            let shape = if value_count == 1 {
                RecordShape::Scalar
            } else {
                RecordShape::Tuple
            };
            (shape, Vec::new())
        } else {
            let names = expand_names(&parsed.tokens, field_names)?;
            (RecordShape::Mapping, names)
        };

        Ok(StructTemplate {
            endian: parsed.endian,
            tokens: parsed.tokens,
            names,
            shape,
            is_list: parsed.is_list,
            record_length,
        })
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn tokens(&self) -> &[FieldKind] {
        &self.tokens
    }

    /// Final field names, one per non-padding token. Empty for scalar and
    /// tuple shaped templates.
    pub fn field_names(&self) -> &[String] {
        &self.names
    }

    pub fn shape(&self) -> RecordShape {
        self.shape
    }

    /// Whether one resource holds a repetition of this fixed-length record.
    pub fn is_list(&self) -> bool {
        self.is_list
    }

    /// Byte length of a single record; for list-mode templates this is the
    /// per-record length.
    pub fn record_length(&self) -> usize {
        self.record_length
    }

    /// Number of value-producing (non-padding) fields per record.
    pub fn value_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_pad()).count()
    }

    pub(crate) fn field_label(&self, value_index: usize) -> String {
        match self.names.get(value_index) {
            Some(name) => name.clone(),
            None => format!("#{value_index}"),
        }
    }
}
