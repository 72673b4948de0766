//! Record decoding and encoding.
//!
//! Decoded values are [`serde_json::Value`]s so they can flow straight into a
//! JSON document: integers and floats as numbers, booleans as booleans, fixed
//! length byte strings as upper-case base-16 text. Encoding is the strict
//! inverse; a value round-trips to the identical byte layout.

use std::io::Cursor;

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use log::warn;
use serde_json::{Map, Number, Value};

use crate::err::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::format::{Endian, FieldKind};
use crate::template::{RecordShape, StructTemplate};

impl StructTemplate {
    /// Decode an entire resource.
    ///
    /// For a single-record template the buffer must be exactly
    /// [`record_length`](StructTemplate::record_length) bytes. For a
    /// list-mode template the buffer is partitioned into consecutive
    /// record-length windows, decoded independently into an array; trailing
    /// bytes that do not fill a record are dropped with a warning, and the
    /// first record that fails to decode aborts the whole resource.
    pub fn unpack(&self, data: &[u8]) -> DecodeResult<Value> {
        if !self.is_list() {
            if data.len() != self.record_length() {
                return Err(DecodeError::ResourceLengthMismatch {
                    expected: self.record_length(),
                    actual: data.len(),
                });
            }
            return self.unpack_record(data, 0);
        }

        let record_length = self.record_length();
        let count = data.len() / record_length;
        let remainder = data.len() % record_length;
        if remainder != 0 {
            warn!(
                "dropping {remainder} trailing byte(s): resource length {} is not a multiple of record length {record_length}",
                data.len(),
            );
        }

        let mut records = Vec::with_capacity(count);
        for i in 0..count {
            records.push(self.unpack_record(data, i * record_length)?);
        }
        Ok(Value::Array(records))
    }

    /// Decode one record from `data` starting at `offset`.
    pub fn unpack_record(&self, data: &[u8], offset: usize) -> DecodeResult<Value> {
        let end = offset
            .checked_add(self.record_length())
            .filter(|end| *end <= data.len())
            .ok_or(DecodeError::Truncated {
                offset,
                need: self.record_length(),
                have: data.len().saturating_sub(offset),
            })?;
        let window = &data[offset..end];

        let values = match self.endian() {
            Endian::Big => self.unpack_values::<BigEndian>(window),
            Endian::Little => self.unpack_values::<LittleEndian>(window),
        }?;

        self.shape_values(values)
    }

    fn unpack_values<B: ByteOrder>(&self, window: &[u8]) -> DecodeResult<Vec<Value>> {
        let mut cursor = Cursor::new(window);
        let mut values = Vec::with_capacity(self.value_count());

        for token in self.tokens() {
            let value = match *token {
                FieldKind::Pad => {
                    cursor.set_position(cursor.position() + 1);
                    continue;
                }
                FieldKind::I8 => Value::from(cursor.read_i8()?),
                FieldKind::U8 => Value::from(cursor.read_u8()?),
                FieldKind::I16 => Value::from(cursor.read_i16::<B>()?),
                FieldKind::U16 => Value::from(cursor.read_u16::<B>()?),
                FieldKind::I32 => Value::from(cursor.read_i32::<B>()?),
                FieldKind::U32 => Value::from(cursor.read_u32::<B>()?),
                FieldKind::I64 => Value::from(cursor.read_i64::<B>()?),
                FieldKind::U64 => Value::from(cursor.read_u64::<B>()?),
                FieldKind::F32 => float_value(f64::from(cursor.read_f32::<B>()?), values.len())?,
                FieldKind::F64 => float_value(cursor.read_f64::<B>()?, values.len())?,
                FieldKind::Bool => Value::Bool(cursor.read_u8()? != 0),
                FieldKind::Bytes(n) => {
                    let mut raw = vec![0u8; n];
                    std::io::Read::read_exact(&mut cursor, &mut raw)?;
                    Value::String(to_hex_upper(&raw))
                }
            };
            values.push(value);
        }

        Ok(values)
    }

    fn shape_values(&self, mut values: Vec<Value>) -> DecodeResult<Value> {
        match self.shape() {
            RecordShape::Scalar => match values.pop() {
                Some(value) if values.is_empty() => Ok(value),
                _ => Err(DecodeError::FieldCountMismatch {
                    names: 1,
                    values: values.len() + 1,
                }),
            },
            RecordShape::Tuple => Ok(Value::Array(values)),
            RecordShape::Mapping => {
                if self.field_names().len() != values.len() {
                    return Err(DecodeError::FieldCountMismatch {
                        names: self.field_names().len(),
                        values: values.len(),
                    });
                }
                let mut record = Map::with_capacity(values.len());
                for (name, value) in self.field_names().iter().zip(values) {
                    record.insert(name.clone(), value);
                }
                Ok(Value::Object(record))
            }
        }
    }

    /// Encode an entire resource: the exact inverse of
    /// [`unpack`](StructTemplate::unpack). List-mode input must be an array
    /// of records; the per-record encodings are concatenated in order with no
    /// separators.
    pub fn pack(&self, value: &Value) -> EncodeResult<Vec<u8>> {
        if !self.is_list() {
            return self.pack_record(value);
        }

        let records = value.as_array().ok_or(EncodeError::NotAList)?;
        let mut buf = Vec::with_capacity(records.len() * self.record_length());
        for record in records {
            buf.extend_from_slice(&self.pack_record(record)?);
        }
        Ok(buf)
    }

    /// Encode a single record back to its fixed byte layout.
    pub fn pack_record(&self, value: &Value) -> EncodeResult<Vec<u8>> {
        let fields: Vec<&Value> = match self.shape() {
            RecordShape::Scalar => {
                if value.is_array() || value.is_object() {
                    return Err(EncodeError::CompositeScalar);
                }
                vec![value]
            }
            RecordShape::Mapping => {
                let record = value.as_object().ok_or(EncodeError::NotAnObject)?;
                let mut fields = Vec::with_capacity(self.field_names().len());
                for name in self.field_names() {
                    let field = record.get(name).ok_or_else(|| EncodeError::MissingField {
                        name: name.clone(),
                    })?;
                    fields.push(field);
                }
                fields
            }
            RecordShape::Tuple => {
                let items = value.as_array().ok_or(EncodeError::NotAnArray)?;
                if items.len() != self.value_count() {
                    return Err(EncodeError::TupleLengthMismatch {
                        expected: self.value_count(),
                        actual: items.len(),
                    });
                }
                items.iter().collect()
            }
        };

        match self.endian() {
            Endian::Big => self.pack_values::<BigEndian>(&fields),
            Endian::Little => self.pack_values::<LittleEndian>(&fields),
        }
    }

    fn pack_values<B: ByteOrder>(&self, fields: &[&Value]) -> EncodeResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.record_length());
        let mut value_index = 0;

        for token in self.tokens() {
            if token.is_pad() {
                buf.write_u8(0)?;
                continue;
            }
            self.pack_one::<B>(&mut buf, *token, fields[value_index], value_index)?;
            value_index += 1;
        }

        Ok(buf)
    }

    fn pack_one<B: ByteOrder>(
        &self,
        buf: &mut Vec<u8>,
        kind: FieldKind,
        value: &Value,
        value_index: usize,
    ) -> EncodeResult<()> {
        match kind {
            FieldKind::Pad => {}
            FieldKind::I8 => buf.write_i8(self.signed_field(value, value_index, "i8")? as i8)?,
            FieldKind::I16 => {
                buf.write_i16::<B>(self.signed_field(value, value_index, "i16")? as i16)?
            }
            FieldKind::I32 => {
                buf.write_i32::<B>(self.signed_field(value, value_index, "i32")? as i32)?
            }
            FieldKind::I64 => {
                let n = value
                    .as_i64()
                    .ok_or_else(|| self.type_mismatch(value_index, "an integer"))?;
                buf.write_i64::<B>(n)?;
            }
            FieldKind::U8 => buf.write_u8(self.unsigned_field(value, value_index, "u8")? as u8)?,
            FieldKind::U16 => {
                buf.write_u16::<B>(self.unsigned_field(value, value_index, "u16")? as u16)?
            }
            FieldKind::U32 => {
                buf.write_u32::<B>(self.unsigned_field(value, value_index, "u32")? as u32)?
            }
            FieldKind::U64 => {
                let n = value
                    .as_u64()
                    .ok_or_else(|| self.type_mismatch(value_index, "an unsigned integer"))?;
                buf.write_u64::<B>(n)?;
            }
            FieldKind::F32 => {
                let f = value
                    .as_f64()
                    .ok_or_else(|| self.type_mismatch(value_index, "a number"))?;
                buf.write_f32::<B>(f as f32)?;
            }
            FieldKind::F64 => {
                let f = value
                    .as_f64()
                    .ok_or_else(|| self.type_mismatch(value_index, "a number"))?;
                buf.write_f64::<B>(f)?;
            }
            FieldKind::Bool => {
                let b = value
                    .as_bool()
                    .ok_or_else(|| self.type_mismatch(value_index, "a boolean"))?;
                buf.write_u8(u8::from(b))?;
            }
            FieldKind::Bytes(n) => {
                let text = value
                    .as_str()
                    .ok_or_else(|| self.type_mismatch(value_index, "a base-16 string"))?;
                let raw = from_hex(text).ok_or_else(|| EncodeError::InvalidHex {
                    field: self.field_label(value_index),
                })?;
                if raw.len() != n {
                    return Err(EncodeError::ByteStringLength {
                        field: self.field_label(value_index),
                        expected: n,
                        actual: raw.len(),
                    });
                }
                std::io::Write::write_all(buf, &raw)?;
            }
        }
        Ok(())
    }

    fn signed_field(
        &self,
        value: &Value,
        value_index: usize,
        kind: &'static str,
    ) -> EncodeResult<i64> {
        let n = value
            .as_i64()
            .ok_or_else(|| self.type_mismatch(value_index, "an integer"))?;
        let width = kind_bits(kind);
        if n < -(1i64 << (width - 1)) || n >= (1i64 << (width - 1)) {
            return Err(EncodeError::OutOfRange {
                field: self.field_label(value_index),
                kind,
            });
        }
        Ok(n)
    }

    fn unsigned_field(
        &self,
        value: &Value,
        value_index: usize,
        kind: &'static str,
    ) -> EncodeResult<u64> {
        let n = value
            .as_u64()
            .ok_or_else(|| self.type_mismatch(value_index, "an unsigned integer"))?;
        let width = kind_bits(kind);
        if width < 64 && n >= (1u64 << width) {
            return Err(EncodeError::OutOfRange {
                field: self.field_label(value_index),
                kind,
            });
        }
        Ok(n)
    }

    fn type_mismatch(&self, value_index: usize, expected: &'static str) -> EncodeError {
        EncodeError::TypeMismatch {
            field: self.field_label(value_index),
            expected,
        }
    }
}

fn kind_bits(kind: &'static str) -> u32 {
    match kind {
        "i8" | "u8" => 8,
        "i16" | "u16" => 16,
        "i32" | "u32" => 32,
        _ => 64,
    }
}

fn float_value(f: f64, value_index: usize) -> DecodeResult<Value> {
    match Number::from_f64(f) {
        Some(n) => Ok(Value::Number(n)),
        None => Err(DecodeError::NonFiniteFloat { index: value_index }),
    }
}

fn to_hex_upper(raw: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(raw.len() * 2);
    for byte in raw {
        out.push(DIGITS[usize::from(byte >> 4)] as char);
        out.push(DIGITS[usize::from(byte & 0xf)] as char);
    }
    out
}

fn from_hex(text: &str) -> Option<Vec<u8>> {
    fn nibble(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }

    let bytes = text.as_bytes();
    if bytes.len() % 2 != 0 {
        return None;
    }
    let mut out = Vec::with_capacity(bytes.len() / 2);
    for pair in bytes.chunks_exact(2) {
        out.push(nibble(pair[0])? << 4 | nibble(pair[1])?);
    }
    Some(out)
}
