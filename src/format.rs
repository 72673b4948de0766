//! Format descriptor parsing.
//!
//! A descriptor is a compact, Python-`struct`-flavored string such as
//! `L5i3f5i40x` or `<Hh4s+`: an optional byte-order marker, then a run of
//! (optional decimal repeat count, type character) pairs, optionally suffixed
//! with `+` to flag a list-of-records resource.

use crate::err::{CompileError, CompileResult};

/// Byte order a template decodes and encodes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

impl Endian {
    /// Host byte order, used for the `=` and `@` descriptor markers.
    pub const NATIVE: Endian = if cfg!(target_endian = "little") {
        Endian::Little
    } else {
        Endian::Big
    };
}

/// One primitive binary field of a record.
///
/// `Bytes(n)` is a single token carrying its declared length; `Pad` occupies
/// one byte, never yields a value and never takes a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Bool,
    Bytes(usize),
    Pad,
}

impl FieldKind {
    /// Encoded width in bytes.
    pub fn width(self) -> usize {
        match self {
            FieldKind::I8 | FieldKind::U8 | FieldKind::Bool | FieldKind::Pad => 1,
            FieldKind::I16 | FieldKind::U16 => 2,
            FieldKind::I32 | FieldKind::U32 | FieldKind::F32 => 4,
            FieldKind::I64 | FieldKind::U64 | FieldKind::F64 => 8,
            FieldKind::Bytes(n) => n,
        }
    }

    pub fn is_pad(self) -> bool {
        matches!(self, FieldKind::Pad)
    }

    fn from_scalar_char(c: char) -> Option<FieldKind> {
        match c {
            'b' => Some(FieldKind::I8),
            'B' => Some(FieldKind::U8),
            'h' => Some(FieldKind::I16),
            'H' => Some(FieldKind::U16),
            // `l`/`L` are standard-size aliases for the 4-byte integers.
            'i' | 'l' => Some(FieldKind::I32),
            'I' | 'L' => Some(FieldKind::U32),
            'q' => Some(FieldKind::I64),
            'Q' => Some(FieldKind::U64),
            'f' => Some(FieldKind::F32),
            'd' => Some(FieldKind::F64),
            '?' => Some(FieldKind::Bool),
            _ => None,
        }
    }
}

/// Output of [`parse_format`].
#[derive(Debug, Clone)]
pub(crate) struct ParsedFormat {
    pub endian: Endian,
    pub tokens: Vec<FieldKind>,
    pub is_list: bool,
}

/// Compile a descriptor string into byte order, token sequence and list flag.
///
/// Unknown characters are a [`CompileError`]; the spec table loader treats
/// that as fatal for the offending line only.
pub(crate) fn parse_format(descriptor: &str) -> CompileResult<ParsedFormat> {
    let (fmt, is_list) = match descriptor.strip_suffix('+') {
        Some(stripped) => (stripped, true),
        None => (descriptor, false),
    };

    let mut chars = fmt.chars().peekable();
    let endian = match chars.peek() {
        Some('>') | Some('!') => {
            chars.next();
            Endian::Big
        }
        Some('<') => {
            chars.next();
            Endian::Little
        }
        Some('=') | Some('@') => {
            chars.next();
            Endian::NATIVE
        }
        _ => Endian::Big,
    };

    let mut tokens = Vec::new();
    let mut repeat: usize = 0;

    for c in chars {
        match c {
            c if c.is_whitespace() => {}
            // Byte-order markers past the first position carry no information.
            '>' | '<' | '!' | '=' | '@' => {}
            '0'..='9' => {
                let digit = (c as usize) - ('0' as usize);
                repeat = repeat
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(digit))
                    .ok_or(CompileError::RepeatCountOverflow)?;
            }
            's' => {
                // The count is the string length, not a repetition count.
                tokens.push(FieldKind::Bytes(repeat.max(1)));
                repeat = 0;
            }
            'x' => {
                for _ in 0..repeat.max(1) {
                    tokens.push(FieldKind::Pad);
                }
                repeat = 0;
            }
            _ => {
                let kind = FieldKind::from_scalar_char(c)
                    .ok_or(CompileError::UnsupportedFormatChar(c))?;
                for _ in 0..repeat.max(1) {
                    tokens.push(kind);
                }
                repeat = 0;
            }
        }
    }

    if tokens.is_empty() {
        return Err(CompileError::EmptyFormat);
    }

    Ok(ParsedFormat {
        endian,
        tokens,
        is_list,
    })
}
