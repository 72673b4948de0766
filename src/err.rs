use thiserror::Error;

pub type CompileResult<T> = std::result::Result<T, CompileError>;
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

/// Errors raised while compiling a template from a descriptor string and a
/// field name list. These are configuration errors: the spec table loader
/// reports them per line and keeps going.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("unsupported struct format character `{0}`")]
    UnsupportedFormatChar(char),

    #[error("repeat count overflow in format descriptor")]
    RepeatCountOverflow,

    #[error("format descriptor contains no fields")]
    EmptyFormat,

    #[error("field name macro `{name}` has an invalid repeat count")]
    InvalidMacroCount { name: String },

    #[error("{extra} field names left over after naming all {fields} named fields")]
    TooManyNames { extra: usize, fields: usize },

    #[error("spec line has no format descriptor segment")]
    MissingFormat,

    #[error("resource type `{0}` does not work out to four bytes")]
    InvalidTypeTag(String),
}

/// Errors raised while decoding raw resource bytes through a template.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("record at offset {offset} is truncated: need {need} bytes, have {have}")]
    Truncated {
        offset: usize,
        need: usize,
        have: usize,
    },

    #[error("resource is {actual} bytes, expected exactly {expected}")]
    ResourceLengthMismatch { expected: usize, actual: usize },

    #[error("{names} field names for {values} decoded values")]
    FieldCountMismatch { names: usize, values: usize },

    #[error("field #{index} decodes to a non-finite float, which JSON cannot carry")]
    NonFiniteFloat { index: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while encoding a shaped value back to raw resource bytes.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("missing field `{name}`")]
    MissingField { name: String },

    #[error("field `{field}`: expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("field `{field}`: value does not fit in {kind}")]
    OutOfRange { field: String, kind: &'static str },

    #[error("field `{field}`: byte string must be {expected} bytes, got {actual}")]
    ByteStringLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("field `{field}`: invalid base-16 string")]
    InvalidHex { field: String },

    #[error("scalar template encodes from a bare value, not an array or object")]
    CompositeScalar,

    #[error("record must encode from an object")]
    NotAnObject,

    #[error("record must encode from an array of values")]
    NotAnArray,

    #[error("list-mode resource must encode from an array of records")]
    NotAList,

    #[error("expected an array of {expected} values, got {actual}")]
    TupleLengthMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
