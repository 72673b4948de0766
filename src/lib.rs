//! Struct-template codec for classic Mac resource fork records.
//!
//! Resource entries in old Mac software are fixed-layout binary records. This
//! crate compiles a compact descriptor string (in the spirit of Python's
//! `struct` module) plus an optional field name list into an immutable
//! [`StructTemplate`], then decodes raw resource bytes into a
//! [`serde_json::Value`] and encodes such a value back to the identical byte
//! layout.
//!
//! A resource-fork walker supplies the raw bytes per entry and a spec file
//! maps resource type tags to templates; neither side needs to know anything
//! about the other.
//!
//! ```
//! use rsrctmpl::StructTemplate;
//! use serde_json::json;
//!
//! let names: Vec<String> = ["version", "flags"].iter().map(|s| s.to_string()).collect();
//! let template = StructTemplate::compile("Hh", &names).unwrap();
//!
//! let value = template.unpack(&[0x00, 0x02, 0xff, 0xfe]).unwrap();
//! assert_eq!(value, json!({ "version": 2, "flags": -2 }));
//! assert_eq!(template.pack(&value).unwrap(), vec![0x00, 0x02, 0xff, 0xfe]);
//! ```
//!
//! Whole spec files load through [`SpecTable`]:
//!
//! ```
//! use rsrctmpl::{SpecTable, TypeTag};
//!
//! let table = SpecTable::parse("Hedr:L5i3f5i40x:version,numItems // terrain header\n");
//! let template = table.get(&TypeTag(*b"Hedr")).unwrap();
//! assert_eq!(template.record_length(), 96);
//! ```

pub mod err;
pub mod format;
pub mod spec_table;
pub mod template;
pub mod textio;

mod codec;
mod names;

pub use err::{CompileError, DecodeError, EncodeError};
pub use format::{Endian, FieldKind};
pub use spec_table::{SpecTable, TypeTag};
pub use template::{RecordShape, StructTemplate};
