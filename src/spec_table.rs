//! Spec table loading.
//!
//! A spec file is line oriented; each non-blank, non-comment line compiles
//! one template:
//!
//! ```text
//! TYPE_TAG ':' FORMAT_DESCRIPTOR [ ':' NAME ',' NAME ',' ... ]
//! ```
//!
//! `//` starts a comment, whole-line or trailing. A line that fails to
//! compile is reported through `log` and skipped; the rest of the table still
//! loads. Later lines overwrite earlier ones for the same tag.

use std::fmt;

use encoding::EncodingRef;
use hashbrown::HashMap;
use log::warn;

use crate::err::{CompileError, CompileResult};
use crate::template::StructTemplate;
use crate::textio;

/// A four-byte resource type tag, e.g. `Hedr` or `STR `.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag(pub [u8; 4]);

impl TypeTag {
    /// Parse a textual tag. Shorter tags are right-padded with spaces, and
    /// `%xx` escapes spell bytes that are awkward in a text file (`STR%23`
    /// for `STR#` works as well as the literal).
    pub fn parse(text: &str) -> CompileResult<TypeTag> {
        let mut raw = Vec::with_capacity(4);
        let mut bytes = text.bytes();
        while let Some(b) = bytes.next() {
            if b == b'%' {
                let hi = bytes.next().and_then(hex_nibble);
                let lo = bytes.next().and_then(hex_nibble);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => raw.push(hi << 4 | lo),
                    _ => return Err(CompileError::InvalidTypeTag(text.to_string())),
                }
            } else {
                raw.push(b);
            }
        }

        while raw.len() < 4 {
            raw.push(b' ');
        }
        let tag: [u8; 4] = raw
            .try_into()
            .map_err(|_| CompileError::InvalidTypeTag(text.to_string()))?;
        Ok(TypeTag(tag))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Render the tag bytes through a legacy encoding, for use as a JSON key.
    pub fn display_with(&self, encoding: EncodingRef) -> String {
        textio::decode_text(&self.0, encoding)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "%{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({self})")
    }
}

fn hex_nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Compiled templates keyed by resource type tag.
#[derive(Default)]
pub struct SpecTable {
    templates: HashMap<TypeTag, StructTemplate>,
}

impl SpecTable {
    pub fn new() -> SpecTable {
        SpecTable::default()
    }

    /// Load a whole spec file. Bad lines are warned about and skipped; the
    /// returned table holds every line that compiled.
    pub fn parse(text: &str) -> SpecTable {
        let mut table = SpecTable::new();
        for (index, raw) in text.lines().enumerate() {
            let line = match raw.find("//") {
                Some(comment) => &raw[..comment],
                None => raw,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Err(err) = table.insert_spec_line(line) {
                warn!("skipping spec line {}: {err}", index + 1);
            }
        }
        table
    }

    /// Compile a single `TAG:DESCRIPTOR[:NAMES]` line into the table.
    /// Useful for specs passed one at a time on a command line.
    pub fn insert_spec_line(&mut self, line: &str) -> CompileResult<()> {
        let mut segments = line.splitn(3, ':');
        let tag = segments.next().unwrap_or_default().trim();
        let descriptor = segments.next().ok_or(CompileError::MissingFormat)?.trim();
        // Stray trailing commas after the descriptor happen in hand-written
        // spec files; drop them rather than failing the line.
        let descriptor = descriptor.trim_end_matches([',', ' ']);

        let names: Vec<String> = match segments.next() {
            Some(segment) => segment.split(',').map(|n| n.trim().to_string()).collect(),
            None => Vec::new(),
        };

        let tag = TypeTag::parse(tag)?;
        let template = StructTemplate::compile(descriptor, &names)?;
        self.templates.insert(tag, template);
        Ok(())
    }

    pub fn get(&self, tag: &TypeTag) -> Option<&StructTemplate> {
        self.templates.get(tag)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeTag, &StructTemplate)> {
        self.templates.iter()
    }
}
