use crate::dependency_analysis::domain::ParsedUnit;
use crate::shared::error::DepsError;
use byteorder::{BigEndian, ReadBytesExt};
use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::{self, Read};
use std::sync::LazyLock;

/// First four bytes of every compiled unit.
pub const MAGIC: u32 = 0xCAFE_BABE;

/// Newest format version read by default.
pub const DEFAULT_MAX_MAJOR_VERSION: u16 = 57;

/// Object type descriptor such as `Ljava/util/Map$Entry;` or `Ljava/util/List<...>;`.
static TYPE_DESCRIPTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"L([A-Za-z0-9_]+(?:/[A-Za-z0-9_]+)*(?:\$[A-Za-z0-9_]+)?)(?:<[^>]+>)?;")
        .expect("type descriptor pattern is valid")
});

mod tag {
    pub const UTF8: u8 = 1;
    pub const INTEGER: u8 = 3;
    pub const FLOAT: u8 = 4;
    pub const LONG: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const CLASS: u8 = 7;
    pub const STRING: u8 = 8;
    pub const FIELD_REF: u8 = 9;
    pub const METHOD_REF: u8 = 10;
    pub const INTERFACE_METHOD_REF: u8 = 11;
    pub const NAME_AND_TYPE: u8 = 12;
    pub const METHOD_HANDLE: u8 = 15;
    pub const METHOD_TYPE: u8 = 16;
    pub const INVOKE_DYNAMIC: u8 = 18;
}

/// UnitParser - reads the header and constant pool of a compiled unit
///
/// Only the constant pool is decoded. Dependencies are the resolved class
/// references plus every object type mentioned in a descriptor or signature
/// string. String literals are never scanned.
#[derive(Debug, Clone, Copy)]
pub struct UnitParser {
    max_major_version: u16,
}

impl Default for UnitParser {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitParser {
    pub fn new() -> Self {
        Self {
            max_major_version: DEFAULT_MAX_MAJOR_VERSION,
        }
    }

    pub fn with_max_major_version(max_major_version: u16) -> Self {
        Self { max_major_version }
    }

    pub fn max_major_version(&self) -> u16 {
        self.max_major_version
    }

    /// Parses an in-memory unit.
    pub fn parse_bytes(&self, bytes: &[u8], expected_name: &str) -> Result<ParsedUnit, DepsError> {
        self.parse(bytes, expected_name)
    }

    /// Parses a unit from a byte stream.
    ///
    /// # Arguments
    /// * `reader` - Stream positioned at the magic number
    /// * `expected_name` - Dotted name the unit must declare for itself
    ///
    /// # Errors
    /// - `DepsError::Format` for a wrong magic number, an unknown constant tag,
    ///   a truncated stream or an unresolvable own-class index
    /// - `DepsError::Version` if the major version is newer than supported
    /// - `DepsError::NameMismatch` if the unit declares a different name
    pub fn parse<R: Read>(&self, mut reader: R, expected_name: &str) -> Result<ParsedUnit, DepsError> {
        let io_error = |e: io::Error| read_error(expected_name, e);

        let magic = reader.read_u32::<BigEndian>().map_err(io_error)?;
        if magic != MAGIC {
            return Err(format_error(
                expected_name,
                format!("bad magic number 0x{:08X}", magic),
            ));
        }

        skip(&mut reader, 2).map_err(io_error)?;
        let major = reader.read_u16::<BigEndian>().map_err(io_error)?;
        if major > self.max_major_version {
            return Err(DepsError::Version {
                unit: expected_name.to_string(),
                found: major,
                supported: self.max_major_version,
            });
        }

        let pool = ConstantPool::read(&mut reader, expected_name)?;

        skip(&mut reader, 2).map_err(io_error)?;
        let this_index = reader.read_u16::<BigEndian>().map_err(io_error)?;
        let declared = pool
            .class_name(this_index)
            .map(|name| name.replace('/', "."))
            .ok_or_else(|| {
                format_error(
                    expected_name,
                    format!("own class index {} does not name a class", this_index),
                )
            })?;
        if declared != expected_name {
            return Err(DepsError::NameMismatch {
                expected: expected_name.to_string(),
                found: declared,
            });
        }

        Ok(ParsedUnit::new(declared, pool.referenced_names()))
    }
}

#[derive(Debug, Default)]
struct ConstantPool {
    texts: Vec<Option<String>>,
    class_refs: HashMap<u16, u16>,
    literals: HashSet<u16>,
}

impl ConstantPool {
    fn read<R: Read>(reader: &mut R, unit: &str) -> Result<Self, DepsError> {
        let io_error = |e: io::Error| read_error(unit, e);

        let size = reader.read_u16::<BigEndian>().map_err(io_error)?;
        let mut pool = Self {
            texts: vec![None; usize::from(size)],
            ..Self::default()
        };

        // 8-byte constants take two slots, so a u32 cursor cannot overflow.
        let mut slot = 1u32;
        while slot < u32::from(size) {
            let entry = reader.read_u8().map_err(io_error)?;
            match entry {
                tag::UTF8 => {
                    let length = reader.read_u16::<BigEndian>().map_err(io_error)?;
                    let mut bytes = vec![0u8; usize::from(length)];
                    reader.read_exact(&mut bytes).map_err(io_error)?;
                    pool.texts[slot as usize] = Some(String::from_utf8_lossy(&bytes).into_owned());
                }
                tag::INTEGER | tag::FLOAT => skip(reader, 4).map_err(io_error)?,
                tag::LONG | tag::DOUBLE => {
                    skip(reader, 8).map_err(io_error)?;
                    slot += 1;
                }
                tag::CLASS => {
                    let name = reader.read_u16::<BigEndian>().map_err(io_error)?;
                    pool.class_refs.insert(slot as u16, name);
                }
                tag::STRING => {
                    let text = reader.read_u16::<BigEndian>().map_err(io_error)?;
                    pool.literals.insert(text);
                }
                tag::FIELD_REF | tag::METHOD_REF | tag::INTERFACE_METHOD_REF | tag::INVOKE_DYNAMIC => {
                    skip(reader, 4).map_err(io_error)?
                }
                // Name index, then descriptor index; the descriptor text is
                // picked up by the descriptor scan over all text slots.
                tag::NAME_AND_TYPE => skip(reader, 4).map_err(io_error)?,
                tag::METHOD_HANDLE => skip(reader, 3).map_err(io_error)?,
                tag::METHOD_TYPE => skip(reader, 2).map_err(io_error)?,
                other => {
                    return Err(format_error(
                        unit,
                        format!("unknown constant tag {} at pool slot {}", other, slot),
                    ))
                }
            }
            slot += 1;
        }

        Ok(pool)
    }

    fn text(&self, slot: u16) -> Option<&str> {
        self.texts.get(usize::from(slot))?.as_deref()
    }

    fn class_name(&self, slot: u16) -> Option<&str> {
        self.class_refs.get(&slot).and_then(|name| self.text(*name))
    }

    fn referenced_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();

        for name_slot in self.class_refs.values() {
            if let Some(name) = self.text(*name_slot) {
                if !name.starts_with('[') {
                    names.insert(name.replace('/', "."));
                }
            }
        }

        for (slot, text) in self.texts.iter().enumerate() {
            let Some(text) = text else {
                continue;
            };
            if u16::try_from(slot).is_ok_and(|slot| self.literals.contains(&slot)) {
                continue;
            }
            for captures in TYPE_DESCRIPTOR.captures_iter(text) {
                if let Some(name) = captures.get(1) {
                    names.insert(name.as_str().replace('/', "."));
                }
            }
        }

        names
    }
}

fn skip<R: Read>(reader: &mut R, count: u64) -> io::Result<()> {
    let skipped = io::copy(&mut reader.by_ref().take(count), &mut io::sink())?;
    if skipped < count {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
    }
    Ok(())
}

fn format_error(unit: &str, reason: String) -> DepsError {
    DepsError::Format {
        unit: unit.to_string(),
        reason,
    }
}

fn read_error(unit: &str, error: io::Error) -> DepsError {
    let reason = if error.kind() == io::ErrorKind::UnexpectedEof {
        "stream ends unexpectedly".to_string()
    } else {
        error.to_string()
    };
    format_error(unit, reason)
}
