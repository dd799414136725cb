//! Reader for the JDK runtime image (`lib/modules`).
//!
//! The image starts with an index: a fixed header, a redirect table, an
//! offsets table, a block of encoded resource locations and a string table.
//! Resource content follows the index. Only uncompressed resources can be
//! read.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use memberscope_api::{ApiError, ApiResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

pub const IMAGE_MAGIC: u32 = 0xCAFE_DADA;
const HEADER_SIZE: usize = 7 * 4;
const MAJOR_VERSION: u32 = 1;

const ATTRIBUTE_END: u8 = 0;
const ATTRIBUTE_MODULE: u8 = 1;
const ATTRIBUTE_PARENT: u8 = 2;
const ATTRIBUTE_BASE: u8 = 3;
const ATTRIBUTE_EXTENSION: u8 = 4;
const ATTRIBUTE_OFFSET: u8 = 5;
const ATTRIBUTE_COMPRESSED: u8 = 6;
const ATTRIBUTE_UNCOMPRESSED: u8 = 7;
const ATTRIBUTE_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endian {
    Little,
    Big,
}

impl Endian {
    fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endian::Little => LittleEndian::read_u32(buf),
            Endian::Big => BigEndian::read_u32(buf),
        }
    }
}

/// Where a resource lives inside the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation {
    pub module: String,
    pub offset: u64,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
}

pub struct JImage {
    path: PathBuf,
    file: RefCell<File>,
    content_start: u64,
    /// `java/lang/String` -> location, first module wins
    classes: HashMap<String, ResourceLocation>,
}

impl JImage {
    pub fn open(path: &Path) -> ApiResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; HEADER_SIZE];
        file.read_exact(&mut header)?;

        let endian = if LittleEndian::read_u32(&header) == IMAGE_MAGIC {
            Endian::Little
        } else if BigEndian::read_u32(&header) == IMAGE_MAGIC {
            Endian::Big
        } else {
            return Err(corrupt(path, "bad magic number"));
        };

        let field = |i: usize| endian.read_u32(&header[i * 4..i * 4 + 4]) as usize;
        let version = field(1) as u32;
        if version >> 16 != MAJOR_VERSION {
            return Err(ApiError::UnsupportedResource {
                name: path.display().to_string(),
                reason: format!("jimage version {}.{}", version >> 16, version & 0xFFFF),
            });
        }
        let table_length = field(4);
        let locations_size = field(5);
        let strings_size = field(6);

        let tables_size = table_length
            .checked_mul(8)
            .ok_or_else(|| corrupt(path, "index larger than file"))?;
        let strings_start = tables_size
            .checked_add(locations_size)
            .ok_or_else(|| corrupt(path, "index larger than file"))?;
        let index_size = strings_start
            .checked_add(strings_size)
            .ok_or_else(|| corrupt(path, "index larger than file"))?;
        let available = file.metadata()?.len().saturating_sub(HEADER_SIZE as u64);
        if index_size as u64 > available {
            return Err(corrupt(path, "index larger than file"));
        }

        let mut index = vec![0u8; index_size];
        file.read_exact(&mut index)?;

        let offsets = &index[table_length * 4..tables_size];
        let locations = &index[tables_size..strings_start];
        let strings = &index[strings_start..];

        let mut classes = HashMap::new();
        for slot in offsets.chunks_exact(4) {
            let offset = endian.read_u32(slot) as usize;
            let Some(encoded) = locations.get(offset..) else {
                return Err(corrupt(path, "location offset out of range"));
            };
            let attributes = decode_attributes(encoded).ok_or_else(|| corrupt(path, "bad location"))?;

            if read_string(strings, attributes[ATTRIBUTE_EXTENSION as usize]) != Some("class") {
                continue;
            }
            let (Some(module), Some(parent), Some(base)) = (
                read_string(strings, attributes[ATTRIBUTE_MODULE as usize]),
                read_string(strings, attributes[ATTRIBUTE_PARENT as usize]),
                read_string(strings, attributes[ATTRIBUTE_BASE as usize]),
            ) else {
                return Err(corrupt(path, "string offset out of range"));
            };
            // `/packages` and `/modules` directories are not class resources
            if module.is_empty() || module == "packages" || module == "modules" {
                continue;
            }

            let internal_name = if parent.is_empty() {
                base.to_string()
            } else {
                format!("{parent}/{base}")
            };
            classes.entry(internal_name).or_insert_with(|| ResourceLocation {
                module: module.to_string(),
                offset: attributes[ATTRIBUTE_OFFSET as usize],
                compressed_size: attributes[ATTRIBUTE_COMPRESSED as usize],
                uncompressed_size: attributes[ATTRIBUTE_UNCOMPRESSED as usize],
            });
        }

        tracing::debug!(
            "Indexed {} classes from runtime image {}",
            classes.len(),
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            file: RefCell::new(file),
            content_start: (HEADER_SIZE + index.len()) as u64,
            classes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn locate_class(&self, internal_name: &str) -> Option<&ResourceLocation> {
        self.classes.get(internal_name)
    }

    /// Reads the bytes of `<internal_name>.class`, if the image has it.
    pub fn read_class(&self, internal_name: &str) -> ApiResult<Option<Vec<u8>>> {
        let Some(location) = self.classes.get(internal_name) else {
            return Ok(None);
        };
        if location.compressed_size != 0 {
            return Err(ApiError::UnsupportedResource {
                name: format!("/{}/{}.class", location.module, internal_name),
                reason: "compressed jimage resources are not supported".to_string(),
            });
        }

        let mut file = self.file.borrow_mut();
        file.seek(SeekFrom::Start(self.content_start + location.offset))?;
        let mut bytes = vec![0u8; location.uncompressed_size as usize];
        file.read_exact(&mut bytes)?;
        Ok(Some(bytes))
    }
}

/// Decodes one location: a run of `(kind << 3 | len - 1)` headers, each
/// followed by a big-endian value of `len` bytes, terminated by `END`.
fn decode_attributes(bytes: &[u8]) -> Option<[u64; ATTRIBUTE_COUNT]> {
    let mut attributes = [0u64; ATTRIBUTE_COUNT];
    let mut i = 0;
    loop {
        let header = *bytes.get(i)?;
        let kind = header >> 3;
        if kind == ATTRIBUTE_END {
            return Some(attributes);
        }
        if kind as usize >= ATTRIBUTE_COUNT {
            return None;
        }
        let length = (header & 0x7) as usize + 1;
        let value = bytes
            .get(i + 1..i + 1 + length)?
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | b as u64);
        attributes[kind as usize] = value;
        i += 1 + length;
    }
}

fn read_string(strings: &[u8], offset: u64) -> Option<&str> {
    let tail = strings.get(offset as usize..)?;
    let end = tail.iter().position(|&b| b == 0)?;
    std::str::from_utf8(&tail[..end]).ok()
}

fn corrupt(path: &Path, message: &str) -> ApiError {
    ApiError::Archive {
        path: path.to_path_buf(),
        message: format!("corrupt runtime image: {message}"),
    }
}
