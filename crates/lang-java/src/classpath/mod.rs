//! Class path: the ordered set of places class files are loaded from.

mod archive;
mod directory;

pub use archive::ArchiveSource;
pub use directory::DirectorySource;

use crate::jimage::{IMAGE_MAGIC, JImage};
use memberscope_api::ApiResult;
use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Something that can hand out class-file bytes by internal name.
pub trait ClassSource {
    /// Returns the bytes of `<internal_name>.class`, or `None` when this
    /// source does not contain it.
    fn find_class(&self, internal_name: &str) -> ApiResult<Option<Vec<u8>>>;

    /// Human-readable origin, for logging.
    fn describe(&self) -> String;
}

impl ClassSource for JImage {
    fn find_class(&self, internal_name: &str) -> ApiResult<Option<Vec<u8>>> {
        self.read_class(internal_name)
    }

    fn describe(&self) -> String {
        format!("jimage:{}", self.path().display())
    }
}

/// Detected container format of a class path asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Directory,
    /// jar or zip
    Archive,
    /// jmod: a zip behind a 4-byte `JM` header, classes under `classes/`
    Jmod,
    RuntimeImage,
    Unknown,
}

/// Sniffs an asset by magic bytes.
pub fn detect_asset(path: &Path) -> ApiResult<AssetKind> {
    if path.is_dir() {
        return Ok(AssetKind::Directory);
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 4];
    if file.read_exact(&mut magic).is_err() {
        return Ok(AssetKind::Unknown);
    }

    Ok(match magic {
        // ZIP magic: PK\x03\x04, PK\x05\x06 (empty) or PK\x07\x08 (spanned)
        [0x50, 0x4B, _, _] => AssetKind::Archive,
        [b'J', b'M', _, _] => AssetKind::Jmod,
        _ if u32::from_le_bytes(magic) == IMAGE_MAGIC
            || u32::from_be_bytes(magic) == IMAGE_MAGIC =>
        {
            AssetKind::RuntimeImage
        }
        _ => AssetKind::Unknown,
    })
}

/// Opens a class path entry. Missing entries and unrecognized files yield
/// `None`, the same way the JVM ignores them.
pub fn open_asset(path: &Path) -> ApiResult<Option<Box<dyn ClassSource>>> {
    if !path.exists() {
        tracing::debug!("Skipping missing class path entry {}", path.display());
        return Ok(None);
    }

    let source: Box<dyn ClassSource> = match detect_asset(path)? {
        AssetKind::Directory => Box::new(DirectorySource::new(path)),
        AssetKind::Archive => Box::new(ArchiveSource::open_jar(path)?),
        AssetKind::Jmod => Box::new(ArchiveSource::open_jmod(path)?),
        AssetKind::RuntimeImage => Box::new(JImage::open(path)?),
        AssetKind::Unknown => {
            tracing::debug!("Skipping unrecognized class path entry {}", path.display());
            return Ok(None);
        }
    };
    Ok(Some(source))
}

#[derive(Default)]
pub struct ClassPath {
    sources: Vec<Box<dyn ClassSource>>,
}

impl ClassPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: Box<dyn ClassSource>) {
        self.sources.push(source);
    }

    pub fn with_source(mut self, source: impl ClassSource + 'static) -> Self {
        self.push(Box::new(source));
        self
    }

    /// Appends every entry of a platform path list (`:`/`;` separated).
    pub fn push_path_list(&mut self, list: &OsStr) -> ApiResult<()> {
        for entry in std::env::split_paths(list) {
            let entry = if entry.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                entry
            };
            if let Some(source) = open_asset(&entry)? {
                self.push(source);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn describe(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.describe()).collect()
    }

    /// Searches the sources in order; the first hit wins.
    pub fn find_class(&self, internal_name: &str) -> ApiResult<Option<Vec<u8>>> {
        for source in &self.sources {
            if let Some(bytes) = source.find_class(internal_name)? {
                tracing::debug!("Found {} in {}", internal_name, source.describe());
                return Ok(Some(bytes));
            }
        }
        Ok(None)
    }
}
