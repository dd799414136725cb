use super::ClassSource;
use memberscope_api::{ApiError, ApiResult};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::result::ZipError;

trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Length of the header that precedes the zip data in a jmod file.
const JMOD_HEADER_LEN: usize = 4;

/// A jar, zip or jmod archive on the class path.
pub struct ArchiveSource {
    path: PathBuf,
    /// Entry prefix in front of class paths (`classes/` for jmods)
    prefix: &'static str,
    archive: RefCell<ZipArchive<Box<dyn ReadSeek>>>,
}

impl ArchiveSource {
    pub fn open_jar(path: &Path) -> ApiResult<Self> {
        let reader: Box<dyn ReadSeek> = Box::new(BufReader::new(File::open(path)?));
        Self::from_reader(path, reader, "")
    }

    pub fn open_jmod(path: &Path) -> ApiResult<Self> {
        let bytes = std::fs::read(path)?;
        if bytes.len() < JMOD_HEADER_LEN || !bytes.starts_with(b"JM") {
            return Err(archive_error(path, "missing jmod header"));
        }
        let reader: Box<dyn ReadSeek> = Box::new(Cursor::new(bytes[JMOD_HEADER_LEN..].to_vec()));
        Self::from_reader(path, reader, "classes/")
    }

    fn from_reader(path: &Path, reader: Box<dyn ReadSeek>, prefix: &'static str) -> ApiResult<Self> {
        let archive = ZipArchive::new(reader).map_err(|e| archive_error(path, e))?;
        tracing::debug!("Opened archive {} ({} entries)", path.display(), archive.len());
        Ok(Self {
            path: path.to_path_buf(),
            prefix,
            archive: RefCell::new(archive),
        })
    }
}

impl ClassSource for ArchiveSource {
    fn find_class(&self, internal_name: &str) -> ApiResult<Option<Vec<u8>>> {
        let entry_name = format!("{}{}.class", self.prefix, internal_name);
        let mut archive = self.archive.borrow_mut();
        let mut entry = match archive.by_name(&entry_name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(archive_error(&self.path, e)),
        };

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }

    fn describe(&self) -> String {
        format!("archive:{}", self.path.display())
    }
}

fn archive_error(path: &Path, message: impl ToString) -> ApiError {
    ApiError::Archive {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
