use super::ClassSource;
use memberscope_api::ApiResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A class path directory: `a/b/C` lives at `<root>/a/b/C.class`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn class_path(&self, internal_name: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in internal_name.split('/') {
            path.push(segment);
        }
        path.set_extension("class");
        path
    }
}

impl ClassSource for DirectorySource {
    fn find_class(&self, internal_name: &str) -> ApiResult<Option<Vec<u8>>> {
        match std::fs::read(self.class_path(internal_name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }
}
