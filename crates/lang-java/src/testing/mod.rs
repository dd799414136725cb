//! Test fixtures shared by the unit tests.

pub mod class_builder;

pub use class_builder::ClassFileBuilder;

use crate::classpath::ClassSource;
use memberscope_api::ApiResult;
use std::collections::HashMap;

/// In-memory class source keyed by internal name.
#[derive(Default)]
pub struct MemorySource {
    classes: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(self, builder: ClassFileBuilder) -> Self {
        let name = builder.name().to_string();
        self.with_bytes(&name, builder.build())
    }

    pub fn with_bytes(mut self, internal_name: &str, bytes: Vec<u8>) -> Self {
        self.classes.insert(internal_name.to_string(), bytes);
        self
    }
}

impl ClassSource for MemorySource {
    fn find_class(&self, internal_name: &str) -> ApiResult<Option<Vec<u8>>> {
        Ok(self.classes.get(internal_name).cloned())
    }

    fn describe(&self) -> String {
        format!("memory:{} classes", self.classes.len())
    }
}
