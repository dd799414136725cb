//! Type resolution against a JVM class path.

pub mod loader;
pub mod members;

use crate::classpath::{ClassPath, open_asset};
use crate::jdk::JdkDiscoverer;
use crate::naming::{RequestedType, parse_requested_type};
use loader::ClassLoader;
use members::MemberCollector;
use memberscope_api::{ApiError, ApiResult, TypeDescriptor, TypeKind, TypeRef, TypeRegistry};
use std::ffi::OsString;
use std::path::PathBuf;

const OBJECT: &str = "java/lang/Object";

/// How to assemble the class path of a [`JavaTypeRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// JDK home to use instead of discovery
    pub java_home: Option<PathBuf>,
    /// Application class path; falls back to `CLASSPATH`, then `.`
    pub class_path: Option<OsString>,
    /// Whether to put the JDK's bootstrap classes first
    pub include_jdk: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            java_home: None,
            class_path: None,
            include_jdk: true,
        }
    }
}

/// Resolves JVM type names against a class path, with `Class.forName`,
/// `getFields` and `getMethods` semantics.
pub struct JavaTypeRegistry {
    class_path: ClassPath,
}

impl JavaTypeRegistry {
    pub fn new(class_path: ClassPath) -> Self {
        Self { class_path }
    }

    /// Bootstrap class path (discovered JDK) followed by the application class path.
    pub fn from_options(options: &RegistryOptions) -> ApiResult<Self> {
        let mut class_path = ClassPath::new();

        if options.include_jdk {
            let discoverer = match &options.java_home {
                Some(home) => JdkDiscoverer::with_java_home(home),
                None => JdkDiscoverer::new(),
            };
            match discoverer.discover() {
                Some(jdk) => {
                    tracing::info!(
                        "Using JDK at {} (version {})",
                        jdk.root.display(),
                        jdk.version.as_deref().unwrap_or("unknown")
                    );
                    for asset in &jdk.assets {
                        if let Some(source) = open_asset(asset)? {
                            class_path.push(source);
                        }
                    }
                }
                None => tracing::warn!("No JDK found; only the application class path is searched"),
            }
        }

        let app_class_path = options
            .class_path
            .clone()
            .or_else(|| std::env::var_os("CLASSPATH"))
            .unwrap_or_else(|| OsString::from("."));
        class_path.push_path_list(&app_class_path)?;

        tracing::debug!("Class path: {:?}", class_path.describe());
        Ok(Self::new(class_path))
    }

    pub fn class_path(&self) -> &ClassPath {
        &self.class_path
    }

    fn resolve_class(&self, name: &str, internal_name: &str) -> ApiResult<TypeDescriptor> {
        let mut loader = ClassLoader::new(&self.class_path);
        let class = loader
            .load(internal_name)?
            .ok_or_else(|| ApiError::ClassNotFound(name.to_string()))?;

        let mut collector = MemberCollector::new(&mut loader);
        collector.ancestors(&class)?;

        let mut descriptor = TypeDescriptor::new(class.binary_name.clone(), class.kind);
        descriptor.fields = collector.public_fields(&class)?;
        descriptor.methods = collector.public_methods(&class)?;
        Ok(descriptor)
    }

    /// Arrays have no fields and expose the public methods of `Object`.
    fn resolve_array(&self, name: &str, array: &TypeRef) -> ApiResult<TypeDescriptor> {
        let mut loader = ClassLoader::new(&self.class_path);

        if let TypeRef::Array { element, .. } = array {
            if let TypeRef::Class(element) = element.as_ref() {
                let internal = crate::naming::binary_to_internal(element);
                if loader.load(&internal)?.is_none() {
                    return Err(ApiError::ClassNotFound(name.to_string()));
                }
            }
        }

        let object = loader
            .load(OBJECT)?
            .ok_or_else(|| ApiError::MissingSupertype {
                class: array.java_name(),
                supertype: crate::naming::internal_to_binary(OBJECT),
            })?;
        let mut collector = MemberCollector::new(&mut loader);
        collector.ancestors(&object)?;

        let mut descriptor = TypeDescriptor::new(array.java_name(), TypeKind::Array);
        descriptor.methods = collector.public_methods(&object)?;
        Ok(descriptor)
    }
}

impl TypeRegistry for JavaTypeRegistry {
    fn resolve(&self, name: &str) -> ApiResult<TypeDescriptor> {
        let descriptor = match parse_requested_type(name) {
            None => return Err(ApiError::ClassNotFound(name.to_string())),
            Some(RequestedType::Class(internal_name)) => self.resolve_class(name, &internal_name)?,
            Some(RequestedType::Array(array)) => self.resolve_array(name, &array)?,
        };

        tracing::info!(
            "Resolved {} {}: {} public fields, {} public methods",
            descriptor.kind,
            descriptor.name,
            descriptor.fields.len(),
            descriptor.methods.len()
        );
        Ok(descriptor)
    }
}
