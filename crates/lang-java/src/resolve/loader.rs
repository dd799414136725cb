use crate::classpath::ClassPath;
use crate::converter::JavaTypeConverter;
use crate::naming::internal_to_binary;
use memberscope_api::{ApiError, ApiResult, FieldDescriptor, MethodDescriptor, TypeKind};
use ristretto_classfile::{ClassAccessFlags, ClassFile, FieldAccessFlags, MethodAccessFlags};
use std::collections::HashMap;
use std::io::Cursor;
use std::rc::Rc;

/// A class file reduced to what member collection needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedClass {
    pub internal_name: String,
    pub binary_name: String,
    pub kind: TypeKind,
    /// Internal name; interfaces still record `java/lang/Object` here
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    /// Declared public fields, in class-file order
    pub fields: Vec<FieldDescriptor>,
    /// Declared public methods excluding initializers, in class-file order
    pub methods: Vec<MethodDescriptor>,
}

impl LoadedClass {
    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    /// Superclass followed by superinterfaces.
    pub fn direct_supertypes(&self) -> impl Iterator<Item = &str> {
        self.super_class
            .as_deref()
            .into_iter()
            .chain(self.interfaces.iter().map(String::as_str))
    }

    pub fn from_class_file(class: &ClassFile) -> Result<Self, ristretto_classfile::Error> {
        let pool = &class.constant_pool;
        let internal_name = class.class_name()?.to_string();
        let binary_name = internal_to_binary(&internal_name);

        let kind = if class.access_flags.contains(ClassAccessFlags::ANNOTATION) {
            TypeKind::Annotation
        } else if class.access_flags.contains(ClassAccessFlags::INTERFACE) {
            TypeKind::Interface
        } else if class.access_flags.contains(ClassAccessFlags::ENUM) {
            TypeKind::Enum
        } else {
            TypeKind::Class
        };

        let mut fields = Vec::new();
        for field in &class.fields {
            if !field.access_flags.contains(FieldAccessFlags::PUBLIC) {
                continue;
            }
            fields.push(FieldDescriptor {
                name: pool.try_get_utf8(field.name_index)?.to_string(),
                field_type: JavaTypeConverter::convert_type(&field.field_type),
                declaring_type: binary_name.clone(),
                is_static: field.access_flags.contains(FieldAccessFlags::STATIC),
            });
        }

        let mut methods = Vec::new();
        for method in &class.methods {
            let name = pool.try_get_utf8(method.name_index)?;
            if !method.access_flags.contains(MethodAccessFlags::PUBLIC)
                || name == "<init>"
                || name == "<clinit>"
            {
                continue;
            }
            let (parameter_types, return_type) =
                JavaTypeConverter::parse_method(pool.try_get_utf8(method.descriptor_index)?)?;
            methods.push(MethodDescriptor {
                name: name.to_string(),
                parameter_types,
                return_type,
                declaring_type: binary_name.clone(),
                is_static: method.access_flags.contains(MethodAccessFlags::STATIC),
            });
        }

        let super_class = match class.super_class {
            0 => None,
            index => Some(pool.try_get_class(index)?.to_string()),
        };
        let interfaces = class
            .interfaces
            .iter()
            .map(|&index| pool.try_get_class(index).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            internal_name,
            binary_name,
            kind,
            super_class,
            interfaces,
            fields,
            methods,
        })
    }
}

/// Loads and memoises classes from a [`ClassPath`] for one resolution.
pub struct ClassLoader<'a> {
    class_path: &'a ClassPath,
    loaded: HashMap<String, Rc<LoadedClass>>,
}

impl<'a> ClassLoader<'a> {
    pub fn new(class_path: &'a ClassPath) -> Self {
        Self {
            class_path,
            loaded: HashMap::new(),
        }
    }

    /// Loads a class by internal name; `None` if no source has it.
    pub fn load(&mut self, internal_name: &str) -> ApiResult<Option<Rc<LoadedClass>>> {
        if let Some(class) = self.loaded.get(internal_name) {
            return Ok(Some(class.clone()));
        }

        let Some(bytes) = self.class_path.find_class(internal_name)? else {
            return Ok(None);
        };

        let binary_name = internal_to_binary(internal_name);
        let class_file = ClassFile::from_bytes(&mut Cursor::new(bytes))
            .map_err(|e| ApiError::malformed(&binary_name, e))?;
        if class_file.access_flags.contains(ClassAccessFlags::MODULE) {
            return Ok(None);
        }

        let class =
            LoadedClass::from_class_file(&class_file).map_err(|e| ApiError::malformed(&binary_name, e))?;
        if class.internal_name != internal_name {
            return Err(ApiError::malformed(
                binary_name,
                format!("class file declares {}", class.binary_name),
            ));
        }

        tracing::debug!(
            "Loaded {} ({}, {} public fields, {} public methods declared)",
            class.binary_name,
            class.kind,
            class.fields.len(),
            class.methods.len()
        );

        let class = Rc::new(class);
        self.loaded.insert(internal_name.to_string(), class.clone());
        Ok(Some(class))
    }

    /// Loads a supertype named by `class`; its absence is fatal.
    pub fn require_supertype(
        &mut self,
        class: &LoadedClass,
        supertype: &str,
    ) -> ApiResult<Rc<LoadedClass>> {
        self.load(supertype)?
            .ok_or_else(|| ApiError::MissingSupertype {
                class: class.binary_name.clone(),
                supertype: internal_to_binary(supertype),
            })
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}
