use super::type_ref::TypeRef;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Array,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Annotation => "annotation",
            TypeKind::Array => "array",
        };
        f.write_str(s)
    }
}

/// A publicly visible field, own or inherited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: TypeRef,
    /// Binary name of the type that introduces the field
    pub declaring_type: String,
    pub is_static: bool,
}

/// A publicly visible method, own or inherited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub parameter_types: Vec<TypeRef>,
    pub return_type: TypeRef,
    /// Binary name of the type that introduces the method
    pub declaring_type: String,
    pub is_static: bool,
}

/// The public surface of one resolved type.
///
/// Members are kept in retrieval order; ordering for display is the
/// inspector's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub kind: TypeKind,
    pub fields: Vec<FieldDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }
}
