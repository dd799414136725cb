use std::fmt;

/// JVM primitive types, as they appear in descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn descriptor(self) -> char {
        match self {
            PrimitiveType::Boolean => 'Z',
            PrimitiveType::Byte => 'B',
            PrimitiveType::Char => 'C',
            PrimitiveType::Short => 'S',
            PrimitiveType::Int => 'I',
            PrimitiveType::Long => 'J',
            PrimitiveType::Float => 'F',
            PrimitiveType::Double => 'D',
        }
    }

    pub fn from_descriptor(c: char) -> Option<Self> {
        match c {
            'Z' => Some(PrimitiveType::Boolean),
            'B' => Some(PrimitiveType::Byte),
            'C' => Some(PrimitiveType::Char),
            'S' => Some(PrimitiveType::Short),
            'I' => Some(PrimitiveType::Int),
            'J' => Some(PrimitiveType::Long),
            'F' => Some(PrimitiveType::Float),
            'D' => Some(PrimitiveType::Double),
            _ => None,
        }
    }
}

/// A type as referenced from a field or method signature (erased).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(PrimitiveType),

    /// Only valid as a method return type
    Void,

    /// Class or interface by binary name (e.g. `java.util.Map$Entry`)
    Class(String),

    /// Array type; `element` is never itself an array
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },
}

impl TypeRef {
    pub fn class(binary_name: impl Into<String>) -> Self {
        TypeRef::Class(binary_name.into())
    }

    /// Builds an array type, flattening nested arrays into one dimension count.
    pub fn array_of(element: TypeRef, dimensions: usize) -> Self {
        match element {
            TypeRef::Array {
                element,
                dimensions: inner,
            } => TypeRef::Array {
                element,
                dimensions: inner + dimensions,
            },
            other => TypeRef::Array {
                element: Box::new(other),
                dimensions,
            },
        }
    }

    /// The canonical runtime name of the type.
    ///
    /// Primitives render as their keyword, classes by binary name and arrays
    /// in descriptor form with dots, e.g. `[I` or `[Ljava.lang.String;`.
    pub fn java_name(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.keyword().to_string(),
            TypeRef::Void => "void".to_string(),
            TypeRef::Class(name) => name.clone(),
            TypeRef::Array {
                element,
                dimensions,
            } => {
                let mut name = "[".repeat(*dimensions);
                match element.as_ref() {
                    TypeRef::Primitive(p) => name.push(p.descriptor()),
                    TypeRef::Class(class) => {
                        name.push('L');
                        name.push_str(class);
                        name.push(';');
                    }
                    TypeRef::Void => name.push('V'),
                    TypeRef::Array { .. } => name.push_str(&element.java_name()),
                }
                name
            }
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.java_name())
    }
}
