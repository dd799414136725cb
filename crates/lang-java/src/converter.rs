//! Conversion from class-file descriptors to [`TypeRef`].

use memberscope_api::{PrimitiveType, TypeRef};
use ristretto_classfile::{BaseType, FieldType};

pub struct JavaTypeConverter;

impl JavaTypeConverter {
    /// Parses a field descriptor such as `[Ljava/lang/String;`.
    ///
    /// The whole descriptor must be consumed: `II` is rejected.
    pub fn parse_field(descriptor: &str) -> Result<TypeRef, ristretto_classfile::Error> {
        let field_type = FieldType::parse(descriptor)?;
        if field_type.descriptor() != descriptor {
            return Err(ristretto_classfile::Error::InvalidFieldTypeDescriptor(
                descriptor.to_string(),
            ));
        }
        Ok(Self::convert_type(&field_type))
    }

    /// Parses a method descriptor into parameter types and return type.
    pub fn parse_method(
        descriptor: &str,
    ) -> Result<(Vec<TypeRef>, TypeRef), ristretto_classfile::Error> {
        let (params, ret) = FieldType::parse_method_descriptor(descriptor)?;
        let return_type = match ret {
            None => TypeRef::Void,
            Some(field_type) => Self::convert_type(&field_type),
        };
        let parameter_types = params.iter().map(Self::convert_type).collect();
        Ok((parameter_types, return_type))
    }

    pub fn convert_type(ty: &FieldType) -> TypeRef {
        match ty {
            FieldType::Base(base) => TypeRef::Primitive(Self::convert_base(base)),
            FieldType::Object(name) => TypeRef::class(name.replace('/', ".")),
            FieldType::Array(component) => {
                let mut dimensions = 1usize;
                let mut current = component.as_ref();
                while let FieldType::Array(inner) = current {
                    dimensions += 1;
                    current = inner.as_ref();
                }
                TypeRef::array_of(Self::convert_type(current), dimensions)
            }
        }
    }

    fn convert_base(base: &BaseType) -> PrimitiveType {
        match base {
            BaseType::Boolean => PrimitiveType::Boolean,
            BaseType::Byte => PrimitiveType::Byte,
            BaseType::Char => PrimitiveType::Char,
            BaseType::Short => PrimitiveType::Short,
            BaseType::Int => PrimitiveType::Int,
            BaseType::Long => PrimitiveType::Long,
            BaseType::Float => PrimitiveType::Float,
            BaseType::Double => PrimitiveType::Double,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_descriptors() {
        assert_eq!(
            JavaTypeConverter::parse_field("I").unwrap(),
            TypeRef::Primitive(PrimitiveType::Int)
        );
        assert_eq!(
            JavaTypeConverter::parse_field("Ljava/util/Map$Entry;").unwrap(),
            TypeRef::class("java.util.Map$Entry")
        );
        let matrix = JavaTypeConverter::parse_field("[[Ljava/lang/Object;").unwrap();
        assert_eq!(matrix, TypeRef::array_of(TypeRef::class("java.lang.Object"), 2));
        assert_eq!(matrix.java_name(), "[[Ljava.lang.Object;");
    }

    #[test]
    fn test_method_descriptors() {
        let (params, ret) = JavaTypeConverter::parse_method("(I[BLjava/lang/String;)V").unwrap();
        assert_eq!(
            params,
            vec![
                TypeRef::Primitive(PrimitiveType::Int),
                TypeRef::array_of(TypeRef::Primitive(PrimitiveType::Byte), 1),
                TypeRef::class("java.lang.String"),
            ]
        );
        assert_eq!(ret, TypeRef::Void);

        let (params, ret) = JavaTypeConverter::parse_method("()[J").unwrap();
        assert!(params.is_empty());
        assert_eq!(ret.java_name(), "[J");
    }

    #[test]
    fn test_invalid_descriptors() {
        for descriptor in ["V", "Ljava/lang/String", "II", "L;", "[", ""] {
            assert!(
                JavaTypeConverter::parse_field(descriptor).is_err(),
                "{descriptor:?}"
            );
        }
        assert!(JavaTypeConverter::parse_method("I)V").is_err());
    }
}
