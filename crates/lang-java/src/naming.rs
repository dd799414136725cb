use crate::converter::JavaTypeConverter;
use memberscope_api::TypeRef;

/// Separator between packages and between package/class in binary names.
pub const TYPE_SEPARATOR: char = '.';

/// Separator used by class files and archives.
pub const INTERNAL_SEPARATOR: char = '/';

/// The JVM limit on array dimensions.
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// What a user-supplied class name asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedType {
    /// A class or interface, by internal name
    Class(String),
    /// An array type in descriptor form
    Array(TypeRef),
}

/// `java.util.Map$Entry` -> `java/util/Map$Entry`
pub fn binary_to_internal(binary_name: &str) -> String {
    binary_name.replace(TYPE_SEPARATOR, "/")
}

/// `java/util/Map$Entry` -> `java.util.Map$Entry`
pub fn internal_to_binary(internal_name: &str) -> String {
    internal_name.replace(INTERNAL_SEPARATOR, ".")
}

/// Interprets a name the way `Class.forName` does.
///
/// Accepts binary names (`java.lang.String`, `java.util.Map$Entry`) and array
/// names in descriptor form (`[I`, `[Ljava.lang.String;`). Returns `None`
/// for anything that can never name a loadable type: empty names, names
/// with `/` or empty segments, and malformed or too deep array names.
/// Primitive keywords pass through and are simply never found.
pub fn parse_requested_type(name: &str) -> Option<RequestedType> {
    if name.is_empty() || name.contains(INTERNAL_SEPARATOR) {
        return None;
    }

    if name.starts_with('[') {
        let ty = JavaTypeConverter::parse_field(&binary_to_internal(name)).ok()?;
        let TypeRef::Array {
            element,
            dimensions,
        } = &ty
        else {
            return None;
        };
        if *dimensions > MAX_ARRAY_DIMENSIONS {
            return None;
        }
        if let TypeRef::Class(element) = element.as_ref() {
            if !is_valid_binary_name(element) {
                return None;
            }
        }
        return Some(RequestedType::Array(ty));
    }

    if !is_valid_binary_name(name) {
        return None;
    }
    Some(RequestedType::Class(binary_to_internal(name)))
}

fn is_valid_binary_name(name: &str) -> bool {
    !name.contains(['[', ';']) && !name.split(TYPE_SEPARATOR).any(str::is_empty)
}
