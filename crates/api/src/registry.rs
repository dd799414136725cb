use crate::error::ApiResult;
use crate::models::TypeDescriptor;

/// Looks up types by name and exposes their public surface.
///
/// Implementations return [`ApiError::ClassNotFound`](crate::ApiError::ClassNotFound)
/// when the name does not denote a known type; every other error means the
/// registry itself failed.
pub trait TypeRegistry {
    fn resolve(&self, name: &str) -> ApiResult<TypeDescriptor>;
}

impl<T: TypeRegistry + ?Sized> TypeRegistry for &T {
    fn resolve(&self, name: &str) -> ApiResult<TypeDescriptor> {
        (**self).resolve(name)
    }
}

impl<T: TypeRegistry + ?Sized> TypeRegistry for Box<T> {
    fn resolve(&self, name: &str) -> ApiResult<TypeDescriptor> {
        (**self).resolve(name)
    }
}
