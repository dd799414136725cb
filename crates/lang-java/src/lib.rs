//! JVM type registry: resolves class names against the JDK runtime image and
//! the application class path, and collects their public members.

pub mod classpath;
pub mod converter;
pub mod jdk;
pub mod jimage;
pub mod naming;
pub mod resolve;

pub use classpath::{ClassPath, ClassSource};
pub use jdk::{JdkDiscoverer, JdkInstallation};
pub use resolve::{JavaTypeRegistry, RegistryOptions};

#[cfg(test)]
pub(crate) mod testing;
