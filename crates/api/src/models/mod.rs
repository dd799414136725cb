pub mod descriptor;
pub mod type_ref;

pub use descriptor::*;
pub use type_ref::*;
