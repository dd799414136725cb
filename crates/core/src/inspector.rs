//! Text rendering of a type's public members.
//!
//! Fields are listed before methods, each group sorted by name. Static
//! members stay in their sorted position and only gain an `S:` prefix.

use memberscope_api::{FieldDescriptor, MethodDescriptor, TypeDescriptor};
use std::io::{self, Write};

pub const STATIC_PREFIX: &str = "S:";

fn prefix(is_static: bool) -> &'static str {
    if is_static { STATIC_PREFIX } else { "" }
}

/// Fields ordered by name; equal names keep their retrieval order.
pub fn sorted_fields(descriptor: &TypeDescriptor) -> Vec<&FieldDescriptor> {
    let mut fields: Vec<&FieldDescriptor> = descriptor.fields.iter().collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));
    fields
}

/// Methods ordered by name; overloads keep their retrieval order.
pub fn sorted_methods(descriptor: &TypeDescriptor) -> Vec<&MethodDescriptor> {
    let mut methods: Vec<&MethodDescriptor> = descriptor.methods.iter().collect();
    methods.sort_by(|a, b| a.name.cmp(&b.name));
    methods
}

/// `[S:]name : type - declaringType`
pub fn render_field(field: &FieldDescriptor) -> String {
    format!(
        "{}{} : {} - {}",
        prefix(field.is_static),
        field.name,
        field.field_type.java_name(),
        field.declaring_type
    )
}

/// `[S:]name(p1 p2 ) : returnType - declaringType`
pub fn render_method(method: &MethodDescriptor) -> String {
    let mut params = String::new();
    for param in &method.parameter_types {
        params.push_str(&param.java_name());
        params.push(' ');
    }
    format!(
        "{}{}({}) : {} - {}",
        prefix(method.is_static),
        method.name,
        params,
        method.return_type.java_name(),
        method.declaring_type
    )
}

/// Writes one line per public field, then one per public method.
pub fn inspect<W: Write + ?Sized>(descriptor: &TypeDescriptor, out: &mut W) -> io::Result<()> {
    for field in sorted_fields(descriptor) {
        writeln!(out, "{}", render_field(field))?;
    }
    for method in sorted_methods(descriptor) {
        writeln!(out, "{}", render_method(method))?;
    }
    Ok(())
}
