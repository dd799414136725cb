//! One prompt, one lookup, one listing.

use crate::error::{Result, SessionError};
use crate::inspector;
use memberscope_api::TypeRegistry;
use std::io::{BufRead, Write};

pub const PROMPT: &str = "Enter the fully specified class to use or 'q' to quit.";
pub const UNKNOWN_CLASS_MESSAGE: &str = "I don't know that class name.  Quitting...";

/// Which path a session took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Listed { fields: usize, methods: usize },
    UnknownClass,
}

/// Prompts on `out`, reads one class name from `input`, and lists its
/// public members on `out`.
///
/// An unknown name writes [`UNKNOWN_CLASS_MESSAGE`] to `err` and is not an
/// error. `q` gets no special treatment. End of input before a name and any
/// other registry failure are returned as errors.
pub fn run<R, I, O, E>(registry: &R, mut input: I, out: &mut O, err: &mut E) -> Result<Outcome>
where
    R: TypeRegistry + ?Sized,
    I: BufRead,
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    writeln!(out, "{PROMPT}")?;
    out.flush()?;

    let name = read_name(&mut input)?.ok_or(SessionError::NoInput)?;
    tracing::debug!("Looking up {:?}", name);

    let descriptor = match registry.resolve(&name) {
        Ok(descriptor) => descriptor,
        Err(e) if e.is_not_found() => {
            tracing::info!("{}", e);
            writeln!(err, "{UNKNOWN_CLASS_MESSAGE}")?;
            err.flush()?;
            return Ok(Outcome::UnknownClass);
        }
        Err(e) => return Err(e.into()),
    };

    inspector::inspect(&descriptor, out)?;
    out.flush()?;

    Ok(Outcome::Listed {
        fields: descriptor.fields.len(),
        methods: descriptor.methods.len(),
    })
}

/// Reads one line with only its terminator removed, or `None` at end of input.
fn read_name<I: BufRead>(input: &mut I) -> std::io::Result<Option<String>> {
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&line).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use memberscope_api::{
        ApiError, ApiResult, FieldDescriptor, MethodDescriptor, PrimitiveType, TypeDescriptor,
        TypeKind, TypeRef,
    };
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Registry over a fixed set of descriptors that records every lookup.
    #[derive(Default)]
    struct FakeRegistry {
        types: HashMap<String, TypeDescriptor>,
        broken: Option<String>,
        requests: RefCell<Vec<String>>,
    }

    impl FakeRegistry {
        fn with(mut self, descriptor: TypeDescriptor) -> Self {
            self.types.insert(descriptor.name.clone(), descriptor);
            self
        }
    }

    impl TypeRegistry for FakeRegistry {
        fn resolve(&self, name: &str) -> ApiResult<TypeDescriptor> {
            self.requests.borrow_mut().push(name.to_string());
            if self.broken.as_deref() == Some(name) {
                return Err(ApiError::malformed(name, "truncated"));
            }
            self.types
                .get(name)
                .cloned()
                .ok_or_else(|| ApiError::ClassNotFound(name.to_string()))
        }
    }

    fn point() -> TypeDescriptor {
        let mut descriptor = TypeDescriptor::new("geo.Point", TypeKind::Class);
        descriptor.fields = vec![
            FieldDescriptor {
                name: "y".to_string(),
                field_type: TypeRef::Primitive(PrimitiveType::Double),
                declaring_type: "geo.Point".to_string(),
                is_static: false,
            },
            FieldDescriptor {
                name: "ORIGIN".to_string(),
                field_type: TypeRef::class("geo.Point"),
                declaring_type: "geo.Point".to_string(),
                is_static: true,
            },
        ];
        descriptor.methods = vec![MethodDescriptor {
            name: "hashCode".to_string(),
            parameter_types: vec![],
            return_type: TypeRef::Primitive(PrimitiveType::Int),
            declaring_type: "java.lang.Object".to_string(),
            is_static: false,
        }];
        descriptor
    }

    fn session(registry: &FakeRegistry, input: &str) -> (Result<Outcome>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = run(registry, input.as_bytes(), &mut out, &mut err);
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_known_class_is_listed() {
        let registry = FakeRegistry::default().with(point());
        let (outcome, out, err) = session(&registry, "geo.Point\n");

        assert_eq!(
            outcome.unwrap(),
            Outcome::Listed {
                fields: 2,
                methods: 1
            }
        );
        assert_eq!(
            out,
            format!(
                "{PROMPT}\n\
                 S:ORIGIN : geo.Point - geo.Point\n\
                 y : double - geo.Point\n\
                 hashCode() : int - java.lang.Object\n"
            )
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_unknown_class_writes_only_the_error_line() {
        let registry = FakeRegistry::default().with(point());
        let (outcome, out, err) = session(&registry, "geo.Nowhere\n");

        assert_eq!(outcome.unwrap(), Outcome::UnknownClass);
        assert_eq!(out, format!("{PROMPT}\n"));
        assert_eq!(err, format!("{UNKNOWN_CLASS_MESSAGE}\n"));
    }

    #[test]
    fn test_q_is_looked_up_like_any_name() {
        let registry = FakeRegistry::default();
        let (outcome, _, err) = session(&registry, "q\n");

        assert_eq!(outcome.unwrap(), Outcome::UnknownClass);
        assert_eq!(err, format!("{UNKNOWN_CLASS_MESSAGE}\n"));
        assert_eq!(*registry.requests.borrow(), vec!["q".to_string()]);
    }

    #[test]
    fn test_only_the_line_terminator_is_stripped() {
        let registry = FakeRegistry::default().with(point());

        let (outcome, _, _) = session(&registry, "geo.Point\r\nignored\n");
        assert!(matches!(outcome.unwrap(), Outcome::Listed { .. }));

        let (outcome, _, _) = session(&registry, " geo.Point\n");
        assert_eq!(outcome.unwrap(), Outcome::UnknownClass);

        let (outcome, _, _) = session(&registry, "geo.Point");
        assert!(matches!(outcome.unwrap(), Outcome::Listed { .. }));

        assert_eq!(
            *registry.requests.borrow(),
            vec![
                "geo.Point".to_string(),
                " geo.Point".to_string(),
                "geo.Point".to_string()
            ]
        );
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let registry = FakeRegistry::default().with(point());
        let (outcome, out, err) = session(&registry, "");

        assert!(matches!(outcome, Err(SessionError::NoInput)));
        assert_eq!(out, format!("{PROMPT}\n"));
        assert!(err.is_empty());
        assert!(registry.requests.borrow().is_empty());
    }

    #[test]
    fn test_blank_line_is_an_empty_name() {
        let registry = FakeRegistry::default();
        let (outcome, _, err) = session(&registry, "\n");

        assert_eq!(outcome.unwrap(), Outcome::UnknownClass);
        assert_eq!(err, format!("{UNKNOWN_CLASS_MESSAGE}\n"));
        assert_eq!(*registry.requests.borrow(), vec![String::new()]);
    }

    #[test]
    fn test_other_registry_errors_are_fatal() {
        let registry = FakeRegistry {
            broken: Some("bad.Class".to_string()),
            ..Default::default()
        };
        let (outcome, out, err) = session(&registry, "bad.Class\n");

        assert!(matches!(
            outcome,
            Err(SessionError::Registry(ApiError::MalformedClass { .. }))
        ));
        assert_eq!(out, format!("{PROMPT}\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_repeated_sessions_are_identical() {
        let registry = FakeRegistry::default().with(point());
        let (_, first, _) = session(&registry, "geo.Point\n");
        let (_, second, _) = session(&registry, "geo.Point\n");
        assert_eq!(first, second);
    }
}
