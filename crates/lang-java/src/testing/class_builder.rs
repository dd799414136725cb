//! Class-file fixtures for tests, serialized with `ristretto_classfile`.

#![allow(dead_code)]

use ristretto_classfile::attributes::Attribute;
use ristretto_classfile::{
    ClassAccessFlags, ClassFile, ConstantPool, Field, FieldAccessFlags, FieldType, JAVA_17,
    Method, MethodAccessFlags,
};

struct Member {
    access: u16,
    name: String,
    descriptor: String,
    attributes: Vec<(String, Vec<u8>)>,
}

pub struct ClassFileBuilder {
    access: u16,
    name: String,
    super_class: Option<String>,
    interfaces: Vec<String>,
    fields: Vec<Member>,
    methods: Vec<Member>,
}

impl ClassFileBuilder {
    /// A public class extending `java/lang/Object`.
    pub fn class(internal_name: &str) -> Self {
        Self {
            access: 0x0021,
            name: internal_name.to_string(),
            super_class: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// A public interface; the class file still names `java/lang/Object` as super.
    pub fn interface(internal_name: &str) -> Self {
        let mut builder = Self::class(internal_name);
        builder.access = 0x0601;
        builder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn access(mut self, access: u16) -> Self {
        self.access = access;
        self
    }

    pub fn extends(mut self, internal_name: &str) -> Self {
        self.super_class = Some(internal_name.to_string());
        self
    }

    pub fn no_superclass(mut self) -> Self {
        self.super_class = None;
        self
    }

    pub fn implements(mut self, internal_name: &str) -> Self {
        self.interfaces.push(internal_name.to_string());
        self
    }

    pub fn field(mut self, access: u16, name: &str, descriptor: &str) -> Self {
        self.fields.push(Member {
            access,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            attributes: Vec::new(),
        });
        self
    }

    pub fn method(mut self, access: u16, name: &str, descriptor: &str) -> Self {
        self.methods.push(Member {
            access,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            attributes: Vec::new(),
        });
        self
    }

    /// A method carrying one attribute the reader does not interpret.
    pub fn method_with_attribute(
        mut self,
        access: u16,
        name: &str,
        descriptor: &str,
        attribute: &str,
        body: &[u8],
    ) -> Self {
        self.methods.push(Member {
            access,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            attributes: vec![(attribute.to_string(), body.to_vec())],
        });
        self
    }

    fn attributes(pool: &mut ConstantPool, member: &Member) -> Vec<Attribute> {
        member
            .attributes
            .iter()
            .map(|(name, info)| Attribute::Unknown {
                name_index: pool.add_utf8(name).unwrap(),
                info: info.clone(),
            })
            .collect()
    }

    pub fn build(&self) -> Vec<u8> {
        let mut pool = ConstantPool::new();
        let this_class = pool.add_class(&self.name).unwrap();
        let super_class = match &self.super_class {
            Some(name) => pool.add_class(name).unwrap(),
            None => 0,
        };
        let interfaces = self
            .interfaces
            .iter()
            .map(|name| pool.add_class(name).unwrap())
            .collect();

        let mut fields = Vec::new();
        for member in &self.fields {
            fields.push(Field {
                access_flags: FieldAccessFlags::from_bits_truncate(member.access),
                name_index: pool.add_utf8(&member.name).unwrap(),
                descriptor_index: pool.add_utf8(&member.descriptor).unwrap(),
                field_type: FieldType::parse(&member.descriptor).unwrap(),
                attributes: Self::attributes(&mut pool, member),
            });
        }

        let mut methods = Vec::new();
        for member in &self.methods {
            methods.push(Method {
                access_flags: MethodAccessFlags::from_bits_truncate(member.access),
                name_index: pool.add_utf8(&member.name).unwrap(),
                descriptor_index: pool.add_utf8(&member.descriptor).unwrap(),
                attributes: Self::attributes(&mut pool, member),
            });
        }

        let class_file = ClassFile {
            version: JAVA_17,
            constant_pool: pool,
            access_flags: ClassAccessFlags::from_bits_truncate(self.access),
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            ..Default::default()
        };

        let mut bytes = Vec::new();
        class_file.to_bytes(&mut bytes).unwrap();
        bytes
    }
}
