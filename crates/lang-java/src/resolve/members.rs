//! Public member collection across a class hierarchy.
//!
//! Fields: declared, then each superinterface's, then the superclass's.
//! Methods: declared, then the superclass's, then each superinterface's
//! non-static ones, merged so that overridden and re-abstracted methods
//! appear once.

use super::loader::{ClassLoader, LoadedClass};
use indexmap::IndexMap;
use memberscope_api::{ApiError, ApiResult, FieldDescriptor, MethodDescriptor, TypeRef};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

#[derive(Debug, Clone)]
struct MethodEntry {
    descriptor: MethodDescriptor,
    declaring_internal: String,
    declaring_is_interface: bool,
}

type MethodKey = (String, Vec<TypeRef>);

pub struct MemberCollector<'l, 'a> {
    loader: &'l mut ClassLoader<'a>,
    ancestors: HashMap<String, Rc<HashSet<String>>>,
    visiting: HashSet<String>,
    fields: HashMap<String, Rc<Vec<FieldDescriptor>>>,
    methods: HashMap<String, Rc<Vec<MethodEntry>>>,
}

impl<'l, 'a> MemberCollector<'l, 'a> {
    pub fn new(loader: &'l mut ClassLoader<'a>) -> Self {
        Self {
            loader,
            ancestors: HashMap::new(),
            visiting: HashSet::new(),
            fields: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Loads the whole supertype closure of `class`.
    ///
    /// Must succeed for a class before its members are collected: it is
    /// where missing supertypes and circular hierarchies are reported.
    pub fn ancestors(&mut self, class: &LoadedClass) -> ApiResult<Rc<HashSet<String>>> {
        if let Some(set) = self.ancestors.get(&class.internal_name) {
            return Ok(set.clone());
        }
        if !self.visiting.insert(class.internal_name.clone()) {
            return Err(ApiError::CircularHierarchy(class.binary_name.clone()));
        }

        let mut set = HashSet::from([class.internal_name.clone()]);
        for supertype in class.direct_supertypes() {
            let parent = self.loader.require_supertype(class, supertype)?;
            set.extend(self.ancestors(&parent)?.iter().cloned());
        }

        self.visiting.remove(&class.internal_name);
        let set = Rc::new(set);
        self.ancestors
            .insert(class.internal_name.clone(), set.clone());
        Ok(set)
    }

    /// Whether `sub` is `sup` or one of its subtypes.
    fn is_assignable(&mut self, sup: &str, sub: &str) -> ApiResult<bool> {
        if sup == sub {
            return Ok(true);
        }
        let sub_class = self
            .loader
            .load(sub)?
            .ok_or_else(|| ApiError::ClassNotFound(sub.to_string()))?;
        Ok(self.ancestors(&sub_class)?.contains(sup))
    }

    pub fn public_fields(&mut self, class: &LoadedClass) -> ApiResult<Vec<FieldDescriptor>> {
        Ok(self.public_fields_of(class)?.as_ref().clone())
    }

    fn public_fields_of(&mut self, class: &LoadedClass) -> ApiResult<Rc<Vec<FieldDescriptor>>> {
        if let Some(fields) = self.fields.get(&class.internal_name) {
            return Ok(fields.clone());
        }

        // keyed by (declaring type, name): an interface reached twice contributes once
        let mut fields: IndexMap<(String, String), FieldDescriptor> = IndexMap::new();
        let mut add = |field: &FieldDescriptor| {
            fields
                .entry((field.declaring_type.clone(), field.name.clone()))
                .or_insert_with(|| field.clone());
        };

        for field in &class.fields {
            add(field);
        }
        for interface in &class.interfaces {
            let interface = self.loader.require_supertype(class, interface)?;
            for field in self.public_fields_of(&interface)?.iter() {
                add(field);
            }
        }
        if !class.is_interface() {
            if let Some(super_class) = &class.super_class {
                let super_class = self.loader.require_supertype(class, super_class)?;
                for field in self.public_fields_of(&super_class)?.iter() {
                    add(field);
                }
            }
        }

        let fields = Rc::new(fields.into_values().collect::<Vec<_>>());
        self.fields
            .insert(class.internal_name.clone(), fields.clone());
        Ok(fields)
    }

    pub fn public_methods(&mut self, class: &LoadedClass) -> ApiResult<Vec<MethodDescriptor>> {
        Ok(self
            .public_methods_of(class)?
            .iter()
            .map(|entry| entry.descriptor.clone())
            .collect())
    }

    fn public_methods_of(&mut self, class: &LoadedClass) -> ApiResult<Rc<Vec<MethodEntry>>> {
        if let Some(methods) = self.methods.get(&class.internal_name) {
            return Ok(methods.clone());
        }

        let mut merged: IndexMap<MethodKey, Vec<MethodEntry>> = IndexMap::new();

        for method in &class.methods {
            let entry = MethodEntry {
                descriptor: method.clone(),
                declaring_internal: class.internal_name.clone(),
                declaring_is_interface: class.is_interface(),
            };
            self.merge(&mut merged, entry)?;
        }

        // interfaces do not inherit from Object
        if !class.is_interface() {
            if let Some(super_class) = &class.super_class {
                let super_class = self.loader.require_supertype(class, super_class)?;
                for entry in self.public_methods_of(&super_class)?.iter() {
                    self.merge(&mut merged, entry.clone())?;
                }
            }
        }

        for interface in &class.interfaces {
            let interface = self.loader.require_supertype(class, interface)?;
            for entry in self.public_methods_of(&interface)?.iter() {
                // static interface methods are not inherited
                if !entry.descriptor.is_static {
                    self.merge(&mut merged, entry.clone())?;
                }
            }
        }

        let methods = Rc::new(merged.into_values().flatten().collect::<Vec<_>>());
        self.methods
            .insert(class.internal_name.clone(), methods.clone());
        Ok(methods)
    }

    /// Adds `entry` unless a more specific method with the same name,
    /// parameters and return type is already present; drops any it
    /// supersedes. Class methods always beat interface methods.
    fn merge(
        &mut self,
        merged: &mut IndexMap<MethodKey, Vec<MethodEntry>>,
        entry: MethodEntry,
    ) -> ApiResult<()> {
        let key = (
            entry.descriptor.name.clone(),
            entry.descriptor.parameter_types.clone(),
        );
        let existing = merged.entry(key).or_default();

        let mut i = 0;
        while i < existing.len() {
            let current = &existing[i];
            if current.descriptor.return_type != entry.descriptor.return_type {
                i += 1;
                continue;
            }

            if current.declaring_is_interface == entry.declaring_is_interface {
                let current_type = current.declaring_internal.clone();
                if self.is_assignable(&entry.declaring_internal, &current_type)? {
                    return Ok(());
                }
                if self.is_assignable(&current_type, &entry.declaring_internal)? {
                    existing.remove(i);
                    continue;
                }
            } else if entry.declaring_is_interface {
                return Ok(());
            } else {
                existing.remove(i);
                continue;
            }
            i += 1;
        }

        existing.push(entry);
        Ok(())
    }
}
