use std::collections::HashMap;

use indexmap::IndexMap;
use kiln_model::{ObjectId, ObjectRef, TypeRegistry};

use crate::error::HydrateError;
use crate::resolver::TypeResolver;

// ── ResourceTable ─────────────────────────────────────────────────────────

/// Resources visible to binding expressions in the current pass, in the
/// order they were declared.
#[derive(Debug, Default)]
pub struct ResourceTable {
    entries: IndexMap<String, ObjectRef>,
}

impl ResourceTable {
    pub fn get(&self, key: &str) -> Option<&ObjectRef> {
        self.entries.get(key)
    }

    /// Later declarations shadow earlier ones with the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: ObjectRef) {
        let key = key.into();
        if self.entries.insert(key.clone(), value).is_some() {
            log::debug!("resource `{key}` redeclared");
        }
    }

    /// Copy every entry of a keyed container into the table.
    pub fn merge(&mut self, dictionary: &ObjectRef) -> Result<(), HydrateError> {
        let guard = dictionary.borrow();
        let entries = guard.entries().ok_or_else(|| {
            HydrateError::structure(format!(
                "`{}` is not a keyed container and cannot supply resources",
                guard.type_info().name
            ))
        })?;
        for (key, value) in entries {
            self.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── KeyTable ──────────────────────────────────────────────────────────────

/// `x:Key` values seen on elements, waiting for a keyed container to
/// consume them. Holding the object keeps its identity stable.
#[derive(Debug, Default)]
pub struct KeyTable {
    keys: HashMap<ObjectId, (ObjectRef, String)>,
}

impl KeyTable {
    pub fn declare(&mut self, object: &ObjectRef, key: impl Into<String>) {
        self.keys.insert(object.id(), (object.clone(), key.into()));
    }

    /// Remove and return the key declared on `object`.
    pub fn take(&mut self, object: &ObjectRef) -> Option<String> {
        self.keys.remove(&object.id()).map(|(_, key)| key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// ── HydrationContext ──────────────────────────────────────────────────────

/// State threaded through one hydration pass. Dropped when the pass ends.
pub struct HydrationContext<'r> {
    pub resolver: TypeResolver<'r>,
    pub resources: ResourceTable,
    pub keys: KeyTable,
}

impl<'r> HydrationContext<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            resolver: TypeResolver::new(registry),
            resources: ResourceTable::default(),
            keys: KeyTable::default(),
        }
    }

    pub fn local_module(mut self, module: &'r str) -> Self {
        self.resolver = self.resolver.local_module(module);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_model::forms::{ResourceDictionary, LABEL, RESOURCE_DICTIONARY};

    #[test]
    fn keys_are_taken_once() {
        let mut keys = KeyTable::default();
        let a = LABEL.construct().unwrap();
        let b = LABEL.construct().unwrap();
        keys.declare(&a, "first");
        assert_eq!(keys.take(&b), None);
        assert_eq!(keys.take(&a).as_deref(), Some("first"));
        assert_eq!(keys.take(&a), None);
        assert!(keys.is_empty());
    }

    #[test]
    fn merge_copies_dictionary_entries() {
        let dict = RESOURCE_DICTIONARY.construct().unwrap();
        let label = LABEL.construct().unwrap();
        dict.with_mut(|d: &mut ResourceDictionary| d.insert("title", label.clone()));

        let mut table = ResourceTable::default();
        table.merge(&dict).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("title"), Some(&label));
    }

    #[test]
    fn merge_rejects_non_dictionaries() {
        let mut table = ResourceTable::default();
        let label = LABEL.construct().unwrap();
        assert!(matches!(table.merge(&label), Err(HydrateError::Structure(_))));
        assert!(table.is_empty());
    }
}
