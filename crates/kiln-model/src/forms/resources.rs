use std::any::Any;

use indexmap::IndexMap;

use crate::object::{Component, ObjectRef};
use crate::types::{ContainerKind, TypeInfo};

use super::{MODULE, NAMESPACE};

pub static RESOURCE_DICTIONARY: TypeInfo = TypeInfo {
    module: MODULE,
    namespace: NAMESPACE,
    name: "ResourceDictionary",
    base: None,
    managed: false,
    container: ContainerKind::Keyed,
    properties: &[],
    constructor: Some(new_resource_dictionary),
};

fn new_resource_dictionary() -> ObjectRef {
    ObjectRef::new(ResourceDictionary::default())
}

/// Named objects shared across a document (converters, styles, ...).
#[derive(Debug, Default)]
pub struct ResourceDictionary {
    entries: IndexMap<String, ObjectRef>,
}

impl ResourceDictionary {
    pub fn get(&self, key: &str) -> Option<&ObjectRef> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ObjectRef) -> Option<ObjectRef> {
        self.entries.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Component for ResourceDictionary {
    fn type_info(&self) -> &'static TypeInfo {
        &RESOURCE_DICTIONARY
    }

    fn entries(&self) -> Option<&IndexMap<String, ObjectRef>> {
        Some(&self.entries)
    }

    fn entries_mut(&mut self) -> Option<&mut IndexMap<String, ObjectRef>> {
        Some(&mut self.entries)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
