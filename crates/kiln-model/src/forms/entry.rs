use std::any::Any;

use crate::binding::PropertyStore;
use crate::error::ModelError;
use crate::object::{Component, ObjectRef};
use crate::types::{ContainerKind, ManagedProperty, PropertyInfo, TypeInfo};
use crate::value::{Value, ValueKind};

use super::view::{ViewCore, VIEW};
use super::{MODULE, NAMESPACE};

pub static ENTRY_TEXT: ManagedProperty = ManagedProperty {
    name: "Text",
    owner: "Entry",
    kind: ValueKind::Str,
};

pub static ENTRY_PLACEHOLDER: ManagedProperty = ManagedProperty {
    name: "Placeholder",
    owner: "Entry",
    kind: ValueKind::Str,
};

pub static ENTRY_IS_PASSWORD: ManagedProperty = ManagedProperty {
    name: "IsPassword",
    owner: "Entry",
    kind: ValueKind::Bool,
};

pub static ENTRY: TypeInfo = TypeInfo {
    module: MODULE,
    namespace: NAMESPACE,
    name: "Entry",
    base: Some(&VIEW),
    managed: true,
    container: ContainerKind::None,
    properties: &[
        PropertyInfo::Managed(&ENTRY_TEXT),
        PropertyInfo::Managed(&ENTRY_PLACEHOLDER),
        PropertyInfo::Managed(&ENTRY_IS_PASSWORD),
    ],
    constructor: Some(new_entry),
};

fn new_entry() -> ObjectRef {
    ObjectRef::new(Entry::default())
}

/// Single-line editable text.
#[derive(Debug, Default)]
pub struct Entry {
    store: PropertyStore,
    view: ViewCore,
}

impl Entry {
    pub fn text(&self) -> Option<&str> {
        self.store.get(&ENTRY_TEXT).and_then(Value::as_str)
    }

    pub fn is_password(&self) -> bool {
        self.store.get(&ENTRY_IS_PASSWORD).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn view(&self) -> &ViewCore {
        &self.view
    }
}

impl Component for Entry {
    fn type_info(&self) -> &'static TypeInfo {
        &ENTRY
    }

    fn properties(&self) -> Option<&PropertyStore> {
        Some(&self.store)
    }

    fn properties_mut(&mut self) -> Option<&mut PropertyStore> {
        Some(&mut self.store)
    }

    fn plain(&self, name: &str) -> Option<Value> {
        self.view.plain(name)
    }

    fn set_plain(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        self.view.set_plain(&ENTRY, name, value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
