use std::any::Any;

use crate::binding::PropertyStore;
use crate::error::ModelError;
use crate::object::{Component, ObjectRef};
use crate::types::{ContainerKind, ManagedProperty, PropertyInfo, TypeInfo};
use crate::value::{Value, ValueKind};

use super::view::BINDABLE_OBJECT;
use super::{no_such_plain, take_int, MODULE, NAMESPACE};

pub static PAGE_TITLE: ManagedProperty = ManagedProperty {
    name: "Title",
    owner: "Page",
    kind: ValueKind::Str,
};

pub static PAGE: TypeInfo = TypeInfo {
    module: MODULE,
    namespace: NAMESPACE,
    name: "Page",
    base: Some(&BINDABLE_OBJECT),
    managed: true,
    container: ContainerKind::None,
    properties: &[
        PropertyInfo::Managed(&PAGE_TITLE),
        PropertyInfo::Plain { name: "Padding", kind: ValueKind::Int },
    ],
    constructor: None,
};

pub static CONTENT_PAGE_CONTENT: ManagedProperty = ManagedProperty {
    name: "Content",
    owner: "ContentPage",
    kind: ValueKind::Object,
};

pub static CONTENT_PAGE: TypeInfo = TypeInfo {
    module: MODULE,
    namespace: NAMESPACE,
    name: "ContentPage",
    base: Some(&PAGE),
    managed: true,
    container: ContainerKind::None,
    properties: &[PropertyInfo::Managed(&CONTENT_PAGE_CONTENT)],
    constructor: Some(new_content_page),
};

fn new_content_page() -> ObjectRef {
    ObjectRef::new(ContentPage::default())
}

/// A page showing a single content view.
///
/// Application pages usually wrap one of these and forward [`Component`]
/// calls to it, reporting their own [`TypeInfo`].
#[derive(Debug, Default)]
pub struct ContentPage {
    store: PropertyStore,
    padding: i64,
}

impl ContentPage {
    pub fn title(&self) -> Option<&str> {
        self.store.get(&PAGE_TITLE).and_then(Value::as_str)
    }

    pub fn content(&self) -> Option<&ObjectRef> {
        self.store.get(&CONTENT_PAGE_CONTENT).and_then(Value::as_object)
    }

    pub fn padding(&self) -> i64 {
        self.padding
    }

    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.store
    }
}

impl Component for ContentPage {
    fn type_info(&self) -> &'static TypeInfo {
        &CONTENT_PAGE
    }

    fn properties(&self) -> Option<&PropertyStore> {
        Some(&self.store)
    }

    fn properties_mut(&mut self) -> Option<&mut PropertyStore> {
        Some(&mut self.store)
    }

    fn plain(&self, name: &str) -> Option<Value> {
        match name {
            "Padding" => Some(Value::Int(self.padding)),
            _ => None,
        }
    }

    fn set_plain(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        match name {
            "Padding" => {
                self.padding = take_int(&CONTENT_PAGE, "Padding", value)?;
                Ok(())
            }
            _ => Err(no_such_plain(&CONTENT_PAGE, name)),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
