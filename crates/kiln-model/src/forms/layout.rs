use std::any::Any;

use crate::binding::PropertyStore;
use crate::error::ModelError;
use crate::object::{Component, ObjectRef};
use crate::types::{ContainerKind, ManagedProperty, PropertyInfo, TypeInfo};
use crate::value::{EnumInfo, Value, ValueKind};

use super::view::{ViewCore, VIEW};
use super::{take_enum, MODULE, NAMESPACE};

pub static STACK_ORIENTATION: EnumInfo = EnumInfo {
    name: "StackOrientation",
    members: &["Vertical", "Horizontal"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackOrientation {
    #[default]
    Vertical,
    Horizontal,
}

impl StackOrientation {
    pub fn member(self) -> &'static str {
        match self {
            StackOrientation::Vertical => "Vertical",
            StackOrientation::Horizontal => "Horizontal",
        }
    }

    pub fn from_member(s: &str) -> Option<Self> {
        match s {
            "Vertical" => Some(StackOrientation::Vertical),
            "Horizontal" => Some(StackOrientation::Horizontal),
            _ => None,
        }
    }
}

pub static STACK_LAYOUT_SPACING: ManagedProperty = ManagedProperty {
    name: "Spacing",
    owner: "StackLayout",
    kind: ValueKind::Float,
};

pub static STACK_LAYOUT: TypeInfo = TypeInfo {
    module: MODULE,
    namespace: NAMESPACE,
    name: "StackLayout",
    base: Some(&VIEW),
    managed: true,
    container: ContainerKind::Items,
    properties: &[
        PropertyInfo::Managed(&STACK_LAYOUT_SPACING),
        PropertyInfo::Plain { name: "Orientation", kind: ValueKind::Enum(&STACK_ORIENTATION) },
    ],
    constructor: Some(new_stack_layout),
};

fn new_stack_layout() -> ObjectRef {
    ObjectRef::new(StackLayout::default())
}

/// Lays its children out in a single line, in insertion order.
#[derive(Debug, Default)]
pub struct StackLayout {
    store: PropertyStore,
    view: ViewCore,
    orientation: StackOrientation,
    children: Vec<ObjectRef>,
}

impl StackLayout {
    pub fn push(&mut self, child: ObjectRef) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[ObjectRef] {
        &self.children
    }

    pub fn orientation(&self) -> StackOrientation {
        self.orientation
    }

    pub fn view(&self) -> &ViewCore {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewCore {
        &mut self.view
    }
}

impl Component for StackLayout {
    fn type_info(&self) -> &'static TypeInfo {
        &STACK_LAYOUT
    }

    fn properties(&self) -> Option<&PropertyStore> {
        Some(&self.store)
    }

    fn properties_mut(&mut self) -> Option<&mut PropertyStore> {
        Some(&mut self.store)
    }

    fn plain(&self, name: &str) -> Option<Value> {
        match name {
            "Orientation" => Some(Value::Enum(self.orientation.member())),
            _ => self.view.plain(name),
        }
    }

    fn set_plain(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        match name {
            "Orientation" => {
                self.orientation = take_enum(
                    &STACK_LAYOUT,
                    "Orientation",
                    &STACK_ORIENTATION,
                    value,
                    StackOrientation::from_member,
                )?;
                Ok(())
            }
            _ => self.view.set_plain(&STACK_LAYOUT, name, value),
        }
    }

    fn items(&self) -> Option<&[ObjectRef]> {
        Some(&self.children)
    }

    fn items_mut(&mut self) -> Option<&mut Vec<ObjectRef>> {
        Some(&mut self.children)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
