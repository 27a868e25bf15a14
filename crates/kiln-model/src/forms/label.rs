use std::any::Any;

use crate::binding::PropertyStore;
use crate::error::ModelError;
use crate::object::{Component, ObjectRef};
use crate::types::{ContainerKind, ManagedProperty, PropertyInfo, TypeInfo};
use crate::value::{EnumInfo, Value, ValueKind};

use super::view::{ViewCore, VIEW};
use super::{take_enum, MODULE, NAMESPACE};

pub static TEXT_ALIGNMENT: EnumInfo = EnumInfo {
    name: "TextAlignment",
    members: &["Start", "Center", "End"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Start,
    Center,
    End,
}

impl TextAlignment {
    pub fn member(self) -> &'static str {
        match self {
            TextAlignment::Start => "Start",
            TextAlignment::Center => "Center",
            TextAlignment::End => "End",
        }
    }

    pub fn from_member(s: &str) -> Option<Self> {
        match s {
            "Start" => Some(TextAlignment::Start),
            "Center" => Some(TextAlignment::Center),
            "End" => Some(TextAlignment::End),
            _ => None,
        }
    }
}

pub static LABEL_TEXT: ManagedProperty = ManagedProperty {
    name: "Text",
    owner: "Label",
    kind: ValueKind::Str,
};

pub static LABEL_FONT_SIZE: ManagedProperty = ManagedProperty {
    name: "FontSize",
    owner: "Label",
    kind: ValueKind::Float,
};

pub static LABEL: TypeInfo = TypeInfo {
    module: MODULE,
    namespace: NAMESPACE,
    name: "Label",
    base: Some(&VIEW),
    managed: true,
    container: ContainerKind::None,
    properties: &[
        PropertyInfo::Managed(&LABEL_TEXT),
        PropertyInfo::Managed(&LABEL_FONT_SIZE),
        PropertyInfo::Plain { name: "XAlign", kind: ValueKind::Enum(&TEXT_ALIGNMENT) },
    ],
    constructor: Some(new_label),
};

fn new_label() -> ObjectRef {
    ObjectRef::new(Label::default())
}

/// A run of read-only text.
#[derive(Debug, Default)]
pub struct Label {
    store: PropertyStore,
    view: ViewCore,
    x_align: TextAlignment,
}

impl Label {
    pub fn text(&self) -> Option<&str> {
        self.store.get(&LABEL_TEXT).and_then(Value::as_str)
    }

    pub fn font_size(&self) -> Option<f64> {
        self.store.get(&LABEL_FONT_SIZE).and_then(Value::as_float)
    }

    pub fn x_align(&self) -> TextAlignment {
        self.x_align
    }

    pub fn view(&self) -> &ViewCore {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewCore {
        &mut self.view
    }

    pub fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.store
    }
}

impl Component for Label {
    fn type_info(&self) -> &'static TypeInfo {
        &LABEL
    }

    fn properties(&self) -> Option<&PropertyStore> {
        Some(&self.store)
    }

    fn properties_mut(&mut self) -> Option<&mut PropertyStore> {
        Some(&mut self.store)
    }

    fn plain(&self, name: &str) -> Option<Value> {
        match name {
            "XAlign" => Some(Value::Enum(self.x_align.member())),
            _ => self.view.plain(name),
        }
    }

    fn set_plain(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        match name {
            "XAlign" => {
                self.x_align = take_enum(&LABEL, "XAlign", &TEXT_ALIGNMENT, value, TextAlignment::from_member)?;
                Ok(())
            }
            _ => self.view.set_plain(&LABEL, name, value),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
