use crate::error::ModelError;
use crate::types::{ContainerKind, ManagedProperty, PropertyInfo, TypeInfo};
use crate::value::{EnumInfo, Value, ValueKind};

use super::{no_such_plain, take_enum, take_str, MODULE, NAMESPACE};

// ── BindableObject ────────────────────────────────────────────────────────

/// Root of the managed-property hierarchy.
pub static BINDABLE_OBJECT: TypeInfo = TypeInfo {
    module: MODULE,
    namespace: NAMESPACE,
    name: "BindableObject",
    base: None,
    managed: true,
    container: ContainerKind::None,
    properties: &[],
    constructor: None,
};

// ── LayoutOptions ─────────────────────────────────────────────────────────

pub static LAYOUT_OPTIONS: EnumInfo = EnumInfo {
    name: "LayoutOptions",
    members: &["Start", "Center", "End", "Fill"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutOptions {
    Start,
    Center,
    End,
    #[default]
    Fill,
}

impl LayoutOptions {
    pub fn member(self) -> &'static str {
        match self {
            LayoutOptions::Start => "Start",
            LayoutOptions::Center => "Center",
            LayoutOptions::End => "End",
            LayoutOptions::Fill => "Fill",
        }
    }

    pub fn from_member(s: &str) -> Option<Self> {
        match s {
            "Start" => Some(LayoutOptions::Start),
            "Center" => Some(LayoutOptions::Center),
            "End" => Some(LayoutOptions::End),
            "Fill" => Some(LayoutOptions::Fill),
            _ => None,
        }
    }
}

// ── View ──────────────────────────────────────────────────────────────────

pub static VIEW_IS_VISIBLE: ManagedProperty = ManagedProperty {
    name: "IsVisible",
    owner: "View",
    kind: ValueKind::Bool,
};

pub static VIEW_OPACITY: ManagedProperty = ManagedProperty {
    name: "Opacity",
    owner: "View",
    kind: ValueKind::Float,
};

pub static VIEW: TypeInfo = TypeInfo {
    module: MODULE,
    namespace: NAMESPACE,
    name: "View",
    base: Some(&BINDABLE_OBJECT),
    managed: true,
    container: ContainerKind::None,
    properties: &[
        PropertyInfo::Managed(&VIEW_IS_VISIBLE),
        PropertyInfo::Managed(&VIEW_OPACITY),
        PropertyInfo::Plain { name: "Id", kind: ValueKind::Str },
        PropertyInfo::Plain { name: "HorizontalOptions", kind: ValueKind::Enum(&LAYOUT_OPTIONS) },
    ],
    constructor: None,
};

/// Plain state shared by every view. Concrete views embed one and forward
/// the names they don't own to it.
#[derive(Debug, Clone, Default)]
pub struct ViewCore {
    pub id: Option<String>,
    pub horizontal_options: LayoutOptions,
}

impl ViewCore {
    pub fn plain(&self, name: &str) -> Option<Value> {
        match name {
            "Id" => self.id.clone().map(Value::Str),
            "HorizontalOptions" => Some(Value::Enum(self.horizontal_options.member())),
            _ => None,
        }
    }

    pub fn set_plain(&mut self, owner: &'static TypeInfo, name: &str, value: Value) -> Result<(), ModelError> {
        match name {
            "Id" => self.id = Some(take_str(owner, "Id", value)?),
            "HorizontalOptions" => {
                self.horizontal_options = take_enum(
                    owner,
                    "HorizontalOptions",
                    &LAYOUT_OPTIONS,
                    value,
                    LayoutOptions::from_member,
                )?
            }
            _ => return Err(no_such_plain(owner, name)),
        }
        Ok(())
    }
}
