//! Built-in framework types.
//!
//! Everything here lives in module [`MODULE`] under namespace [`NAMESPACE`],
//! which is what unprefixed markup elements resolve against.
//!
//! | Type | Kind | Properties |
//! |------|------|------------|
//! | `BindableObject` | abstract | |
//! | `View` | abstract | `IsVisible`, `Opacity` (managed); `Id`, `HorizontalOptions` (plain) |
//! | `Label` | view | `Text`, `FontSize` (managed); `XAlign` (plain) |
//! | `Entry` | view | `Text`, `Placeholder`, `IsPassword` (managed) |
//! | `StackLayout` | items container | `Spacing` (managed); `Orientation` (plain) |
//! | `Page` | abstract | `Title` (managed); `Padding` (plain) |
//! | `ContentPage` | page | `Content` (managed) |
//! | `ListView` | view | `RowHeight`, `Header` (managed); `ItemTemplate` (plain) |
//! | `Cell` | abstract | |
//! | `TextCell` | cell | `Text`, `Detail` (managed) |
//! | `ResourceDictionary` | keyed container | |

mod entry;
mod label;
mod layout;
mod list;
mod page;
mod resources;
mod view;

pub use entry::{Entry, ENTRY, ENTRY_IS_PASSWORD, ENTRY_PLACEHOLDER, ENTRY_TEXT};
pub use label::{Label, TextAlignment, LABEL, LABEL_FONT_SIZE, LABEL_TEXT, TEXT_ALIGNMENT};
pub use layout::{StackLayout, StackOrientation, STACK_LAYOUT, STACK_LAYOUT_SPACING, STACK_ORIENTATION};
pub use list::{ListView, TextCell, CELL, LIST_VIEW, LIST_VIEW_HEADER, LIST_VIEW_ITEMS_SOURCE, LIST_VIEW_ROW_HEIGHT, TEXT_CELL, TEXT_CELL_DETAIL, TEXT_CELL_TEXT};
pub use page::{ContentPage, CONTENT_PAGE, CONTENT_PAGE_CONTENT, PAGE, PAGE_TITLE};
pub use resources::{ResourceDictionary, RESOURCE_DICTIONARY};
pub use view::{LayoutOptions, ViewCore, BINDABLE_OBJECT, LAYOUT_OPTIONS, VIEW, VIEW_IS_VISIBLE, VIEW_OPACITY};

use crate::error::ModelError;
use crate::registry::Module;
use crate::types::TypeInfo;
use crate::value::{Value, ValueKind};

pub const MODULE: &str = "Kiln.Forms";
pub const NAMESPACE: &str = "Kiln.Forms";

/// The framework module, ready for [`TypeRegistry::register`](crate::TypeRegistry::register).
pub fn module() -> Module {
    Module::new(MODULE)
        .with_type(&BINDABLE_OBJECT)
        .with_type(&VIEW)
        .with_type(&LABEL)
        .with_type(&ENTRY)
        .with_type(&STACK_LAYOUT)
        .with_type(&PAGE)
        .with_type(&CONTENT_PAGE)
        .with_type(&LIST_VIEW)
        .with_type(&CELL)
        .with_type(&TEXT_CELL)
        .with_type(&RESOURCE_DICTIONARY)
}

// ── Plain setter helpers ──────────────────────────────────────────────────

fn mismatch(owner: &'static TypeInfo, property: &'static str, expected: ValueKind) -> ModelError {
    ModelError::ValueMismatch { type_name: owner.name, property, expected }
}

pub(crate) fn no_such_plain(owner: &'static TypeInfo, name: &str) -> ModelError {
    ModelError::NoPlainProperty { type_name: owner.name, property: name.to_string() }
}

pub(crate) fn take_str(owner: &'static TypeInfo, property: &'static str, value: Value) -> Result<String, ModelError> {
    match value {
        Value::Str(s) => Ok(s),
        _ => Err(mismatch(owner, property, ValueKind::Str)),
    }
}

pub(crate) fn take_int(owner: &'static TypeInfo, property: &'static str, value: Value) -> Result<i64, ModelError> {
    value.as_int().ok_or_else(|| mismatch(owner, property, ValueKind::Int))
}

/// Map an enum member onto the Rust enum that mirrors `info`.
pub(crate) fn take_enum<T>(
    owner: &'static TypeInfo,
    property: &'static str,
    info: &'static crate::value::EnumInfo,
    value: Value,
    from_member: fn(&str) -> Option<T>,
) -> Result<T, ModelError> {
    value
        .as_enum()
        .and_then(from_member)
        .ok_or_else(|| mismatch(owner, property, ValueKind::Enum(info)))
}
