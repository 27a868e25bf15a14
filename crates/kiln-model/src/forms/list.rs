use std::any::Any;

use crate::binding::{BindingContext, PropertyStore};
use crate::error::ModelError;
use crate::object::{Component, ObjectRef};
use crate::types::{ContainerKind, ManagedProperty, PropertyInfo, TypeInfo};
use crate::value::{Value, ValueKind};

use super::view::{ViewCore, BINDABLE_OBJECT, VIEW};
use super::{MODULE, NAMESPACE};

// ── ListView ──────────────────────────────────────────────────────────────

pub static LIST_VIEW_ROW_HEIGHT: ManagedProperty = ManagedProperty {
    name: "RowHeight",
    owner: "ListView",
    kind: ValueKind::Int,
};

pub static LIST_VIEW_HEADER: ManagedProperty = ManagedProperty {
    name: "Header",
    owner: "ListView",
    kind: ValueKind::Str,
};

pub static LIST_VIEW_ITEMS_SOURCE: ManagedProperty = ManagedProperty {
    name: "ItemsSource",
    owner: "ListView",
    kind: ValueKind::List,
};

pub static LIST_VIEW: TypeInfo = TypeInfo {
    module: MODULE,
    namespace: NAMESPACE,
    name: "ListView",
    base: Some(&VIEW),
    managed: true,
    container: ContainerKind::None,
    properties: &[
        PropertyInfo::Managed(&LIST_VIEW_ROW_HEIGHT),
        PropertyInfo::Managed(&LIST_VIEW_HEADER),
        PropertyInfo::Managed(&LIST_VIEW_ITEMS_SOURCE),
        PropertyInfo::Plain { name: "ItemTemplate", kind: ValueKind::Object },
    ],
    constructor: Some(new_list_view),
};

fn new_list_view() -> ObjectRef {
    ObjectRef::new(ListView::default())
}

/// A scrolling list whose rows are stamped from `ItemTemplate`, one per
/// record of `ItemsSource`.
#[derive(Debug, Default)]
pub struct ListView {
    store: PropertyStore,
    view: ViewCore,
    item_template: Option<ObjectRef>,
    rows: Vec<ObjectRef>,
}

impl ListView {
    pub fn item_template(&self) -> Option<&ObjectRef> {
        self.item_template.as_ref()
    }

    /// Rows stamped at the last binding-context change. Each row carries
    /// its own record as context, so rows are not part of [`ObjectRef::nested`].
    pub fn rows(&self) -> &[ObjectRef] {
        &self.rows
    }

    pub fn items_source(&self) -> Option<&[BindingContext]> {
        self.store.get(&LIST_VIEW_ITEMS_SOURCE).and_then(Value::as_list)
    }

    /// Rebuild the rows: a fresh instance of the template's type per record,
    /// carrying the template's values and bindings, evaluated against that
    /// record.
    fn stamp_rows(&mut self) {
        self.rows.clear();
        let (Some(template), Some(items)) = (&self.item_template, self.items_source()) else {
            return;
        };
        let ty = template.type_info();
        let Some(store) = template.borrow().properties().cloned() else {
            log::warn!("ListView.ItemTemplate `{}` has no managed properties to stamp", ty.name);
            return;
        };
        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            let Some(row) = ty.construct() else {
                log::warn!("ListView.ItemTemplate `{}` cannot be constructed", ty.name);
                return;
            };
            if let Some(slot) = row.borrow_mut().properties_mut() {
                *slot = store.clone();
            }
            row.set_binding_context(item);
            rows.push(row);
        }
        log::debug!("ListView: stamped {} `{}` rows", rows.len(), ty.name);
        self.rows = rows;
    }

    pub fn row_height(&self) -> Option<i64> {
        self.store.get(&LIST_VIEW_ROW_HEIGHT).and_then(Value::as_int)
    }
}

impl Component for ListView {
    fn type_info(&self) -> &'static TypeInfo {
        &LIST_VIEW
    }

    fn properties(&self) -> Option<&PropertyStore> {
        Some(&self.store)
    }

    fn properties_mut(&mut self) -> Option<&mut PropertyStore> {
        Some(&mut self.store)
    }

    fn plain(&self, name: &str) -> Option<Value> {
        match name {
            "ItemTemplate" => self.item_template.clone().map(Value::Object),
            _ => self.view.plain(name),
        }
    }

    fn set_plain(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        match (name, value) {
            ("ItemTemplate", Value::Object(template)) => {
                self.item_template = Some(template);
                Ok(())
            }
            ("ItemTemplate", _) => Err(ModelError::ValueMismatch {
                type_name: LIST_VIEW.name,
                property: "ItemTemplate",
                expected: ValueKind::Object,
            }),
            (_, value) => self.view.set_plain(&LIST_VIEW, name, value),
        }
    }

    fn binding_context_changed(&mut self, _context: &BindingContext) {
        self.stamp_rows();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ── Cells ─────────────────────────────────────────────────────────────────

pub static CELL: TypeInfo = TypeInfo {
    module: MODULE,
    namespace: NAMESPACE,
    name: "Cell",
    base: Some(&BINDABLE_OBJECT),
    managed: true,
    container: ContainerKind::None,
    properties: &[],
    constructor: None,
};

pub static TEXT_CELL_TEXT: ManagedProperty = ManagedProperty {
    name: "Text",
    owner: "TextCell",
    kind: ValueKind::Str,
};

pub static TEXT_CELL_DETAIL: ManagedProperty = ManagedProperty {
    name: "Detail",
    owner: "TextCell",
    kind: ValueKind::Str,
};

pub static TEXT_CELL: TypeInfo = TypeInfo {
    module: MODULE,
    namespace: NAMESPACE,
    name: "TextCell",
    base: Some(&CELL),
    managed: true,
    container: ContainerKind::None,
    properties: &[
        PropertyInfo::Managed(&TEXT_CELL_TEXT),
        PropertyInfo::Managed(&TEXT_CELL_DETAIL),
    ],
    constructor: Some(new_text_cell),
};

fn new_text_cell() -> ObjectRef {
    ObjectRef::new(TextCell::default())
}

/// A list row with a primary and a detail line.
#[derive(Debug, Default)]
pub struct TextCell {
    store: PropertyStore,
}

impl Component for TextCell {
    fn type_info(&self) -> &'static TypeInfo {
        &TEXT_CELL
    }

    fn properties(&self) -> Option<&PropertyStore> {
        Some(&self.store)
    }

    fn properties_mut(&mut self) -> Option<&mut PropertyStore> {
        Some(&mut self.store)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Binding;

    fn record(title: &str) -> BindingContext {
        BindingContext::new().with("Title", title)
    }

    fn bound_list() -> (ObjectRef, ObjectRef) {
        let template = TEXT_CELL.construct().unwrap();
        template.with_mut(|c: &mut TextCell| {
            c.store.set_value(&TEXT_CELL_DETAIL, Value::from("row"));
            c.store.set_binding(&TEXT_CELL_TEXT, Binding::new("Title"));
        });
        let list = LIST_VIEW.construct().unwrap();
        list.with_mut(|l: &mut ListView| {
            l.item_template = Some(template.clone());
            l.store.set_binding(&LIST_VIEW_ITEMS_SOURCE, Binding::new("Items"));
        });
        (list, template)
    }

    #[test]
    fn rows_are_stamped_per_record() {
        let (list, template) = bound_list();
        list.set_binding_context(
            &BindingContext::new().with("Items", vec![record("Monkey"), record("Boss")]),
        );

        let rows = list.with(|l: &ListView| l.rows().to_vec()).unwrap();
        let texts: Vec<Option<Value>> = rows.iter().map(|r| r.get("Text")).collect();
        assert_eq!(texts, [Some(Value::from("Monkey")), Some(Value::from("Boss"))]);
        assert!(rows.iter().all(|r| r.get("Detail") == Some(Value::from("row"))));
        assert!(rows.iter().all(|r| !r.ptr_eq(&template)));
        assert_eq!(template.get("Text"), None);
    }

    #[test]
    fn no_items_no_rows() {
        let (list, _) = bound_list();
        list.set_binding_context(&BindingContext::new().with("Items", "not a list"));
        assert_eq!(list.with(|l: &ListView| l.rows().len()), Some(0));
        assert_eq!(list.get("ItemsSource"), None);
    }
}
