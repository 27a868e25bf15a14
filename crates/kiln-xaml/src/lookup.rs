use std::collections::VecDeque;

use kiln_model::{Component, Handle, ObjectRef, Value};

use crate::error::HydrateError;

/// Breadth-first search below `root` for the first object whose `Id` is
/// `id`. The root itself is never a candidate.
pub fn find_by_id(root: &ObjectRef, id: &str) -> Option<ObjectRef> {
    let mut queue: VecDeque<ObjectRef> = root.nested().into();
    while let Some(object) = queue.pop_front() {
        if matches!(object.get("Id"), Some(Value::Str(ref s)) if s == id) {
            return Some(object);
        }
        queue.extend(object.nested());
    }
    None
}

/// [`find_by_id`], checked against the concrete type `T`.
pub fn find_by_id_as<T: Component>(root: &ObjectRef, id: &str) -> Result<Handle<T>, HydrateError> {
    let object = find_by_id(root, id)
        .ok_or_else(|| HydrateError::NotFound(format!("no element with Id `{id}`")))?;
    let found = object.type_info().name;
    Handle::new(object).ok_or_else(|| {
        HydrateError::NotFound(format!(
            "element `{id}` is a `{found}`, not a `{}`",
            std::any::type_name::<T>().rsplit("::").next().unwrap_or_default()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_model::forms::{ContentPage, Entry, Label, StackLayout, CONTENT_PAGE_CONTENT};

    fn labelled(id: &str) -> ObjectRef {
        let label = ObjectRef::new(Label::default());
        label.with_mut(|l: &mut Label| l.view_mut().id = Some(id.into()));
        label
    }

    fn tree() -> (ObjectRef, ObjectRef, ObjectRef) {
        let page = ObjectRef::new(ContentPage::default());
        let outer = ObjectRef::new(StackLayout::default());
        let inner = ObjectRef::new(StackLayout::default());
        let deep = labelled("dup");
        let shallow = labelled("dup");
        inner.with_mut(|s: &mut StackLayout| s.push(deep.clone()));
        outer.with_mut(|s: &mut StackLayout| {
            s.push(inner.clone());
            s.push(shallow.clone());
        });
        page.with_mut(|p: &mut ContentPage| p.store_mut().set_value(&CONTENT_PAGE_CONTENT, Value::Object(outer)));
        (page, shallow, deep)
    }

    #[test]
    fn breadth_first_prefers_shallow_matches() {
        let (page, shallow, deep) = tree();
        let found = find_by_id(&page, "dup").unwrap();
        assert_eq!(found, shallow);
        assert_ne!(found, deep);
    }

    #[test]
    fn root_is_excluded() {
        let label = labelled("me");
        assert_eq!(find_by_id(&label, "me"), None);
    }

    #[test]
    fn typed_lookup() {
        let (page, shallow, _) = tree();
        assert_eq!(find_by_id_as::<Label>(&page, "dup").unwrap().object(), &shallow);
        assert!(matches!(find_by_id_as::<Entry>(&page, "dup"), Err(HydrateError::NotFound(_))));
        assert!(matches!(find_by_id_as::<Label>(&page, "nope"), Err(HydrateError::NotFound(_))));
    }
}
