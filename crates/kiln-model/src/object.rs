use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::binding::{Binding, BindingContext, PropertyStore, ValueConverter};
use crate::error::ModelError;
use crate::types::TypeInfo;
use crate::value::Value;

// ── Component trait ───────────────────────────────────────────────────────

/// The capability interface every object-model type implements.
///
/// Descriptive lookups (which properties exist, which kind they are, whether
/// the type is a container) go through [`TypeInfo`]; this trait exposes the
/// storage those descriptors point at.
///
/// # Implementing a custom type
///
/// ```rust,ignore
/// #[derive(Default)]
/// pub struct Badge { store: PropertyStore }
///
/// impl Component for Badge {
///     fn type_info(&self) -> &'static TypeInfo { &BADGE }
///     fn properties(&self) -> Option<&PropertyStore> { Some(&self.store) }
///     fn properties_mut(&mut self) -> Option<&mut PropertyStore> { Some(&mut self.store) }
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
/// ```
pub trait Component: Any {
    fn type_info(&self) -> &'static TypeInfo;

    /// Managed-property storage. `None` for types outside the managed system.
    fn properties(&self) -> Option<&PropertyStore> {
        None
    }

    fn properties_mut(&mut self) -> Option<&mut PropertyStore> {
        None
    }

    /// Read a plain property.
    fn plain(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Write a plain property. The value has already been coerced to the
    /// kind the type's descriptor declares.
    fn set_plain(&mut self, name: &str, _value: Value) -> Result<(), ModelError> {
        Err(ModelError::NoPlainProperty {
            type_name: self.type_info().name,
            property: name.to_string(),
        })
    }

    /// Ordered children of an items container.
    fn items(&self) -> Option<&[ObjectRef]> {
        None
    }

    fn items_mut(&mut self) -> Option<&mut Vec<ObjectRef>> {
        None
    }

    /// Entries of a keyed container.
    fn entries(&self) -> Option<&IndexMap<String, ObjectRef>> {
        None
    }

    fn entries_mut(&mut self) -> Option<&mut IndexMap<String, ObjectRef>> {
        None
    }

    /// Called after this object's bindings were evaluated against a new
    /// context, before the context moves on to nested objects.
    fn binding_context_changed(&mut self, _context: &BindingContext) {}

    /// Objects usable as binding converters return themselves here.
    fn as_converter(&self) -> Option<&dyn ValueConverter> {
        None
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ── ObjectId ──────────────────────────────────────────────────────────────

/// Identity of a live object. Only meaningful while the object is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

// ── ObjectRef ─────────────────────────────────────────────────────────────

/// Shared handle to a node of the object graph.
///
/// Cloning the handle shares the object; equality of handles is identity.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<dyn Component>>);

impl ObjectRef {
    pub fn new<C: Component>(component: C) -> Self {
        Self(Rc::new(RefCell::new(component)))
    }

    pub fn id(&self) -> ObjectId {
        ObjectId(Rc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn borrow(&self) -> Ref<'_, dyn Component> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn Component> {
        self.0.borrow_mut()
    }

    /// Runtime type of the object.
    pub fn type_info(&self) -> &'static TypeInfo {
        self.0.borrow().type_info()
    }

    pub fn is<T: Component>(&self) -> bool {
        self.0.borrow().as_any().is::<T>()
    }

    /// Run `f` against the concrete type, if the object is a `T`.
    pub fn with<T: Component, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.0.borrow();
        guard.as_any().downcast_ref::<T>().map(f)
    }

    pub fn with_mut<T: Component, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.0.borrow_mut();
        guard.as_any_mut().downcast_mut::<T>().map(f)
    }

    /// Property value by name: the managed value if one is stored, otherwise
    /// the plain accessor.
    pub fn get(&self, name: &str) -> Option<Value> {
        let guard = self.0.borrow();
        guard
            .properties()
            .and_then(|store| store.value(name).cloned())
            .or_else(|| guard.plain(name))
    }

    /// Binding attached to the managed property `name`.
    pub fn binding(&self, name: &str) -> Option<Binding> {
        self.0.borrow().properties()?.binding(name).cloned()
    }

    /// Children that make up the visual tree: container items, then
    /// object-valued managed properties (e.g. a page's `Content`).
    pub fn children(&self) -> Vec<ObjectRef> {
        let guard = self.0.borrow();
        let mut out: Vec<ObjectRef> = guard.items().map(|i| i.to_vec()).unwrap_or_default();
        if let Some(store) = guard.properties() {
            out.extend(store.values().filter_map(|(_, v)| v.as_object().cloned()));
        }
        out
    }

    /// [`children`](Self::children) followed by the entries of a keyed
    /// container: everything one level below this object.
    pub fn nested(&self) -> Vec<ObjectRef> {
        let mut out = self.children();
        if let Some(entries) = self.0.borrow().entries() {
            out.extend(entries.values().cloned());
        }
        out
    }

    /// Set the data context on this object and everything under it, then
    /// evaluate every attached binding against it.
    pub fn set_binding_context(&self, context: &BindingContext) {
        {
            let mut guard = self.0.borrow_mut();
            if let Some(store) = guard.properties_mut() {
                store.apply_context(context);
            }
            guard.binding_context_changed(context);
        }
        for child in self.nested() {
            child.set_binding_context(context);
        }
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(c) => write!(f, "<{} #{:x}>", c.type_info().name, self.id().0),
            Err(_) => write!(f, "<borrowed #{:x}>", self.id().0),
        }
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

// ── Handle ────────────────────────────────────────────────────────────────

/// An [`ObjectRef`] whose concrete type was checked when the handle was made.
pub struct Handle<T> {
    object: ObjectRef,
    _marker: PhantomData<T>,
}

impl<T: Component> Handle<T> {
    pub fn new(object: ObjectRef) -> Option<Self> {
        object.is::<T>().then_some(Self { object, _marker: PhantomData })
    }

    pub fn object(&self) -> &ObjectRef {
        &self.object
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.object.with(f)
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.object.with_mut(f)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self { object: self.object.clone(), _marker: PhantomData }
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.object.fmt(f)
    }
}
