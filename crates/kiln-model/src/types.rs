use std::fmt;
use std::ptr;

use crate::object::ObjectRef;
use crate::value::ValueKind;

// ── ManagedProperty ───────────────────────────────────────────────────────

/// A globally registered descriptor for a framework-managed property.
///
/// Declared once as a `static` (e.g. `LABEL_TEXT`) and referenced from the
/// owning type's [`PropertyInfo`] list. Managed properties store values in a
/// [`PropertyStore`](crate::PropertyStore) and accept one attached binding.
#[derive(Debug, PartialEq, Eq)]
pub struct ManagedProperty {
    pub name: &'static str,
    /// Name of the type that declares the descriptor.
    pub owner: &'static str,
    pub kind: ValueKind,
}

// ── PropertyInfo ──────────────────────────────────────────────────────────

/// One property declared by a type.
#[derive(Debug, Clone, Copy)]
pub enum PropertyInfo {
    Managed(&'static ManagedProperty),
    /// A settable field reached through [`Component::set_plain`](crate::Component::set_plain).
    Plain { name: &'static str, kind: ValueKind },
}

impl PropertyInfo {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyInfo::Managed(p) => p.name,
            PropertyInfo::Plain { name, .. } => *name,
        }
    }

    pub fn value_kind(&self) -> ValueKind {
        match self {
            PropertyInfo::Managed(p) => p.kind,
            PropertyInfo::Plain { kind, .. } => *kind,
        }
    }

    pub fn is_managed(&self) -> bool {
        matches!(self, PropertyInfo::Managed(_))
    }
}

// ── ContainerKind ─────────────────────────────────────────────────────────

/// How a type accepts children written directly inside its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerKind {
    #[default]
    None,
    /// Ordered append (layouts).
    Items,
    /// Insert under a declared key (resource dictionaries).
    Keyed,
}

// ── TypeInfo ──────────────────────────────────────────────────────────────

/// Static description of a constructible (or abstract) object kind.
///
/// A type is identified by `(module, namespace, name)`. Lookups that the
/// hydrator performs (managed descriptors, plain accessors, container tag)
/// walk the `base` chain, nearest type first.
pub struct TypeInfo {
    pub module: &'static str,
    pub namespace: &'static str,
    pub name: &'static str,
    pub base: Option<&'static TypeInfo>,
    /// Participates in the managed-property system (derives from `BindableObject`).
    pub managed: bool,
    pub container: ContainerKind,
    /// Properties declared on this type only.
    pub properties: &'static [PropertyInfo],
    /// Default constructor. `None` for abstract types.
    pub constructor: Option<fn() -> ObjectRef>,
}

impl TypeInfo {
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.to_string()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// This type followed by each of its bases.
    pub fn ancestry(&'static self) -> Ancestry {
        Ancestry { next: Some(self) }
    }

    pub fn derives_from(&'static self, other: &TypeInfo) -> bool {
        self.ancestry().any(|t| ptr::eq(t, other))
    }

    /// First property named `name` along the hierarchy.
    pub fn find_property(&'static self, name: &str) -> Option<&'static PropertyInfo> {
        self.ancestry()
            .flat_map(|t| t.properties.iter())
            .find(|p| p.name() == name)
    }

    /// Managed descriptor named `name`, only if this type takes part in the
    /// managed-property system.
    pub fn find_managed(&'static self, name: &str) -> Option<&'static ManagedProperty> {
        if !self.managed {
            return None;
        }
        match self.find_property(name)? {
            PropertyInfo::Managed(p) => Some(*p),
            PropertyInfo::Plain { .. } => None,
        }
    }

    pub fn find_plain(&'static self, name: &str) -> Option<ValueKind> {
        self.ancestry()
            .flat_map(|t| t.properties.iter())
            .find_map(|p| match p {
                PropertyInfo::Plain { name: n, kind } if *n == name => Some(*kind),
                _ => None,
            })
    }

    /// Nearest explicit container tag along the hierarchy.
    pub fn container_kind(&'static self) -> ContainerKind {
        self.ancestry()
            .map(|t| t.container)
            .find(|c| *c != ContainerKind::None)
            .unwrap_or_default()
    }

    pub fn construct(&self) -> Option<ObjectRef> {
        self.constructor.map(|ctor| ctor())
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.full_name(), self.module)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

pub struct Ancestry {
    next: Option<&'static TypeInfo>,
}

impl Iterator for Ancestry {
    type Item = &'static TypeInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{CONTENT_PAGE, LABEL, RESOURCE_DICTIONARY, STACK_LAYOUT, VIEW};

    #[test]
    fn ancestry_starts_with_self() {
        let names: Vec<_> = LABEL.ancestry().map(|t| t.name).collect();
        assert_eq!(names, ["Label", "View", "BindableObject"]);
    }

    #[test]
    fn derives_from_base() {
        assert!(LABEL.derives_from(&VIEW));
        assert!(!VIEW.derives_from(&LABEL));
    }

    #[test]
    fn managed_lookup_reaches_base_types() {
        assert!(LABEL.find_managed("Opacity").is_some());
        assert!(LABEL.find_managed("Text").is_some());
        assert!(LABEL.find_managed("Id").is_none());
    }

    #[test]
    fn plain_lookup_reaches_base_types() {
        assert_eq!(LABEL.find_plain("Id"), Some(ValueKind::Str));
        assert_eq!(LABEL.find_plain("Text"), None);
    }

    #[test]
    fn container_tags() {
        assert_eq!(STACK_LAYOUT.container_kind(), ContainerKind::Items);
        assert_eq!(RESOURCE_DICTIONARY.container_kind(), ContainerKind::Keyed);
        assert_eq!(CONTENT_PAGE.container_kind(), ContainerKind::None);
    }

    #[test]
    fn abstract_types_do_not_construct() {
        assert!(VIEW.construct().is_none());
        assert!(LABEL.construct().is_some());
    }
}
