use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::object::ObjectRef;
use crate::types::ManagedProperty;
use crate::value::Value;

// ── BindingMode ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingMode {
    /// Whatever the target property prefers; behaves as `OneWay` here.
    #[default]
    Default,
    OneWay,
    TwoWay,
    OneWayToSource,
}

impl BindingMode {
    pub const NAMES: &'static [&'static str] = &["Default", "OneWay", "TwoWay", "OneWayToSource"];

    /// Whether source changes flow into the target property.
    pub fn reads_source(self) -> bool {
        !matches!(self, BindingMode::OneWayToSource)
    }
}

impl FromStr for BindingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Default" => Ok(BindingMode::Default),
            "OneWay" => Ok(BindingMode::OneWay),
            "TwoWay" => Ok(BindingMode::TwoWay),
            "OneWayToSource" => Ok(BindingMode::OneWayToSource),
            other => Err(format!("unknown binding mode `{other}`")),
        }
    }
}

// ── ValueConverter ────────────────────────────────────────────────────────

/// Transforms a source value before it reaches the bound property.
pub trait ValueConverter {
    fn convert(&self, value: Value) -> Value;
}

// ── Binding ───────────────────────────────────────────────────────────────

/// A binding attached to a managed property. Inert until a
/// [`BindingContext`] supplies a value for `path`.
#[derive(Clone, PartialEq)]
pub struct Binding {
    pub path: String,
    /// Object implementing [`ValueConverter`], usually taken from resources.
    pub converter: Option<ObjectRef>,
    pub mode: BindingMode,
}

impl Binding {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), converter: None, mode: BindingMode::Default }
    }

    pub fn mode(mut self, mode: BindingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn converter(mut self, converter: ObjectRef) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Value for the target property, or `None` if the context has nothing
    /// under `path`. A converter object that does not implement
    /// [`ValueConverter`] passes values through untouched.
    pub fn evaluate(&self, context: &BindingContext) -> Option<Value> {
        let source = context.get(&self.path)?.clone();
        let Some(converter) = &self.converter else {
            return Some(source);
        };
        let guard = converter.borrow();
        match guard.as_converter() {
            Some(c) => Some(c.convert(source)),
            None => {
                log::warn!(
                    "binding `{}`: resource {:?} is not a value converter; ignoring it",
                    self.path,
                    converter
                );
                Some(source)
            }
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("path", &self.path)
            .field("converter", &self.converter)
            .field("mode", &self.mode)
            .finish()
    }
}

// ── BindingContext ────────────────────────────────────────────────────────

/// Data source for bindings: a flat map from path to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingContext {
    values: IndexMap<String, Value>,
}

impl BindingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(path.into(), value.into());
        self
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.values.get(path)
    }
}

// ── PropertyStore ─────────────────────────────────────────────────────────

/// Managed-property storage for one object: local values plus at most one
/// binding per property.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    values: IndexMap<&'static str, Value>,
    bindings: IndexMap<&'static str, (&'static ManagedProperty, Binding)>,
}

impl PropertyStore {
    pub fn get(&self, property: &ManagedProperty) -> Option<&Value> {
        self.values.get(property.name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn values(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn set_value(&mut self, property: &'static ManagedProperty, value: Value) {
        self.values.insert(property.name, value);
    }

    /// Attach `binding`, replacing any binding already on `property`.
    pub fn set_binding(&mut self, property: &'static ManagedProperty, binding: Binding) {
        if let Some((_, old)) = self.bindings.insert(property.name, (property, binding)) {
            log::debug!("replaced binding `{}` on {}.{}", old.path, property.owner, property.name);
        }
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name).map(|(_, b)| b)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&'static str, &Binding)> {
        self.bindings.iter().map(|(k, (_, b))| (*k, b))
    }

    /// Evaluate every source-reading binding against `context`. A result
    /// that does not fit the property's kind is skipped and the previous
    /// value stays.
    pub fn apply_context(&mut self, context: &BindingContext) {
        let mut updates: Vec<(&'static str, Value)> = Vec::new();
        for (name, (property, binding)) in &self.bindings {
            if !binding.mode.reads_source() {
                continue;
            }
            let Some(value) = binding.evaluate(context) else { continue };
            match property.kind.adapt(value.clone()) {
                Some(value) => updates.push((*name, value)),
                None => log::warn!(
                    "binding `{}`: {value:?} does not fit {}.{} ({:?}); skipped",
                    binding.path,
                    property.owner,
                    property.name,
                    property.kind
                ),
            }
        }
        for (name, value) in updates {
            self.values.insert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{LABEL_FONT_SIZE, LABEL_TEXT, TEXT_ALIGNMENT};
    use crate::value::ValueKind;

    static ALIGN: ManagedProperty = ManagedProperty {
        name: "Align",
        owner: "Test",
        kind: ValueKind::Enum(&TEXT_ALIGNMENT),
    };

    #[test]
    fn mode_names_round_trip() {
        for name in BindingMode::NAMES {
            assert!(name.parse::<BindingMode>().is_ok());
        }
        assert!("twoway".parse::<BindingMode>().is_err());
    }

    #[test]
    fn binding_without_source_value_assigns_nothing() {
        let mut store = PropertyStore::default();
        store.set_binding(&LABEL_TEXT, Binding::new("Name"));
        store.apply_context(&BindingContext::new().with("Other", "x"));
        assert_eq!(store.get(&LABEL_TEXT), None);
    }

    #[test]
    fn one_way_to_source_is_not_read() {
        let mut store = PropertyStore::default();
        store.set_binding(&LABEL_TEXT, Binding::new("Name").mode(BindingMode::OneWayToSource));
        store.apply_context(&BindingContext::new().with("Name", "x"));
        assert_eq!(store.get(&LABEL_TEXT), None);
    }

    #[test]
    fn second_binding_replaces_first() {
        let mut store = PropertyStore::default();
        store.set_binding(&LABEL_TEXT, Binding::new("A"));
        store.set_binding(&LABEL_TEXT, Binding::new("B"));
        assert_eq!(store.binding("Text").map(|b| b.path.as_str()), Some("B"));
        assert_eq!(store.bindings().count(), 1);
    }

    #[test]
    fn bound_values_must_fit_the_property_kind() {
        let mut store = PropertyStore::default();
        store.set_value(&LABEL_FONT_SIZE, Value::Float(12.0));
        store.set_binding(&LABEL_FONT_SIZE, Binding::new("Size"));
        store.apply_context(&BindingContext::new().with("Size", "huge"));
        assert_eq!(store.get(&LABEL_FONT_SIZE), Some(&Value::Float(12.0)));

        store.apply_context(&BindingContext::new().with("Size", Value::Int(18)));
        assert_eq!(store.get(&LABEL_FONT_SIZE), Some(&Value::Float(18.0)));
    }

    #[test]
    fn bound_text_names_an_enum_member() {
        let mut store = PropertyStore::default();
        store.set_binding(&ALIGN, Binding::new("Align"));
        store.apply_context(&BindingContext::new().with("Align", "End"));
        assert_eq!(store.get(&ALIGN), Some(&Value::Enum("End")));
    }
}
