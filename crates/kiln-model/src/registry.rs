use std::borrow::Cow;
use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::ModelError;
use crate::types::TypeInfo;

// ── EmbeddedResource ──────────────────────────────────────────────────────

/// A text resource shipped with a module, typically a markup document pulled
/// in with `include_str!`.
#[derive(Debug, Clone)]
pub struct EmbeddedResource {
    pub name: String,
    pub text: Cow<'static, str>,
}

// ── Module ────────────────────────────────────────────────────────────────

/// A unit of type registration: the types one crate contributes plus the
/// markup documents it embeds.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    types: Vec<&'static TypeInfo>,
    resources: Vec<EmbeddedResource>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), types: Vec::new(), resources: Vec::new() }
    }

    pub fn with_type(mut self, ty: &'static TypeInfo) -> Self {
        self.types.push(ty);
        self
    }

    pub fn with_resource(
        mut self,
        name: impl Into<String>,
        text: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.resources.push(EmbeddedResource { name: name.into(), text: text.into() });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &[&'static TypeInfo] {
        &self.types
    }

    pub fn resources(&self) -> &[EmbeddedResource] {
        &self.resources
    }

    pub fn find(&self, namespace: &str, name: &str) -> Option<&'static TypeInfo> {
        self.types
            .iter()
            .copied()
            .find(|t| t.namespace == namespace && t.name == name)
    }

    fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        for ty in &self.types {
            if ty.module != self.name {
                return Err(ModelError::ModuleMismatch {
                    type_name: ty.name,
                    declared: ty.module,
                    module: self.name.clone(),
                });
            }
            if !seen.insert((ty.namespace, ty.name)) {
                return Err(ModelError::DuplicateType {
                    module: self.name.clone(),
                    namespace: ty.namespace,
                    name: ty.name,
                });
            }
            validate_properties(ty)?;
        }
        Ok(())
    }
}

/// A property name may appear once along a type's hierarchy, so every name
/// resolves to exactly one managed descriptor or plain accessor.
fn validate_properties(ty: &'static TypeInfo) -> Result<(), ModelError> {
    let mut names = HashSet::new();
    for prop in ty.ancestry().flat_map(|t| t.properties.iter()) {
        if !names.insert(prop.name()) {
            return Err(ModelError::DuplicateProperty { type_name: ty.name, property: prop.name() });
        }
    }
    Ok(())
}

// ── TypeRegistry ──────────────────────────────────────────────────────────

/// Every module known to the process, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    modules: IndexMap<String, Module>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding only the built-in framework module.
    pub fn with_framework() -> Self {
        let mut registry = Self::new();
        // The framework module is static data validated by its own tests.
        if let Err(e) = registry.register(crate::forms::module()) {
            log::error!("framework module failed validation: {e}");
        }
        registry
    }

    pub fn register(&mut self, module: Module) -> Result<(), ModelError> {
        if self.modules.contains_key(module.name()) {
            return Err(ModelError::DuplicateModule(module.name.clone()));
        }
        module.validate()?;
        log::debug!(
            "registered module `{}` ({} types, {} resources)",
            module.name,
            module.types.len(),
            module.resources.len()
        );
        self.modules.insert(module.name.clone(), module);
        Ok(())
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn lookup(&self, module: &str, namespace: &str, name: &str) -> Option<&'static TypeInfo> {
        self.module(module)?.find(namespace, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{self, LABEL, LABEL_TEXT, VIEW};
    use crate::types::{ContainerKind, PropertyInfo};
    use crate::value::ValueKind;

    static SHADOWING: TypeInfo = TypeInfo {
        module: "Test",
        namespace: "Test",
        name: "Shadowing",
        base: Some(&LABEL),
        managed: true,
        container: ContainerKind::None,
        properties: &[PropertyInfo::Plain { name: "Text", kind: ValueKind::Str }],
        constructor: None,
    };

    static FINE: TypeInfo = TypeInfo {
        module: "Test",
        namespace: "Test",
        name: "Fine",
        base: Some(&VIEW),
        managed: true,
        container: ContainerKind::None,
        properties: &[PropertyInfo::Managed(&LABEL_TEXT)],
        constructor: None,
    };

    #[test]
    fn framework_module_is_valid() {
        let registry = TypeRegistry::with_framework();
        assert!(registry.module(forms::MODULE).is_some());
        assert!(registry.lookup(forms::MODULE, forms::NAMESPACE, "Label").is_some());
        assert!(registry.lookup(forms::MODULE, forms::NAMESPACE, "Nope").is_none());
    }

    #[test]
    fn duplicate_module_rejected() {
        let mut registry = TypeRegistry::with_framework();
        let err = registry.register(forms::module()).unwrap_err();
        assert_eq!(err, ModelError::DuplicateModule(forms::MODULE.into()));
    }

    #[test]
    fn shadowed_property_rejected() {
        let err = TypeRegistry::new()
            .register(Module::new("Test").with_type(&SHADOWING))
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateProperty { property: "Text", .. }));
    }

    #[test]
    fn module_name_must_match() {
        let err = TypeRegistry::new()
            .register(Module::new("Elsewhere").with_type(&FINE))
            .unwrap_err();
        assert!(matches!(err, ModelError::ModuleMismatch { .. }));
    }

    #[test]
    fn duplicate_type_rejected() {
        let err = TypeRegistry::new()
            .register(Module::new("Test").with_type(&FINE).with_type(&FINE))
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateType { name: "Fine", .. }));
    }
}
