use kiln_model::{ModelError, Module, ObjectRef, TypeInfo, TypeRegistry};

use crate::context::HydrationContext;
use crate::error::HydrateError;
use crate::hydrator::Hydrator;
use crate::locate::locate;

/// Entry point: owns the type registry and runs one hydration pass per call.
///
/// ```rust
/// use kiln_xaml::XamlLoader;
///
/// let loader = XamlLoader::new();
/// let root = loader
///     .load_str(None, r#"<StackLayout><Label Id="Text0" Text="Hi"/></StackLayout>"#, None)
///     .unwrap();
/// let label = kiln_xaml::find_by_id(&root, "Text0").unwrap();
/// assert_eq!(label.get("Text").and_then(|v| v.as_str().map(String::from)).as_deref(), Some("Hi"));
/// ```
#[derive(Debug, Clone)]
pub struct XamlLoader {
    registry: TypeRegistry,
}

impl XamlLoader {
    /// Loader knowing only the built-in framework types.
    pub fn new() -> Self {
        Self { registry: TypeRegistry::with_framework() }
    }

    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    /// Builder form of [`register`](Self::register).
    pub fn module(mut self, module: Module) -> Result<Self, ModelError> {
        self.register(module)?;
        Ok(self)
    }

    pub fn register(&mut self, module: Module) -> Result<(), ModelError> {
        self.registry.register(module)
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Locate the markup declaring `declaring` as its code-behind class and
    /// hydrate it into `existing` (or a fresh root).
    pub fn hydrate(&self, existing: Option<ObjectRef>, declaring: &'static TypeInfo) -> Result<ObjectRef, HydrateError> {
        let text = locate(declaring, &self.registry)?;
        let ctx = HydrationContext::new(&self.registry).local_module(declaring.module);
        Hydrator::new(text, ctx).run(existing)
    }

    /// Hydrate markup text directly. `local_module` is searched for foreign
    /// namespace declarations that name no `assembly=`.
    pub fn load_str(
        &self,
        existing: Option<ObjectRef>,
        text: &str,
        local_module: Option<&str>,
    ) -> Result<ObjectRef, HydrateError> {
        let mut ctx = HydrationContext::new(&self.registry);
        if let Some(module) = local_module {
            ctx = ctx.local_module(module);
        }
        Hydrator::new(text, ctx).run(existing)
    }
}

impl Default for XamlLoader {
    fn default() -> Self {
        Self::new()
    }
}
