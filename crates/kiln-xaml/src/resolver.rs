use std::cell::RefCell;
use std::collections::HashMap;

use kiln_model::forms;
use kiln_model::{ObjectRef, TypeInfo, TypeRegistry};

use crate::error::HydrateError;
use crate::namespaces::{XmlnsDecl, is_framework, parse_xmlns};

/// Maps `(namespace URI, element name)` onto a registered [`TypeInfo`].
///
/// Framework namespaces resolve against the built-in forms module. Anything
/// else must be a foreign declaration (`clr-namespace:...;assembly=...`);
/// without an `assembly=` segment the pass's local module is searched.
pub struct TypeResolver<'r> {
    registry: &'r TypeRegistry,
    local_module: Option<&'r str>,
    decls: RefCell<HashMap<String, XmlnsDecl>>,
}

impl<'r> TypeResolver<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry, local_module: None, decls: RefCell::new(HashMap::new()) }
    }

    /// Module searched for foreign declarations that name no module.
    pub fn local_module(mut self, module: &'r str) -> Self {
        self.local_module = Some(module);
        self
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Resolve an element name (prefix allowed, it is ignored) in `namespace`.
    pub fn resolve(&self, namespace: &str, element: &str) -> Result<&'static TypeInfo, HydrateError> {
        let name = element.rsplit(':').next().unwrap_or(element);

        if is_framework(namespace) {
            return self
                .registry
                .lookup(forms::MODULE, forms::NAMESPACE, name)
                .ok_or_else(|| HydrateError::resolution(namespace, name, "no such framework type"));
        }

        let decl = self.declaration(namespace)?;
        let Some(ns) = decl.namespace.as_deref() else {
            return Err(HydrateError::syntax(namespace, "declaration names no namespace"));
        };
        let module_name = match (decl.module.as_deref(), self.local_module) {
            (Some(m), _) | (None, Some(m)) => m,
            (None, None) => {
                return Err(HydrateError::resolution(
                    namespace,
                    name,
                    "declaration names no module and no local module is set",
                ));
            }
        };
        let module = self.registry.module(module_name).ok_or_else(|| {
            HydrateError::resolution(namespace, name, format!("module `{module_name}` is not loaded"))
        })?;
        module.find(ns, name).ok_or_else(|| {
            HydrateError::resolution(namespace, name, format!("no such type in module `{module_name}`"))
        })
    }

    /// Default-construct an instance of `ty`.
    pub fn construct(&self, ty: &'static TypeInfo) -> Result<ObjectRef, HydrateError> {
        ty.construct().ok_or_else(|| {
            HydrateError::resolution(ty.namespace, ty.name, "type has no default constructor")
        })
    }

    fn declaration(&self, namespace: &str) -> Result<XmlnsDecl, HydrateError> {
        if let Some(decl) = self.decls.borrow().get(namespace) {
            return Ok(decl.clone());
        }
        let decl = parse_xmlns(namespace)?;
        log::trace!("namespace `{namespace}` -> {decl:?}");
        self.decls.borrow_mut().insert(namespace.to_string(), decl.clone());
        Ok(decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_model::forms::{LABEL, PAGE};
    use kiln_model::Module;

    use crate::namespaces::FRAMEWORK_NS;

    const FOREIGN: &str = "clr-namespace:Kiln.Forms;assembly=Kiln.Forms";

    fn registry() -> TypeRegistry {
        TypeRegistry::with_framework()
    }

    #[test]
    fn framework_types_resolve() {
        let reg = registry();
        let r = TypeResolver::new(&reg);
        assert_eq!(r.resolve(FRAMEWORK_NS, "Label").unwrap(), &LABEL);
        assert_eq!(r.resolve("", "Label").unwrap(), &LABEL);
    }

    #[test]
    fn prefix_is_stripped() {
        let reg = registry();
        let r = TypeResolver::new(&reg);
        assert_eq!(r.resolve(FOREIGN, "local:Label").unwrap(), &LABEL);
    }

    #[test]
    fn local_module_fills_in_missing_assembly() {
        let mut reg = registry();
        reg.register(Module::new("App")).unwrap();
        let r = TypeResolver::new(&reg).local_module("Kiln.Forms");
        assert_eq!(r.resolve("clr-namespace:Kiln.Forms", "Label").unwrap(), &LABEL);

        let r = TypeResolver::new(&reg);
        assert!(matches!(
            r.resolve("clr-namespace:Kiln.Forms", "Label"),
            Err(HydrateError::Resolution { .. })
        ));
    }

    #[test]
    fn unknown_names_fail_with_resolution() {
        let reg = registry();
        let r = TypeResolver::new(&reg);
        for (ns, name) in [
            (FRAMEWORK_NS, "Nope"),
            ("clr-namespace:Kiln.Forms;assembly=Missing", "Label"),
            ("clr-namespace:Other;assembly=Kiln.Forms", "Label"),
        ] {
            assert!(matches!(r.resolve(ns, name), Err(HydrateError::Resolution { .. })), "{ns} {name}");
        }
    }

    #[test]
    fn malformed_declaration_is_syntax() {
        let reg = registry();
        let r = TypeResolver::new(&reg);
        assert!(matches!(r.resolve("a;b;c;d", "Label"), Err(HydrateError::Syntax { .. })));
        assert!(matches!(r.resolve("assembly=Kiln.Forms", "Label"), Err(HydrateError::Syntax { .. })));
    }

    #[test]
    fn abstract_types_cannot_be_constructed() {
        let reg = registry();
        let r = TypeResolver::new(&reg);
        assert!(r.construct(&LABEL).is_ok());
        assert!(matches!(r.construct(&PAGE), Err(HydrateError::Resolution { .. })));
    }
}
