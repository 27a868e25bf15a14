use std::any::Any;

use kiln_model::forms::{CONTENT_PAGE, ContentPage};
use kiln_model::{Component, ContainerKind, ModelError, ObjectRef, PropertyStore, TypeInfo, Value};
use kiln_xaml::{HydrateError, XamlLoader};

include!("custom_page.g.rs");

pub static CUSTOM_PAGE: TypeInfo = TypeInfo {
    module: crate::MODULE,
    namespace: crate::NAMESPACE,
    name: "CustomPage",
    base: Some(&CONTENT_PAGE),
    managed: true,
    container: ContainerKind::None,
    properties: &[],
    constructor: Some(new_custom_page),
};

fn new_custom_page() -> ObjectRef {
    ObjectRef::new(CustomPage::default())
}

/// Code-behind for `ui/custom_page.xaml`.
#[derive(Debug, Default)]
pub struct CustomPage {
    page: ContentPage,
}

impl CustomPage {
    /// Hydrate a fresh page from its embedded markup and look up its named
    /// elements.
    pub fn load(loader: &XamlLoader) -> Result<(ObjectRef, CustomPageElements), HydrateError> {
        let root = loader.hydrate(Some(new_custom_page()), &CUSTOM_PAGE)?;
        let elements = CustomPageElements::initialize_component(&root)?;
        Ok((root, elements))
    }

    pub fn page(&self) -> &ContentPage {
        &self.page
    }
}

impl Component for CustomPage {
    fn type_info(&self) -> &'static TypeInfo {
        &CUSTOM_PAGE
    }

    fn properties(&self) -> Option<&PropertyStore> {
        self.page.properties()
    }

    fn properties_mut(&mut self) -> Option<&mut PropertyStore> {
        self.page.properties_mut()
    }

    fn plain(&self, name: &str) -> Option<Value> {
        self.page.plain(name)
    }

    fn set_plain(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        self.page.set_plain(name, value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
