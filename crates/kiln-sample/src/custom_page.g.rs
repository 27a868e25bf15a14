// Generated by kiln-gen. Do not edit.

/// Named elements of `Kiln.Sample.CustomPage`.
#[derive(Debug, Clone)]
pub struct CustomPageElements {
    pub greeting: ::kiln_model::Handle<::kiln_model::forms::Label>,
    pub shout: ::kiln_model::Handle<::kiln_model::forms::Label>,
    pub name_entry: ::kiln_model::Handle<::kiln_model::forms::Entry>,
    pub items: ::kiln_model::Handle<::kiln_model::forms::ListView>,
}

impl CustomPageElements {
    /// Look up every named element below a hydrated root.
    pub fn initialize_component(root: &::kiln_model::ObjectRef) -> ::std::result::Result<Self, ::kiln_xaml::HydrateError> {
        Ok(Self {
            greeting: ::kiln_xaml::find_by_id_as(root, "Greeting")?,
            shout: ::kiln_xaml::find_by_id_as(root, "Shout")?,
            name_entry: ::kiln_xaml::find_by_id_as(root, "NameEntry")?,
            items: ::kiln_xaml::find_by_id_as(root, "Items")?,
        })
    }
}
