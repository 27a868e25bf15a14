use kiln_model::{ContainerKind, ObjectRef, TypeInfo};

use crate::binding::parse_binding;
use crate::coerce::{RawValue, coerce};
use crate::context::HydrationContext;
use crate::error::HydrateError;

/// Pseudo-property whose value is merged into the pass's resources instead
/// of being stored on the target.
pub const RESOURCES_PROPERTY: &str = "Resources";

/// Route one named value onto `target`, whose declared type is `ty`.
///
/// 1. `Resources` merges a keyed container into the pass's resource table.
/// 2. Text starting with `{` becomes a binding on the managed property.
/// 3. A managed property stores the coerced value in the property store.
/// 4. Otherwise the plain accessor is written.
pub fn set_property(
    ctx: &mut HydrationContext<'_>,
    target: &ObjectRef,
    ty: &'static TypeInfo,
    name: &str,
    value: RawValue,
) -> Result<(), HydrateError> {
    if name == RESOURCES_PROPERTY {
        return match value {
            RawValue::Object(dict) if dict.type_info().container_kind() == ContainerKind::Keyed => {
                ctx.resources.merge(&dict)?;
                log::debug!("{}.Resources: {} resources in scope", ty.name, ctx.resources.len());
                Ok(())
            }
            _ => Err(HydrateError::structure(format!(
                "`{}.Resources` must be a keyed container such as `ResourceDictionary`",
                ty.name
            ))),
        };
    }

    if let RawValue::Text(text) = &value
        && text.trim_start().starts_with('{')
    {
        let binding_error = || HydrateError::Binding {
            type_name: ty.name.to_string(),
            property: name.to_string(),
        };
        let property = ty.find_managed(name).ok_or_else(binding_error)?;
        let binding = parse_binding(text, &ctx.resources)?;
        log::trace!("bind {}.{} -> {binding:?}", ty.name, name);
        let mut guard = target.borrow_mut();
        let store = guard.properties_mut().ok_or_else(binding_error)?;
        store.set_binding(property, binding);
        return Ok(());
    }

    if let Some(property) = ty.find_managed(name) {
        let value = coerce(value, property.kind, name)?;
        let mut guard = target.borrow_mut();
        let store = guard.properties_mut().ok_or_else(|| {
            HydrateError::structure(format!("`{}` declares managed `{name}` but has no property store", ty.name))
        })?;
        store.set_value(property, value);
        return Ok(());
    }

    if let Some(kind) = ty.find_plain(name) {
        let value = coerce(value, kind, name)?;
        target.borrow_mut().set_plain(name, value)?;
        return Ok(());
    }

    Err(HydrateError::PropertyNotFound {
        type_name: ty.name.to_string(),
        property: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_model::forms::{
        ContentPage, Label, LayoutOptions, ResourceDictionary, CONTENT_PAGE, LABEL, RESOURCE_DICTIONARY,
    };
    use kiln_model::{BindingMode, TypeRegistry, Value};

    fn set(ctx: &mut HydrationContext<'_>, target: &ObjectRef, name: &str, value: impl Into<RawValue>) -> Result<(), HydrateError> {
        let ty = target.type_info();
        set_property(ctx, target, ty, name, value.into())
    }

    #[test]
    fn managed_values_go_to_the_store() {
        let reg = TypeRegistry::with_framework();
        let mut ctx = HydrationContext::new(&reg);
        let label = LABEL.construct().unwrap();
        set(&mut ctx, &label, "Text", "Hello").unwrap();
        set(&mut ctx, &label, "Opacity", "0.5").unwrap();
        assert_eq!(label.with(|l: &Label| l.text().map(str::to_string)).flatten().as_deref(), Some("Hello"));
        assert_eq!(label.get("Opacity"), Some(Value::Float(0.5)));
    }

    #[test]
    fn plain_values_go_through_the_accessor() {
        let reg = TypeRegistry::with_framework();
        let mut ctx = HydrationContext::new(&reg);
        let label = LABEL.construct().unwrap();
        set(&mut ctx, &label, "Id", "title").unwrap();
        set(&mut ctx, &label, "HorizontalOptions", "Center").unwrap();
        assert_eq!(label.get("Id"), Some(Value::from("title")));
        assert_eq!(
            label.with(|l: &Label| l.view().horizontal_options),
            Some(LayoutOptions::Center)
        );
    }

    #[test]
    fn braces_bind_managed_properties() {
        let reg = TypeRegistry::with_framework();
        let mut ctx = HydrationContext::new(&reg);
        let label = LABEL.construct().unwrap();
        set(&mut ctx, &label, "Text", "{Binding Name, Mode=OneWay}").unwrap();
        let binding = label.binding("Text").unwrap();
        assert_eq!(binding.path, "Name");
        assert_eq!(binding.mode, BindingMode::OneWay);
        assert_eq!(label.get("Text"), None);
    }

    #[test]
    fn binding_a_plain_property_fails() {
        let reg = TypeRegistry::with_framework();
        let mut ctx = HydrationContext::new(&reg);
        let label = LABEL.construct().unwrap();
        assert!(matches!(
            set(&mut ctx, &label, "Id", "{Binding Name}"),
            Err(HydrateError::Binding { .. })
        ));
    }

    #[test]
    fn resources_merge_into_the_pass() {
        let reg = TypeRegistry::with_framework();
        let mut ctx = HydrationContext::new(&reg);
        let page = CONTENT_PAGE.construct().unwrap();
        let dict = RESOURCE_DICTIONARY.construct().unwrap();
        let upper = LABEL.construct().unwrap();
        dict.with_mut(|d: &mut ResourceDictionary| d.insert("upper", upper.clone()));

        set(&mut ctx, &page, "Resources", dict).unwrap();
        assert_eq!(ctx.resources.get("upper"), Some(&upper));
        assert!(page.with(|p: &ContentPage| p.content().is_none()).unwrap());

        assert!(matches!(set(&mut ctx, &page, "Resources", "text"), Err(HydrateError::Structure(_))));
    }

    #[test]
    fn unknown_property() {
        let reg = TypeRegistry::with_framework();
        let mut ctx = HydrationContext::new(&reg);
        let label = LABEL.construct().unwrap();
        assert!(matches!(
            set(&mut ctx, &label, "Colour", "red"),
            Err(HydrateError::PropertyNotFound { .. })
        ));
    }

    #[test]
    fn coercion_failures_are_structure_errors() {
        let reg = TypeRegistry::with_framework();
        let mut ctx = HydrationContext::new(&reg);
        let label = LABEL.construct().unwrap();
        assert!(matches!(set(&mut ctx, &label, "FontSize", "big"), Err(HydrateError::Structure(_))));
        assert!(matches!(set(&mut ctx, &label, "XAlign", "Middle"), Err(HydrateError::Structure(_))));
    }

    #[test]
    fn failed_routes_leave_the_target_untouched() {
        let reg = TypeRegistry::with_framework();
        let mut ctx = HydrationContext::new(&reg);
        let label = LABEL.construct().unwrap();
        set(&mut ctx, &label, "Text", "a").unwrap();
        set(&mut ctx, &label, "HorizontalOptions", "End").unwrap();

        assert!(set(&mut ctx, &label, "FontSize", "big").is_err());
        assert!(set(&mut ctx, &label, "HorizontalOptions", "Sideways").is_err());
        assert!(set(&mut ctx, &label, "Id", "{Binding Name}").is_err());
        assert!(set(&mut ctx, &label, "Text", "{Binding}").is_err());

        assert_eq!(label.get("Text"), Some(Value::from("a")));
        assert_eq!(label.get("FontSize"), None);
        assert_eq!(label.get("Id"), None);
        assert_eq!(label.binding("Text"), None);
        assert_eq!(
            label.with(|l: &Label| l.view().horizontal_options),
            Some(LayoutOptions::End)
        );
    }
}
