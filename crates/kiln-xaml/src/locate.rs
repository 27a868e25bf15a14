use kiln_model::{TypeInfo, TypeRegistry};

use crate::error::HydrateError;

/// Find the embedded markup whose root declares `declaring` as its
/// code-behind class.
///
/// Only the declaring type's own module is searched, and the match is a
/// plain substring test for `x:Class="<namespace>.<name>"`. When several
/// resources match, the first one registered wins.
pub fn locate<'m>(declaring: &'static TypeInfo, registry: &'m TypeRegistry) -> Result<&'m str, HydrateError> {
    let module = registry.module(declaring.module).ok_or_else(|| {
        HydrateError::NotFound(format!("module `{}` is not loaded", declaring.module))
    })?;

    let class = declaring.full_name();
    let double = format!("x:Class=\"{class}\"");
    let single = format!("x:Class='{class}'");
    let mut matches = module
        .resources()
        .iter()
        .filter(|r| r.text.contains(&double) || r.text.contains(&single));

    let Some(first) = matches.next() else {
        return Err(HydrateError::NotFound(format!(
            "no markup in module `{}` declares x:Class `{class}`",
            module.name()
        )));
    };
    let rest: Vec<&str> = matches.map(|r| r.name.as_str()).collect();
    if !rest.is_empty() {
        log::warn!(
            "x:Class `{class}` is declared by `{}` and also by {}; using `{}`",
            first.name,
            rest.iter().map(|n| format!("`{n}`")).collect::<Vec<_>>().join(", "),
            first.name
        );
    }
    log::debug!("located markup for `{class}` in `{}`", first.name);
    Ok(&first.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_model::forms::{CONTENT_PAGE, LABEL};
    use kiln_model::Module;

    fn registry() -> TypeRegistry {
        let mut reg = TypeRegistry::new();
        reg.register(
            kiln_model::forms::module()
                .with_resource("other.xaml", r#"<Label x:Class="Kiln.Forms.Label"/>"#)
                .with_resource("page.xaml", r#"<ContentPage x:Class="Kiln.Forms.ContentPage"/>"#)
                .with_resource("page2.xaml", "<ContentPage x:Class='Kiln.Forms.ContentPage'/>"),
        )
        .unwrap();
        reg.register(Module::new("Empty")).unwrap();
        reg
    }

    #[test]
    fn finds_the_declaring_resource() {
        let reg = registry();
        assert_eq!(locate(&LABEL, &reg).unwrap(), r#"<Label x:Class="Kiln.Forms.Label"/>"#);
    }

    #[test]
    fn first_match_wins() {
        let reg = registry();
        assert!(locate(&CONTENT_PAGE, &reg).unwrap().contains("\"Kiln.Forms.ContentPage\""));
    }

    #[test]
    fn missing_markup_or_module_is_not_found() {
        let reg = TypeRegistry::with_framework();
        assert!(matches!(locate(&LABEL, &reg), Err(HydrateError::NotFound(_))));
        assert!(matches!(locate(&LABEL, &TypeRegistry::new()), Err(HydrateError::NotFound(_))));
    }
}
