use anyhow::Context;
use kiln_model::logging::{LoggingConfig, init_logging};
use kiln_model::forms::ListView;
use kiln_model::{BindingContext, Module, ObjectRef, Value};
use kiln_xaml::XamlLoader;

mod converters;
mod custom_page;

use converters::UPPER_CASE_CONVERTER;
use custom_page::{CUSTOM_PAGE, CustomPage};

pub const MODULE: &str = "Kiln.Sample";
pub const NAMESPACE: &str = "Kiln.Sample";

/// The sample's types and embedded markup.
pub fn module() -> Module {
    Module::new(MODULE)
        .with_type(&CUSTOM_PAGE)
        .with_type(&UPPER_CASE_CONVERTER)
        .with_resource("custom_page.xaml", include_str!("../ui/custom_page.xaml"))
}

/// The page's data: a greeting, a name and three list rows.
pub fn sample_context() -> BindingContext {
    let row = |name: &str, title: &str| BindingContext::new().with("Subtitle", name).with("Title", title);
    BindingContext::new()
        .with("LabelBinding", "Binding works")
        .with("Name", "kiln")
        .with("Items", vec![row("Xander", "Monkey"), row("John", "Boss"), row("Fred", "Pleb")])
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let loader = XamlLoader::new()
        .module(module())
        .context("registering the sample module")?;
    let (page, elements) = CustomPage::load(&loader).context("hydrating CustomPage")?;

    page.set_binding_context(&sample_context());

    print_tree(&page, 0);
    println!();
    println!("Greeting -> {:?}", elements.greeting.object().get("Text"));
    println!("Shout    -> {:?}", elements.shout.object().get("Text"));
    let rows = elements.items.with(|l: &ListView| l.rows().to_vec()).unwrap_or_default();
    for row in &rows {
        println!("Row      -> {:?} / {:?}", row.get("Text"), row.get("Detail"));
    }
    Ok(())
}

fn print_tree(object: &ObjectRef, depth: usize) {
    let mut line = format!("{:indent$}{}", "", object.type_info().name, indent = depth * 2);
    if let Some(Value::Str(id)) = object.get("Id") {
        line.push_str(&format!(" #{id}"));
    }
    if let Some(store) = object.borrow().properties() {
        for (name, value) in store.values() {
            if value.as_object().is_none() {
                line.push_str(&format!(" {name}={value:?}"));
            }
        }
        for (name, binding) in store.bindings() {
            line.push_str(&format!(" {name}<-{{{}}}", binding.path));
        }
    }
    println!("{line}");
    for child in object.children() {
        print_tree(&child, depth + 1);
    }
}
