use kiln_gen::{GenError, Stub, generate};
use kiln_xaml::{XamlLoader, find_by_id};

const WITH_CLASS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ContentPage xmlns="http://kiln.dev/forms"
             xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml"
             x:Class="Kiln.Sample.CustomPage">
  <ContentPage.Content>
    <StackLayout Id="Body">
      <Label Id="Title" Text="Welcome"/>
      <Label Text="unnamed"/>
      <Entry x:Id="Input"/>
    </StackLayout>
  </ContentPage.Content>
</ContentPage>"#;

#[test]
fn document_without_class_generates_nothing() {
    let out = generate(r#"<StackLayout><Label Id="Title"/></StackLayout>"#).unwrap();
    assert!(out.is_empty());
}

#[test]
fn one_field_per_named_element() {
    let out = generate(WITH_CLASS).unwrap();
    assert!(out.starts_with("// Generated by kiln-gen."));
    assert!(out.contains("/// Named elements of `Kiln.Sample.CustomPage`."));
    assert_eq!(out.matches("    pub ").count(), 4, "{out}");
    for line in [
        "pub body: ::kiln_model::Handle<::kiln_model::forms::StackLayout>,",
        "pub title: ::kiln_model::Handle<::kiln_model::forms::Label>,",
        "pub input: ::kiln_model::Handle<::kiln_model::forms::Entry>,",
    ] {
        assert!(out.contains(line), "missing {line}\n{out}");
    }
    assert_eq!(out.matches('{').count(), out.matches('}').count());
}

#[test]
fn class_without_named_elements_still_compiles_to_a_unit_like_struct() {
    let out = generate(
        r#"<Label xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml" x:Class="Kiln.Sample.Plain"/>"#,
    )
    .unwrap();
    assert!(out.contains("pub struct PlainElements {\n}"));
    assert!(out.contains("let _ = root;"));
}

#[test]
fn malformed_documents_fail() {
    assert!(matches!(generate(""), Err(GenError::NoRoot)));
    let mismatched = r#"<a xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml" x:Class="A.B"><b></a>"#;
    assert!(matches!(generate(mismatched), Err(GenError::Markup(_))));
}

#[test]
fn every_generated_field_is_found_after_hydration() {
    let stub = Stub::scan(WITH_CLASS).unwrap().unwrap();
    let root = XamlLoader::new().load_str(None, WITH_CLASS, None).unwrap();
    for field in &stub.fields {
        let found = find_by_id(&root, &field.id);
        assert!(found.is_some(), "`{}` not found after hydration", field.id);
    }
    let input = find_by_id(&root, "Input").unwrap();
    assert_eq!(input.type_info().name, "Entry");
}
