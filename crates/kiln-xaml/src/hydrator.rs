//! Single-pass markup hydrator.
//!
//! The cursor is read exactly once, one node at a time. Each element is
//! hydrated in two phases: its attributes are routed onto the object, then
//! its children are classified as property elements (`Parent.Property`) or
//! collection items and dispatched accordingly.

use kiln_model::{ContainerKind, ObjectRef, TypeInfo};

use crate::coerce::RawValue;
use crate::context::HydrationContext;
use crate::error::HydrateError;
use crate::namespaces::{ID_ATTRIBUTE, KEY_ATTRIBUTE, MARKUP_NS, XML_NS, XMLNS_NS};
use crate::reader::{Cursor, Node, StartTag};
use crate::router::set_property;

pub struct Hydrator<'s, 'r> {
    cursor: Cursor<'s>,
    ctx: HydrationContext<'r>,
}

impl<'s, 'r> Hydrator<'s, 'r> {
    pub fn new(src: &'s str, ctx: HydrationContext<'r>) -> Self {
        Self { cursor: Cursor::new(src), ctx }
    }

    /// Hydrate the document root into `existing`, or into a fresh instance
    /// of the root element's type.
    pub fn run(mut self, existing: Option<ObjectRef>) -> Result<ObjectRef, HydrateError> {
        let tag = loop {
            match self.cursor.next_node()? {
                Node::Element(tag) => break tag,
                Node::Whitespace | Node::Text(_) => log::debug!("skipping content before the root element"),
                Node::EndElement { qname } => {
                    return Err(self.cursor.error(format!("unexpected `</{qname}>` before the root element")));
                }
                Node::Eof => return Err(self.cursor.error("document has no root element")),
            }
        };

        let ty = self.resolve(&tag)?;
        let root = match existing {
            Some(object) => {
                debug_assert!(
                    object.type_info().derives_from(ty),
                    "`{}` does not derive from root element type `{}`",
                    object.type_info().name,
                    ty.name
                );
                object
            }
            None => self.construct(ty)?,
        };
        self.hydrate_element(&tag, &root, ty)?;

        loop {
            match self.cursor.next_node()? {
                Node::Eof => break,
                Node::Whitespace => {}
                _ => return Err(self.cursor.error("content after the root element")),
            }
        }
        if !self.ctx.keys.is_empty() {
            log::debug!("{} x:Key declaration(s) never reached a keyed container", self.ctx.keys.len());
        }
        Ok(root)
    }

    // ── Elements ─────────────────────────────────────────────────────────

    fn hydrate_element(&mut self, tag: &StartTag, object: &ObjectRef, ty: &'static TypeInfo) -> Result<(), HydrateError> {
        debug_assert!(object.type_info().derives_from(ty));
        log::debug!("hydrating <{}> as {}", tag.qname, ty.full_name());

        self.apply_attributes(tag, object, ty)?;
        if tag.self_closing {
            return Ok(());
        }

        loop {
            match self.cursor.next_node()? {
                Node::EndElement { qname } => {
                    debug_assert_eq!(qname, tag.qname);
                    return Ok(());
                }
                Node::Element(child) if child.is_property_element() => {
                    let property = self.property_name(tag, &child)?;
                    let pos = self.cursor.position();
                    let value = self.read_property_element(&child)?;
                    set_property(&mut self.ctx, object, ty, &property, value).map_err(|e| e.at(pos))?;
                }
                Node::Element(child) => {
                    let pos = self.cursor.position();
                    let item = self.hydrate_child(&child)?;
                    self.append(object, ty, item).map_err(|e| e.at(pos))?;
                }
                Node::Text(text) => log::debug!("ignoring text {:?} in <{}>", text.trim(), tag.qname),
                Node::Whitespace => {}
                Node::Eof => return Err(self.cursor.error(format!("unexpected end of document inside <{}>", tag.qname))),
            }
        }
    }

    /// Resolve, construct and fully hydrate a nested object element.
    fn hydrate_child(&mut self, tag: &StartTag) -> Result<ObjectRef, HydrateError> {
        let ty = self.resolve(tag)?;
        let object = self.construct(ty)?;
        self.hydrate_element(tag, &object, ty)?;
        Ok(object)
    }

    fn resolve(&self, tag: &StartTag) -> Result<&'static TypeInfo, HydrateError> {
        self.ctx.resolver.resolve(&tag.namespace, &tag.local)
    }

    fn construct(&self, ty: &'static TypeInfo) -> Result<ObjectRef, HydrateError> {
        self.ctx.resolver.construct(ty)
    }

    // ── Attributes ───────────────────────────────────────────────────────

    fn apply_attributes(&mut self, tag: &StartTag, object: &ObjectRef, ty: &'static TypeInfo) -> Result<(), HydrateError> {
        for attr in &tag.attributes {
            match attr.namespace.as_str() {
                "" | MARKUP_NS if attr.local == ID_ATTRIBUTE => {
                    set_property(&mut self.ctx, object, ty, ID_ATTRIBUTE, RawValue::Text(attr.value.clone()))
                        .map_err(|e| e.at(self.cursor.position()))?;
                }
                "" => {
                    log::trace!("{}.{} = {:?}", ty.name, attr.local, attr.value);
                    set_property(&mut self.ctx, object, ty, &attr.local, RawValue::Text(attr.value.clone()))
                        .map_err(|e| e.at(self.cursor.position()))?;
                }
                MARKUP_NS if attr.local == KEY_ATTRIBUTE => self.ctx.keys.declare(object, attr.value.clone()),
                MARKUP_NS | XMLNS_NS | XML_NS => {}
                other => log::debug!("skipping attribute `{}` in foreign namespace `{other}`", attr.qname),
            }
        }
        Ok(())
    }

    // ── Property elements ────────────────────────────────────────────────

    /// `Parent.Property` must name the enclosing element.
    fn property_name(&self, parent: &StartTag, child: &StartTag) -> Result<String, HydrateError> {
        match child.local.rsplit_once('.') {
            Some((owner, property)) if owner == parent.local && !property.is_empty() => Ok(property.to_string()),
            _ => Err(self.cursor.error(format!(
                "property element <{}> does not belong to <{}>",
                child.qname, parent.qname
            ))),
        }
    }

    /// Content of a property element: one nested object, or one text run
    /// (trimmed).
    fn read_property_element(&mut self, tag: &StartTag) -> Result<RawValue, HydrateError> {
        if tag.self_closing {
            return Err(self.cursor.error(format!("property element <{}> is empty", tag.qname)));
        }

        let mut value: Option<RawValue> = None;
        loop {
            match self.cursor.next_node()? {
                Node::EndElement { qname } => {
                    debug_assert_eq!(qname, tag.qname);
                    break;
                }
                Node::Whitespace => {}
                Node::Text(_) | Node::Element(_) if value.is_some() => {
                    return Err(self.cursor.error(format!(
                        "property element <{}> holds more than one value",
                        tag.qname
                    )));
                }
                Node::Text(text) => value = Some(RawValue::Text(text.trim().to_string())),
                Node::Element(child) if child.is_property_element() => {
                    return Err(self.cursor.error(format!(
                        "<{}> cannot appear directly inside property element <{}>",
                        child.qname, tag.qname
                    )));
                }
                Node::Element(child) => value = Some(RawValue::Object(self.hydrate_child(&child)?)),
                Node::Eof => {
                    return Err(self.cursor.error(format!("unexpected end of document inside <{}>", tag.qname)));
                }
            }
        }
        value.ok_or_else(|| self.cursor.error(format!("property element <{}> is empty", tag.qname)))
    }

    // ── Collection syntax ────────────────────────────────────────────────

    fn append(&mut self, parent: &ObjectRef, ty: &'static TypeInfo, item: ObjectRef) -> Result<(), HydrateError> {
        match ty.container_kind() {
            ContainerKind::Items => {
                let mut guard = parent.borrow_mut();
                let items = guard.items_mut().ok_or_else(|| {
                    HydrateError::structure(format!("`{}` is tagged as a container but exposes no items", ty.name))
                })?;
                items.push(item);
                Ok(())
            }
            ContainerKind::Keyed => {
                let key = self.ctx.keys.take(&item).ok_or_else(|| {
                    HydrateError::structure(format!(
                        "`{}` entry of type `{}` has no x:Key",
                        ty.name,
                        item.type_info().name
                    ))
                })?;
                let mut guard = parent.borrow_mut();
                let entries = guard.entries_mut().ok_or_else(|| {
                    HydrateError::structure(format!("`{}` is tagged as keyed but exposes no entries", ty.name))
                })?;
                log::trace!("{}[{key:?}] = {item:?}", ty.name);
                entries.insert(key.clone(), item.clone());
                self.ctx.resources.insert(key, item);
                Ok(())
            }
            ContainerKind::None => Err(HydrateError::structure(format!(
                "`{}` is not a container; <{}> must be wrapped in a property element",
                ty.name,
                item.type_info().name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_model::forms::{ContentPage, Label, ResourceDictionary, StackLayout, CONTENT_PAGE};
    use kiln_model::{Component, TypeRegistry, Value};

    const NS: &str = r#"xmlns="http://kiln.dev/forms" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml""#;

    fn hydrate(src: &str) -> Result<ObjectRef, HydrateError> {
        let reg = TypeRegistry::with_framework();
        Hydrator::new(src, HydrationContext::new(&reg)).run(None)
    }

    // ── Root ─────────────────────────────────────────────────────────────

    #[test]
    fn empty_document_is_a_structure_error() {
        assert!(matches!(hydrate("<?xml version=\"1.0\"?>\n<!-- nothing -->"), Err(HydrateError::Structure(_))));
    }

    #[test]
    fn existing_root_is_filled_in() {
        let reg = TypeRegistry::with_framework();
        let page = CONTENT_PAGE.construct().unwrap();
        let src = format!(r#"<ContentPage {NS} Title="Home"/>"#);
        let out = Hydrator::new(&src, HydrationContext::new(&reg)).run(Some(page.clone())).unwrap();
        assert_eq!(out, page);
        assert_eq!(page.get("Title"), Some(Value::from("Home")));
    }

    #[test]
    fn trailing_elements_are_rejected() {
        assert!(matches!(hydrate("<Label/><Label/>"), Err(HydrateError::Structure(_))));
    }

    // ── Property elements ────────────────────────────────────────────────

    #[test]
    fn property_element_text_is_trimmed() {
        let label = hydrate("<Label><Label.Text>\n  Hello  \n</Label.Text></Label>").unwrap();
        assert_eq!(label.get("Text"), Some(Value::from("Hello")));
    }

    #[test]
    fn property_element_object_keeps_identity() {
        let page = hydrate(&format!(
            r#"<ContentPage {NS}><ContentPage.Content><StackLayout/></ContentPage.Content></ContentPage>"#
        ))
        .unwrap();
        let content = page.with(|p: &ContentPage| p.content().cloned()).flatten().unwrap();
        assert!(content.is::<StackLayout>());
        assert_eq!(page.get("Content"), Some(Value::Object(content)));
    }

    #[test]
    fn property_element_shape_errors() {
        for src in [
            "<Label><Label.Text/></Label>",
            "<Label><Label.Text>  </Label.Text></Label>",
            "<Label><Label.Text>a<Label/></Label.Text></Label>",
            "<ContentPage><ContentPage.Content><Label/><Label/></ContentPage.Content></ContentPage>",
            "<Label><Label.Text><Label.Text>a</Label.Text></Label.Text></Label>",
            "<Label><Entry.Text>a</Entry.Text></Label>",
        ] {
            assert!(matches!(hydrate(src), Err(HydrateError::Structure(_))), "{src}");
        }
    }

    // ── Collections ──────────────────────────────────────────────────────

    #[test]
    fn items_keep_document_order() {
        let stack = hydrate(r#"<StackLayout><Label Text="a"/><Entry/><Label Text="b"/></StackLayout>"#).unwrap();
        let names: Vec<&str> = stack
            .with(|s: &StackLayout| s.children().iter().map(|c| c.type_info().name).collect())
            .unwrap();
        assert_eq!(names, ["Label", "Entry", "Label"]);
    }

    #[test]
    fn keyed_entries_use_x_key() {
        let dict = hydrate(&format!(
            r#"<ResourceDictionary {NS}><Label x:Key="one" Text="1"/><Label x:Key="two"/></ResourceDictionary>"#
        ))
        .unwrap();
        let keys: Vec<String> = dict
            .with(|d: &ResourceDictionary| d.entries().map(|e| e.keys().cloned().collect()))
            .flatten()
            .unwrap();
        assert_eq!(keys, ["one", "two"]);
        let one = dict.with(|d: &ResourceDictionary| d.get("one").cloned()).flatten().unwrap();
        assert_eq!(one.get("Text"), Some(Value::from("1")));
    }

    #[test]
    fn keyed_entry_without_key_fails() {
        assert!(matches!(
            hydrate("<ResourceDictionary><Label/></ResourceDictionary>"),
            Err(HydrateError::Structure(_))
        ));
    }

    #[test]
    fn children_of_non_containers_fail() {
        assert!(matches!(hydrate("<Label><Label/></Label>"), Err(HydrateError::Structure(_))));
    }

    // ── Attributes ───────────────────────────────────────────────────────

    #[test]
    fn markup_attributes_are_not_properties() {
        let label = hydrate(&format!(r#"<Label {NS} x:Class="A.B" x:Name="n" Text="hi"/>"#)).unwrap();
        assert_eq!(label.with(|l: &Label| l.text().map(str::to_string)).flatten().as_deref(), Some("hi"));
    }

    #[test]
    fn attribute_errors_carry_a_position() {
        let Err(HydrateError::Structure(msg)) = hydrate("<StackLayout>\n  <Label FontSize=\"big\"/>\n</StackLayout>") else {
            panic!("expected structure error");
        };
        assert!(msg.ends_with("(at 2:3)"), "{msg}");
    }
}
