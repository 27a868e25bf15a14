use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use kiln_xaml::namespaces::{CLASS_ATTRIBUTE, ID_ATTRIBUTE, MARKUP_NS, is_framework};
use kiln_xaml::reader::{Cursor, Node, StartTag};
use kiln_xaml::parse_xmlns;

use crate::error::GenError;

// ── Model ─────────────────────────────────────────────────────────────────

/// One named element below the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Id as written in markup; the lookup key at runtime.
    pub id: String,
    /// Rust field name derived from the id.
    pub name: String,
    /// Rust path of the element's type.
    pub type_path: String,
}

/// Everything needed to emit accessors for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stub {
    /// Dotted namespace of the code-behind class, if it has one.
    pub namespace: Option<String>,
    pub class: String,
    pub fields: Vec<Field>,
}

impl Stub {
    /// Scan `text`. `Ok(None)` when the root declares no `x:Class`.
    pub fn scan(text: &str) -> Result<Option<Self>, GenError> {
        let mut cursor = Cursor::new(text);
        let root = loop {
            match cursor.next_node()? {
                Node::Element(tag) => break tag,
                Node::Eof => return Err(GenError::NoRoot),
                _ => {}
            }
        };
        let Some(class_attr) = root.attribute(MARKUP_NS, CLASS_ATTRIBUTE) else {
            log::debug!("<{}> declares no x:Class; nothing to generate", root.qname);
            return Ok(None);
        };
        let decl = parse_xmlns(&class_attr.value)?;
        let class = decl
            .type_name
            .ok_or_else(|| GenError::InvalidClass(class_attr.value.clone()))?;
        let namespace = decl.namespace;

        let mut ids: IndexMap<String, Field> = IndexMap::new();
        loop {
            match cursor.next_node()? {
                Node::Eof => break,
                Node::Element(tag) if !tag.is_property_element() => {
                    let Some(id) = element_id(&tag) else { continue };
                    let field = Field {
                        id: id.to_string(),
                        name: field_name(id)?,
                        type_path: type_path(&tag, namespace.as_deref())?,
                    };
                    if let Some(old) = ids.insert(field.id.clone(), field) {
                        log::warn!("Id `{}` appears more than once; replacing the earlier `{}`", old.id, old.type_path);
                    }
                }
                _ => {}
            }
        }

        let fields: Vec<Field> = ids.into_values().collect();
        check_field_names(&fields)?;
        Ok(Some(Self { namespace, class, fields }))
    }

    /// Name of the generated struct.
    pub fn struct_name(&self) -> String {
        format!("{}Elements", self.class)
    }

    pub fn full_class(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.class),
            None => self.class.clone(),
        }
    }
}

fn element_id(tag: &StartTag) -> Option<&str> {
    tag.attribute("", ID_ATTRIBUTE)
        .or_else(|| tag.attribute(MARKUP_NS, ID_ATTRIBUTE))
        .map(|a| a.value.as_str())
}

/// Distinct ids can fold to the same snake_case name.
fn check_field_names(fields: &[Field]) -> Result<(), GenError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for field in fields {
        if let Some(first) = seen.insert(&field.name, &field.id) {
            return Err(GenError::FieldCollision {
                first: first.to_string(),
                second: field.id.clone(),
                field: field.name.clone(),
            });
        }
    }
    Ok(())
}

/// `NameEntry` -> `name_entry`, `Text0` -> `text0`.
fn field_name(id: &str) -> Result<String, GenError> {
    let mut chars = id.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(GenError::InvalidId(id.to_string()));
    }

    let mut out = String::with_capacity(id.len() + 4);
    let mut prev_lower = false;
    for c in id.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    // `self`, `super` and `crate` cannot be raw identifiers.
    if matches!(out.as_str(), "self" | "super" | "crate") {
        out.push('_');
    } else if is_keyword(&out) {
        out.insert_str(0, "r#");
    }
    Ok(out)
}

fn is_keyword(s: &str) -> bool {
    matches!(
        s,
        "as" | "break" | "const" | "continue" | "else" | "enum" | "extern" | "false" | "fn" | "for"
            | "if" | "impl" | "in" | "let" | "loop" | "match" | "mod" | "move" | "mut" | "pub" | "ref"
            | "return" | "static" | "struct" | "trait" | "true" | "type" | "unsafe" | "use" | "where"
            | "while" | "async" | "await" | "dyn" | "gen"
    )
}

/// Framework elements map to `kiln_model::forms`. Foreign namespaces map
/// relative to the code-behind namespace, which is taken as the crate root:
/// with class namespace `Kiln.Sample`, `Kiln.Sample.Widgets` becomes
/// `crate::widgets`. Unrelated namespaces become lowercase paths.
fn type_path(tag: &StartTag, class_ns: Option<&str>) -> Result<String, GenError> {
    if is_framework(&tag.namespace) {
        return Ok(format!("::kiln_model::forms::{}", tag.local));
    }
    let decl = parse_xmlns(&tag.namespace)?;
    let ns = decl.namespace.unwrap_or_default();
    let relative = match class_ns {
        Some(root) if ns == root => Some(""),
        Some(root) => ns.strip_prefix(root).and_then(|rest| rest.strip_prefix('.')),
        None => None,
    };
    let segments = |s: &str| -> String {
        s.split('.')
            .filter(|seg| !seg.is_empty())
            .map(|seg| format!("{}::", seg.to_ascii_lowercase()))
            .collect()
    };
    Ok(match relative {
        Some(rest) => format!("crate::{}{}", segments(rest), tag.local),
        None => format!("::{}{}", segments(&ns), tag.local),
    })
}

// ── Rendering ─────────────────────────────────────────────────────────────

impl fmt::Display for Stub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.struct_name();
        writeln!(f, "// Generated by kiln-gen. Do not edit.")?;
        writeln!(f)?;
        writeln!(f, "/// Named elements of `{}`.", self.full_class())?;
        writeln!(f, "#[derive(Debug, Clone)]")?;
        writeln!(f, "pub struct {name} {{")?;
        for field in &self.fields {
            writeln!(f, "    pub {}: ::kiln_model::Handle<{}>,", field.name, field.type_path)?;
        }
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "impl {name} {{")?;
        writeln!(f, "    /// Look up every named element below a hydrated root.")?;
        writeln!(
            f,
            "    pub fn initialize_component(root: &::kiln_model::ObjectRef) -> ::std::result::Result<Self, ::kiln_xaml::HydrateError> {{"
        )?;
        if self.fields.is_empty() {
            writeln!(f, "        let _ = root;")?;
        }
        writeln!(f, "        Ok(Self {{")?;
        for field in &self.fields {
            writeln!(
                f,
                "            {}: ::kiln_xaml::find_by_id_as(root, {:?})?,",
                field.name, field.id
            )?;
        }
        writeln!(f, "        }})")?;
        writeln!(f, "    }}")?;
        writeln!(f, "}}")
    }
}
