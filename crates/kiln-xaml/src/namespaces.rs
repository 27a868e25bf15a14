//! Namespace identifiers and foreign namespace declarations.

use crate::error::HydrateError;

/// Elements in this namespace resolve against the built-in framework types.
pub const FRAMEWORK_NS: &str = "http://kiln.dev/forms";
/// Markup metadata (`x:Class`, `x:Key`, ...).
pub const MARKUP_NS: &str = "http://schemas.microsoft.com/winfx/2006/xaml";
/// Namespace of `xmlns` / `xmlns:*` declaration attributes.
pub const XMLNS_NS: &str = "http://www.w3.org/2000/xmlns/";
/// Bound to the reserved `xml:` prefix.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// The reserved key attribute, under [`MARKUP_NS`].
pub const KEY_ATTRIBUTE: &str = "Key";
/// The code-behind class attribute, under [`MARKUP_NS`].
pub const CLASS_ATTRIBUTE: &str = "Class";
/// Element identifier, as a plain attribute or under the markup namespace.
pub const ID_ATTRIBUTE: &str = "Id";

const NAMESPACE_PREFIX: &str = "clr-namespace:";
const MODULE_PREFIX: &str = "assembly=";

/// Whether `namespace` maps onto the framework's own types.
pub fn is_framework(namespace: &str) -> bool {
    matches!(namespace, FRAMEWORK_NS | MARKUP_NS | "")
}

/// A parsed foreign namespace declaration such as
/// `clr-namespace:Kiln.Sample.Widgets;assembly=Kiln.Sample`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlnsDecl {
    pub namespace: Option<String>,
    /// Set when a bare dotted segment names a type (`Kiln.Sample.CustomPage`).
    pub type_name: Option<String>,
    pub module: Option<String>,
}

/// Split a declaration into at most three `;`-separated segments.
///
/// A `clr-namespace:` segment names the namespace, an `assembly=` segment the
/// module. Any other segment is a dotted `namespace.TypeName` split at its
/// last dot (or a bare type name without one). The same rules parse
/// `x:Class` values.
pub fn parse_xmlns(decl: &str) -> Result<XmlnsDecl, HydrateError> {
    let segments: Vec<&str> = decl.split(';').collect();
    if segments.len() > 3 {
        return Err(HydrateError::syntax(decl, "at most three `;`-separated segments are allowed"));
    }

    let mut out = XmlnsDecl::default();
    for segment in segments {
        let segment = segment.trim();
        if let Some(ns) = segment.strip_prefix(NAMESPACE_PREFIX) {
            if ns.is_empty() {
                return Err(HydrateError::syntax(decl, "empty `clr-namespace:` segment"));
            }
            out.namespace = Some(ns.to_string());
        } else if let Some(module) = segment.strip_prefix(MODULE_PREFIX) {
            if module.is_empty() {
                return Err(HydrateError::syntax(decl, "empty `assembly=` segment"));
            }
            out.module = Some(module.to_string());
        } else if segment.is_empty() {
            return Err(HydrateError::syntax(decl, "empty segment"));
        } else {
            match segment.rfind('.') {
                Some(dot) if dot > 0 => {
                    out.namespace = Some(segment[..dot].to_string());
                    out.type_name = Some(segment[dot + 1..].to_string());
                }
                _ => out.type_name = Some(segment.to_string()),
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(s: &str) -> XmlnsDecl {
        parse_xmlns(s).unwrap()
    }

    #[test]
    fn framework_namespaces() {
        assert!(is_framework(FRAMEWORK_NS));
        assert!(is_framework(MARKUP_NS));
        assert!(is_framework(""));
        assert!(!is_framework("clr-namespace:Foo"));
    }

    #[test]
    fn clr_namespace_with_module() {
        let d = ok("clr-namespace:Kiln.Sample.Widgets;assembly=Kiln.Sample");
        assert_eq!(d.namespace.as_deref(), Some("Kiln.Sample.Widgets"));
        assert_eq!(d.module.as_deref(), Some("Kiln.Sample"));
        assert_eq!(d.type_name, None);
    }

    #[test]
    fn clr_namespace_without_module() {
        let d = ok("clr-namespace:Kiln.Sample");
        assert_eq!(d.namespace.as_deref(), Some("Kiln.Sample"));
        assert_eq!(d.module, None);
    }

    #[test]
    fn dotted_class_name_splits_at_last_dot() {
        let d = ok("Kiln.Sample.CustomPage");
        assert_eq!(d.namespace.as_deref(), Some("Kiln.Sample"));
        assert_eq!(d.type_name.as_deref(), Some("CustomPage"));
    }

    #[test]
    fn bare_type_name() {
        let d = ok("CustomPage");
        assert_eq!(d.namespace, None);
        assert_eq!(d.type_name.as_deref(), Some("CustomPage"));
    }

    #[test]
    fn too_many_segments() {
        assert!(matches!(parse_xmlns("a;b;c;d"), Err(HydrateError::Syntax { .. })));
    }

    #[test]
    fn empty_segments() {
        assert!(parse_xmlns("clr-namespace:;assembly=X").is_err());
        assert!(parse_xmlns("clr-namespace:X;assembly=").is_err());
        assert!(parse_xmlns("clr-namespace:X;;assembly=Y").is_err());
    }
}
