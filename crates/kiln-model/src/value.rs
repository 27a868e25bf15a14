use std::fmt;

use crate::binding::BindingContext;
use crate::object::ObjectRef;

// ── EnumInfo ──────────────────────────────────────────────────────────────

/// A closed set of named members, e.g. `LayoutOptions { Start, Center, End, Fill }`.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumInfo {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

impl EnumInfo {
    /// Canonical member for `name`. Matching is case-sensitive.
    pub fn member(&self, name: &str) -> Option<&'static str> {
        self.members.iter().copied().find(|m| *m == name)
    }
}

// ── ValueKind ─────────────────────────────────────────────────────────────

/// What a property accepts. Every property descriptor carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Str,
    Int,
    Float,
    Bool,
    Enum(&'static EnumInfo),
    /// Any value, including nested objects.
    Object,
    /// Row records for an items source, one binding context per row.
    List,
}

impl ValueKind {
    /// Whether `value` can be stored under this kind without conversion.
    pub fn admits(self, value: &Value) -> bool {
        match (self, value) {
            (ValueKind::Object, _) => true,
            (ValueKind::Str, Value::Str(_)) => true,
            (ValueKind::Int, Value::Int(_)) => true,
            (ValueKind::Float, Value::Float(_)) => true,
            (ValueKind::Bool, Value::Bool(_)) => true,
            (ValueKind::Enum(info), Value::Enum(m)) => info.member(m).is_some(),
            (ValueKind::List, Value::List(_)) => true,
            _ => false,
        }
    }

    /// `value` shaped for this kind, or `None` if it does not fit. Integers
    /// widen to floats and a string naming an enum member becomes that member.
    pub fn adapt(self, value: Value) -> Option<Value> {
        match (self, value) {
            (ValueKind::Float, Value::Int(v)) => Some(Value::Float(v as f64)),
            (ValueKind::Enum(info), Value::Str(s)) => info.member(&s).map(Value::Enum),
            (kind, value) => kind.admits(&value).then_some(value),
        }
    }
}

// ── Value ─────────────────────────────────────────────────────────────────

/// A property value as stored on an object.
#[derive(Clone)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Canonical member name taken from the property's [`EnumInfo`].
    Enum(&'static str),
    Object(ObjectRef),
    List(Vec<BindingContext>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&'static str> {
        match self {
            Value::Enum(m) => Some(*m),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[BindingContext]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Objects compare by identity, everything else by value.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Enum(m) => write!(f, "{m}"),
            Value::Object(o) => write!(f, "{o:?}"),
            Value::List(items) => write!(f, "[{} rows]", items.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<BindingContext>> for Value {
    fn from(items: Vec<BindingContext>) -> Self {
        Value::List(items)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static COLORS: EnumInfo = EnumInfo { name: "Color", members: &["Red", "Green"] };

    #[test]
    fn enum_member_is_case_sensitive() {
        assert_eq!(COLORS.member("Red"), Some("Red"));
        assert_eq!(COLORS.member("red"), None);
    }

    #[test]
    fn object_kind_admits_anything() {
        assert!(ValueKind::Object.admits(&Value::Int(3)));
        assert!(ValueKind::Object.admits(&Value::from("x")));
    }

    #[test]
    fn scalar_kinds_reject_other_shapes() {
        assert!(!ValueKind::Int.admits(&Value::Float(1.0)));
        assert!(!ValueKind::Str.admits(&Value::Bool(true)));
        assert!(ValueKind::Enum(&COLORS).admits(&Value::Enum("Green")));
        assert!(!ValueKind::Enum(&COLORS).admits(&Value::Enum("Blue")));
    }

    #[test]
    fn adapt_widens_and_names_members() {
        assert_eq!(ValueKind::Float.adapt(Value::Int(2)), Some(Value::Float(2.0)));
        assert_eq!(ValueKind::Enum(&COLORS).adapt(Value::from("Red")), Some(Value::Enum("Red")));
        assert_eq!(ValueKind::Enum(&COLORS).adapt(Value::from("red")), None);
        assert_eq!(ValueKind::Float.adapt(Value::from("huge")), None);
        assert_eq!(ValueKind::Str.adapt(Value::from("ok")), Some(Value::from("ok")));
    }
}
