use kiln_model::{ObjectRef, Value, ValueKind};

use crate::error::HydrateError;

/// A property value as it comes out of markup: attribute or element text,
/// or a nested object.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Object(ObjectRef),
}

impl RawValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            RawValue::Object(_) => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<ObjectRef> for RawValue {
    fn from(o: ObjectRef) -> Self {
        RawValue::Object(o)
    }
}

/// Convert `raw` to the kind `property` declares.
///
/// Numbers use Rust's `parse`, booleans accept `true`/`True`/`false`/`False`
/// and enum members match case-sensitively. `Object` properties take
/// anything, text included.
pub fn coerce(raw: RawValue, kind: ValueKind, property: &str) -> Result<Value, HydrateError> {
    let text = match (raw, kind) {
        (RawValue::Object(o), ValueKind::Object) => return Ok(Value::Object(o)),
        (RawValue::Text(s), ValueKind::Object | ValueKind::Str) => return Ok(Value::Str(s)),
        (RawValue::Object(o), _) => {
            return Err(HydrateError::structure(format!(
                "`{property}` expects {}, got a `{}` object",
                describe(kind),
                o.type_info().name
            )));
        }
        (RawValue::Text(s), _) => s,
    };

    let trimmed = text.trim();
    let parsed = match kind {
        ValueKind::Int => trimmed.parse().ok().map(Value::Int),
        ValueKind::Float => trimmed.parse().ok().map(Value::Float),
        ValueKind::Bool => match trimmed {
            "true" | "True" => Some(Value::Bool(true)),
            "false" | "False" => Some(Value::Bool(false)),
            _ => None,
        },
        ValueKind::Enum(info) => info.member(trimmed).map(Value::Enum),
        ValueKind::Str | ValueKind::Object => Some(Value::Str(text.clone())),
        ValueKind::List => None,
    };
    parsed.ok_or_else(|| {
        let hint = match kind {
            ValueKind::Enum(info) => format!(" (one of {})", info.members.join(", ")),
            _ => String::new(),
        };
        HydrateError::structure(format!(
            "`{property}` expects {}, got `{text}`{hint}",
            describe(kind)
        ))
    })
}

fn describe(kind: ValueKind) -> String {
    match kind {
        ValueKind::Str => "text".into(),
        ValueKind::Int => "an integer".into(),
        ValueKind::Float => "a number".into(),
        ValueKind::Bool => "a boolean".into(),
        ValueKind::Enum(info) => format!("a `{}` member", info.name),
        ValueKind::Object => "an object".into(),
        ValueKind::List => "a bound list".into(),
    }
}
