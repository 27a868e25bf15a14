use std::any::Any;

use kiln_model::{Component, ContainerKind, ObjectRef, TypeInfo, Value, ValueConverter};

pub static UPPER_CASE_CONVERTER: TypeInfo = TypeInfo {
    module: crate::MODULE,
    namespace: crate::NAMESPACE,
    name: "UpperCaseConverter",
    base: None,
    managed: false,
    container: ContainerKind::None,
    properties: &[],
    constructor: Some(new_upper_case_converter),
};

fn new_upper_case_converter() -> ObjectRef {
    ObjectRef::new(UpperCaseConverter)
}

/// Upper-cases text; other values pass through.
#[derive(Debug, Default)]
pub struct UpperCaseConverter;

impl ValueConverter for UpperCaseConverter {
    fn convert(&self, value: Value) -> Value {
        match value {
            Value::Str(s) => Value::Str(s.to_uppercase()),
            other => other,
        }
    }
}

impl Component for UpperCaseConverter {
    fn type_info(&self) -> &'static TypeInfo {
        &UPPER_CASE_CONVERTER
    }

    fn as_converter(&self) -> Option<&dyn ValueConverter> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_cases_text_only() {
        let c = UpperCaseConverter;
        assert_eq!(c.convert(Value::from("kiln")), Value::from("KILN"));
        assert_eq!(c.convert(Value::Int(3)), Value::Int(3));
    }
}
