use thiserror::Error;

use crate::value::ValueKind;

/// Failures reported by the object model itself: registry validation at
/// startup, and plain setters rejecting a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("module `{0}` is already registered")]
    DuplicateModule(String),

    #[error("type `{namespace}.{name}` is registered twice in module `{module}`")]
    DuplicateType {
        module: String,
        namespace: &'static str,
        name: &'static str,
    },

    #[error("type `{type_name}` declares module `{declared}` but was registered in `{module}`")]
    ModuleMismatch {
        type_name: &'static str,
        declared: &'static str,
        module: String,
    },

    #[error("property `{property}` is declared more than once along the hierarchy of `{type_name}`")]
    DuplicateProperty {
        type_name: &'static str,
        property: &'static str,
    },

    #[error("`{type_name}` has no plain property `{property}`")]
    NoPlainProperty {
        type_name: &'static str,
        property: String,
    },

    #[error("`{type_name}.{property}` expects {expected:?}")]
    ValueMismatch {
        type_name: &'static str,
        property: &'static str,
        expected: ValueKind,
    },
}
