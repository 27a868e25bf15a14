use kiln_model::ModelError;
use thiserror::Error;

/// Every way a hydration pass can fail. Any of these aborts the pass; no
/// partially built tree is handed back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HydrateError {
    /// Namespace, module or type lookup failed, or the type has no default
    /// constructor.
    #[error("cannot resolve `{name}` in `{namespace}`: {reason}")]
    Resolution {
        namespace: String,
        name: String,
        reason: String,
    },

    /// Malformed binding expression or namespace declaration.
    #[error("malformed `{input}`: {message}")]
    Syntax { input: String, message: String },

    /// The document's shape does not fit the attribute / property-element /
    /// collection grammar.
    #[error("markup structure error: {0}")]
    Structure(String),

    #[error("`{type_name}` has no property `{property}`")]
    PropertyNotFound { type_name: String, property: String },

    #[error("cannot bind `{type_name}.{property}`: not a managed property")]
    Binding { type_name: String, property: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl HydrateError {
    pub(crate) fn resolution(namespace: &str, name: &str, reason: impl Into<String>) -> Self {
        Self::Resolution {
            namespace: namespace.to_string(),
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn syntax(input: &str, message: impl Into<String>) -> Self {
        Self::Syntax { input: input.to_string(), message: message.into() }
    }

    pub(crate) fn structure(message: impl Into<String>) -> Self {
        Self::Structure(message.into())
    }

    /// Attach a source position to structure errors raised away from the cursor.
    pub(crate) fn at(self, (line, col): (usize, usize)) -> Self {
        match self {
            Self::Structure(msg) => Self::Structure(format!("{msg} (at {line}:{col})")),
            other => other,
        }
    }
}
