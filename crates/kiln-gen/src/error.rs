use kiln_xaml::HydrateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("document has no root element")]
    NoRoot,

    #[error("x:Class `{0}` does not name a type")]
    InvalidClass(String),

    #[error("Id `{0}` is not a valid Rust identifier")]
    InvalidId(String),

    #[error("Ids `{first}` and `{second}` both map to field `{field}`")]
    FieldCollision { first: String, second: String, field: String },

    #[error(transparent)]
    Markup(#[from] HydrateError),
}
