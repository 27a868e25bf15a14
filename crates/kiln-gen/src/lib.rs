//! Offline generator for typed element accessors.
//!
//! For a markup document whose root declares `x:Class`, every element below
//! the root carrying an `Id` (or `x:Id`) becomes a `Handle<T>` field of a
//! generated `<Class>Elements` struct, filled in at runtime by
//! `initialize_component(root)`. The output is meant to be pulled in with
//! `include!`.

pub mod error;
pub mod job;
pub mod stub;

pub use error::GenError;
pub use job::Job;
pub use stub::{Field, Stub};

/// Generate accessor source for `text`. Empty when the root declares no
/// `x:Class`.
pub fn generate(text: &str) -> Result<String, GenError> {
    Ok(Stub::scan(text)?.map(|stub| stub.to_string()).unwrap_or_default())
}
