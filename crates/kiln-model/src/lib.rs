//! Object model consumed by the kiln markup hydrator.
//!
//! The hydrator never reflects over Rust types. Everything it needs is
//! declared up front:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | `TypeInfo`, `PropertyInfo`, `ManagedProperty`, `ContainerKind` |
//! | [`object`] | `Component` capability trait, `ObjectRef`, `Handle` |
//! | [`binding`] | `PropertyStore`, `Binding`, `BindingMode`, `BindingContext`, `ValueConverter` |
//! | [`value`] | `Value`, `ValueKind`, `EnumInfo` |
//! | [`registry`] | `Module`, `TypeRegistry`, embedded resources |
//! | [`forms`] | built-in framework types (`Label`, `StackLayout`, `ContentPage`, ...) |
//! | [`logging`] | `env_logger` setup for binaries |
//!
//! # Quick start
//!
//! ```rust
//! use kiln_model::forms::{LABEL, LABEL_TEXT, Label};
//! use kiln_model::{Binding, BindingContext, Value};
//!
//! let label = LABEL.construct().unwrap();
//! label.with_mut(|l: &mut Label| l.store_mut().set_binding(&LABEL_TEXT, Binding::new("Name")));
//! label.set_binding_context(&BindingContext::new().with("Name", "Ada"));
//! assert_eq!(label.get("Text"), Some(Value::from("Ada")));
//! ```

pub mod binding;
pub mod error;
pub mod forms;
pub mod logging;
pub mod object;
pub mod registry;
pub mod types;
pub mod value;

pub use binding::{Binding, BindingContext, BindingMode, PropertyStore, ValueConverter};
pub use error::ModelError;
pub use object::{Component, Handle, ObjectId, ObjectRef};
pub use registry::{EmbeddedResource, Module, TypeRegistry};
pub use types::{ContainerKind, ManagedProperty, PropertyInfo, TypeInfo};
pub use value::{EnumInfo, Value, ValueKind};
