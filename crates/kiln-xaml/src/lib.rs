//! Markup hydrator for the kiln object model.
//!
//! A document is read once, front to back, and turned into a live tree of
//! [`kiln_model`] objects. Element names resolve to registered types,
//! attributes and `Parent.Property` elements become property values, other
//! child elements are appended to their container, and `{Binding ...}`
//! values are attached as deferred bindings.
//!
//! ```xml
//! <ContentPage xmlns="http://kiln.dev/forms"
//!              xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml"
//!              xmlns:local="clr-namespace:Kiln.Sample;assembly=Kiln.Sample"
//!              x:Class="Kiln.Sample.CustomPage">
//!   <ContentPage.Resources>
//!     <ResourceDictionary>
//!       <local:UpperCaseConverter x:Key="upper"/>
//!     </ResourceDictionary>
//!   </ContentPage.Resources>
//!   <ContentPage.Content>
//!     <StackLayout>
//!       <Label Id="Greeting" Text="{Binding Name, Converter={StaticResource upper}}"/>
//!     </StackLayout>
//!   </ContentPage.Content>
//! </ContentPage>
//! ```
//!
//! Start with [`XamlLoader`].

pub mod binding;
pub mod coerce;
pub mod context;
pub mod error;
pub mod hydrator;
pub mod locate;
pub mod lookup;
pub mod namespaces;
pub mod reader;
pub mod resolver;
pub mod router;

mod loader;

pub use binding::{parse_binding, BindingExpr};
pub use coerce::{coerce, RawValue};
pub use context::{HydrationContext, KeyTable, ResourceTable};
pub use error::HydrateError;
pub use hydrator::Hydrator;
pub use loader::XamlLoader;
pub use locate::locate;
pub use lookup::{find_by_id, find_by_id_as};
pub use namespaces::{parse_xmlns, XmlnsDecl};
pub use resolver::TypeResolver;
