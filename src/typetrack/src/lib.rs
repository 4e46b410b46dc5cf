#![allow(clippy::new_without_default)]

pub mod container;
pub mod key;
pub mod module;
pub mod provider;
pub mod tracking;
mod util;

pub mod prelude {
    pub use crate::container::extension::{Extension, ExtensionError};
    pub use crate::container::injector::{Injector, InjectorError, TypedInjector};
    pub use crate::container::registry::{Configurer, RegistryError};
    pub use crate::container::{Container, Lifetime};
    pub use crate::key::{self, Name};
    pub use crate::module::{bind, Configuration, Module};
    pub use crate::provider::component::Component;
    pub use crate::tracking::{Tracking, TrackingExt, TypeTrackingExtension};
}
