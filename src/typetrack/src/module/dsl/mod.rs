//! A builder for registrations.
//!
//! ```rust
//! # use std::sync::Arc;
//! # use std::error::Error;
//! # use typetrack::prelude::*;
//! struct Greetings;
//!
//! impl Module for Greetings {
//!     fn configure(
//!         &self,
//!         configurer: &mut dyn Configurer,
//!     ) -> Result<(), Box<dyn Error + Send + Sync>> {
//!         bind::<String>().to_instance(String::from("hello")).set_on(configurer);
//!         bind::<Arc<String>>()
//!             .named("shared")
//!             .to_closure(|injector| {
//!                 let greeting: String = injector.resolve()?;
//!                 Ok(Ok::<_, std::convert::Infallible>(Arc::new(greeting)))
//!             })
//!             .in_singleton()
//!             .set_on(configurer);
//!         Ok(())
//!     }
//! }
//! ```

mod instance_helper;
mod metadata_helper;
mod provider_helper;

pub use instance_helper::InstanceBinding;
pub use metadata_helper::Binding;
pub use provider_helper::ProviderBinding;

use crate::container::Managed;

/// The lifetime a binding is registered with.
#[allow(private_bounds)]
pub trait ToLifetime: Sealed {}

/// Marks a binding constructing a new object on every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transient;

/// Marks a binding whose object is constructed once and shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct Singleton;

impl ToLifetime for Transient {}

impl ToLifetime for Singleton {}

trait Sealed {}

impl Sealed for Transient {}

impl Sealed for Singleton {}

/// Starts a binding of `T` under the default name.
pub fn bind<T>() -> Binding<T>
where
    T: Managed,
{
    Binding::new(Default::default())
}
