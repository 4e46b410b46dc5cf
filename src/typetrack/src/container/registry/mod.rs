mod configurer;
mod provider_map;

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use snafu::prelude::*;

use crate::container::events::RegistrationKind;
use crate::key::{Key, Name, TypeKey};
use crate::provider::{TypedProvider, TypedSharedProvider};

pub(super) use configurer::ConfigurerImpl;
pub(super) use provider_map::{ProviderEntry, ProviderMap};

/// Receives the registrations made by a [`Module`].
///
/// Registrations go through [`TypedConfigurer`], which every [`Configurer`]
/// implements, or more conveniently through the [`dsl`].
///
/// [`Module`]: crate::module::Module
/// [`dsl`]: crate::module::dsl
pub trait Configurer {
    #[doc(hidden)]
    #[allow(private_interfaces)]
    fn as_private(&mut self) -> &mut dyn ConfigurerPrivate;

    fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>);
}

trait ConfigurerPrivate {
    fn dyn_register(&mut self, entry: ProviderEntry);
}

pub trait TypedConfigurer: Configurer {
    /// Registers a provider whose objects are constructed on every request.
    fn register<P>(&mut self, name: impl Into<Name>, kind: RegistrationKind, provider: P)
    where
        P: TypedProvider,
    {
        let key = Key::new(TypeKey::of::<P::Output>(), name);
        self.as_private()
            .dyn_register(ProviderEntry::new_transient(key, kind, Arc::new(provider)));
    }

    /// Registers a provider whose object is constructed once and shared.
    fn register_singleton<P>(&mut self, name: impl Into<Name>, kind: RegistrationKind, provider: P)
    where
        P: TypedSharedProvider,
    {
        let key = Key::new(TypeKey::of::<P::Output>(), name);
        self.as_private()
            .dyn_register(ProviderEntry::new_singleton(key, kind, Arc::new(provider)));
    }
}

impl<T: Configurer + ?Sized> TypedConfigurer for T {}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum RegistryError {
    #[snafu(display("module {module} fails to setup the configuration"))]
    #[non_exhaustive]
    ModuleInner {
        module: &'static str,
        source: Box<dyn Error + Send + Sync>,
    },
    #[snafu(display("aggregated registry errors:\n{}", AggregatedDisplayer::new(errors)))]
    Aggregated { errors: Vec<RegistryError> },
}

struct AggregatedDisplayer<'a> {
    errors: &'a [RegistryError],
}

impl<'a> AggregatedDisplayer<'a> {
    fn new(errors: &'a [RegistryError]) -> Self {
        Self { errors }
    }
}

impl Display for AggregatedDisplayer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "{:4}: {}", i + 1, error)?;
        }
        Ok(())
    }
}
