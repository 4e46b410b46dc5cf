mod context;
mod proxy;

use std::error::Error;
use std::sync::Arc;

use snafu::prelude::*;

use crate::container::Managed;
use crate::key::{self, Key, Name, TypeKey};
use crate::util::any::Downcast;

pub use context::{CallContext, InjectionTrace};
pub(crate) use proxy::ContextForwardingInjectorProxy;

/// The type-erased resolve contract of a container.
///
/// [`Injector::named_keys`] must only report keys with a non-default name,
/// in the order they were registered. The bulk resolution built on top of it
/// ([`TypedInjector::resolve_all_named`]) relies on that and never yields the
/// default registration.
#[cfg_attr(test, mockall::automock)]
pub trait Injector: Send + Sync {
    fn dyn_get(&self, key: &Key) -> Result<Box<dyn Managed>, InjectorError>;

    fn dyn_get_dependency<'a>(
        &self,
        key: &Key,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, InjectorError>;

    fn named_keys(&self, target: TypeKey) -> Vec<Key>;
}

pub trait TypedInjector: Injector {
    fn get<T>(&self, key: &Key) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        match self.dyn_get(key)?.downcast::<T>() {
            Ok(object) => Ok(*object),
            Err(_) => unreachable!("the object's type should be `T`"),
        }
    }

    /// Resolves the default registration of `T`.
    fn resolve<T>(&self) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        self.get(&key::of::<T>())
    }

    /// Resolves the registration of `T` with the given name.
    fn resolve_named<T>(&self, name: impl Into<Name>) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        self.get(&key::named::<T>(name))
    }

    /// Resolves every named registration of `T` in registration order. The
    /// default registration is never part of the result.
    fn resolve_all_named<T>(&self) -> Result<Vec<T>, InjectorError>
    where
        T: Managed,
    {
        self.named_keys(TypeKey::of::<T>())
            .iter()
            .filter(|key| !key.is_default())
            .map(|key| self.get(key))
            .collect()
    }
}

impl<T> TypedInjector for T where T: Injector {}

impl TypedInjector for dyn Injector + '_ {}

#[derive(Debug, Clone, Snafu)]
#[non_exhaustive]
pub enum InjectorError {
    #[snafu(display("could not find the object identified by the given key {key}"))]
    #[non_exhaustive]
    NotFound { key: Key },
    #[snafu(display("could not construct the object {key} which depends on itself somehow"))]
    #[non_exhaustive]
    CyclicDependency { key: Key },
    #[snafu(display("could not construct the object {key}"))]
    #[non_exhaustive]
    ObjectConstruction {
        key: Key,
        source: Arc<dyn Error + Send + Sync>,
    },
    #[snafu(display("extension {extension} is required but not installed on the container"))]
    #[snafu(visibility(pub(crate)))]
    #[non_exhaustive]
    ExtensionMissing { extension: &'static str },
}
