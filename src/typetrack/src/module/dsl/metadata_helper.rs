use std::error::Error;
use std::marker::PhantomData;

use crate::container::injector::{Injector, InjectorError};
use crate::container::Managed;
use crate::key::Name;
use crate::module::dsl::instance_helper::InstanceBinding;
use crate::module::dsl::provider_helper::ProviderBinding;
use crate::module::dsl::Transient;
use crate::provider::closure::ClosureProvider;
use crate::provider::component::{Component, ComponentProvider};
use crate::provider::TypedProvider;

/// The first stage of a binding: which type under which name.
pub struct Binding<T>
where
    T: Managed,
{
    name: Name,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Binding<T>
where
    T: Managed,
{
    pub(super) fn new(name: Name) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn named(self, name: impl Into<Name>) -> Self {
        Self::new(name.into())
    }

    /// Maps `T` to the component `C`.
    pub fn to_component<C>(self) -> ProviderBinding<T, Transient, ComponentProvider<C>>
    where
        C: Component<Constructed = T>,
    {
        ProviderBinding::new(ComponentProvider::new(), self.name, Transient)
    }

    pub fn to_closure<E, F>(self, closure: F) -> ProviderBinding<T, Transient, ClosureProvider<T, E, F>>
    where
        E: Into<Box<dyn Error + Send + Sync>> + 'static,
        F: Fn(&dyn Injector) -> Result<Result<T, E>, InjectorError> + Send + Sync + 'static,
    {
        ProviderBinding::new(ClosureProvider::new(closure), self.name, Transient)
    }

    /// Registers a ready-made value, announced as an instance registration.
    pub fn to_instance(self, instance: T) -> InstanceBinding<T, Transient>
    where
        T: Clone,
    {
        InstanceBinding::new(instance, self.name, Transient)
    }

    pub fn to_provider<P>(self, provider: P) -> ProviderBinding<T, Transient, P>
    where
        P: TypedProvider<Output = T>,
    {
        ProviderBinding::new(provider, self.name, Transient)
    }
}
