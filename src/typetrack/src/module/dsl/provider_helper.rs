use crate::container::events::RegistrationKind;
use crate::container::registry::{Configurer, TypedConfigurer};
use crate::container::{Managed, SharedManaged};
use crate::key::Name;
use crate::module::dsl::{Singleton, ToLifetime, Transient};
use crate::provider::{TypedProvider, TypedSharedProvider};

/// A binding backed by a provider, announced as a type registration.
#[allow(private_bounds)]
pub struct ProviderBinding<T, L, P>
where
    T: Managed,
    L: ToLifetime,
    P: TypedProvider<Output = T>,
{
    provider: P,
    name: Name,
    lifetime: L,
}

#[allow(private_bounds)]
impl<T, L, P> ProviderBinding<T, L, P>
where
    T: Managed,
    L: ToLifetime,
    P: TypedProvider<Output = T>,
{
    pub(super) fn new(provider: P, name: Name, lifetime: L) -> Self {
        Self {
            provider,
            name,
            lifetime,
        }
    }

    pub fn named(self, name: impl Into<Name>) -> Self {
        Self::new(self.provider, name.into(), self.lifetime)
    }
}

impl<T, P> ProviderBinding<T, Transient, P>
where
    T: Managed,
    P: TypedProvider<Output = T>,
{
    pub fn in_singleton(self) -> ProviderBinding<T, Singleton, P>
    where
        T: SharedManaged,
        P: TypedSharedProvider,
    {
        ProviderBinding::new(self.provider, self.name, Singleton)
    }

    pub fn set_on(self, configurer: &mut dyn Configurer) {
        configurer.register(self.name, RegistrationKind::Type, self.provider);
    }
}

impl<T, P> ProviderBinding<T, Singleton, P>
where
    T: SharedManaged,
    P: TypedSharedProvider<Output = T>,
{
    pub fn set_on(self, configurer: &mut dyn Configurer) {
        configurer.register_singleton(self.name, RegistrationKind::Type, self.provider);
    }
}
