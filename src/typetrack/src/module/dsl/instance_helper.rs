use crate::container::events::RegistrationKind;
use crate::container::registry::{Configurer, TypedConfigurer};
use crate::container::{Managed, SharedManaged};
use crate::key::Name;
use crate::module::dsl::{Singleton, ToLifetime, Transient};
use crate::provider::instance::InstanceProvider;

#[allow(private_bounds)]
pub struct InstanceBinding<T, L>
where
    T: Managed + Clone,
    L: ToLifetime,
{
    instance: T,
    name: Name,
    lifetime: L,
}

#[allow(private_bounds)]
impl<T, L> InstanceBinding<T, L>
where
    T: Managed + Clone,
    L: ToLifetime,
{
    pub(super) fn new(instance: T, name: Name, lifetime: L) -> Self {
        Self {
            instance,
            name,
            lifetime,
        }
    }

    pub fn named(self, name: impl Into<Name>) -> Self {
        Self::new(self.instance, name.into(), self.lifetime)
    }
}

impl<T> InstanceBinding<T, Transient>
where
    T: Managed + Clone,
{
    /// Caches the first handed out clone, so that every request gets the
    /// same shared object.
    pub fn in_singleton(self) -> InstanceBinding<T, Singleton>
    where
        T: SharedManaged,
    {
        InstanceBinding::new(self.instance, self.name, Singleton)
    }

    pub fn set_on(self, configurer: &mut dyn Configurer) {
        let provider = InstanceProvider::new(self.instance);
        configurer.register(self.name, RegistrationKind::Instance, provider);
    }
}

impl<T> InstanceBinding<T, Singleton>
where
    T: SharedManaged + Clone,
{
    pub fn set_on(self, configurer: &mut dyn Configurer) {
        let provider = InstanceProvider::new(self.instance);
        configurer.register_singleton(self.name, RegistrationKind::Instance, provider);
    }
}
