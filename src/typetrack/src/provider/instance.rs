use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::container::injector::{CallContext, InjectorError, TypedInjector};
use crate::container::{Managed, SharedManaged};
use crate::provider::{TypedProvider, TypedSharedProvider};

/// Hands out clones of a ready-made value.
///
/// Registrations backed by this provider are announced on the
/// [`RegistrationKind::Instance`] channel.
///
/// [`RegistrationKind::Instance`]: crate::container::events::RegistrationKind::Instance
pub struct InstanceProvider<T>
where
    T: Managed + Clone,
{
    instance: T,
}

impl<T> InstanceProvider<T>
where
    T: Managed + Clone,
{
    pub fn new(instance: T) -> Self {
        Self { instance }
    }
}

impl<T> Debug for InstanceProvider<T>
where
    T: Managed + Clone,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InstanceProvider")
            .field("type", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T> TypedProvider for InstanceProvider<T>
where
    T: Managed + Clone,
{
    type Output = T;

    fn provide<I>(
        &self,
        _injector: &I,
        _context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        Ok(self.instance.clone())
    }
}

impl<T> TypedSharedProvider for InstanceProvider<T> where T: SharedManaged + Clone {}
