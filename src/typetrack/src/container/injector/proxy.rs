use crate::container::injector::{CallContext, Injector, InjectorError, TypedInjector};
use crate::container::Managed;
use crate::key::{Key, TypeKey};

/// Hands dependencies requested by a provider back to the container together
/// with the context of the request being served, so that cycles are visible.
pub struct ContextForwardingInjectorProxy<'a, I>
where
    I: TypedInjector + ?Sized,
{
    inner: &'a I,
    context: &'a CallContext<'a>,
}

impl<'a, I> ContextForwardingInjectorProxy<'a, I>
where
    I: TypedInjector + ?Sized,
{
    pub fn new(inner: &'a I, context: &'a CallContext<'a>) -> Self {
        Self { inner, context }
    }
}

impl<I> Injector for ContextForwardingInjectorProxy<'_, I>
where
    I: TypedInjector + ?Sized,
{
    fn dyn_get(&self, key: &Key) -> Result<Box<dyn Managed>, InjectorError> {
        self.dyn_get_dependency(key, self.context)
    }

    fn dyn_get_dependency<'a>(
        &self,
        key: &Key,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        self.inner.dyn_get_dependency(key, context)
    }

    fn named_keys(&self, target: TypeKey) -> Vec<Key> {
        self.inner.named_keys(target)
    }
}
