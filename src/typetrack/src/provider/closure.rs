use std::error::Error;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::container::injector::{
    CallContext, ContextForwardingInjectorProxy, Injector, InjectorError, TypedInjector,
};
use crate::container::{Managed, SharedManaged};
use crate::provider::{TypedProvider, TypedSharedProvider};

/// A provider which constructs objects by calling a closure with an
/// [`Injector`].
///
/// The closure returns two layers of results. The outer error is a failed
/// dependency lookup and is passed through as is. The inner error is a
/// failure of the construction itself and is reported as
/// [`InjectorError::ObjectConstruction`].
///
/// # Examples
///
/// ```rust
/// # use std::convert::Infallible;
/// # use typetrack::prelude::*;
/// # use typetrack::provider::closure::ClosureProvider;
/// let provider = ClosureProvider::new(|injector: &dyn Injector| {
///     let base: i32 = injector.resolve()?;
///     Ok(Ok::<_, Infallible>(base * 2))
/// });
/// ```
pub struct ClosureProvider<T, E, F>
where
    T: Managed,
    E: Into<Box<dyn Error + Send + Sync>> + 'static,
    F: Fn(&dyn Injector) -> Result<Result<T, E>, InjectorError> + Send + Sync + 'static,
{
    closure: F,
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<T, E, F> ClosureProvider<T, E, F>
where
    T: Managed,
    E: Into<Box<dyn Error + Send + Sync>> + 'static,
    F: Fn(&dyn Injector) -> Result<Result<T, E>, InjectorError> + Send + Sync + 'static,
{
    pub fn new(closure: F) -> Self {
        Self {
            closure,
            _marker: PhantomData,
        }
    }
}

impl<T, E, F> Debug for ClosureProvider<T, E, F>
where
    T: Managed,
    E: Into<Box<dyn Error + Send + Sync>> + 'static,
    F: Fn(&dyn Injector) -> Result<Result<T, E>, InjectorError> + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ClosureProvider")
            .field("type", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T, E, F> TypedProvider for ClosureProvider<T, E, F>
where
    T: Managed,
    E: Into<Box<dyn Error + Send + Sync>> + 'static,
    F: Fn(&dyn Injector) -> Result<Result<T, E>, InjectorError> + Send + Sync + 'static,
{
    type Output = T;

    fn provide<I>(
        &self,
        injector: &I,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        let injector = ContextForwardingInjectorProxy::new(injector, context);
        match (self.closure)(&injector) {
            Ok(Ok(obj)) => Ok(obj),
            Ok(Err(err)) => Err(InjectorError::ObjectConstruction {
                key: context.key().clone(),
                source: Arc::from(err.into()),
            }),
            Err(err) => Err(err),
        }
    }
}

impl<T, E, F> TypedSharedProvider for ClosureProvider<T, E, F>
where
    T: SharedManaged,
    E: Into<Box<dyn Error + Send + Sync>> + 'static,
    F: Fn(&dyn Injector) -> Result<Result<T, E>, InjectorError> + Send + Sync + 'static,
{
}
