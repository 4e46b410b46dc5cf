use std::error::Error;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::container::injector::{
    CallContext, ContextForwardingInjectorProxy, InjectorError, TypedInjector,
};
use crate::container::{Managed, SharedManaged};
use crate::provider::{TypedProvider, TypedSharedProvider};

/// A concrete type with a dedicated constructor for dependency injection.
///
/// Binding an abstract type to a component is a type mapping: the component
/// is constructed and then converted into the abstract type by
/// [`Component::post_process`].
///
/// ```rust
/// # use std::sync::Arc;
/// # use std::convert::Infallible;
/// # use typetrack::prelude::*;
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English {
///     name: String,
/// }
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         format!("Hello, {}!", self.name)
///     }
/// }
///
/// impl Component for English {
///     type Constructed = Arc<dyn Greeter>;
///
///     type Error = Infallible;
///
///     fn construct<I>(injector: &I) -> Result<Result<Self, Self::Error>, InjectorError>
///     where
///         I: TypedInjector + ?Sized,
///     {
///         Ok(Ok(Self { name: injector.resolve()? }))
///     }
///
///     fn post_process(self) -> Self::Constructed {
///         Arc::new(self)
///     }
/// }
/// ```
pub trait Component: Managed + Sized {
    /// The type the component is registered as, such as `Arc<Self>` or
    /// `Arc<dyn Trait>`.
    type Constructed: Managed;

    type Error: Into<Box<dyn Error + Send + Sync>>;

    /// Resolves the dependencies and creates the component.
    ///
    /// # Errors
    ///
    /// Returns the outer error if a dependency can't be resolved, and the
    /// inner [`Component::Error`] if the construction itself fails.
    fn construct<I>(injector: &I) -> Result<Result<Self, Self::Error>, InjectorError>
    where
        I: TypedInjector + ?Sized;

    fn post_process(self) -> Self::Constructed;
}

pub struct ComponentProvider<C>
where
    C: Component,
{
    _marker: PhantomData<fn() -> C>,
}

impl<C> ComponentProvider<C>
where
    C: Component,
{
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<C> Debug for ComponentProvider<C>
where
    C: Component,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ComponentProvider")
            .field("component", &std::any::type_name::<C>())
            .finish()
    }
}

impl<C> TypedProvider for ComponentProvider<C>
where
    C: Component,
{
    type Output = C::Constructed;

    fn provide<I>(
        &self,
        injector: &I,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        let injector = ContextForwardingInjectorProxy::new(injector, context);
        match C::construct(&injector) {
            Ok(Ok(obj)) => Ok(obj.post_process()),
            Ok(Err(err)) => Err(InjectorError::ObjectConstruction {
                key: context.key().clone(),
                source: Arc::from(err.into()),
            }),
            Err(err) => Err(err),
        }
    }
}

impl<C> TypedSharedProvider for ComponentProvider<C> where C: Component<Constructed: SharedManaged> {}
