pub mod events;
pub mod extension;
pub mod injector;
pub mod registry;

mod core;
mod handle;

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::util::any::AsAny;

pub use handle::Container;

/// A value that can be stored in and resolved from a [`Container`].
pub trait Managed: AsAny + Send + Sync + 'static {}

impl<T> Managed for T where T: AsAny + Send + Sync + 'static {}

/// A [`Managed`] value that is cheap to hand out many times, which is what
/// singletons require.
pub trait SharedManaged: Managed {
    fn dyn_clone(&self) -> Box<dyn SharedManaged>;

    fn upcast_managed(self: Box<Self>) -> Box<dyn Managed>;
}

impl<T> SharedManaged for Arc<T>
where
    T: Send + Sync + ?Sized + 'static,
{
    fn dyn_clone(&self) -> Box<dyn SharedManaged> {
        Box::new(Arc::clone(self))
    }

    fn upcast_managed(self: Box<Self>) -> Box<dyn Managed> {
        self
    }
}

/// How long an object constructed by a [`Container`] is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// A new object is constructed on every request.
    #[default]
    Transient,
    /// The object is constructed once and shared by all later requests.
    Singleton,
}

impl Display for Lifetime {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Transient => write!(f, "Transient"),
            Self::Singleton => write!(f, "Singleton"),
        }
    }
}
