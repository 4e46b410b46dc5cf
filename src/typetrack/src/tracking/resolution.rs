use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::iter::FusedIterator;
use std::sync::Arc;
use std::vec;

use tracing::trace;

use crate::container::injector::{InjectorError, TypedInjector};
use crate::container::Managed;
use crate::key::{Name, TypeKey};
use crate::tracking::index::TypeIndex;

/// Resolution helpers that consult the registrations tracked by a
/// [`TypeTrackingExtension`] before asking the container.
///
/// Registrations that are not tracked are never an error here: the checks
/// answer `false`, single resolution answers `None` or the fallback, and
/// bulk resolution answers an empty collection. Failures of the container
/// itself, such as a component failing to construct, are passed through
/// unchanged.
///
/// [`TypeTrackingExtension`]: crate::tracking::TypeTrackingExtension
pub struct Tracking<'a, I>
where
    I: TypedInjector + ?Sized,
{
    index: Arc<TypeIndex>,
    injector: &'a I,
}

impl<'a, I> Tracking<'a, I>
where
    I: TypedInjector + ?Sized,
{
    pub fn new(index: Arc<TypeIndex>, injector: &'a I) -> Self {
        Self { index, injector }
    }

    pub fn index(&self) -> &TypeIndex {
        &self.index
    }

    /// Returns whether `T` is registered under the default name.
    pub fn can_resolve<T: Managed>(&self) -> bool {
        self.index.has_name(TypeKey::of::<T>(), &Name::DEFAULT)
    }

    /// Returns whether `T` is registered under `name`. An empty or absent
    /// name is the default name.
    pub fn can_resolve_named<T: Managed>(&self, name: impl Into<Name>) -> bool {
        self.index.has_name(TypeKey::of::<T>(), &name.into())
    }

    /// Returns whether `T` is registered under any name.
    pub fn can_resolve_any<T: Managed>(&self) -> bool {
        self.index.has_any(TypeKey::of::<T>())
    }

    /// Resolves the default registration of `T`, or `None` if there is
    /// none.
    ///
    /// # Errors
    ///
    /// Returns the container's error if `T` is registered but fails to
    /// resolve.
    pub fn try_resolve<T: Managed>(&self) -> Result<Option<T>, InjectorError> {
        self.try_resolve_named(Name::DEFAULT)
    }

    /// Resolves the registration of `T` under `name`, or `None` if there is
    /// none.
    ///
    /// # Errors
    ///
    /// Returns the container's error if `T` is registered but fails to
    /// resolve.
    pub fn try_resolve_named<T: Managed>(
        &self,
        name: impl Into<Name>,
    ) -> Result<Option<T>, InjectorError> {
        let name = name.into();
        if self.index.has_name(TypeKey::of::<T>(), &name) {
            self.injector.resolve_named(name).map(Some)
        } else {
            trace!(target_type = std::any::type_name::<T>(), %name, "not registered");
            Ok(None)
        }
    }

    /// Resolves the default registration of `T`, handing `fallback` back
    /// untouched if there is none.
    ///
    /// # Errors
    ///
    /// Returns the container's error if `T` is registered but fails to
    /// resolve.
    pub fn try_resolve_or<T: Managed>(&self, fallback: T) -> Result<T, InjectorError> {
        self.try_resolve_named_or(Name::DEFAULT, fallback)
    }

    /// Resolves the registration of `T` under `name`, handing `fallback`
    /// back untouched if there is none.
    ///
    /// # Errors
    ///
    /// Returns the container's error if `T` is registered but fails to
    /// resolve.
    pub fn try_resolve_named_or<T: Managed>(
        &self,
        name: impl Into<Name>,
        fallback: T,
    ) -> Result<T, InjectorError> {
        let name = name.into();
        if self.index.has_name(TypeKey::of::<T>(), &name) {
            self.injector.resolve_named(name)
        } else {
            trace!(target_type = std::any::type_name::<T>(), %name, "using fallback");
            Ok(fallback)
        }
    }

    /// Resolves every named registration of `T` in registration order,
    /// followed by the default registration if `include_default` is set and
    /// `T` has one.
    ///
    /// The container's bulk resolution never yields the default
    /// registration, so the default appears at most once.
    ///
    /// # Errors
    ///
    /// Returns the first error the container reports.
    pub fn resolve_all<T: Managed>(
        &self,
        include_default: bool,
    ) -> Result<ResolveAll<T>, InjectorError> {
        let named = self.injector.resolve_all_named::<T>()?;
        let default = if include_default && self.can_resolve::<T>() {
            trace!(target_type = std::any::type_name::<T>(), "appending the default");
            Some(self.injector.resolve::<T>()?)
        } else {
            None
        };
        Ok(ResolveAll::new(named, default))
    }

    /// Same as [`Tracking::resolve_all`], collected into a boxed slice.
    ///
    /// # Errors
    ///
    /// Returns the first error the container reports.
    pub fn resolve_all_to_array<T: Managed>(
        &self,
        include_default: bool,
    ) -> Result<Box<[T]>, InjectorError> {
        self.resolve_all(include_default).map(Iterator::collect)
    }
}

impl<I> Debug for Tracking<'_, I>
where
    I: TypedInjector + ?Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Tracking")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// The objects produced by [`Tracking::resolve_all`]: the named
/// registrations first, then the default one.
pub struct ResolveAll<T> {
    named: vec::IntoIter<T>,
    default: Option<T>,
}

impl<T> ResolveAll<T> {
    fn new(named: Vec<T>, default: Option<T>) -> Self {
        Self {
            named: named.into_iter(),
            default,
        }
    }
}

impl<T> Iterator for ResolveAll<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.named.next().or_else(|| self.default.take())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for ResolveAll<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.default.take().or_else(|| self.named.next_back())
    }
}

impl<T> ExactSizeIterator for ResolveAll<T> {
    fn len(&self) -> usize {
        self.named.len() + usize::from(self.default.is_some())
    }
}

impl<T> FusedIterator for ResolveAll<T> {}

impl<T> Debug for ResolveAll<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ResolveAll")
            .field("remaining", &self.len())
            .finish_non_exhaustive()
    }
}
