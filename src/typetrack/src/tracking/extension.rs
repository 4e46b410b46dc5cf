use std::sync::Arc;

use tracing::debug;

use crate::container::extension::{Extension, ExtensionContext};
use crate::container::injector::TypedInjector;
use crate::tracking::index::TypeIndex;
use crate::tracking::listener::RegistrationListener;
use crate::tracking::resolution::Tracking;

/// Tracks which `(type, name)` pairs are registered on the container it is
/// installed on.
///
/// Only registrations made while the extension is installed are tracked.
/// After removal the index is kept as it was, but no longer updated.
///
/// ```rust
/// # use typetrack::prelude::*;
/// let container = Container::new();
/// let tracker = container.add_extension(TypeTrackingExtension::new()).unwrap();
/// container
///     .configure(typetrack::module::from_fn(|configurer| {
///         bind::<u32>().named("answer").to_instance(42).set_on(configurer);
///         Ok(())
///     }))
///     .unwrap();
///
/// let tracking = tracker.resolver(&container);
/// assert!(tracking.can_resolve_named::<u32>("answer"));
/// assert!(!tracking.can_resolve::<u32>());
/// assert_eq!(tracking.try_resolve_or::<u32>(7).unwrap(), 7);
/// ```
#[derive(Debug)]
pub struct TypeTrackingExtension {
    index: Arc<TypeIndex>,
    listener: RegistrationListener,
}

impl TypeTrackingExtension {
    pub fn new() -> Self {
        let index = Arc::new(TypeIndex::new());
        Self {
            listener: RegistrationListener::new(Arc::clone(&index)),
            index,
        }
    }

    pub fn index(&self) -> &Arc<TypeIndex> {
        &self.index
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_attached()
    }

    /// Returns the resolution helpers backed by this extension's index and
    /// `injector`, which should be the container the extension is
    /// installed on.
    pub fn resolver<'a, I>(&self, injector: &'a I) -> Tracking<'a, I>
    where
        I: TypedInjector + ?Sized,
    {
        Tracking::new(Arc::clone(&self.index), injector)
    }
}

impl Default for TypeTrackingExtension {
    fn default() -> Self {
        Self::new()
    }
}

impl Extension for TypeTrackingExtension {
    fn install(&self, context: &mut ExtensionContext<'_>) {
        self.listener.attach(context);
        debug!(tracked_types = self.index.len(), "type tracking attached");
    }

    fn uninstall(&self, context: &mut ExtensionContext<'_>) {
        self.listener.detach(context);
        debug!(tracked_types = self.index.len(), "type tracking detached");
    }
}
