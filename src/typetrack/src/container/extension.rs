use std::any::{Any, TypeId};
use std::sync::Arc;

use snafu::prelude::*;

use crate::container::events::{Notifier, RegistrationKind, RegistrationObserver, Subscription};

/// A plug-in attached to a single [`Container`].
///
/// An extension is installed with [`Container::add_extension`] and receives
/// an [`ExtensionContext`] to hook itself into the container. The same
/// context is handed to [`Extension::uninstall`] when it is removed with
/// [`Container::remove_extension`], and the extension should undo whatever
/// it has hooked.
///
/// [`Container`]: crate::container::Container
/// [`Container::add_extension`]: crate::container::Container::add_extension
/// [`Container::remove_extension`]: crate::container::Container::remove_extension
pub trait Extension: Send + Sync + 'static {
    fn install(&self, context: &mut ExtensionContext<'_>);

    fn uninstall(&self, context: &mut ExtensionContext<'_>);
}

/// The hooks a container exposes to its extensions.
pub struct ExtensionContext<'a> {
    notifier: &'a mut Notifier,
}

impl<'a> ExtensionContext<'a> {
    pub(crate) fn new(notifier: &'a mut Notifier) -> Self {
        Self { notifier }
    }

    /// Subscribes `observer` to registrations of `kind`.
    pub fn subscribe(
        &mut self,
        kind: RegistrationKind,
        observer: Arc<dyn RegistrationObserver>,
    ) -> Subscription {
        self.notifier.subscribe(kind, observer)
    }

    /// Stops routing notifications to the subscribed observer. Returns
    /// `false` if the subscription was not active.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.notifier.unsubscribe(subscription)
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ExtensionError {
    #[snafu(display("extension {extension} is already installed on the container"))]
    #[non_exhaustive]
    AlreadyInstalled { extension: &'static str },
    #[snafu(display("extension {extension} is not installed on the container"))]
    #[non_exhaustive]
    NotInstalled { extension: &'static str },
}

/// An extension held by a container, kept both as the trait object and as
/// `Any` so that it can be handed back with its concrete type.
pub(crate) struct InstalledExtension {
    type_id: TypeId,
    extension: Arc<dyn Extension>,
    any: Arc<dyn Any + Send + Sync>,
}

impl InstalledExtension {
    pub fn new<E: Extension>(extension: Arc<E>) -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            extension: Arc::clone(&extension) as Arc<dyn Extension>,
            any: extension,
        }
    }

    pub fn is<E: Extension>(&self) -> bool {
        self.type_id == TypeId::of::<E>()
    }

    pub fn extension(&self) -> &dyn Extension {
        self.extension.as_ref()
    }

    pub fn downcast<E: Extension>(&self) -> Option<Arc<E>> {
        Arc::clone(&self.any).downcast::<E>().ok()
    }
}
