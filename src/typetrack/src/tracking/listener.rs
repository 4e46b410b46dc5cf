use std::sync::Arc;

use parking_lot::Mutex;

use crate::container::events::{RegistrationKind, Subscription};
use crate::container::extension::ExtensionContext;
use crate::tracking::index::TypeIndex;

/// Routes the registrations announced by a container into a [`TypeIndex`].
///
/// Both channels are listened to, so that type mappings and instances are
/// tracked alike.
#[derive(Debug)]
pub struct RegistrationListener {
    index: Arc<TypeIndex>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl RegistrationListener {
    pub fn new(index: Arc<TypeIndex>) -> Self {
        Self {
            index,
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    pub fn attach(&self, context: &mut ExtensionContext<'_>) {
        let mut subscriptions = self.subscriptions.lock();
        for kind in [RegistrationKind::Type, RegistrationKind::Instance] {
            subscriptions.push(context.subscribe(kind, self.index.clone()));
        }
    }

    pub fn detach(&self, context: &mut ExtensionContext<'_>) {
        let mut subscriptions = self.subscriptions.lock();
        while let Some(subscription) = subscriptions.pop() {
            context.unsubscribe(subscription);
        }
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.lock().is_empty()
    }
}
