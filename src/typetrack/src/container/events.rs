//! Registration notifications emitted by a [`Container`].
//!
//! Every registration made on a container is announced synchronously, before
//! the registration call returns, to the observers subscribed to the channel
//! of that registration's [`RegistrationKind`].
//!
//! [`Container`]: crate::container::Container

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::key::{Key, Name, TypeKey};

/// The channel a registration is announced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationKind {
    /// A type mapping, i.e. a provider constructing objects on demand.
    Type,
    /// A ready-made instance.
    Instance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationEvent {
    kind: RegistrationKind,
    key: Key,
}

impl RegistrationEvent {
    pub fn new(kind: RegistrationKind, key: Key) -> Self {
        Self { kind, key }
    }

    pub fn kind(&self) -> RegistrationKind {
        self.kind
    }

    /// The declared abstract type of the registration.
    pub fn target(&self) -> TypeKey {
        self.key.target()
    }

    pub fn name(&self) -> &Name {
        self.key.name()
    }

    pub fn key(&self) -> &Key {
        &self.key
    }
}

/// Receives registration notifications.
///
/// Observers are called on the registering thread, after the registration is
/// visible to resolution and with no container lock held.
pub trait RegistrationObserver: Send + Sync + 'static {
    fn on_register(&self, event: &RegistrationEvent);
}

/// A token identifying one subscription, needed to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    kind: RegistrationKind,
    id: u64,
}

impl Subscription {
    pub fn kind(&self) -> RegistrationKind {
        self.kind
    }
}

pub(crate) struct Notifier {
    next_id: u64,
    observers: Vec<(Subscription, Arc<dyn RegistrationObserver>)>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(
        &mut self,
        kind: RegistrationKind,
        observer: Arc<dyn RegistrationObserver>,
    ) -> Subscription {
        let subscription = Subscription {
            kind,
            id: self.next_id,
        };
        self.next_id += 1;
        self.observers.push((subscription, observer));
        subscription
    }

    /// Returns whether the subscription was still active.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(s, _)| *s != subscription);
        self.observers.len() != before
    }

    /// Returns a snapshot of the observers of `kind` in subscription order.
    pub fn observers(&self, kind: RegistrationKind) -> Vec<Arc<dyn RegistrationObserver>> {
        self.observers
            .iter()
            .filter(|(s, _)| s.kind == kind)
            .map(|(_, observer)| Arc::clone(observer))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }
}

impl Debug for Notifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Notifier")
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
