use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use oneshot::{Receiver, Sender};
use parking_lot::{RwLock, RwLockWriteGuard};
use tracing::{debug, trace};

use crate::container::events::{Notifier, RegistrationEvent};
use crate::container::extension::{Extension, ExtensionContext, ExtensionError, InstalledExtension};
use crate::container::injector::{CallContext, Injector, InjectorError};
use crate::container::registry::{ProviderEntry, ProviderMap};
use crate::container::{Managed, SharedManaged};
use crate::key::{Key, TypeKey};
use crate::provider::{Provider, SharedProvider};

pub struct ContainerCore {
    providers: RwLock<ProviderMap>,
    notifier: RwLock<Notifier>,
    extensions: RwLock<Vec<InstalledExtension>>,
    managed: RwLock<SingletonData>,
}

impl ContainerCore {
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(ProviderMap::new()),
            notifier: RwLock::new(Notifier::new()),
            extensions: RwLock::new(Vec::new()),
            managed: RwLock::new(SingletonData::new()),
        }
    }

    /// Makes `entry` resolvable and announces it. Observers run after every
    /// lock is released, so they may call back into the container.
    pub fn register(&self, entry: ProviderEntry) {
        let event = RegistrationEvent::new(entry.kind(), entry.key().clone());
        let lifetime = entry.lifetime();

        if let Some(replaced) = self.providers.write().insert(entry) {
            debug!(key = %replaced.key(), "replacing an existing registration");
            let mut managed = self.managed.write();
            managed.objects.remove(replaced.key());
            // Waiters of an abandoned construction retry against the new entry.
            let abandoned = managed.constructing.remove(replaced.key());
            drop(managed);
            drop(abandoned);
        }
        debug!(key = %event.key(), kind = ?event.kind(), %lifetime, "registered");

        let observers = self.notifier.read().observers(event.kind());
        for observer in observers {
            observer.on_register(&event);
        }
    }

    pub fn install_extension<E: Extension>(
        &self,
        extension: Arc<E>,
    ) -> Result<(), ExtensionError> {
        let mut extensions = self.extensions.write();
        if extensions.iter().any(InstalledExtension::is::<E>) {
            return Err(ExtensionError::AlreadyInstalled {
                extension: std::any::type_name::<E>(),
            });
        }

        let installed = InstalledExtension::new(extension);
        installed
            .extension()
            .install(&mut ExtensionContext::new(&mut self.notifier.write()));
        extensions.push(installed);
        debug!(
            extension = std::any::type_name::<E>(),
            observers = self.notifier.read().len(),
            "extension installed"
        );
        Ok(())
    }

    pub fn uninstall_extension<E: Extension>(&self) -> Result<Arc<E>, ExtensionError> {
        let mut extensions = self.extensions.write();
        let Some(position) = extensions.iter().position(InstalledExtension::is::<E>) else {
            return Err(ExtensionError::NotInstalled {
                extension: std::any::type_name::<E>(),
            });
        };

        let installed = extensions.remove(position);
        installed
            .extension()
            .uninstall(&mut ExtensionContext::new(&mut self.notifier.write()));
        debug!(
            extension = std::any::type_name::<E>(),
            observers = self.notifier.read().len(),
            "extension uninstalled"
        );
        let Some(extension) = installed.downcast::<E>() else {
            unreachable!("an extension should be stored with its own type")
        };
        Ok(extension)
    }

    pub fn find_extension<E: Extension>(&self) -> Option<Arc<E>> {
        self.extensions
            .read()
            .iter()
            .find(|installed| installed.is::<E>())
            .and_then(InstalledExtension::downcast::<E>)
    }

    fn get_object(&self, context: &CallContext) -> Result<Box<dyn Managed>, InjectorError> {
        let key = context.key();
        trace!(%key, depth = context.trace().depth(), "resolving");
        if let Some(object) = self.try_get_constructed_object(key) {
            return Ok(object);
        }

        match self.try_get_provider_by_key(key)? {
            ProviderEntry::Singleton { provider, .. } => {
                self.get_singleton_object(provider.as_ref(), context)
            }
            ProviderEntry::Transient { provider, .. } => {
                self.get_transient_object(provider.as_ref(), context)
            }
        }
    }

    fn try_get_constructed_object(&self, key: &Key) -> Option<Box<dyn Managed>> {
        let objects = &self.managed.read().objects;
        objects
            .get(key)
            .map(|object| object.dyn_clone().upcast_managed())
    }

    /// Clones the entry out, so that no lock is held while constructing.
    fn try_get_provider_by_key(&self, key: &Key) -> Result<ProviderEntry, InjectorError> {
        if let Some(entry) = self.providers.read().get(key) {
            Ok(entry.clone())
        } else {
            Err(InjectorError::NotFound { key: key.clone() })
        }
    }

    fn get_singleton_object(
        &self,
        provider: &dyn SharedProvider,
        context: &CallContext,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        let key = context.key();
        let managed = self.managed.write();

        if let Some(object) = managed.objects.get(key) {
            // Constructed by another thread since the optimistic read.
            Ok(object.dyn_clone().upcast_managed())
        } else if let Some(constructing) = managed.constructing.get(key) {
            if constructing.is_constructed_by_current_thread() {
                Err(self.stop_construction_on_cyclic_dependency(managed, key))
            } else {
                self.wait_for_constructed_object(managed, context)
            }
        } else {
            self.construct_singleton_object(managed, provider, context)
        }
    }

    fn stop_construction_on_cyclic_dependency(
        &self,
        managed: RwLockWriteGuard<SingletonData>,
        key: &Key,
    ) -> InjectorError {
        let err = InjectorError::CyclicDependency { key: key.clone() };
        self.notify_waiters(managed, key, WaitResponse::Error(err.clone()));
        err
    }

    fn wait_for_constructed_object(
        &self,
        mut managed: RwLockWriteGuard<SingletonData>,
        context: &CallContext,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        let key = context.key();
        let (sender, receiver) = oneshot::channel();
        let Some(constructing) = managed.constructing.get_mut(key) else {
            unreachable!("whether `constructing` exists should be checked before calling this method")
        };
        constructing.register_waiter(sender);
        drop(managed);

        trace!(%key, "waiting for another thread to construct the singleton");
        self.get_object_on_response(receiver, context)
    }

    /// A dropped sender means the construction was abandoned, either because
    /// the registration got replaced or because the provider panicked. The
    /// object is then requested again from scratch.
    fn get_object_on_response(
        &self,
        receiver: Receiver<WaitResponse>,
        context: &CallContext,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        let key = context.key();
        match receiver.recv() {
            Ok(WaitResponse::Constructed) => {
                if let Some(object) = self.try_get_constructed_object(key) {
                    Ok(object)
                } else {
                    self.get_object(context)
                }
            }
            Ok(WaitResponse::Error(err)) => Err(err),
            Err(_) => {
                trace!(%key, "construction abandoned, retrying");
                self.get_object(context)
            }
        }
    }

    fn construct_singleton_object(
        &self,
        mut managed: RwLockWriteGuard<SingletonData>,
        provider: &dyn SharedProvider,
        context: &CallContext,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        let key = context.key();
        let ticket = managed.next_ticket();
        managed.constructing.insert(
            key.clone(),
            ConstructingObjectContext::new(thread::current().id(), ticket),
        );
        drop(managed);

        let guard = ConstructionGuard {
            managed: &self.managed,
            key,
            ticket,
        };
        let res = provider.dyn_provide_shared(self, context);
        drop(guard);

        let mut managed = self.managed.write();
        let constructing = managed.take_construction(key, ticket);
        match res {
            Ok(object) => {
                if let Some(constructing) = constructing {
                    managed.objects.insert(key.clone(), object.dyn_clone());
                    drop(managed);
                    constructing.notify(WaitResponse::Constructed);
                    debug!(%key, "singleton constructed");
                } else {
                    drop(managed);
                    debug!(%key, "registration replaced while constructing, not caching");
                }
                Ok(object.upcast_managed())
            }
            Err(err) => {
                drop(managed);
                if let Some(constructing) = constructing {
                    constructing.notify(WaitResponse::Error(err.clone()));
                }
                Err(err)
            }
        }
    }

    fn notify_waiters(
        &self,
        mut managed: RwLockWriteGuard<SingletonData>,
        key: &Key,
        response: WaitResponse,
    ) {
        if let Some(constructing) = managed.constructing.remove(key) {
            drop(managed);
            constructing.notify(response);
        }
    }

    fn get_transient_object(
        &self,
        provider: &dyn Provider,
        context: &CallContext,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        let key = context.key();
        if context.trace().previous_exist_key(key) {
            Err(InjectorError::CyclicDependency { key: key.clone() })
        } else {
            provider.dyn_provide(self, context)
        }
    }
}

impl Injector for ContainerCore {
    fn dyn_get(&self, key: &Key) -> Result<Box<dyn Managed>, InjectorError> {
        let context = CallContext::new(key);
        self.get_object(&context)
    }

    fn dyn_get_dependency<'a>(
        &self,
        key: &Key,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        let context = context.append(key);
        self.get_object(&context)
    }

    fn named_keys(&self, target: TypeKey) -> Vec<Key> {
        self.providers.read().named_keys(target)
    }
}

struct SingletonData {
    objects: HashMap<Key, Box<dyn SharedManaged>>,
    constructing: HashMap<Key, ConstructingObjectContext>,
    tickets: u64,
}

impl SingletonData {
    fn new() -> Self {
        Self {
            objects: HashMap::new(),
            constructing: HashMap::new(),
            tickets: 0,
        }
    }

    fn next_ticket(&mut self) -> u64 {
        self.tickets += 1;
        self.tickets
    }

    /// Removes the construction of `key` only if it is still the one
    /// identified by `ticket`.
    fn take_construction(&mut self, key: &Key, ticket: u64) -> Option<ConstructingObjectContext> {
        if self
            .constructing
            .get(key)
            .is_some_and(|constructing| constructing.ticket == ticket)
        {
            self.constructing.remove(key)
        } else {
            None
        }
    }
}

struct ConstructingObjectContext {
    on_thread: ThreadId,
    ticket: u64,
    waiters: Vec<Sender<WaitResponse>>,
}

impl ConstructingObjectContext {
    fn new(on_thread: ThreadId, ticket: u64) -> Self {
        Self {
            on_thread,
            ticket,
            waiters: Vec::new(),
        }
    }

    fn is_constructed_by_current_thread(&self) -> bool {
        thread::current().id() == self.on_thread
    }

    fn register_waiter(&mut self, sender: Sender<WaitResponse>) {
        self.waiters.push(sender);
    }

    fn notify(self, response: WaitResponse) {
        for sender in self.waiters {
            let _ = sender.send(response.clone());
        }
    }
}

/// Releases the waiters of a construction whose provider panicked.
struct ConstructionGuard<'a> {
    managed: &'a RwLock<SingletonData>,
    key: &'a Key,
    ticket: u64,
}

impl Drop for ConstructionGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            let abandoned = self.managed.write().take_construction(self.key, self.ticket);
            drop(abandoned);
        }
    }
}

#[derive(Debug, Clone)]
enum WaitResponse {
    Constructed,
    Error(InjectorError),
}
