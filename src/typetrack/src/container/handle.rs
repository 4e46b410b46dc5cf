use std::sync::Arc;

use crate::container::core::ContainerCore;
use crate::container::extension::{Extension, ExtensionError};
use crate::container::injector::{CallContext, Injector, InjectorError};
use crate::container::registry::{ConfigurerImpl, RegistryError};
use crate::container::Managed;
use crate::key::{Key, TypeKey};
use crate::module::Module;

/// A cheaply cloneable handle to a container.
///
/// Unlike a container that is frozen once built, registrations can be added
/// at any time through [`Container::configure`]. Every registration is
/// announced to the observers hooked by installed [`Extension`]s before the
/// call returns.
#[derive(Clone)]
pub struct Container {
    core: Arc<ContainerCore>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            core: Arc::new(ContainerCore::new()),
        }
    }

    /// Creates a container and configures it with `module`.
    pub fn init<M: Module>(module: M) -> Result<Self, RegistryError> {
        let container = Self::new();
        container.configure(module)?;
        Ok(container)
    }

    /// Registers everything `module` declares.
    ///
    /// Registering a key that already exists replaces the previous
    /// registration. When the module fails, the registrations it has made
    /// before failing stay in effect.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the module reports an error.
    pub fn configure<M: Module>(&self, module: M) -> Result<(), RegistryError> {
        let mut configurer = ConfigurerImpl::new(&self.core);
        module.setup(&mut configurer);
        configurer.finish()
    }

    /// Installs `extension` and returns the shared handle to it.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::AlreadyInstalled`] if an extension of the
    /// same type is installed.
    pub fn add_extension<E: Extension>(&self, extension: E) -> Result<Arc<E>, ExtensionError> {
        let extension = Arc::new(extension);
        self.core.install_extension(Arc::clone(&extension))?;
        Ok(extension)
    }

    /// Uninstalls the extension of type `E` and gives it back.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::NotInstalled`] if no such extension exists.
    pub fn remove_extension<E: Extension>(&self) -> Result<Arc<E>, ExtensionError> {
        self.core.uninstall_extension::<E>()
    }

    /// Looks up the installed extension of type `E`.
    pub fn extension<E: Extension>(&self) -> Option<Arc<E>> {
        self.core.find_extension::<E>()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Injector for Container {
    fn dyn_get(&self, key: &Key) -> Result<Box<dyn Managed>, InjectorError> {
        self.core.dyn_get(key)
    }

    fn dyn_get_dependency<'a>(
        &self,
        key: &Key,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        self.core.dyn_get_dependency(key, context)
    }

    fn named_keys(&self, target: TypeKey) -> Vec<Key> {
        self.core.named_keys(target)
    }
}
