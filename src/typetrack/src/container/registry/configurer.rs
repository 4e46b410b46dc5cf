use std::error::Error;

use tracing::warn;

use crate::container::core::ContainerCore;
use crate::container::registry::{
    Configurer, ConfigurerPrivate, ProviderEntry, RegistryError,
};

/// A [`Configurer`] which registers straight into a live container, so that
/// every registration is announced before the registering call returns.
pub struct ConfigurerImpl<'a> {
    core: &'a ContainerCore,
    errors: Vec<RegistryError>,
}

impl<'a> ConfigurerImpl<'a> {
    pub fn new(core: &'a ContainerCore) -> Self {
        Self {
            core,
            errors: Vec::new(),
        }
    }

    pub fn finish(mut self) -> Result<(), RegistryError> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(RegistryError::Aggregated {
                errors: self.errors,
            }),
        }
    }
}

impl Configurer for ConfigurerImpl<'_> {
    #[allow(private_interfaces)]
    fn as_private(&mut self) -> &mut dyn ConfigurerPrivate {
        self
    }

    fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>) {
        warn!(module, error = %err, "module failed to configure");
        self.errors.push(RegistryError::ModuleInner {
            module,
            source: err,
        });
    }
}

impl ConfigurerPrivate for ConfigurerImpl<'_> {
    fn dyn_register(&mut self, entry: ProviderEntry) {
        self.core.register(entry);
    }
}

#[cfg(test)]
mod tests {
    use crate::container::events::RegistrationKind;
    use crate::container::injector::TypedInjector;
    use crate::container::registry::TypedConfigurer;
    use crate::provider::instance::InstanceProvider;

    use super::*;

    #[test]
    fn configurer_impl_register_succeeds() {
        let core = ContainerCore::new();
        let mut configurer = ConfigurerImpl::new(&core);
        configurer.register("", RegistrationKind::Instance, InstanceProvider::new(42i32));
        configurer.register("a", RegistrationKind::Instance, InstanceProvider::new(1i32));
        assert!(configurer.finish().is_ok());

        assert_eq!(core.resolve::<i32>().unwrap(), 42);
        assert_eq!(core.resolve_named::<i32>("a").unwrap(), 1);
    }

    #[test]
    fn configurer_impl_finish_fails_when_module_error_reported() {
        let core = ContainerCore::new();
        let mut configurer = ConfigurerImpl::new(&core);
        configurer.register("", RegistrationKind::Instance, InstanceProvider::new(42i32));
        configurer.report_module_error("test", "whatever".into());

        assert!(matches!(
            configurer.finish(),
            Err(RegistryError::ModuleInner { module: "test", .. })
        ));
        // Registrations made before the failure stay in effect.
        assert_eq!(core.resolve::<i32>().unwrap(), 42);
    }

    #[test]
    fn configurer_impl_finish_aggregates_multiple_errors() {
        let core = ContainerCore::new();
        let mut configurer = ConfigurerImpl::new(&core);
        configurer.report_module_error("first", "whatever".into());
        configurer.report_module_error("second", "whatever".into());

        let Err(RegistryError::Aggregated { errors }) = configurer.finish() else {
            panic!("errors should be aggregated");
        };
        assert_eq!(errors.len(), 2);
    }
}
