pub mod dsl;

use std::error::Error;

use crate::container::registry::Configurer;

pub use dsl::bind;

/// A unit of registrations applied to a container.
pub trait Module: 'static {
    /// Runs [`Module::configure`] and reports its failure to `configurer`.
    fn setup(&self, configurer: &mut dyn Configurer) {
        if let Err(err) = self.configure(configurer) {
            configurer.report_module_error(std::any::type_name::<Self>(), err);
        }
    }

    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Several modules applied in the order they are added.
#[derive(Default)]
pub struct Configuration {
    modules: Vec<Box<dyn Module>>,
}

impl Configuration {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with<M: Module>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn compose(mut self, mut other: Configuration) -> Self {
        self.modules.append(&mut other.modules);
        self
    }
}

impl Module for Configuration {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.modules
            .iter()
            .for_each(|module| module.setup(configurer));
        Ok(())
    }
}

/// Turns a closure into a [`Module`].
pub fn from_fn<F>(f: F) -> FnModule<F>
where
    F: Fn(&mut dyn Configurer) -> Result<(), Box<dyn Error + Send + Sync>> + 'static,
{
    FnModule { f }
}

pub struct FnModule<F>
where
    F: Fn(&mut dyn Configurer) -> Result<(), Box<dyn Error + Send + Sync>> + 'static,
{
    f: F,
}

impl<F> Module for FnModule<F>
where
    F: Fn(&mut dyn Configurer) -> Result<(), Box<dyn Error + Send + Sync>> + 'static,
{
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        (self.f)(configurer)
    }
}
