use std::any;

use snafu::prelude::*;

use crate::container::injector::{ExtensionMissingSnafu, InjectorError, TypedInjector};
use crate::container::Container;
use crate::tracking::extension::TypeTrackingExtension;
use crate::tracking::resolution::Tracking;

/// Gives direct access to the tracked resolution helpers of a container.
pub trait TrackingExt: TypedInjector {
    /// Returns the helpers backed by the installed
    /// [`TypeTrackingExtension`].
    ///
    /// # Errors
    ///
    /// Returns [`InjectorError::ExtensionMissing`] if the extension is not
    /// installed.
    fn tracking(&self) -> Result<Tracking<'_, Self>, InjectorError>;
}

impl TrackingExt for Container {
    fn tracking(&self) -> Result<Tracking<'_, Self>, InjectorError> {
        let extension = self
            .extension::<TypeTrackingExtension>()
            .context(ExtensionMissingSnafu {
                extension: any::type_name::<TypeTrackingExtension>(),
            })?;
        Ok(extension.resolver(self))
    }
}
