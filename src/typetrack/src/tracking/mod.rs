//! Tracking of the registrations made on a container, and resolution
//! helpers that answer "is it registered?" before resolving.

mod extension;
mod facade;
mod listener;
mod resolution;

pub mod index;

pub use extension::TypeTrackingExtension;
pub use facade::TrackingExt;
pub use index::TypeIndex;
pub use listener::RegistrationListener;
pub use resolution::{ResolveAll, Tracking};
