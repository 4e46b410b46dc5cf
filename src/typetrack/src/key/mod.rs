mod name;

use std::any::{self, TypeId};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};

use crate::container::Managed;

pub use name::Name;

/// Identifies a requested contract type, e.g. `Arc<dyn Logger>`.
///
/// Two keys are equal if and only if they are built from the same type. The
/// type name is only kept for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name)
    }
}

/// Addresses one registration in a container: a target type together with
/// the registration's [`Name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    target: TypeKey,
    name: Name,
}

impl Key {
    pub fn new<N>(target: TypeKey, name: N) -> Self
    where
        N: Into<Name>,
    {
        Self {
            target,
            name: name.into(),
        }
    }

    pub fn target(&self) -> TypeKey {
        self.target
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn is_default(&self) -> bool {
        self.name.is_default()
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}@{}", self.target, self.name)
    }
}

/// Returns the key of the default registration of `T`.
pub fn of<T>() -> Key
where
    T: Managed,
{
    Key::new(TypeKey::of::<T>(), Name::DEFAULT)
}

/// Returns the key of the registration of `T` with the given name. An empty
/// name yields the same key as [`of`].
pub fn named<T>(name: impl Into<Name>) -> Key
where
    T: Managed,
{
    Key::new(TypeKey::of::<T>(), name)
}
