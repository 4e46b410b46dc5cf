use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use tracing::debug;

use crate::container::events::{RegistrationEvent, RegistrationObserver};
use crate::key::{Name, TypeKey};

/// Every `(type, name)` pair registered on a container since tracking began.
///
/// Pairs are only ever added. A type is present iff at least one pair with
/// that type has been recorded.
#[derive(Debug, Default)]
pub struct TypeIndex {
    names: RwLock<HashMap<TypeKey, HashSet<Name>>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Default::default()
    }

    /// Records the pair, returning `true` if it was not recorded before.
    pub fn insert(&self, target: TypeKey, name: impl Into<Name>) -> bool {
        self.names
            .write()
            .entry(target)
            .or_default()
            .insert(name.into())
    }

    pub fn has_name(&self, target: TypeKey, name: &Name) -> bool {
        self.names
            .read()
            .get(&target)
            .is_some_and(|names| names.contains(name))
    }

    pub fn has_any(&self, target: TypeKey) -> bool {
        self.names
            .read()
            .get(&target)
            .is_some_and(|names| !names.is_empty())
    }

    /// Returns the names recorded for `target`, sorted, with the default
    /// name first if present.
    pub fn names(&self, target: TypeKey) -> Vec<Name> {
        let mut names: Vec<Name> = self
            .names
            .read()
            .get(&target)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Returns the number of tracked types.
    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }
}

impl RegistrationObserver for TypeIndex {
    fn on_register(&self, event: &RegistrationEvent) {
        if self.insert(event.target(), event.name()) {
            debug!(
                target_type = %event.target(),
                name = %event.name(),
                kind = ?event.kind(),
                "tracking registration"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::container::events::RegistrationKind;
    use crate::key;

    use super::*;

    #[test]
    fn type_index_insert_is_idempotent() {
        let index = TypeIndex::new();
        assert!(index.insert(TypeKey::of::<i32>(), ""));
        assert!(!index.insert(TypeKey::of::<i32>(), None::<&str>));
        assert!(index.insert(TypeKey::of::<i32>(), "a"));
        assert!(!index.insert(TypeKey::of::<i32>(), "a"));

        assert_eq!(index.len(), 1);
        assert!(index.has_name(TypeKey::of::<i32>(), &Name::DEFAULT));
        assert!(index.has_name(TypeKey::of::<i32>(), &Name::from("a")));
        assert_eq!(index.names(TypeKey::of::<i32>()).len(), 2);
    }

    #[test]
    fn type_index_unknown_type_has_nothing() {
        let index = TypeIndex::new();
        index.insert(TypeKey::of::<i32>(), "a");

        assert!(!index.is_empty());
        assert!(!index.has_any(TypeKey::of::<u32>()));
        assert!(!index.has_name(TypeKey::of::<u32>(), &Name::DEFAULT));
        assert!(!index.has_name(TypeKey::of::<i32>(), &Name::DEFAULT));
        assert!(index.names(TypeKey::of::<u32>()).is_empty());
    }

    #[test]
    fn type_index_names_are_sorted_with_default_first() {
        let index = TypeIndex::new();
        index.insert(TypeKey::of::<i32>(), "b");
        index.insert(TypeKey::of::<i32>(), "a");
        index.insert(TypeKey::of::<i32>(), "");

        assert_eq!(
            index.names(TypeKey::of::<i32>()),
            vec![Name::DEFAULT, Name::from("a"), Name::from("b")]
        );
    }

    #[test]
    fn type_index_records_observed_events() {
        let index = TypeIndex::new();
        let event = RegistrationEvent::new(RegistrationKind::Type, key::named::<i32>("n"));
        index.on_register(&event);
        index.on_register(&event);

        assert!(index.has_any(TypeKey::of::<i32>()));
        assert!(index.has_name(TypeKey::of::<i32>(), &Name::from("n")));
        assert_eq!(index.names(TypeKey::of::<i32>()), vec![Name::from("n")]);
    }
}
