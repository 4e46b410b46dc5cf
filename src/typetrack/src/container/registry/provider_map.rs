use std::collections::HashMap;
use std::mem;
use std::sync::Arc;

use crate::container::events::RegistrationKind;
use crate::container::Lifetime;
use crate::key::{Key, TypeKey};
use crate::provider::{Provider, SharedProvider};

/// All providers registered in a container, grouped by target type.
///
/// Registering a key that already exists replaces its provider in place, so
/// the original registration order of named keys is kept.
#[derive(Debug)]
pub struct ProviderMap {
    providers: HashMap<TypeKey, ProviderSlot>,
}

impl ProviderMap {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Inserts `entry`, returning the entry it replaces.
    pub fn insert(&mut self, entry: ProviderEntry) -> Option<ProviderEntry> {
        let target = entry.key().target();
        if let Some(slot) = self.providers.get_mut(&target) {
            slot.insert(entry)
        } else {
            self.providers.insert(target, entry.into());
            None
        }
    }

    pub fn get(&self, key: &Key) -> Option<&ProviderEntry> {
        self.providers
            .get(&key.target())
            .and_then(|slot| slot.get(key))
    }

    /// Returns the keys of all named registrations of `target` in
    /// registration order.
    pub fn named_keys(&self, target: TypeKey) -> Vec<Key> {
        self.providers
            .get(&target)
            .map(|slot| {
                slot.entries()
                    .iter()
                    .map(ProviderEntry::key)
                    .filter(|key| !key.is_default())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug)]
enum ProviderSlot {
    Single(ProviderEntry),
    Many(Vec<ProviderEntry>),
}

impl ProviderSlot {
    fn insert(&mut self, entry: ProviderEntry) -> Option<ProviderEntry> {
        match self {
            Self::Single(existing) if existing.key() == entry.key() => {
                Some(mem::replace(existing, entry))
            }
            Self::Single(_) => {
                let Self::Single(existing) = mem::replace(self, Self::Many(Vec::with_capacity(2)))
                else {
                    unreachable!("`self` should match `Self::Single(_)`")
                };
                let Self::Many(entries) = self else {
                    unreachable!("`self` should already be assigned to `Self::Many(_)`")
                };
                entries.push(existing);
                entries.push(entry);
                None
            }
            Self::Many(entries) => {
                if let Some(existing) = entries.iter_mut().find(|e| e.key() == entry.key()) {
                    Some(mem::replace(existing, entry))
                } else {
                    entries.push(entry);
                    None
                }
            }
        }
    }

    fn get(&self, key: &Key) -> Option<&ProviderEntry> {
        self.entries().iter().find(|entry| entry.key() == key)
    }

    fn entries(&self) -> &[ProviderEntry] {
        match self {
            Self::Single(entry) => std::slice::from_ref(entry),
            Self::Many(entries) => entries,
        }
    }
}

impl From<ProviderEntry> for ProviderSlot {
    fn from(entry: ProviderEntry) -> Self {
        Self::Single(entry)
    }
}

#[derive(Debug, Clone)]
pub enum ProviderEntry {
    Singleton {
        key: Key,
        kind: RegistrationKind,
        provider: Arc<dyn SharedProvider>,
    },
    Transient {
        key: Key,
        kind: RegistrationKind,
        provider: Arc<dyn Provider>,
    },
}

impl ProviderEntry {
    pub fn new_singleton(
        key: Key,
        kind: RegistrationKind,
        provider: Arc<dyn SharedProvider>,
    ) -> Self {
        Self::Singleton {
            key,
            kind,
            provider,
        }
    }

    pub fn new_transient(key: Key, kind: RegistrationKind, provider: Arc<dyn Provider>) -> Self {
        Self::Transient {
            key,
            kind,
            provider,
        }
    }

    pub fn key(&self) -> &Key {
        match self {
            Self::Singleton { key, .. } => key,
            Self::Transient { key, .. } => key,
        }
    }

    pub fn kind(&self) -> RegistrationKind {
        match self {
            Self::Singleton { kind, .. } => *kind,
            Self::Transient { kind, .. } => *kind,
        }
    }

    pub fn lifetime(&self) -> Lifetime {
        match self {
            Self::Singleton { .. } => Lifetime::Singleton,
            Self::Transient { .. } => Lifetime::Transient,
        }
    }
}
