//! Component registry
//!
//! Tracks, per component kind, which definitions have been registered under
//! a stable name. Entries are keyed by [`ComponentId`], never by content, so
//! only definitions the caller deliberately reuses are deduplicated.

use indexmap::IndexMap;
use shapedoc_core::{Header, Response};
use std::collections::{BTreeMap, HashMap};

use crate::descriptor::{ComponentId, Descriptor, ResponseDef};
use crate::error::{GenerateError, Result};
use crate::options::DuplicateNamePolicy;

/// Kind of reusable component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Header,
    Response,
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Response => write!(f, "response"),
        }
    }
}

/// Registration state of one definition
#[derive(Debug, Clone, PartialEq)]
pub enum Registration<F> {
    /// Name reserved, fragment not built yet
    Pending { name: String },
    /// Fragment built and published under `name`
    Complete { fragment: F, name: String },
}

impl<F> Registration<F> {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Pending { name } | Self::Complete { name, .. } => name,
        }
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Name of a completed registration
    #[must_use]
    pub fn complete_name(&self) -> Option<&str> {
        match self {
            Self::Complete { name, .. } => Some(name),
            Self::Pending { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry<S, F> {
    source: S,
    registration: Registration<F>,
}

/// Registrations of one component kind
#[derive(Debug, Clone)]
pub struct ComponentTable<S, F> {
    kind: ComponentKind,
    entries: IndexMap<ComponentId, Entry<S, F>>,
    names: HashMap<String, ComponentId>,
}

impl<S: Clone, F: Clone + PartialEq> ComponentTable<S, F> {
    fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
            names: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    #[must_use]
    pub fn get(&self, id: ComponentId) -> Option<&Registration<F>> {
        self.entries.get(&id).map(|entry| &entry.registration)
    }

    /// Number of registrations, pending or complete
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reserve `name` for the definition without building it.
    ///
    /// Reserving the same name twice is a no-op.
    pub fn reserve(
        &mut self,
        id: ComponentId,
        source: S,
        name: String,
        policy: DuplicateNamePolicy,
    ) -> Result<()> {
        if let Some(existing) = self.entries.get(&id) {
            if existing.registration.name() == name {
                return Ok(());
            }
            return Err(GenerateError::AlreadyRegistered {
                kind: self.kind,
                name,
            });
        }
        if let Some(&owner) = self.names.get(&name)
            && owner != id
            && policy == DuplicateNamePolicy::Reject
        {
            return Err(GenerateError::DuplicateComponentName {
                kind: self.kind,
                name,
            });
        }

        tracing::debug!(kind = %self.kind, %name, %id, "reserved component name");
        self.names.insert(name.clone(), id);
        self.entries.insert(
            id,
            Entry {
                source,
                registration: Registration::Pending { name },
            },
        );
        Ok(())
    }

    /// Record the built fragment for the definition under `name`.
    ///
    /// A definition completes at most once. Another definition may share the
    /// name only if its fragment is identical, or when `policy` allows it.
    pub fn complete(
        &mut self,
        id: ComponentId,
        source: S,
        fragment: F,
        name: String,
        policy: DuplicateNamePolicy,
    ) -> Result<()> {
        let previous_name = match self.entries.get(&id) {
            Some(Entry {
                registration: Registration::Complete { name: existing, .. },
                ..
            }) => {
                return Err(GenerateError::AlreadyRegistered {
                    kind: self.kind,
                    name: existing.clone(),
                });
            }
            Some(Entry {
                registration: Registration::Pending { name: reserved },
                ..
            }) => Some(reserved.clone()),
            None => None,
        };

        if let Some(&owner) = self.names.get(&name)
            && owner != id
        {
            let same_fragment = matches!(
                self.get(owner),
                Some(Registration::Complete { fragment: other, .. }) if *other == fragment
            );
            if !same_fragment {
                match policy {
                    DuplicateNamePolicy::Reject => {
                        return Err(GenerateError::DuplicateComponentName {
                            kind: self.kind,
                            name,
                        });
                    }
                    DuplicateNamePolicy::LastWriteWins => {
                        tracing::warn!(kind = %self.kind, %name, "component name reassigned");
                    }
                }
            }
        }

        if let Some(previous) = previous_name
            && previous != name
            && self.names.get(&previous) == Some(&id)
        {
            self.names.remove(&previous);
        }

        tracing::debug!(kind = %self.kind, %name, %id, "registered component");
        self.names.insert(name.clone(), id);
        self.entries.insert(
            id,
            Entry {
                source,
                registration: Registration::Complete { fragment, name },
            },
        );
        Ok(())
    }

    /// Sources of pending registrations that still own their reserved name,
    /// in reservation order.
    ///
    /// A reservation whose name was reassigned under
    /// [`DuplicateNamePolicy::LastWriteWins`] is left out.
    #[must_use]
    pub fn pending(&self) -> Vec<S> {
        self.entries
            .iter()
            .filter(|(id, entry)| match &entry.registration {
                Registration::Pending { name } => self.names.get(name) == Some(*id),
                Registration::Complete { .. } => false,
            })
            .map(|(_, entry)| entry.source.clone())
            .collect()
    }

    /// Completed fragments by name.
    ///
    /// Each name resolves to the definition that currently owns it.
    fn export(&self) -> Result<BTreeMap<String, F>> {
        let mut out = BTreeMap::new();
        for (name, id) in &self.names {
            match self.get(*id) {
                Some(Registration::Complete { fragment, .. }) => {
                    out.insert(name.clone(), fragment.clone());
                }
                _ => {
                    return Err(GenerateError::UnresolvedPending {
                        kind: self.kind,
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(out)
    }
}

/// Per-build store of header and response registrations
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    pub headers: ComponentTable<Descriptor, Header>,
    pub responses: ComponentTable<ResponseDef, Response>,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            headers: ComponentTable::new(ComponentKind::Header),
            responses: ComponentTable::new(ComponentKind::Response),
        }
    }

    /// Completed headers by name
    pub fn export_headers(&self) -> Result<BTreeMap<String, Header>> {
        self.headers.export()
    }

    /// Completed responses by name
    pub fn export_responses(&self) -> Result<BTreeMap<String, Response>> {
        self.responses.export()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
