//! Id-keyed registries for reusable binding units.
//!
//! # Responsibility
//! - Store directives, filters, viewmodel classes, partials and transitions.
//! - Keep each kind in its own namespace.
//!
//! # Invariants
//! - `register` overwrites silently; the last write wins.
//! - Lookups of unknown ids return `None`, never an error.
//! - Registries share no state with each other.

pub mod entries;

use log::debug;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub use entries::{Directive, TransitionDefinition};

/// Registry kind label used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegistryKind {
    Directive,
    Filter,
    ViewModel,
    Partial,
    Transition,
}

impl RegistryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directive => "directive",
            Self::Filter => "filter",
            Self::ViewModel => "viewmodel",
            Self::Partial => "partial",
            Self::Transition => "transition",
        }
    }
}

/// Single-kind id-keyed store.
#[derive(Clone)]
pub struct Registry<T> {
    kind: RegistryKind,
    entries: BTreeMap<String, T>,
}

impl<T> Registry<T> {
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Returns the entry registered under `id`.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    /// Stores `value` under `id`, replacing any previous entry.
    pub fn register(&mut self, id: impl Into<String>, value: T) -> &mut Self {
        let id = id.into();
        let replaced = self.entries.insert(id.clone(), value).is_some();
        debug!(
            "event=registry_set module=registry kind={} id={} replaced={}",
            self.kind.as_str(),
            id,
            replaced
        );
        self
    }

    /// Stores `value` under `id` unless the id is blank or already taken.
    ///
    /// Opt-in alternative to [`Registry::register`] for callers that want
    /// conflicts surfaced instead of overwritten.
    pub fn try_register(
        &mut self,
        id: impl Into<String>,
        value: T,
    ) -> Result<&mut Self, RegistryError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RegistryError::EmptyId(self.kind));
        }
        if self.entries.contains_key(id.as_str()) {
            return Err(RegistryError::DuplicateId { kind: self.kind, id });
        }
        Ok(self.register(id, value))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.entries.remove(id)
    }

    /// Returns registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Debug for Registry<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("ids", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Strict registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    EmptyId(RegistryKind),
    DuplicateId { kind: RegistryKind, id: String },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId(kind) => write!(f, "{} id must not be empty", kind.as_str()),
            Self::DuplicateId { kind, id } => {
                write!(f, "{} id already registered: {id}", kind.as_str())
            }
        }
    }
}

impl Error for RegistryError {}
