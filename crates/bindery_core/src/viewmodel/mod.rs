//! ViewModel classes, extension and instantiation.
//!
//! # Responsibility
//! - Derive specialized ViewModel classes from a base class.
//! - Resolve per-instance options through the whole class chain.
//!
//! # Invariants
//! - A class descriptor is immutable once created.
//! - Every prototype links to its parent's prototype; lookups walk that chain.
//! - Mixins never shadow names protected by the base class.
//! - Instance options > class options > ancestor class options.

pub mod class;
pub mod instance;

pub use class::{ClassId, ExtendError, Prototype, ViewModelClass, RESERVED_MEMBERS};
pub use instance::ViewModel;
