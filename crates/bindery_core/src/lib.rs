//! Extension, configuration and registry core of the Bindery UI-binding library.
//! The binding compiler reads everything it needs from a [`Bindery`] context.

pub mod config;
pub mod context;
pub mod global;
pub mod logging;
pub mod options;
pub mod registry;
pub mod template;
pub mod viewmodel;

pub use config::{AttributeNames, Config, ConfigPatch, DEFAULT_PREFIX};
pub use context::Bindery;
pub use global::GlobalError;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use options::inherit::inherit;
pub use options::{ElementHandle, Function, OptionValue, Options};
pub use registry::{Directive, Registry, RegistryError, RegistryKind, TransitionDefinition};
pub use template::{TemplateElement, TemplateFragment, TemplateNode};
pub use viewmodel::{ClassId, ExtendError, Prototype, ViewModel, ViewModelClass};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
