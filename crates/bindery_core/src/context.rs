//! Binding context: configuration, registries and the base class.
//!
//! # Responsibility
//! - Own the configuration record and the five registries.
//! - Expose symmetric register/lookup pairs for each registry.
//! - Derive classes from the base ViewModel class.
//!
//! # Invariants
//! - Mutation requires `&mut Bindery`; a shared or installed context is
//!   read-only.
//! - Partials are stored as parsed fragments, never as raw source.

use crate::config::{Config, ConfigPatch};
use crate::options::{Function, Options};
use crate::registry::{Directive, Registry, RegistryError, RegistryKind, TransitionDefinition};
use crate::template::TemplateFragment;
use crate::viewmodel::{ExtendError, ViewModelClass};
use log::debug;

/// Explicit owner of everything the binding compiler reads at setup time.
#[derive(Debug, Clone)]
pub struct Bindery {
    config: Config,
    base: ViewModelClass,
    directives: Registry<Directive>,
    filters: Registry<Function>,
    viewmodels: Registry<ViewModelClass>,
    partials: Registry<TemplateFragment>,
    transitions: Registry<TransitionDefinition>,
}

impl Default for Bindery {
    fn default() -> Self {
        Self::with_base(ViewModelClass::base())
    }
}

impl Bindery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context around a caller-built base class.
    pub fn with_base(base: ViewModelClass) -> Self {
        Self {
            config: Config::default(),
            base,
            directives: Registry::new(RegistryKind::Directive),
            filters: Registry::new(RegistryKind::Filter),
            viewmodels: Registry::new(RegistryKind::ViewModel),
            partials: Registry::new(RegistryKind::Partial),
            transitions: Registry::new(RegistryKind::Transition),
        }
    }

    /// Merges `patch` into the configuration record.
    pub fn configure(&mut self, patch: ConfigPatch) -> &mut Self {
        self.config.apply(patch);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base(&self) -> &ViewModelClass {
        &self.base
    }

    /// Derives a class from the base class.
    pub fn extend(&self, options: Options) -> Result<ViewModelClass, ExtendError> {
        self.base.extend(options)
    }

    pub fn directive(&mut self, id: impl Into<String>, directive: impl Into<Directive>) -> &mut Self {
        self.directives.register(id, directive.into());
        self
    }

    pub fn get_directive(&self, id: &str) -> Option<&Directive> {
        self.directives.get(id)
    }

    pub fn filter(&mut self, id: impl Into<String>, filter: Function) -> &mut Self {
        self.filters.register(id, filter);
        self
    }

    pub fn get_filter(&self, id: &str) -> Option<&Function> {
        self.filters.get(id)
    }

    pub fn viewmodel(&mut self, id: impl Into<String>, class: ViewModelClass) -> &mut Self {
        self.viewmodels.register(id, class);
        self
    }

    pub fn get_viewmodel(&self, id: &str) -> Option<&ViewModelClass> {
        self.viewmodels.get(id)
    }

    /// Parses `template` and stores the resulting fragment under `id`.
    pub fn partial(&mut self, id: impl Into<String>, template: &str) -> &mut Self {
        let fragment = TemplateFragment::parse(template);
        debug!(
            "event=partial_parsed module=context nodes={}",
            fragment.len()
        );
        self.partials.register(id, fragment);
        self
    }

    /// Like [`Bindery::partial`], but rejects blank or already-registered ids.
    pub fn try_partial(
        &mut self,
        id: impl Into<String>,
        template: &str,
    ) -> Result<&mut Self, RegistryError> {
        self.partials
            .try_register(id, TemplateFragment::parse(template))?;
        Ok(self)
    }

    pub fn get_partial(&self, id: &str) -> Option<&TemplateFragment> {
        self.partials.get(id)
    }

    pub fn transition(
        &mut self,
        id: impl Into<String>,
        transition: TransitionDefinition,
    ) -> &mut Self {
        self.transitions.register(id, transition);
        self
    }

    pub fn get_transition(&self, id: &str) -> Option<&TransitionDefinition> {
        self.transitions.get(id)
    }

    pub fn directives(&self) -> &Registry<Directive> {
        &self.directives
    }

    pub fn directives_mut(&mut self) -> &mut Registry<Directive> {
        &mut self.directives
    }

    pub fn filters(&self) -> &Registry<Function> {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut Registry<Function> {
        &mut self.filters
    }

    pub fn viewmodels(&self) -> &Registry<ViewModelClass> {
        &self.viewmodels
    }

    pub fn viewmodels_mut(&mut self) -> &mut Registry<ViewModelClass> {
        &mut self.viewmodels
    }

    pub fn partials(&self) -> &Registry<TemplateFragment> {
        &self.partials
    }

    pub fn transitions(&self) -> &Registry<TransitionDefinition> {
        &self.transitions
    }

    pub fn transitions_mut(&mut self) -> &mut Registry<TransitionDefinition> {
        &mut self.transitions
    }
}
