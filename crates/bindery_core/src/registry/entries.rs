//! Directive and transition definitions.

use crate::options::Function;

/// Directive definition consumed by the binding compiler.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Bare function, called on every value update.
    Update(Function),
    /// Hook set; any hook may be omitted.
    Hooks {
        bind: Option<Function>,
        update: Option<Function>,
        unbind: Option<Function>,
    },
}

impl Directive {
    /// Returns the update hook, whichever shape the directive has.
    pub fn update(&self) -> Option<&Function> {
        match self {
            Self::Update(update) => Some(update),
            Self::Hooks { update, .. } => update.as_ref(),
        }
    }

    pub fn bind(&self) -> Option<&Function> {
        match self {
            Self::Update(_) => None,
            Self::Hooks { bind, .. } => bind.as_ref(),
        }
    }

    pub fn unbind(&self) -> Option<&Function> {
        match self {
            Self::Update(_) => None,
            Self::Hooks { unbind, .. } => unbind.as_ref(),
        }
    }
}

impl From<Function> for Directive {
    fn from(value: Function) -> Self {
        Self::Update(value)
    }
}

/// Transition definition: JavaScript-style enter/leave hooks.
///
/// A definition with neither hook is valid; the compiler then falls back to
/// the configured enter/leave classes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionDefinition {
    pub enter: Option<Function>,
    pub leave: Option<Function>,
}

impl TransitionDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enter(mut self, enter: Function) -> Self {
        self.enter = Some(enter);
        self
    }

    pub fn with_leave(mut self, leave: Function) -> Self {
        self.leave = Some(leave);
        self
    }

    /// Whether the definition relies on configured CSS classes only.
    pub fn is_class_based(&self) -> bool {
        self.enter.is_none() && self.leave.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{Directive, TransitionDefinition};
    use crate::options::{Function, OptionValue};

    fn noop(name: &str) -> Function {
        Function::new(name, |_| OptionValue::Bool(true))
    }

    #[test]
    fn bare_directive_exposes_update_only() {
        let update = noop("update");
        let directive = Directive::from(update.clone());
        assert_eq!(directive.update(), Some(&update));
        assert!(directive.bind().is_none());
        assert!(directive.unbind().is_none());
    }

    #[test]
    fn hook_directive_exposes_each_hook() {
        let bind = noop("bind");
        let directive = Directive::Hooks {
            bind: Some(bind.clone()),
            update: None,
            unbind: None,
        };
        assert_eq!(directive.bind(), Some(&bind));
        assert!(directive.update().is_none());
    }

    #[test]
    fn transition_without_hooks_is_class_based() {
        assert!(TransitionDefinition::new().is_class_based());
        assert!(!TransitionDefinition::new()
            .with_enter(noop("enter"))
            .is_class_based());
    }
}
