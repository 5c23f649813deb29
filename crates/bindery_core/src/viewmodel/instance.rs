//! ViewModel instances.

use crate::options::{
    ElementHandle, Function, OptionValue, Options, KEY_EL, KEY_TEMPLATE_FRAGMENT,
};
use crate::template::TemplateFragment;
use crate::viewmodel::class::ViewModelClass;

/// One instantiated ViewModel.
///
/// Holds its class and the fully resolved options handed to the binding
/// compiler. Methods resolve through the class's prototype chain.
#[derive(Debug, Clone)]
pub struct ViewModel {
    class: ViewModelClass,
    options: Options,
}

impl ViewModel {
    pub(crate) fn new(class: ViewModelClass, options: Options) -> Self {
        Self { class, options }
    }

    pub fn class(&self) -> &ViewModelClass {
        &self.class
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Root element given at instantiation.
    pub fn el(&self) -> Option<&ElementHandle> {
        self.options.get(KEY_EL).and_then(OptionValue::as_element)
    }

    pub fn template_fragment(&self) -> Option<&TemplateFragment> {
        self.options
            .get(KEY_TEMPLATE_FRAGMENT)
            .and_then(OptionValue::as_fragment)
    }

    /// Whether this instance was built from `class` or a class derived from it.
    pub fn is_instance_of(&self, class: &ViewModelClass) -> bool {
        self.class.is_subclass_of(class)
    }

    pub fn method(&self, name: &str) -> Option<&Function> {
        self.class.prototype().lookup(name)
    }

    /// Calls method `name`; `None` when no class in the chain defines it.
    pub fn call(&self, name: &str, args: &[OptionValue]) -> Option<OptionValue> {
        self.method(name).map(|method| method.call(args))
    }
}
