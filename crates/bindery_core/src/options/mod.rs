//! Options tree model.
//!
//! # Responsibility
//! - Represent ViewModel options as an explicit tagged tree.
//! - Provide the inheritance merge used at extension and instantiation time.
//!
//! # Invariants
//! - Only `OptionValue::Map` is treated as a nested options mapping.
//! - `Function` and `Class` values keep shared identity when copied.

pub mod inherit;

use crate::template::TemplateFragment;
use crate::viewmodel::ViewModelClass;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Prototype mixin table. Applied to the prototype, never inherited.
pub const KEY_PROTO: &str = "proto";
/// Root element. Instance-only, never inherited.
pub const KEY_EL: &str = "el";
/// Template source markup.
pub const KEY_TEMPLATE: &str = "template";
/// Fragment parsed from `template` at extension time.
pub const KEY_TEMPLATE_FRAGMENT: &str = "templateFragment";
pub const KEY_SCOPE: &str = "scope";
pub const KEY_VMS: &str = "vms";
pub const KEY_DIRECTIVES: &str = "directives";
pub const KEY_FILTERS: &str = "filters";
pub const KEY_PARTIALS: &str = "partials";
pub const KEY_TRANSITIONS: &str = "transitions";

type NativeFn = dyn Fn(&[OptionValue]) -> OptionValue + Send + Sync;

/// Shared callable stored in options, prototypes and registries.
///
/// Equality is identity: two handles are equal only when they share the same
/// underlying closure.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    call: Arc<NativeFn>,
}

impl Function {
    pub fn new<F>(name: &str, call: F) -> Self
    where
        F: Fn(&[OptionValue]) -> OptionValue + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            call: Arc::new(call),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[OptionValue]) -> OptionValue {
        (self.call)(args)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Function({})", self.name)
    }
}

/// Opaque handle to a host element, addressed by selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    selector: String,
}

impl ElementHandle {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }
}

/// One value in an options tree.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Nested options mapping; the only variant merges recurse into.
    Map(Options),
    Function(Function),
    Class(ViewModelClass),
    Text(String),
    Number(f64),
    Bool(bool),
    Fragment(TemplateFragment),
    Element(ElementHandle),
}

impl OptionValue {
    pub fn as_map(&self) -> Option<&Options> {
        match self {
            Self::Map(options) => Some(options),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Options> {
        match self {
            Self::Map(options) => Some(options),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ViewModelClass> {
        match self {
            Self::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_fragment(&self) -> Option<&TemplateFragment> {
        match self {
            Self::Fragment(fragment) => Some(fragment),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&ElementHandle> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Short variant name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Map(_) => "map",
            Self::Function(_) => "function",
            Self::Class(_) => "class",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Fragment(_) => "fragment",
            Self::Element(_) => "element",
        }
    }
}

impl From<Options> for OptionValue {
    fn from(value: Options) -> Self {
        Self::Map(value)
    }
}

impl From<Function> for OptionValue {
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}

impl From<ViewModelClass> for OptionValue {
    fn from(value: ViewModelClass) -> Self {
        Self::Class(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<TemplateFragment> for OptionValue {
    fn from(value: TemplateFragment) -> Self {
        Self::Fragment(value)
    }
}

impl From<ElementHandle> for OptionValue {
    fn from(value: ElementHandle) -> Self {
        Self::Element(value)
    }
}

/// Ordered mapping from option name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: BTreeMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts `value`, returning the previous value under `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut OptionValue> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.entries.remove(key)
    }

    /// Nested mapping under `key`, if that value is a map.
    pub fn map(&self, key: &str) -> Option<&Options> {
        self.get(key).and_then(OptionValue::as_map)
    }

    /// Text value under `key`, if that value is text.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_text)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, OptionValue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Options {
    type Item = (String, OptionValue);
    type IntoIter = btree_map::IntoIter<String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = btree_map::Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
