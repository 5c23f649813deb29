//! Binding configuration record.
//!
//! # Responsibility
//! - Hold the naming prefix and behavior flags read by the binding compiler.
//! - Derive every special attribute name from the current prefix.
//!
//! # Invariants
//! - Derived attribute names always equal `prefix + "-" + suffix`.
//! - A prefix change regenerates all derived names before `configure` returns.
//! - Derived names are never writable on their own.

use log::debug;
use serde::{Deserialize, Serialize};

/// Prefix used when no configuration has been applied.
pub const DEFAULT_PREFIX: &str = "sd";

const ID_SUFFIX: &str = "id";
const VM_SUFFIX: &str = "viewmodel";
const PRE_SUFFIX: &str = "pre";
const TEXT_SUFFIX: &str = "text";
const REPEAT_SUFFIX: &str = "repeat";
const PARTIAL_SUFFIX: &str = "partial";
const TRANS_SUFFIX: &str = "transition";
const TRANS_CLASS_SUFFIX: &str = "transition-class";

/// Special attribute names recognized during compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeNames {
    pub id_attr: String,
    pub vm_attr: String,
    pub pre_attr: String,
    pub text_attr: String,
    pub repeat_attr: String,
    pub partial_attr: String,
    pub trans_attr: String,
    pub trans_class_attr: String,
}

impl AttributeNames {
    /// Builds the full attribute name set for `prefix`.
    pub fn for_prefix(prefix: &str) -> Self {
        let name = |suffix: &str| format!("{prefix}-{suffix}");
        Self {
            id_attr: name(ID_SUFFIX),
            vm_attr: name(VM_SUFFIX),
            pre_attr: name(PRE_SUFFIX),
            text_attr: name(TEXT_SUFFIX),
            repeat_attr: name(REPEAT_SUFFIX),
            partial_attr: name(PARTIAL_SUFFIX),
            trans_attr: name(TRANS_SUFFIX),
            trans_class_attr: name(TRANS_CLASS_SUFFIX),
        }
    }
}

/// Configuration record shared by the binding compiler.
///
/// Fields are read through accessors so the prefix and the derived attribute
/// names can only change together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    prefix: String,
    debug: bool,
    silent: bool,
    enter_class: String,
    leave_class: String,
    #[serde(flatten)]
    attrs: AttributeNames,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            debug: false,
            silent: false,
            enter_class: format!("{DEFAULT_PREFIX}-enter"),
            leave_class: format!("{DEFAULT_PREFIX}-leave"),
            attrs: AttributeNames::for_prefix(DEFAULT_PREFIX),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow-merges `patch` into this record.
    ///
    /// Keys absent from the patch keep their current value. When the patch
    /// carries a prefix, every derived attribute name is regenerated in the
    /// same call.
    pub fn apply(&mut self, patch: ConfigPatch) {
        if patch.is_empty() {
            return;
        }

        if let Some(debug) = patch.debug {
            self.debug = debug;
        }
        if let Some(silent) = patch.silent {
            self.silent = silent;
        }
        if let Some(enter_class) = patch.enter_class {
            self.enter_class = enter_class;
        }
        if let Some(leave_class) = patch.leave_class {
            self.leave_class = leave_class;
        }
        if let Some(prefix) = patch.prefix {
            self.attrs = AttributeNames::for_prefix(&prefix);
            self.prefix = prefix;
            debug!(
                "event=config_prefix_updated module=config prefix={}",
                self.prefix
            );
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn silent(&self) -> bool {
        self.silent
    }

    /// CSS class applied while an element is entering.
    pub fn enter_class(&self) -> &str {
        &self.enter_class
    }

    /// CSS class applied while an element is leaving.
    pub fn leave_class(&self) -> &str {
        &self.leave_class
    }

    pub fn attrs(&self) -> &AttributeNames {
        &self.attrs
    }

    pub fn id_attr(&self) -> &str {
        &self.attrs.id_attr
    }

    pub fn vm_attr(&self) -> &str {
        &self.attrs.vm_attr
    }

    pub fn pre_attr(&self) -> &str {
        &self.attrs.pre_attr
    }

    pub fn text_attr(&self) -> &str {
        &self.attrs.text_attr
    }

    pub fn repeat_attr(&self) -> &str {
        &self.attrs.repeat_attr
    }

    pub fn partial_attr(&self) -> &str {
        &self.attrs.partial_attr
    }

    pub fn trans_attr(&self) -> &str {
        &self.attrs.trans_attr
    }

    pub fn trans_class_attr(&self) -> &str {
        &self.attrs.trans_class_attr
    }
}

/// Partial configuration merged by [`Config::apply`].
///
/// Accepts both snake_case and the camelCase keys used by browser-side
/// configuration objects (`enterClass`, `leaveClass`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigPatch {
    pub prefix: Option<String>,
    pub debug: Option<bool>,
    pub silent: Option<bool>,
    #[serde(alias = "enterClass")]
    pub enter_class: Option<String>,
    #[serde(alias = "leaveClass")]
    pub leave_class: Option<String>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = Some(silent);
        self
    }

    pub fn enter_class(mut self, class: impl Into<String>) -> Self {
        self.enter_class = Some(class.into());
        self
    }

    pub fn leave_class(mut self, class: impl Into<String>) -> Self {
        self.leave_class = Some(class.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeNames, Config, ConfigPatch, DEFAULT_PREFIX};

    #[test]
    fn default_config_derives_names_from_default_prefix() {
        let config = Config::new();
        assert_eq!(config.prefix(), DEFAULT_PREFIX);
        assert_eq!(config.id_attr(), "sd-id");
        assert_eq!(config.trans_class_attr(), "sd-transition-class");
    }

    #[test]
    fn prefix_change_regenerates_every_attribute_name() {
        let mut config = Config::new();
        config.apply(ConfigPatch::new().prefix("x"));

        assert_eq!(config.prefix(), "x");
        assert_eq!(config.attrs(), &AttributeNames::for_prefix("x"));
        assert_eq!(config.id_attr(), "x-id");
        assert_eq!(config.vm_attr(), "x-viewmodel");
        assert_eq!(config.pre_attr(), "x-pre");
        assert_eq!(config.text_attr(), "x-text");
        assert_eq!(config.repeat_attr(), "x-repeat");
        assert_eq!(config.partial_attr(), "x-partial");
        assert_eq!(config.trans_attr(), "x-transition");
        assert_eq!(config.trans_class_attr(), "x-transition-class");
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut config = Config::new();
        config.apply(ConfigPatch::new());
        assert_eq!(config, Config::new());
    }

    #[test]
    fn later_writes_override_earlier_ones() {
        let mut config = Config::new();
        config.apply(ConfigPatch::new().debug(true).enter_class("fade-in"));
        config.apply(ConfigPatch::new().debug(false));

        assert!(!config.debug());
        assert_eq!(config.enter_class(), "fade-in");
        assert_eq!(config.leave_class(), "sd-leave");
    }

    #[test]
    fn patch_without_prefix_keeps_attribute_names() {
        let mut config = Config::new();
        config.apply(ConfigPatch::new().prefix("v"));
        config.apply(ConfigPatch::new().silent(true));

        assert!(config.silent());
        assert_eq!(config.id_attr(), "v-id");
    }
}
