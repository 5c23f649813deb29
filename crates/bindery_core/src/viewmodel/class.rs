//! ViewModel class descriptors and the extension engine.

use crate::options::inherit::inherit;
use crate::options::{
    Function, OptionValue, Options, KEY_PROTO, KEY_TEMPLATE, KEY_TEMPLATE_FRAGMENT,
};
use crate::template::TemplateFragment;
use crate::viewmodel::instance::ViewModel;
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

/// Stable identity of one ViewModel class.
pub type ClassId = Uuid;

/// Member name bound to the class itself on every prototype.
pub const CONSTRUCTOR_MEMBER: &str = "constructor";

/// Core instance API names owned by the base class.
///
/// Mixins can never shadow these, whether or not the base class carries an
/// implementation for them.
pub const RESERVED_MEMBERS: &[&str] = &[
    CONSTRUCTOR_MEMBER,
    "$get",
    "$set",
    "$watch",
    "$unwatch",
    "$destroy",
    "$emit",
    "$on",
    "$off",
    "$once",
    "$broadcast",
    "$appendTo",
    "$remove",
    "$before",
    "$after",
];

/// Behavior table of one class, linked to its parent's table.
///
/// The `constructor` link is kept apart from the members so it never shows
/// up when members are listed.
#[derive(Debug)]
pub struct Prototype {
    constructor: ClassId,
    members: BTreeMap<String, Function>,
    parent: Option<Arc<Prototype>>,
}

impl Prototype {
    /// Class this prototype belongs to.
    pub fn constructor_id(&self) -> ClassId {
        self.constructor
    }

    /// Members defined directly on this prototype.
    pub fn own_members(&self) -> impl Iterator<Item = (&str, &Function)> {
        self.members
            .iter()
            .map(|(name, function)| (name.as_str(), function))
    }

    pub fn get_own(&self, name: &str) -> Option<&Function> {
        self.members.get(name)
    }

    /// Resolves `name` on this prototype, then up the parent chain.
    pub fn lookup(&self, name: &str) -> Option<&Function> {
        let mut current = Some(self);
        while let Some(proto) = current {
            if let Some(function) = proto.members.get(name) {
                return Some(function);
            }
            current = proto.parent.as_deref();
        }
        None
    }

    /// Names of every member defined on this prototype or any ancestor.
    pub fn member_names(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        let mut current = Some(self);
        while let Some(proto) = current {
            names.extend(proto.members.keys().map(String::as_str));
            current = proto.parent.as_deref();
        }
        names
    }

    pub fn parent(&self) -> Option<&Prototype> {
        self.parent.as_deref()
    }
}

struct ClassInner {
    id: ClassId,
    options: Options,
    parent: Option<ViewModelClass>,
    prototype: Arc<Prototype>,
    // Only populated on the base class.
    protected: BTreeSet<String>,
}

/// Extensible ViewModel constructor.
///
/// Cloning yields another handle to the same class. A class never changes
/// after creation; `extend` always builds a new one.
#[derive(Clone)]
pub struct ViewModelClass {
    inner: Arc<ClassInner>,
}

impl ViewModelClass {
    /// Base class with no core method implementations.
    pub fn base() -> Self {
        Self::base_with(std::iter::empty::<(String, Function)>())
    }

    /// Base class carrying the given core methods.
    ///
    /// Every method name, plus [`RESERVED_MEMBERS`], is protected from
    /// mixins in all derived classes.
    pub fn base_with<I, K>(methods: I) -> Self
    where
        I: IntoIterator<Item = (K, Function)>,
        K: Into<String>,
    {
        let id = Uuid::new_v4();
        let members: BTreeMap<String, Function> = methods
            .into_iter()
            .map(|(name, function)| (name.into(), function))
            .collect();
        let mut protected: BTreeSet<String> =
            RESERVED_MEMBERS.iter().map(|name| name.to_string()).collect();
        protected.extend(members.keys().cloned());

        Self {
            inner: Arc::new(ClassInner {
                id,
                options: Options::new(),
                parent: None,
                prototype: Arc::new(Prototype {
                    constructor: id,
                    members,
                    parent: None,
                }),
                protected,
            }),
        }
    }

    pub fn id(&self) -> ClassId {
        self.inner.id
    }

    /// Resolved class-level options.
    pub fn options(&self) -> &Options {
        &self.inner.options
    }

    /// Immediate parent class; `None` for the base class.
    pub fn parent(&self) -> Option<&ViewModelClass> {
        self.inner.parent.as_ref()
    }

    pub fn prototype(&self) -> &Prototype {
        &self.inner.prototype
    }

    pub fn is_base(&self) -> bool {
        self.inner.parent.is_none()
    }

    /// Number of extension levels below the base class.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// This class followed by each ancestor up to the base class.
    pub fn ancestors(&self) -> impl Iterator<Item = &ViewModelClass> {
        std::iter::successors(Some(self), |class| class.parent())
    }

    /// The base class this chain was derived from.
    pub fn base_class(&self) -> &ViewModelClass {
        let mut class = self;
        while let Some(parent) = class.parent() {
            class = parent;
        }
        class
    }

    /// Whether `class` is this class or one of its ancestors.
    pub fn is_subclass_of(&self, class: &ViewModelClass) -> bool {
        self.ancestors().any(|ancestor| ancestor.id() == class.id())
    }

    /// Whether mixins may not define `name` anywhere in this chain.
    pub fn is_protected(&self, name: &str) -> bool {
        self.base_class().inner.protected.contains(name)
    }

    /// Derives a new class from this one.
    ///
    /// `options` is merged over this class's options. `proto` mixins land on
    /// the new prototype except for names protected by the base class, and a
    /// `template` is parsed once into `templateFragment`.
    ///
    /// # Errors
    /// - `proto` is present but not a map of functions.
    /// - `template` is present but not text.
    pub fn extend(&self, options: Options) -> Result<ViewModelClass, ExtendError> {
        let mut merged = inherit(Some(options), Some(self.options()), true);

        let mixins = proto_mixins(&merged)?;
        attach_template_fragment(&mut merged)?;

        let id = Uuid::new_v4();
        let mut members = BTreeMap::new();
        for (name, function) in mixins {
            if self.is_protected(&name) {
                debug!(
                    "event=proto_mixin_skipped module=viewmodel class_id={} member={} reason=protected",
                    id, name
                );
                continue;
            }
            members.insert(name, function);
        }

        let class = Self {
            inner: Arc::new(ClassInner {
                id,
                options: merged,
                parent: Some(self.clone()),
                prototype: Arc::new(Prototype {
                    constructor: id,
                    members,
                    parent: Some(Arc::clone(&self.inner.prototype)),
                }),
                protected: BTreeSet::new(),
            }),
        };
        info!(
            "event=viewmodel_extend module=viewmodel status=ok class_id={} parent_id={} depth={}",
            class.id(),
            self.id(),
            class.depth()
        );
        Ok(class)
    }

    /// Resolves instance options against this class and every ancestor.
    ///
    /// Instance options win over class options, which win over anything
    /// inherited from further up the chain.
    pub fn resolve_options(&self, options: Option<Options>) -> Options {
        let mut resolved = options;
        // Why: each class level merges its own options again, the way a
        // derived constructor hands its merged options to its parent's
        // constructor. Repeating the merge is idempotent for keys already
        // copied at extension time.
        for class in self.ancestors() {
            resolved = Some(inherit(resolved, Some(class.options()), true));
        }
        resolved.unwrap_or_default()
    }

    /// Creates an instance with options resolved through the class chain.
    ///
    /// An instance `template` is parsed into its own `templateFragment`, so it
    /// replaces any fragment inherited from the class.
    ///
    /// # Errors
    /// - `template` is present in `options` but not text.
    pub fn instantiate(&self, options: Option<Options>) -> Result<ViewModel, ExtendError> {
        let options = match options {
            Some(mut options) => {
                attach_template_fragment(&mut options)?;
                Some(options)
            }
            None => None,
        };
        let resolved = self.resolve_options(options);
        debug!(
            "event=viewmodel_instantiate module=viewmodel class_id={} option_count={}",
            self.id(),
            resolved.len()
        );
        Ok(ViewModel::new(self.clone(), resolved))
    }
}

impl PartialEq for ViewModelClass {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for ViewModelClass {}

impl Debug for ViewModelClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewModelClass")
            .field("id", &self.id())
            .field("parent", &self.parent().map(ViewModelClass::id))
            .field("options", &self.options().keys().collect::<Vec<_>>())
            .finish()
    }
}

fn attach_template_fragment(options: &mut Options) -> Result<(), ExtendError> {
    let fragment = match options.get(KEY_TEMPLATE) {
        Some(OptionValue::Text(source)) => TemplateFragment::parse(source),
        Some(other) => {
            return Err(ExtendError::InvalidTemplate {
                found: other.kind(),
            })
        }
        None => return Ok(()),
    };
    options.insert(KEY_TEMPLATE_FRAGMENT, fragment);
    Ok(())
}

fn proto_mixins(options: &Options) -> Result<Vec<(String, Function)>, ExtendError> {
    let Some(proto) = options.get(KEY_PROTO) else {
        return Ok(Vec::new());
    };
    let OptionValue::Map(proto) = proto else {
        return Err(ExtendError::InvalidProto {
            found: proto.kind(),
        });
    };
    proto
        .iter()
        .map(|(name, value)| match value {
            OptionValue::Function(function) => Ok((name.clone(), function.clone())),
            other => Err(ExtendError::InvalidProtoMember {
                name: name.clone(),
                found: other.kind(),
            }),
        })
        .collect()
}

/// Structural errors in extension options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendError {
    InvalidProto { found: &'static str },
    InvalidProtoMember { name: String, found: &'static str },
    InvalidTemplate { found: &'static str },
}

impl Display for ExtendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProto { found } => {
                write!(f, "`proto` option must be a map, got {found}")
            }
            Self::InvalidProtoMember { name, found } => {
                write!(f, "`proto` member `{name}` must be a function, got {found}")
            }
            Self::InvalidTemplate { found } => {
                write!(f, "`template` option must be text, got {found}")
            }
        }
    }
}

impl Error for ExtendError {}
