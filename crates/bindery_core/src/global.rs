//! Process-wide, install-once binding context.
//!
//! # Invariants
//! - A context can be installed at most once per process.
//! - The installed context is only reachable through shared references, so
//!   all mutation happens before `install`.

use crate::context::Bindery;
use log::{info, warn};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

static INSTALLED: OnceCell<Bindery> = OnceCell::new();

/// Installs `bindery` as the process-wide context.
///
/// # Errors
/// - Returns [`GlobalError::AlreadyInstalled`] when a context is already
///   installed; the existing context is kept.
pub fn install(bindery: Bindery) -> Result<&'static Bindery, GlobalError> {
    let mut fresh = false;
    let installed = INSTALLED.get_or_init(|| {
        fresh = true;
        bindery
    });
    if !fresh {
        warn!("event=global_install module=global status=rejected reason=already_installed");
        return Err(GlobalError::AlreadyInstalled);
    }

    info!(
        "event=global_install module=global status=ok prefix={} directives={} filters={} viewmodels={} partials={} transitions={}",
        installed.config().prefix(),
        installed.directives().len(),
        installed.filters().len(),
        installed.viewmodels().len(),
        installed.partials().len(),
        installed.transitions().len()
    );
    Ok(installed)
}

/// Returns the installed context, if any.
pub fn installed() -> Option<&'static Bindery> {
    INSTALLED.get()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalError {
    AlreadyInstalled,
}

impl Display for GlobalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyInstalled => write!(f, "binding context already installed"),
        }
    }
}

impl Error for GlobalError {}
