//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `bindery_core` linkage without a host runtime.
//! - Print the derived attribute names for a prefix deterministically.

use bindery_core::{Bindery, ConfigPatch};

fn main() {
    let mut bindery = Bindery::new();
    if let Some(prefix) = std::env::args().nth(1) {
        bindery.configure(ConfigPatch::new().prefix(prefix));
    }

    let config = bindery.config();
    println!("bindery_core version={}", bindery_core::core_version());
    println!("prefix={}", config.prefix());
    for (name, value) in [
        ("idAttr", config.id_attr()),
        ("vmAttr", config.vm_attr()),
        ("preAttr", config.pre_attr()),
        ("textAttr", config.text_attr()),
        ("repeatAttr", config.repeat_attr()),
        ("partialAttr", config.partial_attr()),
        ("transAttr", config.trans_attr()),
        ("transClassAttr", config.trans_class_attr()),
    ] {
        println!("{name}={value}");
    }
}
