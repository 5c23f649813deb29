use bindery_core::{Bindery, ConfigPatch};

#[test]
fn configure_prefix_updates_all_names_in_one_call() {
    let mut bindery = Bindery::new();
    bindery.configure(ConfigPatch::new().prefix("x"));

    let config = bindery.config();
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
fn patch_deserializes_from_camel_case_json() {
    let patch: ConfigPatch =
        serde_json::from_str(r#"{"prefix":"v","debug":true,"enterClass":"in"}"#)
            .expect("patch should deserialize");

    let mut bindery = Bindery::new();
    bindery.configure(patch);
    assert_eq!(bindery.config().prefix(), "v");
    assert!(bindery.config().debug());
    assert_eq!(bindery.config().enter_class(), "in");
    assert_eq!(bindery.config().repeat_attr(), "v-repeat");
}

#[test]
fn patch_rejects_derived_and_unknown_keys() {
    let derived = serde_json::from_str::<ConfigPatch>(r#"{"idAttr":"custom-id"}"#);
    assert!(derived.is_err());
    let unknown = serde_json::from_str::<ConfigPatch>(r#"{"colour":"red"}"#);
    assert!(unknown.is_err());
}

#[test]
fn config_serializes_with_flattened_attribute_names() {
    let mut bindery = Bindery::new();
    bindery.configure(ConfigPatch::new().prefix("q"));

    let json = serde_json::to_value(bindery.config()).expect("config should serialize");
    assert_eq!(json["prefix"], "q");
    assert_eq!(json["vmAttr"], "q-viewmodel");
    assert_eq!(json["transClassAttr"], "q-transition-class");
    assert_eq!(json["leaveClass"], "sd-leave");
}
