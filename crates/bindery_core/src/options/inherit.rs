//! Option inheritance merge.
//!
//! Child values always win. Nested maps such as `scope`, `vms` or
//! `directives` accumulate across generations, but only one level deep:
//! nested calls never recurse further.

use crate::options::{OptionValue, Options, KEY_EL, KEY_PROTO};

/// Merges `parent` into `child` and returns the merged tree.
///
/// - An absent `child` starts as an empty mapping.
/// - An absent `parent` returns `child` unchanged.
/// - `el` and `proto` are never copied down, at any depth.
/// - Keys missing from `child` take `parent`'s value.
/// - On a `top_level` call, keys holding a map on both sides are merged in
///   place one level down with `top_level = false`.
///
/// `parent` is only read.
pub fn inherit(child: Option<Options>, parent: Option<&Options>, top_level: bool) -> Options {
    let mut child = child.unwrap_or_default();
    let Some(parent) = parent else {
        return child;
    };
    inherit_into(&mut child, parent, top_level);
    child
}

fn inherit_into(child: &mut Options, parent: &Options, top_level: bool) {
    for (key, parent_value) in parent {
        if key == KEY_EL || key == KEY_PROTO {
            continue;
        }
        if !child.contains_key(key) {
            child.insert(key.clone(), parent_value.clone());
            continue;
        }
        if !top_level {
            continue;
        }
        if let (Some(OptionValue::Map(child_map)), OptionValue::Map(parent_map)) =
            (child.get_mut(key), parent_value)
        {
            inherit_into(child_map, parent_map, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::inherit;
    use crate::options::{ElementHandle, Function, OptionValue, Options};

    #[test]
    fn absent_child_starts_empty_and_absent_parent_is_identity() {
        assert!(inherit(None, None, true).is_empty());

        let child = Options::new().with("a", 1.0);
        assert_eq!(inherit(Some(child.clone()), None, true), child);
    }

    #[test]
    fn child_wins_at_leaf_level() {
        let parent = Options::new().with("title", "parent").with("only_parent", true);
        let child = Options::new().with("title", "child");

        let merged = inherit(Some(child), Some(&parent), true);
        assert_eq!(merged.text("title"), Some("child"));
        assert_eq!(merged.get("only_parent"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn parent_only_function_keeps_identity() {
        let handler = Function::new("handler", |_| OptionValue::Bool(true));
        let parent = Options::new().with("handler", handler.clone());

        let merged = inherit(None, Some(&parent), true);
        let copied = merged
            .get("handler")
            .and_then(OptionValue::as_function)
            .expect("handler should be copied");
        assert!(copied.ptr_eq(&handler));
    }

    #[test]
    fn el_and_proto_never_propagate() {
        let parent = Options::new()
            .with("el", ElementHandle::new("#app"))
            .with(
                "proto",
                Options::new().with("greet", Function::new("greet", |_| OptionValue::Bool(true))),
            )
            .with(
                "scope",
                Options::new().with("el", "nested").with("proto", "nested"),
            );

        let merged = inherit(None, Some(&parent), true);
        assert!(!merged.contains_key("el"));
        assert!(!merged.contains_key("proto"));

        let child = Options::new().with("scope", Options::new().with("x", 1.0));
        let merged = inherit(Some(child), Some(&parent), true);
        let scope = merged.map("scope").expect("scope map");
        assert!(!scope.contains_key("el"));
        assert!(!scope.contains_key("proto"));
        assert_eq!(scope.get("x"), Some(&OptionValue::Number(1.0)));
    }

    #[test]
    fn merges_nested_maps_exactly_one_level_deep() {
        let parent = Options::new().with(
            "scope",
            Options::new()
                .with("a", "parent-a")
                .with("b", "parent-b")
                .with("deep", Options::new().with("x", 1.0).with("y", 2.0)),
        );
        let child = Options::new().with(
            "scope",
            Options::new()
                .with("a", "child-a")
                .with("deep", Options::new().with("x", 10.0)),
        );

        let merged = inherit(Some(child), Some(&parent), true);
        let scope = merged.map("scope").expect("scope map");
        assert_eq!(scope.text("a"), Some("child-a"));
        assert_eq!(scope.text("b"), Some("parent-b"));

        let deep = scope.map("deep").expect("deep map");
        assert_eq!(deep.get("x"), Some(&OptionValue::Number(10.0)));
        assert!(!deep.contains_key("y"));
    }

    #[test]
    fn non_top_level_call_never_recurses() {
        let parent = Options::new().with("nested", Options::new().with("p", true));
        let child = Options::new().with("nested", Options::new().with("c", true));

        let merged = inherit(Some(child), Some(&parent), false);
        let nested = merged.map("nested").expect("nested map");
        assert!(nested.contains_key("c"));
        assert!(!nested.contains_key("p"));
    }

    #[test]
    fn non_map_child_value_is_left_untouched() {
        let parent = Options::new().with("scope", Options::new().with("a", 1.0));
        let child = Options::new().with("scope", "not a map");

        let merged = inherit(Some(child), Some(&parent), true);
        assert_eq!(merged.text("scope"), Some("not a map"));
    }

    #[test]
    fn parent_is_not_modified() {
        let parent = Options::new().with("scope", Options::new().with("a", 1.0));
        let snapshot = parent.clone();
        let child = Options::new().with("scope", Options::new().with("b", 2.0));

        let _ = inherit(Some(child), Some(&parent), true);
        assert_eq!(parent, snapshot);
    }
}
