use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use super::*;
use crate::view::InputValue;

// =============================================================
// Helpers
// =============================================================

fn recorder() -> (SnapshotCallback, Rc<RefCell<Vec<Snapshot>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = Rc::clone(&seen);
    let callback: SnapshotCallback = Rc::new(move |s: &Snapshot| seen_cb.borrow_mut().push(s.clone()));
    (callback, seen)
}

fn last(seen: &Rc<RefCell<Vec<Snapshot>>>) -> Snapshot {
    seen.borrow().last().cloned().unwrap()
}

fn mixed_schema() -> SettingsSchema {
    SettingsSchema::new()
        .text("n", "Name", "Oppo")
        .slider("s", "Size", 0.4, 0.0, 1.0, 0.01)
        .vec3("v", "Position", [0.2, 0.5, 1.0], 0.0, 1.0, 0.01)
        .check("c", "Wireframe", false)
}

// =============================================================
// Snapshot shape
// =============================================================

#[test]
fn one_entry_per_field_id() {
    let (callback, seen) = recorder();
    let _rendered = render_settings("", &mixed_schema(), callback);
    let snapshot = last(&seen);
    assert_eq!(snapshot.len(), 4);
    assert_eq!(snapshot.get("n"), Some(&json!("Oppo")));
    assert_eq!(snapshot.get("s"), Some(&json!(0.4)));
    assert_eq!(snapshot.get("v"), Some(&json!([0.2, 0.5, 1.0])));
    assert_eq!(snapshot.get("c"), Some(&json!(false)));
}

#[test]
fn nested_group_produces_nested_snapshot() {
    let schema = SettingsSchema::new()
        .text("n", "Name", "Oppo")
        .group("planet", "Planet", SettingsSchema::new().slider("r", "Radius", 0.5, 0.0, 1.0, 0.1));
    let (callback, seen) = recorder();
    let _rendered = render_settings("", &schema, callback);
    let snapshot = last(&seen);
    assert_eq!(snapshot.get("planet"), Some(&json!({ "r": 0.5 })));
}

#[test]
fn data_field_is_seeded_without_fragment() {
    let schema = SettingsSchema::new().text("n", "Name", "Oppo").data("seed", json!({ "k": 7 }));
    let (callback, seen) = recorder();
    let rendered = render_settings("", &schema, callback);
    assert_eq!(last(&seen).get("seed"), Some(&json!({ "k": 7 })));
    assert_eq!(rendered.node.inputs().len(), 1);
}

#[test]
fn final_flush_delivers_full_snapshot() {
    let (callback, seen) = recorder();
    let _rendered = render_settings("", &mixed_schema(), callback);
    // One seed per leaf renderer plus the closing flush.
    assert_eq!(seen.borrow().len(), 5);
    assert_eq!(seen.borrow()[4].len(), 4);
}

#[test]
fn empty_schema_flushes_empty_snapshot() {
    let (callback, seen) = recorder();
    let _rendered = render_settings("", &SettingsSchema::new(), callback);
    assert_eq!(*seen.borrow(), vec![Snapshot::new()]);
}

// =============================================================
// Unknown kinds
// =============================================================

#[test]
fn unknown_type_is_skipped_and_siblings_render() {
    let schema = SettingsSchema::from_json(
        r#"{ "fields": [
            { "id": "a", "name": "A", "type": "text", "value": "x" },
            { "id": "b", "name": "B", "type": "bogus", "value": 1 },
            { "id": "c", "name": "C", "type": "check", "value": true }
        ] }"#,
    )
    .unwrap();
    let (callback, seen) = recorder();
    let rendered = render_settings("", &schema, callback);

    let snapshot = last(&seen);
    assert!(!snapshot.contains("b"));
    assert_eq!(snapshot.len(), 2);
    assert!(rendered.node.find_field("A").is_some());
    assert!(rendered.node.find_field("B").is_none());
    assert!(rendered.node.find_field("C").is_some());
}

// =============================================================
// Edits
// =============================================================

#[test]
fn leaf_edit_bubbles_full_snapshot() {
    let (callback, seen) = recorder();
    let rendered = render_settings("", &mixed_schema(), callback);
    rendered.node.find_input("Name").unwrap().input(InputValue::text("Zarg"));

    let snapshot = last(&seen);
    assert_eq!(snapshot.get("n"), Some(&json!("Zarg")));
    assert_eq!(snapshot.get("s"), Some(&json!(0.4)));
    assert_eq!(snapshot.get("v"), Some(&json!([0.2, 0.5, 1.0])));
    assert_eq!(snapshot.get("c"), Some(&json!(false)));
}

#[test]
fn nested_edit_bubbles_whole_tree() {
    let schema = SettingsSchema::new()
        .text("n", "Name", "Oppo")
        .group("planet", "Planet", SettingsSchema::new().vec3("v", "Tint", [0.2, 0.5, 1.0], 0.0, 1.0, 0.01));
    let (callback, seen) = recorder();
    let rendered = render_settings("", &schema, callback);

    let tint = rendered.node.find_field("Tint").unwrap();
    tint.find_input("y").unwrap().input(InputValue::text("0.75"));

    let snapshot = last(&seen);
    assert_eq!(snapshot.get("n"), Some(&json!("Oppo")));
    assert_eq!(snapshot.get("planet"), Some(&json!({ "v": [0.2, 0.75, 1.0] })));
}

#[test]
fn each_edit_calls_parent_once() {
    let (callback, seen) = recorder();
    let rendered = render_settings("", &mixed_schema(), callback);
    let before = seen.borrow().len();
    rendered.node.find_input("Wireframe").unwrap().input(InputValue::Checked(true));
    assert_eq!(seen.borrow().len(), before + 1);
}

// =============================================================
// Markup
// =============================================================

#[test]
fn group_wrapper_carries_schema_class() {
    let schema = SettingsSchema::new().with_class("planet").check("c", "On", true);
    let (callback, _seen) = recorder();
    let rendered = render_settings("Planet", &schema, callback);
    assert!(rendered.node.has_class("settings"));
    assert!(rendered.node.has_class("planet"));
    assert_eq!(rendered.node.label(), Some("Planet"));
}

#[test]
fn fields_render_in_schema_order() {
    let (callback, _seen) = recorder();
    let rendered = render_settings("", &mixed_schema(), callback);
    let body = rendered.node.children.last().unwrap();
    let labels: Vec<&str> = body.children.iter().filter_map(Node::label).collect();
    assert_eq!(labels, vec!["Name", "Size", "Position", "Wireframe"]);
}

#[test]
fn snapshot_keys_follow_schema_order() {
    let schema = SettingsSchema::new().text("z", "Zed", "a").check("a", "Ay", true);
    let (callback, seen) = recorder();
    let _rendered = render_settings("", &schema, callback);
    assert_eq!(serde_json::to_string(&last(&seen)).unwrap(), r#"{"z":"a","a":true}"#);
}

// =============================================================
// Arrays
// =============================================================

fn array_schema() -> SettingsSchema {
    SettingsSchema::new().text("n", "Name", "Oppo").array(
        "layers",
        "Layers",
        vec![
            FieldSchema::new("", "Depth", FieldKind::Slider { value: 0.2, min: 0.0, max: 1.0, inc: 0.1 }),
            FieldSchema::new("", "Visible", FieldKind::Check { value: true }),
        ],
    )
}

#[test]
fn array_field_seeds_array_of_item_values() {
    let (callback, seen) = recorder();
    let rendered = render_settings("", &array_schema(), callback);
    assert_eq!(last(&seen).get("layers"), Some(&json!([0.2, true])));
    assert!(rendered.node.find_field("Layers").unwrap().has_class("array"));
}

#[test]
fn empty_array_from_json_is_present_in_snapshot() {
    let schema =
        SettingsSchema::from_json(r#"{ "fields": [ { "id": "arr", "type": "array", "inner": [] } ] }"#).unwrap();
    let (callback, seen) = recorder();
    let _rendered = render_settings("", &schema, callback);
    assert_eq!(last(&seen).get("arr"), Some(&json!([])));
}

#[test]
fn array_item_edit_bubbles_whole_array() {
    let (callback, seen) = recorder();
    let rendered = render_settings("", &array_schema(), callback);
    rendered.node.find_input("Visible").unwrap().input(InputValue::Checked(false));

    let snapshot = last(&seen);
    assert_eq!(snapshot.get("layers"), Some(&json!([0.2, false])));
    assert_eq!(snapshot.get("n"), Some(&json!("Oppo")));
}

#[test]
fn array_skips_unknown_items() {
    let schema = SettingsSchema::from_json(
        r#"{ "fields": [ { "id": "arr", "type": "array", "inner": [
            { "type": "bogus" },
            { "name": "On", "type": "check", "value": true }
        ] } ] }"#,
    )
    .unwrap();
    let (callback, seen) = recorder();
    let _rendered = render_settings("", &schema, callback);
    assert_eq!(last(&seen).get("arr"), Some(&json!([true])));
}

#[test]
fn array_setter_updates_items_without_reporting() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = Rc::clone(&seen);
    let on_change: OnChange = Rc::new(move |v: Value| seen_cb.borrow_mut().push(v));
    let items = vec![
        FieldSchema::new("", "A", FieldKind::Text { value: "x".to_owned() }),
        FieldSchema::new("", "B", FieldKind::Text { value: "y".to_owned() }),
    ];
    let rendered = render_array("List", &items, on_change);
    let reported = seen.borrow().len();

    (rendered.setter)(&json!(["p", "q"]));
    assert_eq!(seen.borrow().len(), reported);
    assert_eq!(rendered.node.find_input("B").unwrap().value(), InputValue::text("q"));

    rendered.node.find_input("A").unwrap().input(InputValue::text("r"));
    assert_eq!(seen.borrow().last(), Some(&json!(["r", "q"])));
}
