use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use super::*;
use crate::view::InputValue;

// =============================================================
// Helpers
// =============================================================

fn spy(panel: &SettingsPanel) -> Rc<RefCell<Vec<Snapshot>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = Rc::clone(&seen);
    panel.add_settings_change_listener(move |s| seen_cb.borrow_mut().push(s.clone()));
    seen
}

fn oppo_schema() -> SettingsSchema {
    SettingsSchema::from_json(r#"{ "fields": [ { "id": "n", "type": "text", "name": "Name", "value": "Oppo" } ] }"#)
        .unwrap()
}

fn rich_schema() -> SettingsSchema {
    SettingsSchema::new()
        .text("n", "Name", "Oppo")
        .slider("s", "Size", 0.4, 0.0, 1.0, 0.01)
        .vec3("v", "Position", [0.2, 0.5, 1.0], 0.0, 1.0, 0.01)
        .check("c", "Wireframe", false)
        .group("planet", "Planet", SettingsSchema::new().slider("r", "Radius", 0.5, 0.0, 1.0, 0.1))
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_panel_has_no_render() {
    let panel = SettingsPanel::new();
    assert!(panel.root().is_none());
    assert!(panel.snapshot().is_none());
}

#[test]
fn seeding_never_reaches_listeners() {
    let mut panel = SettingsPanel::new();
    let seen = spy(&panel);
    panel.set_settings(&rich_schema());
    assert!(seen.borrow().is_empty());
}

#[test]
fn snapshot_after_render_matches_schema() {
    let mut panel = SettingsPanel::new();
    panel.set_settings(&oppo_schema());
    let snapshot = panel.snapshot().unwrap();
    assert_eq!(snapshot.to_value(), json!({ "n": "Oppo" }));
}

// =============================================================
// Edits
// =============================================================

#[test]
fn text_edit_reaches_listener() {
    let mut panel = SettingsPanel::new();
    let seen = spy(&panel);
    let input = panel.set_settings(&oppo_schema()).find_input("Name").unwrap();

    input.input(InputValue::text("Zarg"));

    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0].to_value(), json!({ "n": "Zarg" }));
    assert_eq!(panel.snapshot().unwrap().to_value(), json!({ "n": "Zarg" }));
}

#[test]
fn one_listener_call_per_edit() {
    let mut panel = SettingsPanel::new();
    let seen = spy(&panel);
    let root = panel.set_settings(&rich_schema());
    root.find_input("Size").unwrap().input(InputValue::text("0.1"));
    root.find_input("Wireframe").unwrap().input(InputValue::Checked(true));
    root.find_input("Radius").unwrap().input(InputValue::text("0.9"));
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn edit_leaves_other_fields_unchanged() {
    let mut panel = SettingsPanel::new();
    let seen = spy(&panel);
    let root = panel.set_settings(&rich_schema());
    root.find_input("Size").unwrap().input(InputValue::text("0.1"));

    let snapshot = seen.borrow()[0].clone();
    assert_eq!(snapshot.get("s"), Some(&json!(0.1)));
    assert_eq!(snapshot.get("n"), Some(&json!("Oppo")));
    assert_eq!(snapshot.get("v"), Some(&json!([0.2, 0.5, 1.0])));
    assert_eq!(snapshot.get("c"), Some(&json!(false)));
    assert_eq!(snapshot.get("planet"), Some(&json!({ "r": 0.5 })));
}

#[test]
fn vector_component_edit_reports_whole_vector() {
    let mut panel = SettingsPanel::new();
    let seen = spy(&panel);
    let root = panel.set_settings(&rich_schema());
    let y = root.find_field("Position").unwrap().find_input("y").unwrap();

    y.input(InputValue::text("0.75"));

    assert_eq!(seen.borrow()[0].get("v"), Some(&json!([0.2, 0.75, 1.0])));
}

#[test]
fn nested_edit_reports_top_level_snapshot() {
    let mut panel = SettingsPanel::new();
    let seen = spy(&panel);
    let root = panel.set_settings(&rich_schema());
    root.find_input("Radius").unwrap().input(InputValue::text("0.9"));

    let snapshot = seen.borrow()[0].clone();
    assert_eq!(snapshot.len(), 5);
    assert_eq!(snapshot.group("planet").unwrap().get("r"), Some(&json!(0.9)));
}

#[test]
fn unknown_field_is_omitted_from_snapshot() {
    let mut panel = SettingsPanel::new();
    let root = panel
        .set_settings_json(
            r#"{ "fields": [
                { "id": "n", "type": "text", "name": "Name", "value": "Oppo" },
                { "id": "b", "type": "bogus", "name": "Bogus" },
                { "id": "c", "type": "check", "name": "On", "value": true }
            ] }"#,
        )
        .unwrap();
    assert!(root.find_field("Name").is_some());
    assert!(root.find_field("On").is_some());
    let snapshot = panel.snapshot().unwrap();
    assert!(!snapshot.contains("b"));
    assert_eq!(snapshot.len(), 2);
}

// =============================================================
// Re-rendering
// =============================================================

#[test]
fn identical_schemas_render_identically() {
    let mut panel = SettingsPanel::new();
    let first_tree = panel.set_settings(&rich_schema()).to_string();
    let first_snapshot = panel.snapshot().unwrap();
    let second_tree = panel.set_settings(&rich_schema()).to_string();
    let second_snapshot = panel.snapshot().unwrap();
    assert_eq!(first_tree, second_tree);
    assert_eq!(first_snapshot, second_snapshot);
}

#[test]
fn rerender_discards_previous_edits() {
    let mut panel = SettingsPanel::new();
    panel.set_settings(&oppo_schema()).find_input("Name").unwrap().input(InputValue::text("Zarg"));
    panel.set_settings(&oppo_schema());
    assert_eq!(panel.snapshot().unwrap().get("n"), Some(&json!("Oppo")));
}

#[test]
fn stale_inputs_stop_notifying_after_rerender() {
    let mut panel = SettingsPanel::new();
    let seen = spy(&panel);
    let stale = panel.set_settings(&oppo_schema()).find_input("Name").unwrap();
    panel.set_settings(&oppo_schema());

    stale.input(InputValue::text("Zarg"));

    assert!(seen.borrow().is_empty());
}

#[test]
fn listeners_survive_rerender() {
    let mut panel = SettingsPanel::new();
    let seen = spy(&panel);
    panel.set_settings(&oppo_schema());
    let input = panel.set_settings(&oppo_schema()).find_input("Name").unwrap();
    input.input(InputValue::text("Zarg"));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn invalid_json_keeps_previous_render() {
    let mut panel = SettingsPanel::new();
    panel.set_settings(&oppo_schema());
    let result = panel.set_settings_json(r#"{ "fields": [ { "id": "n", "type": "text" } ] }"#);
    assert!(matches!(result, Err(PanelError::Schema(_))));
    assert!(panel.root().is_some());
}

#[test]
fn clear_drops_render() {
    let mut panel = SettingsPanel::new();
    panel.set_settings(&oppo_schema());
    panel.clear();
    assert!(panel.root().is_none());
}

// =============================================================
// Listener management
// =============================================================

#[test]
fn removed_listener_is_not_notified() {
    let mut panel = SettingsPanel::new();
    let seen = Rc::new(RefCell::new(0));
    let seen_cb = Rc::clone(&seen);
    let id = panel.add_settings_change_listener(move |_| *seen_cb.borrow_mut() += 1);
    assert!(panel.remove_settings_change_listener(id));
    assert_eq!(panel.listener_count(), 0);

    panel.set_settings(&oppo_schema()).find_input("Name").unwrap().input(InputValue::text("Zarg"));

    assert_eq!(*seen.borrow(), 0);
}

#[test]
fn panels_have_independent_listener_scopes() {
    let mut a = SettingsPanel::new();
    let b = SettingsPanel::new();
    let seen_b = spy(&b);
    a.set_settings(&oppo_schema()).find_input("Name").unwrap().input(InputValue::text("Zarg"));
    assert!(seen_b.borrow().is_empty());
}
