use paramedit::editor::{Color, Editor, Model, Param, ParamType, ParamValue};

fn dress_params() -> Vec<Param> {
    vec![Param::new(1, "Назначение"), Param::new(2, "Длина")]
}

fn dress_model() -> Model {
    Model {
        param_values: vec![
            ParamValue::new(1, "повседневное"),
            ParamValue::new(2, "макси"),
        ],
        colors: Vec::new(),
    }
}

fn dress_editor() -> Editor {
    Editor::new(dress_params(), dress_model())
}

#[test]
fn test_construction_fills_missing_values_with_empty_string() {
    let model = Model {
        param_values: vec![ParamValue::new(2, "макси")],
        colors: Vec::new(),
    };
    let editor = Editor::new(dress_params(), model);

    assert_eq!(editor.param_value(1), Some(""));
    assert_eq!(editor.param_value(2), Some("макси"));
    assert_eq!(editor.new_color_name(), "");
    assert!(editor.colors().is_empty());
}

#[test]
fn test_construction_keeps_initial_colors() {
    let model = Model {
        param_values: Vec::new(),
        colors: vec![Color {
            id: 42,
            name: "Красный".into(),
        }],
    };
    let editor = Editor::new(dress_params(), model);
    assert_eq!(editor.colors().len(), 1);
    assert_eq!(editor.params()[0].kind, ParamType::String);
}

#[test]
fn test_snapshot_has_latest_value_per_param() {
    let mut editor = dress_editor();
    let updates = [(2, "мини"), (1, "вечернее"), (2, ""), (1, "офисное")];
    for (id, value) in updates {
        editor.update_param_value(id, value);
    }

    let snapshot = editor.snapshot();
    assert_eq!(
        snapshot.param_values,
        vec![ParamValue::new(1, "офисное"), ParamValue::new(2, "")]
    );
}

#[test]
fn test_snapshot_follows_declaration_order() {
    let params = vec![Param::new(9, "Z"), Param::new(3, "A"), Param::new(5, "M")];
    let mut editor = Editor::new(params, Model::default());
    editor.update_param_value(3, "a");
    editor.update_param_value(5, "m");
    editor.update_param_value(9, "z");

    let ids: Vec<u32> = editor
        .snapshot()
        .param_values
        .iter()
        .map(|pv| pv.param_id)
        .collect();
    assert_eq!(ids, vec![9, 3, 5]);
}

#[test]
fn test_snapshot_is_idempotent() {
    let mut editor = dress_editor();
    editor.update_new_color_name("Синий");
    editor.add_color();

    let first = editor.snapshot();
    let second = editor.snapshot();
    assert_eq!(first, second);
}

#[test]
fn test_snapshot_does_not_alias_editor_state() {
    let mut editor = dress_editor();
    let before = editor.snapshot();
    editor.update_param_value(1, "вечернее");
    assert_eq!(before.param_values[0].value, "повседневное");
}

#[test]
fn test_add_color_trims_name() {
    let mut editor = dress_editor();
    editor.update_new_color_name("  Red  ");
    let id = editor.add_color();

    assert!(id.is_some());
    assert_eq!(editor.colors().len(), 1);
    assert_eq!(editor.colors()[0].name, "Red");
    assert_eq!(editor.new_color_name(), "");
}

#[test]
fn test_add_blank_color_is_noop_and_keeps_staging() {
    let mut editor = dress_editor();
    editor.update_new_color_name("   ");
    assert_eq!(editor.add_color(), None);

    assert!(editor.colors().is_empty());
    assert_eq!(editor.new_color_name(), "   ");
}

#[test]
fn test_staging_text_is_stored_verbatim() {
    let mut editor = dress_editor();
    editor.update_new_color_name("  Зелёный ");
    assert_eq!(editor.new_color_name(), "  Зелёный ");
}

#[test]
fn test_delete_missing_color_leaves_list_unchanged() {
    let mut editor = dress_editor();
    for name in ["Red", "Green", "Blue"] {
        editor.update_new_color_name(name);
        editor.add_color();
    }
    let before = editor.colors().to_vec();

    assert!(!editor.delete_color(999));
    assert_eq!(editor.colors(), before.as_slice());
}

#[test]
fn test_delete_removes_only_matching_color() {
    let mut editor = dress_editor();
    let mut ids = Vec::new();
    for name in ["Red", "Green", "Blue"] {
        editor.update_new_color_name(name);
        ids.push(editor.add_color().unwrap());
    }

    assert!(editor.delete_color(ids[1]));
    let names: Vec<&str> = editor.colors().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Red", "Blue"]);
}

#[test]
fn test_two_adds_get_distinct_ids_in_order() {
    let mut editor = dress_editor();
    editor.update_new_color_name("Синий");
    let first = editor.add_color().unwrap();
    editor.update_new_color_name("Белый");
    let second = editor.add_color().unwrap();

    assert_ne!(first, second);
    let names: Vec<&str> = editor.colors().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Синий", "Белый"]);
}

#[test]
fn test_ids_stay_unique_after_delete() {
    let mut editor = dress_editor();
    editor.update_new_color_name("A");
    let a = editor.add_color().unwrap();
    editor.delete_color(a);
    editor.update_new_color_name("B");
    let b = editor.add_color().unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_new_ids_do_not_collide_with_seeded_colors() {
    let model = Model {
        param_values: Vec::new(),
        colors: vec![Color {
            id: 1_700_000_000_000,
            name: "Old".into(),
        }],
    };
    let mut editor = Editor::new(dress_params(), model);
    editor.update_new_color_name("New");
    let id = editor.add_color().unwrap();
    assert!(id > 1_700_000_000_000);
}

#[test]
fn test_add_color_after_max_seeded_id_is_noop() {
    let model = Model {
        param_values: Vec::new(),
        colors: vec![Color {
            id: u64::MAX,
            name: "Last".into(),
        }],
    };
    let mut editor = Editor::new(dress_params(), model);
    editor.update_new_color_name("New");

    assert_eq!(editor.add_color(), None);
    assert_eq!(editor.colors().len(), 1);
    assert_eq!(editor.colors()[0].id, u64::MAX);
    assert_eq!(editor.new_color_name(), "New");
}

#[test]
fn test_id_space_runs_out_without_duplicates() {
    let model = Model {
        param_values: Vec::new(),
        colors: vec![Color {
            id: u64::MAX - 1,
            name: "Old".into(),
        }],
    };
    let mut editor = Editor::new(dress_params(), model);
    editor.update_new_color_name("A");
    assert_eq!(editor.add_color(), Some(u64::MAX));
    editor.update_new_color_name("B");
    assert_eq!(editor.add_color(), None);

    let ids: Vec<u64> = editor.colors().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![u64::MAX - 1, u64::MAX]);
}

#[test]
fn test_duplicate_seeded_colors_keep_first() {
    let model = Model {
        param_values: Vec::new(),
        colors: vec![
            Color {
                id: 4,
                name: "Red".into(),
            },
            Color {
                id: 4,
                name: "Crimson".into(),
            },
            Color {
                id: 5,
                name: "Blue".into(),
            },
        ],
    };
    let mut editor = Editor::new(dress_params(), model);
    let names: Vec<&str> = editor.colors().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Red", "Blue"]);

    assert!(editor.delete_color(4));
    assert_eq!(editor.colors().len(), 1);
    assert_eq!(editor.colors()[0].name, "Blue");
}

#[test]
fn test_end_to_end_dress_scenario() {
    let mut editor = dress_editor();
    editor.update_param_value(1, "вечернее");
    editor.update_new_color_name("Синий");
    editor.add_color();

    let snapshot = editor.snapshot();
    assert_eq!(
        snapshot.param_values,
        vec![
            ParamValue::new(1, "вечернее"),
            ParamValue::new(2, "макси")
        ]
    );
    assert_eq!(snapshot.colors.len(), 1);
    assert_eq!(snapshot.colors[0].name, "Синий");
}
