use super::*;

#[test]
fn room_kinds_label_splits_on_single_spaces() {
    let room = Room::from_kinds_label("B12", "lab computer");
    assert_eq!(room.kinds, vec!["lab".to_string(), "computer".to_string()]);
    assert_eq!(room.kinds_label(), "lab computer");
    assert!(room.supports("lab"));
    assert!(!room.supports("gym"));
}

#[test]
fn relation_uses_edit_table_field_names() {
    let relation = Relation {
        teacher: TeacherIndex(2),
        subject: SubjectIndex(0),
        class: ClassIndex(5),
        per_week_first: 3,
        per_week_second: None,
    };

    let value = serde_json::to_value(&relation).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "teacher": 2,
            "subject": 0,
            "class_": 5,
            "perWeekFirst": 3
        })
    );
}

#[test]
fn relation_accepts_alternating_weekly_load() {
    let raw = r#"{"teacher":1,"subject":4,"class_":0,"perWeekFirst":2,"perWeekSecond":1}"#;
    let relation: Relation = serde_json::from_str(raw).expect("deserialize");
    assert_eq!(relation.class, ClassIndex(0));
    assert_eq!(relation.per_week_second, Some(1));
}

#[test]
fn classes_and_teachers_are_bare_names_on_the_wire() {
    let classes: Vec<Class> = serde_json::from_str(r#"["S1A","S2B"]"#).expect("deserialize");
    assert_eq!(classes, vec![Class::new("S1A"), Class::new("S2B")]);

    let teachers = vec![Teacher::new("Novak"), Teacher::new("Horvat")];
    let value = serde_json::to_value(&teachers).expect("serialize");
    assert_eq!(value, serde_json::json!(["Novak", "Horvat"]));
}

#[test]
fn room_kinds_travel_as_one_label() {
    let room: Room =
        serde_json::from_str(r#"{"name":"Lab 2","kinds":"lab computer"}"#).expect("deserialize");
    assert_eq!(room, Room::from_kinds_label("Lab 2", "lab computer"));

    let value = serde_json::to_value(&Room::from_kinds_label("Gym", "gym")).expect("serialize");
    assert_eq!(value, serde_json::json!({"name": "Gym", "kinds": "gym"}));
}

#[test]
fn subject_keeps_name_and_kind_fields() {
    let subject: Subject =
        serde_json::from_str(r#"{"name":"Physics","kind":"lab"}"#).expect("deserialize");
    assert_eq!(subject, Subject::new("Physics", "lab"));
}
