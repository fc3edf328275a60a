use super::*;

#[test]
fn empty_row_has_requested_number_of_periods() {
    let row = ClassSlots::empty(3, 35);
    assert_eq!(row.class_index, 3);
    assert_eq!(row.slots.len(), 35);
    assert_eq!(row.filled_count(), 0);
}

#[test]
fn filled_count_ignores_empty_slots() {
    let mut row = ClassSlots::empty(0, 4);
    row.slots[1] = Slot::Single(SlotData::PartiallyFilled {
        teacher: TeacherIndex(1),
        subject: SubjectIndex(2),
    });
    row.slots[2] = Slot::Double {
        first: SlotData::Empty,
        second: SlotData::Filled {
            teacher: TeacherIndex(0),
            subject: SubjectIndex(0),
            room: RoomIndex(7),
        },
        before: 0,
        after: 1,
    };

    assert_eq!(row.filled_count(), 2);
    assert!(row.slots[2].is_double());
}

#[test]
fn slot_data_accessors() {
    let filled = SlotData::Filled {
        teacher: TeacherIndex(4),
        subject: SubjectIndex(1),
        room: RoomIndex(2),
    };
    assert_eq!(filled.teacher(), Some(TeacherIndex(4)));
    assert_eq!(filled.room(), Some(RoomIndex(2)));
    assert_eq!(SlotData::Empty.teacher(), None);
}

#[test]
fn slot_uses_externally_tagged_layout() {
    let slot = Slot::Single(SlotData::Filled {
        teacher: TeacherIndex(1),
        subject: SubjectIndex(2),
        room: RoomIndex(3),
    });
    let value = serde_json::to_value(slot).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({"Single": {"Filled": {"teacher": 1, "subject": 2, "room": 3}}})
    );

    let empty: Slot = serde_json::from_value(serde_json::json!({"Single": "Empty"}))
        .expect("deserialize");
    assert!(empty.is_empty());
}
