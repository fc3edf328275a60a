//! Rows of the computed timetable.
//!
//! A timetable is one [`ClassSlots`] row per class. Each row holds the
//! class' periods for the week, day by day.

use serde::{Deserialize, Serialize};

use crate::domain::{RoomIndex, SubjectIndex, TeacherIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlotData {
    #[default]
    Empty,
    PartiallyFilled {
        teacher: TeacherIndex,
        subject: SubjectIndex,
    },
    Filled {
        teacher: TeacherIndex,
        subject: SubjectIndex,
        room: RoomIndex,
    },
}

impl SlotData {
    pub fn is_empty(&self) -> bool {
        matches!(self, SlotData::Empty)
    }

    pub fn teacher(&self) -> Option<TeacherIndex> {
        match self {
            SlotData::Empty => None,
            SlotData::PartiallyFilled { teacher, .. } | SlotData::Filled { teacher, .. } => {
                Some(*teacher)
            }
        }
    }

    pub fn room(&self) -> Option<RoomIndex> {
        match self {
            SlotData::Filled { room, .. } => Some(*room),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Single(SlotData),
    /// Two groups of the class are taught at once; `before`/`after` count the
    /// neighbouring double periods for the same pair.
    Double {
        first: SlotData,
        second: SlotData,
        before: u32,
        after: u32,
    },
}

impl Default for Slot {
    fn default() -> Self {
        Slot::Single(SlotData::Empty)
    }
}

impl Slot {
    pub fn is_double(&self) -> bool {
        matches!(self, Slot::Double { .. })
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Slot::Single(data) => data.is_empty(),
            Slot::Double { first, second, .. } => first.is_empty() && second.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSlots {
    pub class_index: u32,
    pub slots: Vec<Slot>,
}

impl ClassSlots {
    pub fn empty(class_index: u32, periods: usize) -> Self {
        Self {
            class_index,
            slots: vec![Slot::default(); periods],
        }
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }
}

#[cfg(test)]
#[path = "tests/timetable_tests.rs"]
mod tests;
