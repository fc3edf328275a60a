pub mod domain;
pub mod timetable;
