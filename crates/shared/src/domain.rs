use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! index_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub usize);
    };
}

index_newtype!(ClassIndex);
index_newtype!(TeacherIndex);
index_newtype!(SubjectIndex);
index_newtype!(RoomIndex);

/// Serialised as the bare name string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Class {
    pub name: String,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Teacher {
    pub name: String,
}

impl Teacher {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A subject taught to a class. `kind` groups subjects that need the same
/// kind of room (e.g. "lab", "gym").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub kind: String,
}

impl Subject {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// On the wire `kinds` is the space separated label, e.g.
/// `{"name":"B12","kinds":"lab computer"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    #[serde(with = "kinds_label")]
    pub kinds: Vec<String>,
}

impl Room {
    /// Builds a room from the space separated kinds label used in imports
    /// and edit tables.
    pub fn from_kinds_label(name: impl Into<String>, label: &str) -> Self {
        Self {
            name: name.into(),
            kinds: kinds_label::split(label),
        }
    }

    pub fn kinds_label(&self) -> String {
        self.kinds.join(" ")
    }

    pub fn supports(&self, kind: &str) -> bool {
        self.kinds.iter().any(|k| k == kind)
    }
}

mod kinds_label {
    use super::*;

    pub(super) fn split(label: &str) -> Vec<String> {
        label.split(' ').map(str::to_string).collect()
    }

    pub(super) fn serialize<S>(kinds: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&kinds.join(" "))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(split(&label))
    }
}

/// Links a teacher, a subject and a class, with the number of periods per
/// week. `per_week_second` is set when the relation alternates between two
/// weekly loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub teacher: TeacherIndex,
    pub subject: SubjectIndex,
    #[serde(rename = "class_")]
    pub class: ClassIndex,
    pub per_week_first: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_week_second: Option<u32>,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
