//! Shared state of the timetable client.
//!
//! [`StateRegistry`] bundles the six observable stores the UI reads and
//! writes with the one websocket connection to the timetable server. It is
//! built once and passed to whatever needs it.

use std::fmt;

use shared::{
    domain::{Class, Relation, Room, Subject, Teacher},
    timetable::ClassSlots,
};

use crate::{
    connection::{ConnectionHandle, DEFAULT_ENDPOINT},
    error::ConnectionError,
    observable::{Observable, SubscriptionId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreName {
    Classes,
    Teachers,
    Subjects,
    Rooms,
    Relations,
    Timetable,
}

impl StoreName {
    pub const ALL: [StoreName; 6] = [
        StoreName::Classes,
        StoreName::Teachers,
        StoreName::Subjects,
        StoreName::Rooms,
        StoreName::Relations,
        StoreName::Timetable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreName::Classes => "classes",
            StoreName::Teachers => "teachers",
            StoreName::Subjects => "subjects",
            StoreName::Rooms => "rooms",
            StoreName::Relations => "relations",
            StoreName::Timetable => "timetable",
        }
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct StateRegistry {
    pub classes: Observable<Class>,
    pub teachers: Observable<Teacher>,
    pub subjects: Observable<Subject>,
    pub rooms: Observable<Room>,
    pub relations: Observable<Relation>,
    pub timetable: Observable<ClassSlots>,
    pub socket: ConnectionHandle,
}

/// Subscriptions made by [`StateRegistry::watch_lengths`], one per store.
#[derive(Debug, Clone)]
pub struct RegistrySubscriptions {
    ids: Vec<(StoreName, SubscriptionId)>,
}

impl StateRegistry {
    /// Empty stores plus a connection to [`DEFAULT_ENDPOINT`].
    pub fn open() -> Result<Self, ConnectionError> {
        Ok(Self::with_connection(ConnectionHandle::open(
            DEFAULT_ENDPOINT,
        )?))
    }

    pub fn with_connection(socket: ConnectionHandle) -> Self {
        Self {
            classes: Observable::new(),
            teachers: Observable::new(),
            subjects: Observable::new(),
            rooms: Observable::new(),
            relations: Observable::new(),
            timetable: Observable::new(),
            socket,
        }
    }

    pub fn len_of(&self, store: StoreName) -> usize {
        match store {
            StoreName::Classes => self.classes.len(),
            StoreName::Teachers => self.teachers.len(),
            StoreName::Subjects => self.subjects.len(),
            StoreName::Rooms => self.rooms.len(),
            StoreName::Relations => self.relations.len(),
            StoreName::Timetable => self.timetable.len(),
        }
    }

    /// Calls `on_change(store, new_len)` whenever any store is replaced or
    /// mutated.
    pub fn watch_lengths<F>(&self, on_change: F) -> RegistrySubscriptions
    where
        F: Fn(StoreName, usize) + Clone + Send + Sync + 'static,
    {
        fn watch<T, F>(store: &Observable<T>, name: StoreName, on_change: F) -> SubscriptionId
        where
            T: 'static,
            F: Fn(StoreName, usize) + Send + Sync + 'static,
        {
            store.subscribe(move |value| on_change(name, value.len()))
        }

        RegistrySubscriptions {
            ids: vec![
                (
                    StoreName::Classes,
                    watch(&self.classes, StoreName::Classes, on_change.clone()),
                ),
                (
                    StoreName::Teachers,
                    watch(&self.teachers, StoreName::Teachers, on_change.clone()),
                ),
                (
                    StoreName::Subjects,
                    watch(&self.subjects, StoreName::Subjects, on_change.clone()),
                ),
                (
                    StoreName::Rooms,
                    watch(&self.rooms, StoreName::Rooms, on_change.clone()),
                ),
                (
                    StoreName::Relations,
                    watch(&self.relations, StoreName::Relations, on_change.clone()),
                ),
                (
                    StoreName::Timetable,
                    watch(&self.timetable, StoreName::Timetable, on_change),
                ),
            ],
        }
    }

    /// Removes every subscription in `subscriptions`.
    pub fn unwatch(&self, subscriptions: RegistrySubscriptions) {
        for (store, id) in subscriptions.ids {
            let _ = match store {
                StoreName::Classes => self.classes.unsubscribe(id),
                StoreName::Teachers => self.teachers.unsubscribe(id),
                StoreName::Subjects => self.subjects.unsubscribe(id),
                StoreName::Rooms => self.rooms.unsubscribe(id),
                StoreName::Relations => self.relations.unsubscribe(id),
                StoreName::Timetable => self.timetable.unsubscribe(id),
            };
        }
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
