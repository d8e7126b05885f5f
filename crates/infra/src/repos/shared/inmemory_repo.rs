use eventide_domain::{CalendarEvent, DeliveryRecord, Entity, Reminder, ID};
use std::sync::{Arc, Mutex, MutexGuard};

/// All inmemory tables live behind the same lock so that a write touching
/// several of them is observed either fully or not at all.
#[derive(Default)]
pub struct InMemoryTables {
    pub events: Vec<CalendarEvent>,
    pub reminders: Vec<Reminder>,
    pub deliveries: Vec<DeliveryRecord>,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<InMemoryTables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, InMemoryTables> {
        // A poisoned lock means a panic happened inside a critical section
        self.tables.lock().unwrap()
    }
}

/// Useful functions for operating on inmemory tables

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &[T]) -> Option<T> {
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &[T], mut compare: F) -> Vec<T> {
    collection
        .iter()
        .filter(|item| compare(item))
        .cloned()
        .collect()
}

pub fn save<T: Clone + Entity>(val: &T, collection: &mut Vec<T>) {
    for item in collection.iter_mut() {
        if item.id() == val.id() {
            *item = val.clone();
        }
    }
}

pub fn delete<T: Entity>(val_id: &ID, collection: &mut Vec<T>) -> Option<T> {
    let index = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(index))
}

pub fn delete_by<T, F: Fn(&T) -> bool>(collection: &mut Vec<T>, compare: F) -> usize {
    let before = collection.len();
    collection.retain(|item| !compare(item));
    before - collection.len()
}
