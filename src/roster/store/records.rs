//! # Record Store
//!
//! [`RecordStore`] is the sole owner of the student list and the only thing that
//! mutates it. Every effective mutation follows the same path:
//!
//! 1. Build the next list from the current one
//! 2. Serialize the whole list and write it under the records key
//! 3. Swap the next list in and notify subscribers
//!
//! If the write fails, the in-memory list is left as it was, so memory and storage
//! never disagree. Operations that match nothing (unknown ids) skip all three
//! steps: no write, no notification, no error.
//!
//! Bulk operations write exactly one snapshot for the whole batch.

use super::StorageBackend;
use crate::error::Result;
use crate::model::{generate_id, NewStudent, Status, Student, StudentPatch};
use crate::sample::sample_students;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Handle returned by [`RecordStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&[Student])>;

pub struct RecordStore<B: StorageBackend> {
    backend: B,
    key: String,
    students: Vec<Student>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Opens the store, loading whatever list is stored under `key`.
    ///
    /// A missing or unreadable value yields an empty list; the problem is logged
    /// and never surfaced to the caller.
    pub fn open(backend: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let students = load_students(&backend, &key);
        debug!(key = %key, count = students.len(), "record store opened");
        Self {
            backend,
            key,
            students,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Releases the store and hands back its backend.
    pub fn close(self) -> B {
        debug!(key = %self.key, "record store closed");
        self.backend
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current list, in insertion order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn get(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Appends a new student with a freshly assigned id.
    pub fn add(&mut self, fields: NewStudent) -> Result<Student> {
        let id = loop {
            let candidate = generate_id();
            if self.get(&candidate).is_none() {
                break candidate;
            }
        };
        let student = Student::new(id, fields);

        let mut next = self.students.clone();
        next.push(student.clone());
        self.commit(next)?;

        debug!(id = %student.id, "student added");
        Ok(student)
    }

    /// Merges `patch` into the student with `id`.
    /// Returns the updated record, or `None` if no student has that id.
    pub fn update(&mut self, id: &str, patch: &StudentPatch) -> Result<Option<Student>> {
        let Some(pos) = self.position(id) else {
            debug!(id, "update ignored: unknown id");
            return Ok(None);
        };

        let mut next = self.students.clone();
        next[pos].apply(patch);
        let updated = next[pos].clone();
        self.commit(next)?;

        debug!(id, "student updated");
        Ok(Some(updated))
    }

    /// Removes the student with `id`, returning it if it existed.
    pub fn delete(&mut self, id: &str) -> Result<Option<Student>> {
        let Some(pos) = self.position(id) else {
            debug!(id, "delete ignored: unknown id");
            return Ok(None);
        };

        let mut next = self.students.clone();
        let removed = next.remove(pos);
        self.commit(next)?;

        debug!(id, "student deleted");
        Ok(Some(removed))
    }

    /// Removes every student whose id is in `ids`. Stale ids are ignored.
    /// Returns the removed records in list order.
    pub fn bulk_delete<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<Vec<Student>> {
        let wanted: HashSet<&str> = ids.iter().map(|s| s.as_ref()).collect();
        let (removed, kept): (Vec<Student>, Vec<Student>) = self
            .students
            .iter()
            .cloned()
            .partition(|s| wanted.contains(s.id.as_str()));

        if removed.is_empty() {
            debug!(requested = wanted.len(), "bulk delete matched nothing");
            return Ok(removed);
        }

        self.commit(kept)?;
        debug!(
            requested = wanted.len(),
            removed = removed.len(),
            "bulk delete"
        );
        Ok(removed)
    }

    /// Sets `status` on every student whose id is in `ids`.
    /// Returns the updated records in list order.
    pub fn bulk_update_status<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        status: Status,
    ) -> Result<Vec<Student>> {
        let wanted: HashSet<&str> = ids.iter().map(|s| s.as_ref()).collect();
        let mut next = self.students.clone();
        let mut updated = Vec::new();

        for student in next.iter_mut() {
            if wanted.contains(student.id.as_str()) {
                student.status = status;
                updated.push(student.clone());
            }
        }

        if updated.is_empty() {
            debug!(requested = wanted.len(), "bulk status update matched nothing");
            return Ok(updated);
        }

        self.commit(next)?;
        debug!(
            requested = wanted.len(),
            updated = updated.len(),
            %status,
            "bulk status update"
        );
        Ok(updated)
    }

    /// Every student with at least one field containing `query`, ignoring case.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<Student> {
        let needle = query.to_lowercase();
        self.students
            .iter()
            .filter(|s| s.matches(&needle))
            .cloned()
            .collect()
    }

    /// Replaces the whole list with the demo data set.
    pub fn import_sample(&mut self) -> Result<()> {
        self.commit(sample_students())?;
        debug!(count = self.students.len(), "sample data imported");
        Ok(())
    }

    /// Pretty-printed JSON of the current list.
    pub fn export_snapshot(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.students)?)
    }

    /// Registers `callback` to be called with the new list after every mutation.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[Student]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.students.iter().position(|s| s.id == id)
    }

    fn commit(&mut self, next: Vec<Student>) -> Result<()> {
        let snapshot = serde_json::to_string(&next)?;
        self.backend.write(&self.key, &snapshot)?;
        self.students = next;

        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.students);
        }
        Ok(())
    }
}

fn load_students<B: StorageBackend>(backend: &B, key: &str) -> Vec<Student> {
    let raw = match backend.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "could not read stored students, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(students) => students,
        Err(e) => {
            warn!(key, error = %e, "stored students are malformed, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemBackend;
    use crate::store::RECORDS_KEY;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn new_student(name: &str) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            course: "Physics".to_string(),
            status: Status::Active,
            enrollment_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    fn store_with(names: &[&str]) -> (RecordStore<MemBackend>, Vec<String>) {
        let mut store = RecordStore::open(MemBackend::new(), RECORDS_KEY);
        let ids = names
            .iter()
            .map(|n| store.add(new_student(n)).unwrap().id)
            .collect();
        (store, ids)
    }

    fn reopen(store: &RecordStore<MemBackend>) -> RecordStore<MemBackend> {
        RecordStore::open(store.backend().clone(), RECORDS_KEY)
    }

    #[test]
    fn add_assigns_distinct_ids() {
        let mut store = RecordStore::open(MemBackend::new(), RECORDS_KEY);
        let mut seen = HashSet::new();
        for i in 0..200 {
            let s = store.add(new_student(&format!("Student {}", i))).unwrap();
            assert!(seen.insert(s.id), "duplicate id produced");
        }
        assert_eq!(store.len(), 200);
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let (store, ids) = store_with(&["A", "B", "C"]);
        let order: Vec<_> = store.students().iter().map(|s| s.id.clone()).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn added_student_is_found_by_exact_name() {
        let (mut store, _) = store_with(&["Alice Walker"]);
        let added = store.add(new_student("Bob Stone")).unwrap();
        let found = store.search("Bob Stone");
        assert!(found.contains(&added));
    }

    #[test]
    fn update_changes_only_given_fields() {
        let (mut store, ids) = store_with(&["A", "B"]);
        let before = store.get(&ids[0]).unwrap().clone();

        let updated = store
            .update(&ids[0], &StudentPatch::status(Status::Inactive))
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, Status::Inactive);
        assert_eq!(updated.id, before.id);
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.email, before.email);
        assert_eq!(updated.course, before.course);
        assert_eq!(updated.enrollment_date, before.enrollment_date);
        assert_eq!(store.get(&ids[1]).unwrap().status, Status::Active);
    }

    #[test]
    fn update_unknown_id_is_a_silent_noop() {
        let (mut store, _) = store_with(&["A"]);
        let writes = store.backend().write_count();

        let result = store
            .update("STU-missing", &StudentPatch::status(Status::Inactive))
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.backend().write_count(), writes);
    }

    #[test]
    fn delete_removes_exactly_one_and_keeps_order() {
        let (mut store, ids) = store_with(&["A", "B", "C", "D"]);
        let removed = store.delete(&ids[1]).unwrap().unwrap();
        assert_eq!(removed.id, ids[1]);

        let remaining: Vec<_> = store.students().iter().map(|s| s.id.clone()).collect();
        assert_eq!(remaining, vec![ids[0].clone(), ids[2].clone(), ids[3].clone()]);
    }

    #[test]
    fn delete_unknown_id_is_a_noop() {
        let (mut store, _) = store_with(&["A"]);
        assert!(store.delete("STU-nope").unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn bulk_delete_leaves_the_unselected_record() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        let removed = store
            .bulk_delete(&[ids[0].as_str(), ids[2].as_str()])
            .unwrap();

        assert_eq!(removed.len(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.students()[0].id, ids[1]);
    }

    #[test]
    fn bulk_delete_ignores_stale_ids_and_writes_once() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        let writes = store.backend().write_count();

        let removed = store
            .bulk_delete(&[ids[0].clone(), ids[1].clone(), "STU-stale".to_string()])
            .unwrap();

        assert_eq!(removed.len(), 2);
        assert_eq!(store.backend().write_count(), writes + 1);
    }

    #[test]
    fn bulk_operations_matching_nothing_do_not_write() {
        let (mut store, _) = store_with(&["A", "B"]);
        let writes = store.backend().write_count();

        let removed = store.bulk_delete(&["STU-stale", "STU-gone"]).unwrap();
        let updated = store
            .bulk_update_status(&["STU-stale", "STU-gone"], Status::Inactive)
            .unwrap();

        assert!(removed.is_empty());
        assert!(updated.is_empty());
        assert_eq!(store.len(), 2);
        assert_eq!(store.backend().write_count(), writes);
    }

    #[test]
    fn bulk_update_status_touches_only_selected() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        store
            .bulk_update_status(&ids, Status::Inactive)
            .unwrap();
        let writes = store.backend().write_count();

        let updated = store
            .bulk_update_status(&[ids[0].as_str(), ids[1].as_str()], Status::Active)
            .unwrap();

        assert_eq!(updated.len(), 2);
        assert_eq!(store.backend().write_count(), writes + 1);
        assert_eq!(store.get(&ids[0]).unwrap().status, Status::Active);
        assert_eq!(store.get(&ids[1]).unwrap().status, Status::Active);
        assert_eq!(store.get(&ids[2]).unwrap().status, Status::Inactive);
    }

    #[test]
    fn empty_search_returns_everything() {
        let (store, _) = store_with(&["A", "B", "C"]);
        assert_eq!(store.search(""), store.students().to_vec());
    }

    #[test]
    fn search_does_not_reorder_the_store() {
        let (store, ids) = store_with(&["Zed", "Amy", "Zoe"]);
        let hits = store.search("z");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, ids[0]);
        assert_eq!(hits[1].id, ids[2]);
        let order: Vec<_> = store.students().iter().map(|s| s.id.clone()).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn export_round_trips_the_list() {
        let (mut store, _) = store_with(&["A", "B"]);
        store.import_sample().unwrap();
        let bytes = store.export_snapshot().unwrap();
        let parsed: Vec<Student> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, store.students().to_vec());
    }

    #[test]
    fn reopened_store_reflects_every_mutation() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        assert_eq!(reopen(&store).students(), store.students());

        store
            .update(&ids[0], &StudentPatch::status(Status::Inactive))
            .unwrap();
        assert_eq!(reopen(&store).students(), store.students());

        store.delete(&ids[1]).unwrap();
        assert_eq!(reopen(&store).students(), store.students());

        store.bulk_delete(&[ids[2].as_str()]).unwrap();
        assert_eq!(reopen(&store).students(), store.students());

        store.import_sample().unwrap();
        assert_eq!(reopen(&store).students(), store.students());
    }

    #[test]
    fn malformed_stored_value_opens_empty() {
        let backend = MemBackend::new();
        backend.seed(RECORDS_KEY, "{not json");
        let store = RecordStore::open(backend, RECORDS_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn failed_write_leaves_state_unchanged() {
        let (mut store, ids) = store_with(&["A", "B"]);
        store.backend().set_simulate_write_error(true);

        assert!(store.add(new_student("C")).is_err());
        assert!(store.delete(&ids[0]).is_err());
        assert_eq!(store.len(), 2);

        store.backend().set_simulate_write_error(false);
        assert_eq!(reopen(&store).students(), store.students());
    }

    #[test]
    fn sample_scenario_counts() {
        let mut store = RecordStore::open(MemBackend::new(), RECORDS_KEY);
        store.import_sample().unwrap();

        let ids: Vec<String> = store
            .students()
            .iter()
            .filter(|s| s.name == "Michael Johnson" || s.name == "David Wilson")
            .map(|s| s.id.clone())
            .collect();
        assert_eq!(ids.len(), 2);

        store.bulk_update_status(&ids, Status::Inactive).unwrap();

        let active = store
            .students()
            .iter()
            .filter(|s| s.status == Status::Active)
            .count();
        let inactive = store
            .students()
            .iter()
            .filter(|s| s.status == Status::Inactive)
            .count();
        assert_eq!(active, 3);
        assert_eq!(inactive, 2);
    }

    #[test]
    fn subscribers_see_each_mutation_until_unsubscribed() {
        let (mut store, ids) = store_with(&["A", "B"]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = store.subscribe(move |students| sink.borrow_mut().push(students.len()));

        store.delete(&ids[0]).unwrap();
        store.delete("STU-unknown").unwrap();
        store.add(new_student("C")).unwrap();
        assert_eq!(*seen.borrow(), vec![1, 2]);

        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.delete(&ids[1]).unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn close_returns_the_backend() {
        let (store, _) = store_with(&["A"]);
        let backend = store.close();
        assert!(backend.read(RECORDS_KEY).unwrap().is_some());
    }
}
