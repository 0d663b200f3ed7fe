use std::cmp::Ordering;

use crate::error::RosterError;
use crate::grades::{self, ClassStatistics, Remark};
use crate::student::StudentRecord;

/// Ordered, single-writer collection of student records.
///
/// Order is insertion order unless explicitly sorted, and is the serialization
/// order. The dirty flag tracks divergence from the persisted file; every
/// mutation sets it and a successful flush clears it.
#[derive(Debug, Default)]
pub struct RosterStore {
    records: Vec<StudentRecord>,
    dirty: bool,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        Self {
            records,
            dirty: false,
        }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn find_by_id(&self, id: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn exists_by_id(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn exists_by_name(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Id and name uniqueness are both checked here. Name uniqueness holds at
    /// creation time only; edits may introduce duplicate names (source
    /// behavior, kept as-is).
    pub fn insert(&mut self, record: StudentRecord) -> Result<(), RosterError> {
        if self.exists_by_id(record.id()) {
            return Err(RosterError::DuplicateId(record.id().to_string()));
        }
        if self.exists_by_name(&record.name) {
            return Err(RosterError::DuplicateName(record.name.clone()));
        }
        self.records.push(record);
        self.dirty = true;
        Ok(())
    }

    /// Applies field changes to the record with the given id. The id itself
    /// cannot be edited; `StudentRecord` exposes no setter for it.
    pub fn update<F>(&mut self, id: &str, mutator: F) -> Result<(), RosterError>
    where
        F: FnOnce(&mut StudentRecord),
    {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))?;
        mutator(record);
        self.dirty = true;
        Ok(())
    }

    /// Removes the record with the given id; returns whether a match existed.
    /// Confirmation is the caller's concern.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        let removed = self.records.len() != before;
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// First record matching the term against id or name exactly; stops at the
    /// first match.
    pub fn search(&self, term: &str) -> Option<&StudentRecord> {
        self.records
            .iter()
            .find(|r| r.id() == term || r.name == term)
    }

    pub fn filter_failing(&self) -> Vec<&StudentRecord> {
        self.records
            .iter()
            .filter(|r| r.remark() == Remark::Fail)
            .collect()
    }

    /// Stable in-place sort by average; equal averages keep their prior
    /// relative order.
    pub fn sort_by_average(&mut self, ascending: bool) {
        self.records.sort_by(|a, b| {
            let ord = a
                .average()
                .partial_cmp(&b.average())
                .unwrap_or(Ordering::Equal);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        self.dirty = true;
    }

    /// Appends imported records without deduplication against existing ids or
    /// names. Duplicate ids across a merge are possible; documented gap in the
    /// source, preserved.
    pub fn merge(&mut self, imported: Vec<StudentRecord>) {
        if imported.is_empty() {
            return;
        }
        self.records.extend(imported);
        self.dirty = true;
    }

    pub fn statistics(&self) -> ClassStatistics {
        grades::class_statistics(self.records.iter().map(|r| r.average()))
    }
}
