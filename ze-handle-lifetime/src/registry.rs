// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Existence tables for live handles.

use crate::handle::{HandleKind, ObjectKey};
use foldhash::{HashMap, HashSet};
use std::array;

/// What the registry knows about one live handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleRecord {
    /// Existence is the only tracked fact.
    Plain,

    /// A command list, with its recording state.
    CommandList {
        /// Whether commands may currently be appended to the list.
        is_open: bool,
    },
}

impl HandleRecord {
    /// The record a handle of `kind` gets when nothing more specific is requested.
    ///
    /// Command lists start out open, matching immediate command lists which are usable without
    /// an explicit open call.
    #[inline]
    pub const fn default_for(kind: HandleKind) -> Self {
        match kind {
            HandleKind::CommandList => HandleRecord::CommandList { is_open: true },
            _ => HandleRecord::Plain,
        }
    }
}

/// One existence table per [`HandleKind`], plus a shared table for raw handles whose kind is
/// unknown to the caller.
///
/// This type does no locking of its own; [`HandleLifetime`](crate::HandleLifetime) wraps it.
#[derive(Debug)]
pub struct HandleRegistry {
    tables: [HashMap<u64, HandleRecord>; HandleKind::COUNT],
    untracked: HashSet<u64>,
    untracked_handles: usize,
}

impl Default for HandleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleRegistry {
    pub fn new() -> Self {
        HandleRegistry {
            tables: array::from_fn(|_| HashMap::default()),
            untracked: HashSet::default(),
            untracked_handles: 0,
        }
    }

    /// Inserts `key` with `record`, returning the record it replaced if `key` was already live.
    pub fn insert(&mut self, key: ObjectKey, record: HandleRecord) -> Option<HandleRecord> {
        self.table_mut(key.kind()).insert(key.raw(), record)
    }

    /// Inserts `key` with `record` unless it is already live. Returns `true` if it was inserted.
    pub fn insert_if_absent(&mut self, key: ObjectKey, record: HandleRecord) -> bool {
        let table = self.table_mut(key.kind());

        if table.contains_key(&key.raw()) {
            false
        } else {
            table.insert(key.raw(), record);
            true
        }
    }

    /// Erases `key`. Erasing a key that isn't live is a no-op that returns `None`.
    pub fn remove(&mut self, key: ObjectKey) -> Option<HandleRecord> {
        self.table_mut(key.kind()).remove(&key.raw())
    }

    #[inline]
    pub fn contains(&self, key: ObjectKey) -> bool {
        self.table(key.kind()).contains_key(&key.raw())
    }

    #[inline]
    pub fn record(&self, key: ObjectKey) -> Option<HandleRecord> {
        self.table(key.kind()).get(&key.raw()).copied()
    }

    #[inline]
    pub fn record_mut(&mut self, key: ObjectKey) -> Option<&mut HandleRecord> {
        self.table_mut(key.kind()).get_mut(&key.raw())
    }

    /// Returns the number of live handles of `kind`.
    #[inline]
    pub fn live_count(&self, kind: HandleKind) -> usize {
        self.table(kind).len()
    }

    /// Returns the raw values of the live handles of `kind`, in no particular order.
    pub fn live_handles(&self, kind: HandleKind) -> impl Iterator<Item = u64> + '_ {
        self.table(kind).keys().copied()
    }

    /// Records a handle of unknown kind.
    ///
    /// Returns `true` if the value was not already present.
    pub fn insert_untracked(&mut self, raw: u64) -> bool {
        self.untracked_handles += 1;
        self.untracked.insert(raw)
    }

    /// Forgets a handle of unknown kind. Returns `true` if the value was present.
    pub fn remove_untracked(&mut self, raw: u64) -> bool {
        self.untracked_handles = self.untracked_handles.saturating_sub(1);
        self.untracked.remove(&raw)
    }

    #[inline]
    pub fn contains_untracked(&self, raw: u64) -> bool {
        self.untracked.contains(&raw)
    }

    /// Returns the number of untracked additions not yet balanced by a removal.
    ///
    /// This counts calls rather than distinct values, so it can differ from the number of raw
    /// values currently stored when the same value is added twice.
    #[inline]
    pub fn untracked_handles(&self) -> usize {
        self.untracked_handles
    }

    /// Forgets every handle of every kind.
    pub fn clear(&mut self) {
        for table in &mut self.tables {
            table.clear();
        }

        self.untracked.clear();
        self.untracked_handles = 0;
    }

    #[inline]
    fn table(&self, kind: HandleKind) -> &HashMap<u64, HandleRecord> {
        &self.tables[kind.index()]
    }

    #[inline]
    fn table_mut(&mut self, kind: HandleKind) -> &mut HashMap<u64, HandleRecord> {
        &mut self.tables[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(kind: HandleKind, raw: u64) -> ObjectKey {
        ObjectKey::new(kind, raw)
    }

    #[test]
    fn round_trip_every_kind() {
        let mut registry = HandleRegistry::new();

        for kind in HandleKind::ALL {
            let key = key(kind, 0x1000);

            assert!(!registry.contains(key));
            assert_eq!(registry.insert(key, HandleRecord::default_for(kind)), None);
            assert!(registry.contains(key));
            assert!(registry.remove(key).is_some());
            assert!(!registry.contains(key));
        }
    }

    #[test]
    fn kinds_do_not_alias() {
        let mut registry = HandleRegistry::new();
        registry.insert(key(HandleKind::Event, 7), HandleRecord::Plain);

        for kind in HandleKind::ALL {
            assert_eq!(registry.contains(key(kind, 7)), kind == HandleKind::Event);
        }
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut registry = HandleRegistry::new();
        assert_eq!(registry.remove(key(HandleKind::Fence, 3)), None);
        assert_eq!(registry.live_count(HandleKind::Fence), 0);
    }

    #[test]
    fn duplicate_insert_overwrites() {
        let mut registry = HandleRegistry::new();
        let list = key(HandleKind::CommandList, 1);

        registry.insert(list, HandleRecord::CommandList { is_open: false });
        let previous = registry.insert(list, HandleRecord::default_for(HandleKind::CommandList));

        assert_eq!(previous, Some(HandleRecord::CommandList { is_open: false }));
        assert_eq!(
            registry.record(list),
            Some(HandleRecord::CommandList { is_open: true }),
        );
        assert_eq!(registry.live_count(HandleKind::CommandList), 1);
    }

    #[test]
    fn insert_if_absent_keeps_existing_record() {
        let mut registry = HandleRegistry::new();
        let list = key(HandleKind::CommandList, 1);

        assert!(registry.insert_if_absent(list, HandleRecord::CommandList { is_open: false }));
        assert!(!registry.insert_if_absent(list, HandleRecord::CommandList { is_open: true }));
        assert_eq!(
            registry.record(list),
            Some(HandleRecord::CommandList { is_open: false }),
        );
    }

    #[test]
    fn untracked_counter() {
        let mut registry = HandleRegistry::new();

        assert!(registry.insert_untracked(0x40));
        assert!(!registry.insert_untracked(0x40));
        assert_eq!(registry.untracked_handles(), 2);
        assert!(registry.contains_untracked(0x40));

        assert!(registry.remove_untracked(0x40));
        assert!(!registry.remove_untracked(0x40));
        assert!(!registry.remove_untracked(0x40));
        assert_eq!(registry.untracked_handles(), 0);
        assert!(!registry.contains_untracked(0x40));
    }

    #[test]
    fn live_handles_lists_only_that_kind() {
        let mut registry = HandleRegistry::new();
        registry.insert(key(HandleKind::Driver, 1), HandleRecord::Plain);
        registry.insert(key(HandleKind::Driver, 2), HandleRecord::Plain);
        registry.insert(key(HandleKind::Device, 3), HandleRecord::Plain);

        let mut drivers: Vec<_> = registry.live_handles(HandleKind::Driver).collect();
        drivers.sort_unstable();
        assert_eq!(drivers, [1, 2]);

        registry.clear();
        assert_eq!(registry.live_count(HandleKind::Driver), 0);
        assert_eq!(registry.live_count(HandleKind::Device), 0);
    }
}
