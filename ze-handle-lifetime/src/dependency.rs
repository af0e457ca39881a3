// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! The owner → dependents relation between live handles.

use crate::handle::ObjectKey;
use foldhash::{HashMap, HashSet};
use smallvec::SmallVec;
use std::fmt;

/// Tracks which handles were created from, or reference, which other handles.
///
/// The graph spans all handle kinds: a device owns command lists, command queues and images, a
/// module owns kernels, and so on. Keys carry their kind, so numerically equal handles of
/// different kinds are distinct nodes.
///
/// The graph knows nothing about which handles are live; the driver exclusion rule and the
/// pairing with registry removals are handled by [`HandleLifetime`](crate::HandleLifetime).
#[derive(Debug, Default)]
pub struct DependencyGraph {
    edges: HashMap<ObjectKey, HashSet<ObjectKey>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        DependencyGraph {
            edges: HashMap::default(),
        }
    }

    /// Records that `dependent` depends on `owner`. Returns `false` if the edge already existed.
    pub fn insert(&mut self, owner: ObjectKey, dependent: ObjectKey) -> bool {
        self.edges.entry(owner).or_default().insert(dependent)
    }

    /// Removes `dependent` from the dependents of every owner. Returns how many owners it was
    /// removed from.
    pub fn remove_everywhere(&mut self, dependent: ObjectKey) -> usize {
        let mut removed = 0;

        self.edges.retain(|_, dependents| {
            if dependents.remove(&dependent) {
                removed += 1;
            }

            !dependents.is_empty()
        });

        removed
    }

    /// Removes `dependent` from the dependents of `owner` only. Returns `false` if there was no
    /// such edge.
    pub fn remove(&mut self, owner: ObjectKey, dependent: ObjectKey) -> bool {
        let Some(dependents) = self.edges.get_mut(&owner) else {
            return false;
        };

        let removed = dependents.remove(&dependent);

        if dependents.is_empty() {
            self.edges.remove(&owner);
        }

        removed
    }

    /// Drops every edge going out of `owner`, returning how many there were.
    pub fn remove_owner(&mut self, owner: ObjectKey) -> usize {
        self.edges
            .remove(&owner)
            .map_or(0, |dependents| dependents.len())
    }

    #[inline]
    pub fn has_dependents(&self, owner: ObjectKey) -> bool {
        self.edges
            .get(&owner)
            .is_some_and(|dependents| !dependents.is_empty())
    }

    /// Returns the number of dependents of `owner`.
    #[inline]
    pub fn dependent_count(&self, owner: ObjectKey) -> usize {
        self.edges.get(&owner).map_or(0, |dependents| dependents.len())
    }

    /// Returns the dependents of `owner`, sorted.
    pub fn dependents(&self, owner: ObjectKey) -> SmallVec<[ObjectKey; 4]> {
        let mut dependents: SmallVec<[ObjectKey; 4]> = self
            .edges
            .get(&owner)
            .into_iter()
            .flatten()
            .copied()
            .collect();
        dependents.sort_unstable();

        dependents
    }

    /// Returns every owner `dependent` is recorded under, sorted.
    pub fn owners_of(&self, dependent: ObjectKey) -> SmallVec<[ObjectKey; 4]> {
        let mut owners: SmallVec<[ObjectKey; 4]> = self
            .edges
            .iter()
            .filter(|(_, dependents)| dependents.contains(&dependent))
            .map(|(&owner, _)| owner)
            .collect();
        owners.sort_unstable();

        owners
    }

    /// Returns the number of owners that currently have at least one dependent.
    #[inline]
    pub fn owner_count(&self) -> usize {
        self.edges.len()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Returns a sorted copy of the graph, for diagnostics.
    pub fn snapshot(&self) -> DependencySnapshot {
        let mut entries: Vec<_> = self
            .edges
            .iter()
            .filter(|(_, dependents)| !dependents.is_empty())
            .map(|(&owner, dependents)| {
                let mut dependents: Vec<_> = dependents.iter().copied().collect();
                dependents.sort_unstable();

                (owner, dependents)
            })
            .collect();
        entries.sort_unstable_by_key(|&(owner, _)| owner);

        DependencySnapshot { entries }
    }
}

/// A point-in-time copy of a [`DependencyGraph`], with owners and dependents in sorted order.
///
/// The `Display` impl renders one line per owner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DependencySnapshot {
    entries: Vec<(ObjectKey, Vec<ObjectKey>)>,
}

impl DependencySnapshot {
    #[inline]
    pub fn entries(&self) -> &[(ObjectKey, Vec<ObjectKey>)] {
        &self.entries
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for DependencySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (owner, dependents) in &self.entries {
            write!(f, "{owner:?}: {{")?;

            for dependent in dependents {
                write!(f, " {dependent:?}")?;
            }

            writeln!(f, " }}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::HandleKind;

    fn device(raw: u64) -> ObjectKey {
        ObjectKey::new(HandleKind::Device, raw)
    }

    fn list(raw: u64) -> ObjectKey {
        ObjectKey::new(HandleKind::CommandList, raw)
    }

    #[test]
    fn accumulate_and_remove() {
        let mut graph = DependencyGraph::new();
        let owner = device(1);

        assert!(graph.insert(owner, list(10)));
        assert!(graph.insert(owner, list(11)));
        assert!(!graph.insert(owner, list(11)));
        assert!(graph.has_dependents(owner));
        assert_eq!(graph.dependent_count(owner), 2);

        assert!(graph.remove(owner, list(10)));
        assert!(graph.has_dependents(owner));

        assert!(graph.remove(owner, list(11)));
        assert!(!graph.has_dependents(owner));
        assert_eq!(graph.owner_count(), 0);
    }

    #[test]
    fn targeted_remove_without_owner_is_noop() {
        let mut graph = DependencyGraph::new();
        assert!(!graph.remove(device(1), list(2)));
        assert!(!graph.has_dependents(device(1)));
    }

    #[test]
    fn remove_everywhere_spans_owners() {
        let mut graph = DependencyGraph::new();
        let shared = list(5);

        graph.insert(device(1), shared);
        graph.insert(device(2), shared);
        graph.insert(device(2), list(6));

        assert_eq!(&graph.owners_of(shared)[..], &[device(1), device(2)]);
        assert_eq!(graph.remove_everywhere(shared), 2);
        assert!(graph.owners_of(shared).is_empty());
        assert!(!graph.has_dependents(device(1)));
        assert!(graph.has_dependents(device(2)));
        assert_eq!(&graph.dependents(device(2))[..], &[list(6)]);
    }

    #[test]
    fn kinds_are_separate_nodes() {
        let mut graph = DependencyGraph::new();
        graph.insert(device(1), list(2));

        assert!(graph.has_dependents(device(1)));
        assert!(!graph.has_dependents(ObjectKey::new(HandleKind::Context, 1)));
        assert_eq!(graph.remove_everywhere(ObjectKey::new(HandleKind::Event, 2)), 0);
        assert!(graph.has_dependents(device(1)));
    }

    #[test]
    fn remove_owner_drops_outgoing_edges() {
        let mut graph = DependencyGraph::new();
        graph.insert(device(1), list(2));
        graph.insert(device(1), list(3));

        assert_eq!(graph.remove_owner(device(1)), 2);
        assert_eq!(graph.remove_owner(device(1)), 0);
        assert!(!graph.has_dependents(device(1)));
    }

    #[test]
    fn snapshot_is_sorted() {
        let mut graph = DependencyGraph::new();
        graph.insert(device(2), list(9));
        graph.insert(device(1), list(8));
        graph.insert(device(1), list(7));

        let snapshot = graph.snapshot();
        assert_eq!(
            snapshot.entries(),
            &[
                (device(1), vec![list(7), list(8)]),
                (device(2), vec![list(9)]),
            ],
        );
        assert_eq!(
            snapshot.to_string(),
            "Device(0x1): { CommandList(0x7) CommandList(0x8) }\n\
             Device(0x2): { CommandList(0x9) }\n",
        );
    }
}
