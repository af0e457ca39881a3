// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! The thread-safe handle tracker: registry and dependency graph behind one lock.

use crate::{
    dependency::{DependencyGraph, DependencySnapshot},
    handle::{CommandListHandle, Handle, HandleKind, ObjectKey},
    registry::{HandleRecord, HandleRegistry},
    LifetimeError, NonExhaustive,
};
use parking_lot::RwLock;
use smallvec::SmallVec;

/// Registry of live driver handles together with the dependency graph between them.
///
/// This is the state the handle lifetime checks of a validation layer consult: whether a handle
/// argument names a live object, whether an object can be destroyed without leaving dependents
/// behind, and whether a command list is open for recording.
///
/// All operations take `&self` and may be called from any thread. Registry and graph sit behind
/// a single lock; queries share it and mutations take it exclusively, so every operation is
/// atomic with respect to every other.
#[derive(Debug)]
pub struct HandleLifetime {
    state: RwLock<State>,
    assert_on_duplicate: bool,
}

#[derive(Debug, Default)]
struct State {
    registry: HandleRegistry,
    graph: DependencyGraph,
}

impl Default for HandleLifetime {
    fn default() -> Self {
        Self::new(&HandleLifetimeCreateInfo::default())
    }
}

impl HandleLifetime {
    pub fn new(create_info: &HandleLifetimeCreateInfo) -> Self {
        let &HandleLifetimeCreateInfo {
            assert_on_duplicate,
            _ne: _,
        } = create_info;

        HandleLifetime {
            state: RwLock::new(State::default()),
            assert_on_duplicate,
        }
    }

    /// Registers a newly created handle.
    ///
    /// Command lists are registered open. Registering a handle that is already live replaces its
    /// record and is reported as a warning, or a panic if
    /// [`HandleLifetimeCreateInfo::assert_on_duplicate`] was set.
    pub fn add_handle<H: Handle>(&self, handle: H) {
        self.insert(handle.key(), HandleRecord::default_for(H::KIND));
    }

    /// Registers a newly created command list in the given recording state.
    pub fn add_command_list(&self, handle: CommandListHandle, is_open: bool) {
        self.insert(handle.key(), HandleRecord::CommandList { is_open });
    }

    /// Registers `handle` unless it is already live. Returns `true` if it was added.
    ///
    /// Enumeration entry points hand out the same handles every time they are called, so they
    /// register through this method instead of [`add_handle`](Self::add_handle).
    pub fn add_handle_once<H: Handle>(&self, handle: H) -> bool {
        let key = handle.key();
        let added = self
            .state
            .write()
            .registry
            .insert_if_absent(key, HandleRecord::default_for(H::KIND));

        if added {
            tracing::debug!(handle = %key, "registered handle");
        }

        added
    }

    /// Unregisters `handle` from its kind's table. Returns `false` if it wasn't live.
    ///
    /// This does not touch the dependency graph; see [`remove_dependent`] and
    /// [`destroy_handle`].
    ///
    /// [`remove_dependent`]: Self::remove_dependent
    /// [`destroy_handle`]: Self::destroy_handle
    pub fn remove_handle<H: Handle>(&self, handle: H) -> bool {
        let key = handle.key();
        let removed = self.state.write().registry.remove(key).is_some();

        if removed {
            tracing::debug!(handle = %key, "unregistered handle");
        }

        removed
    }

    /// Returns `true` if `handle` is currently registered.
    #[inline]
    pub fn is_handle_valid<H: Handle>(&self, handle: H) -> bool {
        self.state.read().registry.contains(handle.key())
    }

    /// Returns whether the command list is open for recording, or `None` if it isn't registered.
    pub fn is_open(&self, handle: CommandListHandle) -> Option<bool> {
        match self.state.read().registry.record(handle.key())? {
            HandleRecord::CommandList { is_open } => Some(is_open),
            HandleRecord::Plain => None,
        }
    }

    /// Marks the command list closed, i.e. ready for submission.
    pub fn close(&self, handle: CommandListHandle) -> Result<(), LifetimeError> {
        self.set_open(handle, false)
    }

    /// Marks the command list open again, i.e. ready for recording.
    pub fn reset(&self, handle: CommandListHandle) -> Result<(), LifetimeError> {
        self.set_open(handle, true)
    }

    /// Records that `dependent` depends on `owner`.
    ///
    /// If `owner` is a registered driver, this does nothing: almost every object transitively
    /// depends on a driver, so those edges are not tracked.
    pub fn add_dependent<O: Handle, D: Handle>(&self, owner: O, dependent: D) {
        self.add_dependent_key(owner.key(), dependent.key());
    }

    /// Kind-erased version of [`add_dependent`](Self::add_dependent).
    pub fn add_dependent_key(&self, owner: ObjectKey, dependent: ObjectKey) {
        let mut state = self.state.write();

        if owner.kind() == HandleKind::Driver && state.registry.contains(owner) {
            return;
        }

        if state.graph.insert(owner, dependent) {
            tracing::trace!(%owner, %dependent, "added dependent");
        }
    }

    /// Removes `dependent` from the dependents of every owner it is recorded under.
    pub fn remove_dependent<D: Handle>(&self, dependent: D) {
        self.state.write().graph.remove_everywhere(dependent.key());
    }

    /// Removes `dependent` from the dependents of `owner` only.
    pub fn remove_dependent_of<O: Handle, D: Handle>(&self, owner: O, dependent: D) {
        self.state
            .write()
            .graph
            .remove(owner.key(), dependent.key());
    }

    /// Returns `true` if any handle is recorded as depending on `handle`.
    #[inline]
    pub fn has_dependents<H: Handle>(&self, handle: H) -> bool {
        self.state.read().graph.has_dependents(handle.key())
    }

    /// Returns the handles recorded as depending on `handle`, sorted.
    pub fn dependents_of<H: Handle>(&self, handle: H) -> SmallVec<[ObjectKey; 4]> {
        self.state.read().graph.dependents(handle.key())
    }

    /// Destroys `handle`: refuses if it has dependents, otherwise removes it from every owner's
    /// dependents, drops its own (empty) edge set and unregisters it, all under one lock.
    pub fn destroy_handle<H: Handle>(&self, handle: H) -> Result<(), LifetimeError> {
        let key = handle.key();
        let mut state = self.state.write();

        if !state.registry.contains(key) {
            return Err(LifetimeError::UnknownHandle(key));
        }

        let dependents = state.graph.dependent_count(key);

        if dependents != 0 {
            return Err(LifetimeError::InUse {
                handle: key,
                dependents,
            });
        }

        state.graph.remove_everywhere(key);
        state.graph.remove_owner(key);
        state.registry.remove(key);
        drop(state);

        tracing::debug!(handle = %key, "destroyed handle");

        Ok(())
    }

    /// Records a raw handle whose kind the caller cannot name.
    pub fn add_untracked(&self, raw: u64) {
        self.state.write().registry.insert_untracked(raw);
        tracing::warn!(raw, "tracking handle of unknown kind");
    }

    pub fn remove_untracked(&self, raw: u64) {
        self.state.write().registry.remove_untracked(raw);
    }

    #[inline]
    pub fn is_untracked_valid(&self, raw: u64) -> bool {
        self.state.read().registry.contains_untracked(raw)
    }

    /// Returns the number of untracked additions not yet balanced by a removal.
    #[inline]
    pub fn untracked_handles(&self) -> usize {
        self.state.read().registry.untracked_handles()
    }

    /// Returns the number of live handles of `kind`.
    #[inline]
    pub fn live_count(&self, kind: HandleKind) -> usize {
        self.state.read().registry.live_count(kind)
    }

    /// Returns a sorted copy of the dependency graph.
    pub fn snapshot(&self) -> DependencySnapshot {
        self.state.read().graph.snapshot()
    }

    /// Dumps the dependency graph through `tracing` at trace level.
    pub fn print_dependent_map(&self) {
        let snapshot = self.snapshot();
        tracing::trace!("dependent map:\n{snapshot}");
    }

    /// Forgets every handle and every edge.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.registry.clear();
        state.graph.clear();
    }

    fn insert(&self, key: ObjectKey, record: HandleRecord) {
        let previous = self.state.write().registry.insert(key, record);

        if previous.is_some() {
            tracing::warn!(handle = %key, "handle registered while already live");

            assert!(
                !self.assert_on_duplicate,
                "{key} was registered while already live",
            );
        } else {
            tracing::debug!(handle = %key, "registered handle");
        }
    }

    fn set_open(&self, handle: CommandListHandle, is_open: bool) -> Result<(), LifetimeError> {
        let key = handle.key();
        let mut state = self.state.write();

        match state.registry.record_mut(key) {
            Some(HandleRecord::CommandList { is_open: open }) => {
                *open = is_open;

                Ok(())
            }
            _ => Err(LifetimeError::UnknownHandle(key)),
        }
    }
}

/// Parameters to create a new `HandleLifetime`.
#[derive(Clone, Debug)]
pub struct HandleLifetimeCreateInfo {
    /// Panic when a handle is registered while it is already live.
    ///
    /// A duplicate registration means the driver reused a handle value that was still tracked,
    /// or that a destruction went unobserved.
    ///
    /// The default value is `false`.
    pub assert_on_duplicate: bool,

    pub _ne: NonExhaustive,
}

impl Default for HandleLifetimeCreateInfo {
    #[inline]
    fn default() -> Self {
        Self {
            assert_on_duplicate: false,
            _ne: NonExhaustive(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{
        ContextHandle, DeviceHandle, DriverHandle, EventHandle, KernelHandle, MetricGroupHandle,
        ModuleHandle, PowerHandle,
    };
    use std::thread;

    fn handle<H: Handle>(raw: u64) -> H {
        H::from_raw(raw)
    }

    #[test]
    fn registration_round_trip() {
        let lifetime = HandleLifetime::default();
        let context: ContextHandle = handle(0x100);

        assert!(!lifetime.is_handle_valid(context));
        lifetime.add_handle(context);
        assert!(lifetime.is_handle_valid(context));
        assert!(lifetime.remove_handle(context));
        assert!(!lifetime.is_handle_valid(context));
        assert!(!lifetime.remove_handle(context));
    }

    #[test]
    fn kind_isolation() {
        let lifetime = HandleLifetime::default();
        lifetime.add_handle(handle::<KernelHandle>(0x20));

        assert!(lifetime.is_handle_valid(handle::<KernelHandle>(0x20)));
        assert!(!lifetime.is_handle_valid(handle::<ModuleHandle>(0x20)));
        assert!(!lifetime.is_handle_valid(handle::<PowerHandle>(0x20)));
    }

    #[test]
    fn command_list_state_machine() {
        let lifetime = HandleLifetime::default();
        let list: CommandListHandle = handle(0x30);

        lifetime.add_handle(list);
        assert_eq!(lifetime.is_open(list), Some(true));

        for _ in 0..3 {
            lifetime.close(list).unwrap();
            assert_eq!(lifetime.is_open(list), Some(false));
            lifetime.reset(list).unwrap();
            assert_eq!(lifetime.is_open(list), Some(true));
        }

        let closed: CommandListHandle = handle(0x31);
        lifetime.add_command_list(closed, false);
        assert_eq!(lifetime.is_open(closed), Some(false));
    }

    #[test]
    fn command_list_state_of_unknown_handle() {
        let lifetime = HandleLifetime::default();
        let list: CommandListHandle = handle(0x40);

        assert_eq!(lifetime.is_open(list), None);
        assert_eq!(
            lifetime.close(list),
            Err(LifetimeError::UnknownHandle(list.key())),
        );
        assert_eq!(
            lifetime.reset(list),
            Err(LifetimeError::UnknownHandle(list.key())),
        );

        lifetime.add_handle(list);
        lifetime.remove_handle(list);
        assert_eq!(lifetime.is_open(list), None);
    }

    #[test]
    fn dependency_accumulation() {
        let lifetime = HandleLifetime::default();
        let module: ModuleHandle = handle(1);
        let first: KernelHandle = handle(2);
        let second: KernelHandle = handle(3);

        lifetime.add_dependent(module, first);
        lifetime.add_dependent(module, second);
        assert!(lifetime.has_dependents(module));

        lifetime.remove_dependent_of(module, first);
        assert!(lifetime.has_dependents(module));
        assert_eq!(&lifetime.dependents_of(module)[..], &[second.key()]);

        lifetime.remove_dependent_of(module, second);
        assert!(!lifetime.has_dependents(module));
    }

    #[test]
    fn global_dependent_removal() {
        let lifetime = HandleLifetime::default();
        let first: DeviceHandle = handle(1);
        let second: ContextHandle = handle(2);
        let shared: EventHandle = handle(3);

        lifetime.add_dependent(first, shared);
        lifetime.add_dependent(second, shared);
        lifetime.remove_dependent(shared);

        assert!(!lifetime.has_dependents(first));
        assert!(!lifetime.has_dependents(second));
    }

    #[test]
    fn driver_exclusion() {
        let lifetime = HandleLifetime::default();
        let driver: DriverHandle = handle(1);
        lifetime.add_handle(driver);

        for raw in 0..8 {
            lifetime.add_dependent(driver, handle::<DeviceHandle>(0x10 + raw));
        }

        assert!(!lifetime.has_dependents(driver));
        assert!(lifetime.snapshot().is_empty());
    }

    #[test]
    fn unregistered_driver_is_not_excluded() {
        let lifetime = HandleLifetime::default();
        let driver: DriverHandle = handle(1);

        lifetime.add_dependent(driver, handle::<ContextHandle>(2));
        assert!(lifetime.has_dependents(driver));
    }

    #[test]
    fn driver_device_command_list_scenario() {
        let lifetime = HandleLifetime::default();
        let driver: DriverHandle = handle(0xd0);
        let device: DeviceHandle = handle(0xd1);
        let list: CommandListHandle = handle(0xd2);

        lifetime.add_handle(driver);
        lifetime.add_handle(device);
        lifetime.add_dependent(driver, device);
        assert!(!lifetime.has_dependents(driver));

        lifetime.add_handle(list);
        lifetime.add_dependent(device, list);
        assert!(lifetime.has_dependents(device));
        assert_eq!(
            lifetime.destroy_handle(device),
            Err(LifetimeError::InUse {
                handle: device.key(),
                dependents: 1,
            }),
        );
        assert!(lifetime.is_handle_valid(device));

        lifetime.remove_handle(list);
        lifetime.remove_dependent_of(device, list);
        assert!(!lifetime.has_dependents(device));

        assert_eq!(lifetime.destroy_handle(device), Ok(()));
        assert!(!lifetime.is_handle_valid(device));
    }

    #[test]
    fn destroy_prunes_dependent_edges() {
        let lifetime = HandleLifetime::default();
        let context: ContextHandle = handle(1);
        let device: DeviceHandle = handle(2);
        let list: CommandListHandle = handle(3);

        lifetime.add_handle(list);
        lifetime.add_dependent(context, list);
        lifetime.add_dependent(device, list);

        lifetime.destroy_handle(list).unwrap();
        assert!(!lifetime.is_handle_valid(list));
        assert!(!lifetime.has_dependents(context));
        assert!(!lifetime.has_dependents(device));
        assert_eq!(
            lifetime.destroy_handle(list),
            Err(LifetimeError::UnknownHandle(list.key())),
        );
    }

    #[test]
    fn add_handle_once_does_not_reset_state() {
        let lifetime = HandleLifetime::default();
        let list: CommandListHandle = handle(5);

        assert!(lifetime.add_handle_once(list));
        lifetime.close(list).unwrap();
        assert!(!lifetime.add_handle_once(list));
        assert_eq!(lifetime.is_open(list), Some(false));
    }

    #[test]
    fn duplicate_add_overwrites_by_default() {
        let lifetime = HandleLifetime::default();
        let list: CommandListHandle = handle(6);

        lifetime.add_command_list(list, false);
        lifetime.add_handle(list);
        assert_eq!(lifetime.is_open(list), Some(true));
        assert_eq!(lifetime.live_count(HandleKind::CommandList), 1);
    }

    #[test]
    fn duplicate_add_asserts_when_requested() {
        let lifetime = HandleLifetime::new(&HandleLifetimeCreateInfo {
            assert_on_duplicate: true,
            ..Default::default()
        });
        let group: MetricGroupHandle = handle(7);
        lifetime.add_handle(group);

        assert_should_panic!("registered while already live", {
            lifetime.add_handle(group);
        });

        // The lock is not held across the panic.
        assert!(lifetime.is_handle_valid(group));
    }

    #[test]
    fn untracked_fallback() {
        let lifetime = HandleLifetime::default();

        assert!(!lifetime.is_untracked_valid(0x99));
        lifetime.add_untracked(0x99);
        assert!(lifetime.is_untracked_valid(0x99));
        assert_eq!(lifetime.untracked_handles(), 1);
        assert!(!lifetime.is_handle_valid(handle::<DeviceHandle>(0x99)));

        lifetime.remove_untracked(0x99);
        assert!(!lifetime.is_untracked_valid(0x99));
        assert_eq!(lifetime.untracked_handles(), 0);
    }

    #[test]
    fn concurrent_registration() {
        let lifetime = HandleLifetime::default();
        let device: DeviceHandle = handle(1);
        lifetime.add_handle(device);

        thread::scope(|scope| {
            for thread_index in 0..8u64 {
                let lifetime = &lifetime;

                scope.spawn(move || {
                    for i in 0..256u64 {
                        let list: CommandListHandle = handle((thread_index << 32) | (i + 1));
                        lifetime.add_handle(list);
                        lifetime.add_dependent(device, list);
                        assert!(lifetime.is_handle_valid(list));
                        lifetime.close(list).unwrap();
                        assert_eq!(lifetime.is_open(list), Some(false));
                        lifetime.destroy_handle(list).unwrap();
                        assert!(!lifetime.is_handle_valid(list));
                    }
                });
            }
        });

        assert_eq!(lifetime.live_count(HandleKind::CommandList), 0);
        assert!(!lifetime.has_dependents(device));
        assert_eq!(lifetime.destroy_handle(device), Ok(()));
    }

    #[test]
    fn clear_forgets_everything() {
        let lifetime = HandleLifetime::default();
        let device: DeviceHandle = handle(1);
        let list: CommandListHandle = handle(2);

        lifetime.add_handle(device);
        lifetime.add_dependent(device, list);
        lifetime.clear();

        assert!(!lifetime.is_handle_valid(device));
        assert!(!lifetime.has_dependents(device));
    }
}
