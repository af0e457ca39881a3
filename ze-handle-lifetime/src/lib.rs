// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Handle lifetime tracking for Level Zero validation layers.
//!
//! A validation layer sits between an application and a Level Zero driver and checks every call
//! before forwarding it. To check handle arguments it needs to know which handles are currently
//! live and which objects still depend on which others. This crate keeps that state:
//!
//! - [`HandleKind`] partitions driver handles into disjoint categories, and one typed newtype per
//!   kind (for example [`DeviceHandle`] or [`CommandListHandle`]) implements [`Handle`].
//!
//! - The [`HandleRegistry`] has one existence table per kind. Command lists additionally carry
//!   whether they are open for recording.
//!
//! - The [`DependencyGraph`] records which handles depend on which owners, so that destroying an
//!   owner that still has dependents can be refused.
//!
//! - [`HandleLifetime`] combines both behind a lock and is what a layer talks to.
//!
//! Handles are opaque values. They are compared and stored, never dereferenced.
//!
//! ```
//! use ze_handle_lifetime::{
//!     CommandListHandle, DeviceHandle, Handle, HandleLifetime, LifetimeError,
//! };
//!
//! let lifetime = HandleLifetime::default();
//! let device = DeviceHandle::from_raw(0x1000);
//! let list = CommandListHandle::from_raw(0x2000);
//!
//! lifetime.add_handle(device);
//! lifetime.add_handle(list);
//! lifetime.add_dependent(device, list);
//!
//! assert!(matches!(
//!     lifetime.destroy_handle(device),
//!     Err(LifetimeError::InUse { dependents: 1, .. }),
//! ));
//!
//! lifetime.destroy_handle(list).unwrap();
//! lifetime.destroy_handle(device).unwrap();
//! ```

pub use self::{
    dependency::{DependencyGraph, DependencySnapshot},
    handle::*,
    registry::{HandleRecord, HandleRegistry},
    tracker::{HandleLifetime, HandleLifetimeCreateInfo},
};
pub use smallvec;
use std::{error::Error, fmt};

#[macro_use]
mod tests;
#[macro_use]
mod macros;
mod dependency;
mod handle;
mod registry;
mod tracker;

/// Error that can happen when operating on a handle the tracker can't act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifetimeError {
    /// The handle is not registered.
    UnknownHandle(ObjectKey),

    /// The handle can't be destroyed because other handles still depend on it.
    InUse {
        handle: ObjectKey,
        dependents: usize,
    },
}

impl LifetimeError {
    /// Returns the handle the error is about.
    #[inline]
    pub fn handle(&self) -> ObjectKey {
        match *self {
            LifetimeError::UnknownHandle(handle) | LifetimeError::InUse { handle, .. } => handle,
        }
    }
}

impl Error for LifetimeError {}

impl fmt::Display for LifetimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifetimeError::UnknownHandle(handle) => write!(f, "{handle} is not a live handle"),
            LifetimeError::InUse { handle, dependents } => write!(
                f,
                "{handle} is still in use by {dependents} dependent handle(s)",
            ),
        }
    }
}

/// A helper type for non-exhaustive structs.
///
/// This type cannot be constructed outside this crate. Structures with a field of this type can
/// only be constructed by calling a constructor function or `Default::default()`. The effect is
/// similar to the standard Rust `#[non_exhaustive]` attribute, except that it does not prevent
/// update syntax from being used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NonExhaustive(pub(crate) ());

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn error_messages() {
        let key = DeviceHandle::from_raw(0x10).key();

        assert_eq!(
            LifetimeError::UnknownHandle(key).to_string(),
            "ze_device_handle_t 0x10 is not a live handle",
        );
        assert_eq!(
            LifetimeError::InUse {
                handle: key,
                dependents: 2,
            }
            .to_string(),
            "ze_device_handle_t 0x10 is still in use by 2 dependent handle(s)",
        );
        assert_eq!(LifetimeError::UnknownHandle(key).handle(), key);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_serializes() {
        let lifetime = HandleLifetime::default();
        lifetime.add_dependent(
            ContextHandle::from_raw(1),
            EventPoolHandle::from_raw(2),
        );

        let json = serde_json::to_string(&lifetime.snapshot()).unwrap();
        assert!(json.contains("Context"));
        assert!(json.contains("EventPool"));
    }
}
