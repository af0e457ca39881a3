// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Checks shared by the hooks of every API.

use crate::{ValidationError, ZeResult};
use ze_handle_lifetime::{
    CommandListHandle, Handle, HandleLifetime, ObjectKey,
};

/// Implements the core, tools and sysman entry point hooks on top of a [`HandleLifetime`].
///
/// Prologues check that every handle argument is live, that command lists are in the right
/// recording state and, for destroy calls, that the destroyed object has no dependents left.
/// Destroy prologues unregister the handle when the checks pass. Epilogues register the handles
/// a successful call created, together with the edges to the objects they were created from.
#[derive(Clone, Copy, Debug)]
pub struct HandleLifetimeChecker<'a> {
    lifetime: &'a HandleLifetime,
}

impl<'a> HandleLifetimeChecker<'a> {
    #[inline]
    pub fn new(lifetime: &'a HandleLifetime) -> Self {
        HandleLifetimeChecker { lifetime }
    }

    #[inline]
    pub fn handle_lifetime(&self) -> &'a HandleLifetime {
        self.lifetime
    }

    /// Fails unless `handle` is live. The null handle is never live.
    pub(crate) fn valid<H: Handle>(&self, handle: H) -> Result<(), ValidationError> {
        if self.lifetime.is_handle_valid(handle) {
            Ok(())
        } else {
            Err(ValidationError::InvalidNullHandle {
                handle: handle.key(),
            })
        }
    }

    /// Like `valid`, for an argument the application may omit.
    pub(crate) fn valid_optional<H: Handle>(
        &self,
        handle: Option<H>,
    ) -> Result<(), ValidationError> {
        handle.map_or(Ok(()), |handle| self.valid(handle))
    }

    pub(crate) fn valid_all<H: Handle>(&self, handles: &[H]) -> Result<(), ValidationError> {
        handles.iter().try_for_each(|&handle| self.valid(handle))
    }

    /// Fails unless the command list is live and open for recording.
    pub(crate) fn open(&self, command_list: CommandListHandle) -> Result<(), ValidationError> {
        self.valid(command_list)?;

        match self.lifetime.is_open(command_list) {
            Some(true) => Ok(()),
            _ => Err(ValidationError::InvalidArgument {
                handle: command_list.key(),
                problem: "commands can't be appended to a closed command list",
            }),
        }
    }

    /// Fails unless every command list is live, then unless every one of them is closed.
    pub(crate) fn closed_all(
        &self,
        command_lists: &[CommandListHandle],
    ) -> Result<(), ValidationError> {
        self.valid_all(command_lists)?;

        for &command_list in command_lists {
            if self.lifetime.is_open(command_list) != Some(false) {
                return Err(ValidationError::InvalidArgument {
                    handle: command_list.key(),
                    problem: "a command list must be closed before it is executed",
                });
            }
        }

        Ok(())
    }

    /// Checks that `handle` can be destroyed and unregisters it.
    pub(crate) fn destroy<H: Handle>(&self, handle: H) -> Result<(), ValidationError> {
        self.lifetime.destroy_handle(handle)?;

        Ok(())
    }

    /// Registers a handle created by a successful call, as a dependent of each of `owners`.
    pub(crate) fn created<H: Handle>(&self, result: ZeResult, handle: H, owners: &[ObjectKey]) {
        if !result.is_success() || handle.is_null() {
            return;
        }

        self.lifetime.add_handle(handle);
        self.depends_on(handle, owners);
    }

    /// Registers handles returned by a successful enumeration call.
    ///
    /// Enumerations return the same handles every time, so handles that are already live are
    /// left as they are.
    pub(crate) fn enumerated<H: Handle>(
        &self,
        result: ZeResult,
        handles: &[H],
        owners: &[ObjectKey],
    ) {
        if !result.is_success() {
            return;
        }

        for &handle in handles.iter().filter(|handle| !handle.is_null()) {
            self.lifetime.add_handle_once(handle);
            self.depends_on(handle, owners);
        }
    }

    fn depends_on<H: Handle>(&self, handle: H, owners: &[ObjectKey]) {
        for &owner in owners {
            self.lifetime.add_dependent_key(owner, handle.key());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ze_handle_lifetime::{ContextHandle, DeviceHandle, EventHandle, FenceHandle};

    #[test]
    fn null_handles_are_invalid() {
        let lifetime = HandleLifetime::default();
        let checker = HandleLifetimeChecker::new(&lifetime);

        assert_eq!(
            checker.valid(EventHandle::null()),
            Err(ValidationError::InvalidNullHandle {
                handle: EventHandle::null().key(),
            }),
        );
        assert_eq!(checker.valid_optional(None::<FenceHandle>), Ok(()));
        assert!(checker.valid_optional(Some(FenceHandle::from_raw(3))).is_err());
    }

    #[test]
    fn failed_calls_register_nothing() {
        let lifetime = HandleLifetime::default();
        let checker = HandleLifetimeChecker::new(&lifetime);
        let context = ContextHandle::from_raw(1);

        checker.created(ZeResult::ERROR_DEVICE_LOST, context, &[]);
        assert!(!lifetime.is_handle_valid(context));

        checker.created(ZeResult::SUCCESS, ContextHandle::null(), &[]);
        assert!(!lifetime.is_handle_valid(ContextHandle::null()));

        checker.created(ZeResult::SUCCESS, context, &[]);
        assert!(lifetime.is_handle_valid(context));
    }

    #[test]
    fn enumeration_is_idempotent() {
        let lifetime = HandleLifetime::default();
        let checker = HandleLifetimeChecker::new(&lifetime);
        let devices = [DeviceHandle::from_raw(1), DeviceHandle::from_raw(2)];

        checker.enumerated(ZeResult::SUCCESS, &devices, &[]);
        checker.enumerated(ZeResult::SUCCESS, &devices, &[]);
        assert_eq!(
            lifetime.live_count(ze_handle_lifetime::HandleKind::Device),
            2,
        );
    }

    #[test]
    fn execution_requires_closed_lists() {
        let lifetime = HandleLifetime::default();
        let checker = HandleLifetimeChecker::new(&lifetime);
        let list = CommandListHandle::from_raw(1);

        assert!(matches!(
            checker.closed_all(&[list]),
            Err(ValidationError::InvalidNullHandle { .. }),
        ));

        lifetime.add_handle(list);
        assert!(matches!(
            checker.closed_all(&[list]),
            Err(ValidationError::InvalidArgument { .. }),
        ));

        lifetime.close(list).unwrap();
        assert_eq!(checker.closed_all(&[list]), Ok(()));
        assert!(checker.open(list).is_err());
    }
}
