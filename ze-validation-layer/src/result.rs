// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Driver result codes and the errors handle lifetime checks produce.

use std::{error::Error, fmt};
use ze_handle_lifetime::{LifetimeError, ObjectKey};

/// A raw `ze_result_t` value.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ZeResult(u32);

impl ZeResult {
    pub const SUCCESS: Self = Self(0);
    pub const NOT_READY: Self = Self(1);
    pub const ERROR_DEVICE_LOST: Self = Self(0x7000_0001);
    pub const ERROR_OUT_OF_HOST_MEMORY: Self = Self(0x7000_0002);
    pub const ERROR_OUT_OF_DEVICE_MEMORY: Self = Self(0x7000_0003);
    pub const ERROR_UNINITIALIZED: Self = Self(0x7800_0001);
    pub const ERROR_UNSUPPORTED_VERSION: Self = Self(0x7800_0002);
    pub const ERROR_UNSUPPORTED_FEATURE: Self = Self(0x7800_0003);
    pub const ERROR_INVALID_ARGUMENT: Self = Self(0x7800_0004);
    pub const ERROR_INVALID_NULL_HANDLE: Self = Self(0x7800_0005);
    pub const ERROR_HANDLE_OBJECT_IN_USE: Self = Self(0x7800_0006);
    pub const ERROR_INVALID_NULL_POINTER: Self = Self(0x7800_0007);
    pub const ERROR_UNKNOWN: Self = Self(0x7fff_ffff);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Returns `true` for `ZE_RESULT_SUCCESS`.
    ///
    /// Status codes such as `NOT_READY` are not errors, but they don't count as success either:
    /// nothing was created by a call that returned them.
    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::SUCCESS => "ZE_RESULT_SUCCESS",
            Self::NOT_READY => "ZE_RESULT_NOT_READY",
            Self::ERROR_DEVICE_LOST => "ZE_RESULT_ERROR_DEVICE_LOST",
            Self::ERROR_OUT_OF_HOST_MEMORY => "ZE_RESULT_ERROR_OUT_OF_HOST_MEMORY",
            Self::ERROR_OUT_OF_DEVICE_MEMORY => "ZE_RESULT_ERROR_OUT_OF_DEVICE_MEMORY",
            Self::ERROR_UNINITIALIZED => "ZE_RESULT_ERROR_UNINITIALIZED",
            Self::ERROR_UNSUPPORTED_VERSION => "ZE_RESULT_ERROR_UNSUPPORTED_VERSION",
            Self::ERROR_UNSUPPORTED_FEATURE => "ZE_RESULT_ERROR_UNSUPPORTED_FEATURE",
            Self::ERROR_INVALID_ARGUMENT => "ZE_RESULT_ERROR_INVALID_ARGUMENT",
            Self::ERROR_INVALID_NULL_HANDLE => "ZE_RESULT_ERROR_INVALID_NULL_HANDLE",
            Self::ERROR_HANDLE_OBJECT_IN_USE => "ZE_RESULT_ERROR_HANDLE_OBJECT_IN_USE",
            Self::ERROR_INVALID_NULL_POINTER => "ZE_RESULT_ERROR_INVALID_NULL_POINTER",
            Self::ERROR_UNKNOWN => "ZE_RESULT_ERROR_UNKNOWN",
            _ => return None,
        })
    }
}

impl fmt::Debug for ZeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "ZeResult({:#x})", self.0),
        }
    }
}

impl fmt::Display for ZeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<Result<(), ValidationError>> for ZeResult {
    #[inline]
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => ZeResult::SUCCESS,
            Err(err) => err.result(),
        }
    }
}

/// A handle lifetime check failed. The call must not be forwarded to the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A handle argument is null or does not name a live object.
    InvalidNullHandle { handle: ObjectKey },

    /// A handle passed to a destroy call still has dependents.
    HandleObjectInUse {
        handle: ObjectKey,
        dependents: usize,
    },

    /// A handle argument names a live object that is in the wrong state for the call.
    InvalidArgument {
        handle: ObjectKey,
        problem: &'static str,
    },
}

impl ValidationError {
    /// Returns the result code the layer reports to the application.
    #[inline]
    pub const fn result(&self) -> ZeResult {
        match self {
            ValidationError::InvalidNullHandle { .. } => ZeResult::ERROR_INVALID_NULL_HANDLE,
            ValidationError::HandleObjectInUse { .. } => ZeResult::ERROR_HANDLE_OBJECT_IN_USE,
            ValidationError::InvalidArgument { .. } => ZeResult::ERROR_INVALID_ARGUMENT,
        }
    }

    /// Returns the handle argument that failed the check.
    #[inline]
    pub const fn handle(&self) -> ObjectKey {
        match *self {
            ValidationError::InvalidNullHandle { handle }
            | ValidationError::HandleObjectInUse { handle, .. }
            | ValidationError::InvalidArgument { handle, .. } => handle,
        }
    }
}

impl Error for ValidationError {}

impl From<LifetimeError> for ValidationError {
    fn from(err: LifetimeError) -> Self {
        match err {
            LifetimeError::UnknownHandle(handle) => ValidationError::InvalidNullHandle { handle },
            LifetimeError::InUse { handle, dependents } => {
                ValidationError::HandleObjectInUse { handle, dependents }
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidNullHandle { handle } if handle.raw() == 0 => {
                write!(f, "{} is null", handle.kind().type_name())
            }
            ValidationError::InvalidNullHandle { handle } => {
                write!(f, "{handle} is not a live handle")
            }
            ValidationError::HandleObjectInUse { handle, dependents } => write!(
                f,
                "{handle} is still in use by {dependents} dependent handle(s)",
            ),
            ValidationError::InvalidArgument { handle, problem } => {
                write!(f, "{handle}: {problem}")
            }
        }
    }
}
