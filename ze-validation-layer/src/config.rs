// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Feature toggles read from the environment.

use crate::NonExhaustive;
use std::env;

pub const ENABLE_PARAMETER_VALIDATION: &str = "ZE_ENABLE_PARAMETER_VALIDATION";
pub const ENABLE_HANDLE_LIFETIME: &str = "ZE_ENABLE_HANDLE_LIFETIME";
pub const ENABLE_MEMORY_TRACKER: &str = "ZE_ENABLE_MEMORY_TRACKER";
pub const ENABLE_THREADING_VALIDATION: &str = "ZE_ENABLE_THREADING_VALIDATION";
pub const HANDLE_LIFETIME_ASSERT_DUPLICATES: &str = "ZEL_HANDLE_LIFETIME_ASSERT_DUPLICATES";

/// Which checks the validation layer performs.
///
/// Read once when the layer is first used and immutable afterwards. Everything is off by default,
/// as it is when none of the variables are set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationConfig {
    /// `ZE_ENABLE_PARAMETER_VALIDATION`.
    pub enable_parameter_validation: bool,

    /// `ZE_ENABLE_HANDLE_LIFETIME`. When this is off every handle lifetime hook passes.
    pub enable_handle_lifetime: bool,

    /// `ZE_ENABLE_MEMORY_TRACKER`.
    pub enable_memory_tracker: bool,

    /// `ZE_ENABLE_THREADING_VALIDATION`.
    pub enable_threading_validation: bool,

    /// `ZEL_HANDLE_LIFETIME_ASSERT_DUPLICATES`. Panic when a handle is registered twice.
    pub assert_on_duplicate: bool,

    pub _ne: NonExhaustive,
}

impl Default for ValidationConfig {
    #[inline]
    fn default() -> Self {
        Self {
            enable_parameter_validation: false,
            enable_handle_lifetime: false,
            enable_memory_tracker: false,
            enable_threading_validation: false,
            assert_on_duplicate: false,
            _ne: NonExhaustive(()),
        }
    }
}

impl ValidationConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(mut lookup: impl FnMut(&str) -> Option<String>) -> Self {
        let mut flag = |name| env_to_bool(lookup(name).as_deref());

        let config = ValidationConfig {
            enable_parameter_validation: flag(ENABLE_PARAMETER_VALIDATION),
            enable_handle_lifetime: flag(ENABLE_HANDLE_LIFETIME),
            enable_memory_tracker: flag(ENABLE_MEMORY_TRACKER),
            enable_threading_validation: flag(ENABLE_THREADING_VALIDATION),
            assert_on_duplicate: flag(HANDLE_LIFETIME_ASSERT_DUPLICATES),
            _ne: NonExhaustive(()),
        };

        tracing::debug!(?config, "read validation layer configuration");

        config
    }
}

/// Only the exact value `1` enables a toggle.
fn env_to_bool(value: Option<&str>) -> bool {
    value == Some("1")
}
