// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! The per-process layer state and the entry point check wrapper.

use crate::{HandleLifetimeChecker, ValidationConfig, ValidationError, ZeResult};
use std::sync::OnceLock;
use ze_handle_lifetime::{HandleLifetime, HandleLifetimeCreateInfo};

static GLOBAL: OnceLock<ValidationContext> = OnceLock::new();

/// The state of a validation layer: its configuration and, if handle lifetime checking is
/// enabled, the handle lifetime tracker.
#[derive(Debug)]
pub struct ValidationContext {
    config: ValidationConfig,
    handle_lifetime: Option<HandleLifetime>,
}

impl ValidationContext {
    pub fn new(config: ValidationConfig) -> Self {
        let handle_lifetime = config.enable_handle_lifetime.then(|| {
            HandleLifetime::new(&HandleLifetimeCreateInfo {
                assert_on_duplicate: config.assert_on_duplicate,
                ..Default::default()
            })
        });

        tracing::debug!(
            handle_lifetime = handle_lifetime.is_some(),
            "created validation context",
        );

        ValidationContext {
            config,
            handle_lifetime,
        }
    }

    /// Returns the process-wide context, creating it from the environment on first use.
    pub fn global() -> &'static ValidationContext {
        GLOBAL.get_or_init(|| ValidationContext::new(ValidationConfig::from_env()))
    }

    #[inline]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Returns the tracker, or `None` if handle lifetime checking is disabled.
    #[inline]
    pub fn handle_lifetime(&self) -> Option<&HandleLifetime> {
        self.handle_lifetime.as_ref()
    }

    /// Returns the hook implementation, or `None` if handle lifetime checking is disabled.
    #[inline]
    pub fn handle_lifetime_checker(&self) -> Option<HandleLifetimeChecker<'_>> {
        self.handle_lifetime.as_ref().map(HandleLifetimeChecker::new)
    }

    /// Runs `hook` against the checker and converts the outcome into the result code to report.
    ///
    /// Returns `ZE_RESULT_SUCCESS` without running `hook` if handle lifetime checking is
    /// disabled.
    pub fn check(
        &self,
        entry_point: &'static str,
        hook: impl FnOnce(HandleLifetimeChecker<'_>) -> Result<(), ValidationError>,
    ) -> ZeResult {
        let Some(checker) = self.handle_lifetime_checker() else {
            return ZeResult::SUCCESS;
        };

        match hook(checker) {
            Ok(()) => ZeResult::SUCCESS,
            Err(err) => {
                tracing::warn!(entry_point, result = %err.result(), "{err}");

                err.result()
            }
        }
    }
}
