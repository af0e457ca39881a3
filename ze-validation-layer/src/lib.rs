// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Handle lifetime checks for a Level Zero validation layer.
//!
//! The layer intercepts every driver entry point. Before a call is forwarded it runs the
//! entry point's prologue hook, and after the driver returns it runs the epilogue hook. This
//! crate provides those hooks for the handle lifetime checks, split by sub-API:
//!
//! - [`CoreEntryPoints`] for `ze*` entry points,
//! - [`ToolsEntryPoints`] for `zet*` entry points,
//! - [`SysmanEntryPoints`] for `zes*` entry points.
//!
//! Each trait passes every call by default. [`HandleLifetimeChecker`] implements all three on
//! top of a [`HandleLifetime`](ze_handle_lifetime::HandleLifetime) tracker.
//!
//! The [`ValidationContext`] holds the configuration read from the environment and the tracker.
//! When `ZE_ENABLE_HANDLE_LIFETIME` is not set to `1`, no tracker exists and every check passes.
//!
//! ```
//! use ze_validation_layer::{
//!     CoreEntryPoints, ValidationConfig, ValidationContext, ZeResult,
//! };
//! use ze_handle_lifetime::{ContextHandle, DriverHandle, Handle};
//!
//! let context = ValidationContext::new(ValidationConfig {
//!     enable_handle_lifetime: true,
//!     ..Default::default()
//! });
//! let driver = DriverHandle::from_raw(0x10);
//! let ze_context = ContextHandle::from_raw(0x20);
//!
//! // The driver was never enumerated.
//! let result = context.check("zeContextCreate", |checker| checker.ze_context_create(driver));
//! assert_eq!(result, ZeResult::ERROR_INVALID_NULL_HANDLE);
//!
//! let result = context.check("zeDriverGet", |checker| {
//!     checker.ze_driver_get_epilogue(ZeResult::SUCCESS, &[driver])
//! });
//! assert_eq!(result, ZeResult::SUCCESS);
//!
//! let result = context.check("zeContextCreate", |checker| {
//!     checker.ze_context_create(driver)?;
//!     checker.ze_context_create_epilogue(ZeResult::SUCCESS, driver, ze_context)
//! });
//! assert_eq!(result, ZeResult::SUCCESS);
//! ```

pub use self::{
    checker::HandleLifetimeChecker,
    config::ValidationConfig,
    context::ValidationContext,
    core_api::CoreEntryPoints,
    result::{ValidationError, ZeResult},
    sysman_api::{SysmanComponent, SysmanEntryPoints},
    tools_api::ToolsEntryPoints,
};
pub use ze_handle_lifetime;

mod checker;
pub mod config;
mod context;
mod core_api;
mod result;
mod sysman_api;
mod tools_api;

/// A helper type for non-exhaustive structs.
///
/// This type cannot be constructed outside this crate. Structures with a field of this type can
/// only be constructed by calling a constructor function or `Default::default()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NonExhaustive(pub(crate) ());
