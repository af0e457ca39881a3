// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Handle kinds and the typed handles the tracker is generic over.
//!
//! Driver handles are opaque pointer-sized values. They are only ever compared and stored, never
//! dereferenced, so they are represented here as plain `u64`s wrapped in one newtype per kind.
//! The newtype decides which existence table a handle lives in, which makes it impossible to look
//! a handle up under the wrong kind.

use std::{fmt, hash::Hash};

/// The sub-API of the driver interface a handle kind belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Api {
    /// The core compute API (`ze*`).
    Core,

    /// The tools API: metrics, tracing and debugging (`zet*`).
    Tools,

    /// The system management API (`zes*`).
    Sysman,
}

/// A typed driver handle.
///
/// Implemented by the handle newtypes declared in this module. The associated [`KIND`] selects
/// the existence table the handle is tracked in.
///
/// [`KIND`]: Self::KIND
pub trait Handle: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// The kind of every handle of this type.
    const KIND: HandleKind;

    /// Wraps a raw handle value.
    fn from_raw(raw: u64) -> Self;

    /// Returns the raw handle value.
    fn as_raw(self) -> u64;

    /// Returns the null handle of this type.
    #[inline]
    fn null() -> Self {
        Self::from_raw(0)
    }

    /// Returns `true` if this is the null handle.
    #[inline]
    fn is_null(self) -> bool {
        self.as_raw() == 0
    }

    /// Returns the kind-tagged key identifying this handle across all kinds.
    #[inline]
    fn key(self) -> ObjectKey {
        ObjectKey::new(Self::KIND, self.as_raw())
    }
}

/// Identifies a handle across all kinds by pairing its raw value with its kind.
///
/// This is what the dependency graph is keyed by. Two handles of different kinds that happen to
/// have the same raw value are different keys.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectKey {
    kind: HandleKind,
    raw: u64,
}

impl ObjectKey {
    #[inline]
    pub const fn new(kind: HandleKind, raw: u64) -> Self {
        ObjectKey { kind, raw }
    }

    #[inline]
    pub const fn kind(self) -> HandleKind {
        self.kind
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.raw
    }

    /// Reinterprets the key as a typed handle, if it is of the handle's kind.
    #[inline]
    pub fn downcast<H: Handle>(self) -> Option<H> {
        (self.kind == H::KIND).then(|| H::from_raw(self.raw))
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:#x})", self.kind, self.raw)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:#x}", self.kind.type_name(), self.raw)
    }
}

handle_kinds! {
    /// A driver instance.
    Driver(DriverHandle) = Core, "ze_driver_handle_t";

    /// A device or sub-device.
    Device(DeviceHandle) = Core, "ze_device_handle_t";

    Context(ContextHandle) = Core, "ze_context_handle_t";
    CommandQueue(CommandQueueHandle) = Core, "ze_command_queue_handle_t";

    /// A command list. The only kind with per-handle state: whether it is open for recording.
    CommandList(CommandListHandle) = Core, "ze_command_list_handle_t";

    Fence(FenceHandle) = Core, "ze_fence_handle_t";
    EventPool(EventPoolHandle) = Core, "ze_event_pool_handle_t";
    Event(EventHandle) = Core, "ze_event_handle_t";
    Image(ImageHandle) = Core, "ze_image_handle_t";
    Module(ModuleHandle) = Core, "ze_module_handle_t";
    ModuleBuildLog(ModuleBuildLogHandle) = Core, "ze_module_build_log_handle_t";
    Kernel(KernelHandle) = Core, "ze_kernel_handle_t";
    Sampler(SamplerHandle) = Core, "ze_sampler_handle_t";
    PhysicalMem(PhysicalMemHandle) = Core, "ze_physical_mem_handle_t";
    FabricVertex(FabricVertexHandle) = Core, "ze_fabric_vertex_handle_t";
    FabricEdge(FabricEdgeHandle) = Core, "ze_fabric_edge_handle_t";

    /// An IPC handle for an event pool, identified by the address of the driver's descriptor.
    IpcEventPool(IpcEventPoolHandle) = Core, "ze_ipc_event_pool_handle_t";

    /// An IPC handle for a memory allocation, identified by the address of the driver's
    /// descriptor.
    IpcMem(IpcMemHandle) = Core, "ze_ipc_mem_handle_t";

    ExternalMemoryImportWin32(ExternalMemoryImportWin32Handle) = Core, "ze_external_memory_import_win32_handle_t";
    ExternalMemoryExportWin32(ExternalMemoryExportWin32Handle) = Core, "ze_external_memory_export_win32_handle_t";

    /// A ray-tracing acceleration structure builder.
    RtasBuilder(RtasBuilderHandle) = Core, "ze_rtas_builder_exp_handle_t";

    /// A ray-tracing acceleration structure parallel operation.
    RtasParallelOperation(RtasParallelOperationHandle) = Core, "ze_rtas_parallel_operation_exp_handle_t";

    MetricGroup(MetricGroupHandle) = Tools, "zet_metric_group_handle_t";
    Metric(MetricHandle) = Tools, "zet_metric_handle_t";
    MetricStreamer(MetricStreamerHandle) = Tools, "zet_metric_streamer_handle_t";
    MetricQueryPool(MetricQueryPoolHandle) = Tools, "zet_metric_query_pool_handle_t";
    MetricQuery(MetricQueryHandle) = Tools, "zet_metric_query_handle_t";
    Tracer(TracerHandle) = Tools, "zet_tracer_exp_handle_t";
    DebugSession(DebugSessionHandle) = Tools, "zet_debug_session_handle_t";

    /// A scheduler component.
    Sched(SchedHandle) = Sysman, "zes_sched_handle_t";

    /// A performance factor domain.
    Perf(PerfHandle) = Sysman, "zes_perf_handle_t";

    /// A power domain.
    Power(PowerHandle) = Sysman, "zes_pwr_handle_t";

    /// A frequency domain.
    Frequency(FrequencyHandle) = Sysman, "zes_freq_handle_t";

    Engine(EngineHandle) = Sysman, "zes_engine_handle_t";
    Standby(StandbyHandle) = Sysman, "zes_standby_handle_t";
    Firmware(FirmwareHandle) = Sysman, "zes_firmware_handle_t";

    /// A memory module.
    Memory(MemoryHandle) = Sysman, "zes_mem_handle_t";

    FabricPort(FabricPortHandle) = Sysman, "zes_fabric_port_handle_t";

    /// A temperature sensor.
    Temperature(TemperatureHandle) = Sysman, "zes_temp_handle_t";

    /// A power supply.
    Psu(PsuHandle) = Sysman, "zes_psu_handle_t";

    Fan(FanHandle) = Sysman, "zes_fan_handle_t";
    Led(LedHandle) = Sysman, "zes_led_handle_t";

    /// A RAS error set.
    Ras(RasHandle) = Sysman, "zes_ras_handle_t";

    /// A diagnostics test suite.
    Diagnostics(DiagnosticsHandle) = Sysman, "zes_diag_handle_t";

    /// An overclock domain.
    Overclock(OverclockHandle) = Sysman, "zes_overclock_handle_t";
}
