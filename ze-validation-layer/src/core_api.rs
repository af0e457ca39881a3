// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Hooks for the core API (`ze*`).

use crate::{HandleLifetimeChecker, ValidationError, ZeResult};
use ze_handle_lifetime::{
    CommandListHandle, CommandQueueHandle, ContextHandle, DeviceHandle, DriverHandle,
    EventHandle, EventPoolHandle, FabricEdgeHandle, FabricVertexHandle, FenceHandle, Handle,
    ImageHandle, IpcEventPoolHandle, IpcMemHandle, KernelHandle, ModuleBuildLogHandle,
    ModuleHandle, PhysicalMemHandle, RtasBuilderHandle, RtasParallelOperationHandle,
    SamplerHandle,
};

type Checked = Result<(), ValidationError>;

/// Prologue and epilogue hooks for the core API entry points that create, destroy or use
/// handles.
///
/// Prologues run before the call is forwarded to the driver; an error means the call is not
/// forwarded and the error's result code is returned to the application. Epilogues run after the
/// driver returned `result`. Every hook passes by default.
pub trait CoreEntryPoints {
    fn ze_driver_get_epilogue(&self, result: ZeResult, drivers: &[DriverHandle]) -> Checked {
        let _ = (result, drivers);
        Ok(())
    }

    fn ze_device_get(&self, driver: DriverHandle) -> Checked {
        let _ = driver;
        Ok(())
    }

    fn ze_device_get_epilogue(
        &self,
        result: ZeResult,
        driver: DriverHandle,
        devices: &[DeviceHandle],
    ) -> Checked {
        let _ = (result, driver, devices);
        Ok(())
    }

    fn ze_device_get_sub_devices(&self, device: DeviceHandle) -> Checked {
        let _ = device;
        Ok(())
    }

    fn ze_device_get_sub_devices_epilogue(
        &self,
        result: ZeResult,
        device: DeviceHandle,
        sub_devices: &[DeviceHandle],
    ) -> Checked {
        let _ = (result, device, sub_devices);
        Ok(())
    }

    /// Any call that only queries or uses a device.
    fn ze_device_use(&self, device: DeviceHandle) -> Checked {
        let _ = device;
        Ok(())
    }

    fn ze_context_create(&self, driver: DriverHandle) -> Checked {
        let _ = driver;
        Ok(())
    }

    fn ze_context_create_ex(&self, driver: DriverHandle, devices: &[DeviceHandle]) -> Checked {
        let _ = (driver, devices);
        Ok(())
    }

    fn ze_context_create_epilogue(
        &self,
        result: ZeResult,
        driver: DriverHandle,
        context: ContextHandle,
    ) -> Checked {
        let _ = (result, driver, context);
        Ok(())
    }

    fn ze_context_destroy(&self, context: ContextHandle) -> Checked {
        let _ = context;
        Ok(())
    }

    /// Calls that use a context and optionally a device without creating anything tracked:
    /// `zeContextGetStatus`, `zeContextSystemBarrier`, `zeContextMakeMemoryResident`, the
    /// `zeMemAlloc*` family, `zeMemFree` and the `zeVirtualMem*` family.
    fn ze_context_use(&self, context: ContextHandle, device: Option<DeviceHandle>) -> Checked {
        let _ = (context, device);
        Ok(())
    }

    fn ze_command_queue_create(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        let _ = (context, device);
        Ok(())
    }

    fn ze_command_queue_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        command_queue: CommandQueueHandle,
    ) -> Checked {
        let _ = (result, context, device, command_queue);
        Ok(())
    }

    fn ze_command_queue_destroy(&self, command_queue: CommandQueueHandle) -> Checked {
        let _ = command_queue;
        Ok(())
    }

    fn ze_command_queue_execute_command_lists(
        &self,
        command_queue: CommandQueueHandle,
        command_lists: &[CommandListHandle],
        fence: Option<FenceHandle>,
    ) -> Checked {
        let _ = (command_queue, command_lists, fence);
        Ok(())
    }

    fn ze_command_queue_synchronize(&self, command_queue: CommandQueueHandle) -> Checked {
        let _ = command_queue;
        Ok(())
    }

    fn ze_command_list_create(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        let _ = (context, device);
        Ok(())
    }

    fn ze_command_list_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        command_list: CommandListHandle,
    ) -> Checked {
        let _ = (result, context, device, command_list);
        Ok(())
    }

    fn ze_command_list_create_immediate(
        &self,
        context: ContextHandle,
        device: DeviceHandle,
    ) -> Checked {
        let _ = (context, device);
        Ok(())
    }

    fn ze_command_list_create_immediate_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        command_list: CommandListHandle,
    ) -> Checked {
        let _ = (result, context, device, command_list);
        Ok(())
    }

    fn ze_command_list_destroy(&self, command_list: CommandListHandle) -> Checked {
        let _ = command_list;
        Ok(())
    }

    fn ze_command_list_close(&self, command_list: CommandListHandle) -> Checked {
        let _ = command_list;
        Ok(())
    }

    fn ze_command_list_reset(&self, command_list: CommandListHandle) -> Checked {
        let _ = command_list;
        Ok(())
    }

    fn ze_command_list_host_synchronize(&self, command_list: CommandListHandle) -> Checked {
        let _ = command_list;
        Ok(())
    }

    /// Appends that take only optional signal and wait events: barriers, memory copies and
    /// fills, global timestamps and the like.
    fn ze_command_list_append(
        &self,
        command_list: CommandListHandle,
        signal_event: Option<EventHandle>,
        wait_events: &[EventHandle],
    ) -> Checked {
        let _ = (command_list, signal_event, wait_events);
        Ok(())
    }

    fn ze_command_list_append_launch_kernel(
        &self,
        command_list: CommandListHandle,
        kernel: KernelHandle,
        signal_event: Option<EventHandle>,
        wait_events: &[EventHandle],
    ) -> Checked {
        let _ = (command_list, kernel, signal_event, wait_events);
        Ok(())
    }

    fn ze_command_list_append_image_copy(
        &self,
        command_list: CommandListHandle,
        dst_image: ImageHandle,
        src_image: ImageHandle,
        signal_event: Option<EventHandle>,
        wait_events: &[EventHandle],
    ) -> Checked {
        let _ = (command_list, dst_image, src_image, signal_event, wait_events);
        Ok(())
    }

    fn ze_command_list_append_signal_event(
        &self,
        command_list: CommandListHandle,
        event: EventHandle,
    ) -> Checked {
        let _ = (command_list, event);
        Ok(())
    }

    fn ze_command_list_append_wait_on_events(
        &self,
        command_list: CommandListHandle,
        events: &[EventHandle],
    ) -> Checked {
        let _ = (command_list, events);
        Ok(())
    }

    fn ze_command_list_append_event_reset(
        &self,
        command_list: CommandListHandle,
        event: EventHandle,
    ) -> Checked {
        let _ = (command_list, event);
        Ok(())
    }

    fn ze_fence_create(&self, command_queue: CommandQueueHandle) -> Checked {
        let _ = command_queue;
        Ok(())
    }

    fn ze_fence_create_epilogue(
        &self,
        result: ZeResult,
        command_queue: CommandQueueHandle,
        fence: FenceHandle,
    ) -> Checked {
        let _ = (result, command_queue, fence);
        Ok(())
    }

    fn ze_fence_destroy(&self, fence: FenceHandle) -> Checked {
        let _ = fence;
        Ok(())
    }

    /// `zeFenceHostSynchronize`, `zeFenceQueryStatus` and `zeFenceReset`.
    fn ze_fence_use(&self, fence: FenceHandle) -> Checked {
        let _ = fence;
        Ok(())
    }

    fn ze_event_pool_create(&self, context: ContextHandle, devices: &[DeviceHandle]) -> Checked {
        let _ = (context, devices);
        Ok(())
    }

    fn ze_event_pool_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        event_pool: EventPoolHandle,
    ) -> Checked {
        let _ = (result, context, event_pool);
        Ok(())
    }

    fn ze_event_pool_destroy(&self, event_pool: EventPoolHandle) -> Checked {
        let _ = event_pool;
        Ok(())
    }

    fn ze_event_pool_get_ipc_handle(&self, event_pool: EventPoolHandle) -> Checked {
        let _ = event_pool;
        Ok(())
    }

    fn ze_event_pool_get_ipc_handle_epilogue(
        &self,
        result: ZeResult,
        event_pool: EventPoolHandle,
        ipc_handle: IpcEventPoolHandle,
    ) -> Checked {
        let _ = (result, event_pool, ipc_handle);
        Ok(())
    }

    fn ze_event_pool_put_ipc_handle(
        &self,
        context: ContextHandle,
        ipc_handle: IpcEventPoolHandle,
    ) -> Checked {
        let _ = (context, ipc_handle);
        Ok(())
    }

    fn ze_event_pool_open_ipc_handle(&self, context: ContextHandle) -> Checked {
        let _ = context;
        Ok(())
    }

    fn ze_event_pool_open_ipc_handle_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        event_pool: EventPoolHandle,
    ) -> Checked {
        let _ = (result, context, event_pool);
        Ok(())
    }

    fn ze_event_pool_close_ipc_handle(&self, event_pool: EventPoolHandle) -> Checked {
        let _ = event_pool;
        Ok(())
    }

    fn ze_event_create(&self, event_pool: EventPoolHandle) -> Checked {
        let _ = event_pool;
        Ok(())
    }

    fn ze_event_create_epilogue(
        &self,
        result: ZeResult,
        event_pool: EventPoolHandle,
        event: EventHandle,
    ) -> Checked {
        let _ = (result, event_pool, event);
        Ok(())
    }

    fn ze_event_destroy(&self, event: EventHandle) -> Checked {
        let _ = event;
        Ok(())
    }

    /// `zeEventHostSignal`, `zeEventHostSynchronize`, `zeEventQueryStatus` and
    /// `zeEventHostReset`.
    fn ze_event_use(&self, event: EventHandle) -> Checked {
        let _ = event;
        Ok(())
    }

    fn ze_image_create(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        let _ = (context, device);
        Ok(())
    }

    fn ze_image_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        image: ImageHandle,
    ) -> Checked {
        let _ = (result, context, device, image);
        Ok(())
    }

    fn ze_image_destroy(&self, image: ImageHandle) -> Checked {
        let _ = image;
        Ok(())
    }

    /// `zeImageViewCreateExt` and `zeImageViewCreateExp`.
    fn ze_image_view_create(
        &self,
        context: ContextHandle,
        device: DeviceHandle,
        image: ImageHandle,
    ) -> Checked {
        let _ = (context, device, image);
        Ok(())
    }

    fn ze_image_view_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        image: ImageHandle,
        view: ImageHandle,
    ) -> Checked {
        let _ = (result, context, device, image, view);
        Ok(())
    }

    /// `zeContextMakeImageResident`, `zeContextEvictImage` and the image property queries that
    /// take an image handle.
    fn ze_image_use(
        &self,
        context: ContextHandle,
        device: Option<DeviceHandle>,
        image: ImageHandle,
    ) -> Checked {
        let _ = (context, device, image);
        Ok(())
    }

    fn ze_module_create(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        let _ = (context, device);
        Ok(())
    }

    fn ze_module_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        module: ModuleHandle,
        build_log: Option<ModuleBuildLogHandle>,
    ) -> Checked {
        let _ = (result, context, device, module, build_log);
        Ok(())
    }

    fn ze_module_destroy(&self, module: ModuleHandle) -> Checked {
        let _ = module;
        Ok(())
    }

    /// `zeModuleGetNativeBinary`, `zeModuleGetGlobalPointer`, `zeModuleGetKernelNames`,
    /// `zeModuleGetProperties` and `zeModuleGetFunctionPointer`.
    fn ze_module_use(&self, module: ModuleHandle) -> Checked {
        let _ = module;
        Ok(())
    }

    fn ze_module_dynamic_link(&self, modules: &[ModuleHandle]) -> Checked {
        let _ = modules;
        Ok(())
    }

    fn ze_module_dynamic_link_epilogue(
        &self,
        result: ZeResult,
        link_log: Option<ModuleBuildLogHandle>,
    ) -> Checked {
        let _ = (result, link_log);
        Ok(())
    }

    fn ze_module_build_log_destroy(&self, build_log: ModuleBuildLogHandle) -> Checked {
        let _ = build_log;
        Ok(())
    }

    fn ze_module_build_log_get_string(&self, build_log: ModuleBuildLogHandle) -> Checked {
        let _ = build_log;
        Ok(())
    }

    fn ze_kernel_create(&self, module: ModuleHandle) -> Checked {
        let _ = module;
        Ok(())
    }

    fn ze_kernel_create_epilogue(
        &self,
        result: ZeResult,
        module: ModuleHandle,
        kernel: KernelHandle,
    ) -> Checked {
        let _ = (result, module, kernel);
        Ok(())
    }

    fn ze_kernel_destroy(&self, kernel: KernelHandle) -> Checked {
        let _ = kernel;
        Ok(())
    }

    /// `zeKernelSetArgumentValue`, `zeKernelSetGroupSize` and the other kernel queries.
    fn ze_kernel_use(&self, kernel: KernelHandle) -> Checked {
        let _ = kernel;
        Ok(())
    }

    fn ze_sampler_create(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        let _ = (context, device);
        Ok(())
    }

    fn ze_sampler_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        sampler: SamplerHandle,
    ) -> Checked {
        let _ = (result, context, device, sampler);
        Ok(())
    }

    fn ze_sampler_destroy(&self, sampler: SamplerHandle) -> Checked {
        let _ = sampler;
        Ok(())
    }

    fn ze_physical_mem_create(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        let _ = (context, device);
        Ok(())
    }

    fn ze_physical_mem_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        physical_memory: PhysicalMemHandle,
    ) -> Checked {
        let _ = (result, context, device, physical_memory);
        Ok(())
    }

    fn ze_physical_mem_destroy(
        &self,
        context: ContextHandle,
        physical_memory: PhysicalMemHandle,
    ) -> Checked {
        let _ = (context, physical_memory);
        Ok(())
    }

    fn ze_mem_get_ipc_handle(&self, context: ContextHandle) -> Checked {
        let _ = context;
        Ok(())
    }

    fn ze_mem_get_ipc_handle_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        ipc_handle: IpcMemHandle,
    ) -> Checked {
        let _ = (result, context, ipc_handle);
        Ok(())
    }

    fn ze_mem_put_ipc_handle(&self, context: ContextHandle, ipc_handle: IpcMemHandle) -> Checked {
        let _ = (context, ipc_handle);
        Ok(())
    }

    fn ze_mem_open_ipc_handle(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        let _ = (context, device);
        Ok(())
    }

    fn ze_mem_close_ipc_handle(&self, context: ContextHandle) -> Checked {
        let _ = context;
        Ok(())
    }

    fn ze_fabric_vertex_get(&self, driver: DriverHandle) -> Checked {
        let _ = driver;
        Ok(())
    }

    fn ze_fabric_vertex_get_epilogue(
        &self,
        result: ZeResult,
        driver: DriverHandle,
        vertices: &[FabricVertexHandle],
    ) -> Checked {
        let _ = (result, driver, vertices);
        Ok(())
    }

    fn ze_fabric_edge_get(
        &self,
        vertex_a: FabricVertexHandle,
        vertex_b: FabricVertexHandle,
    ) -> Checked {
        let _ = (vertex_a, vertex_b);
        Ok(())
    }

    fn ze_fabric_edge_get_epilogue(
        &self,
        result: ZeResult,
        vertex_a: FabricVertexHandle,
        vertex_b: FabricVertexHandle,
        edges: &[FabricEdgeHandle],
    ) -> Checked {
        let _ = (result, vertex_a, vertex_b, edges);
        Ok(())
    }

    fn ze_rtas_builder_create(&self, driver: DriverHandle) -> Checked {
        let _ = driver;
        Ok(())
    }

    fn ze_rtas_builder_create_epilogue(
        &self,
        result: ZeResult,
        driver: DriverHandle,
        builder: RtasBuilderHandle,
    ) -> Checked {
        let _ = (result, driver, builder);
        Ok(())
    }

    fn ze_rtas_builder_build(
        &self,
        builder: RtasBuilderHandle,
        parallel_operation: Option<RtasParallelOperationHandle>,
    ) -> Checked {
        let _ = (builder, parallel_operation);
        Ok(())
    }

    fn ze_rtas_builder_destroy(&self, builder: RtasBuilderHandle) -> Checked {
        let _ = builder;
        Ok(())
    }

    fn ze_rtas_parallel_operation_create(&self, driver: DriverHandle) -> Checked {
        let _ = driver;
        Ok(())
    }

    fn ze_rtas_parallel_operation_create_epilogue(
        &self,
        result: ZeResult,
        driver: DriverHandle,
        parallel_operation: RtasParallelOperationHandle,
    ) -> Checked {
        let _ = (result, driver, parallel_operation);
        Ok(())
    }

    fn ze_rtas_parallel_operation_destroy(
        &self,
        parallel_operation: RtasParallelOperationHandle,
    ) -> Checked {
        let _ = parallel_operation;
        Ok(())
    }
}

impl CoreEntryPoints for HandleLifetimeChecker<'_> {
    fn ze_driver_get_epilogue(&self, result: ZeResult, drivers: &[DriverHandle]) -> Checked {
        self.enumerated(result, drivers, &[]);
        Ok(())
    }

    fn ze_device_get(&self, driver: DriverHandle) -> Checked {
        self.valid(driver)
    }

    fn ze_device_get_epilogue(
        &self,
        result: ZeResult,
        driver: DriverHandle,
        devices: &[DeviceHandle],
    ) -> Checked {
        // No-op edge while the driver is live.
        self.enumerated(result, devices, &[driver.key()]);
        Ok(())
    }

    fn ze_device_get_sub_devices(&self, device: DeviceHandle) -> Checked {
        self.valid(device)
    }

    fn ze_device_get_sub_devices_epilogue(
        &self,
        result: ZeResult,
        device: DeviceHandle,
        sub_devices: &[DeviceHandle],
    ) -> Checked {
        self.enumerated(result, sub_devices, &[device.key()]);
        Ok(())
    }

    fn ze_device_use(&self, device: DeviceHandle) -> Checked {
        self.valid(device)
    }

    fn ze_context_create(&self, driver: DriverHandle) -> Checked {
        self.valid(driver)
    }

    fn ze_context_create_ex(&self, driver: DriverHandle, devices: &[DeviceHandle]) -> Checked {
        self.valid(driver)?;
        self.valid_all(devices)
    }

    fn ze_context_create_epilogue(
        &self,
        result: ZeResult,
        driver: DriverHandle,
        context: ContextHandle,
    ) -> Checked {
        self.created(result, context, &[driver.key()]);
        Ok(())
    }

    fn ze_context_destroy(&self, context: ContextHandle) -> Checked {
        self.destroy(context)
    }

    fn ze_context_use(&self, context: ContextHandle, device: Option<DeviceHandle>) -> Checked {
        self.valid(context)?;
        self.valid_optional(device)
    }

    fn ze_command_queue_create(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        self.valid(context)?;
        self.valid(device)
    }

    fn ze_command_queue_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        command_queue: CommandQueueHandle,
    ) -> Checked {
        self.created(result, command_queue, &[context.key(), device.key()]);
        Ok(())
    }

    fn ze_command_queue_destroy(&self, command_queue: CommandQueueHandle) -> Checked {
        self.destroy(command_queue)
    }

    fn ze_command_queue_execute_command_lists(
        &self,
        command_queue: CommandQueueHandle,
        command_lists: &[CommandListHandle],
        fence: Option<FenceHandle>,
    ) -> Checked {
        self.valid(command_queue)?;
        self.closed_all(command_lists)?;
        self.valid_optional(fence)
    }

    fn ze_command_queue_synchronize(&self, command_queue: CommandQueueHandle) -> Checked {
        self.valid(command_queue)
    }

    fn ze_command_list_create(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        self.valid(context)?;
        self.valid(device)
    }

    fn ze_command_list_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        command_list: CommandListHandle,
    ) -> Checked {
        self.created(result, command_list, &[context.key(), device.key()]);
        Ok(())
    }

    fn ze_command_list_create_immediate(
        &self,
        context: ContextHandle,
        device: DeviceHandle,
    ) -> Checked {
        self.valid(context)?;
        self.valid(device)
    }

    fn ze_command_list_create_immediate_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        command_list: CommandListHandle,
    ) -> Checked {
        self.created(result, command_list, &[context.key(), device.key()]);
        Ok(())
    }

    fn ze_command_list_destroy(&self, command_list: CommandListHandle) -> Checked {
        self.destroy(command_list)
    }

    fn ze_command_list_close(&self, command_list: CommandListHandle) -> Checked {
        self.handle_lifetime().close(command_list)?;

        Ok(())
    }

    fn ze_command_list_reset(&self, command_list: CommandListHandle) -> Checked {
        self.handle_lifetime().reset(command_list)?;

        Ok(())
    }

    fn ze_command_list_host_synchronize(&self, command_list: CommandListHandle) -> Checked {
        self.valid(command_list)
    }

    fn ze_command_list_append(
        &self,
        command_list: CommandListHandle,
        signal_event: Option<EventHandle>,
        wait_events: &[EventHandle],
    ) -> Checked {
        self.open(command_list)?;
        self.valid_optional(signal_event)?;
        self.valid_all(wait_events)
    }

    fn ze_command_list_append_launch_kernel(
        &self,
        command_list: CommandListHandle,
        kernel: KernelHandle,
        signal_event: Option<EventHandle>,
        wait_events: &[EventHandle],
    ) -> Checked {
        self.open(command_list)?;
        self.valid(kernel)?;
        self.valid_optional(signal_event)?;
        self.valid_all(wait_events)
    }

    fn ze_command_list_append_image_copy(
        &self,
        command_list: CommandListHandle,
        dst_image: ImageHandle,
        src_image: ImageHandle,
        signal_event: Option<EventHandle>,
        wait_events: &[EventHandle],
    ) -> Checked {
        self.open(command_list)?;
        self.valid(dst_image)?;
        self.valid(src_image)?;
        self.valid_optional(signal_event)?;
        self.valid_all(wait_events)
    }

    fn ze_command_list_append_signal_event(
        &self,
        command_list: CommandListHandle,
        event: EventHandle,
    ) -> Checked {
        self.open(command_list)?;
        self.valid(event)
    }

    fn ze_command_list_append_wait_on_events(
        &self,
        command_list: CommandListHandle,
        events: &[EventHandle],
    ) -> Checked {
        self.open(command_list)?;
        self.valid_all(events)
    }

    fn ze_command_list_append_event_reset(
        &self,
        command_list: CommandListHandle,
        event: EventHandle,
    ) -> Checked {
        self.open(command_list)?;
        self.valid(event)
    }

    fn ze_fence_create(&self, command_queue: CommandQueueHandle) -> Checked {
        self.valid(command_queue)
    }

    fn ze_fence_create_epilogue(
        &self,
        result: ZeResult,
        command_queue: CommandQueueHandle,
        fence: FenceHandle,
    ) -> Checked {
        self.created(result, fence, &[command_queue.key()]);
        Ok(())
    }

    fn ze_fence_destroy(&self, fence: FenceHandle) -> Checked {
        self.destroy(fence)
    }

    fn ze_fence_use(&self, fence: FenceHandle) -> Checked {
        self.valid(fence)
    }

    fn ze_event_pool_create(&self, context: ContextHandle, devices: &[DeviceHandle]) -> Checked {
        self.valid(context)?;
        self.valid_all(devices)
    }

    fn ze_event_pool_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        event_pool: EventPoolHandle,
    ) -> Checked {
        self.created(result, event_pool, &[context.key()]);
        Ok(())
    }

    fn ze_event_pool_destroy(&self, event_pool: EventPoolHandle) -> Checked {
        self.destroy(event_pool)
    }

    fn ze_event_pool_get_ipc_handle(&self, event_pool: EventPoolHandle) -> Checked {
        self.valid(event_pool)
    }

    fn ze_event_pool_get_ipc_handle_epilogue(
        &self,
        result: ZeResult,
        event_pool: EventPoolHandle,
        ipc_handle: IpcEventPoolHandle,
    ) -> Checked {
        self.created(result, ipc_handle, &[event_pool.key()]);
        Ok(())
    }

    fn ze_event_pool_put_ipc_handle(
        &self,
        context: ContextHandle,
        ipc_handle: IpcEventPoolHandle,
    ) -> Checked {
        self.valid(context)?;
        self.destroy(ipc_handle)
    }

    fn ze_event_pool_open_ipc_handle(&self, context: ContextHandle) -> Checked {
        self.valid(context)
    }

    fn ze_event_pool_open_ipc_handle_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        event_pool: EventPoolHandle,
    ) -> Checked {
        self.created(result, event_pool, &[context.key()]);
        Ok(())
    }

    fn ze_event_pool_close_ipc_handle(&self, event_pool: EventPoolHandle) -> Checked {
        self.destroy(event_pool)
    }

    fn ze_event_create(&self, event_pool: EventPoolHandle) -> Checked {
        self.valid(event_pool)
    }

    fn ze_event_create_epilogue(
        &self,
        result: ZeResult,
        event_pool: EventPoolHandle,
        event: EventHandle,
    ) -> Checked {
        self.created(result, event, &[event_pool.key()]);
        Ok(())
    }

    fn ze_event_destroy(&self, event: EventHandle) -> Checked {
        self.destroy(event)
    }

    fn ze_event_use(&self, event: EventHandle) -> Checked {
        self.valid(event)
    }

    fn ze_image_create(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        self.valid(context)?;
        self.valid(device)
    }

    fn ze_image_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        image: ImageHandle,
    ) -> Checked {
        self.created(result, image, &[context.key(), device.key()]);
        Ok(())
    }

    fn ze_image_destroy(&self, image: ImageHandle) -> Checked {
        self.destroy(image)
    }

    fn ze_image_view_create(
        &self,
        context: ContextHandle,
        device: DeviceHandle,
        image: ImageHandle,
    ) -> Checked {
        self.valid(context)?;
        self.valid(device)?;
        self.valid(image)
    }

    fn ze_image_view_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        image: ImageHandle,
        view: ImageHandle,
    ) -> Checked {
        self.created(result, view, &[context.key(), device.key(), image.key()]);
        Ok(())
    }

    fn ze_image_use(
        &self,
        context: ContextHandle,
        device: Option<DeviceHandle>,
        image: ImageHandle,
    ) -> Checked {
        self.valid(context)?;
        self.valid_optional(device)?;
        self.valid(image)
    }

    fn ze_module_create(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        self.valid(context)?;
        self.valid(device)
    }

    fn ze_module_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        module: ModuleHandle,
        build_log: Option<ModuleBuildLogHandle>,
    ) -> Checked {
        self.created(result, module, &[context.key(), device.key()]);

        // The build log is written even when the build fails, and outlives the module.
        if let Some(build_log) = build_log.filter(|build_log| !build_log.is_null()) {
            self.handle_lifetime().add_handle(build_log);
        }

        Ok(())
    }

    fn ze_module_destroy(&self, module: ModuleHandle) -> Checked {
        self.destroy(module)
    }

    fn ze_module_use(&self, module: ModuleHandle) -> Checked {
        self.valid(module)
    }

    fn ze_module_dynamic_link(&self, modules: &[ModuleHandle]) -> Checked {
        self.valid_all(modules)
    }

    fn ze_module_dynamic_link_epilogue(
        &self,
        result: ZeResult,
        link_log: Option<ModuleBuildLogHandle>,
    ) -> Checked {
        // Like build logs, link logs are written on failure too and belong to no module.
        if let Some(link_log) = link_log.filter(|link_log| !link_log.is_null()) {
            self.handle_lifetime().add_handle(link_log);
        }

        Ok(())
    }

    fn ze_module_build_log_destroy(&self, build_log: ModuleBuildLogHandle) -> Checked {
        self.destroy(build_log)
    }

    fn ze_module_build_log_get_string(&self, build_log: ModuleBuildLogHandle) -> Checked {
        self.valid(build_log)
    }

    fn ze_kernel_create(&self, module: ModuleHandle) -> Checked {
        self.valid(module)
    }

    fn ze_kernel_create_epilogue(
        &self,
        result: ZeResult,
        module: ModuleHandle,
        kernel: KernelHandle,
    ) -> Checked {
        self.created(result, kernel, &[module.key()]);
        Ok(())
    }

    fn ze_kernel_destroy(&self, kernel: KernelHandle) -> Checked {
        self.destroy(kernel)
    }

    fn ze_kernel_use(&self, kernel: KernelHandle) -> Checked {
        self.valid(kernel)
    }

    fn ze_sampler_create(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        self.valid(context)?;
        self.valid(device)
    }

    fn ze_sampler_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        sampler: SamplerHandle,
    ) -> Checked {
        self.created(result, sampler, &[context.key(), device.key()]);
        Ok(())
    }

    fn ze_sampler_destroy(&self, sampler: SamplerHandle) -> Checked {
        self.destroy(sampler)
    }

    fn ze_physical_mem_create(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        self.valid(context)?;
        self.valid(device)
    }

    fn ze_physical_mem_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        device: DeviceHandle,
        physical_memory: PhysicalMemHandle,
    ) -> Checked {
        self.created(result, physical_memory, &[context.key(), device.key()]);
        Ok(())
    }

    fn ze_physical_mem_destroy(
        &self,
        context: ContextHandle,
        physical_memory: PhysicalMemHandle,
    ) -> Checked {
        self.valid(context)?;
        self.destroy(physical_memory)
    }

    fn ze_mem_get_ipc_handle(&self, context: ContextHandle) -> Checked {
        self.valid(context)
    }

    fn ze_mem_get_ipc_handle_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        ipc_handle: IpcMemHandle,
    ) -> Checked {
        self.created(result, ipc_handle, &[context.key()]);
        Ok(())
    }

    fn ze_mem_put_ipc_handle(&self, context: ContextHandle, ipc_handle: IpcMemHandle) -> Checked {
        self.valid(context)?;
        self.destroy(ipc_handle)
    }

    fn ze_mem_open_ipc_handle(&self, context: ContextHandle, device: DeviceHandle) -> Checked {
        self.valid(context)?;
        self.valid(device)
    }

    fn ze_mem_close_ipc_handle(&self, context: ContextHandle) -> Checked {
        self.valid(context)
    }

    fn ze_fabric_vertex_get(&self, driver: DriverHandle) -> Checked {
        self.valid(driver)
    }

    fn ze_fabric_vertex_get_epilogue(
        &self,
        result: ZeResult,
        driver: DriverHandle,
        vertices: &[FabricVertexHandle],
    ) -> Checked {
        self.enumerated(result, vertices, &[driver.key()]);
        Ok(())
    }

    fn ze_fabric_edge_get(
        &self,
        vertex_a: FabricVertexHandle,
        vertex_b: FabricVertexHandle,
    ) -> Checked {
        self.valid(vertex_a)?;
        self.valid(vertex_b)
    }

    fn ze_fabric_edge_get_epilogue(
        &self,
        result: ZeResult,
        vertex_a: FabricVertexHandle,
        vertex_b: FabricVertexHandle,
        edges: &[FabricEdgeHandle],
    ) -> Checked {
        self.enumerated(result, edges, &[vertex_a.key(), vertex_b.key()]);
        Ok(())
    }

    fn ze_rtas_builder_create(&self, driver: DriverHandle) -> Checked {
        self.valid(driver)
    }

    fn ze_rtas_builder_create_epilogue(
        &self,
        result: ZeResult,
        driver: DriverHandle,
        builder: RtasBuilderHandle,
    ) -> Checked {
        self.created(result, builder, &[driver.key()]);
        Ok(())
    }

    fn ze_rtas_builder_build(
        &self,
        builder: RtasBuilderHandle,
        parallel_operation: Option<RtasParallelOperationHandle>,
    ) -> Checked {
        self.valid(builder)?;
        self.valid_optional(parallel_operation)
    }

    fn ze_rtas_builder_destroy(&self, builder: RtasBuilderHandle) -> Checked {
        self.destroy(builder)
    }

    fn ze_rtas_parallel_operation_create(&self, driver: DriverHandle) -> Checked {
        self.valid(driver)
    }

    fn ze_rtas_parallel_operation_create_epilogue(
        &self,
        result: ZeResult,
        driver: DriverHandle,
        parallel_operation: RtasParallelOperationHandle,
    ) -> Checked {
        self.created(result, parallel_operation, &[driver.key()]);
        Ok(())
    }

    fn ze_rtas_parallel_operation_destroy(
        &self,
        parallel_operation: RtasParallelOperationHandle,
    ) -> Checked {
        self.destroy(parallel_operation)
    }
}
