// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Hooks for the tools API (`zet*`): metrics, tracing and debugging.

use crate::{HandleLifetimeChecker, ValidationError, ZeResult};
use ze_handle_lifetime::{
    CommandListHandle, ContextHandle, DebugSessionHandle, DeviceHandle, EventHandle, Handle,
    KernelHandle, MetricGroupHandle, MetricHandle, MetricQueryHandle, MetricQueryPoolHandle,
    MetricStreamerHandle, ModuleHandle, TracerHandle,
};

type Checked = Result<(), ValidationError>;

/// Prologue and epilogue hooks for the tools API entry points that create, destroy or use
/// handles. Every hook passes by default.
pub trait ToolsEntryPoints {
    fn zet_module_get_debug_info(&self, module: ModuleHandle) -> Checked {
        let _ = module;
        Ok(())
    }

    fn zet_device_get_debug_properties(&self, device: DeviceHandle) -> Checked {
        let _ = device;
        Ok(())
    }

    fn zet_debug_attach(&self, device: DeviceHandle) -> Checked {
        let _ = device;
        Ok(())
    }

    fn zet_debug_attach_epilogue(
        &self,
        result: ZeResult,
        device: DeviceHandle,
        session: DebugSessionHandle,
    ) -> Checked {
        let _ = (result, device, session);
        Ok(())
    }

    fn zet_debug_detach(&self, session: DebugSessionHandle) -> Checked {
        let _ = session;
        Ok(())
    }

    /// Event, thread, memory and register access on a debug session.
    fn zet_debug_session_use(&self, session: DebugSessionHandle) -> Checked {
        let _ = session;
        Ok(())
    }

    fn zet_metric_group_get(&self, device: DeviceHandle) -> Checked {
        let _ = device;
        Ok(())
    }

    fn zet_metric_group_get_epilogue(
        &self,
        result: ZeResult,
        device: DeviceHandle,
        metric_groups: &[MetricGroupHandle],
    ) -> Checked {
        let _ = (result, device, metric_groups);
        Ok(())
    }

    /// Property queries and value calculation on a metric group.
    fn zet_metric_group_use(&self, metric_group: MetricGroupHandle) -> Checked {
        let _ = metric_group;
        Ok(())
    }

    fn zet_metric_group_create_exp(&self, device: DeviceHandle) -> Checked {
        let _ = device;
        Ok(())
    }

    fn zet_metric_group_create_exp_epilogue(
        &self,
        result: ZeResult,
        device: DeviceHandle,
        metric_group: MetricGroupHandle,
    ) -> Checked {
        let _ = (result, device, metric_group);
        Ok(())
    }

    fn zet_metric_group_add_metric_exp(
        &self,
        metric_group: MetricGroupHandle,
        metric: MetricHandle,
    ) -> Checked {
        let _ = (metric_group, metric);
        Ok(())
    }

    fn zet_metric_group_remove_metric_exp(
        &self,
        metric_group: MetricGroupHandle,
        metric: MetricHandle,
    ) -> Checked {
        let _ = (metric_group, metric);
        Ok(())
    }

    fn zet_metric_group_destroy_exp(&self, metric_group: MetricGroupHandle) -> Checked {
        let _ = metric_group;
        Ok(())
    }

    fn zet_metric_get(&self, metric_group: MetricGroupHandle) -> Checked {
        let _ = metric_group;
        Ok(())
    }

    fn zet_metric_get_epilogue(
        &self,
        result: ZeResult,
        metric_group: MetricGroupHandle,
        metrics: &[MetricHandle],
    ) -> Checked {
        let _ = (result, metric_group, metrics);
        Ok(())
    }

    fn zet_metric_get_properties(&self, metric: MetricHandle) -> Checked {
        let _ = metric;
        Ok(())
    }

    fn zet_context_activate_metric_groups(
        &self,
        context: ContextHandle,
        device: DeviceHandle,
        metric_groups: &[MetricGroupHandle],
    ) -> Checked {
        let _ = (context, device, metric_groups);
        Ok(())
    }

    fn zet_metric_streamer_open(
        &self,
        context: ContextHandle,
        device: DeviceHandle,
        metric_group: MetricGroupHandle,
        notification_event: Option<EventHandle>,
    ) -> Checked {
        let _ = (context, device, metric_group, notification_event);
        Ok(())
    }

    fn zet_metric_streamer_open_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        metric_group: MetricGroupHandle,
        streamer: MetricStreamerHandle,
    ) -> Checked {
        let _ = (result, context, metric_group, streamer);
        Ok(())
    }

    fn zet_metric_streamer_read_data(&self, streamer: MetricStreamerHandle) -> Checked {
        let _ = streamer;
        Ok(())
    }

    fn zet_metric_streamer_close(&self, streamer: MetricStreamerHandle) -> Checked {
        let _ = streamer;
        Ok(())
    }

    fn zet_command_list_append_metric_streamer_marker(
        &self,
        command_list: CommandListHandle,
        streamer: MetricStreamerHandle,
    ) -> Checked {
        let _ = (command_list, streamer);
        Ok(())
    }

    fn zet_metric_query_pool_create(
        &self,
        context: ContextHandle,
        device: DeviceHandle,
        metric_group: MetricGroupHandle,
    ) -> Checked {
        let _ = (context, device, metric_group);
        Ok(())
    }

    fn zet_metric_query_pool_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        metric_group: MetricGroupHandle,
        query_pool: MetricQueryPoolHandle,
    ) -> Checked {
        let _ = (result, context, metric_group, query_pool);
        Ok(())
    }

    fn zet_metric_query_pool_destroy(&self, query_pool: MetricQueryPoolHandle) -> Checked {
        let _ = query_pool;
        Ok(())
    }

    fn zet_metric_query_create(&self, query_pool: MetricQueryPoolHandle) -> Checked {
        let _ = query_pool;
        Ok(())
    }

    fn zet_metric_query_create_epilogue(
        &self,
        result: ZeResult,
        query_pool: MetricQueryPoolHandle,
        query: MetricQueryHandle,
    ) -> Checked {
        let _ = (result, query_pool, query);
        Ok(())
    }

    fn zet_metric_query_destroy(&self, query: MetricQueryHandle) -> Checked {
        let _ = query;
        Ok(())
    }

    /// `zetMetricQueryReset` and `zetMetricQueryGetData`.
    fn zet_metric_query_use(&self, query: MetricQueryHandle) -> Checked {
        let _ = query;
        Ok(())
    }

    fn zet_command_list_append_metric_query_begin(
        &self,
        command_list: CommandListHandle,
        query: MetricQueryHandle,
    ) -> Checked {
        let _ = (command_list, query);
        Ok(())
    }

    fn zet_command_list_append_metric_query_end(
        &self,
        command_list: CommandListHandle,
        query: MetricQueryHandle,
        signal_event: Option<EventHandle>,
        wait_events: &[EventHandle],
    ) -> Checked {
        let _ = (command_list, query, signal_event, wait_events);
        Ok(())
    }

    fn zet_command_list_append_metric_memory_barrier(
        &self,
        command_list: CommandListHandle,
    ) -> Checked {
        let _ = command_list;
        Ok(())
    }

    fn zet_kernel_get_profile_info(&self, kernel: KernelHandle) -> Checked {
        let _ = kernel;
        Ok(())
    }

    fn zet_tracer_exp_create(&self, context: ContextHandle) -> Checked {
        let _ = context;
        Ok(())
    }

    fn zet_tracer_exp_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        tracer: TracerHandle,
    ) -> Checked {
        let _ = (result, context, tracer);
        Ok(())
    }

    fn zet_tracer_exp_destroy(&self, tracer: TracerHandle) -> Checked {
        let _ = tracer;
        Ok(())
    }

    /// `zetTracerExpSetPrologues`, `zetTracerExpSetEpilogues` and `zetTracerExpSetEnabled`.
    fn zet_tracer_exp_use(&self, tracer: TracerHandle) -> Checked {
        let _ = tracer;
        Ok(())
    }
}

impl ToolsEntryPoints for HandleLifetimeChecker<'_> {
    fn zet_module_get_debug_info(&self, module: ModuleHandle) -> Checked {
        self.valid(module)
    }

    fn zet_device_get_debug_properties(&self, device: DeviceHandle) -> Checked {
        self.valid(device)
    }

    fn zet_debug_attach(&self, device: DeviceHandle) -> Checked {
        self.valid(device)
    }

    fn zet_debug_attach_epilogue(
        &self,
        result: ZeResult,
        device: DeviceHandle,
        session: DebugSessionHandle,
    ) -> Checked {
        self.created(result, session, &[device.key()]);
        Ok(())
    }

    fn zet_debug_detach(&self, session: DebugSessionHandle) -> Checked {
        self.destroy(session)
    }

    fn zet_debug_session_use(&self, session: DebugSessionHandle) -> Checked {
        self.valid(session)
    }

    fn zet_metric_group_get(&self, device: DeviceHandle) -> Checked {
        self.valid(device)
    }

    fn zet_metric_group_get_epilogue(
        &self,
        result: ZeResult,
        device: DeviceHandle,
        metric_groups: &[MetricGroupHandle],
    ) -> Checked {
        self.enumerated(result, metric_groups, &[device.key()]);
        Ok(())
    }

    fn zet_metric_group_use(&self, metric_group: MetricGroupHandle) -> Checked {
        self.valid(metric_group)
    }

    fn zet_metric_group_create_exp(&self, device: DeviceHandle) -> Checked {
        self.valid(device)
    }

    fn zet_metric_group_create_exp_epilogue(
        &self,
        result: ZeResult,
        device: DeviceHandle,
        metric_group: MetricGroupHandle,
    ) -> Checked {
        self.created(result, metric_group, &[device.key()]);
        Ok(())
    }

    fn zet_metric_group_add_metric_exp(
        &self,
        metric_group: MetricGroupHandle,
        metric: MetricHandle,
    ) -> Checked {
        self.valid(metric_group)?;
        self.valid(metric)
    }

    fn zet_metric_group_remove_metric_exp(
        &self,
        metric_group: MetricGroupHandle,
        metric: MetricHandle,
    ) -> Checked {
        self.valid(metric_group)?;
        self.valid(metric)
    }

    fn zet_metric_group_destroy_exp(&self, metric_group: MetricGroupHandle) -> Checked {
        self.destroy(metric_group)
    }

    fn zet_metric_get(&self, metric_group: MetricGroupHandle) -> Checked {
        self.valid(metric_group)
    }

    fn zet_metric_get_epilogue(
        &self,
        result: ZeResult,
        metric_group: MetricGroupHandle,
        metrics: &[MetricHandle],
    ) -> Checked {
        // Metrics are shared between groups, so they don't keep one alive.
        let _ = metric_group;
        self.enumerated(result, metrics, &[]);
        Ok(())
    }

    fn zet_metric_get_properties(&self, metric: MetricHandle) -> Checked {
        self.valid(metric)
    }

    fn zet_context_activate_metric_groups(
        &self,
        context: ContextHandle,
        device: DeviceHandle,
        metric_groups: &[MetricGroupHandle],
    ) -> Checked {
        self.valid(context)?;
        self.valid(device)?;
        self.valid_all(metric_groups)
    }

    fn zet_metric_streamer_open(
        &self,
        context: ContextHandle,
        device: DeviceHandle,
        metric_group: MetricGroupHandle,
        notification_event: Option<EventHandle>,
    ) -> Checked {
        self.valid(context)?;
        self.valid(device)?;
        self.valid(metric_group)?;
        self.valid_optional(notification_event)
    }

    fn zet_metric_streamer_open_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        metric_group: MetricGroupHandle,
        streamer: MetricStreamerHandle,
    ) -> Checked {
        self.created(result, streamer, &[context.key(), metric_group.key()]);
        Ok(())
    }

    fn zet_metric_streamer_read_data(&self, streamer: MetricStreamerHandle) -> Checked {
        self.valid(streamer)
    }

    fn zet_metric_streamer_close(&self, streamer: MetricStreamerHandle) -> Checked {
        self.destroy(streamer)
    }

    fn zet_command_list_append_metric_streamer_marker(
        &self,
        command_list: CommandListHandle,
        streamer: MetricStreamerHandle,
    ) -> Checked {
        self.open(command_list)?;
        self.valid(streamer)
    }

    fn zet_metric_query_pool_create(
        &self,
        context: ContextHandle,
        device: DeviceHandle,
        metric_group: MetricGroupHandle,
    ) -> Checked {
        self.valid(context)?;
        self.valid(device)?;
        self.valid(metric_group)
    }

    fn zet_metric_query_pool_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        metric_group: MetricGroupHandle,
        query_pool: MetricQueryPoolHandle,
    ) -> Checked {
        self.created(result, query_pool, &[context.key(), metric_group.key()]);
        Ok(())
    }

    fn zet_metric_query_pool_destroy(&self, query_pool: MetricQueryPoolHandle) -> Checked {
        self.destroy(query_pool)
    }

    fn zet_metric_query_create(&self, query_pool: MetricQueryPoolHandle) -> Checked {
        self.valid(query_pool)
    }

    fn zet_metric_query_create_epilogue(
        &self,
        result: ZeResult,
        query_pool: MetricQueryPoolHandle,
        query: MetricQueryHandle,
    ) -> Checked {
        self.created(result, query, &[query_pool.key()]);
        Ok(())
    }

    fn zet_metric_query_destroy(&self, query: MetricQueryHandle) -> Checked {
        self.destroy(query)
    }

    fn zet_metric_query_use(&self, query: MetricQueryHandle) -> Checked {
        self.valid(query)
    }

    fn zet_command_list_append_metric_query_begin(
        &self,
        command_list: CommandListHandle,
        query: MetricQueryHandle,
    ) -> Checked {
        self.open(command_list)?;
        self.valid(query)
    }

    fn zet_command_list_append_metric_query_end(
        &self,
        command_list: CommandListHandle,
        query: MetricQueryHandle,
        signal_event: Option<EventHandle>,
        wait_events: &[EventHandle],
    ) -> Checked {
        self.open(command_list)?;
        self.valid(query)?;
        self.valid_optional(signal_event)?;
        self.valid_all(wait_events)
    }

    fn zet_command_list_append_metric_memory_barrier(
        &self,
        command_list: CommandListHandle,
    ) -> Checked {
        self.open(command_list)
    }

    fn zet_kernel_get_profile_info(&self, kernel: KernelHandle) -> Checked {
        self.valid(kernel)
    }

    fn zet_tracer_exp_create(&self, context: ContextHandle) -> Checked {
        self.valid(context)
    }

    fn zet_tracer_exp_create_epilogue(
        &self,
        result: ZeResult,
        context: ContextHandle,
        tracer: TracerHandle,
    ) -> Checked {
        self.created(result, tracer, &[context.key()]);
        Ok(())
    }

    fn zet_tracer_exp_destroy(&self, tracer: TracerHandle) -> Checked {
        self.destroy(tracer)
    }

    fn zet_tracer_exp_use(&self, tracer: TracerHandle) -> Checked {
        self.valid(tracer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ze_handle_lifetime::HandleLifetime;

    fn live(lifetime: &HandleLifetime) -> (ContextHandle, DeviceHandle) {
        let context = ContextHandle::from_raw(0x1);
        let device = DeviceHandle::from_raw(0x2);
        lifetime.add_handle(context);
        lifetime.add_handle(device);

        (context, device)
    }

    #[test]
    fn created_metric_group_depends_on_device() {
        let lifetime = HandleLifetime::default();
        let checker = HandleLifetimeChecker::new(&lifetime);
        let (_, device) = live(&lifetime);
        let group = MetricGroupHandle::from_raw(0x10);

        checker.zet_metric_group_create_exp(device).unwrap();
        checker
            .zet_metric_group_create_exp_epilogue(ZeResult::SUCCESS, device, group)
            .unwrap();
        assert!(lifetime.is_handle_valid(group));
        assert_eq!(&lifetime.dependents_of(device)[..], &[group.key()]);

        checker.zet_metric_group_destroy_exp(group).unwrap();
        assert!(!lifetime.is_handle_valid(group));
        assert!(!lifetime.has_dependents(device));
    }

    #[test]
    fn streamer_keeps_group_alive_until_closed() {
        let lifetime = HandleLifetime::default();
        let checker = HandleLifetimeChecker::new(&lifetime);
        let (context, device) = live(&lifetime);
        let group = MetricGroupHandle::from_raw(0x10);
        let streamer = MetricStreamerHandle::from_raw(0x11);

        checker
            .zet_metric_group_create_exp_epilogue(ZeResult::SUCCESS, device, group)
            .unwrap();
        checker
            .zet_metric_streamer_open(context, device, group, None)
            .unwrap();
        checker
            .zet_metric_streamer_open_epilogue(ZeResult::SUCCESS, context, group, streamer)
            .unwrap();

        assert_eq!(
            checker
                .zet_metric_group_destroy_exp(group)
                .map_err(|err| err.result()),
            Err(ZeResult::ERROR_HANDLE_OBJECT_IN_USE),
        );

        checker.zet_metric_streamer_close(streamer).unwrap();
        assert_eq!(
            checker
                .zet_metric_streamer_read_data(streamer)
                .map_err(|err| err.result()),
            Err(ZeResult::ERROR_INVALID_NULL_HANDLE),
        );
        checker.zet_metric_group_destroy_exp(group).unwrap();
    }

    #[test]
    fn query_appends_need_an_open_list() {
        let lifetime = HandleLifetime::default();
        let checker = HandleLifetimeChecker::new(&lifetime);
        let (context, device) = live(&lifetime);
        let group = MetricGroupHandle::from_raw(0x10);
        let pool = MetricQueryPoolHandle::from_raw(0x11);
        let query = MetricQueryHandle::from_raw(0x12);
        let list = CommandListHandle::from_raw(0x13);

        checker
            .zet_metric_group_get_epilogue(ZeResult::SUCCESS, device, &[group])
            .unwrap();
        checker
            .zet_metric_query_pool_create(context, device, group)
            .unwrap();
        checker
            .zet_metric_query_pool_create_epilogue(ZeResult::SUCCESS, context, group, pool)
            .unwrap();
        checker
            .zet_metric_query_create_epilogue(ZeResult::SUCCESS, pool, query)
            .unwrap();
        lifetime.add_command_list(list, true);

        checker
            .zet_command_list_append_metric_query_begin(list, query)
            .unwrap();
        lifetime.close(list).unwrap();
        assert_eq!(
            checker
                .zet_command_list_append_metric_query_end(list, query, None, &[])
                .map_err(|err| err.result()),
            Err(ZeResult::ERROR_INVALID_ARGUMENT),
        );

        assert!(checker.zet_metric_query_pool_destroy(pool).is_err());
        checker.zet_metric_query_destroy(query).unwrap();
        checker.zet_metric_query_pool_destroy(pool).unwrap();
    }

    #[test]
    fn metrics_do_not_keep_their_group_alive() {
        let lifetime = HandleLifetime::default();
        let checker = HandleLifetimeChecker::new(&lifetime);
        let (_, device) = live(&lifetime);
        let group = MetricGroupHandle::from_raw(0x10);
        let metrics = [MetricHandle::from_raw(0x11), MetricHandle::from_raw(0x12)];

        checker
            .zet_metric_group_get_epilogue(ZeResult::SUCCESS, device, &[group])
            .unwrap();
        checker
            .zet_metric_get_epilogue(ZeResult::ERROR_UNINITIALIZED, group, &metrics)
            .unwrap();
        assert!(checker.zet_metric_get_properties(metrics[0]).is_err());

        checker.zet_metric_get(group).unwrap();
        checker
            .zet_metric_get_epilogue(ZeResult::SUCCESS, group, &metrics)
            .unwrap();
        checker
            .zet_metric_get_epilogue(ZeResult::SUCCESS, group, &metrics)
            .unwrap();
        assert_eq!(lifetime.live_count(ze_handle_lifetime::HandleKind::Metric), 2);
        assert!(!lifetime.has_dependents(group));
        checker
            .zet_metric_group_add_metric_exp(group, metrics[1])
            .unwrap();

        checker.zet_metric_group_destroy_exp(group).unwrap();
        assert_eq!(checker.zet_metric_get_properties(metrics[0]), Ok(()));
        assert_eq!(
            checker
                .zet_metric_group_remove_metric_exp(group, metrics[1])
                .map_err(|err| err.result()),
            Err(ZeResult::ERROR_INVALID_NULL_HANDLE),
        );
    }

    #[test]
    fn debug_session_lifetime() {
        let lifetime = HandleLifetime::default();
        let checker = HandleLifetimeChecker::new(&lifetime);
        let (_, device) = live(&lifetime);
        let session = DebugSessionHandle::from_raw(0x20);

        checker.zet_debug_attach(device).unwrap();
        checker
            .zet_debug_attach_epilogue(ZeResult::SUCCESS, device, session)
            .unwrap();
        checker.zet_debug_session_use(session).unwrap();
        checker.zet_debug_detach(session).unwrap();
        assert!(checker.zet_debug_detach(session).is_err());
    }

    #[test]
    fn tracer_lifetime() {
        let lifetime = HandleLifetime::default();
        let checker = HandleLifetimeChecker::new(&lifetime);
        let (context, _) = live(&lifetime);
        let tracer = TracerHandle::from_raw(0x30);

        checker
            .zet_tracer_exp_create_epilogue(ZeResult::SUCCESS, context, tracer)
            .unwrap();
        checker.zet_tracer_exp_use(tracer).unwrap();
        checker.zet_tracer_exp_destroy(tracer).unwrap();
        assert!(checker.zet_tracer_exp_use(tracer).is_err());
        assert!(!lifetime.has_dependents(context));
    }
}
