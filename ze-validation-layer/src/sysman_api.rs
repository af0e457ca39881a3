// Copyright (c) 2026 The ze-validation-layer developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Hooks for the system management API (`zes*`).
//!
//! Sysman handles are never created or destroyed explicitly. Each component kind is enumerated
//! from a device, and the returned handles stay valid for as long as the device does.

use crate::{HandleLifetimeChecker, ValidationError, ZeResult};
use ze_handle_lifetime::{
    DeviceHandle, DiagnosticsHandle, DriverHandle, EngineHandle, FabricPortHandle, FanHandle,
    FirmwareHandle, FrequencyHandle, Handle, LedHandle, MemoryHandle, OverclockHandle,
    PerfHandle, PowerHandle, PsuHandle, RasHandle, SchedHandle, StandbyHandle,
    TemperatureHandle,
};

type Checked = Result<(), ValidationError>;

/// A sysman component handle, enumerated from a device.
pub trait SysmanComponent: Handle {
    /// The entry point that enumerates components of this kind.
    const ENUM_ENTRY_POINT: &'static str;
}

macro_rules! sysman_components {
    ($($handle:ident => $entry_point:literal,)+) => {
        $(
            impl SysmanComponent for $handle {
                const ENUM_ENTRY_POINT: &'static str = $entry_point;
            }
        )+
    };
}

sysman_components! {
    SchedHandle => "zesDeviceEnumSchedulers",
    PerfHandle => "zesDeviceEnumPerformanceFactorDomains",
    PowerHandle => "zesDeviceEnumPowerDomains",
    FrequencyHandle => "zesDeviceEnumFrequencyDomains",
    EngineHandle => "zesDeviceEnumEngineGroups",
    StandbyHandle => "zesDeviceEnumStandbyDomains",
    FirmwareHandle => "zesDeviceEnumFirmwares",
    MemoryHandle => "zesDeviceEnumMemoryModules",
    FabricPortHandle => "zesDeviceEnumFabricPorts",
    TemperatureHandle => "zesDeviceEnumTemperatureSensors",
    PsuHandle => "zesDeviceEnumPsus",
    FanHandle => "zesDeviceEnumFans",
    LedHandle => "zesDeviceEnumLeds",
    RasHandle => "zesDeviceEnumRasErrorSets",
    DiagnosticsHandle => "zesDeviceEnumDiagnosticTestSuites",
    OverclockHandle => "zesDeviceEnumOverclockDomains",
}

/// Prologue and epilogue hooks for the sysman entry points. Every hook passes by default.
pub trait SysmanEntryPoints {
    fn zes_driver_get_epilogue(&self, result: ZeResult, drivers: &[DriverHandle]) -> Checked {
        let _ = (result, drivers);
        Ok(())
    }

    fn zes_device_get(&self, driver: DriverHandle) -> Checked {
        let _ = driver;
        Ok(())
    }

    fn zes_device_get_epilogue(
        &self,
        result: ZeResult,
        driver: DriverHandle,
        devices: &[DeviceHandle],
    ) -> Checked {
        let _ = (result, driver, devices);
        Ok(())
    }

    /// Any call that only queries or configures a device.
    fn zes_device_use(&self, device: DeviceHandle) -> Checked {
        let _ = device;
        Ok(())
    }

    /// The `zesDeviceEnum*` entry point for components of kind `C`.
    fn zes_device_enum_components<C: SysmanComponent>(&self, device: DeviceHandle) -> Checked {
        let _ = device;
        Ok(())
    }

    fn zes_device_enum_components_epilogue<C: SysmanComponent>(
        &self,
        result: ZeResult,
        device: DeviceHandle,
        components: &[C],
    ) -> Checked {
        let _ = (result, device, components);
        Ok(())
    }

    fn zes_device_get_card_power_domain_epilogue(
        &self,
        result: ZeResult,
        device: DeviceHandle,
        power: PowerHandle,
    ) -> Checked {
        let _ = (result, device, power);
        Ok(())
    }

    /// Any call on a single component, e.g. `zesPowerGetEnergyCounter` or
    /// `zesFanSetFixedSpeedMode`.
    fn zes_component_use<C: SysmanComponent>(&self, component: C) -> Checked {
        let _ = component;
        Ok(())
    }

    fn zes_fabric_port_get_multi_port_throughput(
        &self,
        device: DeviceHandle,
        fabric_ports: &[FabricPortHandle],
    ) -> Checked {
        let _ = (device, fabric_ports);
        Ok(())
    }
}

impl SysmanEntryPoints for HandleLifetimeChecker<'_> {
    fn zes_driver_get_epilogue(&self, result: ZeResult, drivers: &[DriverHandle]) -> Checked {
        self.enumerated(result, drivers, &[]);
        Ok(())
    }

    fn zes_device_get(&self, driver: DriverHandle) -> Checked {
        self.valid(driver)
    }

    fn zes_device_get_epilogue(
        &self,
        result: ZeResult,
        driver: DriverHandle,
        devices: &[DeviceHandle],
    ) -> Checked {
        self.enumerated(result, devices, &[driver.key()]);
        Ok(())
    }

    fn zes_device_use(&self, device: DeviceHandle) -> Checked {
        self.valid(device)
    }

    fn zes_device_enum_components<C: SysmanComponent>(&self, device: DeviceHandle) -> Checked {
        self.valid(device)
    }

    fn zes_device_enum_components_epilogue<C: SysmanComponent>(
        &self,
        result: ZeResult,
        device: DeviceHandle,
        components: &[C],
    ) -> Checked {
        tracing::trace!(
            entry_point = C::ENUM_ENTRY_POINT,
            %result,
            count = components.len(),
            "enumerated sysman components",
        );
        self.enumerated(result, components, &[device.key()]);

        Ok(())
    }

    fn zes_device_get_card_power_domain_epilogue(
        &self,
        result: ZeResult,
        device: DeviceHandle,
        power: PowerHandle,
    ) -> Checked {
        self.enumerated(result, &[power], &[device.key()]);
        Ok(())
    }

    fn zes_component_use<C: SysmanComponent>(&self, component: C) -> Checked {
        self.valid(component)
    }

    fn zes_fabric_port_get_multi_port_throughput(
        &self,
        device: DeviceHandle,
        fabric_ports: &[FabricPortHandle],
    ) -> Checked {
        self.valid(device)?;
        self.valid_all(fabric_ports)
    }
}
