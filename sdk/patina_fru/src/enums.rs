//! Code-to-name lookups for the enumerated bytes found in FRU data.
//!
//! Each wrapper keeps the raw code so unrecognized values survive decoding; `as_str`
//! returns an empty string for them.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::fmt;

macro_rules! impl_display_as_str {
    ($($name:ident),* $(,)?) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl From<u8> for $name {
                fn from(code: u8) -> Self {
                    Self(code)
                }
            }
        )*
    };
}

impl_display_as_str!(ChassisType, ChassisState, ChassisSecurityStatus, BoardType, FruRecordType, ManagementAccessSubRecordType);

/// Where the FRU device is reached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruLocation {
    Ipmb,
    PrivateBus,
    ManagementController,
}

impl FruLocation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FruLocation::Ipmb => "directly on IPMB",
            FruLocation::PrivateBus => "on private bus",
            FruLocation::ManagementController => "on management controller",
        }
    }
}

impl fmt::Display for FruLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SMBIOS system enclosure type, as stored in the chassis info area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChassisType(pub u8);

impl ChassisType {
    pub const RACK_MOUNT_CHASSIS: Self = Self(0x17);

    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            0x00 => "Unspecified",
            0x01 => "Other",
            0x02 => "Unknown",
            0x03 => "Desktop",
            0x04 => "Low Profile Desktop",
            0x05 => "Pizza Box",
            0x06 => "Mini Tower",
            0x07 => "Tower",
            0x08 => "Portable",
            0x09 => "Laptop",
            0x0a => "Notebook",
            0x0b => "Hand Held",
            0x0c => "Docking Station",
            0x0d => "All in One",
            0x0e => "Sub Notebook",
            0x0f => "Space-saving",
            0x10 => "Lunch Box",
            0x11 => "Main Server Chassis",
            0x12 => "Expansion Chassis",
            0x13 => "SubChassis",
            0x14 => "Bus Expansion Chassis",
            0x15 => "Peripheral Chassis",
            0x16 => "RAID Chassis",
            0x17 => "Rack Mount Chassis",
            0x18 => "Sealed-case PC",
            0x19 => "Multi-system chassis",
            0x1a => "Compact PCI",
            0x1b => "Advanced TCA",
            0x1c => "Blade",
            0x1d => "Blade Enclosure",
            0x1e => "Tablet",
            0x1f => "Convertible",
            0x20 => "Detachable",
            0x21 => "IoT Gateway",
            0x22 => "Embedded PC",
            0x23 => "Mini PC",
            0x24 => "Stick PC",
            _ => "",
        }
    }
}

/// Chassis boot-up, power supply or thermal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChassisState(pub u8);

impl ChassisState {
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            0x01 => "Other",
            0x02 => "Unknown",
            0x03 => "Safe",
            0x04 => "Warning",
            0x05 => "Critical",
            0x06 => "Non-recoverable",
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChassisSecurityStatus(pub u8);

impl ChassisSecurityStatus {
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            0x01 => "Other",
            0x02 => "Unknown",
            0x03 => "None",
            0x04 => "External interface locked out",
            0x05 => "External interface enabled",
            _ => "",
        }
    }
}

/// SMBIOS baseboard type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoardType(pub u8);

impl BoardType {
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            0x01 => "Unknown",
            0x02 => "Other",
            0x03 => "Server Blade",
            0x04 => "Connectivity Switch",
            0x05 => "System Management Module",
            0x06 => "Processor Module",
            0x07 => "I/O Module",
            0x08 => "Memory Module",
            0x09 => "Daughter board",
            0x0a => "Motherboard",
            0x0b => "Processor/Memory Module",
            0x0c => "Processor/IO Module",
            0x0d => "Interconnect board",
            _ => "",
        }
    }
}

/// Multi-record type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FruRecordType(pub u8);

impl FruRecordType {
    pub const POWER_SUPPLY: Self = Self(0x00);
    pub const DC_OUTPUT: Self = Self(0x01);
    pub const DC_LOAD: Self = Self(0x02);
    pub const MANAGEMENT_ACCESS: Self = Self(0x03);
    pub const BASE_COMPATIBILITY: Self = Self(0x04);
    pub const EXTENDED_COMPATIBILITY: Self = Self(0x05);
    pub const ASF_FIXED_SMBUS_DEVICE: Self = Self(0x06);
    pub const ASF_LEGACY_DEVICE_ALERTS: Self = Self(0x07);
    pub const ASF_REMOTE_CONTROL: Self = Self(0x08);
    pub const EXTENDED_DC_OUTPUT: Self = Self(0x09);
    pub const EXTENDED_DC_LOAD: Self = Self(0x0a);

    /// First tag of the OEM record range, which runs to 0xFF.
    pub const OEM_FIRST: u8 = 0xc0;

    pub const fn is_oem(&self) -> bool {
        self.0 >= Self::OEM_FIRST
    }

    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            0x00 => "Power Supply",
            0x01 => "DC Output",
            0x02 => "DC Load",
            0x03 => "Management Access",
            0x04 => "Base Compatibility",
            0x05 => "Extended Compatibility",
            0x06 => "ASF Fixed SMBus Device",
            0x07 => "ASF Legacy-Device Alerts",
            0x08 => "ASF Remote Control",
            0x09 => "Extended DC Output",
            0x0a => "Extended DC Load",
            0xc0..=0xff => "OEM",
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ManagementAccessSubRecordType(pub u8);

impl ManagementAccessSubRecordType {
    pub const SYSTEM_MANAGEMENT_URL: Self = Self(0x01);
    pub const SYSTEM_NAME: Self = Self(0x02);
    pub const SYSTEM_PING_ADDRESS: Self = Self(0x03);
    pub const COMPONENT_MANAGEMENT_URL: Self = Self(0x04);
    pub const COMPONENT_NAME: Self = Self(0x05);
    pub const COMPONENT_PING_ADDRESS: Self = Self(0x06);
    pub const SYSTEM_UNIQUE_ID: Self = Self(0x07);

    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            0x01 => "System Management URL",
            0x02 => "System Name",
            0x03 => "System Ping Address",
            0x04 => "Component Management URL",
            0x05 => "Component Name",
            0x06 => "Component Ping Address",
            0x07 => "System Unique ID",
            _ => "",
        }
    }
}
