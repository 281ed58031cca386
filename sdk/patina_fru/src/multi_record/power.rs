//! Power supply, DC output and DC load records.
//!
//! Voltages are signed 10 mV units. Currents are mA unless the extended records set their
//! current units flag, in which case they are 10 mA (clear) or 100 mA (set).
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::fmt;

use bitfield_struct::bitfield;

use crate::{
    codec::{unpack_i16_le, unpack_u16_le, unpack_u8},
    FruError,
};

/// Power supply feature flags, byte 17 of the power supply record.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct PowerSupplyFlags {
    pub predictive_fail: bool,
    pub power_factor_correction: bool,
    pub autoswitch: bool,
    pub hot_swap: bool,
    /// Predictive fail output is a tachometer pulse rather than a pass/fail pin.
    pub tachometer_pulses: bool,
    #[bits(3)]
    __: u8,
}

#[bitfield(u16)]
#[derive(PartialEq, Eq)]
pub struct PeakWattage {
    /// Watts the supply can produce for `holdup_seconds`.
    #[bits(12)]
    pub peak_capacity: u16,
    #[bits(4)]
    pub holdup_seconds: u8,
}

#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct CombinedWattageVoltages {
    #[bits(4)]
    pub voltage2: u8,
    #[bits(4)]
    pub voltage1: u8,
}

/// Output rail named by a combined wattage voltage code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinedVoltage(pub u8);

impl CombinedVoltage {
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            0 => "12V",
            1 => "-12V",
            2 => "5V",
            3 => "3.3V",
            _ => "",
        }
    }
}

impl fmt::Display for CombinedVoltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Power Supply Information (record type 0x00).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerSupply {
    /// Watts, 0 to 4095.
    pub overall_capacity: u16,
    /// 0xFFFF if not specified.
    pub peak_va: u16,
    /// Amps, 0xFF if not specified.
    pub inrush_current: u8,
    pub inrush_interval_ms: u8,
    pub low_input_voltage_range1: u16,
    pub high_input_voltage_range1: u16,
    pub low_input_voltage_range2: u16,
    pub high_input_voltage_range2: u16,
    /// Hz, 0 for DC input.
    pub low_input_frequency: u8,
    pub high_input_frequency: u8,
    pub input_dropout_tolerance_ms: u8,
    pub flags: PowerSupplyFlags,
    pub peak_wattage: PeakWattage,
    pub combined_voltages: CombinedWattageVoltages,
    pub total_combined_wattage: u16,
    /// Rotations per second. Zero means the predictive fail pin is pass/fail.
    pub tachometer_lower_threshold: u8,
}

impl PowerSupply {
    pub const SIZE: usize = 24;

    /// Decodes a full 24 byte payload. Shorter payloads are a `TruncatedBuffer` error; the
    /// multi-record decoder keeps those raw instead.
    pub fn decode(payload: &[u8]) -> Result<Self, FruError> {
        if payload.len() < Self::SIZE {
            return Err(FruError::TruncatedBuffer);
        }
        Ok(Self {
            overall_capacity: unpack_u16_le(payload, 0)? & 0x0FFF,
            peak_va: unpack_u16_le(payload, 2)?,
            inrush_current: unpack_u8(payload, 4)?,
            inrush_interval_ms: unpack_u8(payload, 5)?,
            low_input_voltage_range1: unpack_u16_le(payload, 6)?,
            high_input_voltage_range1: unpack_u16_le(payload, 8)?,
            low_input_voltage_range2: unpack_u16_le(payload, 10)?,
            high_input_voltage_range2: unpack_u16_le(payload, 12)?,
            low_input_frequency: unpack_u8(payload, 14)?,
            high_input_frequency: unpack_u8(payload, 15)?,
            input_dropout_tolerance_ms: unpack_u8(payload, 16)?,
            flags: PowerSupplyFlags::from_bits(unpack_u8(payload, 17)?),
            peak_wattage: PeakWattage::from_bits(unpack_u16_le(payload, 18)?),
            combined_voltages: CombinedWattageVoltages::from_bits(unpack_u8(payload, 20)?),
            total_combined_wattage: unpack_u16_le(payload, 21)?,
            tachometer_lower_threshold: unpack_u8(payload, 23)?,
        })
    }

    pub fn hot_swap(&self) -> bool {
        self.flags.hot_swap()
    }

    pub fn autoswitch(&self) -> bool {
        self.flags.autoswitch()
    }

    pub fn power_factor_correction(&self) -> bool {
        self.flags.power_factor_correction()
    }

    pub fn predictive_fail(&self) -> bool {
        self.flags.predictive_fail()
    }

    pub fn combined_voltage1(&self) -> CombinedVoltage {
        CombinedVoltage(self.combined_voltages.voltage1())
    }

    pub fn combined_voltage2(&self) -> CombinedVoltage {
        CombinedVoltage(self.combined_voltages.voltage2())
    }
}

/// First byte of the DC output records.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct DcOutputInfo {
    #[bits(4)]
    pub output_number: u8,
    /// Extended record only: currents are in 100 mA rather than 10 mA units.
    pub current_units_100ma: bool,
    #[bits(2)]
    __: u8,
    /// The output is provided even when the supply is switched off.
    pub standby: bool,
}

/// First byte of the DC load records.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct DcLoadInfo {
    #[bits(4)]
    pub output_number: u8,
    #[bits(3)]
    __: u8,
    /// Extended record only: currents are in 100 mA rather than 10 mA units.
    pub current_units_100ma: bool,
}

/// DC Output (record type 0x01).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DcOutput {
    pub info: DcOutputInfo,
    pub nominal_voltage: i16,
    pub max_negative_voltage: i16,
    pub max_positive_voltage: i16,
    /// Peak to peak, mV.
    pub ripple_noise: u16,
    pub min_current: u16,
    pub max_current: u16,
}

impl DcOutput {
    pub const MIN_SIZE: usize = 12;

    pub fn decode(payload: &[u8]) -> Result<Self, FruError> {
        if payload.len() < Self::MIN_SIZE {
            return Err(FruError::TruncatedBuffer);
        }
        Ok(Self {
            info: DcOutputInfo::from_bits(unpack_u8(payload, 0)?),
            nominal_voltage: unpack_i16_le(payload, 1)?,
            max_negative_voltage: unpack_i16_le(payload, 3)?,
            max_positive_voltage: unpack_i16_le(payload, 5)?,
            ripple_noise: unpack_u16_le(payload, 7)?,
            min_current: unpack_u16_le(payload, 9)?,
            max_current: unpack_trailing_u16(payload, 11),
        })
    }

    pub fn output_number(&self) -> u8 {
        self.info.output_number()
    }

    pub fn output_when_off(&self) -> bool {
        self.info.standby()
    }
}

/// Extended DC Output (record type 0x09). Same layout as [`DcOutput`] with the current
/// units flag in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedDcOutput(pub DcOutput);

impl ExtendedDcOutput {
    pub fn decode(payload: &[u8]) -> Result<Self, FruError> {
        DcOutput::decode(payload).map(Self)
    }

    pub fn current_units_100ma(&self) -> bool {
        self.0.info.current_units_100ma()
    }
}

/// DC Load (record type 0x02).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DcLoad {
    pub info: DcLoadInfo,
    pub nominal_voltage: i16,
    pub min_tolerable_voltage: i16,
    pub max_tolerable_voltage: i16,
    pub ripple_noise: u16,
    pub min_current_load: u16,
    pub max_current_load: u16,
}

impl DcLoad {
    pub const MIN_SIZE: usize = 12;

    pub fn decode(payload: &[u8]) -> Result<Self, FruError> {
        if payload.len() < Self::MIN_SIZE {
            return Err(FruError::TruncatedBuffer);
        }
        Ok(Self {
            info: DcLoadInfo::from_bits(unpack_u8(payload, 0)?),
            nominal_voltage: unpack_i16_le(payload, 1)?,
            min_tolerable_voltage: unpack_i16_le(payload, 3)?,
            max_tolerable_voltage: unpack_i16_le(payload, 5)?,
            ripple_noise: unpack_u16_le(payload, 7)?,
            min_current_load: unpack_u16_le(payload, 9)?,
            max_current_load: unpack_trailing_u16(payload, 11),
        })
    }

    pub fn output_number(&self) -> u8 {
        self.info.output_number()
    }
}

/// The last current field of a DC record spans bytes 11..13, one past the 12 byte minimum.
/// It reads as 0 when the 13th byte is absent.
fn unpack_trailing_u16(payload: &[u8], offset: usize) -> u16 {
    unpack_u16_le(payload, offset).unwrap_or_default()
}

/// Extended DC Load (record type 0x0A).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedDcLoad {
    pub info: DcLoadInfo,
    pub nominal_voltage: i16,
    pub min_voltage: i16,
    pub max_voltage: i16,
    pub ripple_noise: i16,
    pub min_current_load: u16,
    pub max_current_load: u16,
}

impl ExtendedDcLoad {
    pub const MIN_SIZE: usize = 13;

    pub fn decode(payload: &[u8]) -> Result<Self, FruError> {
        if payload.len() < Self::MIN_SIZE {
            return Err(FruError::TruncatedBuffer);
        }
        Ok(Self {
            info: DcLoadInfo::from_bits(unpack_u8(payload, 0)?),
            nominal_voltage: unpack_i16_le(payload, 1)?,
            min_voltage: unpack_i16_le(payload, 3)?,
            max_voltage: unpack_i16_le(payload, 5)?,
            ripple_noise: unpack_i16_le(payload, 7)?,
            min_current_load: unpack_u16_le(payload, 9)?,
            max_current_load: unpack_u16_le(payload, 11)?,
        })
    }

    pub fn output_number(&self) -> u8 {
        self.info.output_number()
    }

    pub fn current_units_100ma(&self) -> bool {
        self.info.current_units_100ma()
    }
}
