//! Chassis Info Area.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::vec::Vec;

use super::{decode_area, AreaLayout};
use crate::{enums::ChassisType, error::FruArea, type_length::FruField, FruError};

const LAYOUT: AreaLayout =
    AreaLayout { area: FruArea::ChassisInfo, fields_offset: 3, field_names: &["part number", "serial number"] };

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChassisInfoArea {
    pub format_version: u8,
    /// Area length in 8 byte units.
    pub length: u8,
    pub chassis_type: ChassisType,
    pub part_number: FruField,
    pub serial_number: FruField,
    pub custom: Vec<FruField>,
    pub unused: Vec<u8>,
    pub checksum: u8,
}

impl ChassisInfoArea {
    /// Decodes a chassis info area from `buf`, which starts at the area's first byte.
    pub fn decode(buf: &[u8]) -> Result<Self, FruError> {
        let mut raw = decode_area(buf, &LAYOUT)?;
        let [part_number, serial_number] = raw.take_fields();
        Ok(Self {
            format_version: raw.format_version,
            length: raw.length,
            chassis_type: ChassisType(raw.bytes[2]),
            part_number,
            serial_number,
            custom: raw.trailer.custom,
            unused: raw.trailer.unused,
            checksum: raw.trailer.checksum,
        })
    }
}
