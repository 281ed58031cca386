//! Board Info Area.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::vec::Vec;

use super::{decode_area, AreaLayout};
use crate::{
    codec::unpack_u24_le, error::FruArea, timestamp::ManufactureTimestamp, type_length::FruField, FruError,
};

const LAYOUT: AreaLayout = AreaLayout {
    area: FruArea::BoardInfo,
    fields_offset: 6,
    field_names: &["manufacturer", "product name", "serial number", "part number", "FRU file ID"],
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardInfoArea {
    pub format_version: u8,
    /// Area length in 8 byte units.
    pub length: u8,
    pub language_code: u8,
    pub manufactured: ManufactureTimestamp,
    pub manufacturer: FruField,
    pub product_name: FruField,
    pub serial_number: FruField,
    pub part_number: FruField,
    pub fru_file_id: FruField,
    pub custom: Vec<FruField>,
    pub unused: Vec<u8>,
    pub checksum: u8,
}

impl BoardInfoArea {
    pub fn decode(buf: &[u8]) -> Result<Self, FruError> {
        let mut raw = decode_area(buf, &LAYOUT)?;
        let minutes = unpack_u24_le(raw.bytes, 3).map_err(|e| e.in_area(FruArea::BoardInfo, Some("manufacture date")))?;
        let [manufacturer, product_name, serial_number, part_number, fru_file_id] = raw.take_fields();
        Ok(Self {
            format_version: raw.format_version,
            length: raw.length,
            language_code: raw.bytes[2],
            manufactured: ManufactureTimestamp::from_minutes(minutes),
            manufacturer,
            product_name,
            serial_number,
            part_number,
            fru_file_id,
            custom: raw.trailer.custom,
            unused: raw.trailer.unused,
            checksum: raw.trailer.checksum,
        })
    }
}
