//! Product Info Area.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::vec::Vec;

use super::{decode_area, AreaLayout};
use crate::{error::FruArea, type_length::FruField, FruError};

const LAYOUT: AreaLayout = AreaLayout {
    area: FruArea::ProductInfo,
    fields_offset: 3,
    field_names: &[
        "manufacturer",
        "product name",
        "part/model number",
        "version",
        "serial number",
        "asset tag",
        "FRU file ID",
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductInfoArea {
    pub format_version: u8,
    /// Area length in 8 byte units.
    pub length: u8,
    pub language_code: u8,
    pub manufacturer: FruField,
    pub name: FruField,
    pub part_model: FruField,
    pub version: FruField,
    pub serial_number: FruField,
    pub asset_tag: FruField,
    pub fru_file_id: FruField,
    pub custom: Vec<FruField>,
    pub unused: Vec<u8>,
    pub checksum: u8,
}

impl ProductInfoArea {
    pub fn decode(buf: &[u8]) -> Result<Self, FruError> {
        let mut raw = decode_area(buf, &LAYOUT)?;
        let [manufacturer, name, part_model, version, serial_number, asset_tag, fru_file_id] = raw.take_fields();
        Ok(Self {
            format_version: raw.format_version,
            length: raw.length,
            language_code: raw.bytes[2],
            manufacturer,
            name,
            part_model,
            version,
            serial_number,
            asset_tag,
            fru_file_id,
            custom: raw.trailer.custom,
            unused: raw.trailer.unused,
            checksum: raw.trailer.checksum,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_product_area() {
        let mut buffer = alloc::vec![0x01, 0x06, 0x00];
        let fields: [&[u8]; 6] = [b"Contoso", b"Widget", b"W-100", b"2.1", b"0042", b"TAG7"];
        for field in fields {
            buffer.push(0xC0 | field.len() as u8);
            buffer.extend_from_slice(field);
        }
        // FRU file ID left empty, no custom fields.
        buffer.extend_from_slice(&[0xC0, 0xC1]);
        buffer.resize(47, 0x00);
        buffer.push(0x7F);

        let area = ProductInfoArea::decode(&buffer).unwrap();
        assert_eq!(area.language_code, 0x00);
        assert_eq!(area.manufacturer.to_string(), "Contoso");
        assert_eq!(area.name.to_string(), "Widget");
        assert_eq!(area.part_model.to_string(), "W-100");
        assert_eq!(area.version.to_string(), "2.1");
        assert_eq!(area.serial_number.to_string(), "0042");
        assert_eq!(area.asset_tag.to_string(), "TAG7");
        assert!(area.fru_file_id.is_empty());
        assert!(area.custom.is_empty());
        assert_eq!(area.unused.len(), 7);
        assert_eq!(area.checksum, 0x7F);
    }

    #[test]
    fn test_custom_fields_follow_file_id() {
        let mut buffer = alloc::vec![0x01, 0x03, 0x19];
        buffer.extend_from_slice(&[0xC0; 6]);
        buffer.extend_from_slice(&[0x01, 0x99]);
        buffer.extend_from_slice(&[0xC2, b'c', b'1', 0xC2, b'c', b'2', 0xC1]);
        buffer.resize(23, 0x00);
        buffer.push(0x01);

        let area = ProductInfoArea::decode(&buffer).unwrap();
        assert_eq!(area.fru_file_id.data(), [0x99]);
        assert_eq!(area.custom.len(), 2);
        assert_eq!(area.custom[1].to_string(), "c2");
        // 17 is the end marker, 23 the checksum.
        assert_eq!(area.unused.len(), 5);
    }

    #[test]
    fn test_decode_truncated_asset_tag() {
        let mut buffer = alloc::vec![0x01, 0x00, 0x19];
        buffer.extend_from_slice(&[0xC0; 5]);
        buffer.extend_from_slice(&[0xC8, b'x']);
        let err = ProductInfoArea::decode(&buffer).unwrap_err();
        assert_eq!(err.to_string(), "product info area: asset tag field: buffer too short");
    }
}
