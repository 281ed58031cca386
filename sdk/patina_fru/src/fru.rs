//! Decoded FRU inventory for one device.
//!
//! [`Fru`] ties the pieces together: it reads the common header, slices each present area
//! out of the image by its offset and hands it to the matching area decoder, then walks
//! the multi-record chain.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

#[cfg(test)]
use mockall::automock;

use crate::{
    area::{
        board::BoardInfoArea, chassis::ChassisInfoArea, internal_use::InternalUseArea, product::ProductInfoArea,
        AREA_UNIT,
    },
    config::FruDecodeConfig,
    error::FruArea,
    header::CommonHeader,
    multi_record::{self, MultiRecord},
    FruError,
};

/// A FRU device as seen through the management controller transport.
///
/// Fetching the bytes is the implementor's business; decoding never performs I/O.
#[cfg_attr(test, automock)]
pub trait FruDevice {
    fn device_id(&self) -> u8;
    fn device_name(&self) -> String;
    /// Whether the controller reports the device as present.
    fn present(&self) -> bool;
    /// The raw FRU image, starting at the common header.
    fn fru_data(&self) -> Vec<u8>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fru {
    device_id: u8,
    device_name: String,
    present: bool,
    header: Option<CommonHeader>,
    header_checksum_error: Option<FruError>,
    internal_use: Option<InternalUseArea>,
    chassis: Option<ChassisInfoArea>,
    board: Option<BoardInfoArea>,
    product: Option<ProductInfoArea>,
    multi_records: Vec<MultiRecord>,
}

impl Fru {
    /// An entity for a device that is not present. Only the identity is populated.
    pub fn not_present(device_id: u8, device_name: &str) -> Self {
        Self {
            device_id,
            device_name: device_name.to_string(),
            present: false,
            header: None,
            header_checksum_error: None,
            internal_use: None,
            chassis: None,
            board: None,
            product: None,
            multi_records: Vec::new(),
        }
    }

    /// Decodes a FRU image with the default configuration.
    pub fn decode(buf: &[u8], device_id: u8, device_name: &str) -> Result<Self, FruError> {
        Self::decode_with_config(buf, device_id, device_name, &FruDecodeConfig::default())
    }

    /// Decodes a FRU image.
    ///
    /// A truncated common header aborts the decode. A header checksum mismatch is logged
    /// and kept in [`Fru::header_checksum_error`] unless the configuration makes it fatal.
    /// Any area or multi-record failure aborts the decode with an error naming the area.
    pub fn decode_with_config(
        buf: &[u8],
        device_id: u8,
        device_name: &str,
        config: &FruDecodeConfig,
    ) -> Result<Self, FruError> {
        let header = CommonHeader::decode(buf).map_err(|e| e.in_area(FruArea::CommonHeader, None))?;

        let header_checksum_error = match header.verify() {
            Ok(()) => None,
            Err(err) if config.strict_header_checksum => {
                log::error!("FRU device {device_id} ({device_name}): common header {err}");
                return Err(err);
            }
            Err(err) => {
                log::warn!("FRU device {device_id} ({device_name}): common header {err}, continuing");
                Some(err)
            }
        };

        let [internal_use_start, ..] = header.byte_offsets();
        let internal_use = decode_present_area(buf, header.internal_use_offset, FruArea::InternalUse, |area| {
            InternalUseArea::decode(&area[..internal_use_len(&header, internal_use_start, buf.len())])
        })?;
        let chassis = decode_present_area(buf, header.chassis_offset, FruArea::ChassisInfo, ChassisInfoArea::decode)?;
        let board = decode_present_area(buf, header.board_offset, FruArea::BoardInfo, BoardInfoArea::decode)?;
        let product = decode_present_area(buf, header.product_offset, FruArea::ProductInfo, ProductInfoArea::decode)?;

        let multi_records = if config.decode_multi_records {
            decode_present_area(buf, header.multi_record_offset, FruArea::MultiRecord, |area| {
                multi_record::decode_area(area, config.decode_multi_record_payloads)
            })?
            .unwrap_or_default()
        } else {
            Vec::new()
        };
        log::debug!("FRU device {device_id} ({device_name}): {} multi-record(s)", multi_records.len());

        Ok(Self {
            device_id,
            device_name: device_name.to_string(),
            present: true,
            header: Some(header),
            header_checksum_error,
            internal_use,
            chassis,
            board,
            product,
            multi_records,
        })
    }

    /// Decodes whatever `device` reports. Absent devices are not read.
    pub fn from_device(device: &dyn FruDevice, config: &FruDecodeConfig) -> Result<Self, FruError> {
        let device_id = device.device_id();
        let device_name = device.device_name();
        if !device.present() {
            log::debug!("FRU device {device_id} ({device_name}) not present");
            return Ok(Self::not_present(device_id, &device_name));
        }
        Self::decode_with_config(&device.fru_data(), device_id, &device_name, config)
    }

    pub fn device_id(&self) -> u8 {
        self.device_id
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn present(&self) -> bool {
        self.present
    }

    pub fn common_header(&self) -> Option<&CommonHeader> {
        self.header.as_ref()
    }

    /// The `ChecksumMismatch` seen while reading the common header, if any.
    pub fn header_checksum_error(&self) -> Option<FruError> {
        self.header_checksum_error
    }

    pub fn internal_use_area(&self) -> Option<&InternalUseArea> {
        self.internal_use.as_ref()
    }

    pub fn chassis_info_area(&self) -> Option<&ChassisInfoArea> {
        self.chassis.as_ref()
    }

    pub fn board_info_area(&self) -> Option<&BoardInfoArea> {
        self.board.as_ref()
    }

    pub fn product_info_area(&self) -> Option<&ProductInfoArea> {
        self.product.as_ref()
    }

    /// Multi-records in chain order.
    pub fn multi_records(&self) -> &[MultiRecord] {
        &self.multi_records
    }
}

// The internal use area has no length byte. It runs to the next area that starts after
// it, or the end of the image.
fn internal_use_len(header: &CommonHeader, start: usize, image_len: usize) -> usize {
    let [_, rest @ ..] = header.byte_offsets();
    let end = rest.into_iter().filter(|&offset| offset > start).min().unwrap_or(image_len).min(image_len);
    end.saturating_sub(start)
}

fn decode_present_area<T>(
    buf: &[u8],
    offset: u8,
    area: FruArea,
    decode: impl FnOnce(&[u8]) -> Result<T, FruError>,
) -> Result<Option<T>, FruError> {
    if offset == 0 {
        return Ok(None);
    }
    let start = offset as usize * AREA_UNIT;
    log::debug!("decoding {area} at byte offset {start:#x}");
    buf.get(start..)
        .ok_or(FruError::TruncatedBuffer)
        .and_then(decode)
        .map(Some)
        .map_err(|err| {
            let err = err.in_area(area, None);
            log::error!("{err}");
            err
        })
}

impl fmt::Display for Fru {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FRU Device Description : {} (ID {})", self.device_name, self.device_id)?;
        if !self.present {
            return writeln!(f, "  Device not present");
        }

        if let Some(chassis) = &self.chassis {
            writeln!(f, "  Chassis Type         : {}", chassis.chassis_type)?;
            writeln!(f, "  Chassis Part Number  : {}", chassis.part_number)?;
            writeln!(f, "  Chassis Serial Number: {}", chassis.serial_number)?;
            for extra in &chassis.custom {
                writeln!(f, "  Chassis Extra        : {extra}")?;
            }
        }

        if let Some(board) = &self.board {
            writeln!(f, "  Board Mfg Date       : {}", board.manufactured)?;
            writeln!(f, "  Board Mfg            : {}", board.manufacturer)?;
            writeln!(f, "  Board Product        : {}", board.product_name)?;
            writeln!(f, "  Board Serial         : {}", board.serial_number)?;
            writeln!(f, "  Board Part Number    : {}", board.part_number)?;
            for extra in &board.custom {
                writeln!(f, "  Board Extra          : {extra}")?;
            }
        }

        if let Some(product) = &self.product {
            writeln!(f, "  Product Mfg          : {}", product.manufacturer)?;
            writeln!(f, "  Product Name         : {}", product.name)?;
            writeln!(f, "  Product Part Number  : {}", product.part_model)?;
            writeln!(f, "  Product Serial       : {}", product.serial_number)?;
            for extra in &product.custom {
                writeln!(f, "  Product Extra        : {extra}")?;
            }
        }

        for record in &self.multi_records {
            writeln!(f, "  Multi Record         : {}", record.record_type)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{enums::ChassisType, error::ErrorKind, multi_record::MultiRecordPayload};

    // header + 8 byte chassis area with no fields
    fn minimal_chassis_image() -> Vec<u8> {
        let mut image = CommonHeader::new(0, 1, 0, 0, 0).to_bytes().to_vec();
        image.extend_from_slice(&[0x01, 0x01, 0x17, 0xC1, 0x00, 0x00, 0x00, 0x00]);
        let area_sum = image[8..15].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        image[15] = area_sum.wrapping_neg();
        image
    }

    fn full_image() -> Vec<u8> {
        let mut image = CommonHeader::new(1, 2, 3, 6, 11).to_bytes().to_vec();
        // internal use, offset 8
        image.extend_from_slice(&[0x01, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x00]);
        // chassis, offset 16
        image.extend_from_slice(&[0x01, 0x01, 0x11, 0xC2, b'C', b'P', 0xC1, 0x00]);
        // board, offset 24, 3 units
        let mut board = alloc::vec![0x01, 0x03, 0x19, 0x00, 0x00, 0x00];
        board.extend_from_slice(&[0xC2, b'M', b'F', 0xC2, b'B', b'D', 0xC2, b'S', b'N', 0xC2, b'P', b'N', 0xC0, 0xC1]);
        board.resize(24, 0x00);
        image.extend(board);
        // product, offset 48, 5 units
        let mut product = alloc::vec![0x01, 0x05, 0x19];
        let fields: [&[u8]; 7] = [b"ACME", b"Server", b"S-1", b"v1", b"123", b"", b""];
        for field in fields {
            product.push(0xC0 | field.len() as u8);
            product.extend_from_slice(field);
        }
        product.extend_from_slice(&[0xC3, b'E', b'X', b'1', 0xC1]);
        product.resize(40, 0x00);
        image.extend(product);
        // multi-records, offset 88
        image.extend_from_slice(&[0xC0, 0x02, 0x08, 0x00, 0x00, 0x57, 0x01, 0x00]);
        image.extend_from_slice(&[0x03, 0x82, 0x0A, 0x00, 0x00, 0x05, b'n', b'o', b'd', b'e']);
        image
    }

    #[test]
    fn test_decode_minimal_chassis() {
        let fru = Fru::decode(&minimal_chassis_image(), 0, "Builtin FRU").unwrap();
        assert!(fru.present());
        assert!(fru.header_checksum_error().is_none());
        let chassis = fru.chassis_info_area().unwrap();
        assert_eq!(chassis.chassis_type, ChassisType(0x17));
        assert_eq!(chassis.chassis_type.to_string(), "Rack Mount Chassis");
        assert!(chassis.part_number.is_empty());
        assert!(chassis.serial_number.is_empty());
        assert!(chassis.custom.is_empty());
        assert!(fru.board_info_area().is_none());
        assert!(fru.product_info_area().is_none());
        assert!(fru.internal_use_area().is_none());
        assert!(fru.multi_records().is_empty());
    }

    #[test]
    fn test_decode_full_image() {
        let fru = Fru::decode(&full_image(), 7, "Mainboard").unwrap();
        assert_eq!(fru.device_id(), 7);
        assert_eq!(fru.device_name(), "Mainboard");
        assert_eq!(fru.common_header().unwrap().board_offset, 3);

        let internal = fru.internal_use_area().unwrap();
        assert_eq!(internal.format_version, 0x01);
        assert_eq!(internal.data, [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x00]);

        assert_eq!(fru.chassis_info_area().unwrap().part_number.to_string(), "CP");

        let board = fru.board_info_area().unwrap();
        assert_eq!(board.manufacturer.to_string(), "MF");
        assert_eq!(board.part_number.to_string(), "PN");
        assert!(board.fru_file_id.is_empty());

        let product = fru.product_info_area().unwrap();
        assert_eq!(product.name.to_string(), "Server");
        assert_eq!(product.version.to_string(), "v1");
        assert_eq!(product.custom.len(), 1);

        let records = fru.multi_records();
        assert_eq!(records.len(), 2);
        assert!(matches!(records[0].payload, MultiRecordPayload::Oem(_)));
        match &records[1].payload {
            MultiRecordPayload::ManagementAccess(access) => assert_eq!(access.text().as_deref(), Some("node")),
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_summary() {
        let fru = Fru::decode(&full_image(), 7, "Mainboard").unwrap();
        let summary = fru.to_string();
        assert!(summary.starts_with("FRU Device Description : Mainboard (ID 7)\n"));
        assert!(summary.contains("  Chassis Type         : Main Server Chassis\n"));
        assert!(summary.contains("  Chassis Part Number  : CP\n"));
        assert!(summary.contains("  Board Mfg Date       : 1996-01-01T00:00:00Z\n"));
        assert!(summary.contains("  Product Mfg          : ACME\n"));
        assert!(summary.contains("  Product Extra        : EX1\n"));
        assert!(summary.contains("  Multi Record         : OEM\n"));
        assert!(summary.ends_with("  Multi Record         : Management Access\n"));

        let absent = Fru::not_present(4, "PSU 2");
        assert_eq!(absent.to_string(), "FRU Device Description : PSU 2 (ID 4)\n  Device not present\n");
    }

    #[test]
    fn test_header_checksum_mismatch_is_recorded() {
        let mut image = minimal_chassis_image();
        image[7] = image[7].wrapping_add(1);

        let fru = Fru::decode(&image, 0, "Builtin FRU").unwrap();
        assert_eq!(fru.header_checksum_error().map(|e| e.cause()), Some(ErrorKind::ChecksumMismatch));
        assert!(fru.chassis_info_area().is_some());

        let strict = FruDecodeConfig { strict_header_checksum: true, ..Default::default() };
        let err = Fru::decode_with_config(&image, 0, "Builtin FRU", &strict).unwrap_err();
        assert_eq!(err, FruError::ChecksumMismatch { stored: 0xFF, computed: 0xFE });
    }

    #[test]
    fn test_truncated_header_aborts() {
        let err = Fru::decode(&[0x01, 0x00, 0x01], 0, "short").unwrap_err();
        assert_eq!(err, FruError::Area { area: FruArea::CommonHeader, field: None, cause: ErrorKind::TruncatedBuffer });
    }

    #[test]
    fn test_area_offset_past_end() {
        let mut image = CommonHeader::new(0, 0, 4, 0, 0).to_bytes().to_vec();
        image.extend_from_slice(&[0x01, 0x01]);
        let err = Fru::decode(&image, 0, "broken").unwrap_err();
        assert_eq!(err, FruError::Area { area: FruArea::BoardInfo, field: None, cause: ErrorKind::TruncatedBuffer });
    }

    #[test]
    fn test_area_failure_is_not_partial() {
        let mut image = minimal_chassis_image();
        // chassis area claims two units
        image[9] = 0x02;
        let err = Fru::decode(&image, 0, "broken").unwrap_err();
        assert_eq!(err.to_string(), "chassis info area: declared length exceeds buffer");
    }

    #[test]
    fn test_multi_record_area_without_room_for_a_header() {
        let mut image = minimal_chassis_image();
        image[..CommonHeader::SIZE].copy_from_slice(&CommonHeader::new(0, 1, 0, 0, 2).to_bytes());
        image.extend_from_slice(&[0x00, 0x00]);

        let fru = Fru::decode(&image, 0, "Builtin FRU").unwrap();
        assert!(fru.header_checksum_error().is_none());
        assert!(fru.chassis_info_area().is_some());
        assert!(fru.multi_records().is_empty());
    }

    #[test]
    fn test_short_power_supply_record_is_kept_raw() {
        let mut image = CommonHeader::new(0, 0, 0, 0, 1).to_bytes().to_vec();
        image.extend_from_slice(&[0x00, 0x82, 25, 0x00, 0x00]);
        image.extend_from_slice(&[0x40; 20]);

        let fru = Fru::decode(&image, 2, "PSU 2").unwrap();
        let records = fru.multi_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].payload, MultiRecordPayload::Unknown);
        assert_eq!(records[0].data, [0x40; 20]);
        assert!(fru.to_string().contains("  Multi Record         : Power Supply\n"));
    }

    #[test]
    fn test_multi_record_options() {
        let image = full_image();

        let skip = FruDecodeConfig { decode_multi_records: false, ..Default::default() };
        assert!(Fru::decode_with_config(&image, 0, "x", &skip).unwrap().multi_records().is_empty());

        let raw = FruDecodeConfig { decode_multi_record_payloads: false, ..Default::default() };
        let fru = Fru::decode_with_config(&image, 0, "x", &raw).unwrap();
        assert_eq!(fru.multi_records().len(), 2);
        assert!(fru.multi_records().iter().all(|r| r.payload == MultiRecordPayload::Unknown));
    }

    #[test]
    fn test_from_device_not_present() {
        let mut device = MockFruDevice::new();
        device.expect_device_id().return_const(3u8);
        device.expect_device_name().returning(|| "PSU 1".to_string());
        device.expect_present().return_const(false);
        device.expect_fru_data().never();

        let fru = Fru::from_device(&device, &FruDecodeConfig::default()).unwrap();
        assert!(!fru.present());
        assert_eq!(fru, Fru::not_present(3, "PSU 1"));
        assert!(fru.common_header().is_none());
    }

    #[test]
    fn test_from_device_present() {
        let mut device = MockFruDevice::new();
        device.expect_device_id().return_const(0u8);
        device.expect_device_name().returning(|| "Builtin FRU".to_string());
        device.expect_present().return_const(true);
        device.expect_fru_data().once().returning(minimal_chassis_image);

        let fru = Fru::from_device(&device, &FruDecodeConfig::default()).unwrap();
        assert!(fru.present());
        assert_eq!(fru.chassis_info_area().unwrap().chassis_type, ChassisType::RACK_MOUNT_CHASSIS);
    }
}
