//! MultiRecord area decoding.
//!
//! The area is a chain of records. Each starts with a five byte header (type, format,
//! length, record checksum, header checksum) followed by a payload whose layout the type
//! selects. The chain ends at the first record with its end-of-list bit set.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
pub mod compatibility;
pub mod management;
pub mod oem;
pub mod power;

use alloc::vec::Vec;

use bitfield_struct::bitfield;

use crate::{
    codec::unpack_u8,
    enums::FruRecordType,
    error::FruArea,
    FruError,
};
use compatibility::Compatibility;
use management::ManagementAccess;
use oem::Oem;
use power::{DcLoad, DcOutput, ExtendedDcLoad, ExtendedDcOutput, PowerSupply};

pub const RECORD_HEADER_SIZE: usize = 5;

/// Second header byte of a record.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct RecordFormat {
    #[bits(4)]
    pub version: u8,
    #[bits(3)]
    __: u8,
    pub end_of_list: bool,
}

/// Decoded record payload, one variant per known record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiRecordPayload {
    PowerSupply(PowerSupply),
    DcOutput(DcOutput),
    DcLoad(DcLoad),
    ManagementAccess(ManagementAccess),
    BaseCompatibility(Compatibility),
    ExtendedCompatibility(Compatibility),
    ExtendedDcOutput(ExtendedDcOutput),
    ExtendedDcLoad(ExtendedDcLoad),
    Oem(Oem),
    /// A type with no decoder, or payload decoding was turned off. The raw bytes are in
    /// [`MultiRecord::data`].
    Unknown,
}

impl MultiRecordPayload {
    /// Selects the payload decoder for `record_type`.
    ///
    /// A power supply payload shorter than [`PowerSupply::SIZE`] stays raw.
    pub fn decode(record_type: FruRecordType, payload: &[u8]) -> Result<Self, FruError> {
        Ok(match record_type {
            FruRecordType::POWER_SUPPLY if payload.len() < PowerSupply::SIZE => {
                log::debug!("power supply record has {} of {} bytes, keeping it raw", payload.len(), PowerSupply::SIZE);
                Self::Unknown
            }
            FruRecordType::POWER_SUPPLY => Self::PowerSupply(PowerSupply::decode(payload)?),
            FruRecordType::DC_OUTPUT => Self::DcOutput(DcOutput::decode(payload)?),
            FruRecordType::DC_LOAD => Self::DcLoad(DcLoad::decode(payload)?),
            FruRecordType::MANAGEMENT_ACCESS => Self::ManagementAccess(ManagementAccess::decode(payload)?),
            FruRecordType::BASE_COMPATIBILITY => Self::BaseCompatibility(Compatibility::decode(payload)?),
            FruRecordType::EXTENDED_COMPATIBILITY => Self::ExtendedCompatibility(Compatibility::decode(payload)?),
            FruRecordType::EXTENDED_DC_OUTPUT => Self::ExtendedDcOutput(ExtendedDcOutput::decode(payload)?),
            FruRecordType::EXTENDED_DC_LOAD => Self::ExtendedDcLoad(ExtendedDcLoad::decode(payload)?),
            t if t.is_oem() => Self::Oem(Oem::decode(payload)?),
            _ => Self::Unknown,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiRecord {
    pub record_type: FruRecordType,
    pub format: RecordFormat,
    /// Declared record length, header included.
    pub length: u8,
    pub record_checksum: u8,
    pub header_checksum: u8,
    /// Raw payload bytes.
    pub data: Vec<u8>,
    pub payload: MultiRecordPayload,
}

impl MultiRecord {
    pub fn end_of_list(&self) -> bool {
        self.format.end_of_list()
    }

    pub fn format_version(&self) -> u8 {
        self.format.version()
    }

    /// Bytes this record occupies in the chain.
    pub fn consumed_len(&self) -> usize {
        (self.length as usize).max(RECORD_HEADER_SIZE)
    }
}

/// Decodes one record from the start of `buf`, payload included.
pub fn decode_record(buf: &[u8]) -> Result<MultiRecord, FruError> {
    decode_record_with(buf, true)
}

fn decode_record_with(buf: &[u8], decode_payload: bool) -> Result<MultiRecord, FruError> {
    if buf.len() < RECORD_HEADER_SIZE {
        return Err(FruError::TruncatedBuffer);
    }
    let record_type = FruRecordType(unpack_u8(buf, 0)?);
    let format = RecordFormat::from_bits(unpack_u8(buf, 1)?);
    let length = unpack_u8(buf, 2)?;
    if buf.len() < length as usize {
        return Err(FruError::TruncatedBuffer);
    }
    let record_checksum = unpack_u8(buf, 3)?;
    let header_checksum = unpack_u8(buf, 4)?;

    let data = buf.get(RECORD_HEADER_SIZE..length as usize).map(<[u8]>::to_vec).unwrap_or_default();
    let payload =
        if decode_payload { MultiRecordPayload::decode(record_type, &data)? } else { MultiRecordPayload::Unknown };

    Ok(MultiRecord { record_type, format, length, record_checksum, header_checksum, data, payload })
}

/// Iterates the records of a multi-record area.
///
/// Yields `Result` items. Iteration stops after the end-of-list record, after the first
/// error, or when fewer than [`RECORD_HEADER_SIZE`] bytes remain for another header.
pub struct MultiRecordIter<'a> {
    buf: &'a [u8],
    offset: usize,
    index: usize,
    decode_payloads: bool,
    done: bool,
}

impl<'a> MultiRecordIter<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0, index: 0, decode_payloads: true, done: false }
    }

    /// Keeps every record's payload raw.
    pub fn raw_payloads(mut self) -> Self {
        self.decode_payloads = false;
        self
    }
}

impl Iterator for MultiRecordIter<'_> {
    type Item = Result<MultiRecord, FruError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let remaining = self.buf.get(self.offset..).unwrap_or_default();
        if remaining.len() < RECORD_HEADER_SIZE {
            self.done = true;
            return None;
        }

        let index = self.index;
        self.index += 1;
        match decode_record_with(remaining, self.decode_payloads) {
            Ok(record) => {
                log::trace!("multi-record {index}: {} ({} bytes)", record.record_type, record.data.len());
                self.offset += record.consumed_len();
                self.done = record.end_of_list();
                Some(Ok(record))
            }
            Err(err) => {
                self.done = true;
                let record_type = remaining.first().copied();
                Some(Err(err.in_record(index, record_type)))
            }
        }
    }
}

/// Decodes the whole chain. Any record failure discards the records decoded so far.
pub fn decode_multi_records(buf: &[u8]) -> Result<Vec<MultiRecord>, FruError> {
    MultiRecordIter::new(buf).collect()
}

pub(crate) fn decode_area(buf: &[u8], decode_payloads: bool) -> Result<Vec<MultiRecord>, FruError> {
    let iter = MultiRecordIter::new(buf);
    let iter = if decode_payloads { iter } else { iter.raw_payloads() };
    iter.collect::<Result<Vec<_>, _>>().map_err(|e| e.in_area(FruArea::MultiRecord, None))
}
