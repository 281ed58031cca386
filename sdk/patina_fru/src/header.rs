//! The FRU common header.
//!
//! Eight bytes at the start of every FRU image: a format version, five area offsets in
//! 8 byte units (zero when the area is absent), a pad byte and a checksum over the first
//! six bytes.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::fmt;

use crate::{
    area::AREA_UNIT,
    codec::{checksum, pack_u8, unpack_u8},
    FruError,
};

/// Format version written by current producers.
pub const FRU_FORMAT_VERSION: u8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommonHeader {
    pub format_version: u8,
    pub internal_use_offset: u8,
    pub chassis_offset: u8,
    pub board_offset: u8,
    pub product_offset: u8,
    pub multi_record_offset: u8,
    pub checksum: u8,
}

impl CommonHeader {
    pub const SIZE: usize = 8;

    /// Builds a header with a matching checksum. Offsets are in 8 byte units.
    pub fn new(internal_use: u8, chassis: u8, board: u8, product: u8, multi_record: u8) -> Self {
        let mut header = Self {
            format_version: FRU_FORMAT_VERSION,
            internal_use_offset: internal_use,
            chassis_offset: chassis,
            board_offset: board,
            product_offset: product,
            multi_record_offset: multi_record,
            checksum: 0,
        };
        header.checksum = header.computed_checksum();
        header
    }

    /// Reads the header from the first eight bytes of `buf`. The checksum is not checked.
    pub fn decode(buf: &[u8]) -> Result<Self, FruError> {
        if buf.len() < Self::SIZE {
            return Err(FruError::TruncatedBuffer);
        }
        Ok(Self {
            format_version: unpack_u8(buf, 0)?,
            internal_use_offset: unpack_u8(buf, 1)?,
            chassis_offset: unpack_u8(buf, 2)?,
            board_offset: unpack_u8(buf, 3)?,
            product_offset: unpack_u8(buf, 4)?,
            multi_record_offset: unpack_u8(buf, 5)?,
            checksum: unpack_u8(buf, 7)?,
        })
    }

    /// Writes the header into the first eight bytes of `dest`. The pad byte is zeroed.
    pub fn write_to(&self, dest: &mut [u8]) -> Result<(), FruError> {
        if dest.len() < Self::SIZE {
            return Err(FruError::TruncatedBuffer);
        }
        pack_u8(self.format_version, dest, 0)?;
        pack_u8(self.internal_use_offset, dest, 1)?;
        pack_u8(self.chassis_offset, dest, 2)?;
        pack_u8(self.board_offset, dest, 3)?;
        pack_u8(self.product_offset, dest, 4)?;
        pack_u8(self.multi_record_offset, dest, 5)?;
        pack_u8(0, dest, 6)?;
        pack_u8(self.checksum, dest, 7)
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        [
            self.format_version,
            self.internal_use_offset,
            self.chassis_offset,
            self.board_offset,
            self.product_offset,
            self.multi_record_offset,
            0,
            self.checksum,
        ]
    }

    /// Checksum the header should carry given its other fields.
    pub fn computed_checksum(&self) -> u8 {
        // Bytes 0..6 of an 8 byte array are always in range.
        checksum(&self.to_bytes(), 0, 6).unwrap_or_default()
    }

    pub fn verify(&self) -> Result<(), FruError> {
        let computed = self.computed_checksum();
        if computed != self.checksum {
            return Err(FruError::ChecksumMismatch { stored: self.checksum, computed });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    /// Area offsets in bytes, in image order: internal use, chassis, board, product, multi-record.
    pub fn byte_offsets(&self) -> [usize; 5] {
        [
            self.internal_use_offset,
            self.chassis_offset,
            self.board_offset,
            self.product_offset,
            self.multi_record_offset,
        ]
        .map(|units| units as usize * AREA_UNIT)
    }
}

impl fmt::Display for CommonHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [internal_use, chassis, board, product, multi_record] = self.byte_offsets();
        writeln!(f, "Version            : {:#04x}", self.format_version)?;
        writeln!(f, "Offset Internal    : {internal_use:#x}")?;
        writeln!(f, "Offset Chassis     : {chassis:#x}")?;
        writeln!(f, "Offset Board       : {board:#x}")?;
        writeln!(f, "Offset Product     : {product:#x}")?;
        write!(f, "Offset MultiRecord : {multi_record:#x}")
    }
}
