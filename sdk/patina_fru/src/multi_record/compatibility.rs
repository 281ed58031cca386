//! Base and Extended Compatibility records (record types 0x04 and 0x05).
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use crate::{
    codec::{unpack_u24_le, unpack_u8},
    FruError,
};

/// Both compatibility records share this layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compatibility {
    /// IANA private enterprise number.
    pub manufacturer_id: u32,
    pub entity_id: u8,
    pub compatibility_base: u8,
    pub code_start: u8,
    pub code_range_mask: u8,
}

impl Compatibility {
    pub const MIN_SIZE: usize = 7;

    pub fn decode(payload: &[u8]) -> Result<Self, FruError> {
        if payload.len() < Self::MIN_SIZE {
            return Err(FruError::TruncatedBuffer);
        }
        Ok(Self {
            manufacturer_id: unpack_u24_le(payload, 0)?,
            entity_id: unpack_u8(payload, 3)?,
            compatibility_base: unpack_u8(payload, 4)?,
            code_start: unpack_u8(payload, 5)?,
            code_range_mask: unpack_u8(payload, 6)?,
        })
    }
}
