//! OEM records (record types 0xC0 to 0xFF).
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::vec::Vec;

use crate::{codec::unpack_u24_le, FruError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oem {
    pub manufacturer_id: u32,
    pub data: Vec<u8>,
}

impl Oem {
    pub fn decode(payload: &[u8]) -> Result<Self, FruError> {
        let manufacturer_id = unpack_u24_le(payload, 0)?;
        Ok(Self { manufacturer_id, data: payload[3..].to_vec() })
    }
}
