//! Internal Use Area.
//!
//! A format version byte followed by opaque data. The area has no length byte, so the
//! caller bounds the slice (by the next area's offset, or the end of the image).
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::vec::Vec;

use crate::{codec::unpack_u8, error::FruArea, FruError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InternalUseArea {
    pub format_version: u8,
    pub data: Vec<u8>,
}

impl InternalUseArea {
    pub fn decode(buf: &[u8]) -> Result<Self, FruError> {
        let format_version = unpack_u8(buf, 0).map_err(|e| e.in_area(FruArea::InternalUse, None))?;
        Ok(Self { format_version, data: buf[1..].to_vec() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_decode_internal_use() {
        let area = InternalUseArea::decode(&[0x01, 0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
        assert_eq!(area.format_version, 0x01);
        assert_eq!(area.data, [0xDE, 0xAD, 0xBE, 0xEF]);

        let area = InternalUseArea::decode(&[0x01]).unwrap();
        assert!(area.data.is_empty());
    }

    #[test]
    fn test_decode_empty() {
        let err = InternalUseArea::decode(&[]).unwrap_err();
        assert_eq!(err, FruError::Area { area: FruArea::InternalUse, field: None, cause: ErrorKind::TruncatedBuffer });
    }
}
