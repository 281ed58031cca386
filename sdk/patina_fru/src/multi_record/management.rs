//! Management Access records (record type 0x03).
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::{string::String, vec::Vec};

use uuid::Uuid;

use crate::{codec::unpack_u8, enums::ManagementAccessSubRecordType, FruError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementAccess {
    pub sub_record_type: ManagementAccessSubRecordType,
    pub data: Vec<u8>,
}

impl ManagementAccess {
    pub fn decode(payload: &[u8]) -> Result<Self, FruError> {
        let sub_record_type = ManagementAccessSubRecordType(unpack_u8(payload, 0)?);
        Ok(Self { sub_record_type, data: payload[1..].to_vec() })
    }

    /// The SMBIOS system GUID carried by a System Unique ID sub-record.
    ///
    /// Returns `None` for other sub-record types or when fewer than 16 bytes are present.
    pub fn system_unique_id(&self) -> Option<Uuid> {
        if self.sub_record_type != ManagementAccessSubRecordType::SYSTEM_UNIQUE_ID {
            return None;
        }
        let bytes: [u8; 16] = self.data.get(..16)?.try_into().ok()?;
        Some(Uuid::from_bytes_le(bytes))
    }

    /// URL, name and ping address sub-records are plain text.
    pub fn text(&self) -> Option<String> {
        match self.sub_record_type.0 {
            0x01..=0x06 => Some(String::from_utf8_lossy(&self.data).into_owned()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_sub_record() {
        let mut payload = alloc::vec![0x01];
        payload.extend_from_slice(b"https://bmc.example/");
        let record = ManagementAccess::decode(&payload).unwrap();
        assert_eq!(record.sub_record_type, ManagementAccessSubRecordType::SYSTEM_MANAGEMENT_URL);
        assert_eq!(record.sub_record_type.to_string(), "System Management URL");
        assert_eq!(record.text().as_deref(), Some("https://bmc.example/"));
        assert_eq!(record.system_unique_id(), None);
    }

    #[test]
    fn test_decode_system_unique_id() {
        let payload = [
            0x07, 0x33, 0x22, 0x11, 0x00, 0x55, 0x44, 0x77, 0x66, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF,
        ];
        let record = ManagementAccess::decode(&payload).unwrap();
        let guid = record.system_unique_id().unwrap();
        assert_eq!(guid.to_string(), "00112233-4455-6677-8899-aabbccddeeff");
        assert_eq!(record.text(), None);

        let short = ManagementAccess::decode(&payload[..16]).unwrap();
        assert_eq!(short.system_unique_id(), None);
    }

    #[test]
    fn test_decode_needs_sub_record_type() {
        assert_eq!(ManagementAccess::decode(&[]), Err(FruError::TruncatedBuffer));
        let record = ManagementAccess::decode(&[0x42]).unwrap();
        assert!(record.data.is_empty());
        assert_eq!(record.sub_record_type.as_str(), "");
    }
}
