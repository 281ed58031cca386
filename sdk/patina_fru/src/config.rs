//! FRU Decode Configuration
//!
//! ## Example
//!
//! ```rust
//! use patina_fru::{config::FruDecodeConfig, Fru};
//!
//! let config = FruDecodeConfig { strict_header_checksum: true, ..Default::default() };
//! // Header checksum is 0x00, should be 0xFE.
//! let image = [0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00];
//! assert!(Fru::decode_with_config(&image, 0, "bad header", &config).is_err());
//! ```
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!

/// Default: a header checksum mismatch is recorded and decoding continues.
pub const DEFAULT_STRICT_HEADER_CHECKSUM: bool = false;
/// Default: multi-records are decoded.
pub const DEFAULT_DECODE_MULTI_RECORDS: bool = true;
/// Default: known multi-record payloads are decoded into their typed form.
pub const DEFAULT_DECODE_MULTI_RECORD_PAYLOADS: bool = true;

/// Options for [`Fru::decode_with_config`](crate::Fru::decode_with_config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FruDecodeConfig {
    /// Fail the decode with `ChecksumMismatch` when the common header checksum is wrong.
    pub strict_header_checksum: bool,
    /// Skip the multi-record area entirely when false.
    pub decode_multi_records: bool,
    /// Keep every multi-record payload raw when false.
    pub decode_multi_record_payloads: bool,
}

impl Default for FruDecodeConfig {
    fn default() -> Self {
        Self {
            strict_header_checksum: DEFAULT_STRICT_HEADER_CHECKSUM,
            decode_multi_records: DEFAULT_DECODE_MULTI_RECORDS,
            decode_multi_record_payloads: DEFAULT_DECODE_MULTI_RECORD_PAYLOADS,
        }
    }
}
