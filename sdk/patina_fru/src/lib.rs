//! Decoding support for IPMI Field Replaceable Unit (FRU) inventory data.
//!
//! A FRU image is read from a platform management controller as one opaque byte buffer.
//! This crate turns that buffer into a [`Fru`]: the common header, the internal use,
//! chassis, board and product info areas, and the chain of typed multi-records (power
//! supply and DC ratings, management access strings, compatibility tags and OEM data).
//!
//! Decoding never reads past the end of the buffer. Malformed input produces a
//! [`FruError`] naming the area, field or record that failed; nothing is partially
//! accepted.
//!
//! ## Example
//!
//! ```rust
//! use patina_fru::{CommonHeader, Fru};
//!
//! let mut image = CommonHeader::new(0, 1, 0, 0, 0).to_bytes().to_vec();
//! // Chassis info area: version, length, rack mount chassis, no fields.
//! image.extend_from_slice(&[0x01, 0x01, 0x17, 0xC1, 0x00, 0x00, 0x00, 0x26]);
//!
//! let fru = Fru::decode(&image, 0, "Builtin FRU").unwrap();
//! assert_eq!(fru.chassis_info_area().unwrap().chassis_type.as_str(), "Rack Mount Chassis");
//! ```
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod area;
pub mod codec;
pub mod config;
pub mod enums;
pub mod error;
pub mod fru;
pub mod header;
pub mod multi_record;
pub mod timestamp;
pub mod type_length;

pub use error::FruError;
pub use fru::{Fru, FruDevice};
pub use header::CommonHeader;
