//! Error types produced while decoding FRU inventory data.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::fmt;

/// The region of the FRU image an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruArea {
    CommonHeader,
    InternalUse,
    ChassisInfo,
    BoardInfo,
    ProductInfo,
    MultiRecord,
}

impl FruArea {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FruArea::CommonHeader => "common header",
            FruArea::InternalUse => "internal use area",
            FruArea::ChassisInfo => "chassis info area",
            FruArea::BoardInfo => "board info area",
            FruArea::ProductInfo => "product info area",
            FruArea::MultiRecord => "multi-record area",
        }
    }
}

impl fmt::Display for FruArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The underlying failure, independent of where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fewer bytes were available than a field declares.
    TruncatedBuffer,
    /// An area's self-declared length does not fit in the buffer.
    DeclaredLengthExceedsBuffer,
    /// The common header checksum did not verify.
    ChecksumMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TruncatedBuffer => f.write_str("buffer too short"),
            ErrorKind::DeclaredLengthExceedsBuffer => f.write_str("declared length exceeds buffer"),
            ErrorKind::ChecksumMismatch => f.write_str("checksum mismatch"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruError {
    TruncatedBuffer,
    DeclaredLengthExceedsBuffer,
    ChecksumMismatch { stored: u8, computed: u8 },
    /// A failure inside one of the areas, optionally naming the field being decoded.
    Area { area: FruArea, field: Option<&'static str>, cause: ErrorKind },
    /// A failure in the multi-record chain. `record_type` is absent when not even the
    /// type byte could be read.
    MultiRecord { index: usize, record_type: Option<u8>, cause: ErrorKind },
}

impl FruError {
    /// The underlying failure, looking through any area or record context.
    pub const fn cause(&self) -> ErrorKind {
        match self {
            FruError::TruncatedBuffer => ErrorKind::TruncatedBuffer,
            FruError::DeclaredLengthExceedsBuffer => ErrorKind::DeclaredLengthExceedsBuffer,
            FruError::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            FruError::Area { cause, .. } | FruError::MultiRecord { cause, .. } => *cause,
        }
    }

    /// Attaches area context. The innermost context is kept if one is already present.
    pub fn in_area(self, area: FruArea, field: Option<&'static str>) -> Self {
        match self {
            FruError::Area { .. } | FruError::MultiRecord { .. } => self,
            _ => FruError::Area { area, field, cause: self.cause() },
        }
    }

    /// Attaches multi-record chain context.
    pub fn in_record(self, index: usize, record_type: Option<u8>) -> Self {
        match self {
            FruError::Area { .. } | FruError::MultiRecord { .. } => self,
            _ => FruError::MultiRecord { index, record_type, cause: self.cause() },
        }
    }
}

impl fmt::Display for FruError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FruError::TruncatedBuffer | FruError::DeclaredLengthExceedsBuffer => write!(f, "{}", self.cause()),
            FruError::ChecksumMismatch { stored, computed } => {
                write!(f, "checksum mismatch (stored {stored:#04x}, computed {computed:#04x})")
            }
            FruError::Area { area, field: Some(field), cause } => write!(f, "{area}: {field} field: {cause}"),
            FruError::Area { area, field: None, cause } => write!(f, "{area}: {cause}"),
            FruError::MultiRecord { index, record_type: Some(record_type), cause } => {
                write!(f, "multi-record {index} (type {record_type:#04x}): {cause}")
            }
            FruError::MultiRecord { index, record_type: None, cause } => write!(f, "multi-record {index}: {cause}"),
        }
    }
}

// Every scroll failure we can hit is a read or write past the end of a slice.
impl From<scroll::Error> for FruError {
    fn from(_: scroll::Error) -> Self {
        FruError::TruncatedBuffer
    }
}
