//! Type/Length encoded fields.
//!
//! Every variable-length string in the chassis, board and product areas is stored as a
//! single descriptor byte followed by up to 63 data bytes. The top two bits of the
//! descriptor name the encoding, the low six bits give the data length.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::{string::String, vec::Vec};
use core::fmt;

use bitfield_struct::bitfield;

use crate::{
    codec::{unpack_bytes, unpack_u8},
    FruError,
};

/// Descriptor value that terminates the custom field list of an area.
pub const END_OF_FIELDS: u8 = 0xC1;

#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct TypeLength {
    /// Number of data bytes following the descriptor.
    #[bits(6)]
    pub length: u8,
    /// Raw encoding tag, see [`TypeLength::encoding`].
    #[bits(2)]
    pub type_code: u8,
}

impl TypeLength {
    pub fn encoding(&self) -> FieldEncoding {
        match self.type_code() {
            0b00 => FieldEncoding::Binary,
            0b01 => FieldEncoding::BcdPlus,
            0b10 => FieldEncoding::SixBitAscii,
            _ => FieldEncoding::Text,
        }
    }

    pub fn is_end_of_fields(&self) -> bool {
        self.into_bits() == END_OF_FIELDS
    }
}

/// Encoding named by the top two bits of a [`TypeLength`] descriptor.
///
/// The encodings are carried as metadata only; field data is never transcoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEncoding {
    /// Binary or unspecified.
    Binary,
    BcdPlus,
    /// 6-bit ASCII, packed.
    SixBitAscii,
    /// 8-bit text, interpreted according to the area language code.
    Text,
}

/// One decoded Type/Length field with its data copied out of the source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FruField {
    type_length: TypeLength,
    data: Vec<u8>,
}

impl FruField {
    pub fn new(type_length: TypeLength, data: Vec<u8>) -> Self {
        Self { type_length, data }
    }

    pub fn type_length(&self) -> TypeLength {
        self.type_length
    }

    pub fn encoding(&self) -> FieldEncoding {
        self.type_length.encoding()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Field data as text. Invalid UTF-8 is replaced rather than rejected.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

impl Default for FruField {
    fn default() -> Self {
        Self { type_length: TypeLength::new(), data: Vec::new() }
    }
}

impl fmt::Display for FruField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.encoding() {
            FieldEncoding::Binary => self.data.iter().try_for_each(|b| write!(f, "{b:02x}")),
            _ => f.write_str(&String::from_utf8_lossy(&self.data)),
        }
    }
}

/// Everything in an area after its last field: custom fields, padding and checksum.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trailer {
    pub custom: Vec<FruField>,
    pub unused: Vec<u8>,
    pub checksum: u8,
}

/// Decodes the field whose descriptor byte sits at `offset`.
///
/// Returns the offset just past the field data together with the field.
pub fn decode_field(buf: &[u8], offset: usize) -> Result<(usize, FruField), FruError> {
    let type_length = TypeLength::from_bits(unpack_u8(buf, offset)?);
    let length = type_length.length() as usize;
    let data = unpack_bytes(buf, offset + 1, length)?;
    Ok((offset + 1 + length, FruField::new(type_length, data)))
}

/// Decodes the custom field list starting at `offset`, then the unused padding and the
/// checksum that close the area.
///
/// The list ends at an [`END_OF_FIELDS`] descriptor, which is left unconsumed, or at a
/// field with no data, which is consumed but not recorded. The checksum is the final
/// byte of `buf`; the bytes between the terminator and the checksum are padding.
pub fn decode_trailer(buf: &[u8], offset: usize) -> Result<Trailer, FruError> {
    if buf.len() < offset + 1 {
        return Err(FruError::TruncatedBuffer);
    }

    let mut offset = offset;
    let mut custom = Vec::new();
    loop {
        if unpack_u8(buf, offset)? == END_OF_FIELDS {
            break;
        }
        let (next_offset, field) = decode_field(buf, offset)?;
        offset = next_offset;
        if field.is_empty() {
            break;
        }
        custom.push(field);
    }

    let checksum = unpack_u8(buf, buf.len() - 1)?;
    let unused = buf.get(offset + 1..buf.len() - 1).map(<[u8]>::to_vec).unwrap_or_default();

    Ok(Trailer { custom, unused, checksum })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_length_bits() {
        let tl = TypeLength::from_bits(0xC5);
        assert_eq!(tl.length(), 5);
        assert_eq!(tl.type_code(), 0b11);
        assert_eq!(tl.encoding(), FieldEncoding::Text);
        assert!(!tl.is_end_of_fields());

        assert_eq!(TypeLength::from_bits(0x3F).encoding(), FieldEncoding::Binary);
        assert_eq!(TypeLength::from_bits(0x42).encoding(), FieldEncoding::BcdPlus);
        assert_eq!(TypeLength::from_bits(0x81).encoding(), FieldEncoding::SixBitAscii);
        assert!(TypeLength::from_bits(END_OF_FIELDS).is_end_of_fields());
    }

    #[test]
    fn test_decode_field_returns_declared_length() {
        for length in [0usize, 1, 7, 63] {
            let mut buffer = alloc::vec![0xC0 | length as u8];
            buffer.extend((0..length).map(|i| i as u8));
            buffer.push(0xEE);

            let (next, field) = decode_field(&buffer, 0).unwrap();
            assert_eq!(next, length + 1);
            assert_eq!(field.data().len(), length);
            assert_eq!(field.type_length().length() as usize, length);
        }
    }

    #[test]
    fn test_decode_field_at_offset() {
        let buffer = [0x00, 0x00, 0xC3, b'A', b'B', b'C', 0xC1];
        let (next, field) = decode_field(&buffer, 2).unwrap();
        assert_eq!(next, 6);
        assert_eq!(field.data(), b"ABC");
        assert_eq!(field.to_string_lossy(), "ABC");
    }

    #[test]
    fn test_decode_field_truncated() {
        assert_eq!(decode_field(&[], 0), Err(FruError::TruncatedBuffer));
        assert_eq!(decode_field(&[0xC4, b'A', b'B'], 0), Err(FruError::TruncatedBuffer));
        assert_eq!(decode_field(&[0xC0], 1), Err(FruError::TruncatedBuffer));
    }

    #[test]
    fn test_trailer_stops_at_end_marker() {
        // custom "XY", end marker at 3, padding at 4..6, checksum at 7
        let buffer = [0xC2, b'X', b'Y', END_OF_FIELDS, 0x00, 0x00, 0x00, 0x5A];
        let trailer = decode_trailer(&buffer, 0).unwrap();
        assert_eq!(trailer.custom.len(), 1);
        assert_eq!(trailer.custom[0].data(), b"XY");
        assert_eq!(trailer.unused.len(), buffer.len() - 3 - 2);
        assert_eq!(trailer.checksum, 0x5A);
    }

    #[test]
    fn test_trailer_stops_at_empty_field() {
        // zero-length field at 3 is consumed, final offset 4
        let buffer = [0xC2, b'X', b'Y', 0xC0, 0x11, 0x22, 0x33, 0x5A];
        let trailer = decode_trailer(&buffer, 0).unwrap();
        assert_eq!(trailer.custom.len(), 1);
        assert_eq!(trailer.unused, [0x22, 0x33]);
        assert_eq!(trailer.unused.len(), buffer.len() - 4 - 2);
        assert_eq!(trailer.checksum, 0x5A);
    }

    #[test]
    fn test_trailer_end_marker_is_not_a_field() {
        // 0xC1 would otherwise describe a 1 byte text field.
        let buffer = [END_OF_FIELDS, b'Z', 0x00];
        let trailer = decode_trailer(&buffer, 0).unwrap();
        assert!(trailer.custom.is_empty());
        assert_eq!(trailer.unused, [b'Z']);
        assert_eq!(trailer.checksum, 0x00);
    }

    #[test]
    fn test_trailer_without_room_for_padding() {
        let buffer = [0xC1];
        let trailer = decode_trailer(&buffer, 0).unwrap();
        assert!(trailer.unused.is_empty());
        assert_eq!(trailer.checksum, 0xC1);
    }

    #[test]
    fn test_trailer_truncated() {
        assert_eq!(decode_trailer(&[0xC1], 1), Err(FruError::TruncatedBuffer));
        // Field runs off the end.
        assert_eq!(decode_trailer(&[0xC5, b'A'], 0), Err(FruError::TruncatedBuffer));
        // No terminator before the end of the buffer.
        assert_eq!(decode_trailer(&[0xC2, b'A', b'B'], 0), Err(FruError::TruncatedBuffer));
    }

    #[test]
    fn test_field_display() {
        let text = FruField::new(TypeLength::from_bits(0xC2), alloc::vec![b'O', b'K']);
        assert_eq!(text.to_string(), "OK");

        let binary = FruField::new(TypeLength::from_bits(0x02), alloc::vec![0xDE, 0x01]);
        assert_eq!(binary.to_string(), "de01");
    }
}
