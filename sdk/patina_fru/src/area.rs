//! Shared decoding for the chassis, board and product info areas.
//!
//! The three areas have the same shape: a version byte, a length byte (in 8 byte units),
//! a few area-specific fixed bytes, an ordered list of named Type/Length fields, then the
//! custom field trailer. [`decode_area`] walks that shape given an [`AreaLayout`]; the
//! submodules pick the named fields back out into typed structs.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
pub mod board;
pub mod chassis;
pub mod internal_use;
pub mod product;

use alloc::vec::Vec;

use crate::{
    codec::unpack_u8,
    error::FruArea,
    type_length::{decode_field, decode_trailer, FruField, Trailer, END_OF_FIELDS},
    FruError,
};

/// Size of one length or offset unit.
pub const AREA_UNIT: usize = 8;

/// Describes where the named fields of an area start and what they are called.
pub(crate) struct AreaLayout {
    pub area: FruArea,
    /// Offset of the first Type/Length field.
    pub fields_offset: usize,
    pub field_names: &'static [&'static str],
}

/// An area broken down into its common parts.
pub(crate) struct RawArea<'a> {
    /// The area bytes, bounded to the declared length when one is given.
    pub bytes: &'a [u8],
    pub format_version: u8,
    pub length: u8,
    /// One entry per name in [`AreaLayout::field_names`], in the same order.
    pub fields: Vec<FruField>,
    pub trailer: Trailer,
}

impl RawArea<'_> {
    /// Moves the named fields out in layout order.
    pub fn take_fields<const N: usize>(&mut self) -> [FruField; N] {
        let mut fields = core::mem::take(&mut self.fields).into_iter();
        core::array::from_fn(|_| fields.next().unwrap_or_default())
    }
}

/// Checks the version and length bytes and returns the area bounded to its declared size.
///
/// A declared length of zero leaves the slice untouched.
pub(crate) fn bounded_area(buf: &[u8]) -> Result<&[u8], FruError> {
    if buf.len() < 2 {
        return Err(FruError::TruncatedBuffer);
    }
    let declared = buf[1] as usize * AREA_UNIT;
    if buf.len() < declared {
        return Err(FruError::DeclaredLengthExceedsBuffer);
    }
    Ok(if declared == 0 { buf } else { &buf[..declared] })
}

/// Decodes the layout-independent parts of an area.
///
/// The named fields are read in order. An [`END_OF_FIELDS`] descriptor where a named
/// field is expected ends the list early; the remaining named fields are left empty and
/// the trailer starts at that descriptor.
pub(crate) fn decode_area<'a>(buf: &'a [u8], layout: &AreaLayout) -> Result<RawArea<'a>, FruError> {
    let bytes = bounded_area(buf).map_err(|e| e.in_area(layout.area, None))?;
    if bytes.len() < layout.fields_offset {
        return Err(FruError::TruncatedBuffer.in_area(layout.area, None));
    }

    let mut offset = layout.fields_offset;
    let mut fields = Vec::with_capacity(layout.field_names.len());
    for &name in layout.field_names {
        if unpack_u8(bytes, offset).map_err(|e| e.in_area(layout.area, Some(name)))? == END_OF_FIELDS {
            break;
        }
        let (next_offset, field) = decode_field(bytes, offset).map_err(|e| e.in_area(layout.area, Some(name)))?;
        fields.push(field);
        offset = next_offset;
    }
    fields.resize_with(layout.field_names.len(), FruField::default);

    let trailer = decode_trailer(bytes, offset).map_err(|e| e.in_area(layout.area, Some("custom")))?;

    Ok(RawArea { bytes, format_version: bytes[0], length: bytes[1], fields, trailer })
}
