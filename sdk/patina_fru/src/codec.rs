//! Fixed-width integer packing and the FRU additive checksum.
//!
//! Every multi-byte integer in the FRU format is little-endian. Reads and writes go
//! through [`scroll`] so an out-of-range offset surfaces as
//! [`FruError::TruncatedBuffer`] rather than a panic.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::vec::Vec;

use scroll::{Pread, Pwrite, LE};

use crate::FruError;

/// Largest value representable by a 24-bit field.
pub const U24_MAX: u32 = 0x00FF_FFFF;

pub fn pack_u8(value: u8, dest: &mut [u8], offset: usize) -> Result<(), FruError> {
    dest.pwrite_with(value, offset, LE)?;
    Ok(())
}

pub fn pack_u16_le(value: u16, dest: &mut [u8], offset: usize) -> Result<(), FruError> {
    dest.pwrite_with(value, offset, LE)?;
    Ok(())
}

/// Writes the low 24 bits of `value`. Anything above [`U24_MAX`] is masked off.
pub fn pack_u24_le(value: u32, dest: &mut [u8], offset: usize) -> Result<(), FruError> {
    let bytes = (value & U24_MAX).to_le_bytes();
    dest.pwrite_with(&bytes[..3], offset, ())?;
    Ok(())
}

pub fn unpack_u8(src: &[u8], offset: usize) -> Result<u8, FruError> {
    Ok(src.pread_with::<u8>(offset, LE)?)
}

pub fn unpack_u16_le(src: &[u8], offset: usize) -> Result<u16, FruError> {
    Ok(src.pread_with::<u16>(offset, LE)?)
}

/// Reads a signed 16-bit field, used for voltages that may sit on a negative rail.
pub fn unpack_i16_le(src: &[u8], offset: usize) -> Result<i16, FruError> {
    Ok(src.pread_with::<i16>(offset, LE)?)
}

pub fn unpack_u24_le(src: &[u8], offset: usize) -> Result<u32, FruError> {
    let bytes: &[u8] = src.pread_with(offset, 3)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]))
}

/// Copies `len` bytes starting at `offset` into owned storage.
pub fn unpack_bytes(src: &[u8], offset: usize, len: usize) -> Result<Vec<u8>, FruError> {
    let bytes: &[u8] = src.pread_with(offset, len)?;
    Ok(bytes.to_vec())
}

/// Returns true if bit `n` (0 = least significant) of `byte` is set.
///
/// Public helper for callers inspecting raw record bytes. The decoders in this crate read
/// flag bytes through their `bitfield` types instead.
pub const fn is_bit_set(byte: u8, n: u8) -> bool {
    n < 8 && byte & (1 << n) != 0
}

/// Two's-complement additive checksum over `buf[start..end]`.
///
/// The returned value is chosen so that the covered bytes plus the checksum sum to zero
/// modulo 256.
pub fn checksum(buf: &[u8], start: usize, end: usize) -> Result<u8, FruError> {
    let covered = buf.get(start..end).ok_or(FruError::TruncatedBuffer)?;
    Ok(covered.iter().fold(0u8, |sum, b| sum.wrapping_add(*b)).wrapping_neg())
}
