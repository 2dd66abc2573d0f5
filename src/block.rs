//! Tape blocks: the atomic unit of a `.tap` file.
//!
//! # Layout
//! ```text
//! [len_lo len_hi] [flag] [payload ...] [checksum]
//! ```
//! `len` is little-endian and counts the flag, payload and checksum bytes
//! (`payload.len() + 2`), never the length field itself.  The checksum is
//! the XOR of the flag and every payload byte.
//!
//! A `.tap` file has no container header or footer; it is simply blocks
//! written back to back.

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;
use tracing::trace;

use crate::error::{fit_u16, TapError};

/// Flag byte of a header block.
pub const FLAG_HEADER: u8 = 0x00;
/// Flag byte of a data block.
pub const FLAG_DATA:   u8 = 0xff;

/// Bytes a block adds around its payload: 2 length + 1 flag + 1 checksum.
pub const BLOCK_OVERHEAD: usize = 4;

/// Largest payload whose block length still fits the 16-bit length field.
pub const MAX_PAYLOAD_LEN: usize = 0xffff - 2;

/// XOR of `flag` followed by every byte of `payload`.
pub fn checksum(flag: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(flag, |acc, b| acc ^ b)
}

/// Streams one block to `writer`.
pub fn write_block<W: Write>(mut writer: W, flag: u8, payload: &[u8]) -> Result<(), TapError> {
    let length = fit_u16("block length", payload.len() + 2)?;
    trace!(flag, length, "writing tape block");
    writer.write_u16::<LittleEndian>(length)?;
    writer.write_u8(flag)?;
    writer.write_all(payload)?;
    writer.write_u8(checksum(flag, payload))?;
    Ok(())
}

/// Wraps `payload` in a block and returns the encoded bytes.
///
/// Fails with [`TapError::EncodingOverflow`] when `payload` is longer than
/// [`MAX_PAYLOAD_LEN`]; the format itself would silently wrap the length.
pub fn encode_block(flag: u8, payload: &[u8]) -> Result<Vec<u8>, TapError> {
    let mut out = Vec::with_capacity(payload.len() + BLOCK_OVERHEAD);
    write_block(&mut out, flag, payload)?;
    Ok(out)
}
