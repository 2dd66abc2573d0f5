//! The 17-byte tape header record carried in a header block.
//!
//! ```text
//! off  size  field
//!   0     1  type (0 = program, 3 = code)
//!   1    10  filename, space padded
//!  11     2  data length
//!  13     2  param1
//!  15     2  param2
//! ```
//! All integers are little-endian.  The meaning of `param1`/`param2`
//! depends on the type:
//!
//! | type    | param1                                        | param2                     |
//! |---------|-----------------------------------------------|----------------------------|
//! | program | autostart line, or >= 32768 for no autostart  | variable area offset       |
//! | code    | load address                                  | always 32768               |

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

pub const HEADER_SIZE:   usize = 17;
pub const FILENAME_LEN:  usize = 10;

/// Filename used when none is supplied to [`TapeHeader::new`].
pub const DEFAULT_HEADER_NAME: &str = "HELLO";

/// `param1` value meaning "do not autostart" (and the default load address).
pub const NO_AUTOSTART: u16 = 32768;
/// `param2` value for code files.
pub const CODE_PARAM2:  u16 = 32768;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Program,
    Code,
}

impl FileType {
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            FileType::Program => 0,
            FileType::Code    => 3,
        }
    }
}

impl From<FileType> for u8 {
    fn from(t: FileType) -> u8 { t.code() }
}

/// Pads `name` with spaces to [`FILENAME_LEN`] or cuts it there.
///
/// Each character is stored as the low byte of its code point.
pub fn pad_filename(name: &str) -> [u8; FILENAME_LEN] {
    let mut out = [b' '; FILENAME_LEN];
    for (slot, c) in out.iter_mut().zip(name.chars()) {
        *slot = (c as u32 & 0xff) as u8;
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapeHeader {
    pub file_type:   u8,
    pub filename:    [u8; FILENAME_LEN],
    pub data_length: u16,
    pub param1:      u16,
    pub param2:      u16,
}

impl TapeHeader {
    pub fn new(data_length: u16, param1: u16, param2: u16, file_type: u8) -> Self {
        Self::named(data_length, param1, param2, file_type, DEFAULT_HEADER_NAME)
    }

    pub fn named(data_length: u16, param1: u16, param2: u16, file_type: u8, filename: &str) -> Self {
        Self {
            file_type,
            filename: pad_filename(filename),
            data_length,
            param1,
            param2,
        }
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u8(self.file_type)?;
        writer.write_all(&self.filename)?;
        writer.write_u16::<LittleEndian>(self.data_length)?;
        writer.write_u16::<LittleEndian>(self.param1)?;
        writer.write_u16::<LittleEndian>(self.param2)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        // The record is exactly HEADER_SIZE bytes, so the slice never runs out.
        let written = self.write(&mut out[..]);
        debug_assert!(written.is_ok());
        out
    }
}

/// Builds the raw 17-byte header record. `file_type` is stored verbatim.
pub fn build_header(
    data_length: u16,
    param1:      u16,
    param2:      u16,
    file_type:   u8,
    filename:    &str,
) -> [u8; HEADER_SIZE] {
    TapeHeader::named(data_length, param1, param2, file_type, filename).to_bytes()
}
