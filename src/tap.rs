//! Assembling a complete `.tap` image: one header block describing the
//! payload, followed by the payload itself as a data block.
//!
//! ```no_run
//! use zxtap::tap::{write_tap_file, TapOptions};
//! use zxtap::FileType;
//!
//! let opts = TapOptions { file_type: FileType::Code, start: Some(0x8000), ..TapOptions::default() };
//! write_tap_file("out.tap", b"\xc9", &opts)?;
//! # Ok::<(), zxtap::TapError>(())
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, trace};

use crate::block::{write_block, BLOCK_OVERHEAD, FLAG_DATA, FLAG_HEADER, MAX_PAYLOAD_LEN};
use crate::error::TapError;
use crate::header::{FileType, TapeHeader, CODE_PARAM2, HEADER_SIZE, NO_AUTOSTART};

/// Tape filename used when the caller does not pick one.
pub const DEFAULT_TAPE_NAME: &str = "DEMO";

// ── TapOptions ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TapOptions {
    pub file_type: FileType,
    pub name:      String,
    /// Autostart line for programs, load address for code.
    /// `None` stores 32768 (no autostart).
    pub start:     Option<u16>,
}

impl Default for TapOptions {
    fn default() -> Self {
        Self {
            file_type: FileType::Code,
            name:      DEFAULT_TAPE_NAME.to_string(),
            start:     None,
        }
    }
}

impl TapOptions {
    /// Header describing `payload` under these options.
    pub fn header_for(&self, payload: &[u8]) -> Result<TapeHeader, TapError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(TapError::EncodingOverflow { field: "payload length", value: payload.len() });
        }
        let data_length = payload.len() as u16;
        let param1 = self.start.unwrap_or(NO_AUTOSTART);
        // A program is stored without variables, so they start right after it.
        let param2 = match self.file_type {
            FileType::Program => data_length,
            FileType::Code    => CODE_PARAM2,
        };
        Ok(TapeHeader::named(data_length, param1, param2, self.file_type.code(), &self.name))
    }
}

// ── Assembly ──────────────────────────────────────────────────────────────────

/// Writes the header block and the data block for `payload` to `output`.
///
/// Both blocks are validated before the first byte is written.
pub fn write_container<W: Write>(payload: &[u8], mut output: W, opts: &TapOptions) -> Result<(), TapError> {
    let header = opts.header_for(payload)?;
    debug!(
        file_type = header.file_type,
        data_length = header.data_length,
        param1 = header.param1,
        param2 = header.param2,
        "tape header"
    );
    trace!(bytes = %hex::encode(header.to_bytes()), "header record");
    write_block(&mut output, FLAG_HEADER, &header.to_bytes())?;
    write_block(&mut output, FLAG_DATA, payload)?;
    Ok(())
}

/// Returns the complete `.tap` image for `payload`.
pub fn build_tap(payload: &[u8], opts: &TapOptions) -> Result<Vec<u8>, TapError> {
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len() + 2 * BLOCK_OVERHEAD);
    write_container(payload, &mut out, opts)?;
    Ok(out)
}

/// Encodes `payload` and writes it to a new file at `path`.
///
/// The image is built in memory first, so an encoding error never creates
/// or truncates `path`.
pub fn write_tap_file<P: AsRef<Path>>(path: P, payload: &[u8], opts: &TapOptions) -> Result<(), TapError> {
    let path = path.as_ref();
    let image = build_tap(payload, opts)?;
    let file = File::create(path).map_err(|source| TapError::Create { path: path.to_path_buf(), source })?;
    let mut w = BufWriter::new(file);
    w.write_all(&image)?;
    w.flush()?;
    info!(path = %path.display(), bytes = image.len(), "wrote tap file");
    Ok(())
}
