//! Splicing binary data into a tokenised BASIC listing.
//!
//! A listing prepared for injection carries one line whose body is
//! `REM INJECT HERE`.  Tokenised, that body is the marker
//! `0xEA "INJECT HERE" 0x0D`, preceded by the line's 2-byte little-endian
//! length field.  [`inject`] replaces the marker with `0xEA <data> 0x0D`
//! and rewrites that length field; every other byte of the listing is
//! copied through untouched.
//!
//! Only the first marker is considered.  Later markers stay in the output as
//! ordinary REM lines, and a first marker with no room for a length field in
//! front of it is rejected rather than skipped.

use tracing::debug;

use crate::error::{fit_u16, TapError};

/// Token byte of the `REM` keyword.
pub const REM: u8 = 0xea;
/// Line terminator in a tokenised listing.
pub const LINE_END: u8 = 0x0d;

/// `REM INJECT HERE` as it appears in a tokenised line body.
pub const INJECT_MARKER: &[u8; 13] = b"\xeaINJECT HERE\x0d";

/// Size of the line-length field in front of each line body.
const LINE_LEN_FIELD: usize = 2;

/// Offset of the first marker in `listing`.
pub fn find_marker(listing: &[u8]) -> Option<usize> {
    listing
        .windows(INJECT_MARKER.len())
        .position(|w| w == INJECT_MARKER)
}

/// Returns a copy of `listing` with the marker line's body replaced by
/// `REM <payload>`.
///
/// Fails with [`TapError::MarkerNotFound`] if the listing has no marker, or
/// if its first marker starts too early to carry a line-length field, and
/// with [`TapError::EncodingOverflow`] if the new line would not fit its
/// 16-bit length field.
pub fn inject(listing: &[u8], payload: &[u8]) -> Result<Vec<u8>, TapError> {
    let pos = find_marker(listing)
        .filter(|&p| p >= LINE_LEN_FIELD)
        .ok_or(TapError::MarkerNotFound)?;

    let mut line = Vec::with_capacity(payload.len() + 2);
    line.push(REM);
    line.extend_from_slice(payload);
    line.push(LINE_END);
    let line_len = fit_u16("injected line length", line.len())?;

    debug!(offset = pos, line_len, "injecting into REM line");

    let tail = &listing[pos + INJECT_MARKER.len()..];
    let mut out = Vec::with_capacity(pos + line.len() + tail.len());
    out.extend_from_slice(&listing[..pos - LINE_LEN_FIELD]);
    out.extend_from_slice(&line_len.to_le_bytes());
    out.extend_from_slice(&line);
    out.extend_from_slice(tail);
    Ok(out)
}
