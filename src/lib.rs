pub mod error;
pub mod block;
pub mod header;
pub mod inject;
pub mod tap;

pub use error::TapError;
pub use block::{encode_block, checksum, FLAG_DATA, FLAG_HEADER};
pub use header::{build_header, FileType, TapeHeader};
pub use inject::{inject, INJECT_MARKER};
pub use tap::{write_container, write_tap_file, TapOptions};
