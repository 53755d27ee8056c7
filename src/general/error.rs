use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PageWarmError>;

#[derive(Debug, Error)]
pub enum PageWarmError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The plan file bytes are not valid for the expected format.
    #[error("corrupt/invalid data: {0}")]
    CorruptData(&'static str),

    /// A numeric tag/enum value is not recognized by this version.
    #[error("invalid {what} value: {value}")]
    InvalidEnumValue { what: &'static str, value: u64 },

    /// A string field in storage is not valid UTF-8.
    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    /// Something expected to exist (meminfo line, file, ...) is missing.
    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("{what} checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        what: &'static str,
        stored: u32,
        computed: u32,
    },

    #[error("invalid plan magic {0:?}")]
    InvalidMagic([u8; 16]),
}
