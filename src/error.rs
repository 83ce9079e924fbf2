//! Error types for HLW811x communications.

use thiserror::Error;

pub type Result<T, I> = core::result::Result<T, Error<I>>;

/// Failure modes of a driver operation.
///
/// Every operation reports its outcome through this enum; there is no retry
/// and no fallback inside the driver, so a single transport fault surfaces
/// here directly.
#[derive(Error, Debug)]
pub enum Error<I: embedded_io::Error> {
    #[error("serial communication error")]
    Serial(I),
    #[error("invalid parameter")]
    InvalidParam,
    #[error("device returned fewer bytes than requested")]
    MissingBytes,
    #[error("no response from device")]
    NoResponse,
    #[error("response checksum mismatch")]
    ChecksumMismatch,
    #[error("destination buffer smaller than the register width")]
    BufferTooSmall,
    #[error("operation not implemented for the active bus interface")]
    Unimplemented,
    #[error("device returned semantically invalid data")]
    InvalidData,
}
