use thiserror::Error;

/// The closed error taxonomy shared by every layer of the crate.
///
/// Operations return `Err` instead of panicking, and terminal request
/// callbacks receive [`Error::Timeout`] or [`Error::Cancelled`] as their
/// outcome. Errors never cross a callback boundary as panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Operation invoked in the wrong lifecycle phase.
    #[error("invalid state")]
    InvalidState,

    /// Malformed configuration or arguments.
    #[error("invalid argument")]
    InvalidArgument,

    /// Allocation failure.
    #[error("out of memory")]
    NoMemory,

    /// Input ends before the encoded structure does.
    #[error("not enough data")]
    NotEnoughData,

    /// Input violates the wire syntax.
    #[error("malformed data")]
    BadData,

    /// Output could not be produced.
    #[error("encoding failed")]
    EncodingFailed,

    /// Destination buffer cannot hold the encoding.
    #[error("buffer too small")]
    BufferTooSmall,

    /// Outbound request deadline expired.
    #[error("request timed out")]
    Timeout,

    /// Request abandoned by a channel reset or session change.
    #[error("operation cancelled")]
    Cancelled,

    /// Reserved feature that is not implemented.
    #[error("not supported")]
    NotSupported,
}

pub type Result<T> = std::result::Result<T, Error>;
