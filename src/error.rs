
//! Error type definitions.

use std::borrow::Cow;
use std::io::ErrorKind;
pub use std::io::Error as IoError;
pub use std::io::Result as IoResult;
use std::fmt::{Display, Formatter};
use std::error;


/// A result that may contain a compression or expansion error.
pub type Result<T> = std::result::Result<T, Error>;

/// A result that, if ok, contains nothing, and otherwise contains an error.
pub type UnitResult = Result<()>;


/// An error that may happen while compressing or expanding a stream.
/// Distinguishes between three types of errors:
/// unsupported input, malformed streams, and other input or output errors.
#[derive(Debug)]
pub enum Error {

    /// The input cannot be represented in the compressed format,
    /// for example because it is longer than the length field allows.
    NotSupported(Cow<'static, str>),

    /// The compressed stream is damaged or ends too early.
    /// The format carries no redundancy, so these streams cannot be recovered.
    Invalid(Cow<'static, str>),

    /// The underlying byte stream could not be read or written.
    Io(IoError),
}


impl Error {

    /// Create an error of the variant `Invalid`.
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Invalid(message.into())
    }

    /// Create an error of the variant `NotSupported`.
    pub(crate) fn unsupported(message: impl Into<Cow<'static, str>>) -> Self {
        Error::NotSupported(message.into())
    }
}

/// Enable using the `?` operator on `std::io::Result`.
impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        if error.kind() == ErrorKind::UnexpectedEof {
            Error::invalid("end of stream")
        }
        else {
            Error::Io(error)
        }
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => err.fmt(formatter),
            Error::NotSupported(message) => write!(formatter, "not supported: {}", message),
            Error::Invalid(message) => write!(formatter, "invalid compressed stream: {}", message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}


/// Convert a length to `u32`, failing for inputs the length field cannot hold.
#[inline]
pub(crate) fn usize_to_u32(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::unsupported("input longer than 4 GiB"))
}
