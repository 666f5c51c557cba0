use civetta_common::exif::TagIfd;
use civetta_common::math::MathError;

use crate::internal::Type;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO: {0}")]
    Io(std::io::Error),
    #[error("Invalid format: {0}")]
    Format(#[from] FormatError),
    #[error("Range {start}..{end} exceeds the {len} bytes of Exif data")]
    OutOfBounds { start: u64, end: u64, len: usize },
    #[error("Required tag {0:?} not found")]
    MissingTag(TagIfd),
    #[error("Thumbnail compression {0} is not JPEG")]
    UnsupportedCompression(u16),
    #[error("Stopped at directory offset {offset} after visiting {visited} directories")]
    TraversalLimitExceeded { offset: u32, visited: usize },
    #[error("Unknown data type {0}")]
    UnknownType(u16),
    #[error("Expected {expected:?} values, found {actual:?}")]
    WrongType {
        expected: (u32, Type),
        actual: (u32, Type),
    },
    #[error("Math: {0}")]
    Math(#[from] MathError),
}

/// Structural violations of the JPEG or TIFF container
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("JPEG: {0}")]
    Jpeg(civetta_jpeg::Error),
    #[error("Exif identifier missing")]
    NotExif,
    #[error("TIFF header truncated")]
    HeaderEof,
    #[error("Unknown byte order {0:x?}")]
    UnknownByteOrder([u8; 2]),
    #[error("Wrong TIFF magic bytes {0:#06x}")]
    MagicBytesWrong(u16),
}

/// Broad category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Format,
    OutOfBounds,
    MissingTag,
    UnsupportedCompression,
    TraversalLimitExceeded,
    UnknownType,
    WrongType,
    Math,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Format(_) => ErrorKind::Format,
            Self::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            Self::MissingTag(_) => ErrorKind::MissingTag,
            Self::UnsupportedCompression(_) => ErrorKind::UnsupportedCompression,
            Self::TraversalLimitExceeded { .. } => ErrorKind::TraversalLimitExceeded,
            Self::UnknownType(_) => ErrorKind::UnknownType,
            Self::WrongType { .. } => ErrorKind::WrongType,
            Self::Math(_) => ErrorKind::Math,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<civetta_jpeg::Error> for Error {
    fn from(value: civetta_jpeg::Error) -> Self {
        match value {
            civetta_jpeg::Error::Io(err) => Self::Io(err),
            err => Self::Format(FormatError::Jpeg(err)),
        }
    }
}

pub(crate) trait ResultExt<T> {
    fn e(self, err: Error) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E> {
    fn e(self, err: Error) -> Result<T> {
        self.map_err(|_| err)
    }
}

impl<T> ResultExt<T> for Option<T> {
    fn e(self, err: Error) -> Result<T> {
        match self {
            Some(v) => Ok(v),
            None => Err(err),
        }
    }
}
