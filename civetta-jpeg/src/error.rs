use crate::{Marker, ScanState};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO: {0}")]
    Io(std::io::Error),
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("Start of image marker missing, found {0:x?}")]
    SoiMissing([u8; 2]),
    #[error("Invalid marker {0:x?}")]
    InvalidMarker([u8; 2]),
    #[error("Segment {marker:?} has invalid length {length}")]
    InvalidSegmentLength { marker: Marker, length: u16 },
    #[error("Scanning already finished in state {0:?}")]
    ScanFinished(ScanState),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof
        } else {
            Self::Io(err)
        }
    }
}
