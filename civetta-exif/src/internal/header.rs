use civetta_jpeg::EXIF_IDENTIFIER_STRING;

use super::ByteOrder;
use crate::error::{FormatError, Result};

/// TIFF magic number
pub const MAGIC_42: u16 = 0x002A;

/// Decoded TIFF header
///
/// See 4.5.2 in v3.0 standard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    pub byte_order: ByteOrder,
    /// Offset of IFD0, relative to the byte order marker
    pub ifd0_offset: u32,
}

impl TiffHeader {
    /// Decode the header at the start of `data`
    ///
    /// ```
    /// # use civetta_exif::internal::*;
    /// let header = TiffHeader::parse(b"MM\0\x2a\0\0\0\x08").unwrap();
    /// assert_eq!(header.byte_order, ByteOrder::BigEndian);
    /// assert_eq!(header.ifd0_offset, 8);
    ///
    /// assert!(TiffHeader::parse(b"MM\x2a\0\0\0\0\x08").is_err());
    /// ```
    pub fn parse(data: &[u8]) -> Result<Self> {
        let [b0, b1, m0, m1, o0, o1, o2, o3, ..] = data else {
            return Err(FormatError::HeaderEof.into());
        };

        let byte_order = ByteOrder::from_marker([*b0, *b1])
            .ok_or(FormatError::UnknownByteOrder([*b0, *b1]))?;

        let magic = byte_order.u16([*m0, *m1]);
        if magic != MAGIC_42 {
            return Err(FormatError::MagicBytesWrong(magic).into());
        }

        let ifd0_offset = byte_order.u32([*o0, *o1, *o2, *o3]);

        tracing::debug!("TIFF header with {byte_order:?}, IFD0 at {ifd0_offset}");

        Ok(Self {
            byte_order,
            ifd0_offset,
        })
    }
}

/// Remove the Exif identifier from an APP1 payload
///
/// The remaining data starts with the TIFF header.
pub fn strip_exif_identifier(mut app1: Vec<u8>) -> Result<Vec<u8>> {
    if !app1.starts_with(EXIF_IDENTIFIER_STRING) {
        return Err(FormatError::NotExif.into());
    }

    app1.drain(..EXIF_IDENTIFIER_STRING.len());

    Ok(app1)
}
