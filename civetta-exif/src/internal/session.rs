mod debug;
mod lookup;
mod metadata;
mod thumbnail;
mod traversal;

use std::io::Read;

use civetta_jpeg::{ScanOutcome, Scanner};

pub use metadata::{DecodedEntry, DirectoryNode, Metadata, SkipReason, SkippedEntry};
pub use thumbnail::{Thumbnail, ThumbnailRef, COMPRESSION_JPEG};
pub use traversal::{Traversal, MAX_DIRECTORIES};

use super::*;
use crate::error::Result;

/// Decoding session for the Exif data of one file
///
/// Owns the only copy of the Exif data. Directories are decoded on demand and
/// values borrow from the session.
#[derive(Debug, Clone)]
pub struct Session {
    blob: ExifBlob,
    ifd0_offset: u32,
}

impl Session {
    /// Scan a JPEG stream for Exif data
    ///
    /// Returns `None` if the image has no Exif segment.
    pub fn open(reader: impl Read) -> Result<Option<Self>> {
        match Scanner::find_exif_in(reader)? {
            ScanOutcome::Exif(payload) => Self::from_app1(payload).map(Some),
            ScanOutcome::NoExif => {
                tracing::debug!("No Exif segment found");
                Ok(None)
            }
        }
    }

    /// Session from the payload of an APP1 segment, starting with `Exif\0\0`
    pub fn from_app1(payload: Vec<u8>) -> Result<Self> {
        Self::new(strip_exif_identifier(payload)?)
    }

    /// Session from data starting with the TIFF header
    pub fn new(data: Vec<u8>) -> Result<Self> {
        let header = TiffHeader::parse(&data)?;

        Ok(Self {
            blob: ExifBlob::new(data, header.byte_order),
            ifd0_offset: header.ifd0_offset,
        })
    }

    pub fn blob(&self) -> &ExifBlob {
        &self.blob
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.blob.byte_order()
    }

    pub fn ifd0_offset(&self) -> u32 {
        self.ifd0_offset
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.blob.into_inner()
    }

    /// Decode the directory at `offset`
    pub fn read_directory(&self, offset: u32) -> Result<Directory> {
        Directory::read(&self.blob, offset)
    }

    /// Decode the value of an entry
    ///
    /// Small values are read from the entry itself, larger ones from the
    /// offset the entry points to.
    pub fn decode_value(&self, entry: &Entry) -> Result<Value<'_>> {
        let offset = match entry.value_offset {
            ValueOffset::Value(_) => entry.value_offset_position()?,
            ValueOffset::Offset(offset) => offset,
        };

        self.blob.value_at(entry.data_type, entry.count, offset)
    }
}
