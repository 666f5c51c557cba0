use civetta_common::exif::Field;
use civetta_common::field;

use super::*;
use crate::error::{Error, Result};

/// Compression value for JPEG thumbnails
///
/// The value `7` from TIFF/EP is not valid for Exif thumbnails.
pub const COMPRESSION_JPEG: u16 = 6;

/// Result of a thumbnail extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumbnail<'a> {
    /// Raw orientation value from IFD0
    pub orientation: Option<u16>,
    /// Complete JPEG file of the thumbnail
    pub data: Option<&'a [u8]>,
}

/// Location of the thumbnail within the Exif data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailRef {
    pub offset: u32,
    pub length: u32,
}

impl super::Session {
    /// Orientation from IFD0 and thumbnail data from IFD1
    ///
    /// Files without IFD1 return no thumbnail data. If IFD1 exists, it has to
    /// describe a JPEG thumbnail that lies within the Exif data.
    pub fn extract_thumbnail(&self) -> Result<Thumbnail<'_>> {
        let ifd0 = self.read_directory(self.ifd0_offset)?;

        let orientation = match ifd0.find(field::Orientation::TAG) {
            Some(entry) => Some(self.short_value(entry)?),
            None => None,
        };

        let data = match self.thumbnail_ref_after(&ifd0)? {
            Some(thumbnail) => Some(self.blob.get(thumbnail.offset, thumbnail.length)?),
            None => None,
        };

        Ok(Thumbnail { orientation, data })
    }

    /// Location of the JPEG thumbnail
    ///
    /// Does not check if the thumbnail lies within the Exif data.
    pub fn thumbnail_ref(&self) -> Result<Option<ThumbnailRef>> {
        let ifd0 = self.read_directory(self.ifd0_offset)?;
        self.thumbnail_ref_after(&ifd0)
    }

    fn thumbnail_ref_after(&self, ifd0: &Directory) -> Result<Option<ThumbnailRef>> {
        if !ifd0.has_next() {
            tracing::debug!("No IFD1, no thumbnail");
            return Ok(None);
        }

        let mut traversal = Traversal::new();
        traversal.visit(ifd0.offset())?;
        traversal.visit(ifd0.next_offset())?;

        let ifd1 = self.read_directory(ifd0.next_offset())?;

        let required = |tagifd: TagIfd| {
            ifd1.find(tagifd.tag)
                .ok_or(Error::MissingTag(tagifd))
        };

        let compression = self.short_value(required(field::ThumbnailCompression.into())?)?;
        if compression != COMPRESSION_JPEG {
            return Err(Error::UnsupportedCompression(compression));
        }

        let offset = self.u32_value(required(field::ThumbnailOffset.into())?)?;
        if offset == 0 {
            return Err(Error::MissingTag(field::ThumbnailOffset.into()));
        }

        let length = self.u32_value(required(field::ThumbnailLength.into())?)?;
        if length == 0 {
            return Err(Error::MissingTag(field::ThumbnailLength.into()));
        }

        tracing::debug!("Thumbnail at {offset} with {length} bytes");

        Ok(Some(ThumbnailRef { offset, length }))
    }
}
