//! Metadata fields
//!
//! Typed markers for Exif fields. Each marker knows its tag and the
//! directory it is expected in and converts into a [`TagIfd`].
//!
//! ```
//! # use civetta_common::exif::{Field, Ifd, Tag, TagIfd};
//! # use civetta_common::field;
//! assert_eq!(field::Orientation::TAG, Tag(0x112));
//! assert_eq!(TagIfd::from(field::ThumbnailCompression).ifd, Ifd::Thumbnail);
//! ```
//!
//! [`TagIfd`]: crate::exif::TagIfd

mod macros;

use crate::exif::Ifd;

macros::make_tags![
    // Primary
    (0x10E, ImageDescription, Ifd::Primary),
    /// Camera manufacturer
    (0x10F, Make, Ifd::Primary),
    (0x110, Model, Ifd::Primary),
    /// Image orientation and mirroring
    (0x112, Orientation, Ifd::Primary),
    (0x11A, XResolution, Ifd::Primary),
    (0x11B, YResolution, Ifd::Primary),
    (0x128, ResolutionUnit, Ifd::Primary),
    (0x131, Software, Ifd::Primary),
    (0x132, DateTime, Ifd::Primary),

    // Thumbnail
    /// Compression scheme of the thumbnail, `6` for JPEG
    (0x103, ThumbnailCompression, Ifd::Thumbnail),
    (0x112, ThumbnailOrientation, Ifd::Thumbnail),
    /// Offset of the JPEG thumbnail, also called JPEGInterchangeFormat
    (0x201, ThumbnailOffset, Ifd::Thumbnail),
    /// Length of the JPEG thumbnail, also called JPEGInterchangeFormatLength
    (0x202, ThumbnailLength, Ifd::Thumbnail),

    // Exif
    (0x829A, ExposureTime, Ifd::Exif),
    (0x829D, FNumber, Ifd::Exif),
    /// Also called ISOSpeedRatings
    (0x8827, PhotographicSensitivity, Ifd::Exif),
    (0x9003, DateTimeOriginal, Ifd::Exif),
    (0x9011, OffsetTimeOriginal, Ifd::Exif),
    (0x9291, SubSecTimeOriginal, Ifd::Exif),
    (0x920A, FocalLength, Ifd::Exif),
    (0xA434, LensModel, Ifd::Exif),

    // GPS
    (0x1, GPSLatitudeRef, Ifd::Gps),
    (0x2, GPSLatitude, Ifd::Gps),
    (0x3, GPSLongitudeRef, Ifd::Gps),
    (0x4, GPSLongitude, Ifd::Gps),
];
