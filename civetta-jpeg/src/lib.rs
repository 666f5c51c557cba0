#![doc = include_str!("../README.md")]

mod error;
mod scanner;

pub use error::Error;
pub use scanner::*;

pub const EXIF_IDENTIFIER_STRING: &[u8] = b"Exif\0\0";
pub const XMP_IDENTIFIER_STRING: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";

/// First byte of every marker
pub const MARKER_START: u8 = 0xFF;
/// Start of image, the first two bytes of every JPEG
pub const SOI: [u8; 2] = [MARKER_START, 0xD8];

civetta_common::utils::convertible_enum!(
    #[repr(u8)]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub enum Marker {
        SOF0 = 0xC0,
        SOF1 = 0xC1,
        SOF2 = 0xC2,
        /// Define Huffman table
        DHT = 0xC4,
        /// Start of image
        SOI = 0xD8,
        /// End of image
        EOI = 0xD9,
        /// Start of scan
        SOS = 0xDA,
        DQT = 0xDB,
        /// Define restart interval
        DRI = 0xDD,
        /// JFIF
        APP0 = 0xE0,
        /// Exif, XMP
        APP1 = 0xE1,
        /// ICC color profile
        APP2 = 0xE2,
        APP3 = 0xE3,
        APP4 = 0xE4,
        APP5 = 0xE5,
        APP6 = 0xE6,
        APP7 = 0xE7,
        APP8 = 0xE8,
        APP9 = 0xE9,
        APP10 = 0xEA,
        APP11 = 0xEB,
        APP12 = 0xEC,
        /// IPTC
        APP13 = 0xED,
        APP14 = 0xEE,
        APP15 = 0xEF,
        /// Comment
        COM = 0xFE,
    }
);

impl Marker {
    /// Application specific segment (APP0 to APP15)
    pub fn is_app(self) -> bool {
        matches!(u8::from(self), 0xE0..=0xEF)
    }
}
