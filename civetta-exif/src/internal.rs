//! Low-level access to the Exif structure
//!
//! Everything here works on a single in-memory copy of the Exif data. Offsets
//! are always relative to the start of the TIFF header.

mod byte_order;
mod header;
mod ifd;
mod raw;
mod session;
mod type_;
mod value;

pub use civetta_common::exif::{Ifd, Tag, TagIfd};

pub use byte_order::ByteOrder;
pub use header::{strip_exif_identifier, TiffHeader, MAGIC_42};
pub use ifd::{Directory, Entry, ValueOffset, ENTRY_SIZE};
pub use raw::ExifBlob;
pub use session::*;
pub use type_::Type;
pub use value::{Element, Elements, Rational, SRational, Value};
