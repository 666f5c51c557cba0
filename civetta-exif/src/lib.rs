#![doc = include_str!("../README.md")]

pub mod error;
mod high_level;
pub mod internal;

pub use error::{Error, ErrorKind, FormatError, Result};
pub use high_level::Exif;
pub use internal::{Session, Thumbnail};
