#![doc = include_str!("../README.md")]

pub mod exif;
pub mod field;
pub mod math;
pub mod orientation;
pub mod utils;
