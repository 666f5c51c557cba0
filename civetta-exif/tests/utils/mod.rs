#![allow(dead_code)]

pub use civetta_exif::internal::*;
pub use civetta_jpeg::EXIF_IDENTIFIER_STRING;

/// Value of a synthetic entry
#[derive(Debug, Clone)]
pub enum Data {
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Ascii(Vec<u8>),
    Rationals(Vec<(u32, u32)>),
    /// Bytes as stored, for arbitrary type codes
    Raw {
        data_type: u16,
        count: u32,
        bytes: Vec<u8>,
    },
    /// `LONG` offset of another directory
    Pointer(usize),
    /// `LONG` offset of a blob
    BlobOffset(usize),
    /// `LONG` length of a blob
    BlobLength(usize),
}

#[derive(Debug, Clone)]
pub struct Field {
    pub tag: u16,
    pub data: Data,
}

pub fn short(tag: u16, value: u16) -> Field {
    Field {
        tag,
        data: Data::Shorts(vec![value]),
    }
}

pub fn long(tag: u16, value: u32) -> Field {
    Field {
        tag,
        data: Data::Longs(vec![value]),
    }
}

pub fn ascii(tag: u16, value: &str) -> Field {
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    Field {
        tag,
        data: Data::Ascii(bytes),
    }
}

pub fn rational(tag: u16, numerator: u32, denominator: u32) -> Field {
    Field {
        tag,
        data: Data::Rationals(vec![(numerator, denominator)]),
    }
}

pub fn pointer(tag: u16, dir: usize) -> Field {
    Field {
        tag,
        data: Data::Pointer(dir),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dir {
    pub fields: Vec<Field>,
    /// Index of the next directory in the chain
    pub next: Option<usize>,
}

impl Dir {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields, next: None }
    }

    pub fn next(mut self, dir: usize) -> Self {
        self.next = Some(dir);
        self
    }
}

/// Builds TIFF structures as found in Exif segments
///
/// Directories are written in order after the header. Values that don't fit
/// into an entry follow their directory. Blobs are written last.
#[derive(Debug, Clone)]
pub struct Tiff {
    pub byte_order: ByteOrder,
    pub dirs: Vec<Dir>,
    pub blobs: Vec<Vec<u8>>,
}

struct Encoded {
    data_type: u16,
    count: u32,
    bytes: Vec<u8>,
}

impl Tiff {
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            dirs: Vec::new(),
            blobs: Vec::new(),
        }
    }

    pub fn dir(mut self, dir: Dir) -> Self {
        self.dirs.push(dir);
        self
    }

    pub fn blob(mut self, blob: Vec<u8>) -> Self {
        self.blobs.push(blob);
        self
    }

    fn encode(&self, data: &Data, dir_offsets: &[u32], blob_offsets: &[u32]) -> Encoded {
        let bo = self.byte_order;
        match data {
            Data::Shorts(v) => Encoded {
                data_type: 3,
                count: v.len() as u32,
                bytes: v.iter().flat_map(|x| bo.u16_bytes(*x)).collect(),
            },
            Data::Longs(v) => Encoded {
                data_type: 4,
                count: v.len() as u32,
                bytes: v.iter().flat_map(|x| bo.u32_bytes(*x)).collect(),
            },
            Data::Ascii(v) => Encoded {
                data_type: 2,
                count: v.len() as u32,
                bytes: v.clone(),
            },
            Data::Rationals(v) => Encoded {
                data_type: 5,
                count: v.len() as u32,
                bytes: v
                    .iter()
                    .flat_map(|(n, d)| [bo.u32_bytes(*n), bo.u32_bytes(*d)])
                    .flatten()
                    .collect(),
            },
            Data::Raw {
                data_type,
                count,
                bytes,
            } => Encoded {
                data_type: *data_type,
                count: *count,
                bytes: bytes.clone(),
            },
            Data::Pointer(i) => Encoded {
                data_type: 4,
                count: 1,
                bytes: bo.u32_bytes(dir_offsets[*i]).to_vec(),
            },
            Data::BlobOffset(i) => Encoded {
                data_type: 4,
                count: 1,
                bytes: bo.u32_bytes(blob_offsets[*i]).to_vec(),
            },
            Data::BlobLength(i) => Encoded {
                data_type: 4,
                count: 1,
                bytes: bo.u32_bytes(self.blobs[*i].len() as u32).to_vec(),
            },
        }
    }

    fn is_indirect(encoded: &Encoded) -> bool {
        matches!(encoded.data_type, 5 | 10) || encoded.bytes.len() > 4
    }

    pub fn build(&self) -> Vec<u8> {
        // Offsets only depend on sizes, so encode with placeholders first
        let placeholders = vec![0; self.dirs.len().max(self.blobs.len())];

        let mut dir_offsets = Vec::new();
        let mut pos = 8_u32;
        for dir in &self.dirs {
            dir_offsets.push(pos);
            pos += 2 + 12 * dir.fields.len() as u32 + 4;
            for field in &dir.fields {
                let encoded = self.encode(&field.data, &placeholders, &placeholders);
                if Self::is_indirect(&encoded) {
                    pos += encoded.bytes.len() as u32;
                }
            }
        }

        let mut blob_offsets = Vec::new();
        for blob in &self.blobs {
            blob_offsets.push(pos);
            pos += blob.len() as u32;
        }

        let bo = self.byte_order;
        let mut data = Vec::new();
        data.extend_from_slice(&bo.marker());
        data.extend_from_slice(&bo.u16_bytes(MAGIC_42));
        data.extend_from_slice(&bo.u32_bytes(dir_offsets.first().copied().unwrap_or(0)));

        for (dir, offset) in self.dirs.iter().zip(&dir_offsets) {
            assert_eq!(data.len() as u32, *offset);

            let mut extra_pos = offset + 2 + 12 * dir.fields.len() as u32 + 4;
            let mut extra = Vec::new();

            data.extend_from_slice(&bo.u16_bytes(dir.fields.len() as u16));
            for field in &dir.fields {
                let encoded = self.encode(&field.data, &dir_offsets, &blob_offsets);
                data.extend_from_slice(&bo.u16_bytes(field.tag));
                data.extend_from_slice(&bo.u16_bytes(encoded.data_type));
                data.extend_from_slice(&bo.u32_bytes(encoded.count));

                if Self::is_indirect(&encoded) {
                    data.extend_from_slice(&bo.u32_bytes(extra_pos));
                    extra_pos += encoded.bytes.len() as u32;
                    extra.extend_from_slice(&encoded.bytes);
                } else {
                    let mut value = encoded.bytes.clone();
                    value.resize(4, 0);
                    data.extend_from_slice(&value);
                }
            }

            let next = dir.next.map(|i| dir_offsets[i]).unwrap_or(0);
            data.extend_from_slice(&bo.u32_bytes(next));
            data.extend_from_slice(&extra);
        }

        for blob in &self.blobs {
            data.extend_from_slice(blob);
        }

        data
    }
}

fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut data = vec![0xFF, marker];
    data.extend_from_slice(&(payload.len() as u16 + 2).to_be_bytes());
    data.extend_from_slice(payload);
    data
}

/// Minimal JPEG stream with the TIFF data in an Exif segment
pub fn jpeg_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut app1 = EXIF_IDENTIFIER_STRING.to_vec();
    app1.extend_from_slice(tiff);

    let mut data = vec![0xFF, 0xD8];
    data.extend(segment(0xE0, b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0"));
    data.extend(segment(0xE1, &app1));
    data.extend(segment(0xDB, &[0; 65]));
    data.extend(segment(0xDA, &[1, 1, 0, 0, 0x3F, 0]));
    data.extend_from_slice(&[0x12, 0x34, 0xFF, 0xD9]);
    data
}

/// A real JPEG file to embed as thumbnail
pub fn thumbnail_jpeg() -> Vec<u8> {
    let mut out = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut out, 80);
    let pixels = [200_u8; 8 * 8 * 3];
    encoder
        .encode(&pixels, 8, 8, jpeg_encoder::ColorType::Rgb)
        .unwrap();
    out
}

/// IFD0 with orientation and make, IFD1 with a JPEG thumbnail
pub fn apple_tiff(byte_order: ByteOrder, thumbnail: Vec<u8>) -> Vec<u8> {
    Tiff::new(byte_order)
        .dir(Dir::new(vec![short(0x112, 6), ascii(0x10F, "Apple")]).next(1))
        .dir(Dir::new(vec![
            short(0x103, 6),
            Field {
                tag: 0x201,
                data: Data::BlobOffset(0),
            },
            Field {
                tag: 0x202,
                data: Data::BlobLength(0),
            },
        ]))
        .blob(thumbnail)
        .build()
}
