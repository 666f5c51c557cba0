mod utils;

use civetta_common::field;
use civetta_exif::internal::{SkipReason, MAX_DIRECTORIES};
use civetta_exif::{Error, Session};
use utils::*;

fn full_tiff(byte_order: ByteOrder) -> Vec<u8> {
    Tiff::new(byte_order)
        .dir(
            Dir::new(vec![
                ascii(0x10F, "Apple"),
                short(0x112, 6),
                pointer(0x8769, 2),
                pointer(0x8825, 3),
            ])
            .next(1),
        )
        .dir(Dir::new(vec![short(0x103, 6)]))
        .dir(Dir::new(vec![
            rational(0x829A, 1, 60),
            short(0xC0DE, 1),
            pointer(0xA005, 4),
        ]))
        .dir(Dir::new(vec![ascii(0x1, "N"), rational(0x2, 52, 1)]))
        .dir(Dir::new(vec![ascii(0x1, "R98")]))
        .build()
}

#[test]
fn tree() {
    let session = Session::new(full_tiff(ByteOrder::LittleEndian)).unwrap();
    let metadata = session.metadata().unwrap();

    assert_eq!(metadata.chain.len(), 2);
    assert_eq!(metadata.chain[0].ifd, Ifd::Primary);
    assert_eq!(metadata.chain[1].ifd, Ifd::Thumbnail);

    let ifds = metadata
        .directories()
        .iter()
        .map(|node| node.ifd)
        .collect::<Vec<_>>();
    assert_eq!(
        ifds,
        vec![
            Ifd::Primary,
            Ifd::Exif,
            Ifd::Interoperability,
            Ifd::Gps,
            Ifd::Thumbnail
        ]
    );

    let make = metadata.field(field::Make).unwrap();
    assert_eq!(make.name, Some("Make"));
    assert_eq!(make.value.as_ascii(), Some(b"Apple".as_slice()));

    // Unknown tags are kept without name
    let unknown = metadata.field(TagIfd::new(Tag(0xC0DE), Ifd::Exif)).unwrap();
    assert_eq!(unknown.name, None);

    // GPS tags have their own names
    let latitude = metadata.field(field::GPSLatitude).unwrap();
    assert_eq!(latitude.name, Some("GPSLatitude"));

    let interop = metadata.directory(Ifd::Interoperability).unwrap();
    assert_eq!(interop.fields[0].name, Some("InteropIndex"));
}

#[test]
fn unknown_type_is_skipped() {
    let tiff = Tiff::new(ByteOrder::BigEndian)
        .dir(Dir::new(vec![
            short(0x112, 1),
            Field {
                tag: 0x9999,
                data: Data::Raw {
                    data_type: 0x42,
                    count: 1,
                    bytes: vec![0; 4],
                },
            },
            ascii(0x110, "Model"),
        ]))
        .build();
    let session = Session::new(tiff).unwrap();
    let metadata = session.metadata().unwrap();

    let ifd0 = &metadata.chain[0];
    assert_eq!(ifd0.fields.len(), 2);
    assert_eq!(ifd0.skipped.len(), 1);
    assert_eq!(ifd0.skipped[0].tag, Tag(0x9999));
    assert_eq!(ifd0.skipped[0].reason, SkipReason::UnknownType(0x42));
}

#[test]
fn invalid_pointer_is_skipped() {
    let tiff = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![ascii(0x8769, "nope")]))
        .build();
    let session = Session::new(tiff).unwrap();
    let metadata = session.metadata().unwrap();

    let ifd0 = &metadata.chain[0];
    assert!(ifd0.children.is_empty());
    assert_eq!(ifd0.skipped[0].reason, SkipReason::InvalidPointer);
}

#[test]
fn chain_cycle() {
    let tiff = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![short(0x112, 1)]).next(1))
        .dir(Dir::new(vec![short(0x103, 6)]).next(0))
        .build();
    let session = Session::new(tiff).unwrap();

    let err = session.metadata().unwrap_err();
    assert!(matches!(
        err,
        Error::TraversalLimitExceeded { offset: 8, visited: 2 }
    ));

    let err = session.ifd_offset(Ifd::Chained(2)).unwrap_err();
    assert!(matches!(err, Error::TraversalLimitExceeded { .. }));
}

#[test]
fn sub_ifd_cycle() {
    // Exif IFD points back to itself
    let tiff = Tiff::new(ByteOrder::BigEndian)
        .dir(Dir::new(vec![pointer(0x8769, 1)]))
        .dir(Dir::new(vec![pointer(0x8769, 1)]))
        .build();
    let session = Session::new(tiff).unwrap();

    let err = session.metadata().unwrap_err();
    assert!(matches!(err, Error::TraversalLimitExceeded { .. }));
}

#[test]
fn long_chain() {
    let n = MAX_DIRECTORIES + 1;
    let mut tiff = Tiff::new(ByteOrder::LittleEndian);
    for i in 0..n {
        let mut dir = Dir::new(vec![short(0x112, 1)]);
        if i + 1 < n {
            dir = dir.next(i + 1);
        }
        tiff = tiff.dir(dir);
    }
    let session = Session::new(tiff.build()).unwrap();

    let err = session.metadata().unwrap_err();
    assert!(matches!(
        err,
        Error::TraversalLimitExceeded { visited: MAX_DIRECTORIES, .. }
    ));

    // A chain within the limit is fine
    let mut tiff = Tiff::new(ByteOrder::LittleEndian);
    for i in 0..4 {
        let mut dir = Dir::new(vec![]);
        if i < 3 {
            dir = dir.next(i + 1);
        }
        tiff = tiff.dir(dir);
    }
    let session = Session::new(tiff.build()).unwrap();
    let metadata = session.metadata().unwrap();
    assert_eq!(metadata.chain[3].ifd, Ifd::Chained(3));
}

#[test]
fn debug_dump() {
    let session = Session::new(full_tiff(ByteOrder::BigEndian)).unwrap();
    let dump = session.debug_dump().unwrap();

    assert!(dump.contains("Byte order: BigEndian"));
    assert!(dump.contains("0x010F Make Ascii(6): \"Apple\""));
    assert!(dump.contains("0x829A ExposureTime Rational(1): 1/60"));
    assert!(dump.contains("Gps at "));
}
