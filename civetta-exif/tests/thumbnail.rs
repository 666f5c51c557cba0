mod utils;

use civetta_exif::{Error, ErrorKind, Session};
use utils::*;

#[test]
fn apple_thumbnail() {
    let thumbnail = thumbnail_jpeg();

    for byte_order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        let tiff = apple_tiff(byte_order, thumbnail.clone());
        let session = Session::new(tiff).unwrap();

        let result = session.extract_thumbnail().unwrap();
        assert_eq!(result.orientation, Some(6));
        assert_eq!(result.data, Some(thumbnail.as_slice()));
    }
}

#[test]
fn thumbnail_from_jpeg() {
    let thumbnail = thumbnail_jpeg();
    let jpeg = jpeg_with_exif(&apple_tiff(ByteOrder::BigEndian, thumbnail.clone()));

    let session = Session::open(jpeg.as_slice()).unwrap().unwrap();
    let result = session.extract_thumbnail().unwrap();

    assert_eq!(result.data, Some(thumbnail.as_slice()));
    assert!(result.data.unwrap().starts_with(&[0xFF, 0xD8]));
}

#[test]
fn no_ifd1() {
    let tiff = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![short(0x112, 1)]))
        .build();
    let session = Session::new(tiff).unwrap();

    let result = session.extract_thumbnail().unwrap();
    assert_eq!(result.orientation, Some(1));
    assert_eq!(result.data, None);
    assert_eq!(session.thumbnail_ref().unwrap(), None);
}

#[test]
fn no_orientation() {
    let tiff = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![ascii(0x10F, "Canon")]))
        .build();
    let session = Session::new(tiff).unwrap();

    let result = session.extract_thumbnail().unwrap();
    assert_eq!(result.orientation, None);
}

#[test]
fn thumbnail_out_of_bounds() {
    let tiff = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![short(0x112, 1)]).next(1))
        .dir(Dir::new(vec![
            short(0x103, 6),
            long(0x201, 40),
            long(0x202, 10_000),
        ]))
        .build();
    let session = Session::new(tiff).unwrap();

    let err = session.extract_thumbnail().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);

    // The location itself can still be read
    let thumbnail = session.thumbnail_ref().unwrap().unwrap();
    assert_eq!(thumbnail.offset, 40);
    assert_eq!(thumbnail.length, 10_000);
}

#[test]
fn offset_overflow() {
    let tiff = Tiff::new(ByteOrder::BigEndian)
        .dir(Dir::new(vec![]).next(1))
        .dir(Dir::new(vec![
            short(0x103, 6),
            long(0x201, u32::MAX - 1),
            long(0x202, u32::MAX),
        ]))
        .build();
    let session = Session::new(tiff).unwrap();

    let err = session.extract_thumbnail().unwrap_err();
    assert!(matches!(err, Error::OutOfBounds { .. }));
}

#[test]
fn uncompressed_thumbnail() {
    let tiff = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![]).next(1))
        .dir(Dir::new(vec![short(0x103, 1)]))
        .build();
    let session = Session::new(tiff).unwrap();

    let err = session.extract_thumbnail().unwrap_err();
    assert!(matches!(err, Error::UnsupportedCompression(1)));
}

#[test]
fn missing_compression() {
    let tiff = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![]).next(1))
        .dir(Dir::new(vec![long(0x201, 8), long(0x202, 4)]))
        .build();
    let session = Session::new(tiff).unwrap();

    let err = session.extract_thumbnail().unwrap_err();
    let Error::MissingTag(tagifd) = err else {
        panic!("Unexpected error {err:?}");
    };
    assert_eq!(tagifd, TagIfd::new(Tag(0x103), Ifd::Thumbnail));
}

#[test]
fn missing_or_zero_length() {
    let missing = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![]).next(1))
        .dir(Dir::new(vec![short(0x103, 6), long(0x201, 8)]))
        .build();

    let zero = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![]).next(1))
        .dir(Dir::new(vec![short(0x103, 6), long(0x201, 8), short(0x202, 0)]))
        .build();

    for tiff in [missing, zero] {
        let session = Session::new(tiff).unwrap();
        let err = session.extract_thumbnail().unwrap_err();
        assert!(
            matches!(err, Error::MissingTag(tagifd) if tagifd.tag == Tag(0x202)),
            "{err:?}"
        );
    }
}

#[test]
fn short_offset_and_length() {
    let tiff = Tiff::new(ByteOrder::BigEndian)
        .dir(Dir::new(vec![]).next(1))
        .dir(Dir::new(vec![short(0x103, 6), short(0x201, 8), short(0x202, 2)]))
        .build();
    let session = Session::new(tiff).unwrap();

    let result = session.extract_thumbnail().unwrap();
    // The two bytes are the entry count of IFD0
    assert_eq!(result.data, Some([0, 0].as_slice()));
}

#[test]
fn wrong_orientation_type() {
    let tiff = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![long(0x112, 6)]))
        .build();
    let session = Session::new(tiff).unwrap();

    let err = session.extract_thumbnail().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::WrongType);
}

#[test]
fn ifd1_points_to_ifd0() {
    let tiff = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![short(0x112, 1)]).next(0))
        .build();
    let session = Session::new(tiff).unwrap();

    let err = session.extract_thumbnail().unwrap_err();
    assert!(matches!(
        err,
        Error::TraversalLimitExceeded { offset: 8, .. }
    ));
}

#[test]
fn repeated_compression_uses_first() {
    let tiff = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![]).next(1))
        .dir(Dir::new(vec![
            short(0x103, 1),
            short(0x103, 6),
            long(0x201, 8),
            long(0x202, 2),
        ]))
        .build();
    let session = Session::new(tiff).unwrap();

    let err = session.extract_thumbnail().unwrap_err();
    assert!(matches!(err, Error::UnsupportedCompression(1)));
}
