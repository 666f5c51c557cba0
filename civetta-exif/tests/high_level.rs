mod utils;

use civetta_common::orientation::Orientation;
use civetta_exif::Exif;
use utils::*;

fn camera() -> Vec<u8> {
    Tiff::new(ByteOrder::BigEndian)
        .dir(
            Dir::new(vec![
                ascii(0x10F, "Canon"),
                ascii(0x110, "Canon EOS 400D DIGITAL"),
                short(0x112, 8),
                pointer(0x8769, 2),
            ])
            .next(1),
        )
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
        .dir(Dir::new(vec![
            rational(0x829A, 1, 60),
            rational(0x829D, 56, 10),
            short(0x8827, 200),
            ascii(0x9003, "2007:10:19 19:57:06"),
            ascii(0x9011, "+02:00"),
            ascii(0x9291, "25"),
            rational(0x920A, 53, 1),
        ]))
        .blob(thumbnail_jpeg())
        .build()
}

#[test]
fn canon() {
    let exif = Exif::new(camera()).unwrap();

    assert_eq!(exif.make().unwrap().as_str(), "Canon");
    assert_eq!(exif.model().unwrap().as_str(), "Canon EOS 400D DIGITAL");
    assert_eq!(exif.orientation(), Orientation::Rotation90);
    assert_eq!(exif.iso_speed_rating().unwrap(), 200);
    assert_eq!(exif.f_number().unwrap(), 5.6);
    assert_eq!(exif.focal_length().unwrap(), 53.);
    assert_eq!(exif.exposure_time().unwrap(), Rational::new(1, 60));
    assert_eq!(
        exif.date_time_original().unwrap(),
        "2007-10-19T19:57:06.25+02:00"
    );
    assert_eq!(exif.thumbnail(), Some(thumbnail_jpeg().as_slice()));
}

#[test]
fn from_jpeg() {
    let jpeg = jpeg_with_exif(&camera());
    let exif = Exif::open(jpeg.as_slice()).unwrap().unwrap();

    assert_eq!(exif.model().unwrap().as_str(), "Canon EOS 400D DIGITAL");
    eprintln!("{}", exif.debug_dump().unwrap());
}

#[test]
fn minimal() {
    let tiff = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![]))
        .build();
    let exif = Exif::new(tiff).unwrap();

    assert_eq!(exif.orientation(), Orientation::Id);
    assert_eq!(exif.make(), None);
    assert_eq!(exif.f_number(), None);
    assert_eq!(exif.date_time_original(), None);
    assert_eq!(exif.thumbnail(), None);
}

#[test]
fn invalid_orientation() {
    let tiff = Tiff::new(ByteOrder::LittleEndian)
        .dir(Dir::new(vec![short(0x112, 9)]))
        .build();
    let exif = Exif::new(tiff).unwrap();

    assert_eq!(exif.orientation(), Orientation::Id);
}
