macro_rules! make_tags {
    ($($(#[$($attrss:tt)*])*($tag:literal, $id:ident, $ifd:expr)),*$(,)?) => {
        $(
            $(#[$($attrss)*])*
            #[derive(Copy, Clone, Debug)]
            pub struct $id;

            impl $crate::exif::Field for $id {
                const NAME: &'static str = stringify!($id);
                const TAG: $crate::exif::Tag = $crate::exif::Tag($tag);
                const IFD: Ifd = $ifd;
            }
        )*
    };
}

pub(crate) use make_tags;
