use std::fmt;
use std::marker::PhantomData;

use civetta_common::math::SafeDiv;

use super::{ByteOrder, Type};
use crate::error::{Error, Result};

/// A single element of a value that can be decoded from bytes
pub trait Element: Copy + 'static {
    const SIZE: usize;

    /// Decodes `bytes` of exactly [`Self::SIZE`] length
    fn decode(bytes: &[u8], byte_order: ByteOrder) -> Option<Self>;
}

macro_rules! impl_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                fn decode(bytes: &[u8], byte_order: ByteOrder) -> Option<Self> {
                    let bytes = bytes.try_into().ok()?;
                    Some(match byte_order {
                        ByteOrder::LittleEndian => <$t>::from_le_bytes(bytes),
                        ByteOrder::BigEndian => <$t>::from_be_bytes(bytes),
                    })
                }
            }
        )*
    };
}

impl_element!(u8, i8, u16, i16, u32, i32, f32, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Fails for a zero denominator
    pub fn to_f64(self) -> Result<f64> {
        Ok(f64::from(self.numerator).safe_div(f64::from(self.denominator))?)
    }
}

impl Element for Rational {
    const SIZE: usize = 8;

    fn decode(bytes: &[u8], byte_order: ByteOrder) -> Option<Self> {
        let (numerator, denominator) = bytes.split_at_checked(4)?;
        Some(Self {
            numerator: u32::decode(numerator, byte_order)?,
            denominator: u32::decode(denominator, byte_order)?,
        })
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl SRational {
    pub fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Fails for a zero denominator
    pub fn to_f64(self) -> Result<f64> {
        Ok(f64::from(self.numerator).safe_div(f64::from(self.denominator))?)
    }
}

impl Element for SRational {
    const SIZE: usize = 8;

    fn decode(bytes: &[u8], byte_order: ByteOrder) -> Option<Self> {
        let (numerator, denominator) = bytes.split_at_checked(4)?;
        Some(Self {
            numerator: i32::decode(numerator, byte_order)?,
            denominator: i32::decode(denominator, byte_order)?,
        })
    }
}

impl fmt::Display for SRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Borrowed sequence of elements, decoded on access
///
/// ```
/// # use civetta_exif::internal::{ByteOrder, Elements};
/// let data = [0x00, 0x06, 0x00, 0x01];
/// let shorts = Elements::<u16>::new(&data, ByteOrder::BigEndian);
///
/// assert_eq!(shorts.len(), 2);
/// assert_eq!(shorts.first(), Some(6));
/// assert_eq!(shorts.to_vec(), vec![6, 1]);
/// ```
#[derive(Clone, Copy)]
pub struct Elements<'a, T> {
    data: &'a [u8],
    byte_order: ByteOrder,
    _element: PhantomData<T>,
}

impl<'a, T: Element> Elements<'a, T> {
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self {
            data,
            byte_order,
            _element: PhantomData,
        }
    }

    /// Number of complete elements
    pub fn len(&self) -> usize {
        self.data.chunks_exact(T::SIZE).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<T> {
        let bytes = self.data.chunks_exact(T::SIZE).nth(index)?;
        T::decode(bytes, self.byte_order)
    }

    pub fn first(&self) -> Option<T> {
        self.get(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        let byte_order = self.byte_order;
        self.data
            .chunks_exact(T::SIZE)
            .filter_map(move |bytes| T::decode(bytes, byte_order))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Raw bytes in file byte order
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

impl<T: Element + fmt::Debug> fmt::Debug for Elements<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Element + PartialEq> PartialEq for Elements<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

/// Decoded value of an entry
///
/// All variants borrow the Exif data they were decoded from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Byte(Elements<'a, u8>),
    /// Raw bytes, including the terminating NUL
    Ascii(&'a [u8]),
    Short(Elements<'a, u16>),
    Long(Elements<'a, u32>),
    Rational(Elements<'a, Rational>),
    SByte(Elements<'a, i8>),
    Undefined(&'a [u8]),
    SShort(Elements<'a, i16>),
    SLong(Elements<'a, i32>),
    SRational(Elements<'a, SRational>),
    Float(Elements<'a, f32>),
    Double(Elements<'a, f64>),
}

impl<'a> Value<'a> {
    /// Interprets `data` as values of `data_type`
    pub fn from_bytes(data_type: Type, data: &'a [u8], byte_order: ByteOrder) -> Result<Self> {
        Ok(match data_type {
            Type::Byte => Self::Byte(Elements::new(data, byte_order)),
            Type::Ascii => Self::Ascii(data),
            Type::Short => Self::Short(Elements::new(data, byte_order)),
            Type::Long => Self::Long(Elements::new(data, byte_order)),
            Type::Rational => Self::Rational(Elements::new(data, byte_order)),
            Type::SByte => Self::SByte(Elements::new(data, byte_order)),
            Type::Undefined => Self::Undefined(data),
            Type::SShort => Self::SShort(Elements::new(data, byte_order)),
            Type::SLong => Self::SLong(Elements::new(data, byte_order)),
            Type::SRational => Self::SRational(Elements::new(data, byte_order)),
            Type::Float => Self::Float(Elements::new(data, byte_order)),
            Type::Double => Self::Double(Elements::new(data, byte_order)),
            Type::Unknown(code) => return Err(Error::UnknownType(code)),
        })
    }

    pub fn data_type(&self) -> Type {
        match self {
            Self::Byte(_) => Type::Byte,
            Self::Ascii(_) => Type::Ascii,
            Self::Short(_) => Type::Short,
            Self::Long(_) => Type::Long,
            Self::Rational(_) => Type::Rational,
            Self::SByte(_) => Type::SByte,
            Self::Undefined(_) => Type::Undefined,
            Self::SShort(_) => Type::SShort,
            Self::SLong(_) => Type::SLong,
            Self::SRational(_) => Type::SRational,
            Self::Float(_) => Type::Float,
            Self::Double(_) => Type::Double,
        }
    }

    /// Raw bytes in file byte order
    pub fn as_bytes(&self) -> &'a [u8] {
        match self {
            Self::Ascii(data) | Self::Undefined(data) => data,
            Self::Byte(v) => v.as_bytes(),
            Self::Short(v) => v.as_bytes(),
            Self::Long(v) => v.as_bytes(),
            Self::Rational(v) => v.as_bytes(),
            Self::SByte(v) => v.as_bytes(),
            Self::SShort(v) => v.as_bytes(),
            Self::SLong(v) => v.as_bytes(),
            Self::SRational(v) => v.as_bytes(),
            Self::Float(v) => v.as_bytes(),
            Self::Double(v) => v.as_bytes(),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            Self::Ascii(data) | Self::Undefined(data) => data.len(),
            Self::Byte(v) => v.len(),
            Self::Short(v) => v.len(),
            Self::Long(v) => v.len(),
            Self::Rational(v) => v.len(),
            Self::SByte(v) => v.len(),
            Self::SShort(v) => v.len(),
            Self::SLong(v) => v.len(),
            Self::SRational(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Single `SHORT` or `LONG` value
    ///
    /// Offsets and lengths are stored as either type.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Short(v) if v.len() == 1 => v.first().map(u32::from),
            Self::Long(v) if v.len() == 1 => v.first(),
            _ => None,
        }
    }

    /// `ASCII` bytes up to the first NUL
    pub fn as_ascii(&self) -> Option<&'a [u8]> {
        if let Self::Ascii(data) = self {
            let end = data.iter().position(|x| *x == 0).unwrap_or(data.len());
            data.get(..end)
        } else {
            None
        }
    }

    /// `ASCII` value as string, invalid UTF-8 is replaced
    pub fn as_string(&self) -> Option<String> {
        self.as_ascii()
            .map(|x| String::from_utf8_lossy(x).into_owned())
    }
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: impl Iterator<Item = T>) -> fmt::Result {
    for (i, value) in values.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascii(_) => write!(f, "{:?}", self.as_string().unwrap_or_default()),
            Self::Undefined(data) => write!(f, "<{} bytes>", data.len()),
            Self::Byte(v) => join(f, v.iter()),
            Self::Short(v) => join(f, v.iter()),
            Self::Long(v) => join(f, v.iter()),
            Self::Rational(v) => join(f, v.iter()),
            Self::SByte(v) => join(f, v.iter()),
            Self::SShort(v) => join(f, v.iter()),
            Self::SLong(v) => join(f, v.iter()),
            Self::SRational(v) => join(f, v.iter()),
            Self::Float(v) => join(f, v.iter()),
            Self::Double(v) => join(f, v.iter()),
        }
    }
}
