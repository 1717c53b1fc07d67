//! Conversions between octet sequences and textual encodings.
//!
//! Addresses live as raw octet sequences, but callers frequently hold hex
//! strings (database dumps, test fixtures) or ASCII bit strings (subnet
//! masks written out in full). This module provides the conversions between
//! those encodings and raw octets. All functions are pure; the fallible
//! ones fail with [`InvalidEncoding`].

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

//------------ Hexadecimal ---------------------------------------------------

/// Converts a hexadecimal string into the octets it describes.
///
/// The input must have an even number of digits since each octet is built
/// from two of them. Upper and lower case digits are both accepted. The
/// empty string yields an empty sequence.
pub fn from_hex(hex: &str) -> Result<Vec<u8>, InvalidEncoding> {
    if hex.len() % 2 != 0 {
        return Err(InvalidEncoding(()));
    }
    hex.as_bytes()
        .chunks(2)
        .map(|pair| Ok(hex_digit(pair[0])? << 4 | hex_digit(pair[1])?))
        .collect()
}

/// Converts an octet sequence into its lowercase hexadecimal notation.
pub fn to_hex(octets: &[u8]) -> String {
    use core::fmt::Write;

    let mut res = String::with_capacity(octets.len() * 2);
    for ch in octets {
        write!(res, "{:02x}", ch).expect("writing to a string");
    }
    res
}

fn hex_digit(ch: u8) -> Result<u8, InvalidEncoding> {
    char::from(ch)
        .to_digit(16)
        .map(|digit| digit as u8)
        .ok_or(InvalidEncoding(()))
}

//------------ Bit Strings ---------------------------------------------------

/// Converts an ASCII bit string into the octets it describes.
///
/// The input may only consist of the characters `0` and `1` and its length
/// must be a multiple of eight, with the first character of each group of
/// eight being the octet’s most significant bit.
pub fn from_bits(bits: &str) -> Result<Vec<u8>, InvalidEncoding> {
    if bits.len() % 8 != 0 {
        return Err(InvalidEncoding(()));
    }
    bits.as_bytes()
        .chunks(8)
        .map(|group| {
            group.iter().try_fold(0u8, |octet, ch| match ch {
                b'0' => Ok(octet << 1),
                b'1' => Ok(octet << 1 | 1),
                _ => Err(InvalidEncoding(())),
            })
        })
        .collect()
}

/// Converts an octet sequence into an ASCII bit string.
///
/// Each octet becomes eight characters, most significant bit first.
pub fn to_bits(octets: &[u8]) -> String {
    use core::fmt::Write;

    let mut res = String::with_capacity(octets.len() * 8);
    for ch in octets {
        write!(res, "{:08b}", ch).expect("writing to a string");
    }
    res
}

//============ Error Types ===================================================

//------------ InvalidEncoding -----------------------------------------------

/// The textual encoding of an octet sequence was malformed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidEncoding(());

impl fmt::Display for InvalidEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid encoding of an octet sequence")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidEncoding {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_round_trip() {
        assert_eq!(from_hex("0c22384e").unwrap(), b"\x0c\x22\x38\x4e");
        assert_eq!(from_hex("0C22384E").unwrap(), b"\x0c\x22\x38\x4e");
        assert_eq!(to_hex(b"\x0c\x22\x38\x4e"), "0c22384e");
        assert_eq!(from_hex("").unwrap(), b"");
        assert_eq!(to_hex(b""), "");
    }

    #[test]
    fn bad_hex() {
        assert!(from_hex("abc").is_err());
        assert!(from_hex("zz").is_err());
        assert!(from_hex("0g").is_err());
        // Multi-byte characters must not sneak through the digit check.
        assert!(from_hex("££").is_err());
    }

    #[test]
    fn bits_round_trip() {
        assert_eq!(from_bits("01111111").unwrap(), b"\x7f");
        assert_eq!(
            from_bits("1111111100000000").unwrap(),
            b"\xff\x00"
        );
        assert_eq!(to_bits(b"\x7f"), "01111111");
        assert_eq!(to_bits(b"\xff\x00"), "1111111100000000");
        assert_eq!(from_bits("").unwrap(), b"");
    }

    #[test]
    fn bad_bits() {
        assert!(from_bits("0101").is_err());
        assert!(from_bits("0101010x").is_err());
        assert!(from_bits("2").is_err());
    }

    #[test]
    fn total_on_any_octets() {
        for value in 0..=u8::MAX {
            let octets = [value];
            assert_eq!(from_hex(&to_hex(&octets)).unwrap(), octets);
            assert_eq!(from_bits(&to_bits(&octets)).unwrap(), octets);
        }
    }
}
