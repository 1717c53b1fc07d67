//! Protocol notation for octet sequences.
//!
//! This module converts between the fixed-length binary form of an address
//! and its textual protocol notation: dotted-quad for 4 octet sequences and
//! colon-separated hextets for 16 octet sequences. Parsing of text defers
//! to the address grammar of [`core::net`] rather than a hand-rolled one;
//! rendering is done here because the one in `core` switches to embedded
//! dotted notation for some version 6 addresses while we always want plain
//! hextets, whatever the octets are.

use alloc::string::String;
use core::fmt::{self, Write};
use core::net::IpAddr;
use core::str::FromStr;

/// The shortest run of zero hextets that gets compacted to `::`.
///
/// RFC 5952 would demand 2 here – a single zero hextet stays written out –
/// but the renderer has always compacted every zero run for the shortest
/// possible output, so the policy is kept at 1.
pub const MIN_COMPACT_RUN: usize = 1;

//------------ Parsed --------------------------------------------------------

/// An octet sequence freshly parsed from notation or binary input.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Parsed {
    /// A 4 octet sequence.
    V4([u8; 4]),

    /// A 16 octet sequence.
    V6([u8; 16]),
}

impl Parsed {
    /// Returns a reference to the octets of the sequence.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Parsed::V4(octets) => octets,
            Parsed::V6(octets) => octets,
        }
    }

    /// Returns the length of the sequence in octets.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns whether the sequence is empty. It never is.
    pub fn is_empty(&self) -> bool {
        false
    }
}

//------------ Parsing -------------------------------------------------------

/// Parses protocol notation into the octet sequence it describes.
///
/// Accepts standard dotted-quad notation for version 4 addresses and
/// standard colon-hex notation for version 6 addresses, as validated by
/// the [`core::net`] address parser. Anything else fails with
/// [`FormatError`].
pub fn parse(text: &str) -> Result<Parsed, FormatError> {
    match IpAddr::from_str(text) {
        Ok(IpAddr::V4(addr)) => Ok(Parsed::V4(addr.octets())),
        Ok(IpAddr::V6(addr)) => Ok(Parsed::V6(addr.octets())),
        Err(_) => Err(FormatError::Malformed),
    }
}

/// Passes an already-binary sequence through unchanged.
///
/// The binary counterpart of [`parse`]: a 4 or 16 octet sequence is
/// returned as-is, any other length fails with [`FormatError`].
pub fn parse_slice(octets: &[u8]) -> Result<Parsed, FormatError> {
    if let Ok(octets) = <[u8; 4]>::try_from(octets) {
        Ok(Parsed::V4(octets))
    } else if let Ok(octets) = <[u8; 16]>::try_from(octets) {
        Ok(Parsed::V6(octets))
    } else {
        Err(FormatError::Length(octets.len()))
    }
}

//------------ Rendering -----------------------------------------------------

/// Renders an octet sequence in its canonical protocol notation.
///
/// A 4 octet sequence renders as dotted-quad. A 16 octet sequence renders
/// as lowercase hextets with the longest run of zero hextets compacted to
/// `::` – ties go to the leftmost run. Any other length fails with
/// [`FormatError`].
pub fn render(octets: &[u8]) -> Result<String, FormatError> {
    match parse_slice(octets)? {
        Parsed::V4(octets) => Ok(dotted(&octets)),
        Parsed::V6(octets) => Ok(compacted(&octets)),
    }
}

/// Renders an octet sequence without compaction.
///
/// A 16 octet sequence renders as eight colon-separated hextets, each zero
/// padded to four digits. A 4 octet sequence has no expanded form and
/// renders as dotted-quad.
pub fn render_expanded(octets: &[u8]) -> Result<String, FormatError> {
    match parse_slice(octets)? {
        Parsed::V4(octets) => Ok(dotted(&octets)),
        Parsed::V6(octets) => Ok(expanded(&octets)),
    }
}

/// Renders 4 octets as dotted-quad.
pub(crate) fn dotted(octets: &[u8; 4]) -> String {
    format!(
        "{}.{}.{}.{}",
        octets[0], octets[1], octets[2], octets[3]
    )
}

/// Renders 16 octets as compacted lowercase hextet notation.
pub(crate) fn compacted(octets: &[u8; 16]) -> String {
    let hextets = hextets(octets);
    let (at, len) = longest_zero_run(&hextets);
    let mut res = String::with_capacity(39);
    if len >= MIN_COMPACT_RUN {
        join(&mut res, &hextets[..at]);
        res.push_str("::");
        join(&mut res, &hextets[at + len..]);
    } else {
        join(&mut res, &hextets);
    }
    res
}

/// Renders 16 octets as expanded hextet notation.
pub(crate) fn expanded(octets: &[u8; 16]) -> String {
    let mut res = String::with_capacity(39);
    for (i, hextet) in hextets(octets).iter().enumerate() {
        if i > 0 {
            res.push(':');
        }
        write!(res, "{:04x}", hextet).expect("writing to a string");
    }
    res
}

/// Splits 16 octets into their eight hextets.
fn hextets(octets: &[u8; 16]) -> [u16; 8] {
    let mut res = [0u16; 8];
    for (i, hextet) in res.iter_mut().enumerate() {
        *hextet = u16::from_be_bytes([octets[2 * i], octets[2 * i + 1]]);
    }
    res
}

/// Finds the longest run of zero hextets as its position and length.
///
/// A later run only wins if it is strictly longer, so ties go to the
/// leftmost run. Returns a length of zero if there are no zero hextets.
fn longest_zero_run(hextets: &[u16; 8]) -> (usize, usize) {
    let mut longest = (0, 0);
    let mut current = (0, 0);
    for (i, hextet) in hextets.iter().enumerate() {
        if *hextet == 0 {
            if current.1 == 0 {
                current.0 = i;
            }
            current.1 += 1;
            if current.1 > longest.1 {
                longest = current;
            }
        } else {
            current = (0, 0);
        }
    }
    longest
}

/// Appends hextets to a string, stripping leading zero digits.
fn join(target: &mut String, hextets: &[u16]) {
    for (i, hextet) in hextets.iter().enumerate() {
        if i > 0 {
            target.push(':');
        }
        write!(target, "{:x}", hextet).expect("writing to a string");
    }
}

//============ Error Types ===================================================

//------------ FormatError ---------------------------------------------------

/// An octet sequence or protocol notation couldn’t be converted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormatError {
    /// Text input wasn’t valid protocol notation of either version.
    Malformed,

    /// Binary input had a length other than 4 or 16 octets.
    Length(usize),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatError::Malformed => {
                f.write_str("invalid IP address notation")
            }
            FormatError::Length(len) => {
                write!(
                    f,
                    "invalid binary sequence of {} octets; \
                     expected 4 or 16",
                    len
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}

//============ Testing =======================================================
