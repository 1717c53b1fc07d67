//! CIDR masks and the bit arithmetic driven by them.
//!
//! A CIDR value counts the leading one-bits of a subnet mask. For a 4 octet
//! address it ranges from 0 to 32, for a 16 octet address from 0 to 128.
//! This module generates masks from CIDR values and applies them to octet
//! sequences; the address types build their network and broadcast addresses
//! and their range containment on top of these functions.

use core::fmt;

//------------ Mask Generation -----------------------------------------------

/// Generates the subnet mask for a CIDR value.
///
/// The mask consists of `cidr` leading one-bits followed by zero-bits for a
/// total of `N` octets. It is assembled nibble by nibble – four one-bits at
/// a time, then one partial nibble for up to three leftover bits – so the
/// construction never touches an integer wider than a byte, no matter that
/// a 16 octet mask would overflow every native integer type.
///
/// A CIDR greater than `N * 8` fails with [`InvalidCidrError`] before any
/// bit manipulation occurs.
pub fn mask<const N: usize>(cidr: u32) -> Result<[u8; N], InvalidCidrError> {
    if cidr as usize > N * 8 {
        return Err(InvalidCidrError { cidr, octets: N });
    }
    let mut res = [0u8; N];
    let full = (cidr / 4) as usize;
    for nibble in 0..full {
        res[nibble / 2] |= 0xf << (4 - 4 * (nibble % 2));
    }
    if cidr % 4 != 0 {
        // The partial nibble: between one and three leading one-bits.
        let partial = (0xf0 >> (cidr % 4)) & 0xf;
        res[full / 2] |= partial << (4 - 4 * (full % 2));
    }
    Ok(res)
}

//------------ Mask Application ----------------------------------------------

/// Returns the network address: the octets ANDed with the mask.
pub fn network<const N: usize>(
    octets: &[u8; N],
    cidr: u32,
) -> Result<[u8; N], InvalidCidrError> {
    let mut res = mask::<N>(cidr)?;
    for (masked, octet) in res.iter_mut().zip(octets) {
        *masked &= octet;
    }
    Ok(res)
}

/// Returns the broadcast address: the octets ORed with the inverted mask.
pub fn broadcast<const N: usize>(
    octets: &[u8; N],
    cidr: u32,
) -> Result<[u8; N], InvalidCidrError> {
    let mut res = mask::<N>(cidr)?;
    for (masked, octet) in res.iter_mut().zip(octets) {
        *masked = octet | !*masked;
    }
    Ok(res)
}

/// Returns the number of leading bits two equal-length sequences share.
///
/// This is the greatest CIDR value for which both sequences sit in the same
/// network.
pub fn common_prefix(left: &[u8], right: &[u8]) -> u32 {
    let mut res = 0;
    for (this, other) in left.iter().zip(right) {
        let diff = this ^ other;
        res += diff.leading_zeros();
        if diff != 0 {
            break;
        }
    }
    res
}

//============ Error Types ===================================================

//------------ InvalidCidrError ----------------------------------------------

/// A CIDR value was out of range for the address it was applied to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidCidrError {
    cidr: u32,
    octets: usize,
}

impl InvalidCidrError {
    /// Returns the offending CIDR value.
    pub fn cidr(&self) -> u32 {
        self.cidr
    }

    /// Returns the length in octets of the address the CIDR was meant for.
    pub fn octets(&self) -> usize {
        self.octets
    }
}

impl fmt::Display for InvalidCidrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "invalid CIDR value {}; must be between 0 and {}",
            self.cidr,
            self.octets * 8
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidCidrError {}

//============ Testing =======================================================
