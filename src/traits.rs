//! The trait shared by all address types and the version number.

use crate::cidr::{self, InvalidCidrError};
use crate::error::WrongVersionError;
use crate::strategy::Embedding;
use core::fmt;

//------------ Version -------------------------------------------------------

/// The version of the Internet Protocol an address belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Version {
    /// Version 4: addresses are 4 octets long.
    V4,

    /// Version 6: addresses are 16 octets long.
    V6,
}

impl Version {
    /// Returns the version as its protocol number, 4 or 6.
    pub fn number(self) -> u8 {
        match self {
            Version::V4 => 4,
            Version::V6 => 6,
        }
    }
}

//--- Display

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

//------------ Address -------------------------------------------------------

/// An immutable IP address value held as a fixed-length octet sequence.
///
/// The trait collects the operations every concrete address type provides:
/// access to the stored octets, CIDR arithmetic, range containment, and
/// the structural tests for the three IPv4-in-IPv6 embedding layouts. The
/// provided methods implement everything that can be derived from the
/// octets alone; the concrete types implement the rest, with
/// [`Multi`][crate::multi::Multi] replacing the containment logic with its
/// version-aware variant.
pub trait Address: Sized {
    /// Returns a reference to the address’ octet sequence.
    ///
    /// The returned slice is always exactly 4 or 16 octets long.
    fn as_slice(&self) -> &[u8];

    /// Returns the IP version the address resolves to.
    fn version(&self) -> Version;

    /// Returns the network address for the given CIDR.
    ///
    /// This is the address with all bits outside the network mask cleared.
    fn network(&self, cidr: u32) -> Result<Self, InvalidCidrError>;

    /// Returns the broadcast address for the given CIDR.
    ///
    /// This is the address with all bits outside the network mask set.
    fn broadcast(&self, cidr: u32) -> Result<Self, InvalidCidrError>;

    /// Returns whether the address resolves to the given version.
    fn is_version(&self, version: Version) -> bool {
        self.version() == version
    }

    /// Returns whether both addresses sit in the same CIDR-sized network.
    ///
    /// An out-of-range CIDR makes this `false` rather than an error:
    /// containment is a question, not an operation that can half-succeed.
    fn in_range(&self, other: &Self, cidr: u32) -> bool {
        match (self.network(cidr), other.network(cidr)) {
            (Ok(this), Ok(other)) => this.as_slice() == other.as_slice(),
            _ => false,
        }
    }

    /// Returns the greatest CIDR for which both addresses share a network.
    ///
    /// Addresses of different versions or byte lengths have no common
    /// network and fail with [`WrongVersionError`].
    fn common_cidr(
        &self,
        other: &Self,
    ) -> Result<u32, WrongVersionError> {
        if self.version() != other.version()
            || self.as_slice().len() != other.as_slice().len()
        {
            return Err(WrongVersionError::new(
                self.version(),
                other.version(),
            ));
        }
        Ok(cidr::common_prefix(self.as_slice(), other.as_slice()))
    }

    /// Returns whether the stored octets are an IPv4-mapped sequence.
    ///
    /// Like the other two structural tests this checks the octets
    /// themselves, independent of any strategy the value was constructed
    /// with.
    fn is_mapped(&self) -> bool {
        Embedding::Mapped.is_embedded(self.as_slice())
    }

    /// Returns whether the stored octets are a 6to4-derived sequence.
    fn is_derived(&self) -> bool {
        Embedding::Derived.is_embedded(self.as_slice())
    }

    /// Returns whether the stored octets are an IPv4-compatible sequence.
    fn is_compatible(&self) -> bool {
        Embedding::Compatible.is_embedded(self.as_slice())
    }

    /// Returns whether the address embeds a version 4 address.
    ///
    /// For the fixed-version types this is always `false`; only
    /// [`Multi`][crate::multi::Multi] carries a strategy to test against.
    fn is_embedded(&self) -> bool {
        false
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn version_numbers() {
        assert_eq!(Version::V4.number(), 4);
        assert_eq!(Version::V6.number(), 6);
        assert_eq!(format!("{}", Version::V4), "4");
        assert_eq!(format!("{}", Version::V6), "6");
    }
}
