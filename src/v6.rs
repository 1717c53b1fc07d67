//! Version 6 addresses.

use crate::cidr::{self, InvalidCidrError};
use crate::error::{InvalidAddressError, WrongVersionError};
use crate::formatter::{self, Parsed};
use crate::traits::{Address, Version};
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

//------------ Ipv6 ----------------------------------------------------------

/// A version 6 address: an immutable sequence of exactly 16 octets.
///
/// Values are created from colon-hex notation via [`FromStr`], from raw
/// octets via `From<[u8; 16]>` or `From<[u16; 8]>`, or from a slice of
/// unknown length via `TryFrom<&[u8]>`. Sequences that happen to match one
/// of the IPv4-in-IPv6 embedding layouts are perfectly fine version 6
/// addresses – the structural tests [`is_mapped`][Address::is_mapped] and
/// friends report the match, nothing rejects it.
///
/// ```
/// use ipbin::{Address, Ipv6};
///
/// let addr: Ipv6 = "2001:db8::1".parse()?;
/// assert_eq!(addr.to_compacted(), "2001:db8::1");
/// assert_eq!(
///     addr.to_expanded(),
///     "2001:0db8:0000:0000:0000:0000:0000:0001",
/// );
/// assert!(addr.is_documentation());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ipv6([u8; 16]);

impl Ipv6 {
    /// Creates a new address from its eight hextets.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        a: u16,
        b: u16,
        c: u16,
        d: u16,
        e: u16,
        f: u16,
        g: u16,
        h: u16,
    ) -> Self {
        let hextets = [a, b, c, d, e, f, g, h];
        let mut octets = [0u8; 16];
        let mut i = 0;
        while i < 8 {
            octets[2 * i] = (hextets[i] >> 8) as u8;
            octets[2 * i + 1] = hextets[i] as u8;
            i += 1;
        }
        Self(octets)
    }

    /// Returns the octets of the address.
    pub const fn octets(&self) -> [u8; 16] {
        self.0
    }

    /// Returns the eight hextets of the address.
    pub fn hextets(&self) -> [u16; 8] {
        let mut res = [0u16; 8];
        for (i, hextet) in res.iter_mut().enumerate() {
            *hextet = u16::from_be_bytes([
                self.0[2 * i],
                self.0[2 * i + 1],
            ]);
        }
        res
    }

    /// Returns the address in compacted notation.
    ///
    /// The longest run of zero hextets collapses into `::`.
    pub fn to_compacted(&self) -> String {
        formatter::compacted(&self.0)
    }

    /// Returns the address in expanded notation.
    ///
    /// All eight hextets are written out, zero padded to four digits.
    pub fn to_expanded(&self) -> String {
        formatter::expanded(&self.0)
    }

    /// Returns whether the address and a literal share a network.
    fn in_net(&self, net: Ipv6, cidr: u32) -> bool {
        self.in_range(&net, cidr)
    }
}

/// # Classification
///
/// Each predicate checks the address against the well-known networks the
/// referenced RFC reserves for the category.
impl Ipv6 {
    /// Returns whether this is the loopback address `::1` (RFC 2373).
    pub fn is_loopback(&self) -> bool {
        self.in_net(Ipv6::new(0, 0, 0, 0, 0, 0, 0, 1), 128)
    }

    /// Returns whether this is a link-local address (RFC 4291).
    pub fn is_link_local(&self) -> bool {
        self.in_net(Ipv6::new(0xfe80, 0, 0, 0, 0, 0, 0, 0), 10)
    }

    /// Returns whether this is a multicast address (RFC 2373).
    pub fn is_multicast(&self) -> bool {
        self.in_net(Ipv6::new(0xff00, 0, 0, 0, 0, 0, 0, 0), 8)
    }

    /// Returns whether this is a private use address (RFC 4193).
    ///
    /// This is the locally-assigned half of the unique local block, the
    /// only half RFC 4193 actually defines a meaning for.
    pub fn is_private_use(&self) -> bool {
        self.in_net(Ipv6::new(0xfd00, 0, 0, 0, 0, 0, 0, 0), 8)
    }

    /// Returns whether this is a unique local address (RFC 4193).
    pub fn is_unique_local(&self) -> bool {
        self.in_net(Ipv6::new(0xfc00, 0, 0, 0, 0, 0, 0, 0), 7)
    }

    /// Returns whether this is the unspecified address `::`.
    pub fn is_unspecified(&self) -> bool {
        self.0 == [0; 16]
    }

    /// Returns whether this address is reserved for documentation
    /// (RFC 3849).
    pub fn is_documentation(&self) -> bool {
        self.in_net(Ipv6::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0), 32)
    }

    /// Returns whether this address is reserved for network device
    /// benchmarking (RFC 5180).
    pub fn is_benchmarking(&self) -> bool {
        self.in_net(Ipv6::new(0x2001, 0x2, 0, 0, 0, 0, 0, 0), 48)
    }

    /// Returns whether this is a global unicast address (RFC 4291).
    pub fn is_global_unicast(&self) -> bool {
        self.in_net(Ipv6::new(0x2000, 0, 0, 0, 0, 0, 0, 0), 3)
    }

    /// Returns whether this address appears to be globally routable.
    ///
    /// This is the global unicast block minus the documentation and
    /// benchmarking ranges carved out of it.
    pub fn is_public_use(&self) -> bool {
        self.is_global_unicast()
            && !self.is_documentation()
            && !self.is_benchmarking()
    }
}

//--- Address

impl Address for Ipv6 {
    fn as_slice(&self) -> &[u8] {
        &self.0
    }

    fn version(&self) -> Version {
        Version::V6
    }

    fn network(&self, cidr: u32) -> Result<Self, InvalidCidrError> {
        cidr::network(&self.0, cidr).map(Self)
    }

    fn broadcast(&self, cidr: u32) -> Result<Self, InvalidCidrError> {
        cidr::broadcast(&self.0, cidr).map(Self)
    }
}

//--- From, TryFrom, and FromStr

impl From<[u8; 16]> for Ipv6 {
    fn from(octets: [u8; 16]) -> Self {
        Self(octets)
    }
}

impl From<Ipv6> for [u8; 16] {
    fn from(addr: Ipv6) -> Self {
        addr.0
    }
}

impl From<[u16; 8]> for Ipv6 {
    fn from(hextets: [u16; 8]) -> Self {
        Self::new(
            hextets[0], hextets[1], hextets[2], hextets[3], hextets[4],
            hextets[5], hextets[6], hextets[7],
        )
    }
}

impl From<core::net::Ipv6Addr> for Ipv6 {
    fn from(addr: core::net::Ipv6Addr) -> Self {
        Self(addr.octets())
    }
}

impl From<Ipv6> for core::net::Ipv6Addr {
    fn from(addr: Ipv6) -> Self {
        addr.0.into()
    }
}

impl TryFrom<&[u8]> for Ipv6 {
    type Error = InvalidAddressError;

    fn try_from(octets: &[u8]) -> Result<Self, Self::Error> {
        match formatter::parse_slice(octets) {
            Ok(Parsed::V6(octets)) => Ok(Self(octets)),
            Ok(Parsed::V4(_)) => Err(WrongVersionError::new(
                Version::V6,
                Version::V4,
            )
            .into()),
            Err(_) => Err(InvalidAddressError::unrecognized(
                crate::binary::to_hex(octets),
            )),
        }
    }
}

impl FromStr for Ipv6 {
    type Err = InvalidAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match formatter::parse(s) {
            Ok(Parsed::V6(octets)) => Ok(Self(octets)),
            Ok(Parsed::V4(_)) => Err(WrongVersionError::new(
                Version::V6,
                Version::V4,
            )
            .into()),
            Err(_) => Err(InvalidAddressError::unrecognized(s)),
        }
    }
}

//--- Display

impl fmt::Display for Ipv6 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_compacted())
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Ipv6 {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Ipv6 {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Ipv6;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an IPv6 address")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                Ipv6::from_str(v).map_err(E::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(Visitor)
        } else {
            <[u8; 16]>::deserialize(deserializer).map(Ipv6::from)
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_notation() {
        assert_eq!(
            Ipv6::from_str("2001:db8::1").unwrap(),
            Ipv6::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)
        );
        assert!(matches!(
            Ipv6::from_str("2001:db8::1::2"),
            Err(InvalidAddressError::Unrecognized(_))
        ));
        match Ipv6::from_str("127.0.0.1") {
            Err(InvalidAddressError::WrongVersion(err)) => {
                assert_eq!(err.expected(), Version::V6);
                assert_eq!(err.actual(), Version::V4);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn binary_round_trip() {
        let octets = Ipv6::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1).octets();
        let addr = Ipv6::try_from(octets.as_slice()).unwrap();
        assert_eq!(addr.octets(), octets);
        assert!(matches!(
            Ipv6::try_from([0u8; 4].as_slice()),
            Err(InvalidAddressError::WrongVersion(_))
        ));
        assert!(Ipv6::try_from([0u8; 5].as_slice()).is_err());
    }

    #[test]
    fn notations() {
        let addr =
            Ipv6::from_str("2001:db8::a60:8a2e:370:7334").unwrap();
        assert_eq!(addr.to_compacted(), "2001:db8::a60:8a2e:370:7334");
        assert_eq!(
            addr.to_expanded(),
            "2001:0db8:0000:0000:0a60:8a2e:0370:7334"
        );
        assert_eq!(
            format!("{}", addr),
            "2001:db8::a60:8a2e:370:7334"
        );
    }

    #[test]
    fn arithmetic() {
        let addr =
            Ipv6::from_str("2001:db8::a60:8a2e:370:7334").unwrap();
        let other =
            Ipv6::from_str("2001:db8::a60:8a2e:0:7334").unwrap();
        assert!(addr.in_range(&other, 99));
        assert!(addr.in_range(&other, 102));
        assert!(!addr.in_range(&other, 103));
        assert_eq!(addr.common_cidr(&other).unwrap(), 102);
        assert_eq!(
            addr.network(32).unwrap().to_compacted(),
            "2001:db8::"
        );
        assert_eq!(
            addr.broadcast(32).unwrap().to_compacted(),
            "2001:db8:ffff:ffff:ffff:ffff:ffff:ffff"
        );
        assert_eq!(addr.network(129).unwrap_err().cidr(), 129);
        assert!(!addr.in_range(&other, 129));
    }

    #[test]
    fn classification() {
        assert!(Ipv6::from_str("::1").unwrap().is_loopback());
        assert!(!Ipv6::from_str("::2").unwrap().is_loopback());
        assert!(Ipv6::from_str("fe80::1").unwrap().is_link_local());
        assert!(Ipv6::from_str("febf::1").unwrap().is_link_local());
        assert!(!Ipv6::from_str("fec0::1").unwrap().is_link_local());
        assert!(Ipv6::from_str("ff02::2").unwrap().is_multicast());
        assert!(Ipv6::from_str("fd12::1").unwrap().is_private_use());
        assert!(!Ipv6::from_str("fc00::1").unwrap().is_private_use());
        assert!(Ipv6::from_str("fc00::1").unwrap().is_unique_local());
        assert!(Ipv6::from_str("fd12::1").unwrap().is_unique_local());
        assert!(Ipv6::from_str("::").unwrap().is_unspecified());
        assert!(!Ipv6::from_str("::1").unwrap().is_unspecified());
        assert!(Ipv6::from_str("2001:db8::1").unwrap().is_documentation());
        assert!(Ipv6::from_str("2001:2::1").unwrap().is_benchmarking());
        assert!(Ipv6::from_str("2001:db8::1").unwrap().is_global_unicast());
        assert!(!Ipv6::from_str("2001:db8::1").unwrap().is_public_use());
        assert!(Ipv6::from_str("2a00:1450::1").unwrap().is_public_use());
        assert!(!Ipv6::from_str("fe80::1").unwrap().is_public_use());
    }

    #[test]
    fn structural_embedding_tests() {
        let mapped = Ipv6::from_str("::ffff:7f00:1").unwrap();
        assert!(mapped.is_mapped());
        assert!(!mapped.is_compatible());
        assert!(!mapped.is_derived());
        // A plain version 6 type never counts as embedded, whatever the
        // octets look like.
        assert!(!mapped.is_embedded());

        let compatible = Ipv6::from_str("::7f00:1").unwrap();
        assert!(compatible.is_compatible());
        assert!(!compatible.is_mapped());

        let derived = Ipv6::from_str("2002:7f00:1::").unwrap();
        assert!(derived.is_derived());
        assert!(!derived.is_mapped());
    }
}
