//! Version 4 addresses.

use crate::cidr::{self, InvalidCidrError};
use crate::error::{InvalidAddressError, WrongVersionError};
use crate::formatter::{self, Parsed};
use crate::traits::{Address, Version};
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

//------------ Ipv4 ----------------------------------------------------------

/// A version 4 address: an immutable sequence of exactly 4 octets.
///
/// Values are created from dotted-quad notation via [`FromStr`], from raw
/// octets via `From<[u8; 4]>`, or from a slice of unknown length via
/// `TryFrom<&[u8]>`. Once created, a value never changes; the arithmetic
/// methods all return new instances.
///
/// ```
/// use ipbin::{Address, Ipv4};
///
/// let addr: Ipv4 = "12.34.56.78".parse()?;
/// assert_eq!(addr.octets(), [12, 34, 56, 78]);
/// assert_eq!(addr.network(24)?.to_dotted(), "12.34.56.0");
/// assert_eq!(addr.broadcast(24)?.to_dotted(), "12.34.56.255");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ipv4([u8; 4]);

impl Ipv4 {
    /// Creates a new address from its four octets.
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self([a, b, c, d])
    }

    /// Returns the octets of the address.
    pub const fn octets(&self) -> [u8; 4] {
        self.0
    }

    /// Returns the address in dotted-quad notation.
    pub fn to_dotted(&self) -> String {
        formatter::dotted(&self.0)
    }

    /// Returns whether the address and a literal share a network.
    fn in_net(&self, net: [u8; 4], cidr: u32) -> bool {
        self.in_range(&Self(net), cidr)
    }
}

/// # Classification
///
/// Each predicate checks the address against the well-known networks the
/// referenced RFC reserves for the category. The categories are not
/// mutually exclusive: `10.0.0.1` is both private use and, trivially, not
/// public use; `255.255.255.255` is the broadcast address and sits inside
/// the future-reserved block.
impl Ipv4 {
    /// Returns whether this is a loopback address (RFC 3330).
    pub fn is_loopback(&self) -> bool {
        self.in_net([127, 0, 0, 0], 8)
    }

    /// Returns whether this is a link-local address (RFC 3927).
    pub fn is_link_local(&self) -> bool {
        self.in_net([169, 254, 0, 0], 16)
    }

    /// Returns whether this is a multicast address (RFC 3171).
    pub fn is_multicast(&self) -> bool {
        self.in_net([224, 0, 0, 0], 4)
    }

    /// Returns whether this is a private use address (RFC 1918).
    pub fn is_private_use(&self) -> bool {
        self.in_net([10, 0, 0, 0], 8)
            || self.in_net([172, 16, 0, 0], 12)
            || self.in_net([192, 168, 0, 0], 16)
    }

    /// Returns whether this is the unspecified address `0.0.0.0`.
    pub fn is_unspecified(&self) -> bool {
        self.0 == [0; 4]
    }

    /// Returns whether this address is reserved for documentation
    /// (RFC 5737).
    pub fn is_documentation(&self) -> bool {
        self.in_net([192, 0, 2, 0], 24)
            || self.in_net([198, 51, 100, 0], 24)
            || self.in_net([203, 0, 113, 0], 24)
    }

    /// Returns whether this address is reserved for network device
    /// benchmarking (RFC 2544).
    pub fn is_benchmarking(&self) -> bool {
        self.in_net([198, 18, 0, 0], 15)
    }

    /// Returns whether this is the limited broadcast address
    /// `255.255.255.255` (RFC 919).
    pub fn is_broadcast(&self) -> bool {
        self.0 == [255; 4]
    }

    /// Returns whether this address is part of the shared address space
    /// for carrier-grade NAT (RFC 6598).
    pub fn is_shared(&self) -> bool {
        self.in_net([100, 64, 0, 0], 10)
    }

    /// Returns whether this address is reserved for future use (RFC 1112).
    ///
    /// The broadcast address sits inside the reserved block but has a
    /// meaning of its own and is not included here.
    pub fn is_future_reserved(&self) -> bool {
        self.in_net([240, 0, 0, 0], 4) && !self.is_broadcast()
    }

    /// Returns whether this address appears to be globally routable.
    ///
    /// This excludes every block the IANA IPv4 Special-Purpose Address
    /// Registry marks as not globally reachable.
    pub fn is_public_use(&self) -> bool {
        !(self.in_net([0, 0, 0, 0], 8)
            || self.is_loopback()
            || self.is_link_local()
            || self.is_private_use()
            || self.is_shared()
            || self.in_net([192, 0, 0, 0], 24)
            || self.is_documentation()
            || self.is_benchmarking()
            || self.is_multicast()
            || self.is_broadcast()
            || self.is_future_reserved())
    }
}

//--- Address

impl Address for Ipv4 {
    fn as_slice(&self) -> &[u8] {
        &self.0
    }

    fn version(&self) -> Version {
        Version::V4
    }

    fn network(&self, cidr: u32) -> Result<Self, InvalidCidrError> {
        cidr::network(&self.0, cidr).map(Self)
    }

    fn broadcast(&self, cidr: u32) -> Result<Self, InvalidCidrError> {
        cidr::broadcast(&self.0, cidr).map(Self)
    }
}

//--- From, TryFrom, and FromStr

impl From<[u8; 4]> for Ipv4 {
    fn from(octets: [u8; 4]) -> Self {
        Self(octets)
    }
}

impl From<Ipv4> for [u8; 4] {
    fn from(addr: Ipv4) -> Self {
        addr.0
    }
}

impl From<core::net::Ipv4Addr> for Ipv4 {
    fn from(addr: core::net::Ipv4Addr) -> Self {
        Self(addr.octets())
    }
}

impl From<Ipv4> for core::net::Ipv4Addr {
    fn from(addr: Ipv4) -> Self {
        addr.0.into()
    }
}

impl TryFrom<&[u8]> for Ipv4 {
    type Error = InvalidAddressError;

    fn try_from(octets: &[u8]) -> Result<Self, Self::Error> {
        match formatter::parse_slice(octets) {
            Ok(Parsed::V4(octets)) => Ok(Self(octets)),
            Ok(Parsed::V6(_)) => Err(WrongVersionError::new(
                Version::V4,
                Version::V6,
            )
            .into()),
            Err(_) => Err(InvalidAddressError::unrecognized(
                crate::binary::to_hex(octets),
            )),
        }
    }
}

impl FromStr for Ipv4 {
    type Err = InvalidAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match formatter::parse(s) {
            Ok(Parsed::V4(octets)) => Ok(Self(octets)),
            Ok(Parsed::V6(_)) => Err(WrongVersionError::new(
                Version::V4,
                Version::V6,
            )
            .into()),
            Err(_) => Err(InvalidAddressError::unrecognized(s)),
        }
    }
}

//--- Display

impl fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Ipv4 {
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
impl<'de> serde::Deserialize<'de> for Ipv4 {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Ipv4;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an IPv4 address")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                Ipv4::from_str(v).map_err(E::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(Visitor)
        } else {
            <[u8; 4]>::deserialize(deserializer).map(Ipv4::from)
        }
    }
}

//============ Testing =======================================================
