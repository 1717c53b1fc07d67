//! Multi-version addresses.

use crate::cidr::{self, InvalidCidrError};
use crate::error::{InvalidAddressError, WrongVersionError};
use crate::formatter::{self, Parsed};
use crate::strategy::Embedding;
use crate::traits::{Address, Version};
use crate::v4::Ipv4;
use crate::v6::Ipv6;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

//------------ Multi ---------------------------------------------------------

/// An address of either version, stored as 16 octets.
///
/// A multi-version address accepts input of either version and normalizes
/// it to a 16 octet sequence, which makes it the type to reach for when
/// both versions must share one representation – one fixed-length database
/// column, say. Version 4 input is embedded through the [`Embedding`]
/// strategy given at construction, [`Embedding::Mapped`] by default.
///
/// The stored sequence resolves back to version 4 whenever it matches the
/// value’s own strategy; all version-dependent behaviour – rendering,
/// classification, CIDR arithmetic – branches on that resolution. The
/// resolution is fixed at construction since the octets never change.
///
/// ```
/// use ipbin::{Address, Multi, Version};
///
/// let addr = Multi::new("127.0.0.1")?;
/// assert_eq!(addr.to_compacted(), "::ffff:7f00:1");
/// assert_eq!(addr.version(), Version::V4);
/// assert!(addr.is_mapped());
/// assert!(addr.is_loopback());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Multi {
    octets: [u8; 16],
    strategy: Embedding,
    embedded: bool,
}

impl Multi {
    /// Creates an address from protocol notation of either version.
    ///
    /// Version 4 notation is embedded through the default
    /// [`Embedding::Mapped`] strategy.
    pub fn new(text: &str) -> Result<Self, InvalidAddressError> {
        Self::with_strategy(text, Embedding::default())
    }

    /// Creates an address from protocol notation with a chosen strategy.
    pub fn with_strategy(
        text: &str,
        strategy: Embedding,
    ) -> Result<Self, InvalidAddressError> {
        match formatter::parse(text) {
            Ok(Parsed::V4(payload)) => {
                Ok(Self::from_octets(strategy.surround(payload), strategy))
            }
            Ok(Parsed::V6(octets)) => {
                Ok(Self::from_octets(octets, strategy))
            }
            Err(_) => Err(InvalidAddressError::unrecognized(text)),
        }
    }

    /// Creates an address from a binary sequence of either length.
    ///
    /// A 4 octet sequence is embedded through the strategy, a 16 octet
    /// sequence is stored as-is, and any other length fails.
    pub fn from_slice(
        octets: &[u8],
        strategy: Embedding,
    ) -> Result<Self, InvalidAddressError> {
        match formatter::parse_slice(octets) {
            Ok(Parsed::V4(payload)) => {
                Ok(Self::from_octets(strategy.surround(payload), strategy))
            }
            Ok(Parsed::V6(octets)) => {
                Ok(Self::from_octets(octets, strategy))
            }
            Err(_) => Err(InvalidAddressError::unrecognized(
                crate::binary::to_hex(octets),
            )),
        }
    }

    /// Creates an address directly from its 16 octets.
    pub fn from_octets(octets: [u8; 16], strategy: Embedding) -> Self {
        Multi {
            octets,
            strategy,
            embedded: strategy.is_embedded(&octets),
        }
    }

    /// Returns the 16 octets of the address.
    pub const fn octets(&self) -> [u8; 16] {
        self.octets
    }

    /// Returns the embedding strategy the address interprets itself with.
    pub const fn strategy(&self) -> Embedding {
        self.strategy
    }

    /// Returns the embedded version 4 address, if there is one.
    ///
    /// This is the explicit version branch every operation builds on: a
    /// value that resolves to version 4 yields its payload, anything else
    /// yields `None` and is handled as version 6.
    pub fn payload(&self) -> Option<Ipv4> {
        if self.embedded {
            Some(self.strategy.payload(&self.octets).into())
        } else {
            None
        }
    }

    /// Returns the full 16 octet sequence as a version 6 address.
    fn as_v6(&self) -> Ipv6 {
        Ipv6::from(self.octets)
    }
}

/// # Rendering
///
impl Multi {
    /// Returns the address in the notation appropriate for its version.
    ///
    /// A value that resolves to version 4 renders its payload in
    /// dotted-quad notation; everything else renders as compacted
    /// version 6 notation.
    pub fn to_protocol_appropriate(&self) -> String {
        match self.payload() {
            Some(payload) => payload.to_dotted(),
            None => self.to_compacted(),
        }
    }

    /// Returns the embedded payload in dotted-quad notation.
    ///
    /// Fails with [`WrongVersionError`] when the address does not resolve
    /// to version 4.
    pub fn to_dotted(&self) -> Result<String, WrongVersionError> {
        match self.payload() {
            Some(payload) => Ok(payload.to_dotted()),
            None => {
                Err(WrongVersionError::new(Version::V4, Version::V6))
            }
        }
    }

    /// Returns the 16 octet sequence in compacted notation.
    pub fn to_compacted(&self) -> String {
        formatter::compacted(&self.octets)
    }

    /// Returns the 16 octet sequence in expanded notation.
    pub fn to_expanded(&self) -> String {
        formatter::expanded(&self.octets)
    }
}

/// # Classification
///
/// A value that resolves to version 4 is classified by the version 4 rules
/// applied to its payload; a value that resolves to version 6 by the
/// version 6 rules applied to the full sequence. Categories that only
/// exist in one version fail with [`WrongVersionError`] when the value
/// resolves to the other – asking whether a version 6 address is the
/// limited broadcast address is a type error, not a `false`.
impl Multi {
    /// Returns whether this is a loopback address.
    pub fn is_loopback(&self) -> bool {
        match self.payload() {
            Some(payload) => payload.is_loopback(),
            None => self.as_v6().is_loopback(),
        }
    }

    /// Returns whether this is a link-local address.
    pub fn is_link_local(&self) -> bool {
        match self.payload() {
            Some(payload) => payload.is_link_local(),
            None => self.as_v6().is_link_local(),
        }
    }

    /// Returns whether this is a multicast address.
    pub fn is_multicast(&self) -> bool {
        match self.payload() {
            Some(payload) => payload.is_multicast(),
            None => self.as_v6().is_multicast(),
        }
    }

    /// Returns whether this is a private use address.
    pub fn is_private_use(&self) -> bool {
        match self.payload() {
            Some(payload) => payload.is_private_use(),
            None => self.as_v6().is_private_use(),
        }
    }

    /// Returns whether this is the unspecified address of its version.
    pub fn is_unspecified(&self) -> bool {
        match self.payload() {
            Some(payload) => payload.is_unspecified(),
            None => self.as_v6().is_unspecified(),
        }
    }

    /// Returns whether this address is reserved for documentation.
    pub fn is_documentation(&self) -> bool {
        match self.payload() {
            Some(payload) => payload.is_documentation(),
            None => self.as_v6().is_documentation(),
        }
    }

    /// Returns whether this address is reserved for benchmarking.
    pub fn is_benchmarking(&self) -> bool {
        match self.payload() {
            Some(payload) => payload.is_benchmarking(),
            None => self.as_v6().is_benchmarking(),
        }
    }

    /// Returns whether this address appears to be globally routable.
    pub fn is_public_use(&self) -> bool {
        match self.payload() {
            Some(payload) => payload.is_public_use(),
            None => self.as_v6().is_public_use(),
        }
    }

    /// Returns whether this is the limited broadcast address.
    ///
    /// Only version 4 has one; a value resolving to version 6 fails.
    pub fn is_broadcast(&self) -> Result<bool, WrongVersionError> {
        match self.payload() {
            Some(payload) => Ok(payload.is_broadcast()),
            None => {
                Err(WrongVersionError::new(Version::V4, Version::V6))
            }
        }
    }

    /// Returns whether this address is in the shared address space.
    ///
    /// Only version 4 has one; a value resolving to version 6 fails.
    pub fn is_shared(&self) -> Result<bool, WrongVersionError> {
        match self.payload() {
            Some(payload) => Ok(payload.is_shared()),
            None => {
                Err(WrongVersionError::new(Version::V4, Version::V6))
            }
        }
    }

    /// Returns whether this address is reserved for future use.
    ///
    /// Only version 4 has such a block; a value resolving to version 6
    /// fails.
    pub fn is_future_reserved(&self) -> Result<bool, WrongVersionError> {
        match self.payload() {
            Some(payload) => Ok(payload.is_future_reserved()),
            None => {
                Err(WrongVersionError::new(Version::V4, Version::V6))
            }
        }
    }

    /// Returns whether this is a unique local address.
    ///
    /// Only version 6 has those; a value resolving to version 4 fails.
    pub fn is_unique_local(&self) -> Result<bool, WrongVersionError> {
        match self.payload() {
            Some(_) => {
                Err(WrongVersionError::new(Version::V6, Version::V4))
            }
            None => Ok(self.as_v6().is_unique_local()),
        }
    }

    /// Returns whether this is a global unicast address.
    ///
    /// Only version 6 has that block; a value resolving to version 4
    /// fails.
    pub fn is_global_unicast(&self) -> Result<bool, WrongVersionError> {
        match self.payload() {
            Some(_) => {
                Err(WrongVersionError::new(Version::V6, Version::V4))
            }
            None => Ok(self.as_v6().is_global_unicast()),
        }
    }
}

//--- Address

impl Address for Multi {
    fn as_slice(&self) -> &[u8] {
        &self.octets
    }

    fn version(&self) -> Version {
        if self.embedded {
            Version::V4
        } else {
            Version::V6
        }
    }

    /// Returns the network address for the given CIDR.
    ///
    /// On a value that resolves to version 4, a CIDR of up to 32 operates
    /// on the payload and the result is embedded again through the same
    /// strategy. Everything else operates on the full 16 octets.
    fn network(&self, cidr: u32) -> Result<Self, InvalidCidrError> {
        if cidr <= 32 {
            if let Some(payload) = self.payload() {
                let network = payload.network(cidr)?;
                return Ok(Self::from_octets(
                    self.strategy.surround(network.octets()),
                    self.strategy,
                ));
            }
        }
        cidr::network(&self.octets, cidr)
            .map(|octets| Self::from_octets(octets, self.strategy))
    }

    /// Returns the broadcast address for the given CIDR.
    ///
    /// Branches on the resolved version exactly like
    /// [`network`][Self::network].
    fn broadcast(&self, cidr: u32) -> Result<Self, InvalidCidrError> {
        if cidr <= 32 {
            if let Some(payload) = self.payload() {
                let broadcast = payload.broadcast(cidr)?;
                return Ok(Self::from_octets(
                    self.strategy.surround(broadcast.octets()),
                    self.strategy,
                ));
            }
        }
        cidr::broadcast(&self.octets, cidr)
            .map(|octets| Self::from_octets(octets, self.strategy))
    }

    /// Returns whether both addresses sit in the same CIDR-sized network.
    ///
    /// When both values resolve to version 4 and the other value’s octets
    /// embed a payload under this value’s strategy, the payloads are
    /// compared first. After that the network addresses are compared the
    /// way [`network`][Self::network] computes them, each side branching
    /// on its own resolution; since an embedded network address is packed
    /// back into its layout, a version 4 resolved address and a version 6
    /// resolved address never end up in the same network – not even at a
    /// CIDR of zero. A cross-version comparison is therefore always
    /// `false`, as is an out-of-range CIDR.
    fn in_range(&self, other: &Self, cidr: u32) -> bool {
        if self.embedded
            && other.embedded
            && self.strategy.is_embedded(&other.octets)
        {
            let ours = self.strategy.payload(&self.octets);
            let theirs = self.strategy.payload(&other.octets);
            if Ipv4::from(ours).in_range(&Ipv4::from(theirs), cidr) {
                return true;
            }
        }
        match (self.network(cidr), other.network(cidr)) {
            (Ok(ours), Ok(theirs)) => ours.octets == theirs.octets,
            _ => false,
        }
    }

    /// Returns whether the address embeds a version 4 address according
    /// to its own strategy.
    fn is_embedded(&self) -> bool {
        self.embedded
    }
}

//--- FromStr

impl FromStr for Multi {
    type Err = InvalidAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

//--- Display

impl fmt::Display for Multi {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_protocol_appropriate())
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Multi {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(&self.to_compacted())
        } else {
            self.octets.serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Multi {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Multi;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an IP address")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                Multi::new(v).map_err(E::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(Visitor)
        } else {
            <[u8; 16]>::deserialize(deserializer).map(|octets| {
                Multi::from_octets(octets, Embedding::default())
            })
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::binary;

    fn hex(hex: &str) -> [u8; 16] {
        binary::from_hex(hex).unwrap().try_into().unwrap()
    }

    #[test]
    fn embeds_v4_notation() {
        let addr = Multi::new("127.0.0.1").unwrap();
        assert_eq!(
            addr.octets(),
            hex("00000000000000000000ffff7f000001")
        );
        assert_eq!(addr.version(), Version::V4);
        assert!(addr.is_embedded());
        assert!(addr.is_mapped());
        assert_eq!(addr.payload(), Some(Ipv4::new(127, 0, 0, 1)));
        assert_eq!(addr.to_compacted(), "::ffff:7f00:1");
        assert_eq!(addr.to_dotted().unwrap(), "127.0.0.1");
        assert_eq!(addr.to_protocol_appropriate(), "127.0.0.1");
    }

    #[test]
    fn takes_v6_notation_as_is() {
        let addr = Multi::new("2001:db8::1").unwrap();
        assert_eq!(addr.version(), Version::V6);
        assert!(!addr.is_embedded());
        assert_eq!(addr.payload(), None);
        assert_eq!(addr.to_protocol_appropriate(), "2001:db8::1");
        assert!(matches!(
            addr.to_dotted(),
            Err(err) if err.expected() == Version::V4
        ));
        assert!(matches!(
            Multi::new("pelican"),
            Err(InvalidAddressError::Unrecognized(_))
        ));
    }

    #[test]
    fn strategies_change_the_layout() {
        let compatible =
            Multi::with_strategy("127.0.0.1", Embedding::Compatible)
                .unwrap();
        assert_eq!(
            compatible.octets(),
            hex("0000000000000000000000007f000001")
        );
        assert!(compatible.is_compatible());
        assert!(!compatible.is_mapped());
        assert!(compatible.is_embedded());

        let derived =
            Multi::with_strategy("127.0.0.1", Embedding::Derived).unwrap();
        assert_eq!(
            derived.octets(),
            hex("20027f00000100000000000000000000")
        );
        assert!(derived.is_derived());
        assert!(derived.is_embedded());
        assert_eq!(derived.to_dotted().unwrap(), "127.0.0.1");
    }

    #[test]
    fn resolution_follows_the_strategy() {
        // The same octets resolve differently under different strategies:
        // embedding is about the value's own strategy, the structural
        // tests are about the octets.
        let octets = hex("00000000000000000000ffff7f000001");
        let mapped = Multi::from_octets(octets, Embedding::Mapped);
        let derived = Multi::from_octets(octets, Embedding::Derived);
        assert_eq!(mapped.version(), Version::V4);
        assert_eq!(derived.version(), Version::V6);
        assert!(mapped.is_embedded());
        assert!(!derived.is_embedded());
        assert!(derived.is_mapped());
    }

    #[test]
    fn from_binary_sequences() {
        let addr =
            Multi::from_slice(&[127, 0, 0, 1], Embedding::Mapped).unwrap();
        assert_eq!(
            addr.octets(),
            hex("00000000000000000000ffff7f000001")
        );
        let addr = Multi::from_slice(
            &hex("20010db8000000000000000000000001"),
            Embedding::Mapped,
        )
        .unwrap();
        assert_eq!(addr.version(), Version::V6);
        assert!(Multi::from_slice(&[0u8; 5], Embedding::Mapped).is_err());
    }

    #[test]
    fn v4_arithmetic_stays_embedded() {
        let addr = Multi::new("12.34.56.78").unwrap();
        let network = addr.network(24).unwrap();
        assert_eq!(network.to_dotted().unwrap(), "12.34.56.0");
        assert!(network.is_embedded());
        assert_eq!(network.strategy(), Embedding::Mapped);
        let broadcast = addr.broadcast(24).unwrap();
        assert_eq!(broadcast.to_dotted().unwrap(), "12.34.56.255");
        assert!(broadcast.is_embedded());
    }

    #[test]
    fn v6_arithmetic_on_the_full_sequence() {
        let addr = Multi::new("2001:db8::a60:8a2e:370:7334").unwrap();
        assert_eq!(
            addr.network(32).unwrap().to_compacted(),
            "2001:db8::"
        );
        // A CIDR beyond 32 works on an embedded value too; it simply
        // operates on the 16 octets.
        let mapped = Multi::new("12.34.56.78").unwrap();
        let network = mapped.network(120).unwrap();
        assert_eq!(
            network.octets(),
            hex("00000000000000000000ffff0c223800")
        );
        assert_eq!(addr.network(129).unwrap_err().cidr(), 129);
    }

    #[test]
    fn range_containment() {
        let ours = Multi::new("12.34.56.78").unwrap();
        let theirs = Multi::new("12.34.56.1").unwrap();
        assert!(ours.in_range(&theirs, 24));
        assert!(!ours.in_range(&Multi::new("12.34.57.1").unwrap(), 24));

        assert!(ours.in_range(&ours, 32));
        assert!(!ours.in_range(&theirs, 32));

        // Cross-version comparisons are never in range; the re-embedded
        // network addresses differ even at a CIDR of zero.
        let v6 = Multi::new("2001:db8::1").unwrap();
        assert!(!ours.in_range(&v6, 24));
        assert!(!ours.in_range(&v6, 0));

        // Different strategies never compare as version 4 either: each
        // side's network address is packed back into its own layout.
        let compatible =
            Multi::with_strategy("12.34.56.1", Embedding::Compatible)
                .unwrap();
        assert!(!ours.in_range(&compatible, 24));

        // The same goes for octets that match our strategy but belong to
        // a value resolving to version 6 under its own. The payload
        // comparison requires both sides to resolve to version 4.
        let unresolved =
            Multi::from_octets(ours.octets(), Embedding::Derived);
        assert_eq!(unresolved.version(), Version::V6);
        assert!(!ours.in_range(&unresolved, 24));
        assert!(!ours.in_range(&unresolved, 0));

        // An invalid CIDR is not in range rather than an error.
        assert!(!ours.in_range(&theirs, 129));
    }

    #[test]
    fn common_cidr_requires_matching_versions() {
        let ours = Multi::new("12.34.56.78").unwrap();
        let theirs = Multi::new("12.34.57.1").unwrap();
        // Both resolve to version 4 but the comparison runs on the full
        // 16 octets, so the shared mapped prefix counts.
        assert_eq!(ours.common_cidr(&theirs).unwrap(), 96 + 23);
        let v6 = Multi::new("2001:db8::1").unwrap();
        let err = ours.common_cidr(&v6).unwrap_err();
        assert_eq!(err.expected(), Version::V4);
        assert_eq!(err.actual(), Version::V6);
    }

    #[test]
    fn classification_follows_resolution() {
        let addr = Multi::new("127.0.0.1").unwrap();
        assert!(addr.is_loopback());
        assert!(!addr.is_multicast());
        assert!(Multi::new("::1").unwrap().is_loopback());
        assert!(Multi::new("10.0.0.1").unwrap().is_private_use());
        assert!(Multi::new("fd00::1").unwrap().is_private_use());
        assert!(Multi::new("169.254.1.1").unwrap().is_link_local());
        assert!(Multi::new("fe80::1").unwrap().is_link_local());
        assert!(Multi::new("224.0.0.1").unwrap().is_multicast());
        assert!(Multi::new("ff02::1").unwrap().is_multicast());
        assert!(Multi::new("0.0.0.0").unwrap().is_unspecified());
        assert!(Multi::new("::").unwrap().is_unspecified());
        // The all-zero sequence is also a compatible-embedded 0.0.0.0;
        // under the compatible strategy it resolves to version 4.
        let zero =
            Multi::with_strategy("::", Embedding::Compatible).unwrap();
        assert_eq!(zero.version(), Version::V4);
        assert!(zero.is_unspecified());
    }

    #[test]
    fn version_specific_classification() {
        let v4 = Multi::new("255.255.255.255").unwrap();
        assert_eq!(v4.is_broadcast(), Ok(true));
        assert_eq!(v4.is_shared(), Ok(false));
        assert_eq!(v4.is_future_reserved(), Ok(false));
        assert!(v4.is_unique_local().is_err());
        assert!(v4.is_global_unicast().is_err());

        let v6 = Multi::new("fc00::1").unwrap();
        assert_eq!(v6.is_unique_local(), Ok(true));
        assert_eq!(v6.is_global_unicast(), Ok(false));
        let err = v6.is_broadcast().unwrap_err();
        assert_eq!(err.expected(), Version::V4);
        assert_eq!(err.actual(), Version::V6);
    }
}
