//! Embedding version 4 addresses in 16 octet sequences.
//!
//! There are three RFC-sanctioned conventions for representing a version 4
//! address inside a version 6 address, each a fixed layout with a 4 octet
//! payload region and twelve fixed octets around it. Which convention to
//! use is ambiguous by design, so the choice is left to the caller as a
//! value of the [`Embedding`] type; [`Embedding::Mapped`] is the default
//! since RFC 4291 makes it the common one.

use core::fmt;

//------------ Embedding -----------------------------------------------------

/// The convention used to embed a version 4 address in 16 octets.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
pub enum Embedding {
    /// An IPv4-mapped IPv6 address as defined in RFC 4291: ten zero octets,
    /// `ff ff`, then the payload. Renders as `::ffff:0:0/96`.
    #[default]
    Mapped,

    /// The deprecated IPv4-compatible form of RFC 4291: twelve zero octets
    /// then the payload. Renders as `::/96`.
    Compatible,

    /// A 6to4-derived address as defined in RFC 3056: `20 02`, the payload,
    /// then ten zero octets. Renders inside `2002::/16`.
    Derived,
}

/// The fixed octets in front of the payload of a mapped address.
const MAPPED_PREFIX: [u8; 12] =
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff];

/// The fixed octets in front of the payload of a compatible address.
const COMPATIBLE_PREFIX: [u8; 12] = [0; 12];

/// The fixed octets in front of the payload of a derived address.
const DERIVED_PREFIX: [u8; 2] = [0x20, 0x02];

impl Embedding {
    /// Returns whether the sequence embeds a version 4 address.
    ///
    /// This is an exact octet-for-octet comparison of the fixed region of
    /// the strategy’s layout. Anything that isn’t 16 octets long cannot
    /// embed an address and produces `false`.
    pub fn is_embedded(self, octets: &[u8]) -> bool {
        if octets.len() != 16 {
            return false;
        }
        match self {
            Embedding::Mapped => octets[..12] == MAPPED_PREFIX,
            Embedding::Compatible => octets[..12] == COMPATIBLE_PREFIX,
            Embedding::Derived => {
                octets[..2] == DERIVED_PREFIX
                    && octets[6..] == [0u8; 10]
            }
        }
    }

    /// Extracts the payload region from a 16 octet sequence.
    ///
    /// This is a purely structural slice of the payload region; it does
    /// not require [`is_embedded`][Self::is_embedded] to be true. A caller
    /// that extracts from a non-matching sequence receives whichever
    /// octets sit in the payload region. Only a sequence that isn’t 16
    /// octets long fails.
    pub fn extract(self, octets: &[u8]) -> Result<[u8; 4], ExtractionError> {
        match octets.try_into() {
            Ok(octets) => Ok(self.payload(&octets)),
            Err(_) => Err(ExtractionError {
                strategy: self,
                len: octets.len(),
            }),
        }
    }

    /// Packs a 4 octet payload into the strategy’s fixed layout.
    pub fn pack(self, payload: &[u8]) -> Result<[u8; 16], PackingError> {
        match payload.try_into() {
            Ok(payload) => Ok(self.surround(payload)),
            Err(_) => Err(PackingError {
                strategy: self,
                len: payload.len(),
            }),
        }
    }

    /// Extracts the payload region of a sequence of the right length.
    pub(crate) fn payload(self, octets: &[u8; 16]) -> [u8; 4] {
        let mut res = [0u8; 4];
        res.copy_from_slice(match self {
            Embedding::Mapped | Embedding::Compatible => &octets[12..],
            Embedding::Derived => &octets[2..6],
        });
        res
    }

    /// Packs a payload of the right length into the fixed layout.
    pub(crate) fn surround(self, payload: [u8; 4]) -> [u8; 16] {
        let mut res = [0u8; 16];
        match self {
            Embedding::Mapped => {
                res[..12].copy_from_slice(&MAPPED_PREFIX);
                res[12..].copy_from_slice(&payload);
            }
            Embedding::Compatible => {
                res[12..].copy_from_slice(&payload);
            }
            Embedding::Derived => {
                res[..2].copy_from_slice(&DERIVED_PREFIX);
                res[2..6].copy_from_slice(&payload);
            }
        }
        res
    }
}

//--- Display

impl fmt::Display for Embedding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Embedding::Mapped => "IPv4-mapped",
            Embedding::Compatible => "IPv4-compatible",
            Embedding::Derived => "6to4-derived",
        })
    }
}

//============ Error Types ===================================================

//------------ ExtractionError -----------------------------------------------

/// A sequence to extract an embedded address from wasn’t 16 octets long.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExtractionError {
    strategy: Embedding,
    len: usize,
}

impl ExtractionError {
    /// Returns the strategy that attempted the extraction.
    pub fn strategy(&self) -> Embedding {
        self.strategy
    }

    /// Returns the length of the offending sequence.
    pub fn len(&self) -> usize {
        self.len
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "cannot extract a {} payload from {} octets; \
             expected exactly 16",
            self.strategy, self.len
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ExtractionError {}

//------------ PackingError --------------------------------------------------

/// A payload to pack into a 16 octet sequence wasn’t 4 octets long.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PackingError {
    strategy: Embedding,
    len: usize,
}

impl PackingError {
    /// Returns the strategy that attempted the packing.
    pub fn strategy(&self) -> Embedding {
        self.strategy
    }

    /// Returns the length of the offending payload.
    pub fn len(&self) -> usize {
        self.len
    }
}

impl fmt::Display for PackingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "cannot pack {} octets into a {} sequence; \
             expected exactly 4",
            self.len, self.strategy
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PackingError {}

//============ Testing =======================================================
