//! IP addresses as fixed-length binary values.
//!
//! This crate provides immutable value types for IP addresses that keep the
//! address as its fixed-length binary sequence – 4 octets for IPv4,
//! 16 octets for IPv6 – and derive everything else from those octets:
//! protocol notation, CIDR arithmetic (network and broadcast addresses,
//! range containment), and the RFC-defined address classifications
//! (loopback, multicast, link-local, private use, and so on).
//!
//! There are three concrete address types:
//!
//! * [`Ipv4`][v4::Ipv4] wraps exactly 4 octets and only ever deals with
//!   version 4 addresses.
//! * [`Ipv6`][v6::Ipv6] wraps exactly 16 octets and only ever deals with
//!   version 6 addresses.
//! * [`Multi`][multi::Multi] wraps 16 octets and accepts input of either
//!   version. Version 4 input is embedded into the 16 octet sequence
//!   through one of the three RFC-sanctioned conventions provided by the
//!   [`Embedding`][strategy::Embedding] strategy – IPv4-mapped,
//!   IPv4-compatible, or 6to4-derived – chosen at construction time.
//!
//! All three types implement the [`Address`][traits::Address] trait which
//! collects the operations shared between them.
//!
//! The binary sequence is the single source of truth: two addresses are
//! equal exactly when their octets (and, for [`Multi`][multi::Multi], their
//! embedding strategy) are equal, and the octets are what you would store
//! in a fixed-length binary database column or transmit as-is.
//!
//! # Reference of feature flags
//!
//! * `serde`: support for serializing and deserializing addresses with the
//!   [serde](https://serde.rs/) crate. Human-readable formats use protocol
//!   notation, all others use the raw octets.
//! * `std`: support for the Rust std library. This feature is enabled by
//!   default; without it the crate only requires `core` and `alloc`.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
#[allow(unused_imports)]
#[macro_use]
extern crate std;

#[macro_use]
extern crate alloc;

pub mod binary;
pub mod cidr;
pub mod error;
pub mod formatter;
pub mod multi;
pub mod strategy;
pub mod traits;
pub mod v4;
pub mod v6;

pub use self::cidr::InvalidCidrError;
pub use self::error::{InvalidAddressError, WrongVersionError};
pub use self::multi::Multi;
pub use self::strategy::Embedding;
pub use self::traits::{Address, Version};
pub use self::v4::Ipv4;
pub use self::v6::Ipv6;
