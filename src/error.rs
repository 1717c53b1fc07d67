//! Errors shared by the address types.
//!
//! The codec, strategy, formatter, and CIDR modules each define the error
//! type for their own failure mode next to the code that raises it. The
//! two errors here are the ones the address factories share: input that
//! cannot be resolved into a sequence of the required length at all, and
//! input that is a perfectly good address of the wrong version.

use alloc::boxed::Box;
use core::fmt;

use crate::traits::Version;

//------------ InvalidAddressError -------------------------------------------

/// Input couldn’t be resolved into an address of the required length.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvalidAddressError {
    /// The input was neither protocol notation nor a binary sequence of
    /// an acceptable length. Carries the offending input – binary input
    /// is carried in hexadecimal notation – for diagnostics.
    Unrecognized(Box<str>),

    /// The input was a valid address of the wrong version.
    WrongVersion(WrongVersionError),
}

impl InvalidAddressError {
    pub(crate) fn unrecognized(input: impl AsRef<str>) -> Self {
        InvalidAddressError::Unrecognized(input.as_ref().into())
    }

    /// Returns the offending input if it was carried along.
    pub fn input(&self) -> Option<&str> {
        match self {
            InvalidAddressError::Unrecognized(input) => Some(input),
            InvalidAddressError::WrongVersion(_) => None,
        }
    }
}

//--- From

impl From<WrongVersionError> for InvalidAddressError {
    fn from(err: WrongVersionError) -> Self {
        InvalidAddressError::WrongVersion(err)
    }
}

//--- Display and Error

impl fmt::Display for InvalidAddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidAddressError::Unrecognized(input) => {
                write!(f, "invalid IP address '{}'", input)
            }
            InvalidAddressError::WrongVersion(err) => err.fmt(f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidAddressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidAddressError::Unrecognized(_) => None,
            InvalidAddressError::WrongVersion(err) => Some(err),
        }
    }
}

//------------ WrongVersionError ---------------------------------------------

/// An address was structurally valid but of the wrong IP version.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WrongVersionError {
    expected: Version,
    actual: Version,
}

impl WrongVersionError {
    pub(crate) fn new(expected: Version, actual: Version) -> Self {
        WrongVersionError { expected, actual }
    }

    /// Returns the version that was required.
    pub fn expected(&self) -> Version {
        self.expected
    }

    /// Returns the version the address actually had.
    pub fn actual(&self) -> Version {
        self.actual
    }
}

//--- Display and Error

impl fmt::Display for WrongVersionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "expected an IPv{} address, got an IPv{} address",
            self.expected, self.actual
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WrongVersionError {}

//============ Testing =======================================================
