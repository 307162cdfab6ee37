//! Unified error taxonomy for the codec.
//!
//! Every layer (tag, BVLC, NPDU, APDU, service, parser) returns
//! `Result<T, CodecError>`. There is a single enum rather than a
//! per-layer error type, so a caller never has to match on more than
//! one error shape regardless of which layer rejected the input.

#[cfg(feature = "std")]
use std::error::Error;

#[cfg(feature = "std")]
use std::fmt;

#[cfg(not(feature = "std"))]
use core::fmt;

/// Result type used throughout the crate.
#[cfg(feature = "std")]
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(not(feature = "std"))]
pub type Result<T> = core::result::Result<T, CodecError>;

/// All ways a decode or encode can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Input buffer is shorter than the current layer's declared or minimum length.
    TooShortToParse,
    /// Output buffer is smaller than `serialized_length()` reports.
    TooShortToMarshalBinary,
    /// Unknown PDU type, unknown service choice, or an unsupported encoding
    /// variant such as the extended-length tag form.
    NotImplemented,
    /// A tagged value has an unexpected application tag number.
    WrongTagNumber,
    /// A service decoder saw a different object count than its positional schema requires.
    WrongObjectCount,
    /// Tag class, tag number, or length disagrees with the expected shape.
    WrongStructure,
    /// A decoder was handed a payload variant (`Marker` vs `Value`) it cannot consume.
    WrongPayload,
    /// A numeric field is out of the range the wire format allows.
    TooBigValue,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::TooShortToParse => write!(f, "too short to decode as parameter"),
            CodecError::TooShortToMarshalBinary => {
                write!(f, "insufficient buffer to serialize parameter to")
            }
            CodecError::NotImplemented => write!(f, "not implemented type"),
            CodecError::WrongTagNumber => write!(f, "wrong tag number"),
            CodecError::WrongObjectCount => write!(f, "wrong object count"),
            CodecError::WrongStructure => write!(f, "unexpected object structure"),
            CodecError::WrongPayload => write!(f, "wrong payload type"),
            CodecError::TooBigValue => write!(f, "too big value"),
        }
    }
}

#[cfg(feature = "std")]
impl Error for CodecError {}
