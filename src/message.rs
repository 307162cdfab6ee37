//! The `Message` contract shared by every wire-level layer.
//!
//! `BVLC`, `NPDU`, and `APDU` each implement this directly; `ServiceFrame`
//! composes the three by holding one of each (has-a, not is-a) and
//! implements the same contract by delegating to its fields in order.

use crate::error::Result;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

pub trait Message: Sized {
    /// Encodes into a freshly allocated buffer sized by `serialized_length`.
    fn serialize(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.serialized_length()];
        self.serialize_into(&mut buf).expect("buffer sized by serialized_length");
        buf
    }

    /// Encodes into `buf`, failing if it is smaller than `serialized_length()`.
    fn serialize_into(&self, buf: &mut [u8]) -> Result<()>;

    /// Decodes from the front of `bytes`. Implementations ignore any trailing
    /// bytes past what their own layer consumes.
    fn parse_from(bytes: &[u8]) -> Result<Self>;

    /// The exact number of bytes `serialize` will produce.
    fn serialized_length(&self) -> usize;
}
