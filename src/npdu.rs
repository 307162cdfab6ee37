//! Network Protocol Data Unit (NPDU) header.
//!
//! Variable 2 or 6 bytes: `version | control | [DNET | DLEN | Hop]`. The
//! destination-routing fields are present if and only if the
//! destination-specifier bit is set in `control`.

use bitflags::bitflags;

use crate::error::{CodecError, Result};
use crate::message::Message;

bitflags! {
    /// NPDU control byte. Only the bits this core actually interprets are
    /// named; unknown bits are preserved on round-trip via `from_bits_retain`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NpduControl: u8 {
        /// NSDU carries a network-layer message, not an APDU.
        const NETWORK_LAYER_MESSAGE = 0x80;
        /// Destination-specifier present: DNET/DLEN/Hop follow `control`.
        const DESTINATION_PRESENT = 0x20;
        /// Source-specifier present. Parsed for completeness; this core
        /// never emits a source.
        const SOURCE_PRESENT = 0x08;
        /// Data expects a reply (set for confirmed requests).
        const EXPECTING_REPLY = 0x04;
    }
}

/// The NPDU header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npdu {
    pub version: u8,
    pub control: NpduControl,
    pub dnet: u16,
    pub dlen: u8,
    pub hop: u8,
}

impl Npdu {
    const LEN_MIN: usize = 2;
    const LEN_WITH_DEST: usize = 6;

    pub fn new(expecting_reply: bool) -> Self {
        let mut control = NpduControl::empty();
        if expecting_reply {
            control |= NpduControl::EXPECTING_REPLY;
        }
        Self {
            version: 1,
            control,
            dnet: 0,
            dlen: 0,
            hop: 0,
        }
    }
}

impl Message for Npdu {
    fn serialize_into(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() < self.serialized_length() {
            return Err(CodecError::TooShortToMarshalBinary);
        }
        buf[0] = self.version;
        buf[1] = self.control.bits();
        if self.control.contains(NpduControl::DESTINATION_PRESENT) {
            buf[2..4].copy_from_slice(&self.dnet.to_be_bytes());
            buf[4] = self.dlen;
            buf[5] = self.hop;
        }
        Ok(())
    }

    fn parse_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::LEN_MIN {
            return Err(CodecError::TooShortToParse);
        }
        let version = bytes[0];
        let control = NpduControl::from_bits_retain(bytes[1]);
        let mut npdu = Npdu {
            version,
            control,
            dnet: 0,
            dlen: 0,
            hop: 0,
        };
        if control.contains(NpduControl::DESTINATION_PRESENT) {
            if bytes.len() < Self::LEN_WITH_DEST {
                return Err(CodecError::TooShortToParse);
            }
            npdu.dnet = u16::from_be_bytes([bytes[2], bytes[3]]);
            npdu.dlen = bytes[4];
            npdu.hop = bytes[5];
        }
        Ok(npdu)
    }

    fn serialized_length(&self) -> usize {
        if self.control.contains(NpduControl::DESTINATION_PRESENT) {
            Self::LEN_WITH_DEST
        } else {
            Self::LEN_MIN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_without_destination() {
        let npdu = Npdu::new(true);
        let bytes = npdu.serialize();
        assert_eq!(bytes, vec![0x01, 0x04]);
        let parsed = Npdu::parse_from(&bytes).unwrap();
        assert_eq!(parsed, npdu);
    }

    #[test]
    fn round_trip_with_destination() {
        let mut npdu = Npdu::new(false);
        npdu.control |= NpduControl::DESTINATION_PRESENT;
        npdu.dnet = 1000;
        npdu.dlen = 1;
        npdu.hop = 255;
        let bytes = npdu.serialize();
        assert_eq!(bytes.len(), 6);
        let parsed = Npdu::parse_from(&bytes).unwrap();
        assert_eq!(parsed, npdu);
    }

    #[test]
    fn short_buffer_rejected() {
        let err = Npdu::parse_from(&[0x01]).unwrap_err();
        assert_eq!(err, CodecError::TooShortToParse);
    }
}
