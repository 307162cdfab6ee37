//! BACnet Virtual Link Control (BVLC) header.
//!
//! Fixed 4-byte framing header for BACnet/IP (ASHRAE 135 Annex J):
//! `type | function | length_hi | length_lo`. `type` is always 0x81;
//! `length` is the total size of the frame (BVLC+NPDU+APDU), filled in
//! once the rest of the frame is built.

use crate::error::{CodecError, Result};
use crate::message::Message;

/// BVLC type byte identifying a BACnet/IP frame.
pub const BVLC_TYPE: u8 = 0x81;

/// BVLC function codes this core emits and recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BvlcFunction {
    OriginalUnicastNpdu = 0x0A,
    OriginalBroadcastNpdu = 0x0B,
}

impl BvlcFunction {
    fn from_u8(value: u8) -> Result<Self> {
        match value {
            0x0A => Ok(BvlcFunction::OriginalUnicastNpdu),
            0x0B => Ok(BvlcFunction::OriginalBroadcastNpdu),
            _ => Err(CodecError::NotImplemented),
        }
    }
}

/// The BVLC header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bvlc {
    pub bvlc_type: u8,
    pub function: BvlcFunction,
    pub length: u16,
}

impl Bvlc {
    const LEN: usize = 4;

    pub fn new(function: BvlcFunction) -> Self {
        Self {
            bvlc_type: BVLC_TYPE,
            function,
            length: 0,
        }
    }
}

impl Message for Bvlc {
    fn serialize_into(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() < Self::LEN {
            return Err(CodecError::TooShortToMarshalBinary);
        }
        buf[0] = self.bvlc_type;
        buf[1] = self.function as u8;
        buf[2..4].copy_from_slice(&self.length.to_be_bytes());
        Ok(())
    }

    fn parse_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::LEN {
            return Err(CodecError::TooShortToParse);
        }
        if bytes[0] != BVLC_TYPE {
            return Err(CodecError::WrongStructure);
        }
        Ok(Bvlc {
            bvlc_type: bytes[0],
            function: BvlcFunction::from_u8(bytes[1])?,
            length: u16::from_be_bytes([bytes[2], bytes[3]]),
        })
    }

    fn serialized_length(&self) -> usize {
        Self::LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let bvlc = Bvlc {
            bvlc_type: BVLC_TYPE,
            function: BvlcFunction::OriginalBroadcastNpdu,
            length: 8,
        };
        let bytes = bvlc.serialize();
        assert_eq!(bytes, vec![0x81, 0x0B, 0x00, 0x08]);
        let parsed = Bvlc::parse_from(&bytes).unwrap();
        assert_eq!(parsed, bvlc);
    }

    #[test]
    fn wrong_type_byte_rejected() {
        let bytes = [0x80u8, 0x0B, 0x00, 0x08];
        let err = Bvlc::parse_from(&bytes).unwrap_err();
        assert_eq!(err, CodecError::WrongStructure);
    }

    #[test]
    fn short_buffer_rejected() {
        let bytes = [0x81u8, 0x0B, 0x00];
        let err = Bvlc::parse_from(&bytes).unwrap_err();
        assert_eq!(err, CodecError::TooShortToParse);
    }
}
