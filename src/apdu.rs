//! Application Protocol Data Unit (APDU).
//!
//! Carries one of five supported PDU types with a type-specific preamble,
//! followed by a sequence of tagged objects. See the preamble table in
//! [`PduType`]'s documentation for the exact byte layout per type.

use crate::error::{CodecError, Result};
use crate::message::Message;
use crate::tag::{NamedTag, Object, Payload};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// The seven PDU types defined by the standard; this core implements the
/// five needed for discovery and property read/write.
///
/// | pdu_type | Preamble bytes | Fields after the type\|flags byte |
/// |---|---|---|
/// | 0 ConfirmedReq | 4 | `(max_seg<<4)\|max_size`, invoke_id, service |
/// | 1 UnconfirmedReq | 2 | service |
/// | 2 SimpleAck | 3 | invoke_id, service |
/// | 3 ComplexAck | 3 | invoke_id, service |
/// | 5 Error | 3 | invoke_id, service |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PduType {
    ConfirmedReq = 0,
    UnconfirmedReq = 1,
    SimpleAck = 2,
    ComplexAck = 3,
    Error = 5,
}

impl PduType {
    fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(PduType::ConfirmedReq),
            1 => Ok(PduType::UnconfirmedReq),
            2 => Ok(PduType::SimpleAck),
            3 => Ok(PduType::ComplexAck),
            5 => Ok(PduType::Error),
            _ => Err(CodecError::NotImplemented),
        }
    }
}

/// Maximum segments accepted, carried in the ConfirmedReq preamble. This
/// core never segments; requests always report `Unspecified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MaxSegments {
    Unspecified = 0,
}

/// Maximum APDU size accepted, carried in the ConfirmedReq preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MaxApduSize {
    Up1476 = 5,
}

/// The APDU header and its object list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Apdu {
    pub pdu_type: PduType,
    pub flags: u8,
    pub max_seg: u8,
    pub max_size: u8,
    pub invoke_id: u8,
    pub service: u8,
    pub objects: Vec<Payload>,
}

impl Apdu {
    pub fn new(pdu_type: PduType, service: u8, objects: Vec<Payload>) -> Self {
        Self {
            pdu_type,
            flags: 0,
            max_seg: MaxSegments::Unspecified as u8,
            max_size: MaxApduSize::Up1476 as u8,
            invoke_id: 0,
            service,
            objects,
        }
    }

    fn preamble_len(&self) -> usize {
        match self.pdu_type {
            PduType::ConfirmedReq => 4,
            PduType::UnconfirmedReq => 2,
            PduType::SimpleAck | PduType::ComplexAck | PduType::Error => 3,
        }
    }

    /// Parses the post-preamble object stream. Opening/closing markers are
    /// consumed as structural delimiters and never appear in the returned
    /// list; only value objects are kept.
    fn parse_objects(bytes: &[u8]) -> Result<Vec<Payload>> {
        let mut objects = Vec::new();
        let mut offset = 0;
        while offset < bytes.len() {
            let lead = bytes[offset];
            let tag_class = (lead & 0x8) != 0;
            let name_or_len = lead & 0x7;
            if tag_class && (name_or_len == 0x6 || name_or_len == 0x7) {
                let marker = NamedTag::parse_from(&bytes[offset..])?;
                let _ = marker; // structural only; not added to the object list
                offset += 1;
                continue;
            }
            let obj = Object::parse_from(&bytes[offset..])?;
            offset += obj.serialized_length();
            objects.push(Payload::Value(obj));
        }
        Ok(objects)
    }
}

impl Message for Apdu {
    fn serialize_into(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() < self.serialized_length() {
            return Err(CodecError::TooShortToMarshalBinary);
        }
        let mut offset = 0;
        buf[offset] = ((self.pdu_type as u8) << 4) | (self.flags & 0x7);
        offset += 1;

        match self.pdu_type {
            PduType::ConfirmedReq => {
                buf[offset] = ((self.max_seg & 0x7) << 4) | (self.max_size & 0xF);
                offset += 1;
                buf[offset] = self.invoke_id;
                offset += 1;
                buf[offset] = self.service;
                offset += 1;
            }
            PduType::UnconfirmedReq => {
                buf[offset] = self.service;
                offset += 1;
            }
            PduType::SimpleAck | PduType::ComplexAck | PduType::Error => {
                buf[offset] = self.invoke_id;
                offset += 1;
                buf[offset] = self.service;
                offset += 1;
            }
        }

        for payload in &self.objects {
            let len = payload.serialized_length();
            payload.serialize_into(&mut buf[offset..offset + len])?;
            offset += len;
        }

        Ok(())
    }

    fn parse_from(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(CodecError::TooShortToParse);
        }
        let lead = bytes[0];
        let pdu_type = PduType::from_u8(lead >> 4)?;
        let flags = lead & 0x7;

        let mut apdu = Apdu {
            pdu_type,
            flags,
            max_seg: 0,
            max_size: 0,
            invoke_id: 0,
            service: 0,
            objects: Vec::new(),
        };

        let preamble_len = apdu.preamble_len();
        if bytes.len() < preamble_len {
            return Err(CodecError::TooShortToParse);
        }

        match pdu_type {
            PduType::ConfirmedReq => {
                apdu.max_seg = bytes[1] >> 4;
                apdu.max_size = bytes[1] & 0xF;
                apdu.invoke_id = bytes[2];
                apdu.service = bytes[3];
            }
            PduType::UnconfirmedReq => {
                apdu.service = bytes[1];
            }
            PduType::SimpleAck | PduType::ComplexAck | PduType::Error => {
                apdu.invoke_id = bytes[1];
                apdu.service = bytes[2];
            }
        }

        apdu.objects = Self::parse_objects(&bytes[preamble_len..])?;
        Ok(apdu)
    }

    fn serialized_length(&self) -> usize {
        self.preamble_len() + self.objects.iter().map(Payload::serialized_length).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{enc_enumerated, enc_unsigned_u16};

    #[test]
    fn unconfirmed_request_round_trip() {
        let apdu = Apdu::new(PduType::UnconfirmedReq, 8, Vec::new());
        let bytes = apdu.serialize();
        assert_eq!(bytes, vec![0x10, 0x08]);
        let parsed = Apdu::parse_from(&bytes).unwrap();
        assert_eq!(parsed, apdu);
    }

    #[test]
    fn confirmed_request_preamble() {
        let mut apdu = Apdu::new(PduType::ConfirmedReq, 12, Vec::new());
        apdu.invoke_id = 7;
        let bytes = apdu.serialize();
        assert_eq!(bytes[0], 0x00);
        assert_eq!(bytes[2], 7);
        assert_eq!(bytes[3], 12);
        let parsed = Apdu::parse_from(&bytes).unwrap();
        assert_eq!(parsed.invoke_id, 7);
        assert_eq!(parsed.service, 12);
    }

    #[test]
    fn markers_are_stripped_on_decode() {
        let objects = vec![
            Payload::Marker(crate::tag::enc_opening_tag(3)),
            Payload::Value(crate::tag::enc_real(1.1)),
            Payload::Marker(crate::tag::enc_closing_tag(3)),
        ];
        let apdu = Apdu::new(PduType::ComplexAck, 12, objects);
        let bytes = apdu.serialize();
        let parsed = Apdu::parse_from(&bytes).unwrap();
        assert_eq!(parsed.objects.len(), 1);
    }

    #[test]
    fn iam_objects_round_trip() {
        let objects = vec![
            Payload::Value(crate::tag::enc_object_identifier(false, 0, 8, 321)),
            Payload::Value(enc_unsigned_u16(1024)),
            Payload::Value(enc_enumerated(0)),
            Payload::Value(enc_unsigned_u16(1)),
        ];
        let apdu = Apdu::new(PduType::UnconfirmedReq, 0, objects);
        let bytes = apdu.serialize();
        let parsed = Apdu::parse_from(&bytes).unwrap();
        assert_eq!(parsed.objects.len(), 4);
    }
}
