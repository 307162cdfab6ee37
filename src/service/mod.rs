//! Service layer: named BACnet messages built from BVLC+NPDU+APDU.
//!
//! Each service (WhoIs, IAm, ReadProperty, WriteProperty, ComplexACK,
//! SimpleACK, Error) is a [`ServiceFrame`] plus a constructor that presets
//! the fields appropriate to that service, and a `decode()` free function
//! that projects the APDU's object list to a typed result by position.
//!
//! `ServiceFrame` has-a BVLC, NPDU, and APDU — it does not inherit their
//! methods by field promotion the way the reference implementation's
//! structural embedding does. It implements [`Message`] itself by
//! delegating to its three fields in wire order.

mod complex_ack;
mod error;
mod iam;
mod read_property;
mod simple_ack;
mod whois;
mod write_property;

pub use complex_ack::{new_cack, ComplexAckResult};
pub use error::{new_error, ErrorResult};
pub use iam::{new_iam, IAmResult};
pub use read_property::{new_read_property, ReadPropertyResult};
pub use simple_ack::new_sack;
pub use whois::new_whois;
pub use write_property::{new_write_property, WritePropertyResult};

use crate::apdu::Apdu;
use crate::bvlc::Bvlc;
use crate::error::{CodecError, Result};
use crate::message::Message;
use crate::npdu::Npdu;

/// A complete BACnet/IP message: one BVLC, one NPDU, one APDU.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceFrame {
    pub bvlc: Bvlc,
    pub npdu: Npdu,
    pub apdu: Apdu,
}

impl ServiceFrame {
    pub fn new(bvlc: Bvlc, npdu: Npdu, apdu: Apdu) -> Self {
        let mut frame = Self { bvlc, npdu, apdu };
        frame.set_length();
        frame
    }

    /// Stamps `bvlc.length` with the serialized size of the whole frame.
    pub fn set_length(&mut self) {
        self.bvlc.length = (self.bvlc.serialized_length()
            + self.npdu.serialized_length()
            + self.apdu.serialized_length()) as u16;
    }
}

impl Message for ServiceFrame {
    fn serialize_into(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() < self.serialized_length() {
            return Err(CodecError::TooShortToMarshalBinary);
        }
        let mut offset = 0;
        let bvlc_len = self.bvlc.serialized_length();
        self.bvlc.serialize_into(&mut buf[offset..offset + bvlc_len])?;
        offset += bvlc_len;

        let npdu_len = self.npdu.serialized_length();
        self.npdu.serialize_into(&mut buf[offset..offset + npdu_len])?;
        offset += npdu_len;

        let apdu_len = self.apdu.serialized_length();
        self.apdu.serialize_into(&mut buf[offset..offset + apdu_len])?;

        Ok(())
    }

    fn parse_from(bytes: &[u8]) -> Result<Self> {
        let bvlc = Bvlc::parse_from(bytes)?;
        let mut offset = bvlc.serialized_length();

        let npdu = Npdu::parse_from(&bytes[offset..])?;
        offset += npdu.serialized_length();

        let apdu = Apdu::parse_from(&bytes[offset..])?;

        Ok(ServiceFrame { bvlc, npdu, apdu })
    }

    fn serialized_length(&self) -> usize {
        self.bvlc.serialized_length() + self.npdu.serialized_length() + self.apdu.serialized_length()
    }
}

/// A service frame tagged with which service it turned out to be, as
/// produced by the parser dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceMessage {
    WhoIs(ServiceFrame),
    IAm(ServiceFrame),
    ReadProperty(ServiceFrame),
    WriteProperty(ServiceFrame),
    ComplexAck(ServiceFrame),
    SimpleAck(ServiceFrame),
    Error(ServiceFrame),
}

impl ServiceMessage {
    pub fn frame(&self) -> &ServiceFrame {
        match self {
            ServiceMessage::WhoIs(f)
            | ServiceMessage::IAm(f)
            | ServiceMessage::ReadProperty(f)
            | ServiceMessage::WriteProperty(f)
            | ServiceMessage::ComplexAck(f)
            | ServiceMessage::SimpleAck(f)
            | ServiceMessage::Error(f) => f,
        }
    }

    /// Projects this message's APDU object list onto its typed result.
    /// WhoIs and SimpleACK carry no fields, so they decode to a unit
    /// variant that only confirms the service choice matched.
    pub fn decode(&self) -> Result<ServiceDecoded> {
        match self {
            ServiceMessage::WhoIs(_) => Ok(ServiceDecoded::WhoIs),
            ServiceMessage::IAm(f) => Ok(ServiceDecoded::IAm(iam::decode(f)?)),
            ServiceMessage::ReadProperty(f) => Ok(ServiceDecoded::ReadProperty(read_property::decode(f)?)),
            ServiceMessage::WriteProperty(f) => Ok(ServiceDecoded::WriteProperty(write_property::decode(f)?)),
            ServiceMessage::ComplexAck(f) => Ok(ServiceDecoded::ComplexAck(complex_ack::decode(f)?)),
            ServiceMessage::SimpleAck(_) => Ok(ServiceDecoded::SimpleAck),
            ServiceMessage::Error(f) => Ok(ServiceDecoded::Error(error::decode(f)?)),
        }
    }
}

/// The typed result of [`ServiceMessage::decode`], one variant per service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceDecoded {
    WhoIs,
    IAm(IAmResult),
    ReadProperty(ReadPropertyResult),
    WriteProperty(WritePropertyResult),
    ComplexAck(ComplexAckResult),
    SimpleAck,
    Error(ErrorResult),
}

/// Helper for unicast confirmed-request builders: BVLC unicast, NPDU
/// expecting a reply.
pub(crate) fn make_unicast_request_frame(apdu: Apdu) -> ServiceFrame {
    ServiceFrame::new(Bvlc::new(crate::bvlc::BvlcFunction::OriginalUnicastNpdu), Npdu::new(true), apdu)
}

/// Helper for unicast non-confirmed-reply builders (ACKs and errors): BVLC
/// unicast, NPDU not expecting a reply.
pub(crate) fn make_unicast_reply_frame(apdu: Apdu) -> ServiceFrame {
    ServiceFrame::new(Bvlc::new(crate::bvlc::BvlcFunction::OriginalUnicastNpdu), Npdu::new(false), apdu)
}

/// Helper for broadcast unconfirmed builders (WhoIs, IAm): BVLC broadcast,
/// NPDU not expecting a reply.
pub(crate) fn make_broadcast_frame(apdu: Apdu) -> ServiceFrame {
    ServiceFrame::new(Bvlc::new(crate::bvlc::BvlcFunction::OriginalBroadcastNpdu), Npdu::new(false), apdu)
}

pub(crate) fn require_object_count(objects: &[crate::tag::Payload], expected: usize) -> Result<()> {
    if objects.len() != expected {
        return Err(CodecError::WrongObjectCount);
    }
    Ok(())
}
