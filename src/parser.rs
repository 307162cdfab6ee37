//! Layer 6: the dispatcher that turns raw bytes into a [`ServiceMessage`].
//!
//! Parses BVLC and NPDU unconditionally, then reads the APDU's `pdu_type`
//! and picks a service discriminator from it: `(pdu_type, service)` for the
//! two unconfirmed/confirmed request shapes this core knows, and `pdu_type`
//! alone for the three reply shapes, since every reply's object layout is
//! determined once you know which request kind it replies to.

use crate::apdu::PduType;
use crate::bvlc::BVLC_TYPE;
use crate::error::{CodecError, Result};
use crate::object::{confirmed_service_choice, unconfirmed_service_choice};
use crate::service::{ServiceFrame, ServiceMessage};

const MIN_FRAME_LEN: usize = 8;

/// Parses a complete BACnet/IP frame and identifies which service it is.
pub fn parse(bytes: &[u8]) -> Result<ServiceMessage> {
    if bytes.len() < MIN_FRAME_LEN {
        return Err(CodecError::TooShortToParse);
    }
    if bytes[0] != BVLC_TYPE {
        return Err(CodecError::WrongStructure);
    }

    let frame = ServiceFrame::parse_from(bytes)?;
    let apdu = &frame.apdu;

    match apdu.pdu_type {
        PduType::UnconfirmedReq => match apdu.service {
            unconfirmed_service_choice::WHO_IS => Ok(ServiceMessage::WhoIs(frame)),
            unconfirmed_service_choice::I_AM => Ok(ServiceMessage::IAm(frame)),
            _ => Err(CodecError::NotImplemented),
        },
        PduType::ConfirmedReq => match apdu.service {
            confirmed_service_choice::READ_PROPERTY => Ok(ServiceMessage::ReadProperty(frame)),
            confirmed_service_choice::WRITE_PROPERTY => Ok(ServiceMessage::WriteProperty(frame)),
            _ => Err(CodecError::NotImplemented),
        },
        PduType::ComplexAck => Ok(ServiceMessage::ComplexAck(frame)),
        PduType::SimpleAck => Ok(ServiceMessage::SimpleAck(frame)),
        PduType::Error => Ok(ServiceMessage::Error(frame)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{new_iam, new_read_property, new_whois};

    #[test]
    fn dispatches_whois() {
        let bytes = new_whois();
        assert!(matches!(parse(&bytes).unwrap(), ServiceMessage::WhoIs(_)));
    }

    #[test]
    fn dispatches_iam() {
        let bytes = new_iam(321, 1);
        assert!(matches!(parse(&bytes).unwrap(), ServiceMessage::IAm(_)));
    }

    #[test]
    fn dispatches_read_property() {
        let bytes = new_read_property(1, 0, 85);
        assert!(matches!(parse(&bytes).unwrap(), ServiceMessage::ReadProperty(_)));
    }

    #[test]
    fn rejects_wrong_leading_byte() {
        let mut bytes = new_whois();
        bytes[0] = 0x00;
        assert_eq!(parse(&bytes).unwrap_err(), CodecError::WrongStructure);
    }

    #[test]
    fn rejects_short_input() {
        let bytes = [0x81, 0x0B, 0x00, 0x08];
        assert_eq!(parse(&bytes).unwrap_err(), CodecError::TooShortToParse);
    }
}
