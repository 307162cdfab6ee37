//! Error reply: object list `[ErrorClass enum, ErrorCode enum]`.

use super::{make_unicast_reply_frame, require_object_count, ServiceFrame};
use crate::apdu::{Apdu, PduType};
use crate::error::Result;
use crate::tag::{dec_enumerated, enc_enumerated, Payload};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Decoded Error result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorResult {
    pub error_class: u8,
    pub error_code: u8,
}

/// Builds an Error reply for service choice `service` and returns its
/// serialized bytes.
pub fn new_error(service: u8, error_class: u8, error_code: u8) -> Vec<u8> {
    use crate::message::Message;
    frame(service, error_class, error_code).serialize()
}

pub(crate) fn frame(service: u8, error_class: u8, error_code: u8) -> ServiceFrame {
    let objects = vec![
        Payload::Value(enc_enumerated(error_class)),
        Payload::Value(enc_enumerated(error_code)),
    ];
    let apdu = Apdu::new(PduType::Error, service, objects);
    make_unicast_reply_frame(apdu)
}

/// Projects a decoded frame's object list onto [`ErrorResult`].
pub fn decode(frame: &ServiceFrame) -> Result<ErrorResult> {
    let objects = &frame.apdu.objects;
    require_object_count(objects, 2)?;

    let error_class = dec_enumerated(&objects[0])? as u8;
    let error_code = dec_enumerated(&objects[1])? as u8;

    Ok(ErrorResult { error_class, error_code })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::object::{confirmed_service_choice::READ_PROPERTY, error_class, error_code};

    #[test]
    fn round_trip_decode() {
        let f = frame(READ_PROPERTY, error_class::OBJECT, error_code::UNKNOWN_OBJECT);
        let bytes = f.serialize();
        let parsed = ServiceFrame::parse_from(&bytes).unwrap();
        let decoded = decode(&parsed).unwrap();
        assert_eq!(decoded, ErrorResult { error_class: 1, error_code: 31 });
    }
}
