//! ComplexACK: property-read reply, object list
//! `[OID ctx0, PropertyId ctx1, Open(3), Real value, Close(3)]`.
//!
//! Markers are stripped on decode, leaving `[ObjectId, PropertyId, Real]`.

use super::{make_unicast_reply_frame, require_object_count, ServiceFrame};
use crate::apdu::{Apdu, PduType};
use crate::error::Result;
use crate::tag::{
    dec_object_identifier, dec_property_identifier, dec_real, enc_closing_tag,
    enc_object_identifier, enc_opening_tag, enc_property_identifier, enc_real, Payload,
};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Decoded ComplexACK (property read) result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplexAckResult {
    pub object_type: u16,
    pub instance: u32,
    pub property_id: u8,
    pub present_value: f32,
}

/// Builds a ComplexACK carrying `value` as the present value of the named
/// object/property, in reply to service choice `service`.
pub fn new_cack(service: u8, object_type: u16, instance: u32, property_id: u8, value: f32) -> Vec<u8> {
    use crate::message::Message;
    frame(service, object_type, instance, property_id, value).serialize()
}

pub(crate) fn frame(service: u8, object_type: u16, instance: u32, property_id: u8, value: f32) -> ServiceFrame {
    let objects = vec![
        Payload::Value(enc_object_identifier(true, 0, object_type, instance)),
        Payload::Value(enc_property_identifier(true, 1, property_id)),
        Payload::Marker(enc_opening_tag(3)),
        Payload::Value(enc_real(value)),
        Payload::Marker(enc_closing_tag(3)),
    ];
    let apdu = Apdu::new(PduType::ComplexAck, service, objects);
    make_unicast_reply_frame(apdu)
}

/// Projects a decoded frame's object list onto [`ComplexAckResult`].
pub fn decode(frame: &ServiceFrame) -> Result<ComplexAckResult> {
    let objects = &frame.apdu.objects;
    require_object_count(objects, 3)?;

    let oid = dec_object_identifier(&objects[0])?;
    let property_id = dec_property_identifier(&objects[1])?;
    let present_value = dec_real(&objects[2])?;

    Ok(ComplexAckResult {
        object_type: oid.object_type,
        instance: oid.instance,
        property_id,
        present_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::object::confirmed_service_choice::READ_PROPERTY;

    #[test]
    fn round_trip_decode() {
        let f = frame(READ_PROPERTY, 1, 1, 85, 1.1);
        let bytes = f.serialize();
        let parsed = ServiceFrame::parse_from(&bytes).unwrap();
        let decoded = decode(&parsed).unwrap();
        assert_eq!(decoded.object_type, 1);
        assert_eq!(decoded.instance, 1);
        assert_eq!(decoded.property_id, 85);
        assert!((decoded.present_value - 1.1).abs() < 1e-6);
    }
}
