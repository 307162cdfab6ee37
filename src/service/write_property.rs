//! WriteProperty: confirmed request, object list
//! `[OID ctx0, PropertyId ctx1, Open(3), Real value, Null, Close(3), Priority ctx4=16]`.
//!
//! Opening/closing markers are stripped by the APDU object-parsing loop
//! before `decode` ever sees the list, so the five remaining values land
//! at positions `[ObjectId, PropertyId, Real, Null, Priority]`.

use super::{make_unicast_request_frame, require_object_count, ServiceFrame};
use crate::apdu::{Apdu, PduType};
use crate::error::Result;
use crate::object::confirmed_service_choice::WRITE_PROPERTY;
use crate::tag::{
    dec_object_identifier, dec_priority, dec_property_identifier, dec_real, enc_closing_tag,
    enc_null, enc_object_identifier, enc_opening_tag, enc_priority, enc_property_identifier,
    enc_real, Payload,
};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

const PRIORITY_DEFAULT: u8 = 16;

/// Decoded WriteProperty request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WritePropertyResult {
    pub object_type: u16,
    pub instance: u32,
    pub property_id: u8,
    pub value: f32,
    pub priority: u8,
}

/// Builds a confirmed WriteProperty request and returns its serialized bytes.
pub fn new_write_property(object_type: u16, instance: u32, property_id: u8, value: f32) -> Vec<u8> {
    use crate::message::Message;
    frame(object_type, instance, property_id, value).serialize()
}

pub(crate) fn frame(object_type: u16, instance: u32, property_id: u8, value: f32) -> ServiceFrame {
    let objects = vec![
        Payload::Value(enc_object_identifier(true, 0, object_type, instance)),
        Payload::Value(enc_property_identifier(true, 1, property_id)),
        Payload::Marker(enc_opening_tag(3)),
        Payload::Value(enc_real(value)),
        Payload::Value(enc_null()),
        Payload::Marker(enc_closing_tag(3)),
        Payload::Value(enc_priority(true, 4, PRIORITY_DEFAULT)),
    ];
    let apdu = Apdu::new(PduType::ConfirmedReq, WRITE_PROPERTY, objects);
    make_unicast_request_frame(apdu)
}

/// Projects a decoded frame's object list onto [`WritePropertyResult`].
pub fn decode(frame: &ServiceFrame) -> Result<WritePropertyResult> {
    let objects = &frame.apdu.objects;
    require_object_count(objects, 5)?;

    let oid = dec_object_identifier(&objects[0])?;
    let property_id = dec_property_identifier(&objects[1])?;
    let value = dec_real(&objects[2])?;
    let priority = dec_priority(&objects[4])?;

    Ok(WritePropertyResult {
        object_type: oid.object_type,
        instance: oid.instance,
        property_id,
        value,
        priority,
    })
}
