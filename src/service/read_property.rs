//! ReadProperty: confirmed request, object list `[OID ctx0, PropertyId ctx1]`.

use super::{make_unicast_request_frame, require_object_count, ServiceFrame};
use crate::apdu::{Apdu, PduType};
use crate::error::Result;
use crate::object::confirmed_service_choice::READ_PROPERTY;
use crate::tag::{dec_object_identifier, dec_property_identifier, enc_object_identifier, enc_property_identifier, Payload};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Decoded ReadProperty request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadPropertyResult {
    pub object_type: u16,
    pub instance: u32,
    pub property_id: u8,
}

/// Builds a confirmed ReadProperty request and returns its serialized bytes.
pub fn new_read_property(object_type: u16, instance: u32, property_id: u8) -> Vec<u8> {
    use crate::message::Message;
    frame(object_type, instance, property_id).serialize()
}

pub(crate) fn frame(object_type: u16, instance: u32, property_id: u8) -> ServiceFrame {
    let objects = vec![
        Payload::Value(enc_object_identifier(true, 0, object_type, instance)),
        Payload::Value(enc_property_identifier(true, 1, property_id)),
    ];
    let apdu = Apdu::new(PduType::ConfirmedReq, READ_PROPERTY, objects);
    make_unicast_request_frame(apdu)
}

/// Projects a decoded frame's object list onto [`ReadPropertyResult`].
pub fn decode(frame: &ServiceFrame) -> Result<ReadPropertyResult> {
    let objects = &frame.apdu.objects;
    require_object_count(objects, 2)?;

    let oid = dec_object_identifier(&objects[0])?;
    let property_id = dec_property_identifier(&objects[1])?;

    Ok(ReadPropertyResult {
        object_type: oid.object_type,
        instance: oid.instance,
        property_id,
    })
}
