//! IAm: unconfirmed device identification broadcast.
//!
//! Object list: `[DeviceOID, MaxAPDU u16, SegSupported enum, VendorID u16]`.

use super::{make_broadcast_frame, require_object_count, ServiceFrame};
use crate::apdu::{Apdu, PduType};
use crate::error::Result;
use crate::object::{unconfirmed_service_choice::I_AM, ObjectType};
use crate::tag::{
    dec_enumerated, dec_object_identifier, dec_unsigned, enc_enumerated, enc_object_identifier,
    enc_unsigned_u16, Payload,
};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Decoded IAm result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IAmResult {
    pub device_id: u32,
    pub max_apdu: u16,
    pub seg_supported: u8,
    pub vendor_id: u16,
}

/// Builds an IAm broadcast announcing `device_id`/`vendor_id` and returns
/// its serialized bytes. Max APDU and segmentation-supported are fixed at
/// the values this core always reports (1024 bytes, no segmentation).
pub fn new_iam(device_id: u32, vendor_id: u16) -> Vec<u8> {
    use crate::message::Message;
    frame(device_id, vendor_id).serialize()
}

pub(crate) fn frame(device_id: u32, vendor_id: u16) -> ServiceFrame {
    let objects = vec![
        Payload::Value(enc_object_identifier(false, 0, ObjectType::Device as u16, device_id)),
        Payload::Value(enc_unsigned_u16(1024)),
        Payload::Value(enc_enumerated(0)),
        Payload::Value(enc_unsigned_u16(vendor_id)),
    ];
    let apdu = Apdu::new(PduType::UnconfirmedReq, I_AM, objects);
    make_broadcast_frame(apdu)
}

/// Projects a decoded frame's object list onto [`IAmResult`].
pub fn decode(frame: &ServiceFrame) -> Result<IAmResult> {
    let objects = &frame.apdu.objects;
    require_object_count(objects, 4)?;

    let device_id = dec_object_identifier(&objects[0])?.instance;
    let max_apdu = dec_unsigned(&objects[1])? as u16;
    let seg_supported = dec_enumerated(&objects[2])? as u8;
    let vendor_id = dec_unsigned(&objects[3])? as u16;

    Ok(IAmResult {
        device_id,
        max_apdu,
        seg_supported,
        vendor_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    #[test]
    fn matches_canonical_frame() {
        let bytes = new_iam(321, 1);
        assert_eq!(
            bytes,
            vec![
                0x81, 0x0B, 0x00, 0x14, 0x01, 0x00, 0x10, 0x00, 0xC4, 0x02, 0x00, 0x00, 0x01, 0x22, 0x04, 0x00, 0x91,
                0x00, 0x21, 0x01,
            ]
        );
    }

    #[test]
    fn round_trip_decode() {
        let f = frame(321, 1);
        let bytes = f.serialize();
        let parsed = ServiceFrame::parse_from(&bytes).unwrap();
        let decoded = decode(&parsed).unwrap();
        assert_eq!(
            decoded,
            IAmResult {
                device_id: 321,
                max_apdu: 1024,
                seg_supported: 0,
                vendor_id: 1,
            }
        );
    }
}
