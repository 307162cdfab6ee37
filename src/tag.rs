//! Tag/Object primitives.
//!
//! The lowest layer of the stack: the tag-length-value encoding that
//! every APDU payload is built from. A tagged value's first byte packs
//! `(tag_number << 4) | (class << 3) | length`, followed by `length`
//! data bytes. A [`NamedTag`] is the single-byte opening/closing marker
//! that brackets constructed data (BACnet calls these "context tags 6
//! and 7" in disguise: class bit set, name field 0x06 or 0x07).
//!
//! [`Payload`] is the sum type a parser actually produces: either a
//! [`Object`] carrying real data, or a [`NamedTag`] structural marker.

use crate::error::{CodecError, Result};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// BACnet application tag numbers (class = Application).
pub mod application_tag {
    pub const NULL: u8 = 0;
    pub const BOOLEAN: u8 = 1;
    pub const UNSIGNED_INTEGER: u8 = 2;
    pub const SIGNED_INTEGER: u8 = 3;
    pub const REAL: u8 = 4;
    pub const DOUBLE: u8 = 5;
    pub const OCTET_STRING: u8 = 6;
    pub const CHARACTER_STRING: u8 = 7;
    pub const BIT_STRING: u8 = 8;
    pub const ENUMERATED: u8 = 9;
    pub const DATE: u8 = 10;
    pub const TIME: u8 = 11;
    pub const OBJECT_IDENTIFIER: u8 = 12;
}

const NAME_OPENING: u8 = 0x6;
const NAME_CLOSING: u8 = 0x7;

/// A single tagged value: tag number, class, length, and raw data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Object {
    pub tag_number: u8,
    pub tag_class: bool,
    pub length: u8,
    pub data: Vec<u8>,
}

impl Object {
    /// Minimum bytes needed to read the lead byte of an object.
    const LEN_MIN: usize = 1;

    pub fn new(tag_number: u8, tag_class: bool, data: Vec<u8>) -> Self {
        let length = data.len() as u8;
        Self {
            tag_number,
            tag_class,
            length,
            data,
        }
    }

    pub fn serialized_length(&self) -> usize {
        1 + self.length as usize
    }

    pub fn serialize_into(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() < self.serialized_length() {
            return Err(CodecError::TooShortToMarshalBinary);
        }
        buf[0] = (self.tag_number << 4) | ((self.tag_class as u8) << 3) | self.length;
        if self.length > 0 {
            buf[1..1 + self.length as usize].copy_from_slice(&self.data);
        }
        Ok(())
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.serialized_length()];
        // serialize_into only fails on undersized buffers, which cannot happen here.
        self.serialize_into(&mut buf).expect("buffer sized by serialized_length");
        buf
    }

    /// Parses one tagged value starting at `bytes[0]`. Does not consume
    /// trailing bytes beyond the object itself; callers track the offset.
    pub fn parse_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::LEN_MIN {
            return Err(CodecError::TooShortToParse);
        }
        let lead = bytes[0];
        let tag_number = lead >> 4;
        let tag_class = (lead & 0x8) != 0;
        let length = lead & 0x7;

        if length == 5 {
            return Err(CodecError::NotImplemented);
        }

        let length = length as usize;
        if 1 + length > bytes.len() {
            return Err(CodecError::TooShortToParse);
        }

        Ok(Object {
            tag_number,
            tag_class,
            length: length as u8,
            data: bytes[1..1 + length].to_vec(),
        })
    }
}

/// A single-byte opening/closing marker bracketing constructed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedTag {
    pub tag_number: u8,
    pub tag_class: bool,
    pub name: u8,
}

impl NamedTag {
    pub fn serialized_length(&self) -> usize {
        1
    }

    pub fn serialize_into(&self, buf: &mut [u8]) -> Result<()> {
        if buf.is_empty() {
            return Err(CodecError::TooShortToMarshalBinary);
        }
        buf[0] = (self.tag_number << 4) | ((self.tag_class as u8) << 3) | self.name;
        Ok(())
    }

    pub fn serialize(&self) -> Vec<u8> {
        vec![(self.tag_number << 4) | ((self.tag_class as u8) << 3) | self.name]
    }

    pub fn parse_from(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(CodecError::TooShortToParse);
        }
        let lead = bytes[0];
        Ok(NamedTag {
            tag_number: lead >> 4,
            tag_class: (lead & 0x8) != 0,
            name: lead & 0x7,
        })
    }

    pub fn is_opening(&self) -> bool {
        self.tag_class && self.name == NAME_OPENING
    }

    pub fn is_closing(&self) -> bool {
        self.tag_class && self.name == NAME_CLOSING
    }
}

/// Anything that can occupy a slot in an APDU's object list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    Value(Object),
    Marker(NamedTag),
}

impl Payload {
    pub fn as_object(&self) -> Result<&Object> {
        match self {
            Payload::Value(o) => Ok(o),
            Payload::Marker(_) => Err(CodecError::WrongPayload),
        }
    }

    pub fn as_named_tag(&self) -> Result<&NamedTag> {
        match self {
            Payload::Marker(n) => Ok(n),
            Payload::Value(_) => Err(CodecError::WrongPayload),
        }
    }

    pub fn serialized_length(&self) -> usize {
        match self {
            Payload::Value(o) => o.serialized_length(),
            Payload::Marker(n) => n.serialized_length(),
        }
    }

    pub fn serialize_into(&self, buf: &mut [u8]) -> Result<()> {
        match self {
            Payload::Value(o) => o.serialize_into(buf),
            Payload::Marker(n) => n.serialize_into(buf),
        }
    }
}

/// `enc_unsigned_u16` — application tag 2, length 2, big-endian.
pub fn enc_unsigned_u16(value: u16) -> Object {
    Object::new(application_tag::UNSIGNED_INTEGER, false, value.to_be_bytes().to_vec())
}

/// Decodes an unsigned integer object of length 1..=4, zero-extending big-endian bytes.
pub fn dec_unsigned(payload: &Payload) -> Result<u32> {
    let obj = payload.as_object()?;
    if obj.tag_number != application_tag::UNSIGNED_INTEGER || obj.tag_class {
        return Err(CodecError::WrongStructure);
    }
    match obj.length {
        1 => Ok(obj.data[0] as u32),
        2 => Ok(u16::from_be_bytes([obj.data[0], obj.data[1]]) as u32),
        3 => Ok(((obj.data[0] as u32) << 16) | (u16::from_be_bytes([obj.data[1], obj.data[2]]) as u32)),
        4 => Ok(u32::from_be_bytes([obj.data[0], obj.data[1], obj.data[2], obj.data[3]])),
        _ => Err(CodecError::NotImplemented),
    }
}

/// `enc_enumerated` — application tag 9, length 1.
pub fn enc_enumerated(value: u8) -> Object {
    Object::new(application_tag::ENUMERATED, false, vec![value])
}

/// Decodes an enumerated object of length 1..=4, matching the standard's
/// integer-widening rule for enumerations.
pub fn dec_enumerated(payload: &Payload) -> Result<u32> {
    let obj = payload.as_object()?;
    if obj.tag_number != application_tag::ENUMERATED || obj.tag_class {
        return Err(CodecError::WrongStructure);
    }
    match obj.length {
        1 => Ok(obj.data[0] as u32),
        2 => Ok(u16::from_be_bytes([obj.data[0], obj.data[1]]) as u32),
        3 => Ok(((obj.data[0] as u32) << 16) | (u16::from_be_bytes([obj.data[1], obj.data[2]]) as u32)),
        4 => Ok(u32::from_be_bytes([obj.data[0], obj.data[1], obj.data[2], obj.data[3]])),
        _ => Err(CodecError::NotImplemented),
    }
}

/// `enc_real` — application tag 4, length 4, IEEE-754 big-endian.
pub fn enc_real(value: f32) -> Object {
    Object::new(application_tag::REAL, false, value.to_be_bytes().to_vec())
}

pub fn dec_real(payload: &Payload) -> Result<f32> {
    let obj = payload.as_object()?;
    if obj.tag_number != application_tag::REAL || obj.tag_class {
        return Err(CodecError::WrongStructure);
    }
    if obj.length != 4 {
        return Err(CodecError::WrongStructure);
    }
    Ok(f32::from_be_bytes([obj.data[0], obj.data[1], obj.data[2], obj.data[3]]))
}

/// `enc_null` — application tag 0, length 0.
pub fn enc_null() -> Object {
    Object::new(application_tag::NULL, false, Vec::new())
}

pub fn dec_null(payload: &Payload) -> Result<()> {
    let obj = payload.as_object()?;
    if obj.tag_number != application_tag::NULL || obj.tag_class || obj.length != 0 {
        return Err(CodecError::WrongStructure);
    }
    Ok(())
}

/// `enc_object_identifier` — packs `(object_type << 22) | instance` into 4 bytes.
pub fn enc_object_identifier(ctx: bool, tag_n: u8, object_type: u16, instance: u32) -> Object {
    let tag_number = if ctx { tag_n } else { application_tag::OBJECT_IDENTIFIER };
    let raw = ((object_type as u32) << 22) | (instance & 0x3F_FFFF);
    Object::new(tag_number, ctx, raw.to_be_bytes().to_vec())
}

/// Decoded `(object_type, instance)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectIdentifier {
    pub object_type: u16,
    pub instance: u32,
}

pub fn dec_object_identifier(payload: &Payload) -> Result<ObjectIdentifier> {
    let obj = payload.as_object()?;
    if obj.length != 4 {
        return Err(CodecError::WrongStructure);
    }
    if !obj.tag_class && obj.tag_number != application_tag::OBJECT_IDENTIFIER {
        return Err(CodecError::WrongStructure);
    }
    let raw = u32::from_be_bytes([obj.data[0], obj.data[1], obj.data[2], obj.data[3]]);
    Ok(ObjectIdentifier {
        object_type: ((raw >> 22) & 0x3FF) as u16,
        instance: raw & 0x3F_FFFF,
    })
}

/// `enc_property_identifier` — single byte data.
pub fn enc_property_identifier(ctx: bool, tag_n: u8, property_id: u8) -> Object {
    Object::new(tag_n, ctx, vec![property_id])
}

pub fn dec_property_identifier(payload: &Payload) -> Result<u8> {
    let obj = payload.as_object()?;
    if obj.length != 1 {
        return Err(CodecError::WrongStructure);
    }
    Ok(obj.data[0])
}

/// `enc_priority` — single byte data, same wire shape as a property identifier.
pub fn enc_priority(ctx: bool, tag_n: u8, priority: u8) -> Object {
    Object::new(tag_n, ctx, vec![priority])
}

pub fn dec_priority(payload: &Payload) -> Result<u8> {
    let obj = payload.as_object()?;
    if obj.length != 1 {
        return Err(CodecError::WrongStructure);
    }
    Ok(obj.data[0])
}

/// `enc_opening_tag`/`enc_closing_tag` — structural markers, class=true.
pub fn enc_opening_tag(tag_n: u8) -> NamedTag {
    NamedTag {
        tag_number: tag_n,
        tag_class: true,
        name: NAME_OPENING,
    }
}

pub fn enc_closing_tag(tag_n: u8) -> NamedTag {
    NamedTag {
        tag_number: tag_n,
        tag_class: true,
        name: NAME_CLOSING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn unsigned_round_trip() {
        let obj = enc_unsigned_u16(1024);
        let decoded = dec_unsigned(&Payload::Value(obj)).unwrap();
        assert_eq!(decoded, 1024);
    }

    #[test]
    fn enumerated_round_trip() {
        let obj = enc_enumerated(3);
        let decoded = dec_enumerated(&Payload::Value(obj)).unwrap();
        assert_eq!(decoded, 3);
    }

    #[test]
    fn real_round_trip() {
        let obj = enc_real(23.5);
        let decoded = dec_real(&Payload::Value(obj)).unwrap();
        assert_eq!(decoded, 23.5);
    }

    #[test]
    fn object_identifier_round_trip() {
        let obj = enc_object_identifier(false, 0, 8, 321);
        let decoded = dec_object_identifier(&Payload::Value(obj)).unwrap();
        assert_eq!(decoded.object_type, 8);
        assert_eq!(decoded.instance, 321);
    }

    #[test]
    fn object_identifier_wire_bytes() {
        let obj = enc_object_identifier(false, 0, 8, 321);
        assert_eq!(obj.serialize(), vec![0xC4, 0x02, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn opening_closing_tags_round_trip() {
        let open = enc_opening_tag(3);
        let bytes = open.serialize();
        let parsed = NamedTag::parse_from(&bytes).unwrap();
        assert!(parsed.is_opening());

        let close = enc_closing_tag(3);
        let bytes = close.serialize();
        let parsed = NamedTag::parse_from(&bytes).unwrap();
        assert!(parsed.is_closing());
    }

    #[test]
    fn extended_length_is_not_implemented() {
        // tag 2 (unsigned), class 0, length field = 5 (extended-length escape)
        let bytes = [0x25u8, 0x00];
        let err = Object::parse_from(&bytes).unwrap_err();
        assert_eq!(err, CodecError::NotImplemented);
    }

    #[test]
    fn short_buffer_fails_to_parse() {
        let bytes = [0x22u8]; // claims length 2 but no data follows
        let err = Object::parse_from(&bytes).unwrap_err();
        assert_eq!(err, CodecError::TooShortToParse);
    }

    #[test]
    fn priority_round_trip() {
        let obj = enc_priority(true, 4, 16);
        let decoded = dec_priority(&Payload::Value(obj)).unwrap();
        assert_eq!(decoded, 16);
    }

    proptest::proptest! {
        #[test]
        fn unsigned_round_trips_for_any_u16(v: u16) {
            let decoded = dec_unsigned(&Payload::Value(enc_unsigned_u16(v))).unwrap();
            prop_assert_eq!(decoded, v as u32);
        }

        #[test]
        fn enumerated_round_trips_for_any_u8(v: u8) {
            let decoded = dec_enumerated(&Payload::Value(enc_enumerated(v))).unwrap();
            prop_assert_eq!(decoded, v as u32);
        }

        #[test]
        fn real_round_trips_for_any_f32(v: f32) {
            let decoded = dec_real(&Payload::Value(enc_real(v))).unwrap();
            prop_assert_eq!(decoded.to_bits(), v.to_bits());
        }

        #[test]
        fn object_identifier_round_trips_for_any_instance(object_type in 0u16..0x3FF, instance in 0u32..0x3F_FFFF) {
            let obj = enc_object_identifier(false, 0, object_type, instance);
            let decoded = dec_object_identifier(&Payload::Value(obj)).unwrap();
            prop_assert_eq!(decoded.object_type, object_type);
            prop_assert_eq!(decoded.instance, instance);
        }
    }
}
