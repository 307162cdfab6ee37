//! A codec for BACnet/IP (ANSI/ASHRAE 135 Annex J): BVLC + NPDU + APDU
//! framing, the tag-length-value object encoding APDU payloads are built
//! from, and a service layer covering device discovery (WhoIs/IAm) and
//! property read/write (ReadProperty/WriteProperty plus their ACK and
//! Error replies).
//!
//! This crate is a pure value transform. It owns no sockets, no timers,
//! and no background threads — callers supply bytes received off the
//! wire to [`parse`] and hand the bytes returned by the `new_*`
//! constructors to their own I/O layer.
//!
//! ```
//! use bacnet_codec::{new_whois, parse};
//!
//! let bytes = new_whois();
//! let message = parse(&bytes).unwrap();
//! message.decode().unwrap();
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

pub mod apdu;
pub mod bvlc;
pub mod error;
pub mod message;
pub mod npdu;
pub mod object;
pub mod parser;
pub mod service;
pub mod tag;

pub use error::{CodecError, Result};
pub use message::Message;
pub use parser::parse;
pub use service::{
    new_cack, new_error, new_iam, new_read_property, new_sack, new_whois, new_write_property,
    ServiceDecoded, ServiceFrame, ServiceMessage,
};

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whois_round_trips_through_the_public_api() {
        let bytes = new_whois();
        let message = parse(&bytes).unwrap();
        assert!(matches!(message, ServiceMessage::WhoIs(_)));
        assert!(matches!(message.decode().unwrap(), ServiceDecoded::WhoIs));
    }

    #[test]
    fn iam_round_trips_through_the_public_api() {
        let bytes = new_iam(321, 1);
        let message = parse(&bytes).unwrap();
        match message.decode().unwrap() {
            ServiceDecoded::IAm(result) => {
                assert_eq!(result.device_id, 321);
                assert_eq!(result.vendor_id, 1);
            }
            other => panic!("expected IAm, got {other:?}"),
        }
    }
}
