//! WhoIs: unconfirmed device discovery broadcast, empty object list.

use super::{make_broadcast_frame, ServiceFrame};
use crate::apdu::{Apdu, PduType};
use crate::object::unconfirmed_service_choice::WHO_IS;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Builds a WhoIs broadcast and returns its serialized bytes.
pub fn new_whois() -> Vec<u8> {
    use crate::message::Message;
    frame().serialize()
}

pub(crate) fn frame() -> ServiceFrame {
    let apdu = Apdu::new(PduType::UnconfirmedReq, WHO_IS, Vec::new());
    make_broadcast_frame(apdu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_canonical_frame() {
        let bytes = new_whois();
        assert_eq!(bytes, vec![0x81, 0x0B, 0x00, 0x08, 0x01, 0x00, 0x10, 0x08]);
    }
}
