//! Object type, property identifier, service choice, and error constants
//! the service layer references by name instead of raw byte literals.

/// BACnet object type identifiers (the subset this core names; any other
/// value decodes fine, it just has no named constant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ObjectType {
    AnalogInput = 0,
    AnalogOutput = 1,
    Device = 8,
}

/// BACnet property identifiers this core names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PropertyIdentifier {
    PresentValue = 85,
}

/// Unconfirmed service choice numbers.
pub mod unconfirmed_service_choice {
    pub const I_AM: u8 = 0;
    pub const WHO_IS: u8 = 8;
}

/// Confirmed service choice numbers.
pub mod confirmed_service_choice {
    pub const READ_PROPERTY: u8 = 12;
    pub const WRITE_PROPERTY: u8 = 15;
}

/// Error class numbers.
pub mod error_class {
    pub const OBJECT: u8 = 1;
    pub const SERVICE: u8 = 5;
}

/// Error code numbers.
pub mod error_code {
    pub const UNKNOWN_OBJECT: u8 = 31;
    pub const SERVICE_REQUEST_DENIED: u8 = 29;
}
