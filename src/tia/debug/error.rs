use crate::tia::debug::fields::Field;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TiaDebugError {
    #[error("Unknown TIA field: {0}")]
    UnknownField(String),

    #[error("Value ${value:02X} does not fit {field} (max ${max:02X})")]
    ValueOutOfRange { field: Field, value: u8, max: u8 },

    #[error("Unknown TIA write register: 0x{0:02X}")]
    UnknownRegister(u8),
}
