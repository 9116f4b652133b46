use std::convert::TryFrom;

/// Opcodes of the cloud request set, carried in the frame header code field.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    /// Reserved handshake opcode. Accepted and answered with success.
    Hello = 1,
    /// Application event carrying a code and an optional encoded value.
    Event = 2,
    /// Diagnostics query over a set of source ids.
    Diagnostics = 3,
}

impl TryFrom<i32> for RequestType {
    type Error = ();

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RequestType::Hello),
            2 => Ok(RequestType::Event),
            3 => Ok(RequestType::Diagnostics),
            _ => Err(()),
        }
    }
}
