/// Current reading of a numeric diagnostic source.
///
/// Only 32-bit integer sources travel on the wire; each serializes to four
/// big-endian bytes in a diagnostics response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticValue {
    Int32(i32),
    Uint32(u32),
}

impl DiagnosticValue {
    /// Network-order byte image used in the diagnostics response.
    pub fn to_be_bytes(self) -> [u8; 4] {
        match self {
            DiagnosticValue::Int32(v) => v.to_be_bytes(),
            DiagnosticValue::Uint32(v) => v.to_be_bytes(),
        }
    }
}

/// External source of diagnostic readings, addressed by integer id.
///
/// `query` resolves an id and reads its current value in one step. `None`
/// covers every case that produces no response entry: an id that does not
/// resolve, a source of a type other than the 32-bit integers, or a source
/// that resolves but fails to produce a value.
pub trait DiagnosticsProvider {
    fn query(&mut self, id: u32) -> Option<DiagnosticValue>;
}
