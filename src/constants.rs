// Transport-facing constants
pub const DEFAULT_PORT: u16 = 223;
pub const MIN_APP_PORT: u16 = 1; // Inclusive app port range of the bearer
pub const MAX_APP_PORT: u16 = 223;

// Channel constants
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;
pub const MAX_REQUEST_ID: u32 = u16::MAX as u32; // Request ids wrap after this value
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 100;

// Frame codec constants
pub const MAX_FRAME_HEADER_SIZE: usize = 11; // Flags octet plus two 5-byte varints
