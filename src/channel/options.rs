use crate::constants::DEFAULT_REQUEST_TIMEOUT_MS;

/// Per-request knobs for [`MessageChannel::send_request`].
///
/// [`MessageChannel::send_request`]: crate::channel::MessageChannel::send_request
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions {
    timeout_ms: u64,
    no_response: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self {
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            no_response: false,
        }
    }

    /// Deadline for the correlated response, in milliseconds from send.
    pub fn timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Forgo correlation: the request is sent without an id and no response
    /// is ever awaited.
    pub fn no_response(mut self, enabled: bool) -> Self {
        self.no_response = enabled;
        self
    }

    pub fn is_no_response(&self) -> bool {
        self.no_response
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new()
    }
}
