use crate::channel::callbacks::{OnAck, OnRequest, OnSend};
use crate::channel::Responder;
use crate::constants::DEFAULT_PORT;
use crate::error::Result;

/// Configuration for [`MessageChannel::init`].
///
/// The send primitive is mandatory and therefore a constructor argument;
/// everything else is optional with chainable setters.
///
/// [`MessageChannel::init`]: crate::channel::MessageChannel::init
pub struct ChannelConfig {
    pub(crate) on_send: OnSend,
    pub(crate) on_request: Option<OnRequest>,
    pub(crate) port: u16,
}

impl ChannelConfig {
    pub fn new<F>(on_send: F) -> Self
    where
        F: FnMut(Vec<u8>, u16, Option<OnAck>) -> Result<()> + 'static,
    {
        Self {
            on_send: Box::new(on_send),
            on_request: None,
            port: DEFAULT_PORT,
        }
    }

    /// Handler for inbound requests. A channel without one silently ignores
    /// every request frame it receives.
    pub fn on_request<F>(mut self, on_request: F) -> Self
    where
        F: FnMut(i32, Vec<u8>, Responder) -> Result<()> + 'static,
    {
        self.on_request = Some(Box::new(on_request));
        self
    }

    /// App port to send on, in `[MIN_APP_PORT, MAX_APP_PORT]`.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}
