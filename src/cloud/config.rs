use crate::channel::{OnAck, OnSend};
use crate::cloud::DiagnosticsProvider;
use crate::constants::DEFAULT_PORT;
use crate::error::Result;

/// Configuration for [`CloudProtocol::init`].
///
/// [`CloudProtocol::init`]: crate::cloud::CloudProtocol::init
pub struct CloudConfig {
    pub(crate) on_send: OnSend,
    pub(crate) port: u16,
    pub(crate) diagnostics: Option<Box<dyn DiagnosticsProvider>>,
}

impl CloudConfig {
    pub fn new<F>(on_send: F) -> Self
    where
        F: FnMut(Vec<u8>, u16, Option<OnAck>) -> Result<()> + 'static,
    {
        Self {
            on_send: Box::new(on_send),
            port: DEFAULT_PORT,
            diagnostics: None,
        }
    }

    /// App port to send on, in `[MIN_APP_PORT, MAX_APP_PORT]`.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Source of diagnostic readings. Without one, every diagnostics
    /// request is answered with an empty source list.
    pub fn diagnostics<P>(mut self, provider: P) -> Self
    where
        P: DiagnosticsProvider + 'static,
    {
        self.diagnostics = Some(Box::new(provider));
        self
    }
}
