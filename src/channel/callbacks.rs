use crate::channel::Responder;
use crate::error::Result;

/// A response observed for an outbound request.
///
/// `result` is the peer's result code (`0` is success); `data` is the
/// payload that followed the frame header, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub result: i32,
    pub data: Vec<u8>,
}

/// Acknowledgment delivery for a sent datagram. Reserved; the channel
/// currently always passes `None` to `on_send`.
pub type OnAck = Box<dyn FnOnce(Result<()>)>;

/// Transport send primitive supplied by the embedder.
///
/// Receives the fully composed datagram (header plus payload), the app port
/// to send on, and an optional acknowledgment hook. Ownership of the buffer
/// transfers to the callee.
pub type OnSend = Box<dyn FnMut(Vec<u8>, u16, Option<OnAck>) -> Result<()>>;

/// Inbound request handler: `(request type, payload, responder)`.
///
/// Errors returned here are logged by the channel and the frame is dropped;
/// they do not affect channel state.
pub type OnRequest = Box<dyn FnMut(i32, Vec<u8>, Responder) -> Result<()>>;

/// Terminal completion of an outbound request. Invoked exactly once with
/// the peer's response, `Err(Timeout)`, or `Err(Cancelled)`.
pub type OnResponse = Box<dyn FnOnce(Result<Response>)>;
