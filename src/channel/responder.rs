use std::rc::Rc;

use crate::channel::message_channel::ChannelShared;
use crate::error::{Error, Result};
use crate::frame::FrameHeader;

/// Single-use handle for answering an inbound request.
///
/// A `Responder` is minted by [`MessageChannel::receive`] for every request
/// frame it dispatches. It captures the request id and the session id that
/// was current at receipt, not the channel itself, so it may be held across
/// the dispatch without borrowing anything. Sending consumes the handle,
/// which makes at-most-once response production a compile-time property.
///
/// If the channel is reset before the handle is used, `send` observes the
/// session mismatch and fails with [`Error::Cancelled`] instead of emitting
/// a stale frame. For requests that expect no response, `send` is a no-op
/// behind the same session guard.
///
/// A handle that is dropped unused produces nothing; the peer sees a
/// timeout.
///
/// [`MessageChannel::receive`]: crate::channel::MessageChannel::receive
pub struct Responder {
    request_id: Option<u32>,
    session_id: u32,
    shared: Rc<ChannelShared>,
}

impl Responder {
    pub(crate) fn new(request_id: Option<u32>, session_id: u32, shared: Rc<ChannelShared>) -> Self {
        Self {
            request_id,
            session_id,
            shared,
        }
    }

    /// Id of the request being answered; `None` when the peer forwent
    /// correlation.
    pub fn request_id(&self) -> Option<u32> {
        self.request_id
    }

    pub fn expects_response(&self) -> bool {
        self.request_id.is_some()
    }

    /// Composes and sends the RESPONSE frame for this request.
    ///
    /// `result` is the result code to place in the header (`0` for
    /// success); `data` is the response payload.
    pub fn send(self, result: i32, data: Vec<u8>) -> Result<()> {
        if self.session_id != self.shared.session_id() {
            return Err(Error::Cancelled);
        }
        let Some(id) = self.request_id else {
            return Ok(());
        };
        self.shared
            .send_frame(&FrameHeader::response(result, id), &data, None)
    }
}
