use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::channel::callbacks::{OnAck, OnRequest, OnResponse, OnSend, Response};
use crate::channel::{ChannelConfig, RequestOptions, Responder};
use crate::constants::{
    DEFAULT_MAX_PAYLOAD_SIZE, MAX_APP_PORT, MAX_FRAME_HEADER_SIZE, MAX_REQUEST_ID, MIN_APP_PORT,
};
use crate::error::{Error, Result};
use crate::frame::{FrameCodec, FrameHeader};
use crate::utils::now_ms;

/// State shared between the channel and the responders it hands out.
///
/// Responders outlive the `receive` call that minted them, so the send
/// primitive and the session counter live behind an `Rc` rather than in the
/// channel proper. The session id is the authorization to speak: a responder
/// captured before a `reset` no longer matches and goes quiet.
pub(crate) struct ChannelShared {
    on_send: RefCell<OnSend>,
    session_id: Cell<u32>,
    port: u16,
}

impl ChannelShared {
    fn new(on_send: OnSend, port: u16) -> Self {
        Self {
            on_send: RefCell::new(on_send),
            session_id: Cell::new(0),
            port,
        }
    }

    pub(crate) fn session_id(&self) -> u32 {
        self.session_id.get()
    }

    fn bump_session(&self) {
        self.session_id.set(self.session_id.get().wrapping_add(1));
    }

    /// Composes header plus payload into one datagram and hands it to the
    /// transport. `on_send` must not reenter the channel.
    pub(crate) fn send_frame(
        &self,
        header: &FrameHeader,
        payload: &[u8],
        on_ack: Option<OnAck>,
    ) -> Result<()> {
        let mut header_buf = [0u8; MAX_FRAME_HEADER_SIZE];
        let header_size = FrameCodec::encode(&mut header_buf, header)?;
        let mut buf = Vec::with_capacity(header_size + payload.len());
        buf.extend_from_slice(&header_buf[..header_size]);
        buf.extend_from_slice(payload);
        (self.on_send.borrow_mut())(buf, self.port, on_ack)
    }
}

struct OutRequest {
    on_response: Option<OnResponse>,
    deadline: u64,
}

/// Request/response state machine over a datagram transport.
///
/// The channel tracks outbound requests by id, correlates inbound responses,
/// expires deadlines from `run()`, and dispatches inbound requests to the
/// configured handler with a [`Responder`]. Everything happens on the
/// caller's execution context; the only outside call is `on_send`.
pub struct MessageChannel {
    shared: Option<Rc<ChannelShared>>,
    on_request: Option<OnRequest>,
    out_reqs: BTreeMap<u32, OutRequest>,
    next_out_req_id: u32,
    max_payload_size: usize,
}

impl MessageChannel {
    pub fn new() -> Self {
        Self {
            shared: None,
            on_request: None,
            out_reqs: BTreeMap::new(),
            next_out_req_id: 0,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }

    /// Initializes the channel. Idempotent once initialized.
    ///
    /// Fails with `InvalidArgument` when the configured port is outside the
    /// bearer's app port range.
    pub fn init(&mut self, config: ChannelConfig) -> Result<()> {
        if self.shared.is_some() {
            return Ok(());
        }
        if config.port < MIN_APP_PORT || config.port > MAX_APP_PORT {
            return Err(Error::InvalidArgument);
        }
        self.on_request = config.on_request;
        self.shared = Some(Rc::new(ChannelShared::new(config.on_send, config.port)));
        Ok(())
    }

    /// Sends a request frame carrying `req_type` and `data`.
    ///
    /// Unless `opts` forgo the response, the request is assigned the next
    /// id (wrapping after `MAX_REQUEST_ID`), tracked until a terminal
    /// outcome, and `on_response` fires exactly once with the response, a
    /// timeout, or a cancellation. A send failure rolls the tracked entry
    /// back and surfaces to the caller; `on_response` is then never invoked.
    pub fn send_request(
        &mut self,
        req_type: i32,
        data: Vec<u8>,
        on_response: Option<OnResponse>,
        opts: RequestOptions,
    ) -> Result<()> {
        let shared = Rc::clone(self.shared.as_ref().ok_or(Error::InvalidState)?);

        let id = self.next_out_req_id;
        self.next_out_req_id = if id >= MAX_REQUEST_ID { 0 } else { id + 1 };

        let no_response = opts.is_no_response();
        let header = if no_response {
            FrameHeader::request_no_response(req_type)
        } else {
            self.out_reqs.insert(
                id,
                OutRequest {
                    on_response,
                    deadline: now_ms().saturating_add(opts.timeout_ms()),
                },
            );
            FrameHeader::request(req_type, id)
        };

        let sent = shared.send_frame(&header, &data, None);
        if sent.is_err() && !no_response {
            self.out_reqs.remove(&id);
        }
        sent
    }

    /// Processes one inbound datagram exactly as delivered on the app port.
    ///
    /// Requests are dispatched to the configured handler together with a
    /// [`Responder`] capturing the current session. Responses are correlated
    /// against the tracked outbound requests; an unknown id is ignored.
    /// Header decode errors surface to the caller and the frame is dropped
    /// with no state change.
    pub fn receive(&mut self, mut data: Vec<u8>, port: u16) -> Result<()> {
        let shared = self.shared.as_ref().ok_or(Error::InvalidState)?;

        let (header, header_size) = FrameCodec::decode(&data)?;
        data.drain(..header_size);
        tracing::trace!(port, code = header.code, "frame received");

        if header.is_request() {
            let Some(on_request) = self.on_request.as_mut() else {
                return Ok(());
            };
            let request_id = if header.expects_response() {
                header.request_id
            } else {
                None
            };
            let responder = Responder::new(request_id, shared.session_id(), Rc::clone(shared));
            if let Err(err) = on_request(header.code, data, responder) {
                tracing::error!(%err, "request handler failed");
            }
        } else {
            let Some(id) = header.request_id else {
                return Ok(());
            };
            let Some(req) = self.out_reqs.remove(&id) else {
                return Ok(());
            };
            if let Some(on_response) = req.on_response {
                on_response(Ok(Response {
                    result: header.code,
                    data,
                }));
            }
        }
        Ok(())
    }

    /// Advances timers. Expired outbound requests complete with
    /// `Err(Timeout)` in ascending id order. Never blocks.
    pub fn run(&mut self) -> Result<()> {
        if self.shared.is_none() {
            return Ok(());
        }
        let now = now_ms();
        let expired: Vec<u32> = self
            .out_reqs
            .iter()
            .filter(|(_, req)| req.deadline <= now)
            .map(|(id, _)| *id)
            .collect();
        for id in expired {
            if let Some(req) = self.out_reqs.remove(&id) {
                if let Some(on_response) = req.on_response {
                    on_response(Err(Error::Timeout));
                }
            }
        }
        Ok(())
    }

    /// Cancels every outstanding outbound request and invalidates every
    /// responder minted so far.
    ///
    /// The tracked requests complete with `Err(Cancelled)` in ascending id
    /// order. The session id is bumped before any callback runs, so a
    /// handler that tries to respond from inside a cancellation observes
    /// the new session.
    pub fn reset(&mut self) {
        let Some(shared) = self.shared.as_ref() else {
            return;
        };
        let out_reqs = std::mem::take(&mut self.out_reqs);
        shared.bump_session();
        for (_, req) in out_reqs {
            if let Some(on_response) = req.on_response {
                on_response(Err(Error::Cancelled));
            }
        }
    }

    /// Advisory cap on outgoing payload sizes.
    pub fn max_payload_size(&self) -> usize {
        self.max_payload_size
    }

    /// Reserved. Renegotiating the payload cap is not implemented.
    pub fn change_max_payload_size(&mut self, _size: usize) -> Result<()> {
        if self.shared.is_none() {
            return Err(Error::InvalidState);
        }
        Err(Error::NotSupported)
    }
}

impl Default for MessageChannel {
    fn default() -> Self {
        Self::new()
    }
}
