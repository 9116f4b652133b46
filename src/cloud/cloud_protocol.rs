use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::rc::Rc;

use prost::Message;

use crate::channel::{ChannelConfig, MessageChannel, RequestOptions, Responder};
use crate::cloud::schema::{
    diagnostics_response, event_request, DiagnosticsRequest, DiagnosticsResponse, EventRequest,
};
use crate::cloud::{CloudConfig, DiagnosticsProvider, RequestType};
use crate::error::{Error, Result};
use crate::value::Value;

/// Subscription handler: `(event code, decoded value)`.
pub type OnEvent = Box<dyn FnMut(i32, Value)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    New,
    Disconnected,
    Connected,
}

/// State reachable from inbound dispatch.
///
/// The request handler registered with the channel captures an `Rc` to
/// this, not the protocol itself, so dispatch works while the protocol is
/// mid-`receive`. The borrow discipline: no `RefCell` borrow is held while
/// a subscription handler or the diagnostics provider runs. Dispatch takes
/// the callback out, invokes it borrow-free, and reinstates it unless the
/// callback installed a replacement.
struct CloudInner {
    subscriptions: BTreeMap<i32, OnEvent>,
    diagnostics: Option<Box<dyn DiagnosticsProvider>>,
}

/// Application layer of the cloud link.
///
/// Wraps a [`MessageChannel`] with a connect/disconnect lifecycle, event
/// publish/subscribe, and a responder for the peer's diagnostics queries.
/// Publish and subscribe accept work only while connected; `disconnect`
/// resets the channel (cancelling in-flight requests) but keeps the
/// subscription table.
pub struct CloudProtocol {
    channel: MessageChannel,
    inner: Rc<RefCell<CloudInner>>,
    state: State,
}

impl CloudProtocol {
    pub fn new() -> Self {
        Self {
            channel: MessageChannel::new(),
            inner: Rc::new(RefCell::new(CloudInner {
                subscriptions: BTreeMap::new(),
                diagnostics: None,
            })),
            state: State::New,
        }
    }

    /// Initializes the underlying channel and enters the disconnected
    /// state. Idempotent after the first call.
    pub fn init(&mut self, config: CloudConfig) -> Result<()> {
        if self.state != State::New {
            return Ok(());
        }
        self.inner.borrow_mut().diagnostics = config.diagnostics;
        let inner = Rc::clone(&self.inner);
        self.channel.init(
            ChannelConfig::new(config.on_send)
                .port(config.port)
                .on_request(move |req_type, data, responder| {
                    receive_request(&inner, req_type, data, responder)
                }),
        )?;
        self.state = State::Disconnected;
        Ok(())
    }

    /// Enters the connected state. Fails with `InvalidState` before `init`;
    /// idempotent when already connected.
    pub fn connect(&mut self) -> Result<()> {
        match self.state {
            State::Connected => Ok(()),
            State::Disconnected => {
                self.state = State::Connected;
                Ok(())
            }
            State::New => Err(Error::InvalidState),
        }
    }

    /// Returns to the disconnected state and resets the channel, cancelling
    /// in-flight requests and invalidating pending responders.
    /// Subscriptions survive.
    pub fn disconnect(&mut self) {
        if self.state != State::Connected {
            return;
        }
        self.state = State::Disconnected;
        self.channel.reset();
    }

    /// Forwards an inbound datagram to the channel.
    pub fn receive(&mut self, data: Vec<u8>, port: u16) -> Result<()> {
        self.channel.receive(data, port)
    }

    /// Advances channel timers.
    pub fn run(&mut self) -> Result<()> {
        self.channel.run()
    }

    /// Publishes an event without a payload.
    pub fn publish(&mut self, code: i32) -> Result<()> {
        self.publish_impl(code, None)
    }

    /// Publishes an event carrying a self-describing value.
    pub fn publish_value(&mut self, code: i32, value: Value) -> Result<()> {
        self.publish_impl(code, Some(value))
    }

    fn publish_impl(&mut self, code: i32, value: Option<Value>) -> Result<()> {
        if self.state != State::Connected {
            return Err(Error::InvalidState);
        }
        let mut request = EventRequest {
            r#type: Some(event_request::Type::Code(code)),
            data: Vec::new(),
        };
        if let Some(value) = value {
            request.data = value.to_cbor()?;
        }
        tracing::trace!(code, "sending event request");
        self.channel.send_request(
            RequestType::Event as i32,
            request.encode_to_vec(),
            Some(Box::new(move |outcome| match outcome {
                Err(err) => tracing::error!(code, %err, "failed to send event request"),
                Ok(response) if response.result != 0 => {
                    tracing::error!(code, result = response.result, "event request failed")
                }
                Ok(_) => tracing::trace!(code, "received event response"),
            })),
            RequestOptions::default(),
        )
    }

    /// Registers `handler` for events carrying `code`, replacing any
    /// previous handler for that code.
    pub fn subscribe<F>(&mut self, code: i32, handler: F) -> Result<()>
    where
        F: FnMut(i32, Value) + 'static,
    {
        if self.state != State::Connected {
            return Err(Error::InvalidState);
        }
        self.inner
            .borrow_mut()
            .subscriptions
            .insert(code, Box::new(handler));
        Ok(())
    }
}

impl Default for CloudProtocol {
    fn default() -> Self {
        Self::new()
    }
}

fn receive_request(
    inner: &Rc<RefCell<CloudInner>>,
    req_type: i32,
    data: Vec<u8>,
    responder: Responder,
) -> Result<()> {
    match RequestType::try_from(req_type) {
        Ok(RequestType::Hello) => receive_hello_request(responder),
        Ok(RequestType::Event) => receive_event_request(inner, data, responder),
        Ok(RequestType::Diagnostics) => receive_diagnostics_request(inner, data, responder),
        Err(()) => {
            tracing::error!(req_type, "received unsupported request");
            Ok(())
        }
    }
}

// Reserved opcode with no body semantics yet; acknowledge it.
fn receive_hello_request(responder: Responder) -> Result<()> {
    tracing::trace!("received hello request");
    responder.send(0, Vec::new())
}

fn receive_event_request(
    inner: &Rc<RefCell<CloudInner>>,
    data: Vec<u8>,
    responder: Responder,
) -> Result<()> {
    let request = EventRequest::decode(data.as_slice()).map_err(|_| Error::BadData)?;
    let Some(event_request::Type::Code(code)) = request.r#type else {
        tracing::error!("event request carries no code");
        return Err(Error::NotSupported);
    };
    let value = if request.data.is_empty() {
        Value::Null
    } else {
        Value::from_cbor(&request.data)?
    };
    tracing::trace!(code, "received event");

    // Respond before running the handler so handler latency stays out of
    // the protocol round-trip time.
    responder.send(0, Vec::new())?;

    // The borrow must not be live while the handler runs; the handler may
    // reenter the subscription table.
    let handler = inner.borrow_mut().subscriptions.remove(&code);
    let Some(mut handler) = handler else {
        tracing::warn!(code, "no subscription handler for event");
        return Ok(());
    };
    handler(code, value);
    // Keep a replacement the handler may have registered for this code
    inner
        .borrow_mut()
        .subscriptions
        .entry(code)
        .or_insert(handler);
    Ok(())
}

fn receive_diagnostics_request(
    inner: &Rc<RefCell<CloudInner>>,
    data: Vec<u8>,
    responder: Responder,
) -> Result<()> {
    let request = DiagnosticsRequest::decode(data.as_slice()).map_err(|_| Error::BadData)?;
    let mut response = DiagnosticsResponse::default();
    // The borrow must not be live while the provider runs
    let provider = inner.borrow_mut().diagnostics.take();
    if let Some(mut provider) = provider {
        for id in request.ids {
            tracing::trace!(id, "reading diagnostic source");
            // Unresolved ids and non-numeric sources contribute nothing
            if let Some(value) = provider.query(id) {
                response.sources.push(diagnostics_response::Source {
                    id,
                    data: value.to_be_bytes().to_vec(),
                });
            }
        }
        let mut inner = inner.borrow_mut();
        if inner.diagnostics.is_none() {
            inner.diagnostics = Some(provider);
        }
    }
    responder.send(0, response.encode_to_vec())
}
