mod callbacks;
mod config;
mod message_channel;
mod options;
mod responder;

pub use callbacks::{OnAck, OnRequest, OnResponse, OnSend, Response};
pub use config::ChannelConfig;
pub use message_channel::MessageChannel;
pub use options::RequestOptions;
pub use responder::Responder;
