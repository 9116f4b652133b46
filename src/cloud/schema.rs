//! Wire schemas of the cloud request set.
//!
//! Length-delimited, field-tagged records compatible with protocol buffers.
//! Field numbers are part of the wire contract and must not change.

/// Body of an EVENT request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EventRequest {
    #[prost(oneof = "event_request::Type", tags = "1")]
    pub r#type: ::core::option::Option<event_request::Type>,
    /// Self-describing value payload; empty when the event carries none.
    #[prost(bytes = "vec", tag = "2")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}

pub mod event_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Type {
        #[prost(int32, tag = "1")]
        Code(i32),
    }
}

/// Body of a DIAGNOSTICS request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DiagnosticsRequest {
    /// Diagnostic source ids to read, in response order.
    #[prost(uint32, repeated, tag = "1")]
    pub ids: ::prost::alloc::vec::Vec<u32>,
    /// Reserved category selector; accepted and ignored.
    #[prost(uint32, optional, tag = "2")]
    pub categories: ::core::option::Option<u32>,
}

/// Body of the response to a DIAGNOSTICS request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DiagnosticsResponse {
    /// One entry per id that resolved, in request order.
    #[prost(message, repeated, tag = "1")]
    pub sources: ::prost::alloc::vec::Vec<diagnostics_response::Source>,
}

pub mod diagnostics_response {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Source {
        #[prost(uint32, tag = "1")]
        pub id: u32,
        /// Big-endian byte image of the source's current value.
        #[prost(bytes = "vec", tag = "2")]
        pub data: ::prost::alloc::vec::Vec<u8>,
    }
}
