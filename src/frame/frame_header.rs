use std::convert::TryFrom;

/// Role of a frame within a request/response exchange.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Request = 0,
    RequestNoResponse = 1,
    Response = 2,
}

impl TryFrom<u8> for FrameType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FrameType::Request),
            1 => Ok(FrameType::RequestNoResponse),
            2 => Ok(FrameType::Response),
            _ => Err(()),
        }
    }
}

/// Logical contents of the header that prefixes every frame.
///
/// `code` carries the request opcode for requests and the result code for
/// responses (`0` is success). Both optional fields may be absent on the
/// wire: a header without an explicit frame type is a minimal header, which
/// the channel treats as a request that expects no response. Peers that
/// economize on air time emit exactly that form, and
/// [`FrameHeader::request_no_response`] produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub frame_type: Option<FrameType>,
    pub request_id: Option<u32>,
    pub code: i32,
}

impl FrameHeader {
    /// Header of a request that expects a correlated response.
    pub fn request(req_type: i32, id: u32) -> Self {
        Self {
            frame_type: Some(FrameType::Request),
            request_id: Some(id),
            code: req_type,
        }
    }

    /// Header of a fire-and-forget request, in the minimal on-wire form.
    pub fn request_no_response(req_type: i32) -> Self {
        Self {
            frame_type: None,
            request_id: None,
            code: req_type,
        }
    }

    /// Header of a response correlated to request `id`.
    pub fn response(result: i32, id: u32) -> Self {
        Self {
            frame_type: Some(FrameType::Response),
            request_id: Some(id),
            code: result,
        }
    }

    /// True for anything that is not an explicit response.
    pub fn is_request(&self) -> bool {
        !matches!(self.frame_type, Some(FrameType::Response))
    }

    /// True only for explicitly typed requests, which always carry an id.
    pub fn expects_response(&self) -> bool {
        matches!(self.frame_type, Some(FrameType::Request))
    }
}
