use std::convert::TryFrom;

use crate::constants::MAX_REQUEST_ID;
use crate::error::{Error, Result};
use crate::frame::{FrameHeader, FrameType};

const FLAG_FRAME_TYPE: u8 = 0x80;
const FLAG_REQUEST_ID: u8 = 0x10;
const FRAME_TYPE_SHIFT: u8 = 5;
const FRAME_TYPE_MASK: u8 = 0x03;
const RESERVED_MASK: u8 = 0x0f;

// A u32 varint never exceeds 5 bytes; the 5th may only carry 4 value bits.
const MAX_VARINT_SIZE: usize = 5;

/// Encoder/decoder for the frame header wire format.
///
/// The header opens with a flags octet, followed by the opcode/result code as
/// a zig-zag varint (always present), followed by the request id as an
/// unsigned varint when the flags announce one:
///
/// ```text
/// 0x80  frame type explicit; value in bits 6..5
/// 0x10  request id follows the code
/// 0x0f  reserved, must be zero
/// ```
///
/// The common case, a request with a small opcode and a small id, fits in
/// 3-4 bytes. A flags octet of zero is the minimal header emitted by peers
/// that forgo correlation entirely.
pub struct FrameCodec;

impl FrameCodec {
    /// Encodes `header` into the front of `out`, returning the encoded size.
    ///
    /// Fails with `BufferTooSmall` when `out` cannot hold the encoding and
    /// `InvalidArgument` when the header is inconsistent: a request id
    /// without an explicit frame type, an explicitly typed `Request` or
    /// `Response` without an id, a `RequestNoResponse` carrying an id, or
    /// an id above `MAX_REQUEST_ID`.
    pub fn encode(out: &mut [u8], header: &FrameHeader) -> Result<usize> {
        match header.request_id {
            // An id requires an explicit type, and a no-response request
            // never carries one
            Some(id) => match header.frame_type {
                None | Some(FrameType::RequestNoResponse) => {
                    return Err(Error::InvalidArgument);
                }
                Some(_) => {
                    if id > MAX_REQUEST_ID {
                        return Err(Error::InvalidArgument);
                    }
                }
            },
            None => {
                if matches!(
                    header.frame_type,
                    Some(FrameType::Request) | Some(FrameType::Response)
                ) {
                    return Err(Error::InvalidArgument);
                }
            }
        }

        let mut flags = 0u8;
        if let Some(frame_type) = header.frame_type {
            flags |= FLAG_FRAME_TYPE | ((frame_type as u8) << FRAME_TYPE_SHIFT);
        }
        if header.request_id.is_some() {
            flags |= FLAG_REQUEST_ID;
        }

        if out.is_empty() {
            return Err(Error::BufferTooSmall);
        }
        out[0] = flags;

        let mut pos = 1;
        pos = write_uvarint(out, pos, zigzag_encode(header.code))?;
        if let Some(id) = header.request_id {
            pos = write_uvarint(out, pos, id)?;
        }
        Ok(pos)
    }

    /// Decodes a header from the start of `data`, returning it along with
    /// the number of bytes consumed.
    ///
    /// Fails with `NotEnoughData` when `data` ends inside the header and
    /// `BadData` on syntactic violations: reserved flag bits, a reserved
    /// frame-type value, a varint overflowing 32 bits, an explicitly typed
    /// `Request`/`Response` without an id, or a `RequestNoResponse` with
    /// one.
    pub fn decode(data: &[u8]) -> Result<(FrameHeader, usize)> {
        let flags = *data.first().ok_or(Error::NotEnoughData)?;
        if flags & RESERVED_MASK != 0 {
            return Err(Error::BadData);
        }

        let frame_type = if flags & FLAG_FRAME_TYPE != 0 {
            let value = (flags >> FRAME_TYPE_SHIFT) & FRAME_TYPE_MASK;
            Some(FrameType::try_from(value).map_err(|_| Error::BadData)?)
        } else {
            None
        };

        let (code, mut pos) = read_uvarint(data, 1)?;
        let code = zigzag_decode(code);

        let request_id = if flags & FLAG_REQUEST_ID != 0 {
            let (id, next) = read_uvarint(data, pos)?;
            pos = next;
            Some(id)
        } else {
            None
        };

        match request_id {
            Some(_) => {
                if matches!(frame_type, None | Some(FrameType::RequestNoResponse)) {
                    return Err(Error::BadData);
                }
            }
            None => {
                if matches!(
                    frame_type,
                    Some(FrameType::Request) | Some(FrameType::Response)
                ) {
                    return Err(Error::BadData);
                }
            }
        }

        Ok((
            FrameHeader {
                frame_type,
                request_id,
                code,
            },
            pos,
        ))
    }
}

fn zigzag_encode(value: i32) -> u32 {
    (value.wrapping_shl(1) ^ (value >> 31)) as u32
}

fn zigzag_decode(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

fn write_uvarint(out: &mut [u8], mut pos: usize, mut value: u32) -> Result<usize> {
    loop {
        if pos >= out.len() {
            return Err(Error::BufferTooSmall);
        }
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out[pos] = byte;
            return Ok(pos + 1);
        }
        out[pos] = byte | 0x80;
        pos += 1;
    }
}

fn read_uvarint(data: &[u8], mut pos: usize) -> Result<(u32, usize)> {
    let mut value = 0u32;
    for i in 0..MAX_VARINT_SIZE {
        let byte = *data.get(pos).ok_or(Error::NotEnoughData)?;
        pos += 1;
        if i == MAX_VARINT_SIZE - 1 && byte & 0xf0 != 0 {
            // Continuation past 5 bytes or value bits beyond u32
            return Err(Error::BadData);
        }
        value |= ((byte & 0x7f) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, pos));
        }
    }
    Err(Error::BadData)
}
