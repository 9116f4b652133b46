use cloudlink::constants::{MAX_FRAME_HEADER_SIZE, MAX_REQUEST_ID};
use cloudlink::frame::{FrameCodec, FrameHeader, FrameType};
use cloudlink::Error;

fn round_trip(header: FrameHeader) {
    let mut buf = [0u8; MAX_FRAME_HEADER_SIZE];
    let encoded = FrameCodec::encode(&mut buf, &header).expect("encode failed");
    let (decoded, consumed) = FrameCodec::decode(&buf[..encoded]).expect("decode failed");
    assert_eq!(decoded, header);
    assert_eq!(consumed, encoded);
}

#[test]
fn round_trips_representative_headers() {
    round_trip(FrameHeader::request(1, 0));
    round_trip(FrameHeader::request(2, 5));
    round_trip(FrameHeader::request(127, MAX_REQUEST_ID));
    round_trip(FrameHeader::request_no_response(3));
    round_trip(FrameHeader::request_no_response(-1));
    round_trip(FrameHeader::response(0, 1));
    round_trip(FrameHeader::response(-7, 8191));
    round_trip(FrameHeader::response(i32::MAX, 42));
    round_trip(FrameHeader::response(i32::MIN, 42));
}

#[test]
fn common_request_fits_in_four_bytes() {
    let mut buf = [0u8; MAX_FRAME_HEADER_SIZE];
    let encoded = FrameCodec::encode(&mut buf, &FrameHeader::request(2, 17)).unwrap();
    assert!(encoded <= 4);
}

#[test]
fn wire_images_are_stable() {
    let mut buf = [0u8; MAX_FRAME_HEADER_SIZE];

    // Minimal header: flags zero, zig-zag opcode, nothing else
    let n = FrameCodec::encode(&mut buf, &FrameHeader::request_no_response(2)).unwrap();
    assert_eq!(&buf[..n], &[0x00, 0x04]);

    // Explicit request: frame type 0, id present
    let n = FrameCodec::encode(&mut buf, &FrameHeader::request(1, 0)).unwrap();
    assert_eq!(&buf[..n], &[0x90, 0x02, 0x00]);

    // Explicit response: frame type 2, id present
    let n = FrameCodec::encode(&mut buf, &FrameHeader::response(0, 1)).unwrap();
    assert_eq!(&buf[..n], &[0xd0, 0x00, 0x01]);
}

#[test]
fn minimal_header_decodes_without_type_or_id() {
    let (header, consumed) = FrameCodec::decode(&[0x00, 0x04, 0xaa, 0xbb]).unwrap();
    assert_eq!(consumed, 2);
    assert_eq!(header.frame_type, None);
    assert_eq!(header.request_id, None);
    assert_eq!(header.code, 2);
    assert!(header.is_request());
    assert!(!header.expects_response());
}

#[test]
fn decode_rejects_truncated_input() {
    assert_eq!(FrameCodec::decode(&[]), Err(Error::NotEnoughData));
    // Flags promise a code varint that never arrives
    assert_eq!(FrameCodec::decode(&[0x00]), Err(Error::NotEnoughData));
    // Continuation bit set on the last available byte
    assert_eq!(FrameCodec::decode(&[0x00, 0x80]), Err(Error::NotEnoughData));
    // Flags promise an id that never arrives
    assert_eq!(FrameCodec::decode(&[0x90, 0x02]), Err(Error::NotEnoughData));
}

#[test]
fn decode_rejects_syntax_violations() {
    // Reserved low flag bits
    assert_eq!(FrameCodec::decode(&[0x01, 0x00]), Err(Error::BadData));
    // Reserved frame type value 3
    assert_eq!(
        FrameCodec::decode(&[0xf0, 0x00, 0x01]),
        Err(Error::BadData)
    );
    // Explicit request without an id
    assert_eq!(FrameCodec::decode(&[0x80, 0x02]), Err(Error::BadData));
    // Id flag without an explicit frame type
    assert_eq!(FrameCodec::decode(&[0x10, 0x00, 0x01]), Err(Error::BadData));
    // Explicit no-response request carrying an id
    assert_eq!(FrameCodec::decode(&[0xb0, 0x02, 0x01]), Err(Error::BadData));
    // Varint sprawling past 32 bits
    assert_eq!(
        FrameCodec::decode(&[0x00, 0xff, 0xff, 0xff, 0xff, 0x7f]),
        Err(Error::BadData)
    );
}

#[test]
fn explicit_no_response_type_is_accepted() {
    // A peer may spend a byte marking the type explicitly; same semantics.
    let flags = 0x80 | (1 << 5);
    let (header, _) = FrameCodec::decode(&[flags, 0x04]).unwrap();
    assert_eq!(header.frame_type, Some(FrameType::RequestNoResponse));
    assert!(header.is_request());
    assert!(!header.expects_response());
}

#[test]
fn encode_rejects_inconsistent_headers() {
    let mut buf = [0u8; MAX_FRAME_HEADER_SIZE];

    let id_without_type = FrameHeader {
        frame_type: None,
        request_id: Some(1),
        code: 0,
    };
    assert_eq!(
        FrameCodec::encode(&mut buf, &id_without_type),
        Err(Error::InvalidArgument)
    );

    let request_without_id = FrameHeader {
        frame_type: Some(FrameType::Request),
        request_id: None,
        code: 1,
    };
    assert_eq!(
        FrameCodec::encode(&mut buf, &request_without_id),
        Err(Error::InvalidArgument)
    );

    let no_response_with_id = FrameHeader {
        frame_type: Some(FrameType::RequestNoResponse),
        request_id: Some(1),
        code: 1,
    };
    assert_eq!(
        FrameCodec::encode(&mut buf, &no_response_with_id),
        Err(Error::InvalidArgument)
    );

    assert_eq!(
        FrameCodec::encode(&mut buf, &FrameHeader::request(1, MAX_REQUEST_ID + 1)),
        Err(Error::InvalidArgument)
    );
}

#[test]
fn encode_reports_short_buffers() {
    let mut buf = [0u8; 2];
    assert_eq!(
        FrameCodec::encode(&mut buf, &FrameHeader::request(1, 300)),
        Err(Error::BufferTooSmall)
    );
    let mut empty: [u8; 0] = [];
    assert_eq!(
        FrameCodec::encode(&mut empty, &FrameHeader::request_no_response(1)),
        Err(Error::BufferTooSmall)
    );
}
