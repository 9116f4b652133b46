use std::collections::BTreeMap;

use minicbor::data::Type;
use minicbor::{Decoder, Encoder};

use crate::error::{Error, Result};
use crate::value::Value;

// Decode guard against hostile nesting
const MAX_DEPTH: usize = 32;

impl Value {
    /// Encodes the value to its CBOR wire form, definite lengths only.
    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut encoder = Encoder::new(&mut buf);
        encode_value(self, &mut encoder)?;
        Ok(buf)
    }

    /// Decodes a value from its CBOR wire form.
    ///
    /// Fails with `BadData` on malformed input and on constructs outside
    /// the value model: indefinite lengths, tags, non-string map keys,
    /// or nesting deeper than the decode guard allows. Trailing bytes
    /// after the value are also a `BadData` error.
    pub fn from_cbor(data: &[u8]) -> Result<Value> {
        let mut decoder = Decoder::new(data);
        let value = decode_value(&mut decoder, 0)?;
        if decoder.position() != data.len() {
            return Err(Error::BadData);
        }
        Ok(value)
    }
}

fn encode_value(value: &Value, encoder: &mut Encoder<&mut Vec<u8>>) -> Result<()> {
    match value {
        Value::Null => {
            encoder.null().map_err(|_| Error::EncodingFailed)?;
        }
        Value::Bool(v) => {
            encoder.bool(*v).map_err(|_| Error::EncodingFailed)?;
        }
        Value::Int(v) => {
            encoder.i64(*v).map_err(|_| Error::EncodingFailed)?;
        }
        Value::UInt(v) => {
            encoder.u64(*v).map_err(|_| Error::EncodingFailed)?;
        }
        Value::Double(v) => {
            encoder.f64(*v).map_err(|_| Error::EncodingFailed)?;
        }
        Value::String(v) => {
            encoder.str(v).map_err(|_| Error::EncodingFailed)?;
        }
        Value::Bytes(v) => {
            encoder.bytes(v).map_err(|_| Error::EncodingFailed)?;
        }
        Value::Array(items) => {
            encoder
                .array(items.len() as u64)
                .map_err(|_| Error::EncodingFailed)?;
            for item in items {
                encode_value(item, encoder)?;
            }
        }
        Value::Map(entries) => {
            encoder
                .map(entries.len() as u64)
                .map_err(|_| Error::EncodingFailed)?;
            for (key, item) in entries {
                encoder.str(key).map_err(|_| Error::EncodingFailed)?;
                encode_value(item, encoder)?;
            }
        }
    }
    Ok(())
}

fn decode_value(decoder: &mut Decoder<'_>, depth: usize) -> Result<Value> {
    if depth > MAX_DEPTH {
        return Err(Error::BadData);
    }
    match decoder.datatype().map_err(|_| Error::BadData)? {
        Type::Null => {
            decoder.null().map_err(|_| Error::BadData)?;
            Ok(Value::Null)
        }
        Type::Bool => Ok(Value::Bool(decoder.bool().map_err(|_| Error::BadData)?)),
        Type::U8 | Type::U16 | Type::U32 | Type::U64 => {
            let v = decoder.u64().map_err(|_| Error::BadData)?;
            // Canonical form: anything that fits i64 decodes as Int
            match i64::try_from(v) {
                Ok(v) => Ok(Value::Int(v)),
                Err(_) => Ok(Value::UInt(v)),
            }
        }
        Type::I8 | Type::I16 | Type::I32 | Type::I64 | Type::Int => {
            Ok(Value::Int(decoder.i64().map_err(|_| Error::BadData)?))
        }
        Type::F32 => Ok(Value::Double(
            decoder.f32().map_err(|_| Error::BadData)?.into(),
        )),
        Type::F64 => Ok(Value::Double(decoder.f64().map_err(|_| Error::BadData)?)),
        Type::String => Ok(Value::String(
            decoder.str().map_err(|_| Error::BadData)?.to_owned(),
        )),
        Type::Bytes => Ok(Value::Bytes(
            decoder.bytes().map_err(|_| Error::BadData)?.to_vec(),
        )),
        Type::Array => {
            let len = decoder
                .array()
                .map_err(|_| Error::BadData)?
                .ok_or(Error::BadData)?;
            let mut items = Vec::new();
            for _ in 0..len {
                items.push(decode_value(decoder, depth + 1)?);
            }
            Ok(Value::Array(items))
        }
        Type::Map => {
            let len = decoder
                .map()
                .map_err(|_| Error::BadData)?
                .ok_or(Error::BadData)?;
            let mut entries = BTreeMap::new();
            for _ in 0..len {
                if decoder.datatype().map_err(|_| Error::BadData)? != Type::String {
                    return Err(Error::BadData);
                }
                let key = decoder.str().map_err(|_| Error::BadData)?.to_owned();
                entries.insert(key, decode_value(decoder, depth + 1)?);
            }
            Ok(Value::Map(entries))
        }
        _ => Err(Error::BadData),
    }
}
