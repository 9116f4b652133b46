mod value;
mod value_codec;

pub use value::Value;
