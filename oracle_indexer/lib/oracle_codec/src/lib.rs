//! Wire codec for the cross-chain epoch oracle payload format: prefix-varint
//! integers, their ZigZag-signed wrapper, fixed-length string extraction,
//! and the preamble tag parser that drives message dispatch.

mod error;
mod preamble;
mod varint;

pub use error::{CodecError, Result};
pub use preamble::{
    encode_preamble, parse_preamble, PREAMBLE_BITS, PREAMBLE_BYTES, TAGS_PER_PREAMBLE, TAG_BITS,
};
pub use varint::{decode_i64, decode_u64, encode_i64, encode_u64, get_string, zigzag_decode, zigzag_encode};
