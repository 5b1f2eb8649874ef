//! Stamped message layout:
//!
//! ```text
//! 0x01 | original bytes | {S:{MDG:<64 uppercase hex>}} | 0x03 | ' ' * n
//! ```
//!
//! `n` is the smallest count that brings the total to a multiple of
//! `BLOCK_LEN` bytes.

pub const START_OF_MESSAGE: u8 = 0x01;
pub const END_OF_MESSAGE: u8 = 0x03;
pub const PAD_BYTE: u8 = b' ';
pub const BLOCK_LEN: usize = 512;

pub const TRAILER_PREFIX: &str = "{S:{MDG:";
pub const TRAILER_SUFFIX: &str = "}}";

pub fn trailer(digest_hex: &str) -> String {
    format!("{TRAILER_PREFIX}{digest_hex}{TRAILER_SUFFIX}")
}

/// Spaces needed to round `len` up to the next block boundary.
pub fn padding_for(len: usize) -> usize {
    (BLOCK_LEN - len % BLOCK_LEN) % BLOCK_LEN
}

pub fn assemble(content: &[u8], digest_hex: &str) -> Vec<u8> {
    let trailer = trailer(digest_hex);
    let unpadded = 1 + content.len() + trailer.len() + 1;
    let mut out = Vec::with_capacity(unpadded + padding_for(unpadded));
    out.push(START_OF_MESSAGE);
    out.extend_from_slice(content);
    out.extend_from_slice(trailer.as_bytes());
    out.push(END_OF_MESSAGE);
    out.resize(unpadded + padding_for(unpadded), PAD_BYTE);
    out
}
