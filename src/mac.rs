use crate::error::Error;
use crate::securemem::MemoryLock;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Hex characters in a rendered digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Encode key text as ASCII; anything outside the range becomes `?`.
pub fn key_bytes(key: &str) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(
        key.chars()
            .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
            .collect(),
    )
}

/// HMAC-SHA256 over `message`, rendered as uppercase hex without separators.
pub fn digest_hex(message: &[u8], key: &str) -> Result<String, Error> {
    let key = MemoryLock::new(key_bytes(key));
    let mut mac = HmacSha256::new_from_slice(&key).map_err(|_| Error::Crypto)?;
    mac.update(message);
    let tag = mac.finalize().into_bytes();
    Ok(hex::encode_upper(tag))
}
