//! # Secure Random Source
//!
//! Cryptographically secure bytes, integers and strings drawn from the
//! operating system entropy source (`OsRng`). No generator is cached:
//! every call reads fresh entropy.
//!
//! Integers in `[0, max)` use rejection sampling over a big-endian `u32`
//! so that every value is equally likely regardless of `max`.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::RandomError;

/// Fill a fresh buffer of `len` secure random bytes.
pub fn random_bytes(len: usize) -> Result<Vec<u8>, RandomError> {
    let mut buf = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| RandomError::Entropy(e.to_string()))?;
    Ok(buf)
}

/// Uniform secure integer in `[0, max)`.
///
/// Draws four bytes as a big-endian `u32` and redraws while the sample is
/// at or above `0xFFFFFFFF - (0xFFFFFFFF mod max)`.
///
/// # Errors
///
/// [`RandomError::InvalidRange`] when `max` is 0 or exceeds `u32::MAX`.
pub fn random_int(max: u64) -> Result<u32, RandomError> {
    if max == 0 || max > u64::from(u32::MAX) {
        return Err(RandomError::InvalidRange(max));
    }
    let max = max as u32;
    let limit = u32::MAX - (u32::MAX % max);
    loop {
        let mut buf = [0u8; 4];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| RandomError::Entropy(e.to_string()))?;
        let value = u32::from_be_bytes(buf);
        if value < limit {
            return Ok(value % max);
        }
    }
}

/// `len` independent secure random characters from `alphabet`.
pub fn random_string(len: usize, alphabet: &str) -> Result<String, RandomError> {
    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return Err(RandomError::EmptyAlphabet);
    }
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        let index = random_int(chars.len() as u64)? as usize;
        out.push(chars[index]);
    }
    Ok(out)
}

/// `len` secure random bytes rendered as lowercase hex.
pub fn random_hex(len: usize) -> Result<String, RandomError> {
    Ok(random_bytes(len)?
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect())
}
