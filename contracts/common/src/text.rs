//! Byte-level helpers for `soroban_sdk::String`.
//!
//! Host strings cannot be formatted or sliced in place, so messages and
//! identifiers are assembled in a fixed stack buffer and copied back.

use soroban_sdk::{Bytes, Env, String};

/// Upper bound for any string assembled or inspected through this module.
pub const MAX_TEXT_LEN: usize = 256;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// One fragment of a composed string.
pub enum Piece<'a> {
    Lit(&'a [u8]),
    Text(&'a String),
    Num(u64),
}

/// Copies `s` into `buf` and returns the filled prefix, or `None` when the
/// string does not fit.
pub fn copy_to_buf<'b>(s: &String, buf: &'b mut [u8]) -> Option<&'b [u8]> {
    let len = s.len() as usize;
    if len > buf.len() {
        return None;
    }
    s.copy_into_slice(&mut buf[..len]);
    Some(&buf[..len])
}

/// Converts a host string into host bytes. `None` if longer than `MAX_TEXT_LEN`.
pub fn to_bytes(env: &Env, s: &String) -> Option<Bytes> {
    let mut buf = [0u8; MAX_TEXT_LEN];
    copy_to_buf(s, &mut buf).map(|raw| Bytes::from_slice(env, raw))
}

/// Writes the decimal form of `n` into `out`, returning the number of bytes.
pub fn write_u64(mut n: u64, out: &mut [u8; 20]) -> usize {
    if n == 0 {
        out[0] = b'0';
        return 1;
    }
    let mut tmp = [0u8; 20];
    let mut len = 0;
    while n > 0 {
        tmp[len] = b'0' + (n % 10) as u8;
        n /= 10;
        len += 1;
    }
    for i in 0..len {
        out[i] = tmp[len - 1 - i];
    }
    len
}

/// Lowercase hex encoding of `src` into `out` (which must be twice as long).
pub fn hex_encode(src: &[u8], out: &mut [u8]) {
    for (i, b) in src.iter().enumerate() {
        out[2 * i] = HEX[(b >> 4) as usize];
        out[2 * i + 1] = HEX[(b & 0x0f) as usize];
    }
}

/// Concatenates `pieces` into a new host string.
///
/// Output is capped at `MAX_TEXT_LEN` bytes; a `Text` piece that would cross
/// the cap is dropped whole rather than cut mid-character.
pub fn compose(env: &Env, pieces: &[Piece]) -> String {
    let mut buf = [0u8; MAX_TEXT_LEN];
    let mut len = 0usize;

    for piece in pieces {
        let room = MAX_TEXT_LEN - len;
        match piece {
            Piece::Lit(raw) => {
                let take = raw.len().min(room);
                buf[len..len + take].copy_from_slice(&raw[..take]);
                len += take;
            }
            Piece::Text(s) => {
                let n = s.len() as usize;
                if n <= room {
                    s.copy_into_slice(&mut buf[len..len + n]);
                    len += n;
                }
            }
            Piece::Num(n) => {
                let mut digits = [0u8; 20];
                let n = write_u64(*n, &mut digits);
                let take = n.min(room);
                buf[len..len + take].copy_from_slice(&digits[..take]);
                len += take;
            }
        }
    }

    String::from_bytes(env, &buf[..len])
}
