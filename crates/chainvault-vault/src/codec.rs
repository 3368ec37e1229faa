// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text framing for encrypted payloads.
//!
//! Frame layout: `"CV" | 0x01 | nonce (12) | ciphertext + tag`, rendered as
//! `cv1.` followed by unpadded base64url. Decoding fails with
//! [`CodecError::Malformed`] before any decryption is attempted.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chainvault_core::CodecError;

use crate::crypto::{EncryptedPayload, NONCE_LEN, TAG_LEN};

pub const TEXT_PREFIX: &str = "cv1.";
const MAGIC: &[u8; 2] = b"CV";
const FRAME_VERSION: u8 = 0x01;
const HEADER_LEN: usize = MAGIC.len() + 1 + NONCE_LEN;

/// Render `payload` as a self-describing text frame.
pub fn encode(payload: &EncryptedPayload) -> String {
    let mut frame = Vec::with_capacity(HEADER_LEN + payload.ciphertext.len());
    frame.extend_from_slice(MAGIC);
    frame.push(FRAME_VERSION);
    frame.extend_from_slice(&payload.nonce);
    frame.extend_from_slice(&payload.ciphertext);

    let mut text = String::with_capacity(TEXT_PREFIX.len() + frame.len() * 4 / 3 + 4);
    text.push_str(TEXT_PREFIX);
    URL_SAFE_NO_PAD.encode_string(&frame, &mut text);
    text
}

/// Parse a text frame back into nonce and ciphertext, byte for byte.
pub fn decode(text: &str) -> Result<EncryptedPayload, CodecError> {
    let body = text
        .strip_prefix(TEXT_PREFIX)
        .ok_or_else(|| CodecError::malformed(format!("frame does not start with `{TEXT_PREFIX}`")))?;
    let frame = URL_SAFE_NO_PAD
        .decode(body)
        .map_err(|e| CodecError::malformed(format!("invalid base64url: {e}")))?;

    if frame.len() < HEADER_LEN + TAG_LEN {
        return Err(CodecError::malformed(format!(
            "frame is {} bytes, shorter than header and tag ({})",
            frame.len(),
            HEADER_LEN + TAG_LEN
        )));
    }
    if &frame[..MAGIC.len()] != MAGIC {
        return Err(CodecError::malformed("bad frame magic"));
    }
    let version = frame[MAGIC.len()];
    if version != FRAME_VERSION {
        return Err(CodecError::malformed(format!(
            "unsupported frame version {version}"
        )));
    }

    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&frame[MAGIC.len() + 1..HEADER_LEN]);
    Ok(EncryptedPayload {
        nonce,
        ciphertext: frame[HEADER_LEN..].to_vec(),
    })
}
