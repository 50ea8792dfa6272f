//! Little-endian, fixed-width wire codec for [`Request`] and [`Response`].
//!
//! `Request` is exactly `32 * 5` bytes. `Response` is a 128-byte fixed
//! prefix (`hh_output | hh_excess | R | s`) followed by a variable-length
//! opaque range-proof payload. The source this protocol is ported from
//! asserts `len(serialized) == 96` while still reading bytes `[96:128]` for
//! `Response` — that bug is not replicated here; this codec asserts
//! `len >= 128` before reading the fixed prefix.

use curve::{Affine, ScalarField};
use txo::Proof;

use crate::error::ProtocolError;
use crate::tx::{Request, Response, Signature};

const FIELD_WIDTH: usize = 32;

fn encode_point(point: &Affine, out: &mut Vec<u8>) {
    out.extend_from_slice(&point.compress());
}

fn decode_point(bytes: &[u8]) -> Result<Affine, ProtocolError> {
    let arr: [u8; FIELD_WIDTH] = bytes
        .try_into()
        .map_err(|_| ProtocolError::Codec("point slice is not 32 bytes"))?;
    Ok(Affine::decompress(&arr)?)
}

fn decode_scalar(bytes: &[u8]) -> Result<ScalarField, ProtocolError> {
    let arr: [u8; FIELD_WIDTH] = bytes
        .try_into()
        .map_err(|_| ProtocolError::Codec("scalar slice is not 32 bytes"))?;
    ScalarField::from_bytes_le(&arr).ok_or(ProtocolError::Codec("scalar is not canonically reduced"))
}

impl Request {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(FIELD_WIDTH * 5);
        out.extend_from_slice(&self.value.to_bytes_le());
        out.extend_from_slice(&self.fee.to_bytes_le());
        encode_point(&self.hh_sig_salt, &mut out);
        encode_point(&self.hh_excess, &mut out);
        out.extend_from_slice(&self.metadata.to_bytes_le());
        out
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() != FIELD_WIDTH * 5 {
            return Err(ProtocolError::Codec("Request must be exactly 32*5 bytes"));
        }
        let value = decode_scalar(&bytes[0..32])?;
        let fee = decode_scalar(&bytes[32..64])?;
        let hh_sig_salt = decode_point(&bytes[64..96])?;
        let hh_excess = decode_point(&bytes[96..128])?;
        let metadata = decode_scalar(&bytes[128..160])?;
        Ok(Request {
            value,
            fee,
            hh_sig_salt,
            hh_excess,
            metadata,
        })
    }
}

impl Response {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(FIELD_WIDTH * 4 + self.range_proof.as_bytes().len());
        encode_point(&self.hh_output, &mut out);
        encode_point(&self.hh_excess, &mut out);
        encode_point(&self.signature.r, &mut out);
        out.extend_from_slice(&self.signature.s.to_bytes_le());
        out.extend_from_slice(self.range_proof.as_bytes());
        out
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() < FIELD_WIDTH * 4 {
            return Err(ProtocolError::Codec("Response must be at least 128 bytes"));
        }
        let hh_output = decode_point(&bytes[0..32])?;
        let hh_excess = decode_point(&bytes[32..64])?;
        let r = decode_point(&bytes[64..96])?;
        let s = decode_scalar(&bytes[96..128])?;
        let range_proof = Proof(bytes[128..].to_vec());
        Ok(Response {
            hh_output,
            hh_excess,
            signature: Signature { s, r },
            range_proof,
        })
    }
}
