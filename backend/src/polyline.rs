//! Decoder for the routing provider's encoded path geometry.
//!
//! Routes arrive as delta-encoded polylines at 1e-6 precision. Decoding
//! happens here at the API boundary; everything downstream works with
//! plain coordinate sequences.

use shared::GeoPoint;
use thiserror::Error;

/// Fixed precision of the encoded geometry (polyline6).
const PRECISION: f64 = 1e-6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid geometry byte {byte:#04x} at offset {offset}")]
    InvalidByte { byte: u8, offset: usize },
    #[error("geometry truncated mid-value at offset {offset}")]
    Truncated { offset: usize },
    #[error("latitude delta at offset {offset} has no matching longitude")]
    MissingLongitude { offset: usize },
}

/// Decodes an encoded path into an ordered coordinate sequence.
///
/// Decoding is all-or-nothing: malformed input yields an error, never a
/// partial point list. An empty string decodes to an empty path.
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut offset = 0;
    let mut lat = 0i64;
    let mut lon = 0i64;

    while offset < bytes.len() {
        let pair_start = offset;
        let (dlat, next) = read_delta(bytes, offset)?;
        if next >= bytes.len() {
            return Err(DecodeError::MissingLongitude { offset: pair_start });
        }
        let (dlon, next) = read_delta(bytes, next)?;
        lat += dlat;
        lon += dlon;
        points.push(GeoPoint {
            lat: lat as f64 * PRECISION,
            lon: lon as f64 * PRECISION,
        });
        offset = next;
    }

    Ok(points)
}

/// Reads one zigzag-encoded delta as a run of 5-bit chunks.
fn read_delta(bytes: &[u8], mut offset: usize) -> Result<(i64, usize), DecodeError> {
    let mut value = 0u64;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(offset) else {
            return Err(DecodeError::Truncated { offset });
        };
        let chunk = byte
            .checked_sub(63)
            .filter(|c| *c < 64)
            .ok_or(DecodeError::InvalidByte { byte, offset })?;
        value |= u64::from(chunk & 0x1f) << shift;
        offset += 1;
        if chunk & 0x20 == 0 {
            break;
        }
        shift += 5;
        // A coordinate delta never needs more than 64 bits of chunks.
        if shift > 60 {
            return Err(DecodeError::InvalidByte {
                byte,
                offset: offset - 1,
            });
        }
    }

    let value = value as i64;
    let delta = if value & 1 == 1 {
        !(value >> 1)
    } else {
        value >> 1
    };
    Ok((delta, offset))
}
