//! Sample format decoding
//!
//! Each WFDB storage format packs digital samples differently. Decoders
//! here turn a byte slice into the flat interleaved sample sequence of one
//! signal file; deinterleaving happens in the reader.

use crate::domain::DecodeError;

/// Storage formats this crate can decode
pub const SUPPORTED_FORMATS: [u16; 7] = [80, 16, 61, 160, 212, 24, 32];

/// Digital value marking an invalid sample, per format
pub fn invalid_sentinel(format: u16) -> Option<i64> {
    match format {
        80 => Some(-128),
        16 | 61 | 160 => Some(-32768),
        212 => Some(-2048),
        24 => Some(-8_388_608),
        32 => Some(-2_147_483_648),
        _ => None,
    }
}

/// Decodes every complete sample in `bytes`
///
/// Trailing bytes that do not form a whole sample are ignored.
pub fn decode_samples(format: u16, bytes: &[u8]) -> Result<Vec<i64>, DecodeError> {
    let samples = match format {
        80 => bytes.iter().map(|&b| i64::from(b) - 128).collect(),
        16 => bytes
            .chunks_exact(2)
            .map(|c| i64::from(i16::from_le_bytes([c[0], c[1]])))
            .collect(),
        61 => bytes
            .chunks_exact(2)
            .map(|c| i64::from(i16::from_be_bytes([c[0], c[1]])))
            .collect(),
        160 => bytes
            .chunks_exact(2)
            .map(|c| i64::from(u16::from_le_bytes([c[0], c[1]])) - 32768)
            .collect(),
        212 => decode_212(bytes),
        24 => bytes
            .chunks_exact(3)
            .map(|c| {
                let sign = if c[2] & 0x80 != 0 { 0xFF } else { 0x00 };
                i64::from(i32::from_le_bytes([c[0], c[1], c[2], sign]))
            })
            .collect(),
        32 => bytes
            .chunks_exact(4)
            .map(|c| i64::from(i32::from_le_bytes([c[0], c[1], c[2], c[3]])))
            .collect(),
        other => return Err(DecodeError::UnsupportedFormat(other)),
    };
    Ok(samples)
}

/// Two 12-bit samples in three bytes
///
/// The first sample is byte 0 plus the low nibble of byte 1; the second is
/// byte 2 plus the high nibble of byte 1.
fn decode_212(bytes: &[u8]) -> Vec<i64> {
    let mut samples = Vec::with_capacity(bytes.len() * 2 / 3 + 1);
    let mut chunks = bytes.chunks_exact(3);
    for c in chunks.by_ref() {
        samples.push(twelve_bit(c[0], c[1] & 0x0F));
        samples.push(twelve_bit(c[2], c[1] >> 4));
    }
    if let [low, mid] = chunks.remainder() {
        samples.push(twelve_bit(*low, *mid & 0x0F));
    }
    samples
}

fn twelve_bit(low: u8, high_nibble: u8) -> i64 {
    let raw = (i64::from(high_nibble) << 8) | i64::from(low);
    if raw & 0x800 != 0 {
        raw - 0x1000
    } else {
        raw
    }
}
