//! Header codec
//!
//! Encoding and decoding of header snapshots.

use crate::error::{Result, SFileError};

use super::Attributes;

/// Magic bytes at the start of every header file
pub const MAGIC: &[u8; 4] = b"SFHD";

/// Current header format version
pub const VERSION: u16 = 1;

/// Fixed prefix size: magic (4) + version (2) + payload_len (4) + crc (4)
pub const HEADER_SIZE: usize = 14;

/// Maximum encoded payload size (16 MB)
pub const MAX_HEADER_SIZE: u32 = 16 * 1024 * 1024;

/// Encode an attribute set into a complete header snapshot
///
/// Format: magic (4) + version (2) + payload_len (4) + crc (4) + payload
pub fn encode_header(attributes: &Attributes) -> Result<Vec<u8>> {
    let payload = bincode::serialize(attributes)?;

    if payload.len() > MAX_HEADER_SIZE as usize {
        return Err(SFileError::Serialization(format!(
            "Header too large: {} bytes (max {})",
            payload.len(),
            MAX_HEADER_SIZE
        )));
    }

    let crc = crc32fast::hash(&payload);

    let mut snapshot = Vec::with_capacity(HEADER_SIZE + payload.len());
    snapshot.extend_from_slice(MAGIC);
    snapshot.extend_from_slice(&VERSION.to_le_bytes());
    snapshot.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    snapshot.extend_from_slice(&crc.to_le_bytes());
    snapshot.extend_from_slice(&payload);

    Ok(snapshot)
}

/// Decode a header snapshot back into its attribute set
///
/// Validates magic, version, payload length and checksum. Trailing bytes
/// after the payload are rejected: a valid file holds exactly one snapshot.
pub fn decode_header(bytes: &[u8]) -> Result<Attributes> {
    if bytes.len() < HEADER_SIZE {
        return Err(SFileError::Corruption(format!(
            "Incomplete header: expected at least {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    if &bytes[0..4] != MAGIC {
        return Err(SFileError::Corruption("Bad magic".to_string()));
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != VERSION {
        return Err(SFileError::Corruption(format!(
            "Unsupported header version: {}",
            version
        )));
    }

    let payload_len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
    if payload_len > MAX_HEADER_SIZE {
        return Err(SFileError::Corruption(format!(
            "Payload too large: {} bytes (max {})",
            payload_len, MAX_HEADER_SIZE
        )));
    }

    let expected_crc = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]);
    let payload = &bytes[HEADER_SIZE..];

    if payload.len() != payload_len as usize {
        return Err(SFileError::Corruption(format!(
            "Payload length mismatch: header says {}, found {}",
            payload_len,
            payload.len()
        )));
    }

    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(SFileError::Corruption(format!(
            "CRC mismatch: expected {:#010x}, got {:#010x}",
            expected_crc, actual_crc
        )));
    }

    bincode::deserialize(payload).map_err(|e| SFileError::Corruption(e.to_string()))
}
