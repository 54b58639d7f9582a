//! CRC32 checksum over encoded snapshot bytes
//!
//! Uses CRC32 (IEEE polynomial) via the crc32fast crate.

use crc32fast::Hasher;

/// Computes a CRC32 checksum over the provided data.
///
/// Deterministic: the same input always produces the same output.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Formats a checksum for log output: `crc32:XXXXXXXX`
pub fn format_checksum(checksum: u32) -> String {
    format!("crc32:{:08x}", checksum)
}
