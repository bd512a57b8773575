//! Store writer capability
//!
//! The contract shared by every paired-store backend.

use crate::error::Result;
use crate::header::Attributes;

/// Writes a record's payload and its header attributes.
///
/// All implementations must satisfy these invariants:
/// - `save_data` performs a single positioned write and returns the number of
///   bytes it accepted. A short count is reported as-is, never retried.
/// - `save_header` replaces the stored snapshot; it never appends.
/// - After `close`, every operation fails with `SFileError::Closed`.
/// - No operation retries or swallows an error.
pub trait StoreWriter {
    /// Write `data` into the data file starting at byte `position`.
    ///
    /// Negative positions are rejected. Positions past the current end
    /// leave a zero-filled gap.
    fn save_data(&mut self, data: &[u8], position: i64) -> Result<usize>;

    /// Persist `attributes` as the current header snapshot.
    fn save_header(&mut self, attributes: &Attributes) -> Result<()>;

    /// Release both underlying resources.
    fn close(&mut self) -> Result<()>;
}
