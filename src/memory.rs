//! In-memory store
//!
//! A `StoreWriter` backed by two byte buffers instead of two files.
//! Intended for tests and embedding. An optional capacity limit turns it
//! into a constrained sink: writes that cross the limit are cut short.

use std::io;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use crate::error::{Result, SFileError};
use crate::header::{decode_header, encode_header, Attributes};
use crate::writer::StoreWriter;

#[derive(Debug, Default)]
struct Buffers {
    data: Vec<u8>,
    header: Vec<u8>,
}

/// In-memory paired store
#[derive(Debug)]
pub struct MemoryStore {
    /// Buffers shared with any outstanding views
    shared: Arc<Mutex<Buffers>>,

    /// Maximum data length; `None` means unbounded
    capacity: Option<usize>,

    closed: bool,
}

/// Read-only handle onto a `MemoryStore`'s buffers
///
/// Stays valid after the store is closed or dropped.
#[derive(Debug, Clone)]
pub struct MemoryStoreView {
    shared: Arc<Mutex<Buffers>>,
}

impl MemoryStore {
    /// Create an unbounded store
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Buffers::default())),
            capacity: None,
            closed: false,
        }
    }

    /// Create a store whose data buffer never grows past `limit` bytes
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            capacity: Some(limit),
            ..Self::new()
        }
    }

    /// Get a view onto the buffers
    pub fn view(&self) -> MemoryStoreView {
        MemoryStoreView {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Capacity limit, if any
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Whether `close` has already run
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(SFileError::Closed);
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreWriter for MemoryStore {
    fn save_data(&mut self, data: &[u8], position: i64) -> Result<usize> {
        self.ensure_open()?;
        let offset = u64::try_from(position).map_err(|_| SFileError::InvalidOffset(position))?;

        if data.is_empty() {
            return Ok(0);
        }

        let start = usize::try_from(offset).map_err(|_| SFileError::Write {
            offset,
            source: io::Error::new(io::ErrorKind::InvalidInput, "offset exceeds address space"),
        })?;
        let limit = self.capacity.unwrap_or(usize::MAX);

        if start >= limit {
            return Err(SFileError::Write {
                offset,
                source: io::Error::new(io::ErrorKind::WriteZero, "capacity exhausted"),
            });
        }

        // Cut the write at the capacity limit
        let written = data.len().min(limit - start);
        let end = start + written;

        let mut buffers = self.shared.lock();
        if buffers.data.len() < end {
            let additional = end - buffers.data.len();
            buffers.data.try_reserve(additional).map_err(|e| SFileError::Write {
                offset,
                source: io::Error::new(io::ErrorKind::OutOfMemory, e),
            })?;
            buffers.data.resize(end, 0);
        }
        buffers.data[start..end].copy_from_slice(&data[..written]);

        tracing::trace!("Wrote {}/{} bytes at offset {} to memory", written, data.len(), offset);

        Ok(written)
    }

    fn save_header(&mut self, attributes: &Attributes) -> Result<()> {
        self.ensure_open()?;
        let snapshot = encode_header(attributes)?;
        self.shared.lock().header = snapshot;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.closed = true;
        Ok(())
    }
}

impl MemoryStoreView {
    /// Snapshot of the data buffer
    pub fn data(&self) -> Bytes {
        Bytes::copy_from_slice(&self.shared.lock().data)
    }

    /// Snapshot of the encoded header
    pub fn header(&self) -> Bytes {
        Bytes::copy_from_slice(&self.shared.lock().header)
    }

    /// Decode the current header snapshot
    pub fn attributes(&self) -> Result<Attributes> {
        decode_header(&self.shared.lock().header)
    }
}
