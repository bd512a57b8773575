//! Paired File Store
//!
//! Filesystem backend: one data file plus its companion header file.
//!
//! ## Responsibilities
//! - Derive the header path from the base name
//! - Open or create both files, all-or-nothing
//! - Positioned writes into the data file
//! - Snapshot writes into the header file
//! - Release both handles on close, even if one fails
//!
//! ## On-Disk Layout
//! ```text
//!   <base>            raw payload, written at arbitrary offsets
//!   <base>-Header     one encoded attribute snapshot (see `header`)
//! ```

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::error::{Result, SFileError};
use crate::header::{encode_header, Attributes};
use crate::writer::StoreWriter;

/// A data file and its header file, opened together
///
/// ## Lifecycle
/// - `open` acquires both handles or neither
/// - writes go through `StoreWriter`
/// - `close` releases data first, then header; later calls return `Closed`
/// - dropping without `close` still releases both handles, silently
///
/// There is no internal locking. Every operation takes `&mut self`, so a
/// store has exactly one user at a time; share it behind a `Mutex` if needed.
#[derive(Debug)]
pub struct PairedFileStore {
    /// Store configuration (suffix, mode, sync policy)
    config: StoreConfig,

    /// Path of the data file (the base name, verbatim)
    data_path: PathBuf,

    /// Path of the header file (base name + suffix)
    header_path: PathBuf,

    /// Open handles; `None` once closed
    files: Option<FilePair>,
}

#[derive(Debug)]
struct FilePair {
    data: File,
    header: File,
}

impl PairedFileStore {
    /// Open or create a store with the default configuration
    pub fn open(base: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(base, StoreConfig::default())
    }

    /// Open or create a store
    ///
    /// On open:
    /// 1. Derive the header path (base + suffix)
    /// 2. Open/create the data file, read-write, no truncation
    /// 3. Open/create the header file the same way
    ///
    /// If step 3 fails the data handle from step 2 is dropped before the
    /// error is returned. The data file itself stays on disk.
    pub fn open_with_config(base: impl AsRef<Path>, config: StoreConfig) -> Result<Self> {
        let data_path = base.as_ref().to_path_buf();
        let header_path = config.header_path(&data_path);

        let data = open_rw(&data_path, config.file_mode)?;
        // `data` is released here if the header cannot be opened
        let header = open_rw(&header_path, config.file_mode)?;

        tracing::debug!(
            "Opened store {} (header {})",
            data_path.display(),
            header_path.display()
        );

        Ok(Self {
            config,
            data_path,
            header_path,
            files: Some(FilePair { data, header }),
        })
    }

    /// Path of the data file
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Path of the header file
    pub fn header_path(&self) -> &Path {
        &self.header_path
    }

    /// Configuration this store was opened with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether `close` has already run
    pub fn is_closed(&self) -> bool {
        self.files.is_none()
    }

    fn files(&self) -> Result<&FilePair> {
        self.files.as_ref().ok_or(SFileError::Closed)
    }
}

impl StoreWriter for PairedFileStore {
    fn save_data(&mut self, data: &[u8], position: i64) -> Result<usize> {
        let files = self.files()?;
        let offset = u64::try_from(position).map_err(|_| SFileError::InvalidOffset(position))?;

        let written = write_at(&files.data, data, offset)
            .map_err(|source| SFileError::Write { offset, source })?;

        if self.config.sync_policy.sync_on_write() {
            files
                .data
                .sync_data()
                .map_err(|source| SFileError::Write { offset, source })?;
        }

        tracing::trace!(
            "Wrote {}/{} bytes at offset {} to {}",
            written,
            data.len(),
            offset,
            self.data_path.display()
        );

        Ok(written)
    }

    fn save_header(&mut self, attributes: &Attributes) -> Result<()> {
        let files = self.files()?;

        // Encode first so a bad attribute set leaves the old snapshot intact
        let snapshot = encode_header(attributes)?;

        files
            .header
            .set_len(0)
            .map_err(|source| SFileError::Write { offset: 0, source })?;
        write_all_at(&files.header, &snapshot, 0)
            .map_err(|source| SFileError::Write { offset: 0, source })?;

        if self.config.sync_policy.sync_on_write() {
            files
                .header
                .sync_all()
                .map_err(|source| SFileError::Write { offset: 0, source })?;
        }

        tracing::debug!(
            "Saved {} attributes ({} bytes) to {}",
            attributes.len(),
            snapshot.len(),
            self.header_path.display()
        );

        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let FilePair { data, header } = self.files.take().ok_or(SFileError::Closed)?;
        let sync = self.config.sync_policy.sync_on_close();

        let data_result = release(data, &self.data_path, sync);
        let header_result = release(header, &self.header_path, sync);

        tracing::debug!("Closed store {}", self.data_path.display());

        match (data_result, header_result) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(first), Err(second)) => {
                tracing::warn!("Header close also failed: {}", second);
                Err(first)
            }
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        }
    }
}

// =============================================================================
// File Helpers
// =============================================================================

fn open_rw(path: &Path, mode: u32) -> Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path).map_err(|source| SFileError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Close the handle, syncing first if asked. The handle is released either
/// way; a sync error wins over a close error.
fn release(file: File, path: &Path, sync: bool) -> Result<()> {
    let synced = if sync { file.sync_all() } else { Ok(()) };
    let closed = close_file(file);

    synced.and(closed).map_err(|source| SFileError::Close {
        path: path.to_path_buf(),
        source,
    })
}

/// close(2) with its result kept; `File`'s drop discards it
#[cfg(unix)]
fn close_file(file: File) -> io::Result<()> {
    use std::os::unix::io::IntoRawFd;

    let fd = file.into_raw_fd();
    // SAFETY: `fd` was just detached from `file`, so nothing else owns it.
    // The descriptor is gone even when close reports an error.
    if unsafe { libc::close(fd) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn close_file(file: File) -> io::Result<()> {
    drop(file);
    Ok(())
}

/// One positioned write; the cursor is not used
#[cfg(unix)]
fn write_at(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.write_at(buf, offset)
}

#[cfg(windows)]
fn write_at(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_write(buf, offset)
}

#[cfg(unix)]
fn write_all_at(file: &File, buf: &[u8], offset: u64) -> io::Result<()> {
    use std::os::unix::fs::FileExt;
    file.write_all_at(buf, offset)
}

#[cfg(windows)]
fn write_all_at(file: &File, mut buf: &[u8], mut offset: u64) -> io::Result<()> {
    while !buf.is_empty() {
        let n = write_at(file, buf, offset)?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "failed to write whole header snapshot",
            ));
        }
        buf = &buf[n..];
        offset += n as u64;
    }
    Ok(())
}
