//! Close and release tests

use sfile::{Attributes, PairedFileStore, SFileError, StoreConfig, StoreWriter, SyncPolicy};

use super::{read, setup_temp_base};

#[test]
fn test_close_after_writes() {
    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();

    store.save_data(b"data", 0).unwrap();
    store.save_header(&Attributes::new()).unwrap();
    store.close().unwrap();

    assert!(store.is_closed());
    assert_eq!(read(&base), b"data");
}

#[test]
fn test_writes_after_close_fail() {
    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();
    store.close().unwrap();

    assert!(matches!(store.save_data(b"late", 0), Err(SFileError::Closed)));
    assert!(matches!(
        store.save_header(&Attributes::new()),
        Err(SFileError::Closed)
    ));
    assert!(read(&base).is_empty());
}

#[test]
fn test_double_close_fails() {
    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();

    store.close().unwrap();

    assert!(matches!(store.close(), Err(SFileError::Closed)));
}

#[test]
fn test_close_with_sync_on_close() {
    let (_temp, base) = setup_temp_base();
    let config = StoreConfig::builder()
        .sync_policy(SyncPolicy::OnClose)
        .build();
    let mut store = PairedFileStore::open_with_config(&base, config).unwrap();

    store.save_data(b"synced", 0).unwrap();
    store.close().unwrap();

    assert_eq!(read(&base), b"synced");
}

#[test]
fn test_reopen_after_close() {
    let (_temp, base) = setup_temp_base();

    let mut store = PairedFileStore::open(&base).unwrap();
    store.save_data(b"first", 0).unwrap();
    store.close().unwrap();

    let mut store = PairedFileStore::open(&base).unwrap();
    store.save_data(b"F", 0).unwrap();
    store.close().unwrap();

    assert_eq!(read(&base), b"First");
}

#[cfg(target_os = "linux")]
#[test]
fn test_close_releases_both_handles() {
    use super::open_fds_for;

    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();
    let header_path = store.header_path().to_path_buf();

    store.close().unwrap();

    assert_eq!(open_fds_for(&base), 0);
    assert_eq!(open_fds_for(&header_path), 0);
}

#[cfg(target_os = "linux")]
#[test]
fn test_drop_releases_both_handles() {
    use super::open_fds_for;

    let (_temp, base) = setup_temp_base();
    let store = PairedFileStore::open(&base).unwrap();
    let header_path = store.header_path().to_path_buf();

    drop(store);

    assert_eq!(open_fds_for(&base), 0);
    assert_eq!(open_fds_for(&header_path), 0);
}

// =============================================================================
// Close Failure Tests
// =============================================================================
// fsync on a FIFO fails with EINVAL, so `SyncPolicy::OnClose` turns a FIFO
// in place of either file into a close failure.

#[cfg(target_os = "linux")]
fn make_fifo(path: &std::path::Path) {
    let status = std::process::Command::new("mkfifo")
        .arg(path)
        .status()
        .unwrap();
    assert!(status.success());
}

#[cfg(target_os = "linux")]
fn sync_on_close() -> StoreConfig {
    StoreConfig::builder()
        .sync_policy(SyncPolicy::OnClose)
        .build()
}

#[cfg(target_os = "linux")]
#[test]
fn test_header_close_failure_reported() {
    use super::{header_path_of, open_fds_for};

    let (_temp, base) = setup_temp_base();
    let header_path = header_path_of(&base);
    make_fifo(&header_path);

    let mut store = PairedFileStore::open_with_config(&base, sync_on_close()).unwrap();
    store.save_data(b"data", 0).unwrap();

    match store.close() {
        Err(SFileError::Close { path, source }) => {
            assert_eq!(path, header_path);
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidInput);
        }
        other => panic!("Expected close error, got {:?}", other),
    }

    assert!(store.is_closed());
    assert_eq!(open_fds_for(&base), 0);
    assert_eq!(open_fds_for(&header_path), 0);
    assert_eq!(read(&base), b"data");
}

#[cfg(target_os = "linux")]
#[test]
fn test_both_close_failures_report_data_first() {
    use super::{header_path_of, open_fds_for};

    let (_temp, base) = setup_temp_base();
    let header_path = header_path_of(&base);
    make_fifo(&base);
    make_fifo(&header_path);

    let mut store = PairedFileStore::open_with_config(&base, sync_on_close()).unwrap();

    match store.close() {
        Err(SFileError::Close { path, source }) => {
            assert_eq!(path, base);
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidInput);
        }
        other => panic!("Expected close error, got {:?}", other),
    }

    // Both handles went away despite the data failure
    assert_eq!(open_fds_for(&base), 0);
    assert_eq!(open_fds_for(&header_path), 0);
    assert!(matches!(store.close(), Err(SFileError::Closed)));
}
