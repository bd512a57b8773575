//! Positioned data write tests

use sfile::{PairedFileStore, SFileError, StoreConfig, StoreWriter, SyncPolicy};

use super::{read, setup_temp_base};

#[test]
fn test_write_at_zero_reads_back() {
    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();

    let written = store.save_data(b"hello, sfile", 0).unwrap();

    assert_eq!(written, 12);
    assert_eq!(read(&base), b"hello, sfile");
}

#[test]
fn test_write_past_end_leaves_zero_gap() {
    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();

    store.save_data(b"abc", 0).unwrap();
    store.save_data(b"xyz", 10).unwrap();

    let contents = read(&base);
    assert_eq!(contents.len(), 13);
    assert_eq!(&contents[0..3], b"abc");
    assert_eq!(&contents[3..10], &[0u8; 7]);
    assert_eq!(&contents[10..13], b"xyz");
}

#[test]
fn test_first_write_far_from_start() {
    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();

    store.save_data(b"tail", 1 << 20).unwrap();

    let contents = read(&base);
    assert_eq!(contents.len(), (1 << 20) + 4);
    assert!(contents[..1 << 20].iter().all(|&b| b == 0));
    assert_eq!(&contents[1 << 20..], b"tail");
}

#[test]
fn test_writes_ignore_cursor() {
    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();

    store.save_data(b"world", 6).unwrap();
    store.save_data(b"hello ", 0).unwrap();

    assert_eq!(read(&base), b"hello world");
}

#[test]
fn test_overwrite_in_middle() {
    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();

    store.save_data(b"0123456789", 0).unwrap();
    store.save_data(b"ab", 4).unwrap();

    assert_eq!(read(&base), b"0123ab6789");
}

#[test]
fn test_empty_write() {
    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();

    assert_eq!(store.save_data(b"", 0).unwrap(), 0);
    assert!(read(&base).is_empty());
}

#[test]
fn test_negative_offset_rejected() {
    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();
    store.save_data(b"keep", 0).unwrap();

    match store.save_data(b"nope", -1) {
        Err(SFileError::InvalidOffset(offset)) => assert_eq!(offset, -1),
        other => panic!("Expected invalid offset, got {:?}", other),
    }

    assert_eq!(read(&base), b"keep");
}

#[test]
fn test_large_write_reports_full_count() {
    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();

    let data: Vec<u8> = (0..256 * 1024).map(|i| (i % 251) as u8).collect();
    let written = store.save_data(&data, 0).unwrap();

    assert_eq!(written, data.len());
    assert_eq!(read(&base), data);
}

#[test]
fn test_data_writes_leave_header_alone() {
    let (_temp, base) = setup_temp_base();
    let mut store = PairedFileStore::open(&base).unwrap();

    store.save_data(b"payload", 0).unwrap();

    assert!(read(store.header_path()).is_empty());
}

#[test]
fn test_every_write_sync_policy() {
    let (_temp, base) = setup_temp_base();
    let config = StoreConfig::builder()
        .sync_policy(SyncPolicy::EveryWrite)
        .build();
    let mut store = PairedFileStore::open_with_config(&base, config).unwrap();

    assert_eq!(store.save_data(b"durable", 3).unwrap(), 7);
    store.close().unwrap();

    assert_eq!(read(&base), b"\0\0\0durable");
}
