//! Unit tests for the binary error-shot loader.

use bitvec::prelude::*;
use qsa_io::loader::{BYTES_PER_SHOT, load_shot_file, slice_shots};
use std::fs;

/// Tests bit unpacking of a two-record stream.
#[test]
fn test_slice_shots() {
    // Shot 0: X on qubits 0 and 2, no Z. Shot 1: Z on qubit 6.
    let raw = vec![0b0000_0101u8, 0x00, 0x00, 0b0100_0000];
    let bits = BitVec::<u8, Lsb0>::from_vec(raw);
    let shots = slice_shots(&bits);
    assert_eq!(shots, vec![(0b0000101, 0), (0, 0b1000000)]);
}

/// Tests that bit 7 of each byte is outside the qubit range.
#[test]
fn test_unused_bits_ignored() {
    let raw = vec![0b1000_0001u8, 0b1000_0000];
    let bits = BitVec::<u8, Lsb0>::from_vec(raw);
    let shots = slice_shots(&bits);
    assert_eq!(shots, vec![(0b0000001, 0)]);
}

/// Tests loading records from disk, with a trailing partial record dropped.
#[test]
fn test_load_shot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shots.bin");
    fs::write(&path, [0x7F, 0x01, 0x00, 0x00, 0xAA]).unwrap();

    let shots = load_shot_file(&path).unwrap();
    assert_eq!(shots.len(), 5 / BYTES_PER_SHOT);
    assert_eq!(shots[0], (0b1111111, 0b0000001));
    assert_eq!(shots[1], (0, 0));
}

/// Tests an empty file yields no shots.
#[test]
fn test_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.bin");
    fs::write(&path, b"").unwrap();
    assert!(load_shot_file(&path).unwrap().is_empty());
}

/// Tests the missing-file error path.
#[test]
fn test_missing_file() {
    assert!(load_shot_file("/nonexistent/shots.bin").is_err());
}
