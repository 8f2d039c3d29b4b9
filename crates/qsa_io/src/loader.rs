use anyhow::{Context, Result};
use bitvec::prelude::*;
use qsa_common::qec::NUM_PHYSICAL_QUBITS;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One recorded error shot: the qubits carrying X and Z errors (bit q =
/// physical qubit q, 7 bits used per axis).
pub type ErrorShot = (u8, u8);

/// Number of bytes per shot record: one byte of X-error bits followed by
/// one byte of Z-error bits, bit 7 of each unused.
pub const BYTES_PER_SHOT: usize = 2;

/// Loads a binary error-shot file.
///
/// The file is a flat sequence of [`BYTES_PER_SHOT`]-byte records with no
/// header; a trailing partial record is ignored.
pub fn load_shot_file<P: AsRef<Path>>(path: P) -> Result<Vec<ErrorShot>> {
    let mut file = File::open(path).context("Failed to open shot file")?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let bits = BitVec::<u8, Lsb0>::from_vec(buffer);
    Ok(slice_shots(&bits))
}

/// Splits a raw bit stream into per-shot error patterns.
pub fn slice_shots(raw_bits: &BitVec<u8, Lsb0>) -> Vec<ErrorShot> {
    let stride_bits = BYTES_PER_SHOT * 8;
    let num_shots = raw_bits.len() / stride_bits;
    let mut shots = Vec::with_capacity(num_shots);

    for i in 0..num_shots {
        let start = i * stride_bits;
        let mut x = 0u8;
        let mut z = 0u8;
        for q in 0..NUM_PHYSICAL_QUBITS {
            if raw_bits[start + q] {
                x |= 1 << q;
            }
            if raw_bits[start + 8 + q] {
                z |= 1 << q;
            }
        }
        shots.push((x, z));
    }

    shots
}
