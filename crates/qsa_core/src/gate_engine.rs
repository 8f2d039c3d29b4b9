//! Gate application engine.
//!
//! Sequences amplitude read, parallel multiply, and amplitude write for one
//! gate trigger. The engine visits exactly `gate_dim` amplitudes (one per
//! tick in the read and write phases, one matrix row per tick in the
//! compute phase), so application time is linear in the gate dimension
//! rather than in the size of the Hilbert space. A trigger asserted while
//! the engine is busy is ignored with no queueing and no error signal;
//! callers poll for done or idle before issuing a new gate.

use crate::CoreError;
use crate::multiplier::MultiplierArray;
use alloc::vec::Vec;
use crate::statevector::{GateAddressGenerator, StatevectorStore};
use num_complex::Complex32;
use qsa_common::gate::{GateSize, MAX_GATE_DIM};

/// Host-supplied description of one gate operation.
///
/// Carries the size class, the qubit mask and the gate matrix. The matrix
/// lives in a fixed 16x16 buffer regardless of actual dimension; entries
/// beyond `size.dimension()` are ignored. Read-only during the gate cycle.
#[derive(Debug, Clone, Copy)]
pub struct GateDescriptor {
    size: GateSize,
    qubit_mask: u32,
    matrix: [[Complex32; MAX_GATE_DIM]; MAX_GATE_DIM],
}

impl GateDescriptor {
    /// Builds a descriptor from row-major matrix entries.
    ///
    /// `entries` must hold at least `dim * dim` values for the class's
    /// dimension. The size class must match the number of set bits in
    /// `qubit_mask`; a mismatch would make address generation undefined,
    /// so it is rejected here rather than silently tolerated.
    pub fn new(
        size: GateSize,
        qubit_mask: u32,
        entries: &[Complex32],
    ) -> Result<Self, CoreError> {
        if qubit_mask.count_ones() != size.qubit_count() {
            return Err(CoreError::GateArityMismatch);
        }
        let dim = size.dimension();
        if entries.len() < dim * dim {
            return Err(CoreError::MatrixTooSmall);
        }
        let mut matrix = [[Complex32::new(0.0, 0.0); MAX_GATE_DIM]; MAX_GATE_DIM];
        for row in 0..dim {
            for col in 0..dim {
                matrix[row][col] = entries[row * dim + col];
            }
        }
        Ok(Self {
            size,
            qubit_mask,
            matrix,
        })
    }

    /// Builds a descriptor from the wire encoding: two parallel arrays of
    /// real and imaginary parts, row-major, unused entries ignored.
    pub fn from_parallel(
        size: GateSize,
        qubit_mask: u32,
        re: &[f32],
        im: &[f32],
    ) -> Result<Self, CoreError> {
        let dim = size.dimension();
        if re.len() < dim * dim || im.len() < dim * dim {
            return Err(CoreError::MatrixTooSmall);
        }
        let entries: Vec<Complex32> = re
            .iter()
            .zip(im.iter())
            .take(dim * dim)
            .map(|(&r, &i)| Complex32::new(r, i))
            .collect();
        Self::new(size, qubit_mask, &entries)
    }

    /// 1-qubit identity gate on qubit 0.
    pub fn identity() -> Self {
        let one = Complex32::new(1.0, 0.0);
        let zero = Complex32::new(0.0, 0.0);
        Self::new(GateSize::One, 0b1, &[one, zero, zero, one])
            .expect("identity descriptor is well-formed")
    }

    pub fn size(&self) -> GateSize {
        self.size
    }

    pub fn qubit_mask(&self) -> u32 {
        self.qubit_mask
    }

    /// Gate matrix dimension (2, 4, 8 or 16).
    pub fn dimension(&self) -> usize {
        self.size.dimension()
    }

    /// One matrix row, truncated to the gate dimension.
    pub fn row(&self, row: usize) -> &[Complex32] {
        &self.matrix[row][..self.dimension()]
    }
}

impl Default for GateDescriptor {
    fn default() -> Self {
        Self::identity()
    }
}

/// Gate engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    ReadAmplitudes,
    Compute,
    WriteResults,
    Done,
}

/// Five-state gate application engine.
pub struct GateEngine {
    state: GateState,
    descriptor: GateDescriptor,
    addr_gen: GateAddressGenerator,
    num_qubits: u32,
    addr_counter: usize,
    compute_idx: usize,
    amp_buffer: [Complex32; MAX_GATE_DIM],
    result_buffer: [Complex32; MAX_GATE_DIM],
    multipliers: MultiplierArray,
    gate_done: bool,
}

impl GateEngine {
    /// Creates an idle engine for a `num_qubits`-wide store, loaded with
    /// the identity descriptor.
    pub fn new(num_qubits: u32) -> Self {
        let descriptor = GateDescriptor::identity();
        let mut addr_gen = GateAddressGenerator::new();
        addr_gen.configure(descriptor.qubit_mask(), num_qubits);
        Self {
            state: GateState::Idle,
            descriptor,
            addr_gen,
            num_qubits,
            addr_counter: 0,
            compute_idx: 0,
            amp_buffer: [Complex32::new(0.0, 0.0); MAX_GATE_DIM],
            result_buffer: [Complex32::new(0.0, 0.0); MAX_GATE_DIM],
            multipliers: MultiplierArray::new(),
            gate_done: false,
        }
    }

    /// Loads the next gate and rewinds the address sweep.
    ///
    /// Ignored while a gate cycle is in flight, mirroring the re-trigger
    /// policy: the descriptor is read-only during the cycle.
    pub fn load_descriptor(&mut self, descriptor: GateDescriptor) {
        if self.state != GateState::Idle {
            return;
        }
        self.addr_gen.configure(descriptor.qubit_mask(), self.num_qubits);
        self.descriptor = descriptor;
    }

    /// True when a new trigger would be accepted on the next tick.
    pub fn is_idle(&self) -> bool {
        self.state == GateState::Idle
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Number of triggers in a full-statevector sweep of the loaded gate.
    pub fn num_groups(&self) -> u32 {
        self.addr_gen.num_groups()
    }

    /// Advances the engine one tick.
    ///
    /// `gate_start` is a level input sampled only in the Idle state.
    /// Returns the `gate_done` signal, which is high for exactly the Done
    /// tick of a completed cycle.
    pub fn tick(&mut self, store: &mut StatevectorStore, gate_start: bool) -> bool {
        self.gate_done = false;
        let dim = self.descriptor.dimension();

        match self.state {
            GateState::Idle => {
                if gate_start {
                    self.addr_counter = 0;
                    self.state = GateState::ReadAmplitudes;
                }
            }
            GateState::ReadAmplitudes => {
                let addr = self.addr_gen.amplitude_addr(self.addr_counter as u32);
                self.amp_buffer[self.addr_counter] = store.port_a(addr, None);
                self.addr_counter += 1;
                if self.addr_counter == dim {
                    self.compute_idx = 0;
                    self.state = GateState::Compute;
                }
            }
            GateState::Compute => {
                let row = self.descriptor.row(self.compute_idx);
                self.result_buffer[self.compute_idx] =
                    self.multipliers.dot_row(row, &self.amp_buffer[..dim]);
                self.compute_idx += 1;
                if self.compute_idx == dim {
                    self.addr_counter = 0;
                    self.state = GateState::WriteResults;
                }
            }
            GateState::WriteResults => {
                let addr = self.addr_gen.amplitude_addr(self.addr_counter as u32);
                store.port_a(addr, Some(self.result_buffer[self.addr_counter]));
                self.addr_counter += 1;
                if self.addr_counter == dim {
                    self.state = GateState::Done;
                }
            }
            GateState::Done => {
                self.gate_done = true;
                self.addr_gen.advance_group();
                self.state = GateState::Idle;
            }
        }
        self.gate_done
    }
}
