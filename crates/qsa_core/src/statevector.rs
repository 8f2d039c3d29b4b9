//! Dual-port amplitude storage and gate address generation.
//!
//! The store holds one complex amplitude per basis state of the full
//! Hilbert space, preallocated at construction and initialized to the
//! |0...0> state. Port A supports one synchronous read-or-write per tick
//! with write-then-read-back ordering; port B is read-only and may be
//! issued in the same tick at a different address. The companion address
//! generator enumerates, for a gate's qubit mask, the amplitude addresses
//! of one affected subspace per gate trigger.

use crate::CoreError;
use crate::bit_utils::BitScatter;
use alloc::vec;
use alloc::vec::Vec;
use num_complex::Complex32;
use qsa_common::gate::MAX_NUM_QUBITS;

/// Dual-port storage for the full statevector.
///
/// Addresses presented on either port are truncated to the address width
/// `ceil(log2(2^NUM_QUBITS))`, matching hardware address wraparound; no
/// access faults. Amplitudes are mutated only through port A writes.
pub struct StatevectorStore {
    mem: Vec<Complex32>,
    addr_mask: u32,
    a_out: Complex32,
    b_out: Complex32,
}

impl StatevectorStore {
    /// Allocates storage for `num_qubits` qubits in the |0...0> state.
    ///
    /// Supports 1 to 16 qubits; the full `2^num_qubits` amplitude array is
    /// allocated up front and never grows or shrinks.
    pub fn new(num_qubits: u32) -> Result<Self, CoreError> {
        if num_qubits < 1 || num_qubits > MAX_NUM_QUBITS {
            return Err(CoreError::QubitCountOutOfRange);
        }
        let dim = 1usize << num_qubits;
        let mut mem = vec![Complex32::new(0.0, 0.0); dim];
        mem[0] = Complex32::new(1.0, 0.0);
        Ok(Self {
            mem,
            addr_mask: (dim - 1) as u32,
            a_out: Complex32::new(0.0, 0.0),
            b_out: Complex32::new(0.0, 0.0),
        })
    }

    /// Resets every amplitude to the |0...0> state without reallocating.
    pub fn reset(&mut self) {
        self.mem.fill(Complex32::new(0.0, 0.0));
        self.mem[0] = Complex32::new(1.0, 0.0);
    }

    /// One port A access: conditional write, unconditional read-back.
    ///
    /// When `write` is present the amplitude is stored first, then the read
    /// output register is updated from the same address, so a write at tick
    /// t is visible as a read in the same tick.
    #[inline(always)]
    pub fn port_a(&mut self, addr: u32, write: Option<Complex32>) -> Complex32 {
        let idx = (addr & self.addr_mask) as usize;
        if let Some(value) = write {
            self.mem[idx] = value;
        }
        self.a_out = self.mem[idx];
        self.a_out
    }

    /// One port B access: read-only, independent of port A.
    #[inline(always)]
    pub fn port_b(&mut self, addr: u32) -> Complex32 {
        self.b_out = self.mem[(addr & self.addr_mask) as usize];
        self.b_out
    }

    /// Last value driven onto the port A read register.
    pub fn port_a_out(&self) -> Complex32 {
        self.a_out
    }

    /// Last value driven onto the port B read register.
    pub fn port_b_out(&self) -> Complex32 {
        self.b_out
    }

    /// Number of stored amplitudes (`2^num_qubits`).
    pub fn len(&self) -> usize {
        self.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Read-only view of the full amplitude array.
    pub fn amplitudes(&self) -> &[Complex32] {
        &self.mem
    }

    /// Measurement probability of every basis state (|amplitude|^2).
    pub fn probabilities(&self) -> Vec<f32> {
        self.mem
            .iter()
            .map(|a| a.re * a.re + a.im * a.im)
            .collect()
    }
}

/// Address generation controller for gate application.
///
/// For a gate acting on the qubits named by `qubit_mask`, the amplitudes of
/// one affected subspace are found by depositing a dense offset counter
/// (0..gate_dim) into the masked bit positions over a base address. The
/// base is a running register enumerating the complement subspace: it
/// advances one coset each completed gate and wraps after
/// `2^num_qubits / gate_dim` groups, so a host applies a gate to the whole
/// statevector by re-triggering once per group.
#[derive(Debug, Clone, Copy)]
pub struct GateAddressGenerator {
    qubit_mask: u32,
    base_mask: u32,
    group: u32,
    num_groups: u32,
}

impl Default for GateAddressGenerator {
    /// An unconfigured generator behaves as a single group covering
    /// address zero, so advancing before `configure` is harmless.
    fn default() -> Self {
        Self {
            qubit_mask: 0,
            base_mask: 0,
            group: 0,
            num_groups: 1,
        }
    }
}

impl GateAddressGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconfigures the generator for a new gate and rewinds the running
    /// base to the first group.
    ///
    /// `qubit_mask` selects the gate's qubits within a `num_qubits`-wide
    /// address; mask bits above the address width are ignored. The mask is
    /// assumed to carry one set bit per gate qubit; a mismatched mask
    /// produces an unspecified address pattern (validated upstream at
    /// descriptor construction).
    pub fn configure(&mut self, qubit_mask: u32, num_qubits: u32) {
        let addr_mask = ((1u64 << num_qubits) - 1) as u32;
        self.qubit_mask = qubit_mask & addr_mask;
        self.base_mask = !self.qubit_mask & addr_mask;
        self.group = 0;
        self.num_groups = 1 << self.base_mask.count_ones();
    }

    /// Amplitude address of `offset` within the current group.
    #[inline(always)]
    pub fn amplitude_addr(&self, offset: u32) -> u32 {
        BitScatter::deposit(self.group, self.base_mask) | BitScatter::deposit(offset, self.qubit_mask)
    }

    /// Advances the running base to the next group, wrapping after the
    /// last one.
    pub fn advance_group(&mut self) {
        self.group = (self.group + 1) % self.num_groups;
    }

    /// Index of the group the next trigger will address.
    pub fn group(&self) -> u32 {
        self.group
    }

    /// Number of groups in a full sweep (`2^num_qubits / gate_dim`).
    pub fn num_groups(&self) -> u32 {
        self.num_groups
    }
}
