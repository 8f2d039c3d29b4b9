//! Common definitions and constants shared across the statevector accelerator system.
//!
//! This crate provides the register map for the host control interface, the
//! gate size-class encoding, and the Steane-code syndrome/correction types
//! used by the core model, the host driver, and the I/O utilities.

#![no_std]

// Register map for the host-facing control interface.
//
// Defines the word-addressed register offsets and bit assignments exposed by
// the accelerator's control interface. These values must match on both sides
// of the bus: the core's register file decodes them and the host driver
// issues them.
pub mod regmap {
    /// Offset of the CONTROL register.
    ///
    /// Bit 0 is the gate start strobe and bit 1 is the error-correction
    /// cycle start strobe. Neither bit is self-clearing: the core treats
    /// them as level triggers and the host is responsible for clearing
    /// them after the operation has been accepted.
    pub const REG_CONTROL: u32 = 0x0000;

    /// Offset of the STATUS register.
    ///
    /// Bit 0 mirrors the core's done signal and bit 1 mirrors result_valid.
    /// Both bits are driven by the core every cycle regardless of register
    /// channel activity; host writes to this offset are dropped.
    pub const REG_STATUS: u32 = 0x0004;

    /// Offset of the GATE_TYPE register.
    ///
    /// Read/write scratch register forwarded directly to the compute core.
    /// Only the 2 low bits are interpreted, as a gate size class (see
    /// [`crate::gate::GateSize`]).
    pub const REG_GATE_TYPE: u32 = 0x0008;

    /// Offset of the GATE_PARAMS register.
    ///
    /// Read/write scratch register forwarded directly to the compute core.
    /// Carries the 32-bit qubit mask selecting which qubits the next gate
    /// acts on.
    pub const REG_GATE_PARAMS: u32 = 0x000C;

    /// Offset of the RESULT register.
    ///
    /// Latches the core's packed output word whenever result_valid pulses
    /// and holds it until the next valid result. Host writes to this offset
    /// are dropped.
    pub const REG_RESULT: u32 = 0x0010;

    /// CONTROL bit 0: gate start strobe (level trigger).
    pub const CONTROL_GATE_START: u32 = 1 << 0;

    /// CONTROL bit 1: error-correction cycle start strobe (level trigger).
    pub const CONTROL_CYCLE_START: u32 = 1 << 1;

    /// STATUS bit 0: done, high for exactly the completion cycle.
    pub const STATUS_DONE: u32 = 1 << 0;

    /// STATUS bit 1: result_valid, high when RESULT latches a new value.
    pub const STATUS_RESULT_VALID: u32 = 1 << 1;

    /// Bus response code for an accepted transaction.
    ///
    /// Every write and read is acknowledged with OKAY (2-bit code 00),
    /// including accesses to unmapped offsets; there is no address-range
    /// validation on the bus.
    pub const RESP_OKAY: u8 = 0b00;
}

/// Gate size-class encoding shared by the register protocol and the core.
pub mod gate {
    /// Largest supported gate dimension (a 4-qubit gate).
    pub const MAX_GATE_DIM: usize = 16;

    /// Largest supported statevector size, in qubits.
    pub const MAX_NUM_QUBITS: u32 = 16;

    /// Gate size class carried in the 2 low bits of GATE_TYPE.
    ///
    /// Each class maps to a fixed gate matrix dimension: a 1-qubit gate is
    /// a 2x2 matrix, a 2-qubit gate 4x4, and so on up to 16x16. The class
    /// must agree with the number of set bits in the qubit mask; that
    /// invariant is validated when a gate descriptor is constructed, not
    /// by the engine itself.
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum GateSize {
        /// 1-qubit gate, dimension 2.
        One = 0b00,
        /// 2-qubit gate, dimension 4.
        Two = 0b01,
        /// 3-qubit gate, dimension 8.
        Three = 0b10,
        /// 4-qubit gate, dimension 16.
        Four = 0b11,
    }

    impl GateSize {
        /// Decodes a size class from the 2 low bits of a GATE_TYPE value.
        pub const fn from_bits(bits: u32) -> Self {
            match bits & 0b11 {
                0b00 => Self::One,
                0b01 => Self::Two,
                0b10 => Self::Three,
                _ => Self::Four,
            }
        }

        /// Gate matrix dimension for this size class (2, 4, 8 or 16).
        pub const fn dimension(self) -> usize {
            2 << (self as usize)
        }

        /// Number of qubits a gate of this size class acts on.
        pub const fn qubit_count(self) -> u32 {
            self as u32 + 1
        }
    }
}

/// Steane [[7,1,3]] code constants and syndrome/correction types.
///
/// The code encodes one logical qubit into seven physical qubits and
/// corrects any single-qubit error. Three X stabilizers and three Z
/// stabilizers share the same qubit supports; each stabilizer outcome
/// contributes one bit to a 3-bit syndrome field, with stabilizer 0 as
/// the most significant bit.
pub mod qec {
    /// Number of physical qubits in the code block.
    pub const NUM_PHYSICAL_QUBITS: usize = 7;

    /// Number of stabilizer generators per axis.
    pub const NUM_STABILIZERS: usize = 3;

    /// Qubit supports of the three stabilizer generators.
    ///
    /// The same supports are used for the X and Z stabilizers. A single
    /// error on qubit q flips exactly the stabilizers whose support
    /// contains q, which makes the resulting 3-bit syndrome a unique,
    /// nonzero signature for each of the seven qubits.
    pub const STABILIZER_SUPPORTS: [[usize; 4]; NUM_STABILIZERS] =
        [[0, 1, 2, 3], [0, 1, 4, 5], [0, 2, 4, 6]];

    /// Computes the 3-bit syndrome signature of a single error on `qubit`.
    ///
    /// Bit (NUM_STABILIZERS - 1 - i) is set when stabilizer i's support
    /// contains the qubit, so stabilizer 0 lands in the most significant
    /// bit of the field. Qubit 0 sits in every support and signs as 0b111;
    /// the signatures for qubits 0..7 are 7, 6, 5, 4, 3, 2, 1.
    pub const fn syndrome_for_qubit(qubit: usize) -> u8 {
        let mut signature = 0u8;
        let mut i = 0;
        while i < NUM_STABILIZERS {
            let support = STABILIZER_SUPPORTS[i];
            let mut j = 0;
            while j < support.len() {
                if support[j] == qubit {
                    signature |= 1 << (NUM_STABILIZERS - 1 - i);
                }
                j += 1;
            }
            i += 1;
        }
        signature
    }

    /// One round of stabilizer measurement outcomes.
    ///
    /// Two 3-bit fields, one per stabilizer axis. Produced by an external
    /// measurement collaborator and consumed once per decode cycle; the
    /// decoder indexes its lookup table with the MSB-first concatenation
    /// {syndrome_x, syndrome_z}.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Syndrome {
        /// X-stabilizer outcomes (3 bits, stabilizer 0 in the MSB).
        pub x: u8,
        /// Z-stabilizer outcomes (3 bits, stabilizer 0 in the MSB).
        pub z: u8,
    }

    impl Syndrome {
        /// Builds a syndrome, truncating each field to 3 bits.
        pub const fn new(x: u8, z: u8) -> Self {
            Self {
                x: x & 0b111,
                z: z & 0b111,
            }
        }

        /// 6-bit lookup address `{syndrome_x, syndrome_z}`, X field MSB-first.
        pub const fn lut_addr(self) -> usize {
            (((self.x & 0b111) << 3) | (self.z & 0b111)) as usize
        }
    }

    /// Correction pattern produced by the decoder.
    ///
    /// Two 7-bit fields, one bit per physical qubit, naming the qubits that
    /// receive an X or Z correction. Derived solely from a syndrome by table
    /// lookup; the all-zero pattern means "no correction".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CorrectionPattern {
        /// Qubits receiving an X correction (bit q = qubit q).
        pub x: u8,
        /// Qubits receiving a Z correction (bit q = qubit q).
        pub z: u8,
    }

    impl CorrectionPattern {
        /// Builds a pattern, truncating each field to 7 bits.
        pub const fn new(x: u8, z: u8) -> Self {
            Self {
                x: x & 0x7F,
                z: z & 0x7F,
            }
        }

        /// True when no qubit receives a correction on either axis.
        pub const fn is_clear(self) -> bool {
            self.x == 0 && self.z == 0
        }

        /// Packs the pattern into the 32-bit RESULT register format.
        ///
        /// The X field occupies bits 8..15 and the Z field bits 0..6.
        pub const fn pack(self) -> u32 {
            ((self.x as u32) << 8) | self.z as u32
        }

        /// Unpacks a pattern from the 32-bit RESULT register format.
        pub const fn unpack(word: u32) -> Self {
            Self::new((word >> 8) as u8, word as u8)
        }
    }
}
