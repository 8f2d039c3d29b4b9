//! Clocked model of the statevector accelerator's control path.
//!
//! This crate reimplements the accelerator's hardware modules as explicit
//! state machines advanced one clock tick at a time: the pipelined complex
//! multiplier array, the dual-port statevector store and its gate address
//! generator, the gate application engine, the Steane syndrome decoder, the
//! error-correction feedback controller, and the register-mapped control
//! interface. All modules share a single synchronous clock domain; every
//! operation reaches its DONE state in a bounded, input-independent number
//! of ticks.

#![no_std]

extern crate alloc;

/// Top-level composition of the accelerator's modules.
///
/// Owns the statevector store, gate engine, feedback controller and control
/// interface, and wires their per-tick signals: bus writes commit before the
/// engines sample their start levels, and the core drives STATUS and RESULT
/// with unconditional priority at the end of each tick.
pub mod accelerator;

/// Bit deposit/extract utilities for masked address generation.
///
/// Scatter and gather operations over an arbitrary bit mask, used to expand
/// a dense offset counter into the amplitude addresses selected by a gate's
/// qubit mask.
pub mod bit_utils;

/// Register-mapped control interface with request/response handshakes.
///
/// Models the AXI-Lite-style write and read channels as synchronous calls:
/// a presented transaction commits in the same tick and its response is
/// visible in the next tick's output.
pub mod bus;

/// Steane-code syndrome decoder with a fixed-latency lookup table.
///
/// Maps a 6-bit stabilizer syndrome to a 7-bit-per-axis correction pattern
/// through a statically built 64-entry table. Decode latency is two ticks
/// regardless of syndrome value.
pub mod decoder;

/// Error-correction feedback controller.
///
/// Sequences one measure -> decode -> apply cycle as an atomic operation,
/// driving external measurement and correction collaborators around the
/// embedded syndrome decoder.
pub mod feedback;

/// Gate application engine.
///
/// Reads the amplitudes of one addressed subspace, multiplies them by the
/// supplied gate matrix using the parallel multiplier array, and writes the
/// results back, in a fixed five-state sequence linear in the gate dimension.
pub mod gate_engine;

/// Two-stage pipelined complex multiplier and its replicated array.
pub mod multiplier;

/// Host/core shared register file with exclusive-write ownership.
pub mod regfile;

/// Dual-port amplitude storage and gate address generation.
pub mod statevector;

/// Errors reported by accelerator configuration operations.
///
/// The running core never raises errors: busy re-triggers are ignored,
/// unmapped register traffic is silently dropped, and unrecognized
/// syndromes decode to the all-zero correction. These variants cover the
/// construction-time validation that guards the documented preconditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// The requested statevector size is outside the supported 1..=16
    /// qubit range.
    QubitCountOutOfRange,

    /// A gate descriptor's size class disagrees with the number of set
    /// bits in its qubit mask.
    ///
    /// Address generation over a mismatched mask would visit an undefined
    /// address pattern, so the mismatch is rejected before the descriptor
    /// can reach the engine.
    GateArityMismatch,

    /// A gate descriptor was supplied fewer matrix entries than its
    /// dimension requires.
    MatrixTooSmall,
}

impl core::fmt::Display for CoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::QubitCountOutOfRange => {
                write!(f, "statevector size outside the supported 1..=16 qubit range")
            }
            Self::GateArityMismatch => {
                write!(f, "gate size class disagrees with the qubit mask popcount")
            }
            Self::MatrixTooSmall => {
                write!(f, "gate matrix has fewer entries than its dimension requires")
            }
        }
    }
}

impl core::error::Error for CoreError {}
