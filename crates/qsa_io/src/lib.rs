//! I/O utilities for the statevector accelerator host tools.
//!
//! Provides a parser for the text circuit format consumed by the `run`
//! command and a loader for binary Steane error-shot files used to replay
//! deterministic error patterns through the feedback loop.

/// Loader for binary error-shot files.
///
/// Each shot is a fixed-width record naming the physical qubits carrying
/// X and Z errors. Handles file I/O and bit-level unpacking.
pub mod loader;

/// Parser for the text circuit format.
///
/// Parses a qubit-count header followed by one gate operation per line
/// into a [`parser::Circuit`] for execution by the host driver.
pub mod parser;
