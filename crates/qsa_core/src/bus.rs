//! Register-mapped control interface.
//!
//! Models the hardware bus handshake as a synchronous request/response
//! call: a write presented with both address and data commits in the same
//! tick, and its acknowledgement is posted on the following tick; a read
//! samples the register in the request tick and delivers data plus
//! acknowledgement on the following tick. Every transaction is answered
//! OKAY unconditionally: unmapped reads return zero and unmapped writes
//! are dropped without any error indication.

use crate::regfile::RegisterFile;
use qsa_common::regmap::{CONTROL_CYCLE_START, CONTROL_GATE_START, RESP_OKAY};

/// Responses posted by the previous tick's transactions.
///
/// Each field is present exactly once per accepted request; the interface
/// holds a response only until the next tick's output, matching a
/// requester that is always ready.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BusOutput {
    /// Write acknowledgement code, if a write was presented last tick.
    pub write_resp: Option<u8>,
    /// Read data and acknowledgement code, if a read was presented last tick.
    pub read_resp: Option<(u32, u8)>,
}

/// Control interface: bus channels plus the owned register file.
pub struct ControlInterface {
    regs: RegisterFile,
    pending_write_resp: Option<u8>,
    pending_read_resp: Option<(u32, u8)>,
}

impl Default for ControlInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlInterface {
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::new(),
            pending_write_resp: None,
            pending_read_resp: None,
        }
    }

    /// Advances the bus channels one tick.
    ///
    /// Responses to last tick's requests are returned first, then any
    /// presented transactions commit, so a write is observable by the core
    /// in the same tick but its acknowledgement only in the next.
    pub fn tick(&mut self, write: Option<(u32, u32)>, read: Option<u32>) -> BusOutput {
        let output = BusOutput {
            write_resp: self.pending_write_resp.take(),
            read_resp: self.pending_read_resp.take(),
        };

        if let Some((offset, value)) = write {
            self.regs.host_write(offset, value);
            self.pending_write_resp = Some(RESP_OKAY);
        }
        if let Some(offset) = read {
            self.pending_read_resp = Some((self.regs.read(offset), RESP_OKAY));
        }

        output
    }

    /// Gate start level (CONTROL bit 0). Not self-clearing.
    pub fn gate_start(&self) -> bool {
        self.regs.control() & CONTROL_GATE_START != 0
    }

    /// Feedback-cycle start level (CONTROL bit 1). Not self-clearing.
    pub fn cycle_start(&self) -> bool {
        self.regs.control() & CONTROL_CYCLE_START != 0
    }

    /// GATE_TYPE as last written by the host (2 low bits used).
    ///
    /// Describes the gate whose matrix the host parks out-of-band; the
    /// parked descriptor is authoritative for the engine; this level is
    /// for read-back and consistency checks.
    pub fn gate_type(&self) -> u32 {
        self.regs.gate_type()
    }

    /// GATE_PARAMS (the gate qubit mask) as last written by the host.
    pub fn gate_params(&self) -> u32 {
        self.regs.gate_params()
    }

    /// Core-side STATUS mirror, applied every tick.
    pub fn update_status(&mut self, done: bool, result_valid: bool) {
        self.regs.set_status(done, result_valid);
    }

    /// Core-side RESULT latch.
    pub fn latch_result(&mut self, value: u32) {
        self.regs.latch_result(value);
    }
}
