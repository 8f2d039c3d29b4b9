//! Host/core shared register file.
//!
//! One owned object holds the five mapped registers. The host reaches it
//! only through the bus channel, which can write CONTROL, GATE_TYPE and
//! GATE_PARAMS; STATUS and RESULT are hard-wired core outputs refreshed
//! every tick through the core-side setters. There is no host path that
//! can touch a core-owned register, so core priority needs no arbitration.

use qsa_common::regmap::{
    REG_CONTROL, REG_GATE_PARAMS, REG_GATE_TYPE, REG_RESULT, REG_STATUS, STATUS_DONE,
    STATUS_RESULT_VALID,
};

/// The five mapped 32-bit registers.
///
/// Values persist for the lifetime of the accelerator; writes overwrite,
/// reads are non-destructive.
#[derive(Debug, Default)]
pub struct RegisterFile {
    control: u32,
    status: u32,
    gate_type: u32,
    gate_params: u32,
    result: u32,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits one host write.
    ///
    /// Only CONTROL, GATE_TYPE and GATE_PARAMS are writable from the bus;
    /// writes to STATUS, RESULT or any unmapped offset are silently
    /// dropped. There is no address-range validation or error signal.
    pub fn host_write(&mut self, offset: u32, value: u32) {
        match offset {
            REG_CONTROL => self.control = value,
            REG_GATE_TYPE => self.gate_type = value,
            REG_GATE_PARAMS => self.gate_params = value,
            _ => {}
        }
    }

    /// Serves one host read; unmapped offsets read as zero.
    pub fn read(&self, offset: u32) -> u32 {
        match offset {
            REG_CONTROL => self.control,
            REG_STATUS => self.status,
            REG_GATE_TYPE => self.gate_type,
            REG_GATE_PARAMS => self.gate_params,
            REG_RESULT => self.result,
            _ => 0,
        }
    }

    /// Core-side STATUS update, applied every tick regardless of bus
    /// activity.
    pub fn set_status(&mut self, done: bool, result_valid: bool) {
        let mut status = 0;
        if done {
            status |= STATUS_DONE;
        }
        if result_valid {
            status |= STATUS_RESULT_VALID;
        }
        self.status = status;
    }

    /// Core-side RESULT latch; the value holds until the next valid result.
    pub fn latch_result(&mut self, value: u32) {
        self.result = value;
    }

    /// Current CONTROL value, forwarded to the compute core as levels.
    pub fn control(&self) -> u32 {
        self.control
    }

    /// Current GATE_TYPE value, forwarded to the compute core.
    pub fn gate_type(&self) -> u32 {
        self.gate_type
    }

    /// Current GATE_PARAMS value, forwarded to the compute core.
    pub fn gate_params(&self) -> u32 {
        self.gate_params
    }
}
