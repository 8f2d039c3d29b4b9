//! Register-level driver for the accelerator model.
//!
//! Owns an [`Accelerator`] instance and its feedback collaborators, and
//! drives every interaction through the register map the way firmware
//! would: configure, strobe a CONTROL bit, then poll STATUS. The driver
//! issues a STATUS read on every tick while waiting so the one-cycle done
//! pulse is always captured by some in-flight read, and it clears CONTROL
//! while the core is still busy so the level trigger cannot re-fire when
//! the engine returns to idle.

use anyhow::{Result, bail, ensure};
use qsa_common::qec::CorrectionPattern;
use qsa_common::regmap::{
    CONTROL_CYCLE_START, CONTROL_GATE_START, REG_CONTROL, REG_GATE_PARAMS, REG_GATE_TYPE,
    REG_RESULT, REG_STATUS, RESP_OKAY, STATUS_DONE, STATUS_RESULT_VALID,
};
use qsa_core::accelerator::Accelerator;
use qsa_core::bus::BusOutput;
use qsa_core::feedback::{CorrectionApply, ImmediateApply, SyndromeMeasure, ZeroSyndromeMeasure};
use qsa_core::gate_engine::GateDescriptor;
use qsa_core::statevector::StatevectorStore;

/// Poll budget before an operation is declared hung.
pub const DEFAULT_TIMEOUT_CYCLES: u64 = 2000;

/// Host-side driver over the clocked accelerator core.
pub struct Driver {
    accel: Accelerator,
    measure: Box<dyn SyndromeMeasure>,
    apply: Box<dyn CorrectionApply>,
    cycles: u64,
    timeout: u64,
}

impl Driver {
    /// Builds a driver with stub feedback collaborators, for workloads
    /// that only exercise the gate path.
    pub fn new(num_qubits: u32) -> Result<Self> {
        Self::with_collaborators(
            num_qubits,
            Box::new(ZeroSyndromeMeasure),
            Box::new(ImmediateApply),
        )
    }

    /// Builds a driver wired to external measurement and correction
    /// collaborators for closed-loop error correction.
    pub fn with_collaborators(
        num_qubits: u32,
        measure: Box<dyn SyndromeMeasure>,
        apply: Box<dyn CorrectionApply>,
    ) -> Result<Self> {
        Ok(Self {
            accel: Accelerator::new(num_qubits)?,
            measure,
            apply,
            cycles: 0,
            timeout: DEFAULT_TIMEOUT_CYCLES,
        })
    }

    /// Advances the core one clock tick with at most one bus transaction
    /// per channel.
    fn tick(&mut self, write: Option<(u32, u32)>, read: Option<u32>) -> BusOutput {
        self.cycles += 1;
        self.accel
            .tick(write, read, &mut *self.measure, &mut *self.apply)
    }

    /// One register write: the request tick plus the acknowledgement tick.
    pub fn write_reg(&mut self, offset: u32, value: u32) -> Result<()> {
        self.tick(Some((offset, value)), None);
        let out = self.tick(None, None);
        ensure!(
            out.write_resp == Some(RESP_OKAY),
            "write to {offset:#06x} was not acknowledged"
        );
        Ok(())
    }

    /// One register read: the request tick plus the data tick.
    pub fn read_reg(&mut self, offset: u32) -> Result<u32> {
        self.tick(None, Some(offset));
        let out = self.tick(None, None);
        match out.read_resp {
            Some((value, RESP_OKAY)) => Ok(value),
            Some((_, resp)) => bail!("read of {offset:#06x} answered {resp:#04b}"),
            None => bail!("read of {offset:#06x} returned no response"),
        }
    }

    /// Polls STATUS until the done bit is seen, issuing one read per tick.
    ///
    /// Returns the full STATUS word from the done tick. Responses lag
    /// their request by one tick, so back-to-back reads form a pipeline
    /// that observes every STATUS value exactly once.
    fn poll_done(&mut self) -> Result<u32> {
        for _ in 0..self.timeout {
            let out = self.tick(None, Some(REG_STATUS));
            if let Some((status, _)) = out.read_resp {
                if status & STATUS_DONE != 0 {
                    return Ok(status);
                }
            }
        }
        bail!("operation did not signal done within {} cycles", self.timeout)
    }

    /// Strobes a CONTROL bit and waits for the resulting done pulse.
    ///
    /// The clear write lands while the operation is still in flight
    /// (every operation runs longer than the two writes take), so the
    /// level trigger is gone before the core returns to idle.
    fn trigger_and_wait(&mut self, start_bit: u32) -> Result<u32> {
        self.write_reg(REG_CONTROL, start_bit)?;
        self.write_reg(REG_CONTROL, 0)?;
        self.poll_done()
    }

    /// Applies one gate across the full statevector.
    ///
    /// Publishes the size class and qubit mask through GATE_TYPE and
    /// GATE_PARAMS, parks the matrix with the core, then re-triggers the
    /// engine once per subspace group until the sweep wraps.
    pub fn apply_gate(&mut self, descriptor: GateDescriptor) -> Result<()> {
        self.write_reg(REG_GATE_TYPE, descriptor.size() as u32)?;
        self.write_reg(REG_GATE_PARAMS, descriptor.qubit_mask())?;
        self.accel.load_gate(descriptor);

        let groups = self.accel.gate_sweep_groups();
        for _ in 0..groups {
            self.trigger_and_wait(CONTROL_GATE_START)?;
        }
        Ok(())
    }

    /// Runs one error-correction feedback cycle and returns the decoded
    /// correction from RESULT.
    pub fn run_cycle(&mut self) -> Result<CorrectionPattern> {
        let status = self.trigger_and_wait(CONTROL_CYCLE_START)?;
        ensure!(
            status & STATUS_RESULT_VALID != 0,
            "feedback cycle finished without a valid result"
        );
        let word = self.read_reg(REG_RESULT)?;
        Ok(CorrectionPattern::unpack(word))
    }

    /// Read-only view of the statevector store.
    pub fn store(&self) -> &StatevectorStore {
        self.accel.store()
    }

    /// Resets the statevector to |0...0>.
    pub fn reset_state(&mut self) {
        self.accel.reset_state();
    }

    /// Total clock ticks issued since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
