//! Top-level accelerator composition.
//!
//! Ties the control interface, gate engine, statevector store and feedback
//! controller to one clock. Control flow matches the hardware: a host
//! register write commits first, the engines then sample their start
//! levels from CONTROL in the same tick, and the core drives STATUS and
//! RESULT last, with unconditional priority over any host activity.

use crate::CoreError;
use crate::bus::{BusOutput, ControlInterface};
use crate::feedback::{CorrectionApply, FeedbackController, SyndromeMeasure};
use crate::gate_engine::{GateDescriptor, GateEngine};
use crate::statevector::StatevectorStore;

/// The assembled accelerator core.
pub struct Accelerator {
    store: StatevectorStore,
    engine: GateEngine,
    feedback: FeedbackController,
    ctrl: ControlInterface,
}

impl Accelerator {
    /// Builds an accelerator over a `num_qubits`-wide statevector
    /// (1 to 16 qubits), initialized to the |0...0> state.
    pub fn new(num_qubits: u32) -> Result<Self, CoreError> {
        Ok(Self {
            store: StatevectorStore::new(num_qubits)?,
            engine: GateEngine::new(num_qubits),
            feedback: FeedbackController::new(),
            ctrl: ControlInterface::new(),
        })
    }

    /// Supplies the next gate's matrix and qubit mask.
    ///
    /// Matrix delivery is out-of-band with respect to the five mapped
    /// registers: the host parks the descriptor here immediately before
    /// strobing CONTROL, the same way the hardware presents the matrix as
    /// parallel input arrays rather than bus registers. The GATE_TYPE and
    /// GATE_PARAMS registers describe the parked gate for host read-back;
    /// the descriptor itself is what drives the engine. Ignored while a
    /// gate cycle is in flight.
    pub fn load_gate(&mut self, descriptor: GateDescriptor) {
        self.engine.load_descriptor(descriptor);
    }

    /// Advances the whole core one clock tick.
    ///
    /// `write`/`read` carry at most one bus transaction each; `measure`
    /// and `apply` are the feedback controller's external collaborators
    /// (use the stubs from [`crate::feedback`] when only the gate path is
    /// exercised). Returns the bus responses for the previous tick's
    /// transactions.
    pub fn tick(
        &mut self,
        write: Option<(u32, u32)>,
        read: Option<u32>,
        measure: &mut dyn SyndromeMeasure,
        apply: &mut dyn CorrectionApply,
    ) -> BusOutput {
        let output = self.ctrl.tick(write, read);

        let gate_done = self.engine.tick(&mut self.store, self.ctrl.gate_start());
        let cycle_done = self
            .feedback
            .tick(self.ctrl.cycle_start(), measure, apply);

        let result_valid = cycle_done;
        if result_valid {
            self.ctrl.latch_result(self.feedback.correction().pack());
        }
        self.ctrl.update_status(gate_done || cycle_done, result_valid);

        output
    }

    /// Read-only view of the statevector store.
    pub fn store(&self) -> &StatevectorStore {
        &self.store
    }

    /// Resets the statevector to |0...0>. Host-side convenience; the
    /// state machines are left untouched.
    pub fn reset_state(&mut self) {
        self.store.reset();
    }

    /// True when both engines would accept a trigger on the next tick.
    pub fn is_idle(&self) -> bool {
        self.engine.is_idle() && self.feedback.is_idle()
    }

    /// Number of triggers needed to sweep the loaded gate across the full
    /// statevector.
    pub fn gate_sweep_groups(&self) -> u32 {
        self.engine.num_groups()
    }
}
