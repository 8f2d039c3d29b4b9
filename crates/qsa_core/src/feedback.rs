//! Error-correction feedback controller.
//!
//! Composes one measure -> decode -> apply sequence into an atomic cycle.
//! Measurement and correction application are external collaborators
//! reached through the [`SyndromeMeasure`] and [`CorrectionApply`] traits;
//! decoding uses the embedded [`SyndromeDecoder`]. No two phases are ever
//! in flight at once, so cycle time is the sum of the three sub-latencies
//! plus the fixed sequencing overhead.

use crate::decoder::SyndromeDecoder;
use qsa_common::qec::{CorrectionPattern, Syndrome};

/// External stabilizer-measurement collaborator.
///
/// Ticked once per controller tick while the Measure phase is active.
/// `start` is high for exactly the strobe tick; the implementation returns
/// the measured syndrome on the tick its own done signal rises.
pub trait SyndromeMeasure {
    fn tick(&mut self, start: bool) -> Option<Syndrome>;
}

/// External correction-application collaborator.
///
/// Ticked once per controller tick while the Apply phase is active. The
/// correction pattern is carried on the strobe tick only; the
/// implementation returns true on the tick its own done signal rises.
pub trait CorrectionApply {
    fn tick(&mut self, start: Option<CorrectionPattern>) -> bool;
}

/// Measurement stub that completes immediately with the all-zero syndrome.
///
/// Used when no measurement hardware is attached, e.g. while the host only
/// exercises the gate path.
#[derive(Debug, Default)]
pub struct ZeroSyndromeMeasure;

impl SyndromeMeasure for ZeroSyndromeMeasure {
    fn tick(&mut self, start: bool) -> Option<Syndrome> {
        start.then(Syndrome::default)
    }
}

/// Correction stub that acknowledges on the strobe tick without acting.
#[derive(Debug, Default)]
pub struct ImmediateApply;

impl CorrectionApply for ImmediateApply {
    fn tick(&mut self, start: Option<CorrectionPattern>) -> bool {
        start.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Measure,
    Decode,
    Apply,
    Done,
}

/// Feedback cycle sequencer.
pub struct FeedbackController {
    state: CycleState,
    decoder: SyndromeDecoder,
    syndrome: Syndrome,
    correction: CorrectionPattern,
    strobe: bool,
    cycle_done: bool,
}

impl Default for FeedbackController {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackController {
    pub fn new() -> Self {
        Self {
            state: CycleState::Idle,
            decoder: SyndromeDecoder::new(),
            syndrome: Syndrome::default(),
            correction: CorrectionPattern::default(),
            strobe: false,
            cycle_done: false,
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == CycleState::Idle
    }

    /// Syndrome latched by the most recent Measure phase.
    pub fn syndrome(&self) -> Syndrome {
        self.syndrome
    }

    /// Correction produced by the most recent Decode phase.
    pub fn correction(&self) -> CorrectionPattern {
        self.correction
    }

    /// Advances the controller one tick.
    ///
    /// `cycle_start` is a level input sampled only in the Idle state; a
    /// trigger while busy is ignored rather than queued. Returns
    /// `cycle_done`, high for exactly the Done tick.
    pub fn tick(
        &mut self,
        cycle_start: bool,
        measure: &mut dyn SyndromeMeasure,
        apply: &mut dyn CorrectionApply,
    ) -> bool {
        self.cycle_done = false;
        match self.state {
            CycleState::Idle => {
                if cycle_start {
                    self.state = CycleState::Measure;
                    self.strobe = true;
                }
            }
            CycleState::Measure => {
                let done = measure.tick(self.strobe);
                self.strobe = false;
                if let Some(syndrome) = done {
                    self.syndrome = syndrome;
                    self.state = CycleState::Decode;
                    self.strobe = true;
                }
            }
            CycleState::Decode => {
                let start = self.strobe.then_some(self.syndrome);
                self.strobe = false;
                if self.decoder.tick(start) {
                    self.correction = self.decoder.correction();
                    self.state = CycleState::Apply;
                    self.strobe = true;
                }
            }
            CycleState::Apply => {
                let start = self.strobe.then_some(self.correction);
                self.strobe = false;
                if apply.tick(start) {
                    self.state = CycleState::Done;
                }
            }
            CycleState::Done => {
                self.cycle_done = true;
                self.state = CycleState::Idle;
            }
        }
        self.cycle_done
    }
}
