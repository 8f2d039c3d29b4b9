//! Pauli error environment for closed-loop correction runs.
//!
//! Tracks the residual X and Z error frame on one Steane block, injects
//! fresh errors (sampled i.i.d. per qubit or replayed from recorded
//! shots), and exposes the stabilizer measurements the real hardware
//! would produce. The measurement and correction sides plug into the
//! feedback controller through latency-modelling adapters that share the
//! simulator state.

use qsa_common::qec::{CorrectionPattern, NUM_PHYSICAL_QUBITS, Syndrome, syndrome_for_qubit};
use qsa_core::feedback::{CorrectionApply, SyndromeMeasure};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

/// Ticks from the measure strobe to syndrome delivery, strobe tick included.
pub const MEASURE_LATENCY: u32 = 4;

/// Ticks from the apply strobe to correction completion, strobe tick included.
pub const APPLY_LATENCY: u32 = 2;

/// Residual Pauli frame of one Steane block.
pub struct ErrorSimulator {
    rng: StdRng,
    error_rate: f64,
    x_errors: u8,
    z_errors: u8,
}

impl ErrorSimulator {
    pub fn new(error_rate: f64, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            error_rate,
            x_errors: 0,
            z_errors: 0,
        }
    }

    /// Injects fresh i.i.d. X and Z errors on top of the residual frame.
    pub fn inject(&mut self) {
        for q in 0..NUM_PHYSICAL_QUBITS {
            if self.rng.gen_bool(self.error_rate) {
                self.x_errors ^= 1 << q;
            }
            if self.rng.gen_bool(self.error_rate) {
                self.z_errors ^= 1 << q;
            }
        }
    }

    /// Replays a recorded error pattern instead of sampling one.
    pub fn inject_pattern(&mut self, x: u8, z: u8) {
        self.x_errors ^= x & 0x7F;
        self.z_errors ^= z & 0x7F;
    }

    /// Measures all six stabilizers of the current frame.
    ///
    /// An X error anticommutes with the Z stabilizers and a Z error with
    /// the X stabilizers, so each axis of the syndrome accumulates the
    /// signatures of the opposite axis's errors.
    pub fn measure_syndrome(&self) -> Syndrome {
        let mut sx = 0u8;
        let mut sz = 0u8;
        for q in 0..NUM_PHYSICAL_QUBITS {
            if self.z_errors & (1 << q) != 0 {
                sx ^= syndrome_for_qubit(q);
            }
            if self.x_errors & (1 << q) != 0 {
                sz ^= syndrome_for_qubit(q);
            }
        }
        Syndrome::new(sx, sz)
    }

    /// Applies a decoded correction to the frame. Pauli operators square
    /// to identity, so a matching correction cancels the error exactly.
    pub fn apply_correction(&mut self, correction: CorrectionPattern) {
        self.x_errors ^= correction.x;
        self.z_errors ^= correction.z;
    }

    /// True when no residual error remains on either axis.
    pub fn is_clean(&self) -> bool {
        self.x_errors == 0 && self.z_errors == 0
    }

    /// Residual (x, z) error masks.
    pub fn residual(&self) -> (u8, u8) {
        (self.x_errors, self.z_errors)
    }
}

/// Stabilizer-measurement collaborator over a shared simulator.
pub struct MeasureAdapter {
    sim: Rc<RefCell<ErrorSimulator>>,
    countdown: Option<u32>,
}

impl MeasureAdapter {
    pub fn new(sim: Rc<RefCell<ErrorSimulator>>) -> Self {
        Self {
            sim,
            countdown: None,
        }
    }
}

impl SyndromeMeasure for MeasureAdapter {
    fn tick(&mut self, start: bool) -> Option<Syndrome> {
        if start {
            self.countdown = Some(MEASURE_LATENCY);
        }
        let remaining = self.countdown.as_mut()?;
        *remaining -= 1;
        if *remaining > 0 {
            return None;
        }
        self.countdown = None;
        Some(self.sim.borrow().measure_syndrome())
    }
}

/// Correction-application collaborator over a shared simulator.
pub struct ApplyAdapter {
    sim: Rc<RefCell<ErrorSimulator>>,
    pending: CorrectionPattern,
    countdown: Option<u32>,
}

impl ApplyAdapter {
    pub fn new(sim: Rc<RefCell<ErrorSimulator>>) -> Self {
        Self {
            sim,
            pending: CorrectionPattern::default(),
            countdown: None,
        }
    }
}

impl CorrectionApply for ApplyAdapter {
    fn tick(&mut self, start: Option<CorrectionPattern>) -> bool {
        if let Some(correction) = start {
            self.pending = correction;
            self.countdown = Some(APPLY_LATENCY);
        }
        let Some(remaining) = self.countdown.as_mut() else {
            return false;
        };
        *remaining -= 1;
        if *remaining > 0 {
            return false;
        }
        self.countdown = None;
        self.sim.borrow_mut().apply_correction(self.pending);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsa_core::decoder::SyndromeDecoder;

    /// Tests that a single X error shows up only in the Z-stabilizer field.
    #[test]
    fn single_x_error_syndrome() {
        let mut sim = ErrorSimulator::new(0.0, 0);
        sim.inject_pattern(0b0000001, 0);
        let syndrome = sim.measure_syndrome();
        assert_eq!(syndrome.x, 0);
        assert_eq!(syndrome.z, 0b111);
    }

    /// Tests that measure, decode and apply clears any single-axis error,
    /// plus the combined X+Z patterns the table covers (qubits 0-3).
    #[test]
    fn single_errors_round_trip() {
        for q in 0..NUM_PHYSICAL_QUBITS {
            let mut patterns = vec![(1u8 << q, 0u8), (0, 1 << q)];
            if q < 4 {
                patterns.push((1 << q, 1 << q));
            }
            for (x, z) in patterns {
                let mut sim = ErrorSimulator::new(0.0, 0);
                sim.inject_pattern(x, z);
                let correction = SyndromeDecoder::lookup(sim.measure_syndrome());
                sim.apply_correction(correction);
                assert!(sim.is_clean(), "qubit {q} pattern ({x:#09b}, {z:#09b})");
            }
        }
    }

    /// Tests the adapter latencies against the trait's strobe protocol.
    #[test]
    fn adapter_latency() {
        let sim = Rc::new(RefCell::new(ErrorSimulator::new(0.0, 0)));
        sim.borrow_mut().inject_pattern(0b0000001, 0);

        let mut measure = MeasureAdapter::new(sim.clone());
        assert!(measure.tick(true).is_none());
        assert!(measure.tick(false).is_none());
        assert!(measure.tick(false).is_none());
        let syndrome = measure.tick(false).expect("done on the fourth tick");
        assert_eq!(syndrome.z, 0b111);

        let mut apply = ApplyAdapter::new(sim.clone());
        let correction = CorrectionPattern::new(0b0000001, 0);
        assert!(!apply.tick(Some(correction)));
        assert!(apply.tick(None));
        assert!(sim.borrow().is_clean());
    }
}
