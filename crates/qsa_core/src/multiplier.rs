//! Two-stage pipelined complex multiplier and its replicated array.
//!
//! Models the accelerator's fixed-latency complex multiply unit: stage one
//! registers the four partial products of the presented operands, stage two
//! combines the registered partials into the output. A product is therefore
//! observable exactly two ticks after its operands are presented. The unit
//! is replicated [`PARALLEL_UNITS`] times with no shared state between
//! instances; the array processes one gate-matrix row per compute step by
//! pumping operand pairs through the pipeline in chunks.

use num_complex::Complex32;

/// Number of replicated multiplier instances in the compute array.
pub const PARALLEL_UNITS: usize = 4;

/// Two-stage pipelined complex multiplier.
///
/// Overflow and rounding follow IEEE-754 f32 with no additional saturation.
/// The only side effect of a tick is the update of the two pipeline
/// registers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexMultiplier {
    /// Stage-one registers: a.re*b.re, a.im*b.im, a.re*b.im, a.im*b.re.
    partials: [f32; 4],
    /// Stage-two output register.
    out: Complex32,
}

impl ComplexMultiplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the pipeline one tick with operands `a` and `b`.
    ///
    /// Returns the stage-two output produced from the partials registered
    /// on the previous tick; the product of `a` and `b` appears two ticks
    /// after they are presented here.
    #[inline(always)]
    pub fn tick(&mut self, a: Complex32, b: Complex32) -> Complex32 {
        self.out = Complex32::new(
            self.partials[0] - self.partials[1],
            self.partials[2] + self.partials[3],
        );
        self.partials = [a.re * b.re, a.im * b.im, a.re * b.im, a.im * b.re];
        self.out
    }

    /// Current stage-two output register.
    #[inline(always)]
    pub fn output(&self) -> Complex32 {
        self.out
    }
}

/// Array of [`PARALLEL_UNITS`] independent multiplier instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiplierArray {
    units: [ComplexMultiplier; PARALLEL_UNITS],
}

impl MultiplierArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the dot product of a gate-matrix row with the cached
    /// amplitude vector.
    ///
    /// Operand pairs are fed to the array in chunks of [`PARALLEL_UNITS`];
    /// each chunk takes two pipeline ticks (issue, then drain) before its
    /// products are accumulated. Accumulation order is fixed, so results
    /// are bit-identical across runs.
    pub fn dot_row(&mut self, row: &[Complex32], amplitudes: &[Complex32]) -> Complex32 {
        debug_assert_eq!(row.len(), amplitudes.len());
        let zero = Complex32::new(0.0, 0.0);
        let mut acc = zero;

        for chunk_start in (0..row.len()).step_by(PARALLEL_UNITS) {
            let chunk_len = (row.len() - chunk_start).min(PARALLEL_UNITS);
            for u in 0..chunk_len {
                self.units[u].tick(row[chunk_start + u], amplitudes[chunk_start + u]);
            }
            for u in 0..chunk_len {
                acc += self.units[u].tick(zero, zero);
            }
        }
        acc
    }
}
