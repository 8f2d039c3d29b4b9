use qsa_common::qec::{CorrectionPattern, NUM_PHYSICAL_QUBITS, Syndrome, syndrome_for_qubit};

/// 64-entry syndrome lookup table, indexed by `{syndrome_x, syndrome_z}`.
///
/// Populated with the identity entry, seven single-X-error entries (flagged
/// by the Z stabilizers), seven single-Z-error entries (flagged by the X
/// stabilizers), and four combined-XZ entries for qubits 0-3. The remaining
/// addresses hold the all-zero pattern: an unrecognized syndrome decodes as
/// "no correction", silently.
const LOOKUP_TABLE: [(u8, u8); 64] = build_lookup_table();

const fn build_lookup_table() -> [(u8, u8); 64] {
    let mut table = [(0u8, 0u8); 64];

    let mut q = 0;
    while q < NUM_PHYSICAL_QUBITS {
        let s = syndrome_for_qubit(q);
        // X error on q: only the Z stabilizers fire.
        table[s as usize] = (1 << q, 0);
        // Z error on q: only the X stabilizers fire.
        table[((s as usize) << 3)] = (0, 1 << q);
        q += 1;
    }

    let mut q = 0;
    while q < 4 {
        let s = syndrome_for_qubit(q);
        table[((s as usize) << 3) | s as usize] = (1 << q, 1 << q);
        q += 1;
    }

    table
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    Idle,
    Lookup,
    Done,
}

/// Fixed-latency Steane syndrome decoder.
///
/// The table read itself is combinational; the surrounding state machine
/// pins decode latency at two ticks after the tick that samples
/// `decode_start`, regardless of syndrome value.
pub struct SyndromeDecoder {
    state: DecodeState,
    syndrome: Syndrome,
    correction: CorrectionPattern,
    decode_done: bool,
}

impl Default for SyndromeDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SyndromeDecoder {
    pub fn new() -> Self {
        Self {
            state: DecodeState::Idle,
            syndrome: Syndrome::default(),
            correction: CorrectionPattern::default(),
            decode_done: false,
        }
    }

    /// Combinational table lookup.
    pub fn lookup(syndrome: Syndrome) -> CorrectionPattern {
        let (x, z) = LOOKUP_TABLE[syndrome.lut_addr()];
        CorrectionPattern::new(x, z)
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DecodeState::Idle
    }

    /// Correction output register, valid from the Done tick until the next
    /// lookup overwrites it.
    pub fn correction(&self) -> CorrectionPattern {
        self.correction
    }

    /// Advances the decoder one tick.
    ///
    /// A syndrome presented in `start` is latched only in the Idle state;
    /// a strobe while busy is ignored. Returns `decode_done`, high for
    /// exactly the Done tick.
    pub fn tick(&mut self, start: Option<Syndrome>) -> bool {
        self.decode_done = false;
        match self.state {
            DecodeState::Idle => {
                if let Some(syndrome) = start {
                    self.syndrome = syndrome;
                    self.state = DecodeState::Lookup;
                }
            }
            DecodeState::Lookup => {
                self.correction = Self::lookup(self.syndrome);
                self.state = DecodeState::Done;
            }
            DecodeState::Done => {
                self.decode_done = true;
                self.state = DecodeState::Idle;
            }
        }
        self.decode_done
    }
}
