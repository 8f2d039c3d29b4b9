//! Unit tests for the Steane syndrome decoder.

use qsa_common::qec::{CorrectionPattern, NUM_PHYSICAL_QUBITS, Syndrome, syndrome_for_qubit};
use qsa_core::decoder::{DecodeState, SyndromeDecoder};

/// Tests the per-qubit syndrome signatures of the stabilizer supports.
#[test]
fn test_syndrome_signatures() {
    let expected = [7, 6, 5, 4, 3, 2, 1];
    for q in 0..NUM_PHYSICAL_QUBITS {
        assert_eq!(syndrome_for_qubit(q), expected[q], "qubit {q}");
    }
}

/// Tests that the trivial syndrome decodes to no correction.
#[test]
fn test_trivial_syndrome() {
    let correction = SyndromeDecoder::lookup(Syndrome::new(0, 0));
    assert!(correction.is_clear());
}

/// Tests that an X error on qubit 0 is flagged by all three Z stabilizers.
#[test]
fn test_x_error_qubit0() {
    let correction = SyndromeDecoder::lookup(Syndrome::new(0b000, 0b111));
    assert_eq!(correction, CorrectionPattern::new(0b0000001, 0));
}

/// Tests the combined X and Z error entry for qubit 0.
#[test]
fn test_combined_error_qubit0() {
    let correction = SyndromeDecoder::lookup(Syndrome::new(0b111, 0b111));
    assert_eq!(correction, CorrectionPattern::new(0b0000001, 0b0000001));
}

/// Tests that a syndrome with no table entry decodes to all-zero.
#[test]
fn test_undefined_syndrome() {
    let correction = SyndromeDecoder::lookup(Syndrome::new(0b101, 0b010));
    assert!(correction.is_clear());

    let correction = SyndromeDecoder::lookup(Syndrome::new(0b011, 0b101));
    assert!(correction.is_clear());
}

/// Tests every single-X and single-Z error entry.
#[test]
fn test_all_single_errors() {
    for q in 0..NUM_PHYSICAL_QUBITS {
        let s = syndrome_for_qubit(q);

        let x_corr = SyndromeDecoder::lookup(Syndrome::new(0, s));
        assert_eq!(x_corr, CorrectionPattern::new(1 << q, 0), "X on qubit {q}");

        let z_corr = SyndromeDecoder::lookup(Syndrome::new(s, 0));
        assert_eq!(z_corr, CorrectionPattern::new(0, 1 << q), "Z on qubit {q}");
    }
}

/// Tests the combined-error entries, present for qubits 0-3 only.
#[test]
fn test_combined_error_entries() {
    for q in 0..NUM_PHYSICAL_QUBITS {
        let s = syndrome_for_qubit(q);
        let correction = SyndromeDecoder::lookup(Syndrome::new(s, s));
        if q < 4 {
            assert_eq!(correction, CorrectionPattern::new(1 << q, 1 << q));
        } else {
            assert!(correction.is_clear(), "qubit {q} has no combined entry");
        }
    }
}

/// Tests that decode_done rises exactly two ticks after the start tick.
#[test]
fn test_fixed_decode_latency() {
    let mut decoder = SyndromeDecoder::new();
    let syndrome = Syndrome::new(0, 0b111);

    assert!(!decoder.tick(Some(syndrome)));
    assert_eq!(decoder.state(), DecodeState::Lookup);
    assert!(!decoder.tick(None));
    assert!(decoder.tick(None));
    assert_eq!(decoder.correction(), CorrectionPattern::new(0b0000001, 0));
    assert!(decoder.is_idle());
}

/// Tests that latency is the same for an undefined syndrome.
#[test]
fn test_latency_independent_of_value() {
    let mut decoder = SyndromeDecoder::new();

    assert!(!decoder.tick(Some(Syndrome::new(0b101, 0b010))));
    assert!(!decoder.tick(None));
    assert!(decoder.tick(None));
    assert!(decoder.correction().is_clear());
}

/// Tests that a strobe while busy is ignored.
#[test]
fn test_busy_strobe_ignored() {
    let mut decoder = SyndromeDecoder::new();

    assert!(!decoder.tick(Some(Syndrome::new(0, 0b111))));
    assert!(!decoder.tick(Some(Syndrome::new(0b111, 0))));
    assert!(decoder.tick(None));
    assert_eq!(decoder.correction(), CorrectionPattern::new(0b0000001, 0));
}

/// Tests back-to-back decodes through the state machine.
#[test]
fn test_back_to_back_decodes() {
    let mut decoder = SyndromeDecoder::new();

    assert!(!decoder.tick(Some(Syndrome::new(0, 0b110))));
    assert!(!decoder.tick(None));
    assert!(decoder.tick(None));
    assert_eq!(decoder.correction(), CorrectionPattern::new(0b0000010, 0));

    assert!(!decoder.tick(Some(Syndrome::new(0b001, 0))));
    assert!(!decoder.tick(None));
    assert!(decoder.tick(None));
    assert_eq!(decoder.correction(), CorrectionPattern::new(0, 0b1000000));
}

/// Tests the packed RESULT format round trip.
#[test]
fn test_pack_unpack() {
    let pattern = CorrectionPattern::new(0b0001000, 0b1000000);
    assert_eq!(pattern.pack(), (0b0001000 << 8) | 0b1000000);
    assert_eq!(CorrectionPattern::unpack(pattern.pack()), pattern);
}
