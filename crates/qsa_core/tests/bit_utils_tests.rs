//! Unit tests for the mask deposit/extract helpers.

use qsa_core::bit_utils::BitScatter;

/// Tests depositing a dense counter into a split mask.
#[test]
fn test_deposit() {
    assert_eq!(BitScatter::deposit(0b00, 0b0101), 0b0000);
    assert_eq!(BitScatter::deposit(0b01, 0b0101), 0b0001);
    assert_eq!(BitScatter::deposit(0b10, 0b0101), 0b0100);
    assert_eq!(BitScatter::deposit(0b11, 0b0101), 0b0101);
    assert_eq!(BitScatter::deposit(0xFFFF_FFFF, 0), 0);
}

/// Tests gathering masked bits back into a dense field.
#[test]
fn test_extract() {
    assert_eq!(BitScatter::extract(0b0101, 0b0101), 0b11);
    assert_eq!(BitScatter::extract(0b0100, 0b0101), 0b10);
    assert_eq!(BitScatter::extract(0b1010, 0b0101), 0b00);
    assert_eq!(BitScatter::extract(0xFFFF_FFFF, 0), 0);
}

/// Tests that extract inverts deposit over the same mask.
#[test]
fn test_deposit_extract_inverse() {
    let mask = 0b1011_0010;
    for value in 0..16 {
        let scattered = BitScatter::deposit(value, mask);
        assert_eq!(scattered & !mask, 0);
        assert_eq!(BitScatter::extract(scattered, mask), value);
    }
}
