//! Gate matrix construction.
//!
//! Builds [`GateDescriptor`]s for the standard gate set from circuit
//! operations. Matrix entries follow the engine's local basis convention:
//! local bit k of a subspace index corresponds to the k-th lowest set bit
//! of the gate's qubit mask, so two-qubit matrices are laid out from the
//! actual local positions of the control and target rather than from their
//! argument order.

use anyhow::Result;
use num_complex::Complex32;
use qsa_common::gate::GateSize;
use qsa_core::gate_engine::GateDescriptor;
use qsa_io::parser::CircuitOp;
use std::f32::consts::FRAC_1_SQRT_2;

fn c(re: f32, im: f32) -> Complex32 {
    Complex32::new(re, im)
}

fn mat_x() -> [Complex32; 4] {
    [c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)]
}

fn mat_y() -> [Complex32; 4] {
    [c(0.0, 0.0), c(0.0, -1.0), c(0.0, 1.0), c(0.0, 0.0)]
}

fn mat_z() -> [Complex32; 4] {
    [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0)]
}

fn mat_h() -> [Complex32; 4] {
    let s = FRAC_1_SQRT_2;
    [c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0)]
}

fn mat_s() -> [Complex32; 4] {
    [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 1.0)]
}

fn mat_t() -> [Complex32; 4] {
    [
        c(1.0, 0.0),
        c(0.0, 0.0),
        c(0.0, 0.0),
        c(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    ]
}

fn mat_rx(theta: f32) -> [Complex32; 4] {
    let h = theta / 2.0;
    [
        c(h.cos(), 0.0),
        c(0.0, -h.sin()),
        c(0.0, -h.sin()),
        c(h.cos(), 0.0),
    ]
}

fn mat_ry(theta: f32) -> [Complex32; 4] {
    let h = theta / 2.0;
    [
        c(h.cos(), 0.0),
        c(-h.sin(), 0.0),
        c(h.sin(), 0.0),
        c(h.cos(), 0.0),
    ]
}

fn mat_rz(theta: f32) -> [Complex32; 4] {
    let h = theta / 2.0;
    [
        c(h.cos(), -h.sin()),
        c(0.0, 0.0),
        c(0.0, 0.0),
        c(h.cos(), h.sin()),
    ]
}

/// Local bit position of `qubit` within `mask` (its rank among set bits).
fn local_bit(mask: u32, qubit: u32) -> usize {
    (mask & ((1u32 << qubit) - 1)).count_ones() as usize
}

/// 1-qubit gate descriptor from a 2x2 matrix.
fn single(qubit: u32, m: [Complex32; 4]) -> Result<GateDescriptor> {
    Ok(GateDescriptor::new(GateSize::One, 1 << qubit, &m)?)
}

/// Controlled version of a 2x2 matrix as a 4x4 descriptor.
///
/// Columns with the control's local bit clear pass through unchanged;
/// columns with it set apply `u` to the target's local bit.
fn controlled(control: u32, target: u32, u: [Complex32; 4]) -> Result<GateDescriptor> {
    let mask = (1u32 << control) | (1u32 << target);
    let cb = 1usize << local_bit(mask, control);
    let tb = 1usize << local_bit(mask, target);

    let mut m = [c(0.0, 0.0); 16];
    for col in 0..4 {
        if col & cb == 0 {
            m[col * 4 + col] = c(1.0, 0.0);
        } else {
            let t_in = usize::from(col & tb != 0);
            for t_out in 0..2 {
                let row = (col & !tb) | (t_out * tb);
                m[row * 4 + col] = u[t_out * 2 + t_in];
            }
        }
    }
    Ok(GateDescriptor::new(GateSize::Two, mask, &m)?)
}

/// SWAP as a 4x4 permutation descriptor.
fn swap(a: u32, b: u32) -> Result<GateDescriptor> {
    let mask = (1u32 << a) | (1u32 << b);
    let ba = 1usize << local_bit(mask, a);
    let bb = 1usize << local_bit(mask, b);

    let mut m = [c(0.0, 0.0); 16];
    for col in 0..4 {
        let a_bit = usize::from(col & ba != 0);
        let b_bit = usize::from(col & bb != 0);
        let row = (col & !(ba | bb)) | (b_bit * ba) | (a_bit * bb);
        m[row * 4 + col] = c(1.0, 0.0);
    }
    Ok(GateDescriptor::new(GateSize::Two, mask, &m)?)
}

/// Builds the descriptor for one circuit operation.
pub fn descriptor_for(op: &CircuitOp) -> Result<GateDescriptor> {
    match *op {
        CircuitOp::H(q) => single(q, mat_h()),
        CircuitOp::X(q) => single(q, mat_x()),
        CircuitOp::Y(q) => single(q, mat_y()),
        CircuitOp::Z(q) => single(q, mat_z()),
        CircuitOp::S(q) => single(q, mat_s()),
        CircuitOp::T(q) => single(q, mat_t()),
        CircuitOp::Rx(q, theta) => single(q, mat_rx(theta)),
        CircuitOp::Ry(q, theta) => single(q, mat_ry(theta)),
        CircuitOp::Rz(q, theta) => single(q, mat_rz(theta)),
        CircuitOp::Cnot(ctl, tgt) => controlled(ctl, tgt, mat_x()),
        CircuitOp::Cz(ctl, tgt) => controlled(ctl, tgt, mat_z()),
        CircuitOp::Swap(a, b) => swap(a, b),
        CircuitOp::Crx(ctl, tgt, theta) => controlled(ctl, tgt, mat_rx(theta)),
        CircuitOp::Cry(ctl, tgt, theta) => controlled(ctl, tgt, mat_ry(theta)),
        CircuitOp::Crz(ctl, tgt, theta) => controlled(ctl, tgt, mat_rz(theta)),
    }
}
