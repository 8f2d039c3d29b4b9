//! Parser for the text circuit format.
//!
//! A circuit file starts with a `qubits N` header and lists one gate per
//! line: the mnemonic, its qubit operands, and an angle in radians for the
//! rotation gates. Blank lines and `#` comments are skipped.
//!
//! ```text
//! # Bell pair
//! qubits 2
//! h 0
//! cnot 0 1
//! ```

use anyhow::{Context, Result, bail, ensure};
use qsa_common::gate::MAX_NUM_QUBITS;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One gate operation from a circuit file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircuitOp {
    H(u32),
    X(u32),
    Y(u32),
    Z(u32),
    S(u32),
    T(u32),
    Rx(u32, f32),
    Ry(u32, f32),
    Rz(u32, f32),
    Cnot(u32, u32),
    Cz(u32, u32),
    Swap(u32, u32),
    Crx(u32, u32, f32),
    Cry(u32, u32, f32),
    Crz(u32, u32, f32),
}

/// Parsed circuit: qubit count plus the gate sequence in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    pub num_qubits: u32,
    pub ops: Vec<CircuitOp>,
}

/// Loads and parses a circuit file.
pub fn load_circuit_file<P: AsRef<Path>>(path: P) -> Result<Circuit> {
    let file = File::open(&path).context("Failed to open circuit file")?;
    let reader = BufReader::new(file);

    let mut num_qubits: Option<u32> = None;
    let mut ops = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let context = || format!("line {}: {}", line_no + 1, trimmed);

        if parts[0].eq_ignore_ascii_case("qubits") {
            ensure!(num_qubits.is_none(), "duplicate qubits header ({})", context());
            ensure!(parts.len() == 2, "malformed qubits header ({})", context());
            let n: u32 = parts[1].parse().with_context(context)?;
            ensure!(
                (1..=MAX_NUM_QUBITS).contains(&n),
                "qubit count out of range ({})",
                context()
            );
            num_qubits = Some(n);
            continue;
        }

        let n = num_qubits
            .with_context(|| format!("gate before qubits header ({})", context()))?;

        let qubit = |idx: usize| -> Result<u32> {
            let q: u32 = parts
                .get(idx)
                .with_context(|| format!("missing operand ({})", context()))?
                .parse()
                .with_context(context)?;
            ensure!(q < n, "qubit index {} out of range ({})", q, context());
            Ok(q)
        };
        let angle = |idx: usize| -> Result<f32> {
            parts
                .get(idx)
                .with_context(|| format!("missing angle ({})", context()))?
                .parse()
                .with_context(context)
        };

        let op = match parts[0].to_ascii_lowercase().as_str() {
            "h" => CircuitOp::H(qubit(1)?),
            "x" => CircuitOp::X(qubit(1)?),
            "y" => CircuitOp::Y(qubit(1)?),
            "z" => CircuitOp::Z(qubit(1)?),
            "s" => CircuitOp::S(qubit(1)?),
            "t" => CircuitOp::T(qubit(1)?),
            "rx" => CircuitOp::Rx(qubit(1)?, angle(2)?),
            "ry" => CircuitOp::Ry(qubit(1)?, angle(2)?),
            "rz" => CircuitOp::Rz(qubit(1)?, angle(2)?),
            "cnot" | "cx" => CircuitOp::Cnot(qubit(1)?, qubit(2)?),
            "cz" => CircuitOp::Cz(qubit(1)?, qubit(2)?),
            "swap" => CircuitOp::Swap(qubit(1)?, qubit(2)?),
            "crx" => CircuitOp::Crx(qubit(1)?, qubit(2)?, angle(3)?),
            "cry" => CircuitOp::Cry(qubit(1)?, qubit(2)?, angle(3)?),
            "crz" => CircuitOp::Crz(qubit(1)?, qubit(2)?, angle(3)?),
            other => bail!("unknown gate '{}' ({})", other, context()),
        };

        match op {
            CircuitOp::Cnot(a, b) | CircuitOp::Cz(a, b) | CircuitOp::Swap(a, b) => {
                ensure!(a != b, "two-qubit gate with equal operands ({})", context());
            }
            CircuitOp::Crx(a, b, _) | CircuitOp::Cry(a, b, _) | CircuitOp::Crz(a, b, _) => {
                ensure!(a != b, "two-qubit gate with equal operands ({})", context());
            }
            _ => {}
        }

        ops.push(op);
    }

    let num_qubits = num_qubits.context("circuit file has no qubits header")?;
    Ok(Circuit { num_qubits, ops })
}
