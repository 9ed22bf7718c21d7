//! Behavioural tests for modular multiplication

use qop_core::expand::{apply_sequence, basis_state, digits_of, dominant_basis_index};
use qop_core::{IntoOp, Operator, OperatorError, Recorder, Tape, Wires};
use qop_templates::Multiplier;

fn w(indices: &[usize]) -> Wires {
    Wires::indices(indices.iter().copied()).unwrap()
}

/// Run the decomposition on |x⟩|0…0⟩ and return the basis index reached
fn multiply(op: &Multiplier, x: usize) -> usize {
    let n = op.x_wires().len();
    let total = op.wires().len();
    let mut digits = digits_of(x, n, 2);
    digits.resize(total, 0);
    let state = basis_state(&digits, 2);
    let out = apply_sequence(&state, &op.decomposition().unwrap(), op.wires(), 2).unwrap();
    dominant_basis_index(&out, 1e-8).expect("output is not a basis state")
}

#[test]
fn test_modular_multiplication_with_extra_work_wire() {
    let op = Multiplier::new(4, w(&[0, 1, 2]), Some(7), w(&[3, 4, 5, 6, 7])).unwrap();
    for x in 0..7 {
        let expected = (x * 4 % 7) << 5;
        assert_eq!(multiply(&op, x), expected, "x = {x}");
    }
}

#[test]
fn test_full_register_multiplication() {
    let op = Multiplier::new(5, w(&[0, 1, 2]), None, w(&[3, 4, 5])).unwrap();
    for x in 0..8 {
        assert_eq!(multiply(&op, x), (x * 5 % 8) << 3, "x = {x}");
    }
}

#[test]
fn test_large_multiplier_is_reduced() {
    let reduced = Multiplier::new(2, w(&[0, 1]), Some(3), w(&[2, 3, 4, 5])).unwrap();
    let large = Multiplier::new(17, w(&[0, 1]), Some(3), w(&[2, 3, 4, 5])).unwrap();
    assert_eq!(large.k(), 2);
    for x in 0..3 {
        assert_eq!(multiply(&large, x), multiply(&reduced, x));
    }
}

#[test]
fn test_matrix_permutes_valid_inputs() {
    let op = Multiplier::new(3, w(&[0, 1]), Some(4), w(&[2, 3])).unwrap();
    let m = op.matrix().unwrap();
    assert_eq!(m.dim(), 16);
    for x in 0..4 {
        let column = x << 2;
        let row = (x * 3 % 4) << 2;
        assert!((m.get(row, column).norm() - 1.0).abs() < 1e-8);
    }
}

#[test]
fn test_overlap_is_reported_first() {
    // also non-invertible and too few work wires, but overlap wins
    let err = Multiplier::new(2, w(&[0, 1]), Some(4), w(&[1, 2])).unwrap_err();
    match err {
        OperatorError::WireOverlap { first, second, .. } => {
            assert_eq!(first, "x_wires");
            assert_eq!(second, "work_wires");
        },
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn test_validation_errors() {
    assert!(matches!(
        Multiplier::new(3, w(&[0, 1]), Some(3), w(&[2, 3, 4])),
        Err(OperatorError::InsufficientWorkWires { required: 4, actual: 3, .. })
    ));
    assert!(matches!(
        Multiplier::new(3, w(&[0, 1]), None, w(&[2])),
        Err(OperatorError::InsufficientWorkWires { required: 2, actual: 1, .. })
    ));
    assert!(matches!(
        Multiplier::new(3, w(&[0, 1]), Some(9), w(&[2, 3, 4, 5])),
        Err(OperatorError::RegisterTooSmall { modulus: 9, width: 2, .. })
    ));
    assert!(matches!(
        Multiplier::new(6, w(&[0, 1, 2]), Some(8), w(&[3, 4, 5])),
        Err(OperatorError::NonInvertibleMultiplier { k: 6, modulus: 8 })
    ));
    assert!(matches!(
        Multiplier::new(1, w(&[0]), Some(0), w(&[1, 2, 3])),
        Err(OperatorError::ZeroModulus)
    ));
    assert!(matches!(
        Multiplier::new(1, Wires::empty(), None, w(&[1])),
        Err(OperatorError::InvalidWireCount { .. })
    ));
}

#[test]
fn test_errors_are_configuration_errors() {
    let err = Multiplier::new(2, w(&[0, 1]), Some(4), w(&[2, 3])).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("inverse"));
}

#[test]
fn test_decompose_into_tape() {
    let op = Multiplier::new(3, w(&[0, 1]), None, w(&[2, 3])).unwrap();
    let mut tape = Tape::new();
    op.decompose_into(&mut tape).unwrap();
    assert_eq!(tape.len(), 8);
    assert_eq!(tape.operations()[3].name(), "SWAP");

    let mut outer = Tape::new();
    outer.record(op.into_op());
    let expanded = outer.expand(1).unwrap();
    assert_eq!(expanded.len(), 8);
    assert_eq!(expanded.operations()[1].name(), "ControlledSequence");
}
