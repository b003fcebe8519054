//! Property-based tests for circuit composition and inversion.

use ampl_ir::{Circuit, ParameterExpression, QubitId, StandardGate, compose, invert};
use proptest::prelude::*;

/// Gate operations that can be applied to a circuit.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Z(u32),
    S(u32),
    T(u32),
    Rz(f64, u32),
    Ry(f64, u32),
    Symbolic(u32),
    CX(u32, u32),
}

impl GateOp {
    fn apply(self, circuit: Circuit) -> Circuit {
        match self {
            GateOp::H(q) => circuit.h(QubitId(q)),
            GateOp::X(q) => circuit.x(QubitId(q)),
            GateOp::Z(q) => circuit.z(QubitId(q)),
            GateOp::S(q) => circuit.s(QubitId(q)),
            GateOp::T(q) => circuit.t(QubitId(q)),
            GateOp::Rz(theta, q) => circuit.rz(theta, QubitId(q)),
            GateOp::Ry(theta, q) => circuit.ry(theta, QubitId(q)),
            GateOp::Symbolic(q) => circuit
                .append(
                    StandardGate::P(ParameterExpression::symbol("phi")),
                    [QubitId(q)],
                )
                .unwrap(),
            GateOp::CX(c, t) => circuit.cx(QubitId(c), QubitId(t)).unwrap(),
        }
    }
}

fn arb_gate_op() -> impl Strategy<Value = GateOp> {
    let angle = -10.0_f64..10.0;
    prop_oneof![
        (0_u32..4).prop_map(GateOp::H),
        (0_u32..4).prop_map(GateOp::X),
        (0_u32..4).prop_map(GateOp::Z),
        (0_u32..4).prop_map(GateOp::S),
        (0_u32..4).prop_map(GateOp::T),
        (angle.clone(), 0_u32..4).prop_map(|(a, q)| GateOp::Rz(a, q)),
        (angle, 0_u32..4).prop_map(|(a, q)| GateOp::Ry(a, q)),
        (0_u32..4).prop_map(GateOp::Symbolic),
        (0_u32..4, 1_u32..4).prop_map(|(c, offset)| GateOp::CX(c, (c + offset) % 4)),
    ]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    prop::collection::vec(arb_gate_op(), 0..=12)
        .prop_map(|ops| ops.into_iter().fold(Circuit::empty(), |c, op| op.apply(c)))
}

proptest! {
    #[test]
    fn invert_is_an_involution(circuit in arb_circuit()) {
        prop_assert_eq!(invert(&invert(&circuit)), circuit);
    }

    #[test]
    fn compose_is_associative(a in arb_circuit(), b in arb_circuit(), c in arb_circuit()) {
        let left = compose(&compose(&a, &b), &c);
        let right = compose(&a, &compose(&b, &c));
        prop_assert_eq!(left.instructions(), right.instructions());
    }

    #[test]
    fn compose_concatenates(a in arb_circuit(), b in arb_circuit()) {
        let ab = compose(&a, &b);
        prop_assert_eq!(ab.len(), a.len() + b.len());
        prop_assert_eq!(&ab.instructions()[..a.len()], a.instructions());
        prop_assert_eq!(&ab.instructions()[a.len()..], b.instructions());
    }

    #[test]
    fn invert_reverses_composition(a in arb_circuit(), b in arb_circuit()) {
        prop_assert_eq!(invert(&compose(&a, &b)), compose(&invert(&b), &invert(&a)));
    }

    #[test]
    fn json_round_trip(circuit in arb_circuit()) {
        let json = circuit.to_json().unwrap();
        prop_assert_eq!(Circuit::from_json(&json).unwrap(), circuit);
    }
}
