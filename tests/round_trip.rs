mod common;

use approx::assert_relative_eq;
use common::sample_instance;
use ommx_amplify_adapter::amplify::{Bounds, Model, VariableGenerator};
use ommx_amplify_adapter::domain::TermMap;
use ommx_amplify_adapter::{
    model_to_instance, AmplifyAdapter, DecisionVariable, Instance, Linear, Sense, State,
};
use proptest::prelude::*;

fn round_trip(instance: Instance) -> Instance {
    let adapter = AmplifyAdapter::new(instance).unwrap();
    model_to_instance(adapter.solver_input()).unwrap()
}

fn sample_state() -> State {
    [(0, 1.0), (1, 2.0), (2, -3.0), (3, 16.5)].into_iter().collect()
}

#[test]
fn round_trip_preserves_variables() {
    let original = sample_instance(Sense::Minimize);
    let restored = round_trip(original.clone());

    assert_eq!(restored.sense(), Sense::Minimize);
    assert_eq!(
        restored.decision_variables.len(),
        original.decision_variables.len()
    );
    let pairs = original
        .decision_variables
        .iter()
        .zip(&restored.decision_variables);
    for (before, after) in pairs {
        assert_eq!(after.id, before.id);
        assert_eq!(after.kind(), before.kind());
        assert_eq!(after.bound_or_unbounded(), before.bound_or_unbounded());
        assert_eq!(after.name(), before.label());
    }
}

#[test]
fn round_trip_preserves_constraints() {
    let original = sample_instance(Sense::Minimize);
    let restored = round_trip(original.clone());

    assert_eq!(restored.constraints.len(), original.constraints.len());
    for (before, after) in original.constraints.iter().zip(&restored.constraints) {
        assert_eq!(after.id, before.id);
        assert_eq!(after.equality(), before.equality());
        assert_eq!(after.name.as_deref(), Some(before.label().as_str()));
        assert_eq!(
            after.function.as_ref().unwrap().to_terms().unwrap(),
            before.function.as_ref().unwrap().to_terms().unwrap()
        );
    }
}

#[test]
fn round_trip_evaluates_the_same() {
    let state = sample_state();
    let original = sample_instance(Sense::Minimize);
    let restored = round_trip(original.clone());

    let before = original.evaluate(&state).unwrap();
    let after = restored.evaluate(&state).unwrap();
    assert_relative_eq!(after.objective, before.objective);
    assert_eq!(after.is_feasible(), before.is_feasible());
}

#[test]
fn maximize_round_trips_to_negated_minimize() {
    let state = sample_state();
    let original = sample_instance(Sense::Maximize);
    let restored = round_trip(original.clone());

    assert_eq!(restored.sense(), Sense::Minimize);
    let before = original.evaluate(&state).unwrap();
    let after = restored.evaluate(&state).unwrap();
    assert_relative_eq!(after.objective, -before.objective);
}

#[test]
fn encoded_instance_survives_translation() {
    let original = sample_instance(Sense::Minimize);
    let decoded = Instance::from_bytes(&original.to_bytes()).unwrap();
    let restored = round_trip(decoded);
    assert_eq!(
        restored.objective.unwrap().to_terms().unwrap(),
        original.objective.unwrap().to_terms().unwrap()
    );
}

proptest! {
    #[test]
    fn product_order_does_not_change_terms(order in Just(vec![0usize, 1, 2]).prop_shuffle()) {
        let mut gen = VariableGenerator::new();
        let vars = [
            gen.binary("x"),
            gen.integer("y", Bounds::new(-20.0, 20.0)),
            gen.real("z", Bounds::new(-30.0, 30.0)),
        ];
        let (y, z) = (&vars[1], &vars[2]);
        let product = 2.0 * &vars[order[0]] * &vars[order[1]] * &vars[order[2]];
        let model = Model::from(product + 3.0 * y * z + 4.0 * z + 5.0);

        let instance = model_to_instance(&model).unwrap();
        let expected: TermMap = [
            (vec![0, 1, 2], 2.0),
            (vec![1, 2], 3.0),
            (vec![2], 4.0),
            (vec![], 5.0),
        ]
        .into_iter()
        .collect();
        prop_assert_eq!(instance.objective.unwrap().to_terms().unwrap(), expected);
    }

    #[test]
    fn maximize_negates_every_coefficient(
        coefficient in prop_oneof![-100.0f64..-0.5, 0.5f64..100.0],
        constant in -10.0f64..10.0,
    ) {
        let original = Instance::new(
            vec![DecisionVariable::continuous(0, -1.0, 1.0).with_name("v")],
            Linear::new([(0, coefficient)], constant),
            vec![],
            Sense::Maximize,
        );
        let restored = round_trip(original.clone());
        let before = original.objective.unwrap().to_terms().unwrap();
        let after = restored.objective.unwrap().to_terms().unwrap();
        let negated: TermMap = before.into_iter().map(|(ids, c)| (ids, -c)).collect();
        prop_assert_eq!(after, negated);
    }
}
