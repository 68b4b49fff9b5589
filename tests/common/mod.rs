#![allow(dead_code)]

use ommx_amplify_adapter::amplify::{Client, ClientError, Model, SolveResult};
use ommx_amplify_adapter::{
    Constraint, DecisionVariable, Instance, Linear, Polynomial, Quadratic, Sense,
};
use std::cell::{Cell, RefCell};
use std::time::Duration;

/// Minimize: 2xyz + 3yz + 4z + 5
/// Subject to:
///     6x + 7y + 8z <= 9
///     10xy + 11yz + 12xz = 13
///     14xyz >= 15
///     16 <= w <= 17
///     x: Binary
///     y: Integer [-20, 20]
///     z: Continuous [-30, 30], subscripts [0]
///     w: Continuous unbounded, subscripts [1, 2]
pub fn sample_instance(sense: Sense) -> Instance {
    let decision_variables = vec![
        DecisionVariable::binary(0).with_name("x"),
        DecisionVariable::integer(1, -20.0, 20.0).with_name("y"),
        DecisionVariable::continuous(2, -30.0, 30.0)
            .with_name("z")
            .with_subscripts(vec![0]),
        DecisionVariable::continuous(3, f64::NEG_INFINITY, f64::INFINITY)
            .with_name("w")
            .with_subscripts(vec![1, 2]),
    ];

    let objective = Polynomial::new([
        (vec![0, 1, 2], 2.0),
        (vec![1, 2], 3.0),
        (vec![2], 4.0),
        (vec![], 5.0),
    ]);

    let constraints = vec![
        Constraint::less_than_or_equal_to_zero(
            0,
            Linear::new([(0, 6.0), (1, 7.0), (2, 8.0)], -9.0),
        )
        .with_name("constraintA"),
        Constraint::equal_to_zero(
            1,
            Quadratic::new(
                vec![0, 1, 0],
                vec![1, 2, 2],
                vec![10.0, 11.0, 12.0],
                Some(Linear::new([], -13.0)),
            ),
        )
        .with_name("constraintB"),
        // 14xyz - 15 >= 0, negated by the caller
        Constraint::less_than_or_equal_to_zero(
            2,
            Polynomial::new([(vec![0, 1, 2], -14.0), (vec![], 15.0)]),
        )
        .with_name("constraintC"),
        // w >= 16, negated by the caller
        Constraint::less_than_or_equal_to_zero(3, Linear::new([(3, -1.0)], 16.0))
            .with_name("constraintD"),
        Constraint::less_than_or_equal_to_zero(4, Linear::new([(3, 1.0)], -17.0))
            .with_name("constraintE"),
    ];

    Instance::new(decision_variables, objective, constraints, sense)
}

/// Compare models including the metadata of every referenced variable.
pub fn assert_models_match(actual: &Model, expected: &Model) {
    assert_eq!(actual.objective(), expected.objective(), "objective differs");
    assert_eq!(actual.constraints(), expected.constraints(), "constraints differ");

    let actual_vars = actual.variables();
    let expected_vars = expected.variables();
    assert_eq!(actual_vars.len(), expected_vars.len());
    for (a, e) in actual_vars.iter().zip(&expected_vars) {
        assert_eq!(a.index(), e.index());
        assert_eq!(a.var_type(), e.var_type(), "type of {}", e);
        assert_eq!(a.bounds(), e.bounds(), "bounds of {}", e);
        assert_eq!(a.name(), e.name());
    }
}

/// Client answering every call through a closure and recording its inputs
pub struct ScriptedClient<F> {
    respond: F,
    calls: Cell<usize>,
    last_token: RefCell<Option<String>>,
    last_timeout: Cell<Option<Duration>>,
}

impl<F> ScriptedClient<F>
where
    F: Fn(&Model) -> Result<SolveResult, ClientError>,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            calls: Cell::new(0),
            last_token: RefCell::new(None),
            last_timeout: Cell::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.borrow().clone()
    }

    pub fn last_timeout(&self) -> Option<Duration> {
        self.last_timeout.get()
    }
}

impl<F> Client for ScriptedClient<F>
where
    F: Fn(&Model) -> Result<SolveResult, ClientError>,
{
    fn name(&self) -> &str {
        "scripted"
    }

    fn solve(
        &self,
        model: &Model,
        token: &str,
        timeout: Duration,
    ) -> Result<SolveResult, ClientError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_token.borrow_mut() = Some(token.to_string());
        self.last_timeout.set(Some(timeout));
        (self.respond)(model)
    }
}
